//! Trip cost decomposition and sale pricing.

use serde::{Deserialize, Serialize};

use super::catalog::OperationType;
use super::config::GlobalConfig;
use super::error::EngineError;
use super::money::round_up_to_five;
use super::vehicles::{VehicleClass, VehicleProfile};

/// How fuel is bought along the route.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum FuelMode {
    /// Everything bought at origin prices.
    Standard,
    /// Long-haul split: tank prefilled at origin, foreign fuel bought once
    /// the prefill coverage runs out. Used for routes past roughly 1600 km.
    Mixed { km_ec: f64, km_pe: f64 },
}

/// Everything the calculator needs about one trip. Distances and toll totals
/// come already resolved from the routing and toll collaborators or from
/// manual entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripParameters {
    pub vehicle: VehicleClass,
    /// Overrides the profile's default tank capacity when set.
    pub tank_gal: Option<f64>,
    pub distance_km: f64,
    pub trip_days: f64,
    pub credit_days: f64,
    /// Aggregate toll total before the per-vehicle sharing factor.
    pub toll_total_usd: f64,
    pub fuel: FuelMode,
    pub days_in_peru: f64,
    /// Margin in percent, clamped to 0–95.
    pub margin_pct: f64,
    pub charge_border_fee: bool,
    pub operation: OperationType,
}

/// Fuel cost split. In standard mode only `ecuador` is non-zero; in mixed
/// mode the prefill and per-country runs are broken out for the fuel table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelCost {
    pub total: f64,
    pub ecuador: f64,
    pub peru: f64,
    /// Full-tank purchase at origin (mixed mode).
    pub prefill: f64,
    /// Ecuador running cost per km (mixed mode).
    pub origin_running: f64,
    /// Peru cost beyond the prefill coverage (mixed mode).
    pub destination_excess: f64,
}

/// Full cost decomposition for one trip, computed, never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub tank_gal: f64,
    pub fuel: FuelCost,
    pub consumables: f64,
    pub depreciation: f64,
    /// Toll total after the per-vehicle sharing factor.
    pub tolls: f64,
    pub personnel: f64,
    pub days_ec: f64,
    pub days_pe: f64,
    pub border_fee: f64,
    pub financing: f64,
    pub subtotal: f64,
    /// Irreducible minimum: personnel + tolls + border fee.
    pub floor: f64,
    /// max(subtotal, floor); what the margin applies to.
    pub base_cost: f64,
    /// Margin fraction actually applied after clamping.
    pub margin: f64,
    /// Sale price: base grossed up by margin, rounded up to the next 5 USD.
    pub pvp: f64,
}

/// Computes the full decomposition and sale price for a trip.
///
/// Fails fast on invalid vehicle data rather than producing NaN or infinite
/// costs; a zero-efficiency profile never reaches the division.
pub fn compute_cost(
    profile: &VehicleProfile,
    global: &GlobalConfig,
    params: &TripParameters,
) -> Result<CostBreakdown, EngineError> {
    let efficiency = profile.km_per_gal;
    if !(efficiency > 0.0) || !efficiency.is_finite() {
        return Err(EngineError::InvalidEfficiency {
            vehicle: profile.class.id().to_string(),
            km_per_gal: efficiency,
        });
    }

    let tank_gal = params.tank_gal.unwrap_or(profile.default_tank_gal);
    let distance_km = params.distance_km.max(0.0);
    let trip_days = params.trip_days.max(0.0);
    let credit_days = params.credit_days.max(0.0);
    let toll_input = params.toll_total_usd.max(0.0);

    let fuel = match params.fuel {
        FuelMode::Standard => {
            let ecuador = (distance_km / efficiency) * global.fuel_price_ec;
            FuelCost {
                total: ecuador,
                ecuador,
                ..FuelCost::default()
            }
        }
        FuelMode::Mixed { km_ec, km_pe } => {
            if !(tank_gal > 0.0) {
                return Err(EngineError::InvalidTankCapacity {
                    vehicle: profile.class.id().to_string(),
                    gallons: tank_gal,
                });
            }
            let km_ec = km_ec.max(0.0);
            let km_pe = km_pe.max(0.0);
            // The origin prefill covers part of the foreign leg before
            // foreign-priced fuel has to be bought.
            let coverage_km = (tank_gal * efficiency - global.pre_border_buffer_km).max(0.0);
            let prefill = tank_gal * global.fuel_price_ec;
            let origin_running = (km_ec / efficiency) * global.fuel_price_ec;
            let billable_pe_km = (km_pe - coverage_km).max(0.0);
            let destination_excess = (billable_pe_km / efficiency) * global.fuel_price_pe;
            let ecuador = prefill + origin_running;
            FuelCost {
                total: ecuador + destination_excess,
                ecuador,
                peru: destination_excess,
                prefill,
                origin_running,
                destination_excess,
            }
        }
    };

    let consumables = distance_km * profile.consumables.per_km_total();
    let depreciation = distance_km
        * (global.depreciation_factor * profile.depreciation_base_usd / global.useful_life_km);
    let tolls = toll_input * params.vehicle.toll_share_factor();

    let days_pe = trip_days.min(params.days_in_peru).max(0.0);
    let days_ec = (trip_days - days_pe).max(0.0);
    let personnel = trip_days * global.driver_day_usd
        + days_ec * global.per_diem_ec_usd
        + days_pe * global.per_diem_pe_usd
        + trip_days * global.admin_day_usd;

    let border_fee = if params.charge_border_fee {
        global.border_crossing_usd
    } else {
        0.0
    };

    let pre_financing = fuel.total + consumables + depreciation + tolls + personnel + border_fee;
    let financing = pre_financing * (global.annual_rate / 365.0) * credit_days;
    let subtotal = pre_financing + financing;

    let floor = personnel + tolls + border_fee;
    let base_cost = subtotal.max(floor);

    let margin = (params.margin_pct / 100.0).clamp(0.0, 0.95);
    let pvp = round_up_to_five(base_cost / (1.0 - margin));

    Ok(CostBreakdown {
        tank_gal,
        fuel,
        consumables,
        depreciation,
        tolls,
        personnel,
        days_ec,
        days_pe,
        border_fee,
        financing,
        subtotal,
        floor,
        base_cost,
        margin,
        pvp,
    })
}
