//! Tunable engine configuration.
//!
//! Every engine entry point takes the configuration as an explicit argument
//! and treats it as an immutable snapshot; nothing here is read from ambient
//! state, and the engine never writes it back.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::vehicles::VehicleClass;

/// Process-wide business tunables, normally loaded from persisted user
/// settings and passed in per computation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Fuel price in Ecuador, USD per gallon.
    pub fuel_price_ec: f64,
    /// Fuel price in Peru, USD per gallon.
    pub fuel_price_pe: f64,
    /// Annual financing rate applied over the credit period.
    pub annual_rate: f64,
    pub driver_day_usd: f64,
    pub admin_day_usd: f64,
    pub per_diem_ec_usd: f64,
    pub per_diem_pe_usd: f64,
    /// Useful life of a vehicle, in kilometers, for depreciation.
    pub useful_life_km: f64,
    pub depreciation_factor: f64,
    /// Default margin fraction for internal quotes.
    pub internal_margin: f64,
    /// Default margin fraction for commercial quotes.
    pub commercial_margin: f64,
    pub border_crossing_usd: f64,
    /// Distance before the border over which the origin prefill is assumed
    /// already consumed in mixed-fuel mode.
    pub pre_border_buffer_km: f64,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            fuel_price_ec: 2.8,
            fuel_price_pe: 4.3,
            annual_rate: 0.13,
            driver_day_usd: 40.0,
            admin_day_usd: 18.0,
            per_diem_ec_usd: 10.0,
            per_diem_pe_usd: 15.0,
            useful_life_km: 1_000_000.0,
            depreciation_factor: 0.7,
            internal_margin: 0.40,
            commercial_margin: 0.50,
            border_crossing_usd: 10.0,
            pre_border_buffer_km: 70.0,
        }
    }
}

/// Partial per-vehicle override. Unset fields keep the catalog defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleTuning {
    pub km_per_gal: Option<f64>,
    pub capacity_tons: Option<f64>,
    pub depreciation_base_usd: Option<f64>,
    pub default_tank_gal: Option<f64>,
    pub consumables: ConsumableTuning,
}

/// Per-kilometer consumable rate overrides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumableTuning {
    pub tires_km: Option<f64>,
    pub engine_oil_km: Option<f64>,
    pub diff_oil_km: Option<f64>,
    pub filters_km: Option<f64>,
}

/// Full engine configuration: global tunables plus vehicle overrides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub global: GlobalConfig,
    pub vehicles: HashMap<VehicleClass, VehicleTuning>,
}
