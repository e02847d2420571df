//! Static vehicle catalog and override resolution.

use serde::{Deserialize, Serialize};

use super::config::EngineConfig;
use super::error::EngineError;

/// Vehicle classes the fleet operates, keyed the way quotes refer to them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VehicleClass {
    #[serde(rename = "2e")]
    TwoAxle,
    #[serde(rename = "3e")]
    ThreeAxle,
    #[serde(rename = "6e")]
    SixAxle,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 3] = [
        VehicleClass::TwoAxle,
        VehicleClass::ThreeAxle,
        VehicleClass::SixAxle,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            VehicleClass::TwoAxle => "2e",
            VehicleClass::ThreeAxle => "3e",
            VehicleClass::SixAxle => "6e",
        }
    }

    pub fn parse(id: &str) -> Result<Self, EngineError> {
        match id {
            "2e" => Ok(VehicleClass::TwoAxle),
            "3e" => Ok(VehicleClass::ThreeAxle),
            "6e" => Ok(VehicleClass::SixAxle),
            other => Err(EngineError::UnknownVehicle(other.to_string())),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VehicleClass::TwoAxle => "Camión 2 ejes",
            VehicleClass::ThreeAxle => "Mula 3 ejes",
            VehicleClass::SixAxle => "Trailer 6 ejes",
        }
    }

    pub fn axles(&self) -> u8 {
        match self {
            VehicleClass::TwoAxle => 2,
            VehicleClass::ThreeAxle => 3,
            VehicleClass::SixAxle => 6,
        }
    }

    /// Share of the published toll schedule this class pays. Toll rates are
    /// set per axle count: 2-axle trucks pay a third, 3-axle half, anything
    /// larger the full rate.
    pub fn toll_share_factor(&self) -> f64 {
        match self {
            VehicleClass::TwoAxle => 1.0 / 3.0,
            VehicleClass::ThreeAxle => 0.5,
            VehicleClass::SixAxle => 1.0,
        }
    }
}

/// Per-kilometer consumable rates, USD.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsumableRates {
    pub tires_km: f64,
    pub engine_oil_km: f64,
    pub diff_oil_km: f64,
    pub filters_km: f64,
}

impl ConsumableRates {
    pub fn per_km_total(&self) -> f64 {
        self.tires_km + self.engine_oil_km + self.diff_oil_km + self.filters_km
    }
}

/// A vehicle profile as the calculator consumes it: catalog entry merged
/// with any configuration overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    pub class: VehicleClass,
    pub name: String,
    pub axles: u8,
    pub capacity_tons: f64,
    pub km_per_gal: f64,
    pub depreciation_base_usd: f64,
    pub consumables: ConsumableRates,
    pub default_tank_gal: f64,
}

fn catalog_entry(class: VehicleClass) -> VehicleProfile {
    let (capacity_tons, km_per_gal, depreciation_base_usd, tires_km) = match class {
        VehicleClass::TwoAxle => (15.0, 14.0, 60_000.0, 0.014),
        VehicleClass::ThreeAxle => (24.0, 11.0, 90_000.0, 0.0233),
        VehicleClass::SixAxle => (31.0, 8.0, 106_000.0, 0.0512),
    };
    VehicleProfile {
        class,
        name: class.display_name().to_string(),
        axles: class.axles(),
        capacity_tons,
        km_per_gal,
        depreciation_base_usd,
        consumables: ConsumableRates {
            tires_km,
            engine_oil_km: 0.0137,
            diff_oil_km: 0.002,
            filters_km: 0.0017,
        },
        default_tank_gal: 200.0,
    }
}

/// Resolves a vehicle class to a full profile, merging catalog defaults with
/// the configuration's per-vehicle overrides field by field.
pub fn resolve(class: VehicleClass, config: &EngineConfig) -> Result<VehicleProfile, EngineError> {
    let mut profile = catalog_entry(class);

    if let Some(tuning) = config.vehicles.get(&class) {
        if let Some(value) = tuning.km_per_gal {
            profile.km_per_gal = value;
        }
        if let Some(value) = tuning.capacity_tons {
            profile.capacity_tons = value;
        }
        if let Some(value) = tuning.depreciation_base_usd {
            profile.depreciation_base_usd = value;
        }
        if let Some(value) = tuning.default_tank_gal {
            profile.default_tank_gal = value;
        }
        if let Some(value) = tuning.consumables.tires_km {
            profile.consumables.tires_km = value;
        }
        if let Some(value) = tuning.consumables.engine_oil_km {
            profile.consumables.engine_oil_km = value;
        }
        if let Some(value) = tuning.consumables.diff_oil_km {
            profile.consumables.diff_oil_km = value;
        }
        if let Some(value) = tuning.consumables.filters_km {
            profile.consumables.filters_km = value;
        }
    }

    if !(profile.km_per_gal > 0.0) {
        return Err(EngineError::InvalidEfficiency {
            vehicle: class.id().to_string(),
            km_per_gal: profile.km_per_gal,
        });
    }
    if !(profile.capacity_tons > 0.0) {
        return Err(EngineError::InvalidCapacity {
            vehicle: class.id().to_string(),
            tons: profile.capacity_tons,
        });
    }

    Ok(profile)
}

/// Resolves a vehicle from its string id (as selected in a UI).
pub fn resolve_id(id: &str, config: &EngineConfig) -> Result<VehicleProfile, EngineError> {
    resolve(VehicleClass::parse(id)?, config)
}

/// Picks the smallest vehicle whose capacity covers the load, falling back
/// to the largest when nothing fits.
pub fn pick_for_load(tons: f64, config: &EngineConfig) -> Result<VehicleClass, EngineError> {
    let mut profiles = VehicleClass::ALL
        .iter()
        .map(|&class| resolve(class, config))
        .collect::<Result<Vec<_>, _>>()?;
    profiles.sort_by(|a, b| a.capacity_tons.total_cmp(&b.capacity_tons));

    let largest = profiles[profiles.len() - 1].class;
    Ok(profiles
        .iter()
        .find(|profile| profile.capacity_tons >= tons)
        .map(|profile| profile.class)
        .unwrap_or(largest))
}
