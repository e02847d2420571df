//! Errors that halt a cost computation before any arithmetic runs.

/// Invalid vehicle references or vehicle data are rejected up front so the
/// calculator never divides by zero or produces NaN costs.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("unknown vehicle id: {0:?}")]
    UnknownVehicle(String),
    #[error("vehicle {vehicle} has a non-positive fuel efficiency ({km_per_gal} km/gal)")]
    InvalidEfficiency { vehicle: String, km_per_gal: f64 },
    #[error("vehicle {vehicle} has a non-positive cargo capacity ({tons} t)")]
    InvalidCapacity { vehicle: String, tons: f64 },
    #[error("vehicle {vehicle} has a non-positive tank capacity ({gallons} gal)")]
    InvalidTankCapacity { vehicle: String, gallons: f64 },
}
