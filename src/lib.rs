//! Pricing and cost engine for cross-border freight quotations between
//! Ecuador and Peru.
//!
//! The engine is purely computational: routing distances, toll totals, and
//! configuration arrive as already-resolved values, and every entry point is
//! a deterministic function of its inputs. The UI layer drives it by
//! resolving a vehicle profile, computing the trip cost breakdown, layering
//! the additional-cost selection on top, and assembling the quotation
//! payload for the document renderer.
//!
//! ```
//! use freight_quoter::domain::{
//!     compute_cost, resolve, EngineConfig, FuelMode, OperationType, TripParameters,
//!     VehicleClass,
//! };
//!
//! let config = EngineConfig::default();
//! let profile = resolve(VehicleClass::SixAxle, &config).unwrap();
//! let params = TripParameters {
//!     vehicle: VehicleClass::SixAxle,
//!     tank_gal: None,
//!     distance_km: 1200.0,
//!     trip_days: 4.0,
//!     credit_days: 30.0,
//!     toll_total_usd: 180.0,
//!     fuel: FuelMode::Standard,
//!     days_in_peru: 2.0,
//!     margin_pct: 40.0,
//!     charge_border_fee: true,
//!     operation: OperationType::Export,
//! };
//! let breakdown = compute_cost(&profile, &config.global, &params).unwrap();
//! assert!(breakdown.pvp >= breakdown.base_cost);
//! assert_eq!(breakdown.pvp % 5.0, 0.0);
//! ```

pub mod domain;
pub mod util;
