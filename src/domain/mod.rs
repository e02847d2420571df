//! Domain logic for freight cost quotation lives here.

pub mod catalog;
pub mod config;
pub mod error;
pub mod ledger;
pub mod money;
pub mod quote;
pub mod tolls;
pub mod trip;
pub mod vehicles;

pub use catalog::{
    master_items, resolve_catalog, transit_items, CostItem, CustomsContext, FormulaKind,
    OperationType, PricingRule, ResolvedCostItem, ResolvedPrice,
};
pub use config::{ConsumableTuning, EngineConfig, GlobalConfig, VehicleTuning};
pub use error::EngineError;
pub use ledger::{LineState, SelectedCostLine, SelectionLedger};
pub use money::{format_usd, round_to_cents, round_up_to_five};
pub use quote::{line_text, trip_narrative, QuoteDocument, TripNarrative};
pub use tolls::{default_stations, TollCatalogError, TollGuide, TollStation};
pub use trip::{compute_cost, CostBreakdown, FuelCost, FuelMode, TripParameters};
pub use vehicles::{
    pick_for_load, resolve, resolve_id, ConsumableRates, VehicleClass, VehicleProfile,
};
