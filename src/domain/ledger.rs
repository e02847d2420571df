//! Ordered selection of additional cost lines with manual-override tracking.
//!
//! Every selected line is either bound to the catalog (auto-refreshed when
//! customs inputs change) or manually overridden (frozen until the user
//! explicitly resets it). Callers re-run catalog resolution and then
//! [`SelectionLedger::resync`] whenever customs-value inputs change.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::{OperationType, ResolvedCostItem, ResolvedPrice};
use super::money::round_to_cents;

/// Per-line override state. The transition to `ManuallyOverridden` happens
/// on any field edit and is only reversed by an explicit reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineState {
    CatalogBound,
    ManuallyOverridden,
}

/// One selected cost line: a snapshot of a resolved catalog item, or a
/// free-form custom line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectedCostLine {
    pub id: String,
    pub label: String,
    pub unit_note: Option<String>,
    pub price: ResolvedPrice,
    pub formula_hint: Option<String>,
    pub state: LineState,
    /// Custom lines have no catalog backing and never resync.
    pub custom: bool,
}

impl SelectedCostLine {
    fn from_catalog(item: &ResolvedCostItem) -> Self {
        Self {
            id: item.id.clone(),
            label: item.label.clone(),
            unit_note: item.unit_note.clone(),
            price: item.price,
            formula_hint: item.formula_hint.clone(),
            state: LineState::CatalogBound,
            custom: false,
        }
    }
}

/// The additional-costs selection for one quotation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionLedger {
    operation: OperationType,
    lines: Vec<SelectedCostLine>,
}

impl SelectionLedger {
    pub fn new(operation: OperationType) -> Self {
        Self {
            operation,
            lines: Vec::new(),
        }
    }

    pub fn operation(&self) -> OperationType {
        self.operation
    }

    /// Switches the operation type. Selections are not portable across
    /// operations (eligible catalogs differ), so changing it clears them.
    pub fn set_operation(&mut self, operation: OperationType) {
        if operation != self.operation {
            self.operation = operation;
            self.lines.clear();
        }
    }

    pub fn lines(&self) -> &[SelectedCostLine] {
        &self.lines
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.lines.iter().any(|line| line.id == id)
    }

    /// Selects the item if absent, deselects it if present. Selecting takes
    /// a snapshot of the currently resolved values.
    pub fn toggle(&mut self, item: &ResolvedCostItem) {
        if let Some(index) = self.lines.iter().position(|line| line.id == item.id) {
            self.lines.remove(index);
        } else {
            self.lines.push(SelectedCostLine::from_catalog(item));
        }
    }

    pub fn deselect(&mut self, id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != id);
        self.lines.len() != before
    }

    /// Sets the line's price. `None` drops back to the pending/formula
    /// display. Either way the line becomes manually overridden.
    pub fn override_price(&mut self, id: &str, price: Option<f64>) -> bool {
        self.override_field(id, |line| {
            line.price = match price {
                Some(value) => ResolvedPrice::Priced(value),
                None => ResolvedPrice::Pending,
            };
        })
    }

    pub fn override_label(&mut self, id: &str, label: &str) -> bool {
        self.override_field(id, |line| line.label = label.to_string())
    }

    pub fn override_unit_note(&mut self, id: &str, unit_note: Option<&str>) -> bool {
        self.override_field(id, |line| line.unit_note = unit_note.map(str::to_string))
    }

    fn override_field(&mut self, id: &str, apply: impl FnOnce(&mut SelectedCostLine)) -> bool {
        match self.lines.iter_mut().find(|line| line.id == id) {
            Some(line) => {
                apply(line);
                line.state = LineState::ManuallyOverridden;
                true
            }
            None => false,
        }
    }

    /// Explicitly re-binds an overridden line to the catalog, restoring the
    /// currently resolved values. Custom lines have nothing to reset to.
    pub fn reset_to_catalog(&mut self, id: &str, catalog: &[ResolvedCostItem]) -> bool {
        let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.id == id && !line.custom)
        else {
            return false;
        };
        let Some(item) = catalog.iter().find(|item| item.id == id) else {
            return false;
        };
        *line = SelectedCostLine::from_catalog(item);
        true
    }

    /// Re-pulls label, unit note, and price for every catalog-bound line
    /// after customs inputs changed. Overridden and custom lines are left
    /// untouched.
    pub fn resync(&mut self, catalog: &[ResolvedCostItem]) {
        for line in &mut self.lines {
            if line.custom || line.state == LineState::ManuallyOverridden {
                continue;
            }
            if let Some(item) = catalog.iter().find(|item| item.id == line.id) {
                line.label = item.label.clone();
                line.unit_note = item.unit_note.clone();
                line.price = item.price;
                line.formula_hint = item.formula_hint.clone();
            }
        }
    }

    /// Appends a free-form line with a generated id. Custom lines are always
    /// manual and never resync.
    pub fn add_custom_line(&mut self, label: &str, price: f64, unit_note: Option<&str>) -> String {
        let id = format!("custom-{}", Uuid::new_v4());
        self.lines.push(SelectedCostLine {
            id: id.clone(),
            label: label.to_string(),
            unit_note: unit_note.map(str::to_string),
            price: ResolvedPrice::Priced(round_to_cents(price)),
            formula_hint: None,
            state: LineState::ManuallyOverridden,
            custom: true,
        });
        id
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of all priced lines. Pending lines are excluded: their cost is
    /// unknown, not zero.
    pub fn total(&self) -> f64 {
        self.lines
            .iter()
            .filter_map(|line| line.price.value())
            .filter(|value| value.is_finite())
            .sum()
    }

    /// Number of selected lines whose price is still pending. Lets callers
    /// show that the total is partial rather than silently short.
    pub fn pending_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| line.price.is_pending())
            .count()
    }
}
