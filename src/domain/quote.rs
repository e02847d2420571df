//! Renderer-facing quotation payload.
//!
//! The document renderer (print/PDF layout) lives outside the engine; this
//! module assembles everything it consumes: client fields, transport value,
//! the ordered additional-cost lines as display text, and the narrative
//! figures of the trip summary.

use time::OffsetDateTime;

use super::catalog::OperationType;
use super::ledger::SelectedCostLine;
use super::money::format_usd;
use super::trip::FuelMode;

/// One quotation as handed to the document renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct QuoteDocument {
    pub city: String,
    pub client: String,
    pub route_name: String,
    pub product: String,
    pub cargo_unit: String,
    pub origin: String,
    pub destination: String,
    pub operation: OperationType,
    /// Final transport value shown to the client.
    pub transport_value_usd: f64,
    pub lines: Vec<SelectedCostLine>,
    pub observations: String,
    pub payment_terms: String,
    pub issued_at: OffsetDateTime,
}

impl QuoteDocument {
    /// The quoted transport value: a manual override wins over the computed
    /// PVP when present.
    pub fn displayed_price(manual_pvp: Option<f64>, computed_pvp: f64) -> f64 {
        manual_pvp.unwrap_or(computed_pvp)
    }

    /// `dd/mm/yyyy hh:mm` stamp for the document header.
    pub fn issued_stamp(&self) -> String {
        format!(
            "{:02}/{:02}/{} {:02}:{:02}",
            self.issued_at.day(),
            self.issued_at.month() as u8,
            self.issued_at.year(),
            self.issued_at.hour(),
            self.issued_at.minute()
        )
    }

    /// Renders the additional-cost lines as the document prints them.
    pub fn additional_cost_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line_text(line, self.operation))
            .collect()
    }
}

/// One cost line as display text. Transit prints the unit note after the
/// amount; import/export print it after the label. Pending lines print the
/// formula text instead of a price.
pub fn line_text(line: &SelectedCostLine, operation: OperationType) -> String {
    match line.price.value() {
        Some(value) => {
            let amount = format_usd(value);
            match operation {
                OperationType::Transit => match &line.unit_note {
                    Some(note) => format!("{}: {} ({})", line.label, amount, note),
                    None => format!("{}: {}", line.label, amount),
                },
                _ => match &line.unit_note {
                    Some(note) => format!("{} ({}): {}", line.label, note, amount),
                    None => format!("{}: {}", line.label, amount),
                },
            }
        }
        None => {
            let hint = line
                .formula_hint
                .as_deref()
                .or(line.unit_note.as_deref())
                .unwrap_or("—");
            format!("{}: {}", line.label, hint)
        }
    }
}

/// Narrative summary figures shown below the breakdown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TripNarrative {
    pub km_ec: f64,
    pub km_pe: f64,
    pub cost_per_ton: f64,
    pub pvp_per_ton: f64,
}

/// Builds the narrative figures. The country split here is informational:
/// mixed mode reports the explicit split, standard mode estimates coverage
/// with the conventional 8 km/gal figure regardless of the configured
/// efficiency. The authoritative split lives in the cost calculator only.
pub fn trip_narrative(
    fuel: &FuelMode,
    tank_gal: f64,
    distance_km: f64,
    tons: f64,
    base_cost: f64,
    pvp: f64,
) -> TripNarrative {
    let (km_ec, km_pe) = match fuel {
        FuelMode::Mixed { km_ec, km_pe } => (km_ec.max(0.0), km_pe.max(0.0)),
        FuelMode::Standard => {
            let reach_km = tank_gal * 8.0;
            (distance_km.min(reach_km), (distance_km - reach_km).max(0.0))
        }
    };
    let (cost_per_ton, pvp_per_ton) = if tons > 0.0 {
        (base_cost / tons, pvp / tons)
    } else {
        (0.0, 0.0)
    };
    TripNarrative {
        km_ec,
        km_pe,
        cost_per_ton,
        pvp_per_ton,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ResolvedPrice;
    use crate::domain::ledger::LineState;

    fn line(label: &str, price: ResolvedPrice, unit_note: Option<&str>, hint: Option<&str>) -> SelectedCostLine {
        SelectedCostLine {
            id: label.to_lowercase(),
            label: label.to_string(),
            unit_note: unit_note.map(str::to_string),
            price,
            formula_hint: hint.map(str::to_string),
            state: LineState::CatalogBound,
            custom: false,
        }
    }

    #[test]
    fn manual_pvp_wins_over_computed() {
        assert_eq!(QuoteDocument::displayed_price(Some(980.0), 1025.0), 980.0);
        assert_eq!(QuoteDocument::displayed_price(None, 1025.0), 1025.0);
    }

    #[test]
    fn transit_prints_unit_note_after_the_amount() {
        let standby = line(
            "Stand by",
            ResolvedPrice::Priced(240.0),
            Some("x día x contenedor"),
            None,
        );
        assert_eq!(
            line_text(&standby, OperationType::Transit),
            "Stand by: $ 240.00 (x día x contenedor)"
        );
        assert_eq!(
            line_text(&standby, OperationType::Export),
            "Stand by (x día x contenedor): $ 240.00"
        );
    }

    #[test]
    fn pending_lines_print_the_formula() {
        let insurance = line(
            "Seguro de la carga",
            ResolvedPrice::Pending,
            Some("0,30% FOB (Mínimo $65,00)"),
            Some("0,30% FOB (Mínimo $65,00)"),
        );
        assert_eq!(
            line_text(&insurance, OperationType::Import),
            "Seguro de la carga: 0,30% FOB (Mínimo $65,00)"
        );
    }

    #[test]
    fn narrative_standard_split_uses_the_conventional_reach() {
        // 200 gal × 8 km/gal = 1600 km of estimated Ecuador reach.
        let narrative = trip_narrative(&FuelMode::Standard, 200.0, 2000.0, 0.0, 0.0, 0.0);
        assert_eq!(narrative.km_ec, 1600.0);
        assert_eq!(narrative.km_pe, 400.0);
    }

    #[test]
    fn narrative_mixed_split_reports_the_explicit_distances() {
        let fuel = FuelMode::Mixed {
            km_ec: 600.0,
            km_pe: 1500.0,
        };
        let narrative = trip_narrative(&fuel, 200.0, 2100.0, 28.0, 2800.0, 4200.0);
        assert_eq!(narrative.km_ec, 600.0);
        assert_eq!(narrative.km_pe, 1500.0);
        assert_eq!(narrative.cost_per_ton, 100.0);
        assert_eq!(narrative.pvp_per_ton, 150.0);
    }

    #[test]
    fn per_ton_figures_guard_against_zero_load() {
        let narrative = trip_narrative(&FuelMode::Standard, 200.0, 100.0, 0.0, 500.0, 750.0);
        assert_eq!(narrative.cost_per_ton, 0.0);
        assert_eq!(narrative.pvp_per_ton, 0.0);
    }

    #[test]
    fn issued_stamp_is_zero_padded() {
        // 2023-11-14 22:13:20 UTC
        let issued_at = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let doc = QuoteDocument {
            city: "Machala".to_string(),
            client: String::new(),
            route_name: String::new(),
            product: String::new(),
            cargo_unit: String::new(),
            origin: String::new(),
            destination: String::new(),
            operation: OperationType::Transit,
            transport_value_usd: 0.0,
            lines: Vec::new(),
            observations: String::new(),
            payment_terms: String::new(),
            issued_at,
        };
        assert_eq!(doc.issued_stamp(), "14/11/2023 22:13");
    }
}
