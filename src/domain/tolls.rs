//! Toll-station guide for the Ecuador–Peru corridor.
//!
//! Toll detection along a route happens in an external collaborator; this
//! module only carries the reference catalog (round-trip USD per station)
//! and accepts a user-supplied JSON replacement. Invalid replacement data is
//! rejected with a descriptive error and the previous catalog stays in
//! effect.

use serde::{Deserialize, Serialize};

/// One toll station with its round-trip cost in USD.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TollStation {
    pub seq: u32,
    pub name: String,
    pub usd: f64,
}

fn station(seq: u32, name: &str, usd: f64) -> TollStation {
    TollStation {
        seq,
        name: name.to_string(),
        usd,
    }
}

/// The published corridor guide: Ecuadorian stations at the flat 12 USD
/// heavy-vehicle rate, Peruvian stations at their individual schedules.
pub fn default_stations() -> Vec<TollStation> {
    vec![
        station(1, "PINTAG", 12.00),
        station(2, "CADENA", 12.00),
        station(3, "CHIVERIA/SALITRE", 12.00),
        station(4, "PROGRESO", 12.00),
        station(5, "CHONGON", 12.00),
        station(6, "PANCALEO", 12.00),
        station(7, "SAN ANDRES", 12.00),
        station(8, "MACHACHI", 12.00),
        station(9, "GOB PROVINCIAL DE LOS TSACHILAS", 12.00),
        station(10, "LOS ANGELES", 12.00),
        station(11, "CONGOMA", 12.00),
        station(12, "PAN", 12.00),
        station(13, "NARANJAL", 12.00),
        station(14, "MILAGRO", 12.00),
        station(15, "BOLICHE", 12.00),
        station(16, "LA AVANZADA", 12.00),
        station(17, "GARRIDO", 12.00),
        station(18, "JAIME ROLDOS", 12.00),
        station(19, "SERPENTIN", 35.66),
        station(20, "PARAISO (HUACHO)", 35.66),
        station(21, "FORTALEZA", 36.92),
        station(22, "HUARMEY", 36.28),
        station(23, "CASMA (ANCASH)", 37.60),
        station(24, "SANTA", 30.04),
        station(25, "VIRU", 37.60),
        station(26, "CHICAMA", 36.22),
        station(27, "PACANGUILLA", 35.82),
        station(28, "MORROPE", 28.94),
        station(29, "BAYOVAR", 27.51),
        station(30, "SULLANA", 36.06),
        station(31, "TALARA", 11.14),
        station(32, "CANCAS", 11.14),
        station(33, "MONTERRICO", 22.62),
        station(34, "JAHUAY", 66.52),
        station(35, "TAMBOGRANDE", 18.03),
        station(36, "DURAN/TAMBO", 12.00),
    ]
}

/// Validation failures for a user-supplied toll catalog.
#[derive(Debug, thiserror::Error)]
pub enum TollCatalogError {
    #[error("invalid toll catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("toll catalog must contain at least one station")]
    Empty,
    #[error("toll station entry {index} has an empty name")]
    EmptyName { index: usize },
    #[error("toll station {name:?} has an invalid cost: {usd}")]
    InvalidCost { name: String, usd: f64 },
}

/// The toll guide currently in effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TollGuide {
    stations: Vec<TollStation>,
}

impl Default for TollGuide {
    fn default() -> Self {
        Self {
            stations: default_stations(),
        }
    }
}

impl TollGuide {
    pub fn stations(&self) -> &[TollStation] {
        &self.stations
    }

    /// Sum of the whole guide, as shown in the toll reference listing.
    pub fn total(&self) -> f64 {
        self.stations.iter().map(|station| station.usd).sum()
    }

    /// Replaces the catalog from a user-supplied JSON array of stations.
    /// On any validation failure the current catalog remains in effect.
    pub fn replace_from_json(&mut self, json: &str) -> Result<(), TollCatalogError> {
        let stations: Vec<TollStation> = serde_json::from_str(json)?;
        validate(&stations)?;
        self.stations = stations;
        Ok(())
    }
}

fn validate(stations: &[TollStation]) -> Result<(), TollCatalogError> {
    if stations.is_empty() {
        return Err(TollCatalogError::Empty);
    }
    for (index, station) in stations.iter().enumerate() {
        if station.name.trim().is_empty() {
            return Err(TollCatalogError::EmptyName { index });
        }
        if !station.usd.is_finite() || station.usd < 0.0 {
            return Err(TollCatalogError::InvalidCost {
                name: station.name.clone(),
                usd: station.usd,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_guide_has_the_full_corridor() {
        let guide = TollGuide::default();
        assert_eq!(guide.stations().len(), 36);
        assert!(guide.total() > 0.0);
        // Spot-check one station per country.
        assert!(guide.stations().iter().any(|s| s.name == "MACHACHI" && s.usd == 12.0));
        assert!(guide.stations().iter().any(|s| s.name == "JAHUAY" && s.usd == 66.52));
    }

    #[test]
    fn accepts_a_valid_replacement() {
        let mut guide = TollGuide::default();
        let json = r#"[{"seq":1,"name":"PRUEBA","usd":5.5}]"#;
        guide.replace_from_json(json).unwrap();
        assert_eq!(guide.stations().len(), 1);
        assert_eq!(guide.total(), 5.5);
    }

    #[test]
    fn malformed_json_keeps_the_previous_catalog() {
        let mut guide = TollGuide::default();
        let err = guide.replace_from_json("{not json").unwrap_err();
        assert!(matches!(err, TollCatalogError::Parse(_)));
        assert_eq!(guide.stations().len(), 36);
    }

    #[test]
    fn negative_cost_is_rejected_with_the_station_name() {
        let mut guide = TollGuide::default();
        let json = r#"[{"seq":1,"name":"PRUEBA","usd":-3.0}]"#;
        let err = guide.replace_from_json(json).unwrap_err();
        assert!(matches!(err, TollCatalogError::InvalidCost { .. }));
        assert!(err.to_string().contains("PRUEBA"));
        assert_eq!(guide.stations().len(), 36);
    }

    #[test]
    fn empty_list_is_rejected() {
        let mut guide = TollGuide::default();
        assert!(matches!(
            guide.replace_from_json("[]"),
            Err(TollCatalogError::Empty)
        ));
    }
}
