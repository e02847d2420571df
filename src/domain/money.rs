//! Currency helpers shared across the engine.

/// Rounds to two decimal places (cents).
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds up to the next multiple of five dollars. Quoted transport values
/// are always presented in 5 USD steps.
pub fn round_up_to_five(value: f64) -> f64 {
    (value / 5.0).ceil() * 5.0
}

/// Formats an amount the way quotations print it: `$ 12.00`.
pub fn format_usd(value: f64) -> String {
    format!("$ {:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_up_to_five() {
        assert_eq!(round_up_to_five(97.0), 100.0);
        assert_eq!(round_up_to_five(125.0), 125.0);
        assert_eq!(round_up_to_five(125.01), 130.0);
        assert_eq!(round_up_to_five(0.0), 0.0);
    }

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round_to_cents(65.004), 65.0);
        assert_eq!(round_to_cents(3.545), 3.55);
    }

    #[test]
    fn formats_usd() {
        assert_eq!(format_usd(10.0), "$ 10.00");
        assert_eq!(format_usd(35.66), "$ 35.66");
    }
}
