//! Quote a volume from the command line.

use deposit_core::PricingEngine;

/// Render the quote line for a volume.
pub fn format_quote(engine: &PricingEngine, volume: f64) -> String {
    let quote = engine.quote(volume);
    format!("{volume} m³ -> {} ({})", quote.price, quote.box_size)
}

/// Print the reference quote for a volume.
pub fn print_quote(volume: f64) {
    #[allow(clippy::print_stdout)]
    {
        println!("{}", format_quote(&PricingEngine::default(), volume));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_quote() {
        let engine = PricingEngine::default();
        assert_eq!(format_quote(&engine, 2.0), "2 m³ -> $17000 ARS (large box)");
        assert_eq!(format_quote(&engine, 0.0), "0 m³ -> $0 ARS (small box)");
    }
}
