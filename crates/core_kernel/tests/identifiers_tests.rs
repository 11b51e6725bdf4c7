//! Tests for result identifiers

use core_kernel::{CalculationId, TariffQuoteId};

mod parsing {
    use super::*;

    #[test]
    fn test_parse_with_and_without_prefix() {
        let id = CalculationId::generate();
        let display = id.to_string();
        let bare = display.trim_start_matches("CALC-");

        assert_eq!(display.parse::<CalculationId>().unwrap(), id);
        assert_eq!(bare.parse::<CalculationId>().unwrap(), id);
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!("CALC-not-a-uuid".parse::<CalculationId>().is_err());
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(CalculationId::PREFIX, "CALC");
        assert_eq!(TariffQuoteId::PREFIX, "QUOTE");
    }
}

mod serde_behaviour {
    use super::*;

    #[test]
    fn test_serializes_prefixed() {
        let id = TariffQuoteId::generate();
        let json = serde_json::to_string(&id).unwrap();

        assert_eq!(json, format!("\"{id}\""));
        assert!(json.starts_with("\"QUOTE-"));
    }

    #[test]
    fn test_deserializes_from_prefixed_string() {
        let id = CalculationId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let back: CalculationId = serde_json::from_str(&json).unwrap();

        assert_eq!(back, id);
    }
}
