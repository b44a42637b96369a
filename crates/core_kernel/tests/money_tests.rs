//! Unit tests for the Money module
//!
//! Tests cover parsing of user-entered amounts, currency handling,
//! display formatting, and summation used by dashboard summaries.

use core_kernel::{Money, Currency, MoneyError};
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_rounds_to_four_decimal_places() {
        let m = Money::new(dec!(100.123456789), Currency::USD);
        assert_eq!(m.amount(), dec!(100.1235));
    }

    #[test]
    fn test_zero_creates_zero_amount() {
        let m = Money::zero(Currency::EUR);
        assert!(m.is_zero());
        assert_eq!(m.currency(), Currency::EUR);
    }
}

mod parsing {
    use super::*;

    #[test]
    fn test_parse_plain_amount() {
        let m = Money::parse("250", Currency::USD).unwrap();
        assert_eq!(m.amount(), dec!(250));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let m = Money::parse("  99.95 ", Currency::AUD).unwrap();
        assert_eq!(m.amount(), dec!(99.95));
        assert_eq!(m.currency(), Currency::AUD);
    }

    #[test]
    fn test_parse_rejects_text() {
        let err = Money::parse("two hundred", Currency::USD).unwrap_err();
        assert_eq!(err, MoneyError::InvalidAmount("two hundred".to_string()));
    }

    #[test]
    fn test_parse_rejects_negative_amount() {
        assert!(Money::parse("-10.00", Currency::USD).is_err());
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_checked_add_same_currency() {
        let a = Money::new(dec!(100.00), Currency::USD);
        let b = Money::new(dec!(50.25), Currency::USD);
        assert_eq!(a.checked_add(&b).unwrap().amount(), dec!(150.25));
    }

    #[test]
    fn test_checked_add_currency_mismatch() {
        let a = Money::new(dec!(100.00), Currency::USD);
        let b = Money::new(dec!(100.00), Currency::GBP);
        let err = a.checked_add(&b).unwrap_err();
        assert_eq!(err.to_string(), "Currency mismatch: cannot operate on USD and GBP");
    }
}

mod currency {
    use super::*;

    #[test]
    fn test_currency_from_str_case_insensitive() {
        assert_eq!("aud".parse::<Currency>().unwrap(), Currency::AUD);
        assert_eq!(" usd ".parse::<Currency>().unwrap(), Currency::USD);
    }

    #[test]
    fn test_unknown_currency() {
        let err = "XYZ".parse::<Currency>().unwrap_err();
        assert!(matches!(err, MoneyError::UnknownCurrency(code) if code == "XYZ"));
    }

    #[test]
    fn test_currency_serializes_uppercase() {
        let json = serde_json::to_string(&Currency::EUR).unwrap();
        assert_eq!(json, "\"EUR\"");
    }
}

mod display {
    use super::*;

    #[test]
    fn test_money_display_pads_to_two_places() {
        assert_eq!(Money::new(dec!(250), Currency::USD).to_string(), "$250.00");
        assert_eq!(Money::new(dec!(12.5), Currency::GBP).to_string(), "£12.50");
    }

    #[test]
    fn test_money_display_aud_symbol() {
        assert_eq!(Money::new(dec!(1), Currency::AUD).to_string(), "A$1.00");
    }
}
