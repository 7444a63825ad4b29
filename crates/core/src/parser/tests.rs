//! Disambiguation table tests for the amount parser.

use std::collections::HashMap;

use precise_money_shared::{Currency, CurrencyOverride, CurrencyRegistry, ParseError, Separator};
use rstest::rstest;
use rust_decimal_macros::dec;

use super::parse;

fn parse_as(raw: &str, currency: Currency) -> Result<String, ParseError> {
    parse(raw, &currency.info()).map(|value| value.to_string())
}

#[rstest]
// No separator
#[case("500", Currency::Usd, "500.00")]
#[case("1500", Currency::Jpy, "1500")]
#[case("7", Currency::Btc, "7.00000000")]
// Lone separator followed by the minor-unit run is always decimal
#[case("500,00", Currency::Eur, "500.00")]
#[case("500.00", Currency::Eur, "500.00")]
#[case("500,00", Currency::Usd, "500.00")]
#[case("12,3456", Currency::Clf, "12.3456")]
#[case("0.00000001", Currency::Btc, "0.00000001")]
// Lone separator declared decimal by the currency
#[case("12.5", Currency::Usd, "12.50")]
#[case("12,5", Currency::Eur, "12.50")]
#[case("1.234", Currency::Btc, "1.23400000")]
// Grouping only
#[case("500,150", Currency::Brl, "500150.00")]
#[case("1,234", Currency::Usd, "1234.00")]
#[case("1,234,567", Currency::Usd, "1234567.00")]
#[case("1.500", Currency::Eur, "1500.00")]
#[case("1.234.567", Currency::Eur, "1234567.00")]
#[case("1500", Currency::Krw, "1500")]
#[case("1.500.000", Currency::Idr, "1500000")]
// Both separators: rightmost wins
#[case("500.150,00", Currency::Brl, "500150.00")]
#[case("1,234,567.89", Currency::Usd, "1234567.89")]
#[case("1.234.567,89", Currency::Usd, "1234567.89")]
#[case("1.234,5", Currency::Eur, "1234.50")]
// Signs and symbols
#[case("-1,234.56", Currency::Usd, "-1234.56")]
#[case("$ 1,234.56", Currency::Usd, "1234.56")]
#[case("1.234,56 €", Currency::Eur, "1234.56")]
#[case("-R$ 500.150,00", Currency::Brl, "-500150.00")]
#[case("¥1500", Currency::Jpy, "1500")]
#[case("1500 jpy", Currency::Jpy, "1500")]
#[case("-0.00", Currency::Usd, "0.00")]
#[case("007.50", Currency::Usd, "7.50")]
fn test_parse_resolves(#[case] raw: &str, #[case] currency: Currency, #[case] expected: &str) {
    assert_eq!(parse_as(raw, currency).unwrap(), expected);
}

#[rstest]
#[case("500.123", Currency::Usd, "EXCESS_PRECISION")]
#[case("500,123", Currency::Eur, "EXCESS_PRECISION")]
#[case("1.500", Currency::Jpy, "EXCESS_PRECISION")]
#[case("1,500.00", Currency::Jpy, "INCONSISTENT_GROUPING")]
#[case("1,500", Currency::Jpy, "INCONSISTENT_GROUPING")]
#[case("1.500,5", Currency::Krw, "INCONSISTENT_GROUPING")]
#[case("¥1,500,000", Currency::Jpy, "INCONSISTENT_GROUPING")]
#[case("1,234,567", Currency::Eur, "AMBIGUOUS_SEPARATORS")]
#[case("1.234,567.89", Currency::Usd, "AMBIGUOUS_SEPARATORS")]
#[case("50.0,00", Currency::Eur, "INCONSISTENT_GROUPING")]
#[case("1,2345.00", Currency::Usd, "INCONSISTENT_GROUPING")]
#[case("12.5", Currency::Eur, "INCONSISTENT_GROUPING")]
#[case("1,5", Currency::Usd, "INCONSISTENT_GROUPING")]
#[case("1234,567", Currency::Usd, "INCONSISTENT_GROUPING")]
#[case("€500", Currency::Usd, "UNRECOGNIZED_SYMBOL")]
#[case("fifty dollars", Currency::Usd, "UNRECOGNIZED_SYMBOL")]
#[case("(5.00)", Currency::Usd, "UNRECOGNIZED_SYMBOL")]
#[case("", Currency::Usd, "MALFORMED_NUMBER")]
#[case("   ", Currency::Usd, "MALFORMED_NUMBER")]
#[case("$", Currency::Usd, "MALFORMED_NUMBER")]
#[case("-", Currency::Usd, "MALFORMED_NUMBER")]
#[case(".50", Currency::Usd, "MALFORMED_NUMBER")]
#[case("50.", Currency::Usd, "MALFORMED_NUMBER")]
#[case("5..00", Currency::Usd, "MALFORMED_NUMBER")]
#[case("5.,00", Currency::Usd, "MALFORMED_NUMBER")]
#[case("1 000", Currency::Usd, "MALFORMED_NUMBER")]
#[case("123456789012345678901234567890", Currency::Usd, "MALFORMED_NUMBER")]
fn test_parse_rejects(#[case] raw: &str, #[case] currency: Currency, #[case] kind: &str) {
    let err = parse_as(raw, currency).unwrap_err();
    assert_eq!(err.kind(), kind, "{raw:?} under {currency}: {err}");
}

#[test]
fn test_excess_precision_is_not_truncated() {
    assert_eq!(
        parse("500.123", &Currency::Usd.info()).unwrap_err(),
        ParseError::ExcessPrecision {
            input: "500.123".into(),
            found: 3,
            allowed: 2,
        }
    );
}

#[test]
fn test_ambiguous_reports_glyph() {
    let err = parse("1,234,567", &Currency::Eur.info()).unwrap_err();
    assert_eq!(
        err,
        ParseError::AmbiguousSeparators {
            input: "1,234,567".into(),
            glyph: ',',
        }
    );
}

#[test]
fn test_scale_matches_minor_units() {
    for currency in Currency::ALL {
        let value = parse("1", &currency.info()).unwrap();
        assert_eq!(value.scale(), currency.minor_unit_digits(), "{currency}");
    }
}

#[test]
fn test_exact_value() {
    let value = parse("1.234,56", &Currency::Eur.info()).unwrap();
    assert_eq!(value, dec!(1234.56));
}

#[test]
fn test_override_changes_convention() {
    let mut overrides = HashMap::new();
    overrides.insert(
        "USD",
        CurrencyOverride {
            decimal_separator: Some(Separator::Comma),
            symbols: vec!["US$".into()],
            ..CurrencyOverride::default()
        },
    );
    let registry = CurrencyRegistry::with_overrides(&overrides).unwrap();
    let usd = registry.lookup("USD").unwrap();

    assert_eq!(parse("12,5", usd).unwrap(), dec!(12.50));
    assert_eq!(parse("US$ 1.234,5", usd).unwrap(), dec!(1234.50));
    // Dot now groups, so a lone dot with a short run is irregular grouping.
    assert_eq!(
        parse("12.5", usd).unwrap_err().kind(),
        "INCONSISTENT_GROUPING"
    );
    // The minor-unit rule still wins over the override.
    assert_eq!(parse("12.50", usd).unwrap(), dec!(12.50));
}

#[test]
fn test_ungrouped_override_rejects_grouping() {
    let mut overrides = HashMap::new();
    overrides.insert(
        "USD",
        CurrencyOverride {
            ungrouped: true,
            ..CurrencyOverride::default()
        },
    );
    let registry = CurrencyRegistry::with_overrides(&overrides).unwrap();
    let usd = registry.lookup("USD").unwrap();

    for raw in ["1,500", "1,234,567", "1,234.56"] {
        assert_eq!(
            parse(raw, usd).unwrap_err(),
            ParseError::InconsistentGrouping { input: raw.into() },
            "{raw:?}"
        );
    }
    // A lone separator before the minor-unit run is still a decimal point.
    assert_eq!(parse("1,50", usd).unwrap(), dec!(1.50));
    assert_eq!(parse("12.5", usd).unwrap(), dec!(12.50));
    assert_eq!(parse("1500", usd).unwrap(), dec!(1500.00));

    // The built-in convention still groups.
    assert_eq!(parse("1,500", &Currency::Usd.info()).unwrap(), dec!(1500.00));
}
