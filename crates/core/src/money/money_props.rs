//! Property-based tests for money values.
//!
//! - Rendering then parsing returns the same value
//! - Addition is commutative and associative within a currency
//! - Every result is quantized to the currency's minor units

use proptest::prelude::*;
use rust_decimal::Decimal;

use precise_money_shared::Currency;

use super::value::Money;

/// Strategy to pick any known currency.
fn any_currency() -> impl Strategy<Value = Currency> {
    prop::sample::select(Currency::ALL.to_vec())
}

/// Strategy to generate minor-unit counts, negative values included.
fn minor_units() -> impl Strategy<Value = i64> {
    -10_000_000_000i64..10_000_000_000i64
}

/// Strategy to generate money in any currency.
fn any_money() -> impl Strategy<Value = Money> {
    (any_currency(), minor_units()).prop_map(|(currency, units)| Money::from_minor_units(currency, units))
}

/// Strategy to generate three amounts sharing one currency.
fn money_triple() -> impl Strategy<Value = (Money, Money, Money)> {
    (any_currency(), minor_units(), minor_units(), minor_units()).prop_map(|(currency, a, b, c)| {
        (
            Money::from_minor_units(currency, a),
            Money::from_minor_units(currency, b),
            Money::from_minor_units(currency, c),
        )
    })
}

/// Strategy to generate scalar factors (0.0001 to 100.0000).
fn factor() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Renders the amount the way the currency writes it, with grouping.
fn render_grouped(money: &Money) -> Option<String> {
    let info = money.currency().info();
    let thousands = info.thousands_separator()?.as_char();
    let canonical = money.abs().as_string();
    let (integer, fraction) = match canonical.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (canonical.as_str(), None),
    };

    let mut rendered = String::new();
    if money.is_negative() {
        rendered.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            rendered.push(thousands);
        }
        rendered.push(digit);
    }
    if let Some(fraction) = fraction {
        rendered.push(info.decimal_separator().as_char());
        rendered.push_str(fraction);
    }
    Some(rendered)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The canonical string parses back to the same value.
    #[test]
    fn prop_canonical_round_trip(money in any_money()) {
        let parsed = Money::parse(money.currency(), &money.as_string()).unwrap();
        prop_assert_eq!(parsed, money);
    }

    /// The symbol-prefixed string parses back to the same value.
    #[test]
    fn prop_display_string_round_trip(money in any_money()) {
        let parsed = Money::parse(money.currency(), &money.as_display_string()).unwrap();
        prop_assert_eq!(parsed, money);
    }

    /// The locale-grouped rendering parses back to the same value.
    #[test]
    fn prop_grouped_round_trip(money in any_money()) {
        if let Some(rendered) = render_grouped(&money) {
            let parsed = Money::parse(money.currency(), &rendered).unwrap();
            prop_assert_eq!(parsed, money, "rendered as {}", rendered);
        }
    }

    /// a + b == b + a
    #[test]
    fn prop_add_commutative((a, b, _) in money_triple()) {
        prop_assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
    }

    /// (a + b) + c == a + (b + c)
    #[test]
    fn prop_add_associative((a, b, c) in money_triple()) {
        let left = a.add(&b).unwrap().add(&c).unwrap();
        let right = a.add(&b.add(&c).unwrap()).unwrap();
        prop_assert_eq!(left, right);
    }

    /// a - b + b == a
    #[test]
    fn prop_subtract_inverts_add((a, b, _) in money_triple()) {
        prop_assert_eq!(a.subtract(&b).unwrap().add(&b).unwrap(), a);
    }

    /// Scalar results keep exactly the minor-unit scale.
    #[test]
    fn prop_scalar_results_quantized(money in any_money(), factor in factor()) {
        let digits = money.minor_unit_digits();
        prop_assert_eq!(money.multiply_by_scalar(factor).unwrap().amount().scale(), digits);
        prop_assert_eq!(money.divide_by_scalar(factor).unwrap().amount().scale(), digits);
    }

    /// Multiplying by one is the identity.
    #[test]
    fn prop_multiply_by_one_identity(money in any_money()) {
        prop_assert_eq!(money.multiply_by_scalar(Decimal::ONE).unwrap(), money);
    }

    /// Minor units survive construction unchanged.
    #[test]
    fn prop_minor_units_preserved(currency in any_currency(), units in minor_units()) {
        let money = Money::from_minor_units(currency, units);
        prop_assert_eq!(money.minor_units(), i128::from(units));
    }
}
