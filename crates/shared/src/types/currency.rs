//! ISO 4217 currencies and their written-amount conventions.
//!
//! The set of currencies is closed: one table below backs the `Currency`
//! enum, and extending it is a code change. Deployments that see amounts
//! written differently from the nominal convention adjust separators through
//! [`CurrencyRegistry::with_overrides`](super::CurrencyRegistry::with_overrides).

use serde::{Deserialize, Serialize};

use crate::error::MoneyError;

/// Glyph separating digits in a written amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    /// `.`
    Dot,
    /// `,`
    Comma,
}

impl Separator {
    /// Returns the glyph.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Dot => '.',
            Self::Comma => ',',
        }
    }

    /// Recognizes a separator glyph.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::Dot),
            ',' => Some(Self::Comma),
            _ => None,
        }
    }

    /// Returns the other glyph.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Dot => Self::Comma,
            Self::Comma => Self::Dot,
        }
    }
}

/// Decimal and grouping glyphs a currency is nominally written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeparatorConvention {
    /// Glyph marking the fractional boundary.
    pub decimal: Separator,
    /// Glyph grouping thousands, if the currency groups at all.
    pub thousands: Option<Separator>,
}

impl SeparatorConvention {
    /// `1,234.56`
    pub const DOT_DECIMAL: Self = Self {
        decimal: Separator::Dot,
        thousands: Some(Separator::Comma),
    };

    /// `1.234,56`
    pub const COMMA_DECIMAL: Self = Self {
        decimal: Separator::Comma,
        thousands: Some(Separator::Dot),
    };

    /// `1234.56`
    pub const UNGROUPED: Self = Self {
        decimal: Separator::Dot,
        thousands: None,
    };

    /// Returns true if the decimal and grouping glyphs differ.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.thousands != Some(self.decimal)
    }
}

/// Generates the `Currency` enum and its metadata accessors from one table.
macro_rules! currency_table {
    ($( $variant:ident => ($code:literal, $symbol:literal, $digits:literal, $convention:ident) ),* $(,)?) => {
        /// ISO 4217 currency codes supported by the system.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum Currency {
            $(
                #[doc = $code]
                #[serde(rename = $code)]
                $variant,
            )*
        }

        impl Currency {
            /// Every currency in the table, in table order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Returns the ISO code.
            #[must_use]
            pub const fn code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)*
                }
            }

            /// Returns the display symbol.
            #[must_use]
            pub const fn symbol(self) -> &'static str {
                match self {
                    $(Self::$variant => $symbol,)*
                }
            }

            /// Returns the number of digits after the decimal point in canonical form.
            #[must_use]
            pub const fn minor_unit_digits(self) -> u32 {
                match self {
                    $(Self::$variant => $digits,)*
                }
            }

            /// Returns the nominal separator convention.
            #[must_use]
            pub const fn convention(self) -> SeparatorConvention {
                match self {
                    $(Self::$variant => SeparatorConvention::$convention,)*
                }
            }

            /// Matches an exact upper-case ISO code.
            #[must_use]
            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

currency_table! {
    Usd => ("USD", "$", 2, DOT_DECIMAL),
    Cad => ("CAD", "$", 2, DOT_DECIMAL),
    Btc => ("BTC", "₿", 8, DOT_DECIMAL),
    Mxn => ("MXN", "$", 2, DOT_DECIMAL),
    Eur => ("EUR", "€", 2, COMMA_DECIMAL),
    Inr => ("INR", "₹", 0, DOT_DECIMAL),
    Clf => ("CLF", "CLF", 4, DOT_DECIMAL),
    Gbp => ("GBP", "£", 2, DOT_DECIMAL),
    Jpy => ("JPY", "¥", 0, UNGROUPED),
    Cny => ("CNY", "¥", 2, DOT_DECIMAL),
    Aud => ("AUD", "$", 2, DOT_DECIMAL),
    Sgd => ("SGD", "$", 2, DOT_DECIMAL),
    Hkd => ("HKD", "$", 2, DOT_DECIMAL),
    Nzd => ("NZD", "$", 2, DOT_DECIMAL),
    Chf => ("CHF", "₣", 2, DOT_DECIMAL),
    Zar => ("ZAR", "R", 2, DOT_DECIMAL),
    // Listed with comma grouping: API feeds quote BRL as `500,150` for 500150.
    Brl => ("BRL", "R$", 2, DOT_DECIMAL),
    Rub => ("RUB", "₽", 2, COMMA_DECIMAL),
    Try => ("TRY", "₺", 2, COMMA_DECIMAL),
    Thb => ("THB", "฿", 2, DOT_DECIMAL),
    Krw => ("KRW", "₩", 0, UNGROUPED),
    Vnd => ("VND", "₫", 0, COMMA_DECIMAL),
    Php => ("PHP", "₱", 2, DOT_DECIMAL),
    Idr => ("IDR", "Rp", 0, COMMA_DECIMAL),
    Myr => ("MYR", "RM", 2, DOT_DECIMAL),
    Bdt => ("BDT", "৳", 0, DOT_DECIMAL),
    Ngn => ("NGN", "₦", 2, DOT_DECIMAL),
    Zmw => ("ZMW", "ZK", 2, DOT_DECIMAL),
    Xaf => ("XAF", "FCFA", 0, COMMA_DECIMAL),
    Xof => ("XOF", "CFA", 0, COMMA_DECIMAL),
    Xcd => ("XCD", "$", 2, DOT_DECIMAL),
    Xdr => ("XDR", "SDR", 2, DOT_DECIMAL),
    Xag => ("XAG", "XAG", 2, DOT_DECIMAL),
    Xau => ("XAU", "XAU", 2, DOT_DECIMAL),
    Xpd => ("XPD", "XPD", 2, DOT_DECIMAL),
    Xpt => ("XPT", "XPT", 2, DOT_DECIMAL),
    Xts => ("XTS", "XTS", 2, DOT_DECIMAL),
    Xxx => ("XXX", "XXX", 2, DOT_DECIMAL),
    Xbb => ("XBB", "XBB", 2, DOT_DECIMAL),
    Xbc => ("XBC", "XBC", 2, DOT_DECIMAL),
    Xbd => ("XBD", "XBD", 2, DOT_DECIMAL),
}

impl Currency {
    /// Returns the built-in decimal separator.
    #[must_use]
    pub const fn decimal_separator(self) -> Separator {
        self.convention().decimal
    }

    /// Returns the built-in thousands separator, if the currency groups digits.
    #[must_use]
    pub const fn thousands_separator(self) -> Option<Separator> {
        self.convention().thousands
    }

    /// Returns the built-in metadata of this currency.
    #[must_use]
    pub fn info(self) -> CurrencyInfo {
        CurrencyInfo {
            currency: self,
            convention: self.convention(),
            extra_symbols: Vec::new(),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(&s.trim().to_uppercase())
            .ok_or_else(|| MoneyError::UnknownCurrency(s.to_string()))
    }
}

/// Resolved metadata the amount parser works from.
///
/// Built-in values come from [`Currency::info`]; a registry with overrides
/// may swap the separator convention and accept additional symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyInfo {
    /// The currency described.
    pub currency: Currency,
    /// Separator convention in effect.
    pub convention: SeparatorConvention,
    /// Symbols accepted when stripping, besides the code and built-in symbol.
    pub extra_symbols: Vec<String>,
}

impl CurrencyInfo {
    /// Returns the ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.currency.code()
    }

    /// Returns the display symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        self.currency.symbol()
    }

    /// Returns the number of minor-unit digits.
    #[must_use]
    pub const fn minor_unit_digits(&self) -> u32 {
        self.currency.minor_unit_digits()
    }

    /// Returns the decimal separator in effect.
    #[must_use]
    pub const fn decimal_separator(&self) -> Separator {
        self.convention.decimal
    }

    /// Returns the thousands separator in effect.
    #[must_use]
    pub const fn thousands_separator(&self) -> Option<Separator> {
        self.convention.thousands
    }

    /// Returns every token that may prefix or suffix an amount of this
    /// currency, longest first so `R$` is tried before `$`-like prefixes.
    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.extra_symbols.iter().map(String::as_str).collect();
        symbols.push(self.symbol());
        symbols.push(self.code());
        symbols.sort_by_key(|s| std::cmp::Reverse(s.chars().count()));
        symbols.dedup();
        symbols
    }
}

impl From<Currency> for CurrencyInfo {
    fn from(currency: Currency) -> Self {
        currency.info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case(Currency::Usd, "USD", "$", 2)]
    #[case(Currency::Eur, "EUR", "€", 2)]
    #[case(Currency::Jpy, "JPY", "¥", 0)]
    #[case(Currency::Btc, "BTC", "₿", 8)]
    #[case(Currency::Clf, "CLF", "CLF", 4)]
    #[case(Currency::Brl, "BRL", "R$", 2)]
    fn test_currency_metadata(
        #[case] currency: Currency,
        #[case] code: &str,
        #[case] symbol: &str,
        #[case] digits: u32,
    ) {
        assert_eq!(currency.code(), code);
        assert_eq!(currency.symbol(), symbol);
        assert_eq!(currency.minor_unit_digits(), digits);
        assert_eq!(currency.to_string(), code);
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!(Currency::from_str("USD").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_str("usd").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_str(" jpy ").unwrap(), Currency::Jpy);

        assert_eq!(
            Currency::from_str("ABC"),
            Err(MoneyError::UnknownCurrency("ABC".into()))
        );
        assert!(Currency::from_str("").is_err());
    }

    #[test]
    fn test_table_conventions_are_consistent() {
        for currency in Currency::ALL {
            assert!(
                currency.convention().is_consistent(),
                "{currency} shares a glyph between decimal and grouping"
            );
            assert_eq!(Currency::from_code(currency.code()), Some(*currency));
        }
    }

    #[test]
    fn test_conventions() {
        assert_eq!(Currency::Usd.convention(), SeparatorConvention::DOT_DECIMAL);
        assert_eq!(Currency::Eur.convention(), SeparatorConvention::COMMA_DECIMAL);
        assert_eq!(Currency::Jpy.info().thousands_separator(), None);
        assert_eq!(Currency::Brl.info().thousands_separator(), Some(Separator::Comma));
    }

    #[test]
    fn test_symbols_longest_first() {
        let info = CurrencyInfo {
            extra_symbols: vec!["US$".into()],
            ..Currency::Usd.info()
        };
        assert_eq!(info.symbols(), vec!["US$", "USD", "$"]);
    }

    #[test]
    fn test_separator_accessors() {
        assert_eq!(Currency::Usd.decimal_separator(), Separator::Dot);
        assert_eq!(Currency::Usd.thousands_separator(), Some(Separator::Comma));
        assert_eq!(Currency::Eur.decimal_separator(), Separator::Comma);
        assert_eq!(Currency::Jpy.thousands_separator(), None);
    }

    #[test]
    fn test_currency_serde() {
        assert_eq!(serde_json::to_string(&Currency::Eur).unwrap(), "\"EUR\"");
        let currency: Currency = serde_json::from_str("\"JPY\"").unwrap();
        assert_eq!(currency, Currency::Jpy);
    }

    #[test]
    fn test_separator_glyphs() {
        assert_eq!(Separator::from_char('.'), Some(Separator::Dot));
        assert_eq!(Separator::from_char(','), Some(Separator::Comma));
        assert_eq!(Separator::from_char('\''), None);
        assert_eq!(Separator::Dot.other(), Separator::Comma);
        assert_eq!(Separator::Comma.as_char(), ',');
    }
}
