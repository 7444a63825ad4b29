//! Currency registry.
//!
//! The global registry is built from the currency table on first use and is
//! never mutated afterwards, so any number of threads may read it without
//! locking. Callers that need different separator conventions build their own
//! registry with [`CurrencyRegistry::with_overrides`].

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Deserialize;
use tracing::{debug, warn};

use super::currency::{Currency, CurrencyInfo, Separator, SeparatorConvention};
use crate::error::{MoneyError, MoneyResult};

static GLOBAL: Lazy<CurrencyRegistry> = Lazy::new(CurrencyRegistry::builtin);

/// Caller-supplied adjustment to a built-in currency.
///
/// Minor-unit digits are ISO data and cannot be overridden.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CurrencyOverride {
    /// Replacement decimal separator.
    #[serde(default)]
    pub decimal_separator: Option<Separator>,
    /// Replacement thousands separator.
    #[serde(default)]
    pub thousands_separator: Option<Separator>,
    /// Drop grouping entirely.
    #[serde(default)]
    pub ungrouped: bool,
    /// Additional symbols to strip when parsing, e.g. `US$`.
    #[serde(default)]
    pub symbols: Vec<String>,
}

impl CurrencyOverride {
    /// Merges this override over `base`.
    ///
    /// Changing only the decimal separator flips the grouping glyph along
    /// with it when they would otherwise collide.
    fn apply(&self, base: &CurrencyInfo) -> MoneyResult<CurrencyInfo> {
        let decimal = self.decimal_separator.unwrap_or(base.convention.decimal);
        let thousands = if self.ungrouped {
            None
        } else if let Some(thousands) = self.thousands_separator {
            Some(thousands)
        } else if base.convention.thousands == Some(decimal) {
            Some(decimal.other())
        } else {
            base.convention.thousands
        };

        let convention = SeparatorConvention { decimal, thousands };
        if !convention.is_consistent() {
            return Err(MoneyError::InvalidOverride(format!(
                "{} uses {:?} for both decimal and grouping",
                base.code(),
                decimal.as_char()
            )));
        }

        let mut extra_symbols = base.extra_symbols.clone();
        for symbol in &self.symbols {
            let symbol = symbol.trim();
            if symbol.is_empty() || symbol.chars().any(|c| c.is_ascii_digit() || c == '.' || c == ',')
            {
                return Err(MoneyError::InvalidOverride(format!(
                    "{} symbol {symbol:?} would be confused with the amount",
                    base.code()
                )));
            }
            extra_symbols.push(symbol.to_string());
        }

        Ok(CurrencyInfo {
            currency: base.currency,
            convention,
            extra_symbols,
        })
    }
}

/// Lookup table from ISO code to currency metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyRegistry {
    // Indexed by `Currency` discriminant, which follows table order.
    entries: Vec<CurrencyInfo>,
}

impl CurrencyRegistry {
    /// Builds a registry holding the built-in table only.
    #[must_use]
    pub fn builtin() -> Self {
        let entries: Vec<CurrencyInfo> = Currency::ALL.iter().map(|c| c.info()).collect();
        debug!(currencies = entries.len(), "Built currency registry");
        Self { entries }
    }

    /// Returns the process-wide registry.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Builds a registry with `overrides` merged over the built-in table.
    ///
    /// Keys are currency codes, matched case-insensitively. Overrides cannot
    /// introduce new codes.
    pub fn with_overrides<K: AsRef<str>>(
        overrides: &HashMap<K, CurrencyOverride>,
    ) -> MoneyResult<Self> {
        let mut registry = Self::builtin();
        for (code, entry) in overrides {
            let currency = parse_code(code.as_ref()).inspect_err(|_| {
                warn!(code = code.as_ref(), "Rejected override for unknown currency");
            })?;
            let merged = entry.apply(registry.info(currency)).inspect_err(|err| {
                warn!(%currency, error = %err, "Rejected currency override");
            })?;
            debug!(
                %currency,
                decimal = %merged.decimal_separator().as_char(),
                "Applied currency override"
            );
            registry.entries[currency as usize] = merged;
        }
        Ok(registry)
    }

    /// Resolves a currency code to its metadata.
    pub fn lookup(&self, code: &str) -> MoneyResult<&CurrencyInfo> {
        parse_code(code).map(|currency| self.info(currency))
    }

    /// Returns the metadata of a known currency.
    #[must_use]
    pub fn info(&self, currency: Currency) -> &CurrencyInfo {
        &self.entries[currency as usize]
    }

    /// Iterates over every entry.
    pub fn iter(&self) -> impl Iterator<Item = &CurrencyInfo> {
        self.entries.iter()
    }
}

impl Default for CurrencyRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn parse_code(code: &str) -> MoneyResult<Currency> {
    Currency::from_code(&code.trim().to_uppercase())
        .ok_or_else(|| MoneyError::UnknownCurrency(code.to_string()))
}
