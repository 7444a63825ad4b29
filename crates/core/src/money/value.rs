//! Money type with exact decimal amount and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! The amount is a `rust_decimal::Decimal` whose scale always equals the
//! currency's minor-unit digits.

use std::cmp::Ordering;

use precise_money_shared::{Currency, CurrencyRegistry, MoneyError, MoneyResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::record::MoneyRecord;
use crate::parser;
use crate::precision::{PrecisionContext, quantize};

/// Fractional digits of the ISO 4217 integer form: one unit is 1/10000 of
/// the major unit, whatever the currency's own minor unit is.
pub const ISO_UNIT_DIGITS: u32 = 4;

/// Represents a monetary amount with currency.
///
/// Immutable: every operation returns a new value. Arithmetic and comparison
/// are only defined between amounts of the same currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "MoneyRecord", try_from = "MoneyRecord")]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Parses `raw` as an amount of the currency with ISO code `code`.
    ///
    /// # Example
    ///
    /// ```
    /// use precise_money_core::Money;
    ///
    /// let price = Money::from_currency("EUR", "1.234,50").unwrap();
    /// assert_eq!(price.as_string(), "1234.50");
    /// ```
    pub fn from_currency(code: &str, raw: &str) -> MoneyResult<Self> {
        Self::parse_with(CurrencyRegistry::global(), code, raw)
    }

    /// Parses `raw` using the conventions held in `registry`.
    pub fn parse_with(registry: &CurrencyRegistry, code: &str, raw: &str) -> MoneyResult<Self> {
        let info = registry.lookup(code)?;
        let amount = parser::parse(raw, info)?;
        Ok(Self {
            amount,
            currency: info.currency,
        })
    }

    /// Parses `raw` as an amount of `currency` with its built-in conventions.
    pub fn parse(currency: Currency, raw: &str) -> MoneyResult<Self> {
        let amount = parser::parse(raw, CurrencyRegistry::global().info(currency))?;
        Ok(Self { amount, currency })
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::new(0, currency.minor_unit_digits()),
            currency,
        }
    }

    /// Creates an amount from a count of minor units, e.g. cents.
    #[must_use]
    pub fn from_minor_units(currency: Currency, units: i64) -> Self {
        Self {
            amount: Decimal::new(units, currency.minor_unit_digits()),
            currency,
        }
    }

    /// Creates an amount from an exact decimal, rounding to the currency's
    /// minor units with the ambient rounding mode.
    pub fn from_decimal(currency: Currency, value: Decimal) -> MoneyResult<Self> {
        let rounding = PrecisionContext::current().rounding();
        Ok(Self {
            amount: quantize(value, currency.minor_unit_digits(), rounding)?,
            currency,
        })
    }

    /// Creates an amount from its ISO 4217 integer form, rounding to the
    /// currency's minor units with the ambient rounding mode.
    ///
    /// ```
    /// use precise_money_core::Money;
    /// use precise_money_shared::Currency;
    ///
    /// let money = Money::from_iso_units(Currency::Usd, 1_234_567).unwrap();
    /// assert_eq!(money.as_string(), "123.46");
    /// ```
    pub fn from_iso_units(currency: Currency, units: i64) -> MoneyResult<Self> {
        Self::from_decimal(currency, Decimal::new(units, ISO_UNIT_DIGITS))
    }

    /// The exact amount, scaled to the currency's minor-unit digits.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// The currency's display symbol.
    #[must_use]
    pub const fn currency_symbol(&self) -> &'static str {
        self.currency.symbol()
    }

    /// The currency's minor-unit digit count.
    #[must_use]
    pub const fn minor_unit_digits(&self) -> u32 {
        self.currency.minor_unit_digits()
    }

    /// The amount as a count of minor units, e.g. cents.
    #[must_use]
    pub fn minor_units(&self) -> i128 {
        self.amount.mantissa()
    }

    /// The amount in ISO 4217 integer form, ten-thousandths of the major unit.
    ///
    /// Digits beyond the fourth fractional place are truncated toward zero.
    #[must_use]
    pub fn as_iso_units(&self) -> i128 {
        let digits = self.minor_unit_digits();
        let mantissa = self.amount.mantissa();
        if digits <= ISO_UNIT_DIGITS {
            mantissa * 10_i128.pow(ISO_UNIT_DIGITS - digits)
        } else {
            mantissa / 10_i128.pow(digits - ISO_UNIT_DIGITS)
        }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Returns true if the amount is above zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    fn ensure_same_currency(&self, other: &Self) -> MoneyResult<()> {
        if self.currency == other.currency {
            Ok(())
        } else {
            debug!(left = %self.currency, right = %other.currency, "Rejected cross-currency operation");
            Err(MoneyError::CurrencyMismatch {
                left: self.currency,
                right: other.currency,
            })
        }
    }

    /// Adds two amounts of the same currency.
    ///
    /// Both operands already carry the currency's scale, so the exact sum
    /// does too and is never rounded.
    pub fn add(&self, other: &Self) -> MoneyResult<Self> {
        self.ensure_same_currency(other)?;
        let amount = self.amount.checked_add(other.amount).ok_or_else(|| {
            MoneyError::PrecisionOverflow(format!("{self} + {other} exceeds the decimal range"))
        })?;
        Ok(Self {
            amount,
            currency: self.currency,
        })
    }

    /// Subtracts an amount of the same currency.
    pub fn subtract(&self, other: &Self) -> MoneyResult<Self> {
        self.ensure_same_currency(other)?;
        let amount = self.amount.checked_sub(other.amount).ok_or_else(|| {
            MoneyError::PrecisionOverflow(format!("{self} - {other} exceeds the decimal range"))
        })?;
        Ok(Self::normalized(amount, self.currency))
    }

    /// Multiplies by a currency-less factor at ambient precision, then
    /// quantizes with the ambient rounding mode.
    ///
    /// # Example
    ///
    /// ```
    /// use precise_money_core::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let subtotal = Money::from_currency("USD", "10.00").unwrap();
    /// let with_tax = subtotal.multiply_by_scalar(dec!(1.0825)).unwrap();
    /// assert_eq!(with_tax.as_string(), "10.82");
    /// ```
    pub fn multiply_by_scalar(&self, factor: impl Into<Decimal>) -> MoneyResult<Self> {
        let context = PrecisionContext::current();
        let product = context.mul(self.amount, factor.into())?;
        self.requantized(product, &context)
    }

    /// Divides by a currency-less divisor at ambient precision, then
    /// quantizes with the ambient rounding mode.
    pub fn divide_by_scalar(&self, divisor: impl Into<Decimal>) -> MoneyResult<Self> {
        let context = PrecisionContext::current();
        let quotient = context.div(self.amount, divisor.into())?;
        self.requantized(quotient, &context)
    }

    /// Applies an arbitrary computation to the amount under the ambient
    /// context and quantizes the outcome.
    ///
    /// The closure receives the ambient context so it can use its checked
    /// arithmetic.
    pub fn apply_operation<F>(&self, operation: F) -> MoneyResult<Self>
    where
        F: FnOnce(Decimal, &PrecisionContext) -> MoneyResult<Decimal>,
    {
        let context = PrecisionContext::current();
        let value = context.apply(operation(self.amount, &context)?)?;
        self.requantized(value, &context)
    }

    fn requantized(&self, value: Decimal, context: &PrecisionContext) -> MoneyResult<Self> {
        Ok(Self {
            amount: quantize(value, self.minor_unit_digits(), context.rounding())?,
            currency: self.currency,
        })
    }

    fn normalized(mut amount: Decimal, currency: Currency) -> Self {
        if amount.is_zero() {
            amount.set_sign_positive(true);
        }
        Self { amount, currency }
    }

    /// Returns the amount with its sign flipped.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self::normalized(-self.amount, self.currency)
    }

    /// Returns the absolute amount.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            amount: self.amount.abs(),
            currency: self.currency,
        }
    }

    /// Sums amounts of `currency`; an empty iterator yields zero.
    pub fn sum<'a, I>(currency: Currency, moneys: I) -> MoneyResult<Self>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        moneys
            .into_iter()
            .try_fold(Self::zero(currency), |total, money| total.add(money))
    }

    /// Orders two amounts of the same currency.
    pub fn compare(&self, other: &Self) -> MoneyResult<Ordering> {
        self.ensure_same_currency(other)?;
        Ok(self.amount.cmp(&other.amount))
    }

    /// Applies a custom predicate to the amounts of two values of the same
    /// currency.
    pub fn compare_with<F>(&self, other: &Self, predicate: F) -> MoneyResult<bool>
    where
        F: FnOnce(Decimal, Decimal) -> bool,
    {
        self.ensure_same_currency(other)?;
        Ok(predicate(self.amount, other.amount))
    }

    /// Canonical form: optional `-`, digits, and a `.` at the currency's
    /// minor-unit offset. No grouping, no symbol.
    #[must_use]
    pub fn as_string(&self) -> String {
        self.amount.to_string()
    }

    /// Canonical form prefixed with the currency symbol, e.g. `$80.00`.
    #[must_use]
    pub fn as_display_string(&self) -> String {
        format!("{}{}", self.currency_symbol(), self.as_string())
    }
}

/// Amounts of different currencies are unordered.
impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Parses the [`Display`](std::fmt::Display) form, `"<amount> <CODE>"`.
impl std::str::FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (amount, code) = trimmed
            .rsplit_once(char::is_whitespace)
            .ok_or_else(|| MoneyError::UnknownCurrency(trimmed.to_string()))?;
        Self::from_currency(code, amount)
    }
}
