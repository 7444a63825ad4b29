//! Money error types.
//!
//! Every failure is a value: nothing in the library retries, because every
//! operation is pure and a retry would reproduce the same outcome.

use thiserror::Error;

use crate::types::Currency;

/// Result type alias using `MoneyError`.
pub type MoneyResult<T> = Result<T, MoneyError>;

/// Reasons an amount string could not be resolved to an exact value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character remained that is neither a digit, a separator, a sign,
    /// nor a known symbol of the currency.
    #[error("Unrecognized symbol {found:?} in amount {input:?}")]
    UnrecognizedSymbol {
        /// The raw input.
        input: String,
        /// The first offending character.
        found: char,
    },

    /// The same glyph was used both as grouping and as decimal mark.
    #[error("Ambiguous use of {glyph:?} as separator in amount {input:?}")]
    AmbiguousSeparators {
        /// The raw input.
        input: String,
        /// The glyph that cannot be resolved.
        glyph: char,
    },

    /// Grouping separators are not on 3-digit boundaries.
    #[error("Inconsistent digit grouping in amount {input:?}")]
    InconsistentGrouping {
        /// The raw input.
        input: String,
    },

    /// The fractional part has more digits than the currency allows.
    #[error("Amount {input:?} has {found} fractional digits, currency allows {allowed}")]
    ExcessPrecision {
        /// The raw input.
        input: String,
        /// Fractional digits present in the input.
        found: u32,
        /// Minor-unit digits of the currency.
        allowed: u32,
    },

    /// The input is not a number at all.
    #[error("Malformed amount {input:?}: {reason}")]
    MalformedNumber {
        /// The raw input.
        input: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl ParseError {
    /// Returns the stable code of this parse failure.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnrecognizedSymbol { .. } => "UNRECOGNIZED_SYMBOL",
            Self::AmbiguousSeparators { .. } => "AMBIGUOUS_SEPARATORS",
            Self::InconsistentGrouping { .. } => "INCONSISTENT_GROUPING",
            Self::ExcessPrecision { .. } => "EXCESS_PRECISION",
            Self::MalformedNumber { .. } => "MALFORMED_NUMBER",
        }
    }

    /// Builds a [`ParseError::MalformedNumber`].
    pub fn malformed(input: &str, reason: impl Into<String>) -> Self {
        Self::MalformedNumber {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Money error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Currency code not present in the registry.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Amount string could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Arithmetic or comparison across two currencies.
    #[error("Unable to operate on different currencies: {left}, {right}")]
    CurrencyMismatch {
        /// Currency of the left operand.
        left: Currency,
        /// Currency of the right operand.
        right: Currency,
    },

    /// Intermediate result does not fit the configured precision.
    #[error("Precision overflow: {0}")]
    PrecisionOverflow(String),

    /// Requested precision is not usable.
    #[error("Invalid precision: {0} significant digits")]
    InvalidPrecision(u32),

    /// Division of an amount by zero.
    #[error("Division by zero")]
    DivisionByZero,

    /// Currency override table is inconsistent.
    #[error("Invalid currency override: {0}")]
    InvalidOverride(String),
}

impl MoneyError {
    /// Returns the error code for callers that map errors to their own surface.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCurrency(_) => "UNKNOWN_CURRENCY",
            Self::Parse(_) => "PARSE_ERROR",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::PrecisionOverflow(_) => "PRECISION_OVERFLOW",
            Self::InvalidPrecision(_) => "INVALID_PRECISION",
            Self::DivisionByZero => "DIVISION_BY_ZERO",
            Self::InvalidOverride(_) => "INVALID_OVERRIDE",
        }
    }

    /// Returns the parse failure, if this is one.
    #[must_use]
    pub const fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}
