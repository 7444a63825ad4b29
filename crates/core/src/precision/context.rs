//! Ambient precision context and its scope guard.

use std::cell::Cell;
use std::marker::PhantomData;

use precise_money_shared::config::{DEFAULT_PRECISION, PrecisionConfig};
use precise_money_shared::{MoneyError, MoneyResult, Rounding};
use rust_decimal::Decimal;
use tracing::debug;

use super::rounding::round_significant;

/// Most significant digits a `Decimal` holds exactly.
pub const MAX_SUPPORTED_DIGITS: u32 = 28;

thread_local! {
    static AMBIENT: Cell<PrecisionContext> = const { Cell::new(PrecisionContext::DEFAULT) };
}

/// Significant-digit precision and rounding mode for intermediate results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecisionContext {
    precision: u32,
    rounding: Rounding,
}

impl PrecisionContext {
    /// 28 significant digits, round half to even.
    pub const DEFAULT: Self = Self {
        precision: DEFAULT_PRECISION,
        rounding: Rounding::HalfEven,
    };

    /// Creates a context. Precision must be at least one digit.
    pub const fn new(precision: u32, rounding: Rounding) -> MoneyResult<Self> {
        if precision == 0 {
            return Err(MoneyError::InvalidPrecision(precision));
        }
        Ok(Self {
            precision,
            rounding,
        })
    }

    /// Creates a context from loaded configuration.
    pub const fn from_config(config: &PrecisionConfig) -> MoneyResult<Self> {
        Self::new(config.digits, config.rounding)
    }

    /// Returns the ambient context of the calling thread.
    #[must_use]
    pub fn current() -> Self {
        AMBIENT.with(Cell::get)
    }

    /// Requested significant digits.
    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// Rounding mode.
    #[must_use]
    pub const fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Digits actually kept: the requested precision, capped at what a
    /// `Decimal` can hold.
    #[must_use]
    pub const fn effective_precision(&self) -> u32 {
        if self.precision < MAX_SUPPORTED_DIGITS {
            self.precision
        } else {
            MAX_SUPPORTED_DIGITS
        }
    }

    /// Rounds an intermediate result to this context's significant digits.
    ///
    /// Fails when the integer part alone needs more digits than the
    /// precision allows; only fractional digits are ever rounded away.
    pub fn apply(&self, value: Decimal) -> MoneyResult<Decimal> {
        round_significant(value, self.effective_precision(), self.rounding)
    }

    /// `a + b` at this precision.
    pub fn add(&self, a: Decimal, b: Decimal) -> MoneyResult<Decimal> {
        let sum = a
            .checked_add(b)
            .ok_or_else(|| overflow(format!("{a} + {b} exceeds the decimal range")))?;
        self.apply(sum)
    }

    /// `a - b` at this precision.
    pub fn sub(&self, a: Decimal, b: Decimal) -> MoneyResult<Decimal> {
        let difference = a
            .checked_sub(b)
            .ok_or_else(|| overflow(format!("{a} - {b} exceeds the decimal range")))?;
        self.apply(difference)
    }

    /// `a * b` at this precision.
    pub fn mul(&self, a: Decimal, b: Decimal) -> MoneyResult<Decimal> {
        let product = a
            .checked_mul(b)
            .ok_or_else(|| overflow(format!("{a} * {b} exceeds the decimal range")))?;
        self.apply(product)
    }

    /// `a / b` at this precision.
    pub fn div(&self, a: Decimal, b: Decimal) -> MoneyResult<Decimal> {
        if b.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        let quotient = a
            .checked_div(b)
            .ok_or_else(|| overflow(format!("{a} / {b} exceeds the decimal range")))?;
        self.apply(quotient)
    }

    /// `principal * (1 + rate)^periods`, rounding every intermediate product.
    ///
    /// Run this under a wider scope than the default when compounding over
    /// many periods, then quantize the final figure once.
    pub fn compound(&self, principal: Decimal, rate: Decimal, periods: u32) -> MoneyResult<Decimal> {
        let factor = self.add(Decimal::ONE, rate)?;
        let mut value = self.apply(principal)?;
        for _ in 0..periods {
            value = self.mul(value, factor)?;
        }
        Ok(value)
    }
}

impl Default for PrecisionContext {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn overflow(message: String) -> MoneyError {
    MoneyError::PrecisionOverflow(message)
}

/// Installs a precision context for the current thread until dropped.
///
/// Dropping the guard restores whatever was ambient when it was entered, on
/// normal exit, early return, or unwinding. Guards nest; the innermost one
/// governs. The guard is tied to its thread and cannot be sent elsewhere.
#[must_use = "the previous precision is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct PrecisionGuard {
    previous: PrecisionContext,
    _not_send: PhantomData<*const ()>,
}

impl PrecisionGuard {
    /// Makes `context` ambient for the current thread.
    pub fn enter(context: PrecisionContext) -> Self {
        let previous = AMBIENT.with(|ambient| ambient.replace(context));
        debug!(
            precision = context.precision,
            rounding = %context.rounding,
            previous = previous.precision,
            "Entered precision scope"
        );
        Self {
            previous,
            _not_send: PhantomData,
        }
    }

    /// The context that will be restored.
    #[must_use]
    pub const fn previous(&self) -> PrecisionContext {
        self.previous
    }
}

impl Drop for PrecisionGuard {
    fn drop(&mut self) {
        // The thread-local may already be gone during thread teardown.
        let _ = AMBIENT.try_with(|ambient| ambient.set(self.previous));
        debug!(restored = self.previous.precision, "Left precision scope");
    }
}

/// Runs `body` with `precision` significant digits and `rounding` ambient.
///
/// # Example
///
/// ```
/// use precise_money_core::precision::{with_precision, PrecisionContext};
/// use precise_money_shared::Rounding;
/// use rust_decimal_macros::dec;
///
/// let grown = with_precision(50, Rounding::HalfEven, || {
///     PrecisionContext::current().compound(dec!(1000), dec!(0.05), 10)
/// })
/// .unwrap();
/// assert_eq!(grown.round_dp(2), dec!(1628.89));
/// assert_eq!(PrecisionContext::current(), PrecisionContext::DEFAULT);
/// ```
pub fn with_precision<T>(
    precision: u32,
    rounding: Rounding,
    body: impl FnOnce() -> MoneyResult<T>,
) -> MoneyResult<T> {
    let context = PrecisionContext::new(precision, rounding)?;
    with_context(context, body)
}

/// Runs `body` with `context` ambient.
pub fn with_context<R>(context: PrecisionContext, body: impl FnOnce() -> R) -> R {
    let _guard = PrecisionGuard::enter(context);
    body()
}
