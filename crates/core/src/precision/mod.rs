//! Precision-scoped decimal arithmetic.
//!
//! CRITICAL: Rounding strategy for money:
//! - Intermediate results keep the ambient number of significant digits
//! - Final results are quantized to the currency's minor-unit digits
//! - Default rounding is banker's rounding (round half to even)
//!
//! The ambient context is thread-local and scoped: [`PrecisionGuard`] and
//! [`with_precision`] install a context and restore the previous one on every
//! exit path.

pub mod context;
pub mod rounding;

pub use context::{
    MAX_SUPPORTED_DIGITS, PrecisionContext, PrecisionGuard, with_context, with_precision,
};
pub use rounding::quantize;
