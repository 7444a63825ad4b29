//! Core money logic for PreciseMoney.
//!
//! This crate contains pure logic with no I/O: amount parsing, precision
//! scopes and currency-tagged arithmetic.
//!
//! # Modules
//!
//! - `parser` - Locale-ambiguous amount strings to exact decimals
//! - `precision` - Scoped significant-digit arithmetic and quantization
//! - `money` - The `Money` value and its record form

pub mod money;
pub mod parser;
pub mod precision;

pub use money::{Money, MoneyRecord, from_record, to_record};
pub use parser::parse;
pub use precision::{PrecisionContext, PrecisionGuard, quantize, with_context, with_precision};
