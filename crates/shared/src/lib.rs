//! Shared types, errors, and configuration for PreciseMoney.
//!
//! This crate provides what the parsing and arithmetic crates build on:
//! - The closed currency table and the read-only currency registry
//! - Rounding modes
//! - Library-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::MoneyConfig;
pub use error::{MoneyError, MoneyResult, ParseError};
pub use types::{Currency, CurrencyInfo, CurrencyOverride, CurrencyRegistry, Rounding, Separator};
