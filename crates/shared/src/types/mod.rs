//! Currency metadata and rounding types.

pub mod currency;
pub mod registry;
pub mod rounding;

pub use currency::{Currency, CurrencyInfo, Separator, SeparatorConvention};
pub use registry::{CurrencyOverride, CurrencyRegistry};
pub use rounding::Rounding;
