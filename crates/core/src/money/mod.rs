//! Currency-tagged exact amounts.
//!
//! A [`Money`] always carries exactly as many fractional digits as its
//! currency's minor unit. Addition and subtraction are exact; scalar
//! operations run at the ambient precision and are quantized with the
//! ambient rounding mode.

pub mod record;
pub mod value;

#[cfg(test)]
mod money_props;

pub use record::{MoneyRecord, from_record, to_record};
pub use value::{ISO_UNIT_DIGITS, Money};
