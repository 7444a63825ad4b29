//! Plain record form of [`Money`] for storage and transport.

use precise_money_shared::{MoneyError, MoneyResult};
use serde::{Deserialize, Serialize};

use super::value::Money;

/// Two-string record: canonical amount and ISO currency code.
///
/// ```json
/// {"amount": "1234.56", "currency": "EUR"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyRecord {
    /// Canonical amount, e.g. `1234.56`.
    pub amount: String,
    /// ISO 4217 code.
    pub currency: String,
}

/// Converts a value to its record, using the canonical amount string.
#[must_use]
pub fn to_record(money: &Money) -> MoneyRecord {
    MoneyRecord {
        amount: money.as_string(),
        currency: money.currency().code().to_string(),
    }
}

/// Rebuilds a value from a record through the same parser as
/// [`Money::from_currency`], so any record it accepts is validated.
pub fn from_record(record: &MoneyRecord) -> MoneyResult<Money> {
    Money::from_currency(&record.currency, &record.amount)
}

impl From<Money> for MoneyRecord {
    fn from(money: Money) -> Self {
        to_record(&money)
    }
}

impl TryFrom<MoneyRecord> for Money {
    type Error = MoneyError;

    fn try_from(record: MoneyRecord) -> Result<Self, Self::Error> {
        from_record(&record)
    }
}
