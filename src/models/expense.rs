use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExpenseRecord {
    pub(crate) date: NaiveDate,
    pub(crate) category: String,
    pub(crate) amount: Decimal,
    pub(crate) description: String,
}

/// Largest accepted amount, in whole currency units. Sums and percentages
/// over a store stay inside `Decimal` range.
pub(crate) const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000;

/// Round to 2 fractional digits, then require `0 < amount <= MAX_AMOUNT_UNITS`.
pub(crate) fn to_cents(amount: Decimal, what: &str) -> Result<Decimal> {
    let rounded = amount.round_dp(2);
    if rounded <= Decimal::ZERO {
        return Err(Error::InvalidData(format!(
            "{what} must be positive after rounding to cents, got {amount}"
        )));
    }
    if rounded > Decimal::from(MAX_AMOUNT_UNITS) {
        return Err(Error::InvalidData(format!(
            "{what} {amount} exceeds the limit of {MAX_AMOUNT_UNITS}"
        )));
    }
    Ok(rounded)
}

impl ExpenseRecord {
    /// Build a record, enforcing a positive amount and a non-empty category.
    /// Amounts are kept to 2 fractional digits.
    pub(crate) fn new(
        date: NaiveDate,
        category: &str,
        amount: Decimal,
        description: &str,
    ) -> Result<Self> {
        let category = category.trim();
        if category.is_empty() {
            return Err(Error::InvalidData("category must not be empty".into()));
        }
        let amount = to_cents(amount, "amount")?;
        Ok(Self {
            date,
            category: category.to_string(),
            amount,
            description: description.trim().to_string(),
        })
    }

    pub(crate) fn year(&self) -> i32 {
        self.date.year()
    }

    pub(crate) fn month(&self) -> u32 {
        self.date.month()
    }

    pub(crate) fn in_month(&self, year: i32, month: u32) -> bool {
        self.year() == year && self.month() == month
    }

    /// Canonical `YYYY-MM-DD` form used on disk.
    pub(crate) fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
