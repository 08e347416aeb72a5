use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::expense::to_cents;
use crate::error::{Error, Result};

/// Category label -> monthly budget. Every stored amount is positive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct BudgetMap {
    limits: BTreeMap<String, Decimal>,
}

impl BudgetMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the budget for `category`.
    pub(crate) fn set(&mut self, category: &str, amount: Decimal) -> Result<()> {
        let category = category.trim();
        if category.is_empty() {
            return Err(Error::InvalidData("budget category must not be empty".into()));
        }
        let amount = to_cents(amount, &format!("budget for '{category}'"))?;
        self.limits.insert(category.to_string(), amount);
        Ok(())
    }

    /// Budget for `category`, or zero when none is configured.
    pub(crate) fn limit_for(&self, category: &str) -> Decimal {
        self.limits.get(category).copied().unwrap_or(Decimal::ZERO)
    }

    pub(crate) fn get(&self, category: &str) -> Option<Decimal> {
        self.limits.get(category).copied()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.limits.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub(crate) fn len(&self) -> usize {
        self.limits.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }
}
