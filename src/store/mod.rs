mod budgets;
mod records;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{BudgetMap, ExpenseRecord};

pub(crate) use records::{parse_amount, parse_date, write_records};

/// Owns every expense record and the budget map for the life of the process.
/// Each mutation rewrites both files in full.
pub(crate) struct RecordStore {
    expenses_path: PathBuf,
    budgets_path: PathBuf,
    records: Vec<ExpenseRecord>,
    budgets: BudgetMap,
}

impl RecordStore {
    pub(crate) fn load(expenses_path: &Path, budgets_path: &Path) -> Result<Self> {
        let records = records::read_records(expenses_path)?;
        let budgets = budgets::read_budgets(budgets_path)?;
        info!(
            records = records.len(),
            budgets = budgets.len(),
            "Expense store loaded"
        );
        Ok(Self {
            expenses_path: expenses_path.to_path_buf(),
            budgets_path: budgets_path.to_path_buf(),
            records,
            budgets,
        })
    }

    pub(crate) fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub(crate) fn budgets(&self) -> &BudgetMap {
        &self.budgets
    }

    pub(crate) fn append(
        &mut self,
        date: NaiveDate,
        category: &str,
        amount: Decimal,
        description: &str,
    ) -> Result<()> {
        let record = ExpenseRecord::new(date, category, amount, description)?;
        debug!(
            date = %record.date_string(),
            category = %record.category,
            amount = %record.amount,
            "Appending expense"
        );
        self.records.push(record);
        self.persist()
    }

    pub(crate) fn set_budget(&mut self, category: &str, amount: Decimal) -> Result<()> {
        self.budgets.set(category, amount)?;
        debug!(category = category.trim(), amount = %amount, "Budget set");
        self.persist()
    }

    /// Sorted, de-duplicated category labels across all records.
    pub(crate) fn categories(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn persist(&self) -> Result<()> {
        records::write_records(&self.expenses_path, &self.records)?;
        budgets::write_budgets(&self.budgets_path, &self.budgets)?;
        debug!(
            records = self.records.len(),
            budgets = self.budgets.len(),
            "Expense store persisted"
        );
        Ok(())
    }
}
