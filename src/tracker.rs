//! Facade the CLI talks to. Every query is recomputed from the current
//! record set; nothing is cached between calls.

use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use crate::analysis::{
    self, ForecastAnchor, Insights, InsufficientData, MonthOverview, Prediction, RangeReport,
};
use crate::config::Config;
use crate::error::Result;
use crate::models::{BudgetAlert, BudgetMap, BudgetStatus, CategoryTotal, ExpenseRecord, MonthlyTotal};
use crate::store::{self, RecordStore};

pub(crate) struct Tracker {
    store: RecordStore,
    anchor: ForecastAnchor,
}

impl Tracker {
    pub(crate) fn open(config: &Config) -> Result<Self> {
        let store = RecordStore::load(&config.expenses_path(), &config.budgets_path())?;
        Ok(Self::new(store, config.forecast_anchor))
    }

    pub(crate) fn new(store: RecordStore, anchor: ForecastAnchor) -> Self {
        Self { store, anchor }
    }

    pub(crate) fn records(&self) -> &[ExpenseRecord] {
        self.store.records()
    }

    pub(crate) fn budgets(&self) -> &BudgetMap {
        self.store.budgets()
    }

    pub(crate) fn append(
        &mut self,
        date: NaiveDate,
        category: &str,
        amount: Decimal,
        description: &str,
    ) -> Result<()> {
        self.store.append(date, category, amount, description)
    }

    pub(crate) fn set_budget(&mut self, category: &str, amount: Decimal) -> Result<()> {
        self.store.set_budget(category, amount)
    }

    pub(crate) fn monthly_summary(&self, year: i32, month: u32) -> Vec<&ExpenseRecord> {
        analysis::monthly_summary(self.records(), year, month)
    }

    pub(crate) fn category_totals(&self, year: i32, month: u32) -> Vec<CategoryTotal> {
        analysis::category_totals(self.records(), year, month)
    }

    pub(crate) fn monthly_totals(&self) -> Vec<MonthlyTotal> {
        analysis::monthly_totals(self.records())
    }

    pub(crate) fn check_alerts(&self, year: i32, month: u32) -> Vec<BudgetAlert> {
        analysis::check_alerts(self.records(), self.budgets(), year, month)
    }

    pub(crate) fn budget_status(&self, year: i32, month: u32) -> Vec<BudgetStatus> {
        analysis::budget_status(self.records(), self.budgets(), year, month)
    }

    pub(crate) fn predict_next_period(
        &self,
        today: NaiveDate,
    ) -> std::result::Result<Prediction, InsufficientData> {
        analysis::predict_next_period(self.records(), today, self.anchor)
    }

    pub(crate) fn insights(&self) -> Insights {
        analysis::analyze(self.records())
    }

    pub(crate) fn month_overview(&self, year: i32, month: u32) -> MonthOverview {
        analysis::month_overview(self.records(), year, month)
    }

    pub(crate) fn range_report(&self, start: NaiveDate, end: NaiveDate) -> RangeReport {
        analysis::range_report(self.records(), start, end)
    }

    pub(crate) fn categories(&self) -> Vec<String> {
        self.store.categories()
    }

    /// Write the month's records to `path` in the store's CSV layout.
    /// Returns the number of records written; nothing is written for an empty month.
    pub(crate) fn export_month(&self, path: &Path, year: i32, month: u32) -> Result<usize> {
        let selected: Vec<ExpenseRecord> = self
            .monthly_summary(year, month)
            .into_iter()
            .cloned()
            .collect();
        if selected.is_empty() {
            return Ok(0);
        }
        store::write_records(path, &selected)?;
        info!(path = %path.display(), count = selected.len(), "Exported expenses");
        Ok(selected.len())
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
