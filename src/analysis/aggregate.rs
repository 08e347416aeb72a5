use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{CategoryTotal, ExpenseRecord, MonthlyTotal};

/// Records dated in `year`/`month`, in insertion order.
pub(crate) fn monthly_summary(
    records: &[ExpenseRecord],
    year: i32,
    month: u32,
) -> Vec<&ExpenseRecord> {
    records.iter().filter(|r| r.in_month(year, month)).collect()
}

/// Per-category spend for one month, sorted by category name.
pub(crate) fn category_totals(
    records: &[ExpenseRecord],
    year: i32,
    month: u32,
) -> Vec<CategoryTotal> {
    sum_by_category(monthly_summary(records, year, month))
}

/// Per-category spend over every record.
pub(crate) fn category_totals_all(records: &[ExpenseRecord]) -> Vec<CategoryTotal> {
    sum_by_category(records.iter())
}

/// Records with `start <= date <= end`.
pub(crate) fn records_in_range(
    records: &[ExpenseRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<&ExpenseRecord> {
    records
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .collect()
}

/// Spend per calendar month, oldest first. Months without records are absent.
pub(crate) fn monthly_totals(records: &[ExpenseRecord]) -> Vec<MonthlyTotal> {
    let mut by_month: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for rec in records {
        *by_month.entry((rec.year(), rec.month())).or_default() += rec.amount;
    }
    by_month
        .into_iter()
        .map(|((year, month), total)| MonthlyTotal { year, month, total })
        .collect()
}

pub(crate) fn sum_by_category<'a>(
    records: impl IntoIterator<Item = &'a ExpenseRecord>,
) -> Vec<CategoryTotal> {
    let mut by_category: BTreeMap<&str, Decimal> = BTreeMap::new();
    for rec in records {
        *by_category.entry(rec.category.as_str()).or_default() += rec.amount;
    }
    by_category
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect()
}

pub(crate) fn total_amount<'a>(records: impl IntoIterator<Item = &'a ExpenseRecord>) -> Decimal {
    records.into_iter().map(|r| r.amount).sum()
}
