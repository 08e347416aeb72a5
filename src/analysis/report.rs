use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::aggregate::{category_totals, monthly_summary, records_in_range, total_amount};
use crate::models::ExpenseRecord;

pub(crate) const TOP_EXPENSES: usize = 10;

/// Headline numbers for one month.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthOverview {
    pub(crate) year: i32,
    pub(crate) month: u32,
    pub(crate) total: Decimal,
    pub(crate) transactions: usize,
    /// Total divided by the number of distinct days with spending.
    pub(crate) average_per_day: Decimal,
    pub(crate) top_category: Option<String>,
    pub(crate) daily_totals: Vec<(NaiveDate, Decimal)>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryBreakdown {
    pub(crate) category: String,
    pub(crate) total: Decimal,
    pub(crate) count: usize,
    pub(crate) average: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RangeReport {
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
    pub(crate) total: Decimal,
    pub(crate) transactions: usize,
    pub(crate) average_expense: Decimal,
    pub(crate) category_count: usize,
    /// Sorted by total, largest first.
    pub(crate) categories: Vec<CategoryBreakdown>,
    pub(crate) top_expenses: Vec<ExpenseRecord>,
}

pub(crate) fn month_overview(records: &[ExpenseRecord], year: i32, month: u32) -> MonthOverview {
    let month_records = monthly_summary(records, year, month);
    let total = total_amount(month_records.iter().copied());

    let mut daily: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for rec in &month_records {
        *daily.entry(rec.date).or_default() += rec.amount;
    }

    let average_per_day = if daily.is_empty() {
        Decimal::ZERO
    } else {
        (total / Decimal::from(daily.len())).round_dp(2)
    };

    let top_category = category_totals(records, year, month)
        .into_iter()
        .max_by(|a, b| a.total.cmp(&b.total))
        .map(|ct| ct.category);

    MonthOverview {
        year,
        month,
        total,
        transactions: month_records.len(),
        average_per_day,
        top_category,
        daily_totals: daily.into_iter().collect(),
    }
}

pub(crate) fn range_report(
    records: &[ExpenseRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> RangeReport {
    let selected = records_in_range(records, start, end);
    let total = total_amount(selected.iter().copied());
    let transactions = selected.len();
    let average_expense = average(total, transactions);

    let mut groups: BTreeMap<&str, (Decimal, usize)> = BTreeMap::new();
    for rec in &selected {
        let entry = groups.entry(rec.category.as_str()).or_default();
        entry.0 += rec.amount;
        entry.1 += 1;
    }
    let category_count = groups.len();

    let mut categories: Vec<CategoryBreakdown> = groups
        .into_iter()
        .map(|(category, (total, count))| CategoryBreakdown {
            category: category.to_string(),
            total,
            count,
            average: average(total, count),
        })
        .collect();
    categories.sort_by(|a, b| b.total.cmp(&a.total));

    let mut top_expenses: Vec<ExpenseRecord> = selected.into_iter().cloned().collect();
    top_expenses.sort_by(|a, b| b.amount.cmp(&a.amount));
    top_expenses.truncate(TOP_EXPENSES);

    RangeReport {
        start,
        end,
        total,
        transactions,
        average_expense,
        category_count,
        categories,
        top_expenses,
    }
}

fn average(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    (total / Decimal::from(count)).round_dp(2)
}
