#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{BudgetMap, CategoryTotal, ExpenseRecord};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn rec(date: (i32, u32, u32), category: &str, amount: Decimal, desc: &str) -> ExpenseRecord {
    ExpenseRecord::new(ymd(date.0, date.1, date.2), category, amount, desc).unwrap()
}

/// Three Food expenses across January and February 2024.
fn scenario() -> (Vec<ExpenseRecord>, BudgetMap) {
    let records = vec![
        rec((2024, 1, 5), "Food", dec!(500), "lunch"),
        rec((2024, 1, 20), "Food", dec!(300), "dinner"),
        rec((2024, 2, 10), "Food", dec!(200), "snack"),
    ];
    let mut budgets = BudgetMap::new();
    budgets.set("Food", dec!(700)).unwrap();
    (records, budgets)
}

fn mixed_month() -> Vec<ExpenseRecord> {
    vec![
        rec((2023, 12, 31), "Food", dec!(40), "new year's eve"),
        rec((2024, 1, 1), "Food", dec!(25.50), "brunch"),
        rec((2024, 1, 1), "Travel", dec!(120), "train"),
        rec((2024, 1, 14), "Shopping", dec!(60), "shoes"),
        rec((2024, 1, 31), "Food", dec!(14.50), "pizza"),
        rec((2024, 2, 1), "Travel", dec!(80), "taxi"),
    ]
}

// ── monthly_summary ───────────────────────────────────────────

#[test]
fn test_monthly_summary_exact_month_only() {
    let records = mixed_month();
    let jan = monthly_summary(&records, 2024, 1);
    assert_eq!(jan.len(), 4);
    assert!(jan.iter().all(|r| r.in_month(2024, 1)));
    // Boundary neighbours are excluded
    assert!(jan.iter().all(|r| r.date != ymd(2023, 12, 31)));
    assert!(jan.iter().all(|r| r.date != ymd(2024, 2, 1)));
}

#[test]
fn test_monthly_summary_keeps_insertion_order() {
    let records = mixed_month();
    let descs: Vec<&str> = monthly_summary(&records, 2024, 1)
        .iter()
        .map(|r| r.description.as_str())
        .collect();
    assert_eq!(descs, vec!["brunch", "train", "shoes", "pizza"]);
}

#[test]
fn test_monthly_summary_same_month_other_year() {
    let records = vec![
        rec((2023, 1, 10), "Food", dec!(5), ""),
        rec((2024, 1, 10), "Food", dec!(6), ""),
    ];
    let jan = monthly_summary(&records, 2024, 1);
    assert_eq!(jan.len(), 1);
    assert_eq!(jan[0].amount, dec!(6));
}

#[test]
fn test_monthly_summary_empty_month() {
    let records = mixed_month();
    assert!(monthly_summary(&records, 2024, 7).is_empty());
}

// ── category_totals ───────────────────────────────────────────

#[test]
fn test_category_totals_scenario() {
    let (records, _) = scenario();
    assert_eq!(
        category_totals(&records, 2024, 1),
        vec![CategoryTotal {
            category: "Food".into(),
            total: dec!(800),
        }]
    );
}

#[test]
fn test_category_totals_sum_matches_monthly_summary() {
    let records = mixed_month();
    for (y, m) in [(2023, 12), (2024, 1), (2024, 2), (2024, 3)] {
        let from_categories: Decimal = category_totals(&records, y, m).iter().map(|c| c.total).sum();
        let from_records: Decimal = monthly_summary(&records, y, m).iter().map(|r| r.amount).sum();
        assert_eq!(from_categories, from_records, "mismatch for {y}-{m}");
    }
}

#[test]
fn test_category_totals_groups_categories() {
    let records = mixed_month();
    let totals = category_totals(&records, 2024, 1);
    let food = totals.iter().find(|c| c.category == "Food").unwrap();
    assert_eq!(food.total, dec!(40));
    assert_eq!(totals.len(), 3);
}

#[test]
fn test_category_totals_empty_month() {
    let records = mixed_month();
    assert!(category_totals(&records, 2022, 5).is_empty());
}

// ── monthly_totals ────────────────────────────────────────────

#[test]
fn test_monthly_totals_chronological_across_years() {
    let records = vec![
        rec((2024, 2, 1), "A", dec!(3), ""),
        rec((2023, 11, 1), "A", dec!(1), ""),
        rec((2024, 1, 1), "A", dec!(2), ""),
        rec((2024, 1, 9), "A", dec!(2), ""),
    ];
    let series = monthly_totals(&records);
    let keys: Vec<(i32, u32)> = series.iter().map(|m| (m.year, m.month)).collect();
    assert_eq!(keys, vec![(2023, 11), (2024, 1), (2024, 2)]);
    assert_eq!(series[1].total, dec!(4));
    assert!(series.windows(2).all(|w| w[0].index() < w[1].index()));
}

#[test]
fn test_monthly_totals_does_not_fill_gaps() {
    let records = vec![
        rec((2024, 1, 1), "A", dec!(1), ""),
        rec((2024, 5, 1), "A", dec!(1), ""),
    ];
    assert_eq!(monthly_totals(&records).len(), 2);
}

// ── check_alerts ──────────────────────────────────────────────

#[test]
fn test_check_alerts_scenario() {
    let (records, budgets) = scenario();
    let alerts = check_alerts(&records, &budgets, 2024, 1);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].category, "Food");
    assert_eq!(alerts[0].budget, dec!(700));
    assert_eq!(alerts[0].spent, dec!(800));
    assert_eq!(alerts[0].overspend, dec!(100));

    assert!(check_alerts(&records, &budgets, 2024, 2).is_empty());
}

#[test]
fn test_check_alerts_no_budget_never_alerts() {
    let records = mixed_month();
    let budgets = BudgetMap::new();
    assert!(check_alerts(&records, &budgets, 2024, 1).is_empty());
}

#[test]
fn test_check_alerts_exactly_on_budget_is_fine() {
    let records = vec![rec((2024, 1, 1), "Food", dec!(700), "")];
    let mut budgets = BudgetMap::new();
    budgets.set("Food", dec!(700)).unwrap();
    assert!(check_alerts(&records, &budgets, 2024, 1).is_empty());
}

#[test]
fn test_check_alerts_only_spent_categories() {
    let records = mixed_month();
    let mut budgets = BudgetMap::new();
    budgets.set("Travel", dec!(100)).unwrap();
    budgets.set("Healthcare", dec!(1)).unwrap();
    let alerts = check_alerts(&records, &budgets, 2024, 1);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].category, "Travel");
    assert_eq!(alerts[0].overspend, dec!(20));
}

#[test]
fn test_check_alerts_empty_month() {
    let (records, budgets) = scenario();
    assert!(check_alerts(&records, &budgets, 2030, 1).is_empty());
}

// ── budget_status ─────────────────────────────────────────────

#[test]
fn test_budget_status_includes_unspent_budgets() {
    let records = mixed_month();
    let mut budgets = BudgetMap::new();
    budgets.set("Food", dec!(80)).unwrap();
    budgets.set("Healthcare", dec!(50)).unwrap();
    let status = budget_status(&records, &budgets, 2024, 1);
    assert_eq!(status.len(), 2);

    let food = &status[0];
    assert_eq!(food.category, "Food");
    assert_eq!(food.spent, dec!(40));
    assert_eq!(food.remaining, dec!(40));
    assert!((food.percent_used - 50.0).abs() < 1e-9);

    let health = &status[1];
    assert_eq!(health.spent, Decimal::ZERO);
    assert_eq!(health.remaining, dec!(50));
    assert_eq!(health.percent_used, 0.0);
}

#[test]
fn test_budget_status_overspent_goes_negative() {
    let (records, budgets) = scenario();
    let status = budget_status(&records, &budgets, 2024, 1);
    assert_eq!(status[0].remaining, dec!(-100));
    assert!(status[0].percent_used > 100.0);
}

// ── month_overview ────────────────────────────────────────────

#[test]
fn test_month_overview() {
    let records = mixed_month();
    let overview = month_overview(&records, 2024, 1);
    assert_eq!(overview.total, dec!(220));
    assert_eq!(overview.transactions, 4);
    // Three distinct days with spending
    assert_eq!(overview.average_per_day, dec!(73.33));
    assert_eq!(overview.top_category.as_deref(), Some("Travel"));
    assert_eq!(
        overview.daily_totals,
        vec![
            (ymd(2024, 1, 1), dec!(145.50)),
            (ymd(2024, 1, 14), dec!(60)),
            (ymd(2024, 1, 31), dec!(14.50)),
        ]
    );
}

#[test]
fn test_month_overview_empty() {
    let overview = month_overview(&[], 2024, 1);
    assert_eq!(overview.total, Decimal::ZERO);
    assert_eq!(overview.average_per_day, Decimal::ZERO);
    assert!(overview.top_category.is_none());
}

// ── range_report ──────────────────────────────────────────────

#[test]
fn test_range_report_inclusive_bounds() {
    let records = mixed_month();
    let report = range_report(&records, ymd(2024, 1, 1), ymd(2024, 1, 31));
    assert_eq!(report.transactions, 4);
    assert_eq!(report.total, dec!(220));
    assert_eq!(report.average_expense, dec!(55));
    assert_eq!(report.category_count, 3);
}

#[test]
fn test_range_report_breakdown_sorted_by_total() {
    let records = mixed_month();
    let report = range_report(&records, ymd(2023, 1, 1), ymd(2025, 1, 1));
    let names: Vec<&str> = report.categories.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["Travel", "Food", "Shopping"]);
    let food = &report.categories[1];
    assert_eq!(food.count, 3);
    assert_eq!(food.total, dec!(80));
    assert_eq!(food.average, dec!(26.67));
}

#[test]
fn test_range_report_top_expenses() {
    let records: Vec<ExpenseRecord> = (1..=15)
        .map(|d| rec((2024, 3, d), "Misc", Decimal::from(d), ""))
        .collect();
    let report = range_report(&records, ymd(2024, 3, 1), ymd(2024, 3, 31));
    assert_eq!(report.top_expenses.len(), 10);
    assert_eq!(report.top_expenses[0].amount, dec!(15));
    assert_eq!(report.top_expenses[9].amount, dec!(6));
}

#[test]
fn test_range_report_empty() {
    let report = range_report(&mixed_month(), ymd(2020, 1, 1), ymd(2020, 12, 31));
    assert_eq!(report.transactions, 0);
    assert_eq!(report.average_expense, Decimal::ZERO);
    assert!(report.categories.is_empty());
}
