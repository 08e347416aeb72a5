#![allow(clippy::unwrap_used)]

use super::*;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn rec(y: i32, m: u32, d: u32, category: &str, amount: Decimal) -> ExpenseRecord {
    ExpenseRecord::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), category, amount, "").unwrap()
}

fn series(totals: &[Decimal]) -> Vec<MonthlyTotal> {
    totals
        .iter()
        .enumerate()
        .map(|(i, t)| MonthlyTotal {
            year: 2024,
            month: i as u32 + 1,
            total: *t,
        })
        .collect()
}

// ── spending_trend ────────────────────────────────────────────

#[test]
fn test_trend_needs_two_months() {
    assert!(spending_trend(&[]).is_none());
    assert!(spending_trend(&series(&[dec!(100)])).is_none());
}

#[test]
fn test_trend_two_months_uses_first_as_baseline() {
    // recent = mean(100, 150) = 125, previous = 100
    let trend = spending_trend(&series(&[dec!(100), dec!(150)])).unwrap();
    assert_eq!(trend.direction, TrendDirection::Increasing);
    assert!((trend.change_percent.unwrap() - 25.0).abs() < 1e-9);
}

#[test]
fn test_trend_three_months_uses_first_as_baseline() {
    // recent = mean(100, 95, 102) = 99, previous = 100
    let trend = spending_trend(&series(&[dec!(100), dec!(95), dec!(102)])).unwrap();
    assert_eq!(trend.direction, TrendDirection::Stable);
    assert!((trend.change_percent.unwrap() + 1.0).abs() < 1e-9);
}

#[test]
fn test_trend_excludes_last_three_from_baseline() {
    // previous = mean(1000, 1000) = 1000, recent = mean(500, 600, 700) = 600
    let trend = spending_trend(&series(&[
        dec!(1000),
        dec!(1000),
        dec!(500),
        dec!(600),
        dec!(700),
    ]))
    .unwrap();
    assert_eq!(trend.direction, TrendDirection::Decreasing);
    assert!((trend.change_percent.unwrap() + 40.0).abs() < 1e-9);
}

#[test]
fn test_trend_small_change_is_stable() {
    let trend = spending_trend(&series(&[dec!(100), dec!(105), dec!(105), dec!(105)])).unwrap();
    assert_eq!(trend.direction, TrendDirection::Stable);
}

#[test]
fn test_trend_zero_baseline_is_guarded() {
    let trend = spending_trend(&series(&[Decimal::ZERO, dec!(50)])).unwrap();
    assert_eq!(trend.direction, TrendDirection::Stable);
    assert!(trend.change_percent.is_none());
}

// ── top_categories ────────────────────────────────────────────

#[test]
fn test_top_categories_ranked_with_shares() {
    let records = vec![
        rec(2024, 1, 1, "Food", dec!(400)),
        rec(2024, 1, 2, "Travel", dec!(300)),
        rec(2024, 2, 1, "Food", dec!(100)),
        rec(2024, 2, 2, "Shopping", dec!(150)),
        rec(2024, 2, 3, "Other", dec!(50)),
    ];
    let top = top_categories(&records, 3);
    let names: Vec<&str> = top.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["Food", "Travel", "Shopping"]);
    assert_eq!(top[0].total, dec!(500));
    assert!((top[0].share_percent - 50.0).abs() < 1e-9);
    assert!((top[1].share_percent - 30.0).abs() < 1e-9);
    assert!((top[2].share_percent - 15.0).abs() < 1e-9);
}

#[test]
fn test_top_categories_fewer_than_requested() {
    let records = vec![rec(2024, 1, 1, "Food", dec!(10))];
    let top = top_categories(&records, 3);
    assert_eq!(top.len(), 1);
    assert!((top[0].share_percent - 100.0).abs() < 1e-9);
    assert!(top_categories(&[], 3).is_empty());
}

// ── spending_consistency ──────────────────────────────────────

#[test]
fn test_consistency_needs_three_months() {
    assert!(spending_consistency(&series(&[dec!(1), dec!(2)])).is_none());
}

#[test]
fn test_consistency_steady() {
    let c = spending_consistency(&series(&[dec!(1000), dec!(1050), dec!(950)])).unwrap();
    // sample std dev 50, mean 1000
    assert!((c.cv - 0.05).abs() < 1e-9);
    assert!(c.consistent);
}

#[test]
fn test_consistency_volatile() {
    let c = spending_consistency(&series(&[dec!(100), dec!(1000), dec!(400)])).unwrap();
    assert!(c.cv > CONSISTENCY_CV_LIMIT);
    assert!(!c.consistent);
}

// ── analyze ───────────────────────────────────────────────────

#[test]
fn test_analyze_empty() {
    let insights = analyze(&[]);
    assert!(insights.trend.is_none());
    assert!(insights.top_categories.is_empty());
    assert!(insights.consistency.is_none());
    assert!(insights.recommendations.is_empty());
}

#[test]
fn test_analyze_focus_category_always_first() {
    let records = vec![
        rec(2024, 1, 1, "Food", dec!(400)),
        rec(2024, 1, 2, "Travel", dec!(900)),
    ];
    let insights = analyze(&records);
    assert_eq!(
        insights.recommendations,
        vec![Recommendation::FocusCategory {
            category: "Travel".into(),
            total: dec!(900),
        }]
    );
}

#[test]
fn test_analyze_small_expenses_need_more_than_ten() {
    let ten: Vec<ExpenseRecord> = (1..=10)
        .map(|d| rec(2024, 1, d, "Coffee", dec!(5)))
        .collect();
    let insights = analyze(&ten);
    assert!(!insights
        .recommendations
        .iter()
        .any(|r| matches!(r, Recommendation::SmallExpenses { .. })));

    let mut eleven = ten;
    eleven.push(rec(2024, 1, 11, "Coffee", dec!(99.99)));
    eleven.push(rec(2024, 1, 12, "Rent", dec!(100)));
    let insights = analyze(&eleven);
    assert!(insights.recommendations.contains(&Recommendation::SmallExpenses {
        count: 11,
        total: dec!(149.99),
    }));
}

#[test]
fn test_analyze_full_picture() {
    let records = vec![
        rec(2024, 1, 3, "Food", dec!(1000)),
        rec(2024, 2, 3, "Food", dec!(1000)),
        rec(2024, 3, 3, "Food", dec!(1000)),
        rec(2024, 4, 3, "Travel", dec!(1500)),
    ];
    let insights = analyze(&records);

    let trend = insights.trend.unwrap();
    // recent = mean(1000, 1000, 1500), previous = 1000
    assert_eq!(trend.direction, TrendDirection::Increasing);
    assert_eq!(insights.top_categories[0].category, "Food");
    assert!(insights.consistency.unwrap().consistent);
    assert_eq!(
        insights.recommendations.last(),
        Some(&Recommendation::ConsistentSpending)
    );
}

#[test]
fn test_recommendation_text() {
    let focus = Recommendation::FocusCategory {
        category: "Food & Dining".into(),
        total: dec!(1234.5),
    };
    assert!(focus.to_string().starts_with("Focus on Food & Dining: you've spent 1234.50"));

    let small = Recommendation::SmallExpenses {
        count: 12,
        total: dec!(300),
    };
    assert!(small.to_string().contains("12 small expenses totaling 300.00"));
}
