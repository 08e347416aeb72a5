//! Qualitative spending insights: trend direction, top categories,
//! recommendations and month-to-month consistency.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::aggregate::{category_totals_all, monthly_totals, total_amount};
use super::alerts::percent_of;
use crate::models::{CategoryShare, ExpenseRecord, MonthlyTotal};

/// Months averaged as "recent" when computing the trend.
pub(crate) const RECENT_MONTHS: usize = 3;
pub(crate) const TREND_THRESHOLD_PERCENT: f64 = 10.0;
pub(crate) const TOP_CATEGORIES: usize = 3;
pub(crate) const SMALL_EXPENSE_LIMIT: Decimal = Decimal::ONE_HUNDRED;
/// More than this many small expenses triggers a recommendation.
pub(crate) const SMALL_EXPENSE_COUNT: usize = 10;
pub(crate) const CONSISTENCY_CV_LIMIT: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Trend {
    pub(crate) direction: TrendDirection,
    /// `None` when the baseline month average is zero.
    pub(crate) change_percent: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Consistency {
    pub(crate) cv: f64,
    pub(crate) consistent: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Recommendation {
    FocusCategory { category: String, total: Decimal },
    SmallExpenses { count: usize, total: Decimal },
    InconsistentSpending,
    ConsistentSpending,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FocusCategory { category, total } => write!(
                f,
                "Focus on {category}: you've spent {total:.2} in this category. \
                 Consider setting a budget or finding ways to reduce costs."
            ),
            Self::SmallExpenses { count, total } => write!(
                f,
                "Small expenses add up: you have {count} small expenses totaling {total:.2}. \
                 Consider tracking these more carefully."
            ),
            Self::InconsistentSpending => write!(
                f,
                "Inconsistent spending: your monthly spending varies significantly. \
                 Try to maintain more consistent spending patterns."
            ),
            Self::ConsistentSpending => write!(
                f,
                "Consistent spending: great job maintaining consistent monthly spending patterns!"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Insights {
    pub(crate) trend: Option<Trend>,
    pub(crate) top_categories: Vec<CategoryShare>,
    pub(crate) consistency: Option<Consistency>,
    pub(crate) recommendations: Vec<Recommendation>,
}

/// Compute every insight from scratch over `records`.
pub(crate) fn analyze(records: &[ExpenseRecord]) -> Insights {
    let series = monthly_totals(records);
    let ranking = top_categories(records, TOP_CATEGORIES);
    let consistency = spending_consistency(&series);

    let mut recommendations = Vec::new();
    if let Some(top) = ranking.first() {
        recommendations.push(Recommendation::FocusCategory {
            category: top.category.clone(),
            total: top.total,
        });
    }
    if let Some(small) = small_expenses(records) {
        recommendations.push(small);
    }
    match consistency {
        Some(c) if c.consistent => recommendations.push(Recommendation::ConsistentSpending),
        Some(_) => recommendations.push(Recommendation::InconsistentSpending),
        None => {}
    }

    Insights {
        trend: spending_trend(&series),
        top_categories: ranking,
        consistency,
        recommendations,
    }
}

/// Compare the last three months against the months before them.
pub(crate) fn spending_trend(series: &[MonthlyTotal]) -> Option<Trend> {
    if series.len() < 2 {
        return None;
    }
    let totals = as_f64(series);

    let split = totals.len().saturating_sub(RECENT_MONTHS);
    let recent = mean(&totals[split..])?;
    let previous = if totals.len() > RECENT_MONTHS {
        mean(&totals[..split])?
    } else {
        totals[0]
    };

    if previous == 0.0 {
        return Some(Trend {
            direction: TrendDirection::Stable,
            change_percent: None,
        });
    }

    let change = (recent - previous) / previous * 100.0;
    let direction = if change > TREND_THRESHOLD_PERCENT {
        TrendDirection::Increasing
    } else if change < -TREND_THRESHOLD_PERCENT {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };
    Some(Trend {
        direction,
        change_percent: Some(change),
    })
}

/// Highest-spending categories with their share of all spending.
pub(crate) fn top_categories(records: &[ExpenseRecord], n: usize) -> Vec<CategoryShare> {
    let mut totals = category_totals_all(records);
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    let grand_total = total_amount(records);
    totals
        .into_iter()
        .take(n)
        .map(|ct| CategoryShare {
            share_percent: percent_of(ct.total, grand_total),
            category: ct.category,
            total: ct.total,
        })
        .collect()
}

fn small_expenses(records: &[ExpenseRecord]) -> Option<Recommendation> {
    let small: Vec<&ExpenseRecord> = records
        .iter()
        .filter(|r| r.amount < SMALL_EXPENSE_LIMIT)
        .collect();
    (small.len() > SMALL_EXPENSE_COUNT).then(|| Recommendation::SmallExpenses {
        count: small.len(),
        total: total_amount(small.iter().copied()),
    })
}

/// Coefficient of variation across monthly totals (sample standard deviation).
pub(crate) fn spending_consistency(series: &[MonthlyTotal]) -> Option<Consistency> {
    if series.len() < 3 {
        return None;
    }
    let totals = as_f64(series);
    let avg = mean(&totals)?;
    if avg == 0.0 {
        return None;
    }
    let cv = sample_std_dev(&totals, avg) / avg;
    Some(Consistency {
        cv,
        consistent: cv <= CONSISTENCY_CV_LIMIT,
    })
}

fn as_f64(series: &[MonthlyTotal]) -> Vec<f64> {
    series
        .iter()
        .map(|m| m.total.to_f64().unwrap_or(0.0))
        .collect()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

#[cfg(test)]
#[path = "insights_tests.rs"]
mod tests;
