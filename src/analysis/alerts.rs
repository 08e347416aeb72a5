use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::aggregate::{category_totals, monthly_summary, total_amount};
use crate::models::{BudgetAlert, BudgetMap, BudgetStatus, ExpenseRecord};

/// Categories whose spend in the month exceeds a configured, positive budget.
pub(crate) fn check_alerts(
    records: &[ExpenseRecord],
    budgets: &BudgetMap,
    year: i32,
    month: u32,
) -> Vec<BudgetAlert> {
    category_totals(records, year, month)
        .into_iter()
        .filter_map(|ct| {
            let budget = budgets.limit_for(&ct.category);
            (budget > Decimal::ZERO && ct.total > budget).then(|| BudgetAlert {
                overspend: ct.total - budget,
                category: ct.category,
                budget,
                spent: ct.total,
            })
        })
        .collect()
}

/// Budget vs actual for every configured budget, including untouched ones.
pub(crate) fn budget_status(
    records: &[ExpenseRecord],
    budgets: &BudgetMap,
    year: i32,
    month: u32,
) -> Vec<BudgetStatus> {
    let month_records = monthly_summary(records, year, month);
    budgets
        .iter()
        .map(|(category, budget)| {
            let spent = total_amount(
                month_records
                    .iter()
                    .copied()
                    .filter(|r| r.category == category),
            );
            BudgetStatus {
                category: category.to_string(),
                budget,
                spent,
                remaining: budget - spent,
                percent_used: percent_of(spent, budget),
            }
        })
        .collect()
}

/// `part / whole * 100`, or 0 when `whole` is not positive.
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> f64 {
    if whole <= Decimal::ZERO {
        return 0.0;
    }
    (part / whole * Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0)
}
