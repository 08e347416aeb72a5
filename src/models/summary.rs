use rust_decimal::Decimal;

/// `year * 12 + month`. Strictly increasing across year boundaries.
pub(crate) fn month_index(year: i32, month: u32) -> i64 {
    i64::from(year) * 12 + i64::from(month)
}

/// Inverse of [`month_index`].
pub(crate) fn from_month_index(index: i64) -> (i32, u32) {
    let zero_based = index - 1;
    let year = zero_based.div_euclid(12) as i32;
    let month = zero_based.rem_euclid(12) as u32 + 1;
    (year, month)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthlyTotal {
    pub(crate) year: i32,
    pub(crate) month: u32,
    pub(crate) total: Decimal,
}

impl MonthlyTotal {
    pub(crate) fn index(&self) -> i64 {
        month_index(self.year, self.month)
    }

    pub(crate) fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryTotal {
    pub(crate) category: String,
    pub(crate) total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BudgetAlert {
    pub(crate) category: String,
    pub(crate) budget: Decimal,
    pub(crate) spent: Decimal,
    pub(crate) overspend: Decimal,
}

/// Budget vs actual for one configured budget.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BudgetStatus {
    pub(crate) category: String,
    pub(crate) budget: Decimal,
    pub(crate) spent: Decimal,
    pub(crate) remaining: Decimal,
    pub(crate) percent_used: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryShare {
    pub(crate) category: String,
    pub(crate) total: Decimal,
    pub(crate) share_percent: f64,
}
