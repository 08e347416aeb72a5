mod budget;
mod expense;
mod summary;

pub(crate) use budget::BudgetMap;
pub(crate) use expense::ExpenseRecord;
pub(crate) use summary::{
    from_month_index, month_index, BudgetAlert, BudgetStatus, CategoryShare, CategoryTotal,
    MonthlyTotal,
};
