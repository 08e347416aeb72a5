mod aggregate;
mod alerts;
pub(crate) mod forecast;
pub(crate) mod insights;
mod report;

pub(crate) use aggregate::{category_totals, monthly_summary, monthly_totals};
pub(crate) use alerts::{budget_status, check_alerts};
pub(crate) use forecast::{predict_next_period, ForecastAnchor, InsufficientData, Prediction};
pub(crate) use insights::{analyze, Insights};
pub(crate) use report::{month_overview, range_report, MonthOverview, RangeReport};

#[cfg(test)]
mod tests;
