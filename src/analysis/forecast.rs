//! Next-period spending forecast.
//!
//! Fits an ordinary least-squares line through the monthly totals, using the
//! global month index as the only feature, and evaluates it at the target
//! month.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;
use tracing::debug;

use super::aggregate::monthly_totals;
use crate::models::{from_month_index, month_index, ExpenseRecord};

pub(crate) const MIN_RECORDS: usize = 3;
pub(crate) const MIN_MONTHS: usize = 3;
pub(crate) const PREDICTION_MESSAGE: &str = "Prediction based on historical data";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InsufficientData {
    #[error("Not enough data for prediction")]
    Records,
    #[error("Not enough monthly data for prediction")]
    Months,
}

/// Which month the forecast is for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum ForecastAnchor {
    /// The month after today's month, however stale the data is.
    #[default]
    WallClock,
    /// The month after the most recent month with data.
    LatestData,
}

impl ForecastAnchor {
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "now" | "wall-clock" | "wallclock" | "today" => Some(Self::WallClock),
            "latest" | "latest-data" | "data" => Some(Self::LatestData),
            _ => None,
        }
    }

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::WallClock => "now",
            Self::LatestData => "latest",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Prediction {
    pub(crate) amount: f64,
    pub(crate) year: i32,
    pub(crate) month: u32,
    pub(crate) message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LinearFit {
    pub(crate) slope: f64,
    pub(crate) intercept: f64,
}

impl LinearFit {
    /// Least-squares fit of `y = slope * x + intercept`. `None` with fewer than
    /// two points or when every `x` is equal.
    pub(crate) fn ols(points: &[(f64, f64)]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let n = points.len() as f64;
        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let (sxy, sxx) = points.iter().fold((0.0, 0.0), |(sxy, sxx), (x, y)| {
            let dx = x - mean_x;
            (sxy + dx * (y - mean_y), sxx + dx * dx)
        });
        if sxx == 0.0 {
            return None;
        }

        let slope = sxy / sxx;
        Some(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub(crate) fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Forecast total spend for the month selected by `anchor`, relative to
/// `today`. Negative extrapolations are reported as zero.
pub(crate) fn predict_next_period(
    records: &[ExpenseRecord],
    today: NaiveDate,
    anchor: ForecastAnchor,
) -> Result<Prediction, InsufficientData> {
    if records.len() < MIN_RECORDS {
        return Err(InsufficientData::Records);
    }

    let series = monthly_totals(records);
    if series.len() < MIN_MONTHS {
        return Err(InsufficientData::Months);
    }

    let points: Vec<(f64, f64)> = series
        .iter()
        .map(|m| (m.index() as f64, m.total.to_f64().unwrap_or(0.0)))
        .collect();
    let fit = LinearFit::ols(&points).ok_or(InsufficientData::Months)?;

    let target = match anchor {
        ForecastAnchor::WallClock => month_index(today.year(), today.month()) + 1,
        ForecastAnchor::LatestData => series.last().map(|m| m.index()).unwrap_or_default() + 1,
    };
    let raw = fit.predict(target as f64);
    debug!(
        slope = fit.slope,
        intercept = fit.intercept,
        target,
        raw,
        "Fitted monthly spending trend"
    );

    let (year, month) = from_month_index(target);
    Ok(Prediction {
        amount: raw.max(0.0),
        year,
        month,
        message: PREDICTION_MESSAGE,
    })
}

#[cfg(test)]
#[path = "forecast_tests.rs"]
mod tests;
