use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::input::date::format_iso_date;

/// Canonical `(timestamp, value)` shape the trend model fits against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSeriesPoint {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
}

/// Positional wire form: `[yhat, yhat_lower, yhat_upper, "YYYY-MM-DD"]`.
///
/// Downstream consumers index into this array, so field order is fixed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow(pub f64, pub f64, pub f64, pub String);

impl From<&ForecastPoint> for ForecastRow {
    fn from(point: &ForecastPoint) -> Self {
        ForecastRow(
            point.yhat,
            point.yhat_lower,
            point.yhat_upper,
            format_iso_date(&point.date),
        )
    }
}
