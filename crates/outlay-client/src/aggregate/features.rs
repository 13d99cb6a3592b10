use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::input::TransactionRecord;
use crate::input::date::{MONTH_FIRST_LABEL, parse_month_first_date};
use crate::{ClientError, ClientResult};

/// Calendar features derived from one transaction's `createdAt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarFeatures {
    pub month: u32,
    /// Monday = 0 .. Sunday = 6. Derived for every row but not aggregated.
    pub day_of_week: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatedAmount {
    pub amount: f64,
    pub features: CalendarFeatures,
}

pub fn calendar_features(date: NaiveDate) -> CalendarFeatures {
    CalendarFeatures {
        month: date.month(),
        day_of_week: date.weekday().num_days_from_monday(),
    }
}

/// Parses every `createdAt` strictly as `MM-DD-YYYY`.
pub fn derive_features(records: &[TransactionRecord]) -> ClientResult<Vec<DatedAmount>> {
    records
        .iter()
        .map(|record| {
            let date = parse_month_first_date(record.created_at.trim()).ok_or_else(|| {
                ClientError::invalid_date(record.row, &record.created_at, MONTH_FIRST_LABEL)
            })?;
            Ok(DatedAmount {
                amount: record.amount,
                features: calendar_features(date),
            })
        })
        .collect()
}
