use std::path::Path;

use tracing::info;

use crate::commands::common::TREND_INPUT_FIELDS;
use crate::forecast::timeline::month_end_timeline;
use crate::forecast::{
    AdditiveTrendModel, FORECAST_POLICY_V1, ForecastPoint,
    PREDICTION_LIMIT_IN_MONTHS, TimeSeriesPoint,
};
use crate::input::date::{LENIENT_LABEL, parse_lenient_timestamp};
use crate::input::{TransactionRecord, load_transactions, validate_file};
use crate::{ClientError, ClientResult};

/// Forecasts the next `PREDICTION_LIMIT_IN_MONTHS` month ends from the
/// transactions in `path`.
pub fn predict_with_trend_model(path: &Path) -> ClientResult<Vec<ForecastPoint>> {
    validate_file(path)?;
    let records = load_transactions(path, &TREND_INPUT_FIELDS)?;
    let series = to_time_series(&records)?;

    let model = AdditiveTrendModel::new(FORECAST_POLICY_V1).fit(&series)?;
    let future = month_end_timeline(model.last_timestamp(), PREDICTION_LIMIT_IN_MONTHS);
    let points = model.predict(&future)?;

    info!(
        rows = records.len(),
        periods = points.len(),
        "trend forecast complete"
    );
    Ok(points)
}

/// Reshapes each record into `(timestamp, value)`.
pub fn to_time_series(records: &[TransactionRecord]) -> ClientResult<Vec<TimeSeriesPoint>> {
    records
        .iter()
        .map(|record| {
            let timestamp = parse_lenient_timestamp(&record.created_at).ok_or_else(|| {
                ClientError::invalid_date(record.row, &record.created_at, LENIENT_LABEL)
            })?;
            Ok(TimeSeriesPoint {
                timestamp,
                value: record.amount,
            })
        })
        .collect()
}
