use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::aggregate::features::derive_features;
use crate::aggregate::monthly::{normalize_totals, sum_by_month};
use crate::aggregate::{CalendarFeatures, MinMaxScaler, MonthlyAggregate};
use crate::commands::common::AGGREGATE_INPUT_FIELDS;
use crate::input::{load_transactions, validate_file};
use crate::{ClientError, ClientResult};

/// Result of the aggregation pipeline. Only `monthly[].amount_normalized`
/// reaches the output file; the scaler and per-row features are returned for
/// callers that want to reuse them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationOutput {
    pub monthly: Vec<MonthlyAggregate>,
    pub scaler: MinMaxScaler,
    pub calendar_features: Vec<CalendarFeatures>,
}

impl AggregationOutput {
    pub fn normalized_amounts(&self) -> Vec<f64> {
        self.monthly
            .iter()
            .map(|row| row.amount_normalized)
            .collect()
    }
}

pub fn preprocess(path: &Path) -> ClientResult<AggregationOutput> {
    validate_file(path)?;
    let records = load_transactions(path, &AGGREGATE_INPUT_FIELDS)?;
    let dated = derive_features(&records)?;

    let totals = sum_by_month(&dated);
    let (monthly, scaler) = normalize_totals(&totals).ok_or_else(|| {
        ClientError::model_fit_failed("no monthly totals to scale")
    })?;

    info!(
        rows = records.len(),
        months = monthly.len(),
        data_min = scaler.data_min,
        data_max = scaler.data_max,
        "monthly aggregation complete"
    );

    Ok(AggregationOutput {
        monthly,
        scaler,
        calendar_features: dated.iter().map(|row| row.features).collect(),
    })
}
