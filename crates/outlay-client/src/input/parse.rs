use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::commands::common::{AMOUNT_FIELD, CREATED_AT_FIELD};
use crate::{ClientError, ClientResult};

/// One CSV row. `created_at` stays raw: each pipeline parses it its own way.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub row: usize,
    pub created_at: String,
    pub amount: f64,
}

/// Loads every row of `path`, failing when any of `required` is absent from
/// the header. Other columns are ignored.
pub fn load_transactions(path: &Path, required: &[&str]) -> ClientResult<Vec<TransactionRecord>> {
    let content = fs::read_to_string(path)
        .map_err(|error| ClientError::input_unreadable(path, &error.to_string()))?;
    let records = parse_csv(&content, required)?;
    if records.is_empty() {
        return Err(ClientError::empty_input(path));
    }
    debug!(
        path = %path.display(),
        rows = records.len(),
        "loaded transaction rows"
    );
    Ok(records)
}

pub(crate) fn parse_csv(content: &str, required: &[&str]) -> ClientResult<Vec<TransactionRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|error| ClientError::csv_malformed(&error.to_string()))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    if required
        .iter()
        .any(|name| !headers.iter().any(|header| header == name))
    {
        return Err(ClientError::csv_schema_mismatch(
            required.iter().map(|name| name.to_string()).collect(),
            headers,
        ));
    }

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.to_string(), index))
        .collect::<HashMap<String, usize>>();

    let mut rows = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let record = result_row.map_err(|error| ClientError::csv_malformed(&error.to_string()))?;
        let row = row_index + 1;

        let raw_amount = value_for(&record, &index_by_name, AMOUNT_FIELD);
        let amount = raw_amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| ClientError::invalid_amount(row, &raw_amount))?;

        rows.push(TransactionRecord {
            row,
            created_at: value_for(&record, &index_by_name, CREATED_AT_FIELD),
            amount,
        });
    }

    Ok(rows)
}

fn value_for(
    record: &csv::StringRecord,
    index_by_name: &HashMap<String, usize>,
    field_name: &str,
) -> String {
    index_by_name
        .get(field_name)
        .and_then(|index| record.get(*index))
        .unwrap_or_default()
        .to_string()
}
