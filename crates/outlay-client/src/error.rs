use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

pub(crate) const INPUT_HELP_COMMAND: &str = "outlay predict --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::new(
            "invalid_argument",
            message,
            vec![format!("Run `{INPUT_HELP_COMMAND}` for usage.")],
        )
    }

    pub fn missing_salt(variable: &str) -> Self {
        Self::new(
            "missing_salt",
            "Expected a random salt for dumping predictions",
            vec![format!(
                "Set `{variable}` to a unique token, or pass both --input and --output."
            )],
        )
        .with_data(json!({
            "variable": variable,
        }))
    }

    pub fn file_not_found(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "file_not_found",
            &format!("File not found: {location}"),
            vec![
                "Verify the path exists and is readable.".to_string(),
                "Make sure the producer wrote the CSV before starting the job.".to_string(),
            ],
        )
        .with_data(json!({
            "path": location,
        }))
    }

    pub fn input_unreadable(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "csv_malformed",
            &format!("Could not read input file `{location}`: {detail}"),
            vec!["Verify the path is a readable UTF-8 CSV file.".to_string()],
        )
    }

    pub fn empty_input(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "empty_input",
            &format!("Input file `{location}` has no transaction rows."),
            vec!["Provide a header row followed by at least one transaction row.".to_string()],
        )
    }

    pub fn csv_malformed(detail: &str) -> Self {
        Self::new(
            "csv_malformed",
            &format!("CSV rows are malformed: {detail}"),
            vec![
                "Check that every row has the same number of fields as the header.".to_string(),
                format!("Run `{INPUT_HELP_COMMAND}` to review the input format."),
            ],
        )
    }

    pub fn csv_schema_mismatch(required_headers: Vec<String>, actual_headers: Vec<String>) -> Self {
        let missing = required_headers
            .iter()
            .filter(|required| !actual_headers.contains(required))
            .cloned()
            .collect::<Vec<String>>();
        Self::new(
            "csv_schema_mismatch",
            &format!(
                "CSV headers are missing required columns: {}.",
                missing.join(", ")
            ),
            vec![
                "Header names are case-sensitive.".to_string(),
                format!("Run `{INPUT_HELP_COMMAND}` to review required columns."),
            ],
        )
        .with_data(json!({
            "required_headers": required_headers,
            "actual_headers": actual_headers,
            "missing_headers": missing,
        }))
    }

    pub fn invalid_date(row: usize, value: &str, expected: &str) -> Self {
        Self::new(
            "invalid_date",
            &format!("Row {row}: `createdAt` value `{value}` does not match {expected}."),
            vec![format!("Write `createdAt` as {expected}.")],
        )
        .with_data(json!({
            "row": row,
            "value": value,
        }))
    }

    pub fn invalid_amount(row: usize, value: &str) -> Self {
        Self::new(
            "invalid_amount",
            &format!("Row {row}: `amount` value `{value}` is not a number."),
            vec!["Write `amount` as a plain signed decimal, for example `-42.15`.".to_string()],
        )
        .with_data(json!({
            "row": row,
            "value": value,
        }))
    }

    pub fn insufficient_history(required: usize, actual: usize) -> Self {
        Self::new(
            "insufficient_history",
            &format!(
                "Dataframe has less than {required} distinct timestamps (found {actual}); cannot fit the trend model."
            ),
            vec!["Collect transactions on at least two different dates before forecasting.".to_string()],
        )
        .with_data(json!({
            "required": required,
            "actual": actual,
        }))
    }

    pub fn model_fit_failed(detail: &str) -> Self {
        Self::new(
            "model_fit_failed",
            &format!("Trend model fitting failed: {detail}"),
            vec!["Check the input for degenerate or non-finite values.".to_string()],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn output_write_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "output_write_failed",
            &format!("Could not write predictions to `{location}`: {detail}"),
            vec![format!("Grant write access to `{location}` or choose another --output path.")],
        )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
