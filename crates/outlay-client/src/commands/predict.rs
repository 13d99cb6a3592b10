use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::commands::{aggregate, forecast};
use crate::contracts::envelope::render_output_json;
use crate::contracts::types::{PredictSummary, PredictionMethod, PredictionOutput};
use crate::forecast::ForecastRow;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct PredictRequest {
    pub method: PredictionMethod,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

/// Runs the selected pipeline and writes its JSON body to `output_path`.
///
/// On error nothing is written.
pub fn run(request: &PredictRequest) -> ClientResult<PredictSummary> {
    debug!(
        method = %request.method,
        input = %request.input_path.display(),
        output = %request.output_path.display(),
        "starting prediction run"
    );

    let output = compute(request.method, &request.input_path)?;
    let body = render_output_json(&output)?;
    write_output(&request.output_path, &body)?;

    info!(
        method = %request.method,
        rows = output.len(),
        output = %request.output_path.display(),
        "predictions written"
    );

    Ok(PredictSummary {
        method: request.method,
        rows_written: output.len(),
        output_path: request.output_path.display().to_string(),
    })
}

pub fn compute(method: PredictionMethod, input_path: &Path) -> ClientResult<PredictionOutput> {
    match method {
        PredictionMethod::Trend => {
            let points = forecast::predict_with_trend_model(input_path)?;
            Ok(PredictionOutput::Forecast(
                points.iter().map(ForecastRow::from).collect(),
            ))
        }
        PredictionMethod::Aggregate => {
            let aggregation = aggregate::preprocess(input_path)?;
            Ok(PredictionOutput::Normalized(aggregation.normalized_amounts()))
        }
    }
}

fn write_output(path: &Path, body: &str) -> ClientResult<()> {
    fs::write(path, body).map_err(|error| ClientError::output_write_failed(path, &error.to_string()))
}
