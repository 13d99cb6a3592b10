use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::forecast::ForecastRow;

/// Which pipeline a prediction run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMethod {
    /// Additive trend/seasonality forecast.
    Trend,
    /// Monthly totals, min-max normalized. Fallback stub.
    Aggregate,
}

pub const DEFAULT_METHOD: PredictionMethod = PredictionMethod::Trend;

impl PredictionMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trend => "trend",
            Self::Aggregate => "aggregate",
        }
    }
}

impl fmt::Display for PredictionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PredictionMethod {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "trend" | "prophet" => Ok(Self::Trend),
            "aggregate" => Ok(Self::Aggregate),
            _ => Err("method must be one of: trend, aggregate".to_string()),
        }
    }
}

/// Body written to the output file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionOutput {
    Forecast(Vec<ForecastRow>),
    Normalized(Vec<f64>),
}

impl PredictionOutput {
    pub fn len(&self) -> usize {
        match self {
            Self::Forecast(rows) => rows.len(),
            Self::Normalized(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictSummary {
    pub method: PredictionMethod,
    pub rows_written: usize,
    pub output_path: String,
}
