pub mod aggregate;
pub mod commands;
pub mod contracts;
pub mod error;
pub mod forecast;
pub mod input;

pub use contracts::envelope::FailureEnvelope;
pub use contracts::types::{DEFAULT_METHOD, PredictSummary, PredictionMethod, PredictionOutput};
pub use error::{ClientError, ClientResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
