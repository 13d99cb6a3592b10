pub mod linalg;
pub mod model;
pub mod policy;
pub mod timeline;
pub mod types;

pub use model::{AdditiveTrendModel, FittedModel};
pub use policy::{FORECAST_POLICY_V1, ForecastPolicy, PREDICTION_LIMIT_IN_MONTHS};
pub use types::{ForecastPoint, ForecastRow, TimeSeriesPoint};
