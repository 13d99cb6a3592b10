pub mod features;
pub mod monthly;
pub mod scaler;

pub use features::{CalendarFeatures, DatedAmount};
pub use monthly::MonthlyAggregate;
pub use scaler::MinMaxScaler;
