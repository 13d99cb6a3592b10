pub mod aggregate;
pub mod common;
pub mod forecast;
pub mod predict;
