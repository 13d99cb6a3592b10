pub mod date;
pub mod parse;
pub mod validate;

pub use parse::{TransactionRecord, load_transactions};
pub use validate::validate_file;
