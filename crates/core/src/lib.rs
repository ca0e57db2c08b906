pub mod record;
pub mod statement;

pub use record::{TransactionRecord, BROUGHT_FORWARD, DEFAULT_COLUMNS};
pub use statement::ParsedStatement;
