pub mod error;
pub mod table;

pub use error::CategoryError;
pub use table::{CategoryRecord, CategoryTable};
