pub mod catalog;
pub mod errors;
pub mod types;

pub use catalog::{TableCatalog, TableId, TableSchema};
pub use types::{DataType, Dimension, Encodings, Measure};
