use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Table already defined: {0}")]
    AlreadyDefined(String),

    #[error("Table has no columns: {0}")]
    EmptyTable(String),

    #[error("Unknown table: {0}")]
    UnknownTable(String),
}
