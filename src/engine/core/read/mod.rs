pub mod addressing;
pub mod aggregate;
pub mod binder;
pub mod query_model;

pub use addressing::ScanAddressing;
pub use binder::resolve_query_model;

#[cfg(test)]
mod aggregate_test;
