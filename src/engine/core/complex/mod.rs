pub mod builder;
pub mod query_type;

pub use query_type::GenericQueryType;
