pub mod block;
pub mod complex;
pub mod dictionary;
pub mod filter;
pub mod group;
pub mod key;
pub mod read;
pub mod segment;

pub use key::codec::{BitPackedKeyGenerator, KeyGenerator};
pub use key::structure::KeyStructureInfo;
pub use read::query_model::{QueryDimension, QueryMeasure, QueryModel, QueryRequest};
pub use segment::properties::SegmentProperties;
