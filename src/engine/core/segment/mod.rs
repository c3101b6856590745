pub mod properties;

pub use properties::SegmentProperties;
