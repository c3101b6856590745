use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Storage encodings a dimension can carry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Encodings: u8 {
        /// Values are stored as surrogate keys decoded via a lookup table.
        const DICTIONARY = 0b0000_0001;
        /// Surrogates are computed algorithmically, no lookup table involved.
        const DIRECT_DICTIONARY = 0b0000_0010;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    String,
    Int,
    Long,
    Double,
    Timestamp,
    Array,
    Struct,
}

impl DataType {
    pub fn is_complex(&self) -> bool {
        matches!(self, DataType::Array | DataType::Struct)
    }
}

/// A schema column participating in the packed row key or in a column block.
///
/// `key_ordinal` is `None` for columns that never enter the packed key
/// (complex and non-dictionary columns). A non-columnar dimension always
/// carries a `column_group_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
    /// Stable unique identifier, independent of ordinal. Dictionary lookups
    /// are keyed by this, not by position.
    pub column_id: String,
    pub ordinal: usize,
    pub key_ordinal: Option<usize>,
    pub encodings: Encodings,
    pub columnar: bool,
    pub column_group_id: Option<u32>,
    pub data_type: DataType,
    pub children: Vec<Dimension>,
    /// Index into the segment's per-complex-column value-size table. Set only
    /// on primitive children of complex columns.
    pub complex_type_ordinal: Option<usize>,
}

impl Dimension {
    pub fn has_encoding(&self, encoding: Encodings) -> bool {
        self.encodings.contains(encoding)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_complex(&self) -> bool {
        self.data_type.is_complex()
    }

    /// Total number of descendants, counting nested children transitively.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub name: String,
    pub ordinal: usize,
    pub data_type: DataType,
}

/// Name of the invisible measure inserted when a table defines no measures.
/// `count(*)` must never bind to it.
pub const PLACEHOLDER_MEASURE: &str = "placeholder_measure";
