use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::engine::schema::catalog::TableId;
use crate::engine::schema::types::DataType;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("Dictionary store access failed: {0}")]
    Store(String),

    #[error("No dictionary registered for column {0}")]
    MissingColumn(String),
}

/// Identity of one dictionary: stable table identity, stable column id and
/// the column's data type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DictionaryColumnId {
    pub table: TableId,
    pub column_id: String,
    pub data_type: DataType,
}

/// Decoded surrogate-key lookup table for one column. Surrogate keys are
/// 1-based; 0 never maps to a member.
#[derive(Debug, Default, Clone)]
pub struct Dictionary {
    values: Vec<String>,
    surrogates: FxHashMap<String, usize>,
}

impl Dictionary {
    pub fn from_values(values: Vec<String>) -> Self {
        let surrogates = values
            .iter()
            .enumerate()
            .map(|(index, value)| (value.clone(), index + 1))
            .collect();
        Self { values, surrogates }
    }

    pub fn value_of(&self, surrogate: usize) -> Option<&str> {
        if surrogate == 0 {
            return None;
        }
        self.values.get(surrogate - 1).map(String::as_str)
    }

    pub fn surrogate_of(&self, value: &str) -> Option<usize> {
        self.surrogates.get(value).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Batch access to dictionary handles. `batch_get` may hit backing storage
/// on a cache miss and must return one handle per identifier, in request
/// order.
pub trait DictionaryProvider: Send + Sync {
    fn batch_get(
        &self,
        identifiers: &[DictionaryColumnId],
    ) -> Result<Vec<Arc<Dictionary>>, DictionaryError>;
}

/// In-process provider backed by a plain map; the registry owns its own
/// synchronization so the addressing core stays free of shared state.
#[derive(Default)]
pub struct InMemoryDictionaryProvider {
    dictionaries: RwLock<FxHashMap<DictionaryColumnId, Arc<Dictionary>>>,
}

impl InMemoryDictionaryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, identifier: DictionaryColumnId, dictionary: Dictionary) {
        self.dictionaries
            .write()
            .insert(identifier, Arc::new(dictionary));
    }
}

impl DictionaryProvider for InMemoryDictionaryProvider {
    fn batch_get(
        &self,
        identifiers: &[DictionaryColumnId],
    ) -> Result<Vec<Arc<Dictionary>>, DictionaryError> {
        let dictionaries = self.dictionaries.read();
        identifiers
            .iter()
            .map(|identifier| {
                dictionaries
                    .get(identifier)
                    .cloned()
                    .ok_or_else(|| DictionaryError::MissingColumn(identifier.column_id.clone()))
            })
            .collect()
    }
}
