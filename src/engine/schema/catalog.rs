use rand::{Rng, distributions::Alphanumeric};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::engine::schema::errors::SchemaError;
use crate::engine::schema::types::{Dimension, Measure};

/// Stable identity of a table, used to key dictionary lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableId {
    pub database: String,
    pub table: String,
}

impl TableId {
    pub fn new(database: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            table: table.into(),
        }
    }

    pub fn unique_name(&self) -> String {
        format!("{}_{}", self.database, self.table)
    }
}

/// Resolved schema of one table: dimensions in ordinal order, measures in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    table_id: TableId,
    dimensions: Vec<Dimension>,
    measures: Vec<Measure>,
}

impl TableSchema {
    pub fn new(table_id: TableId, dimensions: Vec<Dimension>, measures: Vec<Measure>) -> Self {
        Self {
            table_id,
            dimensions,
            measures,
        }
    }

    pub fn table_id(&self) -> &TableId {
        &self.table_id
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    pub fn dimension_by_name(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    pub fn measure_by_name(&self, name: &str) -> Option<&Measure> {
        self.measures.iter().find(|m| m.name == name)
    }

    /// Looks up a dimension by its stable column id, descending into complex
    /// children so nested columns resolve too.
    pub fn dimension_by_column_id(&self, column_id: &str) -> Option<&Dimension> {
        fn find<'a>(dimensions: &'a [Dimension], column_id: &str) -> Option<&'a Dimension> {
            for dimension in dimensions {
                if dimension.column_id == column_id {
                    return Some(dimension);
                }
                if let Some(found) = find(&dimension.children, column_id) {
                    return Some(found);
                }
            }
            None
        }
        find(&self.dimensions, column_id)
    }
}

/// Explicit catalog context handed to every resolution call. Lifecycle is
/// owned by the query-compilation step, never process-wide.
#[derive(Debug, Default)]
pub struct TableCatalog {
    tables: HashMap<String, TableSchema>,
}

impl TableCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, schema: TableSchema) -> Result<(), SchemaError> {
        let key = schema.table_id().unique_name();
        if self.tables.contains_key(&key) {
            return Err(SchemaError::AlreadyDefined(key));
        }
        if schema.dimensions().is_empty() && schema.measures().is_empty() {
            return Err(SchemaError::EmptyTable(key));
        }
        self.tables.insert(key, schema);
        Ok(())
    }

    pub fn get(&self, table_id: &TableId) -> Option<&TableSchema> {
        self.tables.get(&table_id.unique_name())
    }
}

/// Generates a fresh stable column id.
pub fn new_column_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}
