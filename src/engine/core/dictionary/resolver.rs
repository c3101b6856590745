use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::engine::core::dictionary::provider::{
    Dictionary, DictionaryColumnId, DictionaryProvider,
};
use crate::engine::core::read::query_model::QueryDimension;
use crate::engine::errors::QueryCompileError;
use crate::engine::schema::catalog::TableSchema;
use crate::engine::schema::types::{Dimension, Encodings};

/// Resolves every dictionary the query needs to decode surrogate keys back
/// into values: qualifying projection dimensions plus the complex dimensions
/// referenced by the filter tree, deduplicated by column id. A column can
/// show up in both the projection and a predicate; it still gets exactly one
/// handle.
pub fn dimension_dictionaries(
    query_dimensions: &[QueryDimension],
    filter_complex_dimensions: &[Dimension],
    table: &TableSchema,
    provider: &dyn DictionaryProvider,
) -> Result<FxHashMap<String, Arc<Dictionary>>, QueryCompileError> {
    // sorted set: deterministic batch order, dedup across projection/filter
    let mut dictionary_column_ids: BTreeSet<String> = BTreeSet::new();
    for query_dimension in query_dimensions {
        let dimension = &query_dimension.dimension;
        if !dimension.has_encoding(Encodings::DICTIONARY)
            || dimension.has_encoding(Encodings::DIRECT_DICTIONARY)
        {
            continue;
        }
        if dimension.child_count() == 0 {
            dictionary_column_ids.insert(dimension.column_id.clone());
        } else {
            child_dictionary_column_ids(dimension, &mut dictionary_column_ids);
        }
    }
    for dimension in filter_complex_dimensions {
        child_dictionary_column_ids(dimension, &mut dictionary_column_ids);
    }

    debug!(
        target: "mdscan::dictionary",
        columns = dictionary_column_ids.len(),
        "Collected dictionary-encoded columns for query"
    );
    let column_ids: Vec<String> = dictionary_column_ids.into_iter().collect();
    dictionary_map(&column_ids, table, provider)
}

/// Collects leaf descendants requiring a stored dictionary. Recursion stops
/// at each nested complex level and re-applies the test per leaf.
fn child_dictionary_column_ids(dimension: &Dimension, column_ids: &mut BTreeSet<String>) {
    for child in &dimension.children {
        if child.child_count() > 0 {
            child_dictionary_column_ids(child, column_ids);
        } else if !child.has_encoding(Encodings::DIRECT_DICTIONARY) {
            column_ids.insert(child.column_id.clone());
        }
    }
}

/// Turns the column-id set into one batch request against the dictionary
/// cache and pairs the returned handles back up with their ids.
fn dictionary_map(
    column_ids: &[String],
    table: &TableSchema,
    provider: &dyn DictionaryProvider,
) -> Result<FxHashMap<String, Arc<Dictionary>>, QueryCompileError> {
    let identifiers = dictionary_column_identifiers(column_ids, table)?;
    let dictionaries = provider.batch_get(&identifiers)?;
    // a short batch means an unresolved column, never something to skip over
    if dictionaries.len() != identifiers.len() {
        return Err(QueryCompileError::DictionaryResolution {
            requested: identifiers.len(),
            returned: dictionaries.len(),
        });
    }
    info!(
        target: "mdscan::dictionary",
        handles = dictionaries.len(),
        "Fetched dictionary handles"
    );
    Ok(column_ids
        .iter()
        .cloned()
        .zip(dictionaries)
        .collect())
}

/// Resolves each column id to its full dictionary identity via the bound
/// table schema.
fn dictionary_column_identifiers(
    column_ids: &[String],
    table: &TableSchema,
) -> Result<Vec<DictionaryColumnId>, QueryCompileError> {
    let mut identifiers = Vec::with_capacity(column_ids.len());
    for column_id in column_ids {
        let dimension = table
            .dimension_by_column_id(column_id)
            .ok_or_else(|| QueryCompileError::SchemaResolution(column_id.clone()))?;
        identifiers.push(DictionaryColumnId {
            table: table.table_id().clone(),
            column_id: dimension.column_id.clone(),
            data_type: dimension.data_type,
        });
    }
    Ok(identifiers)
}
