use tracing::{debug, info};

use crate::engine::core::read::query_model::{
    QueryDimension, QueryMeasure, QueryModel, QueryRequest,
};
use crate::engine::errors::QueryCompileError;
use crate::engine::schema::catalog::TableCatalog;
use crate::engine::schema::types::{Measure, PLACEHOLDER_MEASURE};

/// Pseudo-measure name used by count queries; carries no real column.
pub const COUNT_STAR: &str = "count(*)";

/// Binds a logical request (plain column names) to resolved schema objects.
/// The catalog is an explicit context owned by the compilation step. An
/// unresolvable name fails the whole query; there is no partial binding.
pub fn resolve_query_model(
    request: &QueryRequest,
    catalog: &TableCatalog,
) -> Result<QueryModel, QueryCompileError> {
    let table = catalog
        .get(&request.table)
        .ok_or_else(|| QueryCompileError::SchemaResolution(request.table.unique_name()))?;

    let mut dimensions = Vec::with_capacity(request.dimension_names.len());
    for name in &request.dimension_names {
        let dimension = table
            .dimension_by_name(name)
            .ok_or_else(|| QueryCompileError::SchemaResolution(name.clone()))?;
        dimensions.push(QueryDimension {
            column_name: name.clone(),
            dimension: dimension.clone(),
        });
    }

    let mut sort_dimensions = Vec::with_capacity(request.sort_dimension_names.len());
    for name in &request.sort_dimension_names {
        let dimension = table
            .dimension_by_name(name)
            .ok_or_else(|| QueryCompileError::SchemaResolution(name.clone()))?;
        sort_dimensions.push(QueryDimension {
            column_name: name.clone(),
            dimension: dimension.clone(),
        });
    }

    let mut measures = Vec::with_capacity(request.measure_names.len());
    for name in &request.measure_names {
        let measure = if name == COUNT_STAR {
            resolve_count_star(table)
        } else {
            table
                .measure_by_name(name)
                .cloned()
                .ok_or_else(|| QueryCompileError::SchemaResolution(name.clone()))?
        };
        measures.push(QueryMeasure {
            column_name: name.clone(),
            measure,
        });
    }

    let filter = request.filter.clone().map(|mut expr| {
        expr.resolve_columns(&|name| table.dimension_by_name(name).cloned());
        expr
    });

    info!(
        target: "mdscan::binder",
        table = %request.table.unique_name(),
        dimensions = dimensions.len(),
        measures = measures.len(),
        sort_dimensions = sort_dimensions.len(),
        "Resolved query model"
    );
    Ok(QueryModel {
        table: request.table.clone(),
        dimensions,
        measures,
        sort_dimensions,
        filter,
    })
}

/// `count(*)` binds to the first declared measure unless that measure is the
/// reserved placeholder, in which case a synthetic zero-ordinal measure is
/// derived from the first dimension. Every query ends up with at least one
/// addressable measure slot, even over a measure-less schema.
fn resolve_count_star(table: &crate::engine::schema::catalog::TableSchema) -> Measure {
    if let Some(first) = table.measures().first() {
        if first.name != PLACEHOLDER_MEASURE {
            return first.clone();
        }
    }
    debug!(
        target: "mdscan::binder",
        table = %table.table_id().unique_name(),
        "No real measure present, deriving synthetic count(*) measure"
    );
    match table.dimensions().first() {
        Some(first_dimension) => Measure {
            name: first_dimension.name.clone(),
            ordinal: 0,
            data_type: first_dimension.data_type,
        },
        None => Measure {
            name: PLACEHOLDER_MEASURE.to_string(),
            ordinal: 0,
            data_type: crate::engine::schema::types::DataType::Double,
        },
    }
}
