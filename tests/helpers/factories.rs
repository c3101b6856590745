use crate::engine::core::read::query_model::QueryDimension;
use crate::engine::schema::catalog::{TableId, TableSchema, new_column_id};
use crate::engine::schema::types::{DataType, Dimension, Encodings, Measure};

/// Builder for schema dimensions. Defaults to a columnar, dictionary-encoded
/// primitive string column outside the packed key.
pub struct DimensionFactory {
    dimension: Dimension,
}

impl DimensionFactory {
    pub fn new(name: &str) -> Self {
        Self {
            dimension: Dimension {
                name: name.to_string(),
                column_id: new_column_id(),
                ordinal: 0,
                key_ordinal: None,
                encodings: Encodings::DICTIONARY,
                columnar: true,
                column_group_id: None,
                data_type: DataType::String,
                children: Vec::new(),
                complex_type_ordinal: None,
            },
        }
    }

    pub fn ordinal(mut self, ordinal: usize) -> Self {
        self.dimension.ordinal = ordinal;
        self
    }

    pub fn key_ordinal(mut self, key_ordinal: usize) -> Self {
        self.dimension.key_ordinal = Some(key_ordinal);
        self
    }

    pub fn encodings(mut self, encodings: Encodings) -> Self {
        self.dimension.encodings = encodings;
        self
    }

    pub fn no_dictionary(mut self) -> Self {
        self.dimension.encodings = Encodings::empty();
        self
    }

    pub fn direct_dictionary(mut self) -> Self {
        self.dimension.encodings = Encodings::DICTIONARY | Encodings::DIRECT_DICTIONARY;
        self
    }

    pub fn grouped(mut self, group_id: u32) -> Self {
        self.dimension.columnar = false;
        self.dimension.column_group_id = Some(group_id);
        self
    }

    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.dimension.data_type = data_type;
        self
    }

    pub fn child(mut self, child: Dimension) -> Self {
        self.dimension.children.push(child);
        self
    }

    pub fn complex_type_ordinal(mut self, ordinal: usize) -> Self {
        self.dimension.complex_type_ordinal = Some(ordinal);
        self
    }

    pub fn create(self) -> Dimension {
        self.dimension
    }
}

pub fn measure(name: &str, ordinal: usize, data_type: DataType) -> Measure {
    Measure {
        name: name.to_string(),
        ordinal,
        data_type,
    }
}

/// Builder for a resolved table schema.
pub struct TableSchemaFactory {
    table_id: TableId,
    dimensions: Vec<Dimension>,
    measures: Vec<Measure>,
}

impl TableSchemaFactory {
    pub fn new(table: &str) -> Self {
        Self {
            table_id: TableId::new("default", table),
            dimensions: Vec::new(),
            measures: Vec::new(),
        }
    }

    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimensions.push(dimension);
        self
    }

    pub fn with_measure(mut self, measure: Measure) -> Self {
        self.measures.push(measure);
        self
    }

    pub fn create(self) -> TableSchema {
        TableSchema::new(self.table_id, self.dimensions, self.measures)
    }
}

pub fn query_dimension(dimension: &Dimension) -> QueryDimension {
    QueryDimension::new(dimension.clone())
}
