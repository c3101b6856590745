use std::sync::Arc;

use crate::engine::core::dictionary::provider::Dictionary;
use crate::engine::schema::types::DataType;

/// One node of a flattened complex-column schema. The variant set is closed
/// by the storage format, so this is a plain sum type with exhaustive
/// matching; a parent exclusively owns its children.
#[derive(Debug, Clone)]
pub enum GenericQueryType {
    Array {
        name: String,
        parent_name: String,
        block_index: usize,
        children: Vec<GenericQueryType>,
    },
    Struct {
        name: String,
        parent_name: String,
        block_index: usize,
        children: Vec<GenericQueryType>,
    },
    Primitive {
        name: String,
        parent_name: String,
        block_index: usize,
        data_type: DataType,
        /// Fixed value size from the per-complex-column size table; `None`
        /// for variable-length values.
        fixed_length: Option<usize>,
        dictionary: Option<Arc<Dictionary>>,
        direct_dictionary: bool,
    },
}

impl GenericQueryType {
    pub fn name(&self) -> &str {
        match self {
            GenericQueryType::Array { name, .. }
            | GenericQueryType::Struct { name, .. }
            | GenericQueryType::Primitive { name, .. } => name,
        }
    }

    pub fn parent_name(&self) -> &str {
        match self {
            GenericQueryType::Array { parent_name, .. }
            | GenericQueryType::Struct { parent_name, .. }
            | GenericQueryType::Primitive { parent_name, .. } => parent_name,
        }
    }

    pub fn block_index(&self) -> usize {
        match self {
            GenericQueryType::Array { block_index, .. }
            | GenericQueryType::Struct { block_index, .. }
            | GenericQueryType::Primitive { block_index, .. } => *block_index,
        }
    }

    pub fn children(&self) -> &[GenericQueryType] {
        match self {
            GenericQueryType::Array { children, .. }
            | GenericQueryType::Struct { children, .. } => children,
            GenericQueryType::Primitive { .. } => &[],
        }
    }

    /// Block indexes consumed by this subtree, in pre-order.
    pub fn block_indexes(&self) -> Vec<usize> {
        let mut indexes = vec![self.block_index()];
        for child in self.children() {
            indexes.extend(child.block_indexes());
        }
        indexes
    }
}
