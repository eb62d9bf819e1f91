//! Feature-indexed view of a differential expression matrix

use std::collections::HashMap;

use crate::data::DifferentialExpressionMatrix;
use crate::error::{ExprError, Result};

/// Position of the fold change in a value row
pub const FOLD_CHANGE_POSITION: usize = 0;
/// Position of the q-value in a value row
pub const Q_VALUE_POSITION: usize = 2;

/// Fold change and q-value for one feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferentialExpression {
    pub fold_change: Option<f64>,
    pub q_value: Option<f64>,
}

/// feature id -> (fold change, q-value)
#[derive(Debug, Clone, Default)]
pub struct DifferentialExpressionLookup {
    entries: HashMap<String, DifferentialExpression>,
}

impl DifferentialExpressionLookup {
    /// Index a differential expression matrix by row id.
    ///
    /// Only positions 0 and 2 of each value row are read. A repeated row id
    /// keeps its last entry.
    pub fn from_matrix(dem: &DifferentialExpressionMatrix) -> Result<Self> {
        let row_ids = &dem.data.row_ids;
        let values = &dem.data.values;

        if values.len() != row_ids.len() {
            return Err(ExprError::DimensionMismatch {
                context: "differential expression matrix".to_string(),
                expected: format!("{} value rows", row_ids.len()),
                got: format!("{} value rows", values.len()),
            });
        }

        let mut entries = HashMap::with_capacity(row_ids.len());
        for (i, (row_id, row)) in row_ids.iter().zip(values.iter()).enumerate() {
            if row.len() <= Q_VALUE_POSITION {
                return Err(ExprError::MalformedRow {
                    line_number: i + 1,
                    reason: format!(
                        "differential expression row '{}' has {} values, need at least {}",
                        row_id,
                        row.len(),
                        Q_VALUE_POSITION + 1
                    ),
                });
            }
            let entry = DifferentialExpression {
                fold_change: row[FOLD_CHANGE_POSITION],
                q_value: row[Q_VALUE_POSITION],
            };
            if entries.insert(row_id.clone(), entry).is_some() {
                log::warn!("Duplicate row id '{}' in differential expression matrix", row_id);
            }
        }

        Ok(Self { entries })
    }

    pub fn get(&self, feature_id: &str) -> Option<&DifferentialExpression> {
        self.entries.get(feature_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
