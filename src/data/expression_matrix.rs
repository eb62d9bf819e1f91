//! Feature x sample expression matrix

use std::collections::{BTreeMap, HashSet};

use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{ExprError, Result};

/// Scale recorded on every aggregated matrix
pub const MATRIX_SCALE: &str = "log2";
/// Value type recorded on every aggregated matrix
pub const MATRIX_TYPE: &str = "level";

fn check_unique(ids: &[String], what: &str) -> Result<()> {
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(id.as_str()) {
            return Err(ExprError::InvalidInput {
                reason: format!("duplicate {} '{}'", what, id),
            });
        }
    }
    Ok(())
}

/// An expression matrix of log2 levels.
/// Rows are features, columns are samples.
#[derive(Debug, Clone)]
pub struct ExpressionMatrix {
    /// Expression values (features x samples)
    values: Array2<f64>,
    /// Feature identifiers
    row_ids: Vec<String>,
    /// Sample names, in merge order
    col_ids: Vec<String>,
    genome_ref: Option<String>,
    /// Sample name -> condition label
    condition_mapping: BTreeMap<String, String>,
}

impl ExpressionMatrix {
    /// Create a new matrix from raw data
    pub fn new(values: Array2<f64>, row_ids: Vec<String>, col_ids: Vec<String>) -> Result<Self> {
        let (n_rows, n_cols) = values.dim();

        if row_ids.len() != n_rows {
            return Err(ExprError::DimensionMismatch {
                context: "expression matrix rows".to_string(),
                expected: format!("{} row ids", n_rows),
                got: format!("{} row ids", row_ids.len()),
            });
        }

        if col_ids.len() != n_cols {
            return Err(ExprError::DimensionMismatch {
                context: "expression matrix columns".to_string(),
                expected: format!("{} column ids", n_cols),
                got: format!("{} column ids", col_ids.len()),
            });
        }

        if values.iter().any(|x| !x.is_finite()) {
            return Err(ExprError::InvalidInput {
                reason: "expression values must be finite".to_string(),
            });
        }

        check_unique(&row_ids, "row id")?;
        check_unique(&col_ids, "column id")?;

        Ok(Self {
            values,
            row_ids,
            col_ids,
            genome_ref: None,
            condition_mapping: BTreeMap::new(),
        })
    }

    /// Attach the genome the row ids belong to
    pub fn with_genome_ref(mut self, genome_ref: &str) -> Self {
        self.genome_ref = Some(genome_ref.to_string());
        self
    }

    /// Attach sample name -> condition labels
    pub fn with_condition_mapping(mut self, mapping: BTreeMap<String, String>) -> Self {
        self.condition_mapping = mapping;
        self
    }

    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_cols(&self) -> usize {
        self.values.ncols()
    }

    pub fn row_ids(&self) -> &[String] {
        &self.row_ids
    }

    pub fn col_ids(&self) -> &[String] {
        &self.col_ids
    }

    pub fn genome_ref(&self) -> Option<&str> {
        self.genome_ref.as_deref()
    }

    pub fn condition_mapping(&self) -> &BTreeMap<String, String> {
        &self.condition_mapping
    }

    /// Values for one feature across all samples
    pub fn row(&self, row_idx: usize) -> ArrayView1<'_, f64> {
        self.values.row(row_idx)
    }

    pub fn row_index(&self, row_id: &str) -> Option<usize> {
        self.row_ids.iter().position(|id| id == row_id)
    }

    pub fn col_index(&self, col_id: &str) -> Option<usize> {
        self.col_ids.iter().position(|id| id == col_id)
    }

    /// Look up a single cell by feature id and sample name
    pub fn value(&self, row_id: &str, col_id: &str) -> Option<f64> {
        let i = self.row_index(row_id)?;
        let j = self.col_index(col_id)?;
        Some(self.values[[i, j]])
    }

    /// Convert to the stored object shape
    pub fn to_persisted(&self) -> PersistedExpressionMatrix {
        let values: Vec<Vec<f64>> = self
            .values
            .axis_iter(Axis(0))
            .map(|row| row.to_vec())
            .collect();
        let feature_mapping = self
            .row_ids
            .iter()
            .map(|id| (id.clone(), id.clone()))
            .collect();

        PersistedExpressionMatrix {
            genome_ref: self.genome_ref.clone(),
            scale: MATRIX_SCALE.to_string(),
            value_type: MATRIX_TYPE.to_string(),
            data: MatrixData {
                row_ids: self.row_ids.clone(),
                col_ids: self.col_ids.clone(),
                values,
            },
            feature_mapping,
            condition_mapping: self.condition_mapping.clone(),
        }
    }

    /// Rebuild from the stored object shape
    pub fn from_persisted(stored: PersistedExpressionMatrix) -> Result<Self> {
        let n_rows = stored.data.row_ids.len();
        let n_cols = stored.data.col_ids.len();

        if stored.data.values.len() != n_rows {
            return Err(ExprError::DimensionMismatch {
                context: "stored expression matrix".to_string(),
                expected: format!("{} value rows", n_rows),
                got: format!("{} value rows", stored.data.values.len()),
            });
        }

        let mut values = Array2::zeros((n_rows, n_cols));
        for (i, row) in stored.data.values.iter().enumerate() {
            if row.len() != n_cols {
                return Err(ExprError::DimensionMismatch {
                    context: format!(
                        "row '{}' of stored expression matrix",
                        stored.data.row_ids[i]
                    ),
                    expected: format!("{} values", n_cols),
                    got: format!("{} values", row.len()),
                });
            }
            for (j, &v) in row.iter().enumerate() {
                values[[i, j]] = v;
            }
        }

        let mut matrix = Self::new(values, stored.data.row_ids, stored.data.col_ids)?;
        matrix.genome_ref = stored.genome_ref;
        matrix.condition_mapping = stored.condition_mapping;
        Ok(matrix)
    }
}

/// Row/column/value payload shared by stored matrices
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatrixData<T> {
    pub row_ids: Vec<String>,
    #[serde(default)]
    pub col_ids: Vec<String>,
    pub values: Vec<Vec<T>>,
}

/// Stored form of an [`ExpressionMatrix`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersistedExpressionMatrix {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genome_ref: Option<String>,
    pub scale: String,
    #[serde(rename = "type")]
    pub value_type: String,
    pub data: MatrixData<f64>,
    /// Identity row id -> row id mapping
    #[serde(default)]
    pub feature_mapping: BTreeMap<String, String>,
    #[serde(default)]
    pub condition_mapping: BTreeMap<String, String>,
}
