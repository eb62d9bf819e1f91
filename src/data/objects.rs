//! Stored matrix objects consumed and produced around the enhanced matrix

use serde::{Deserialize, Serialize};

use super::expression_matrix::{ExpressionMatrix, MatrixData};

/// Placeholder written wherever a value is not available
pub const NOT_AVAILABLE: &str = "NA";

/// One cell of an enhanced matrix: either a number or a text tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    /// The "NA" tag
    pub fn na() -> Self {
        Cell::Text(NOT_AVAILABLE.to_string())
    }

    pub fn is_na(&self) -> bool {
        matches!(self, Cell::Text(s) if s == NOT_AVAILABLE)
    }

    /// A number, or "NA" when absent or NaN
    pub fn from_option(value: Option<f64>) -> Self {
        match value {
            Some(v) if !v.is_nan() => Cell::Number(v),
            _ => Cell::na(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Text(_) => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

/// A matrix selected for display, possibly with missing cells.
///
/// `diff_expr_matrix_ref` links the differential expression matrix the
/// rows were filtered from, when there is one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilteredExpressionMatrix {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genome_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    pub data: MatrixData<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_expr_matrix_ref: Option<String>,
}

impl FilteredExpressionMatrix {
    /// Build a filtered matrix from an aggregated one
    pub fn from_matrix(matrix: &ExpressionMatrix, diff_expr_matrix_ref: Option<&str>) -> Self {
        let stored = matrix.to_persisted();
        Self {
            genome_ref: stored.genome_ref,
            scale: Some(stored.scale),
            value_type: Some(stored.value_type),
            data: MatrixData {
                row_ids: stored.data.row_ids,
                col_ids: stored.data.col_ids,
                values: stored
                    .data
                    .values
                    .into_iter()
                    .map(|row| row.into_iter().map(Some).collect())
                    .collect(),
            },
            diff_expr_matrix_ref: diff_expr_matrix_ref.map(str::to_string),
        }
    }

    /// Link to a differential expression matrix, ignoring blank references
    pub fn dem_link(&self) -> Option<&str> {
        self.diff_expr_matrix_ref
            .as_deref()
            .filter(|r| !r.trim().is_empty())
    }
}

/// Per-feature fold-change and significance values between two conditions.
/// Value rows are read positionally: 0 is fold change, 2 is q-value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DifferentialExpressionMatrix {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genome_ref: Option<String>,
    pub data: MatrixData<Option<f64>>,
}

/// Column payload of an [`EnhancedMatrix`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnhancedMatrixData {
    pub row_ids: Vec<String>,
    pub col_ids: Vec<String>,
    pub column_labels: Vec<String>,
    pub values: Vec<Vec<Cell>>,
}

/// Filtered matrix rows annotated with description, differential expression
/// and descriptive statistics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnhancedMatrix {
    pub genome_ref: Option<String>,
    pub scale: Option<String>,
    #[serde(rename = "type")]
    pub value_type: Option<String>,
    pub data: EnhancedMatrixData,
}

impl EnhancedMatrix {
    pub fn n_rows(&self) -> usize {
        self.data.row_ids.len()
    }

    /// Cells for a row id
    pub fn row(&self, row_id: &str) -> Option<&[Cell]> {
        self.data
            .row_ids
            .iter()
            .position(|id| id == row_id)
            .map(|i| self.data.values[i].as_slice())
    }

    /// Cell by row id and column id
    pub fn cell(&self, row_id: &str, col_id: &str) -> Option<&Cell> {
        let j = self.data.col_ids.iter().position(|c| c == col_id)?;
        self.row(row_id).and_then(|r| r.get(j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_untagged_json() {
        let cells = vec![Cell::na(), Cell::Number(1.5), Cell::from("Yes")];
        let json = serde_json::to_string(&cells).unwrap();
        assert_eq!(json, r#"["NA",1.5,"Yes"]"#);
        let back: Vec<Cell> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cells);
    }

    #[test]
    fn test_cell_from_option() {
        assert!(Cell::from_option(None).is_na());
        assert!(Cell::from_option(Some(f64::NAN)).is_na());
        assert_eq!(Cell::from_option(Some(0.0)).as_f64(), Some(0.0));
    }

    #[test]
    fn test_fem_nulls_are_missing() {
        let json = r#"{
            "genome_ref": "1/2/3",
            "scale": "log2",
            "type": "level",
            "data": {"row_ids": ["g1"], "col_ids": ["a", "b"], "values": [[null, 2.0]]}
        }"#;
        let fem: FilteredExpressionMatrix = serde_json::from_str(json).unwrap();
        assert_eq!(fem.data.values[0], vec![None, Some(2.0)]);
        assert!(fem.dem_link().is_none());
    }

    #[test]
    fn test_blank_dem_link_ignored() {
        let fem = FilteredExpressionMatrix {
            genome_ref: None,
            scale: None,
            value_type: None,
            data: MatrixData {
                row_ids: vec![],
                col_ids: vec![],
                values: vec![],
            },
            diff_expr_matrix_ref: Some("  ".to_string()),
        };
        assert!(fem.dem_link().is_none());
    }
}
