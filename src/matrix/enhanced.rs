//! Enhanced filtered expression matrix
//!
//! Each filtered matrix row becomes eight cells: description, fold change,
//! q-value, then min/max/mean/std_dev/missing-flag over the row's values.

use std::collections::HashMap;

use crate::data::{Cell, EnhancedMatrix, EnhancedMatrixData, FilteredExpressionMatrix};
use crate::error::{ExprError, Result};
use crate::stats::summarize_row;

use super::dem::DifferentialExpressionLookup;

/// Column ids of every enhanced matrix
pub const ENHANCED_COL_IDS: [&str; 8] = [
    "description",
    "fold-change",
    "q-value",
    "min",
    "max",
    "mean",
    "std_dev",
    "is_missing_values",
];

/// Human-readable labels, parallel to [`ENHANCED_COL_IDS`]
pub const ENHANCED_COLUMN_LABELS: [&str; 8] = [
    "Description",
    "Fold change",
    "Q value",
    "Min. expression",
    "Max. expression",
    "Mean expression",
    "Std. dev.",
    "Missing values?",
];

/// Build the enhanced matrix for a filtered matrix.
///
/// Row order is preserved. Descriptions come from `descriptions` (blank
/// ones count as absent); fold change and q-value come from `dem` when
/// given. Anything unavailable is "NA".
pub fn build_enhanced_matrix(
    fem: &FilteredExpressionMatrix,
    descriptions: &HashMap<String, String>,
    dem: Option<&DifferentialExpressionLookup>,
) -> Result<EnhancedMatrix> {
    let row_ids = &fem.data.row_ids;
    let values = &fem.data.values;

    if values.len() != row_ids.len() {
        return Err(ExprError::DimensionMismatch {
            context: "filtered expression matrix".to_string(),
            expected: format!("{} value rows", row_ids.len()),
            got: format!("{} value rows", values.len()),
        });
    }

    let mut rows = Vec::with_capacity(row_ids.len());
    let mut annotated = 0usize;

    for (row_id, raw_row) in row_ids.iter().zip(values.iter()) {
        let mut cells = Vec::with_capacity(ENHANCED_COL_IDS.len());

        cells.push(
            descriptions
                .get(row_id)
                .filter(|d| !d.is_empty())
                .map_or_else(Cell::na, |d| Cell::Text(d.clone())),
        );

        match dem.and_then(|lookup| lookup.get(row_id)) {
            Some(de) => {
                annotated += 1;
                cells.push(Cell::from_option(de.fold_change));
                cells.push(Cell::from_option(de.q_value));
            }
            None => {
                cells.push(Cell::na());
                cells.push(Cell::na());
            }
        }

        cells.extend(summarize_row(raw_row).to_cells());
        rows.push(cells);
    }

    log::info!(
        "Enhanced {} rows ({} with differential expression values)",
        rows.len(),
        annotated
    );

    Ok(EnhancedMatrix {
        genome_ref: fem.genome_ref.clone(),
        scale: fem.scale.clone(),
        value_type: fem.value_type.clone(),
        data: EnhancedMatrixData {
            row_ids: row_ids.clone(),
            col_ids: ENHANCED_COL_IDS.iter().map(|s| s.to_string()).collect(),
            column_labels: ENHANCED_COLUMN_LABELS.iter().map(|s| s.to_string()).collect(),
            values: rows,
        },
    })
}
