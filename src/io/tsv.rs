//! Tab-separated export of matrices

use std::path::Path;

use csv::WriterBuilder;

use crate::data::{Cell, EnhancedMatrix, ExpressionMatrix};
use crate::error::Result;

/// Shortest representation that parses back to the same value
fn format_number(v: f64) -> String {
    v.to_string()
}

fn format_cell(cell: &Cell) -> String {
    match cell {
        Cell::Number(v) => format_number(*v),
        Cell::Text(s) => s.clone(),
    }
}

/// Write an expression matrix with a `feature_id` column followed by one
/// column per sample
pub fn write_expression_matrix<P: AsRef<Path>>(path: P, matrix: &ExpressionMatrix) -> Result<()> {
    let mut writer = WriterBuilder::new().delimiter(b'\t').from_path(path)?;

    let mut header = Vec::with_capacity(matrix.n_cols() + 1);
    header.push("feature_id".to_string());
    header.extend(matrix.col_ids().iter().cloned());
    writer.write_record(&header)?;

    for (i, row_id) in matrix.row_ids().iter().enumerate() {
        let mut record = Vec::with_capacity(matrix.n_cols() + 1);
        record.push(row_id.clone());
        record.extend(matrix.row(i).iter().map(|&v| format_number(v)));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write an enhanced matrix using its human-readable column labels
pub fn write_enhanced_matrix<P: AsRef<Path>>(path: P, matrix: &EnhancedMatrix) -> Result<()> {
    let mut writer = WriterBuilder::new().delimiter(b'\t').from_path(path)?;

    let mut header = vec!["Feature".to_string()];
    header.extend(matrix.data.column_labels.iter().cloned());
    writer.write_record(&header)?;

    for (row_id, cells) in matrix.data.row_ids.iter().zip(matrix.data.values.iter()) {
        let mut record = vec![row_id.clone()];
        record.extend(cells.iter().map(format_cell));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
