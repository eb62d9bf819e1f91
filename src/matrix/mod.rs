//! Matrix construction: aggregation, differential expression lookup and
//! the enhanced filtered matrix

mod aggregate;
mod dem;
mod enhanced;

pub use aggregate::{aggregate_tables, build_level_matrices, LevelMatrices};
pub use dem::{
    DifferentialExpression, DifferentialExpressionLookup, FOLD_CHANGE_POSITION, Q_VALUE_POSITION,
};
pub use enhanced::{build_enhanced_matrix, ENHANCED_COLUMN_LABELS, ENHANCED_COL_IDS};
