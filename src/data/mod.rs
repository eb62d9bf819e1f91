//! Data structures for expression levels and matrices

mod expression_levels;
mod expression_matrix;
mod expression_set;
mod feature_universe;
mod objects;

pub use expression_levels::{
    ExpressionLevels, SampleExpression, SampleExpressionTable, FPKM_INTERPRETATION,
};
pub use expression_matrix::{
    ExpressionMatrix, MatrixData, PersistedExpressionMatrix, MATRIX_SCALE, MATRIX_TYPE,
};
pub use expression_set::{
    is_type, ExpressionSetSource, ResolvedExpressionSet, GENERIC_EXPRESSION_SET_TYPE,
    RNASEQ_EXPRESSION_SET_TYPE,
};
pub use feature_universe::FeatureUniverse;
pub use objects::{
    Cell, DifferentialExpressionMatrix, EnhancedMatrix, EnhancedMatrixData,
    FilteredExpressionMatrix, NOT_AVAILABLE,
};
