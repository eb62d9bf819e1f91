//! Request-level operations over the object store
//!
//! Each operation takes its collaborators and a parameter struct
//! explicitly; nothing is cached between calls.

mod enhanced_fem;
mod expression_matrix;
mod upload;

pub use enhanced_fem::{get_enhanced_fem, load_dem_lookup, EnhancedFemParams};
pub use expression_matrix::{
    build_expression_matrices, load_sample_tables, resolve_expression_set, ExpressionMatrixOutput,
    MatrixParams, NamedMatrix, SAMPLE_EXPRESSION_TYPE,
};
pub use upload::{
    quantification_source, upload_expression, UploadParams, GENE_TRACKING_FILE,
    TRANSCRIPT_TABLE_FILE,
};
