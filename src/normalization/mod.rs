//! Normalization of quantified abundances into expression levels

mod levels;

pub use levels::{
    compute_expression_levels, compute_expression_levels_from_file, ExpressionParams,
    TRANSCRIPT_ID_COLUMN,
};
