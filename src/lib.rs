//! expression_utils: expression levels and matrices from RNA-seq quantification
//!
//! This crate turns per-sample quantification tables into log2 FPKM/TPM
//! expression levels, merges stored samples into expression matrices, and
//! annotates filtered matrices with descriptions, differential expression
//! values and per-row statistics.
//!
//! # Example
//!
//! ```ignore
//! use expression_utils::prelude::*;
//!
//! // Levels for one sample
//! let universe = resolve_feature_universe(&genomes, "1/2/3")?;
//! let params = ExpressionParams::default();
//! let levels = compute_expression_levels_from_file("genes.fpkm_tracking", &universe, &params)?;
//!
//! // Matrices for a set of stored samples
//! let output = build_expression_matrices(&store, &MatrixParams::new("1/9/1", "experiment"))?;
//!
//! // Enhanced filtered matrix
//! let efem = get_enhanced_fem(&store, &genomes, &EnhancedFemParams::new("1/4/1"))?;
//! ```

pub mod data;
pub mod error;
pub mod io;
pub mod matrix;
pub mod normalization;
pub mod service;
pub mod stats;
pub mod store;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::data::{
        Cell, DifferentialExpressionMatrix, EnhancedMatrix, ExpressionLevels, ExpressionMatrix,
        ExpressionSetSource, FeatureUniverse, FilteredExpressionMatrix, SampleExpression,
        SampleExpressionTable,
    };
    pub use crate::error::{ExprError, Result};
    pub use crate::io::{read_json, read_quantification, write_expression_matrix, write_json};
    pub use crate::matrix::{
        aggregate_tables, build_enhanced_matrix, build_level_matrices, DifferentialExpressionLookup,
    };
    pub use crate::normalization::{
        compute_expression_levels, compute_expression_levels_from_file, ExpressionParams,
    };
    pub use crate::service::{
        build_expression_matrices, get_enhanced_fem, upload_expression, EnhancedFemParams,
        MatrixParams, UploadParams,
    };
    pub use crate::stats::{summarize_row, summarize_values, MissingFlag, RowSummary};
    pub use crate::store::{resolve_feature_universe, GenomeAnnotations, MemoryStore, ObjectStore};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use std::collections::BTreeMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_single_sample_matrix_matches_levels() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "tracking_id\tFPKM").unwrap();
        writeln!(file, "g1\t0.5").unwrap();
        writeln!(file, "g2\t12.0").unwrap();
        let universe = FeatureUniverse::new("1/2/3", vec!["g1", "g2"]);

        let params = ExpressionParams::default();
        let levels = compute_expression_levels_from_file(file.path(), &universe, &params).unwrap();
        let fpkm: &BTreeMap<String, f64> = levels.fpkm_log2();
        let matrix = aggregate_tables(&[("only", fpkm)]).unwrap();

        for (id, &v) in fpkm {
            assert_eq!(matrix.value(id, "only"), Some(v));
        }
    }
}
