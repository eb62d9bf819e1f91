//! FPKM and TPM expression levels
//!
//! Both levels are reported on a log2 scale with a pseudocount of 1:
//!
//!   fpkm_log2 = log2(FPKM + 1)
//!   tpm_log2  = log2(FPKM / sum(FPKM) * 1e6 + 1)

use std::collections::BTreeMap;
use std::path::Path;

use crate::data::{ExpressionLevels, FeatureUniverse};
use crate::error::Result;
use crate::io::{read_quantification, QuantificationRecord};

/// Column holding the feature id in transcript-level (ctab) tables
pub const TRANSCRIPT_ID_COLUMN: usize = 5;

/// Scaling factor applied to relative abundance to get TPM
const PER_MILLION: f64 = 1e6;

/// Configurable parameters for reading a quantification table
#[derive(Debug, Clone)]
pub struct ExpressionParams {
    /// Column holding the feature id
    pub id_column: usize,
    /// Column tried when the primary id is not a known feature
    pub secondary_id_column: usize,
    /// Header label of the abundance column
    pub abundance_column: String,
}

impl Default for ExpressionParams {
    fn default() -> Self {
        Self {
            id_column: 0,
            secondary_id_column: 1,
            abundance_column: "FPKM".to_string(),
        }
    }
}

impl ExpressionParams {
    /// Parameters for transcript-level tables, where the id lives in column 5
    pub fn transcripts() -> Self {
        Self {
            id_column: TRANSCRIPT_ID_COLUMN,
            ..Self::default()
        }
    }

    /// Use an alternate id column
    pub fn with_id_column(mut self, id_column: usize) -> Self {
        self.id_column = id_column;
        self
    }
}

/// Compute log2 FPKM and log2 TPM levels from accepted quantification rows.
///
/// When the total abundance is zero TPM cannot be normalized; the TPM map
/// then holds the raw abundances and the result reports
/// `is_tpm_normalized() == false`.
pub fn compute_expression_levels(records: &[QuantificationRecord]) -> ExpressionLevels {
    let mut raw: BTreeMap<String, f64> = BTreeMap::new();
    let mut sum_fpkm = 0.0;

    for record in records {
        sum_fpkm += record.abundance;
        if raw.insert(record.feature_id.clone(), record.abundance).is_some() {
            log::warn!(
                "Feature '{}' appears more than once (line {}); keeping the last value",
                record.feature_id,
                record.line_number
            );
        }
    }

    let fpkm_log2: BTreeMap<String, f64> = raw
        .iter()
        .map(|(id, &fpkm)| (id.clone(), (fpkm + 1.0).log2()))
        .collect();

    if sum_fpkm > 0.0 {
        let tpm_log2 = raw
            .into_iter()
            .map(|(id, fpkm)| (id, (fpkm / sum_fpkm * PER_MILLION + 1.0).log2()))
            .collect();
        ExpressionLevels::new(fpkm_log2, tpm_log2, true)
    } else {
        log::warn!(
            "Total FPKM over {} features is zero; TPM normalization skipped",
            raw.len()
        );
        ExpressionLevels::new(fpkm_log2, raw, false)
    }
}

/// Read a quantification file and compute its expression levels
pub fn compute_expression_levels_from_file<P: AsRef<Path>>(
    path: P,
    universe: &FeatureUniverse,
    params: &ExpressionParams,
) -> Result<ExpressionLevels> {
    log::info!(
        "Generating expression levels from {} (id column {})",
        path.as_ref().display(),
        params.id_column
    );
    let records = read_quantification(path, universe, params)?;
    Ok(compute_expression_levels(&records))
}
