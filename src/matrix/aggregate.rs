//! Merge per-sample expression tables into feature x sample matrices

use std::collections::{BTreeMap, BTreeSet};

use ndarray::Array2;

use crate::data::{ExpressionMatrix, SampleExpressionTable};
use crate::error::Result;

/// Merge named per-sample tables into one matrix.
///
/// Rows are the sorted union of every feature id seen; columns follow the
/// order of `samples`. A feature absent from a sample gets 0 in that
/// sample's column, and a sample with no features still gets a column.
pub fn aggregate_tables(samples: &[(&str, &BTreeMap<String, f64>)]) -> Result<ExpressionMatrix> {
    let row_ids: Vec<String> = samples
        .iter()
        .flat_map(|(_, table)| table.keys())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect();
    let col_ids: Vec<String> = samples.iter().map(|(name, _)| name.to_string()).collect();

    let mut values = Array2::zeros((row_ids.len(), col_ids.len()));
    for (j, (_, table)) in samples.iter().enumerate() {
        for (i, row_id) in row_ids.iter().enumerate() {
            if let Some(&v) = table.get(row_id) {
                values[[i, j]] = v;
            }
        }
    }

    log::debug!(
        "Aggregated {} samples into {} feature rows",
        col_ids.len(),
        row_ids.len()
    );

    ExpressionMatrix::new(values, row_ids, col_ids)
}

/// FPKM matrix plus the TPM matrix when any sample reported TPM
#[derive(Debug, Clone)]
pub struct LevelMatrices {
    pub fpkm: ExpressionMatrix,
    pub tpm: Option<ExpressionMatrix>,
}

fn condition_mapping<'a, I>(tables: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = &'a SampleExpressionTable>,
{
    tables
        .into_iter()
        .filter_map(|t| t.condition().map(|c| (t.sample_name.clone(), c.to_string())))
        .collect()
}

/// Aggregate stored sample tables into FPKM and TPM matrices.
///
/// The TPM pass only covers samples that carry TPM levels and is skipped
/// entirely when none do.
pub fn build_level_matrices(
    tables: &[SampleExpressionTable],
    genome_ref: &str,
) -> Result<LevelMatrices> {
    log::info!("Building expression matrices from {} samples", tables.len());

    let fpkm_input: Vec<(&str, &BTreeMap<String, f64>)> = tables
        .iter()
        .map(|t| (t.sample_name.as_str(), t.fpkm()))
        .collect();
    let fpkm = aggregate_tables(&fpkm_input)?
        .with_genome_ref(genome_ref)
        .with_condition_mapping(condition_mapping(tables));

    let tpm_tables: Vec<&SampleExpressionTable> =
        tables.iter().filter(|t| t.tpm().is_some()).collect();
    let tpm = if tpm_tables.is_empty() {
        log::info!("No sample reported TPM levels; skipping TPM matrix");
        None
    } else {
        if tpm_tables.len() < tables.len() {
            log::warn!(
                "Only {} of {} samples reported TPM levels",
                tpm_tables.len(),
                tables.len()
            );
        }
        let tpm_input: Vec<(&str, &BTreeMap<String, f64>)> = tpm_tables
            .iter()
            .filter_map(|t| t.tpm().map(|levels| (t.sample_name.as_str(), levels)))
            .collect();
        let matrix = aggregate_tables(&tpm_input)?
            .with_genome_ref(genome_ref)
            .with_condition_mapping(condition_mapping(tpm_tables.iter().copied()));
        Some(matrix)
    };

    Ok(LevelMatrices { fpkm, tpm })
}
