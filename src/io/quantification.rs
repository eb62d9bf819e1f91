//! Reader for tab-delimited quantification tables (FPKM tracking / ctab)

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::data::FeatureUniverse;
use crate::error::{ExprError, Result};
use crate::normalization::ExpressionParams;

/// One accepted row of a quantification file
#[derive(Debug, Clone, PartialEq)]
pub struct QuantificationRecord {
    /// Resolved feature id, never empty
    pub feature_id: String,
    /// Raw FPKM-like abundance, non-negative
    pub abundance: f64,
    /// 1-based line in the source file
    pub line_number: usize,
}

fn join_fields(record: &StringRecord) -> String {
    record.iter().collect::<Vec<_>>().join("\t")
}

/// Resolve the feature id of a row against the universe.
///
/// The primary id column is tried first, then the secondary column. Returns
/// `Ok(None)` for rows with a blank primary id.
fn resolve_feature_id<'r>(
    record: &'r StringRecord,
    line_number: usize,
    universe: &FeatureUniverse,
    params: &ExpressionParams,
) -> Result<Option<&'r str>> {
    let primary = record.get(params.id_column).ok_or_else(|| ExprError::MalformedRow {
        line_number,
        reason: format!(
            "{} columns, feature id expected in column {}",
            record.len(),
            params.id_column
        ),
    })?;

    if primary.is_empty() {
        return Ok(None);
    }
    if universe.contains(primary) {
        return Ok(Some(primary));
    }

    match record.get(params.secondary_id_column) {
        Some(secondary) if !secondary.is_empty() && universe.contains(secondary) => {
            log::debug!(
                "line {}: '{}' not in genome, using secondary id '{}'",
                line_number,
                primary,
                secondary
            );
            Ok(Some(secondary))
        }
        _ => Err(ExprError::UnknownFeature {
            line_number,
            line: join_fields(record),
        }),
    }
}

fn parse_abundance(record: &StringRecord, line_number: usize, column: usize) -> Result<f64> {
    let raw = record.get(column).ok_or_else(|| ExprError::MalformedRow {
        line_number,
        reason: format!("{} columns, abundance expected in column {}", record.len(), column),
    })?;
    let value: f64 = raw.trim().parse().map_err(|_| ExprError::InvalidAbundance {
        line_number,
        value: raw.to_string(),
    })?;
    if value < 0.0 || !value.is_finite() {
        return Err(ExprError::InvalidAbundance {
            line_number,
            value: raw.to_string(),
        });
    }
    Ok(value)
}

/// Read every accepted row of a quantification file.
///
/// The header must contain the abundance column named by
/// `params.abundance_column`. Any row whose feature id is not in
/// `universe` aborts the read; rows with a blank id are skipped.
pub fn read_quantification<P: AsRef<Path>>(
    path: P,
    universe: &FeatureUniverse,
    params: &ExpressionParams,
) -> Result<Vec<QuantificationRecord>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_path(path)?;

    let abundance_col = reader
        .headers()?
        .iter()
        .position(|h| h.trim() == params.abundance_column)
        .ok_or_else(|| ExprError::MissingColumn {
            column: params.abundance_column.clone(),
            path: path.display().to_string(),
        })?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in reader.records() {
        let row = row?;
        let line_number = row.position().map_or(0, |p| p.line() as usize);

        let feature_id = match resolve_feature_id(&row, line_number, universe, params)? {
            Some(id) => id.to_string(),
            None => {
                skipped += 1;
                continue;
            }
        };
        let abundance = parse_abundance(&row, line_number, abundance_col)?;

        records.push(QuantificationRecord {
            feature_id,
            abundance,
            line_number,
        });
    }

    if skipped > 0 {
        log::debug!("{}: skipped {} rows with blank feature id", path.display(), skipped);
    }
    log::info!("{}: read {} quantified features", path.display(), records.len());

    Ok(records)
}
