//! Expression set source schemas
//!
//! Two stored set layouts list the samples of an experiment. Both are parsed
//! once into [`ExpressionSetSource`] and then resolved into a single list of
//! sample references.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ExprError, Result};

/// Legacy RNA-seq expression set type
pub const RNASEQ_EXPRESSION_SET_TYPE: &str = "KBaseRNASeq.RNASeqExpressionSet";
/// Generic item-list expression set type
pub const GENERIC_EXPRESSION_SET_TYPE: &str = "KBaseSets.ExpressionSet";

/// True when `type_name` is `module_type` followed by a `-major.minor` version
///
/// Any `-N.M` version is accepted, including multi-digit majors such as
/// `KBaseSets.ExpressionSet-12.3`.
pub fn is_type(type_name: &str, module_type: &str) -> bool {
    type_name
        .strip_prefix(module_type)
        .and_then(|rest| rest.strip_prefix('-'))
        .map_or(false, |version| {
            let mut parts = version.splitn(2, '.');
            let major = parts.next().unwrap_or("");
            let minor = parts.next().unwrap_or("");
            !major.is_empty()
                && major.chars().all(|c| c.is_ascii_digit())
                && minor.chars().next().map_or(false, |c| c.is_ascii_digit())
        })
}

#[derive(Debug, Clone, Deserialize)]
struct RnaSeqSetData {
    genome_id: String,
    mapped_expression_ids: Vec<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Deserialize)]
struct SetItem {
    #[serde(rename = "ref")]
    reference: String,
}

#[derive(Debug, Clone, Deserialize)]
struct GenericSetData {
    items: Vec<SetItem>,
}

/// A stored expression set in one of its two supported layouts
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionSetSource {
    /// Genome on the set; each sample listed as a single-entry
    /// alignment -> expression map
    RnaSeq {
        genome_ref: String,
        sample_refs: Vec<String>,
    },
    /// Plain item list; the genome is read from the first sample
    Generic { sample_refs: Vec<String> },
}

impl ExpressionSetSource {
    /// Parse a set object by its declared type
    pub fn parse(reference: &str, type_name: &str, data: &Value) -> Result<Self> {
        if is_type(type_name, RNASEQ_EXPRESSION_SET_TYPE) {
            let set: RnaSeqSetData = serde_json::from_value(data.clone())?;
            let sample_refs = set
                .mapped_expression_ids
                .into_iter()
                .map(|entry| {
                    entry.into_values().next().ok_or_else(|| ExprError::InvalidInput {
                        reason: format!("empty mapped_expression_ids entry in {}", reference),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(ExpressionSetSource::RnaSeq {
                genome_ref: set.genome_id,
                sample_refs,
            })
        } else if is_type(type_name, GENERIC_EXPRESSION_SET_TYPE) {
            let set: GenericSetData = serde_json::from_value(data.clone())?;
            Ok(ExpressionSetSource::Generic {
                sample_refs: set.items.into_iter().map(|i| i.reference).collect(),
            })
        } else {
            Err(ExprError::UnsupportedObjectType {
                reference: reference.to_string(),
                found: type_name.to_string(),
            })
        }
    }

    pub fn sample_refs(&self) -> &[String] {
        match self {
            ExpressionSetSource::RnaSeq { sample_refs, .. } => sample_refs,
            ExpressionSetSource::Generic { sample_refs } => sample_refs,
        }
    }

    /// Genome reference when the set carries it directly
    pub fn genome_ref(&self) -> Option<&str> {
        match self {
            ExpressionSetSource::RnaSeq { genome_ref, .. } => Some(genome_ref),
            ExpressionSetSource::Generic { .. } => None,
        }
    }
}

/// An expression set reduced to its genome and ordered sample references
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedExpressionSet {
    pub genome_ref: String,
    pub sample_refs: Vec<String>,
}
