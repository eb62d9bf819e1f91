//! Per-sample expression levels and their persisted form

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Numerical interpretation recorded on every uploaded sample
pub const FPKM_INTERPRETATION: &str = "FPKM";

/// log2 FPKM and log2 TPM values for one quantified sample.
///
/// Both maps are keyed by the same feature ids. When the sample's total
/// abundance is zero, TPM normalization cannot run and `tpm_log2` holds the
/// raw abundances; `is_tpm_normalized` reports that state.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionLevels {
    fpkm_log2: BTreeMap<String, f64>,
    tpm_log2: BTreeMap<String, f64>,
    tpm_normalized: bool,
}

impl ExpressionLevels {
    pub fn new(
        fpkm_log2: BTreeMap<String, f64>,
        tpm_log2: BTreeMap<String, f64>,
        tpm_normalized: bool,
    ) -> Self {
        Self {
            fpkm_log2,
            tpm_log2,
            tpm_normalized,
        }
    }

    pub fn fpkm_log2(&self) -> &BTreeMap<String, f64> {
        &self.fpkm_log2
    }

    pub fn tpm_log2(&self) -> &BTreeMap<String, f64> {
        &self.tpm_log2
    }

    /// False when the total abundance was zero and TPM values are un-normalized
    pub fn is_tpm_normalized(&self) -> bool {
        self.tpm_normalized
    }

    /// Number of accepted features
    pub fn n_features(&self) -> usize {
        self.fpkm_log2.len()
    }

    pub fn into_maps(self) -> (BTreeMap<String, f64>, BTreeMap<String, f64>) {
        (self.fpkm_log2, self.tpm_log2)
    }
}

/// Stored expression record for one sample.
///
/// `expression_levels` holds the FPKM-derived values; quantifiers that do
/// not report TPM leave `tpm_expression_levels` empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SampleExpression {
    pub numerical_interpretation: String,
    pub genome_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    pub expression_levels: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tpm_expression_levels: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_comments: Option<String>,
}

impl SampleExpression {
    /// Wrap computed levels into a stored FPKM record
    pub fn from_levels(
        genome_ref: &str,
        condition: Option<String>,
        levels: ExpressionLevels,
    ) -> Self {
        let (fpkm, tpm) = levels.into_maps();
        Self {
            numerical_interpretation: FPKM_INTERPRETATION.to_string(),
            genome_id: genome_ref.to_string(),
            condition,
            expression_levels: fpkm,
            tpm_expression_levels: Some(tpm),
            description: None,
            platform: None,
            source: None,
            processing_comments: None,
        }
    }
}

/// A stored sample expression paired with the sample name it is stored under
#[derive(Debug, Clone)]
pub struct SampleExpressionTable {
    pub sample_name: String,
    pub expression: SampleExpression,
}

impl SampleExpressionTable {
    pub fn new(sample_name: &str, expression: SampleExpression) -> Self {
        Self {
            sample_name: sample_name.to_string(),
            expression,
        }
    }

    pub fn fpkm(&self) -> &BTreeMap<String, f64> {
        &self.expression.expression_levels
    }

    pub fn tpm(&self) -> Option<&BTreeMap<String, f64>> {
        self.expression.tpm_expression_levels.as_ref()
    }

    pub fn condition(&self) -> Option<&str> {
        self.expression.condition.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_expression_json_shape() {
        let mut fpkm = BTreeMap::new();
        fpkm.insert("g1".to_string(), 1.0);
        let levels = ExpressionLevels::new(fpkm.clone(), fpkm, true);
        let sample = SampleExpression::from_levels("1/2/3", Some("wt".to_string()), levels);

        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["numerical_interpretation"], "FPKM");
        assert_eq!(json["genome_id"], "1/2/3");
        assert_eq!(json["expression_levels"]["g1"], 1.0);
        assert_eq!(json["tpm_expression_levels"]["g1"], 1.0);
        assert!(json.get("platform").is_none());
    }

    #[test]
    fn test_missing_tpm_deserializes_as_none() {
        let json = r#"{
            "numerical_interpretation": "FPKM",
            "genome_id": "g",
            "expression_levels": {"a": 0.5}
        }"#;
        let sample: SampleExpression = serde_json::from_str(json).unwrap();
        assert!(sample.tpm_expression_levels.is_none());
        assert!(sample.condition.is_none());
    }
}
