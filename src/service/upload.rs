//! Expression levels for one uploaded sample directory

use std::path::{Path, PathBuf};

use crate::data::SampleExpression;
use crate::error::{ExprError, Result};
use crate::normalization::{compute_expression_levels_from_file, ExpressionParams};
use crate::store::{resolve_feature_universe, GenomeAnnotations};

/// Gene-level quantification table written by the assembler
pub const GENE_TRACKING_FILE: &str = "genes.fpkm_tracking";
/// Transcript-level quantification table
pub const TRANSCRIPT_TABLE_FILE: &str = "t_data.ctab";

/// Parameters of a single sample upload
#[derive(Debug, Clone)]
pub struct UploadParams {
    /// Directory holding the quantification output
    pub source_dir: PathBuf,
    pub genome_ref: String,
    pub condition: Option<String>,
    /// Read transcript-level instead of gene-level levels
    pub transcripts: bool,
    pub description: Option<String>,
    pub platform: Option<String>,
    pub source: Option<String>,
    pub processing_comments: Option<String>,
}

impl UploadParams {
    pub fn new<P: AsRef<Path>>(source_dir: P, genome_ref: &str) -> Self {
        Self {
            source_dir: source_dir.as_ref().to_path_buf(),
            genome_ref: genome_ref.to_string(),
            condition: None,
            transcripts: false,
            description: None,
            platform: None,
            source: None,
            processing_comments: None,
        }
    }

    pub fn with_condition(mut self, condition: &str) -> Self {
        self.condition = Some(condition.to_string());
        self
    }

    pub fn with_transcripts(mut self, transcripts: bool) -> Self {
        self.transcripts = transcripts;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.genome_ref.trim().is_empty() {
            return Err(ExprError::InvalidInput {
                reason: "genome_ref is required".to_string(),
            });
        }
        if !self.source_dir.is_dir() {
            return Err(ExprError::InvalidInput {
                reason: format!("Source directory does not exist: {}", self.source_dir.display()),
            });
        }
        if std::fs::read_dir(&self.source_dir)?.next().is_none() {
            return Err(ExprError::InvalidInput {
                reason: format!("Source directory is empty: {}", self.source_dir.display()),
            });
        }
        Ok(())
    }
}

/// Path of the quantification table to read, and the id column it uses
pub fn quantification_source(params: &UploadParams) -> Result<(PathBuf, ExpressionParams)> {
    let (file_name, expression_params) = if params.transcripts {
        (TRANSCRIPT_TABLE_FILE, ExpressionParams::transcripts())
    } else {
        (GENE_TRACKING_FILE, ExpressionParams::default())
    };

    let path = params.source_dir.join(file_name);
    if !path.is_file() {
        return Err(ExprError::MissingFile {
            path: path.display().to_string(),
        });
    }
    Ok((path, expression_params))
}

/// Compute and package the expression levels of one sample.
///
/// The genome's feature universe is resolved first; every quantified
/// feature must belong to it.
pub fn upload_expression<G>(genomes: &G, params: &UploadParams) -> Result<SampleExpression>
where
    G: GenomeAnnotations + ?Sized,
{
    params.validate()?;
    let (path, expression_params) = quantification_source(params)?;

    let universe = resolve_feature_universe(genomes, &params.genome_ref)?;
    let levels = compute_expression_levels_from_file(&path, &universe, &expression_params)?;
    log::info!(
        "Computed levels for {} features from {}",
        levels.n_features(),
        path.display()
    );

    let mut expression =
        SampleExpression::from_levels(&params.genome_ref, params.condition.clone(), levels);
    expression.description = params.description.clone();
    expression.platform = params.platform.clone();
    expression.source = params.source.clone();
    expression.processing_comments = params.processing_comments.clone();

    Ok(expression)
}
