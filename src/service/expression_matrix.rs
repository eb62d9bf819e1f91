//! Expression matrices for a stored expression set

use crate::data::{
    is_type, ExpressionMatrix, ExpressionSetSource, ResolvedExpressionSet, SampleExpression,
    SampleExpressionTable, FPKM_INTERPRETATION,
};
use crate::error::{ExprError, Result};
use crate::matrix::build_level_matrices;
use crate::store::ObjectStore;

/// Type of a stored single-sample expression
pub const SAMPLE_EXPRESSION_TYPE: &str = "KBaseRNASeq.RNASeqExpression";

/// Parameters of an expression matrix build
#[derive(Debug, Clone)]
pub struct MatrixParams {
    pub expression_set_ref: String,
    /// Prefix of the output matrix names
    pub output_obj_name: String,
}

impl MatrixParams {
    pub fn new(expression_set_ref: &str, output_obj_name: &str) -> Self {
        Self {
            expression_set_ref: expression_set_ref.to_string(),
            output_obj_name: output_obj_name.to_string(),
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("expressionset_ref", &self.expression_set_ref),
            ("output_obj_name", &self.output_obj_name),
        ] {
            if value.trim().is_empty() {
                return Err(ExprError::InvalidInput {
                    reason: format!("\"{}\" parameter is required, but missing", name),
                });
            }
        }
        Ok(())
    }
}

/// An output matrix with the name it should be stored under
#[derive(Debug, Clone)]
pub struct NamedMatrix {
    pub name: String,
    pub matrix: ExpressionMatrix,
}

/// FPKM matrix, plus TPM when any sample carried TPM levels
#[derive(Debug, Clone)]
pub struct ExpressionMatrixOutput {
    pub fpkm: NamedMatrix,
    pub tpm: Option<NamedMatrix>,
}

/// Load a stored sample and check it holds FPKM levels
fn load_sample<S>(store: &S, reference: &str) -> Result<SampleExpressionTable>
where
    S: ObjectStore + ?Sized,
{
    let object = store.get_object(reference)?;
    if !is_type(&object.type_name, SAMPLE_EXPRESSION_TYPE) {
        return Err(ExprError::UnsupportedObjectType {
            reference: reference.to_string(),
            found: object.type_name,
        });
    }
    let expression: SampleExpression = object.decode(reference)?;

    if expression.numerical_interpretation != FPKM_INTERPRETATION {
        return Err(ExprError::UnexpectedInterpretation {
            reference: reference.to_string(),
            found: expression.numerical_interpretation,
        });
    }
    if let Some(comments) = &expression.processing_comments {
        log::info!("{}: processing comments: {}", object.name, comments);
    }
    log::info!(
        "{}: {} FPKM features, {} TPM features",
        object.name,
        expression.expression_levels.len(),
        expression.tpm_expression_levels.as_ref().map_or(0, |t| t.len())
    );

    Ok(SampleExpressionTable::new(&object.name, expression))
}

/// Resolve an expression set reference into its genome and sample list
pub fn resolve_expression_set<S>(store: &S, reference: &str) -> Result<ResolvedExpressionSet>
where
    S: ObjectStore + ?Sized,
{
    let object = store.get_object(reference)?;
    let source = ExpressionSetSource::parse(reference, &object.type_name, &object.data)?;
    let sample_refs = source.sample_refs().to_vec();

    let genome_ref = match source.genome_ref() {
        Some(genome_ref) => genome_ref.to_string(),
        None => {
            let first = sample_refs.first().ok_or_else(|| ExprError::InvalidInput {
                reason: format!("expression set {} has no items", reference),
            })?;
            let sample: SampleExpression = store.get_object(first)?.decode(first)?;
            sample.genome_id
        }
    };

    Ok(ResolvedExpressionSet {
        genome_ref,
        sample_refs,
    })
}

/// Load every sample of a resolved set, in set order
pub fn load_sample_tables<S>(
    store: &S,
    set: &ResolvedExpressionSet,
) -> Result<Vec<SampleExpressionTable>>
where
    S: ObjectStore + ?Sized,
{
    set.sample_refs
        .iter()
        .map(|reference| {
            log::info!("Loading expression {}", reference);
            load_sample(store, reference)
        })
        .collect()
}

/// Build FPKM and TPM expression matrices for an expression set
pub fn build_expression_matrices<S>(
    store: &S,
    params: &MatrixParams,
) -> Result<ExpressionMatrixOutput>
where
    S: ObjectStore + ?Sized,
{
    params.validate()?;

    let set = resolve_expression_set(store, &params.expression_set_ref)?;
    let tables = load_sample_tables(store, &set)?;
    let matrices = build_level_matrices(&tables, &set.genome_ref)?;

    Ok(ExpressionMatrixOutput {
        fpkm: NamedMatrix {
            name: format!("{}_FPKM_ExpressionMatrix", params.output_obj_name),
            matrix: matrices.fpkm,
        },
        tpm: matrices.tpm.map(|matrix| NamedMatrix {
            name: format!("{}_TPM_ExpressionMatrix", params.output_obj_name),
            matrix,
        }),
    })
}
