//! Enhanced filtered expression matrix for a stored filtered matrix

use std::collections::HashMap;

use crate::data::{DifferentialExpressionMatrix, EnhancedMatrix, FilteredExpressionMatrix};
use crate::error::{ExprError, Result};
use crate::matrix::{build_enhanced_matrix, DifferentialExpressionLookup};
use crate::store::{GenomeAnnotations, ObjectStore};

/// Parameters of an enhanced matrix request
#[derive(Debug, Clone)]
pub struct EnhancedFemParams {
    pub fem_object_ref: String,
}

impl EnhancedFemParams {
    pub fn new(fem_object_ref: &str) -> Self {
        Self {
            fem_object_ref: fem_object_ref.to_string(),
        }
    }
}

/// Load the differential expression matrix a filtered matrix links to
pub fn load_dem_lookup<S>(
    store: &S,
    fem: &FilteredExpressionMatrix,
) -> Result<Option<DifferentialExpressionLookup>>
where
    S: ObjectStore + ?Sized,
{
    let Some(dem_ref) = fem.dem_link() else {
        return Ok(None);
    };
    log::info!("Reading differential expression values from {}", dem_ref);
    let dem: DifferentialExpressionMatrix = store.get_object(dem_ref)?.decode(dem_ref)?;
    DifferentialExpressionLookup::from_matrix(&dem).map(Some)
}

/// Load a filtered matrix and build its enhanced matrix.
///
/// Descriptions come from the matrix's genome; fold change and q-value come
/// from the differential expression matrix linked by
/// `diff_expr_matrix_ref`, when present.
pub fn get_enhanced_fem<S, G>(
    store: &S,
    genomes: &G,
    params: &EnhancedFemParams,
) -> Result<EnhancedMatrix>
where
    S: ObjectStore + ?Sized,
    G: GenomeAnnotations + ?Sized,
{
    if params.fem_object_ref.trim().is_empty() {
        return Err(ExprError::InvalidInput {
            reason: "fem_object_ref parameter not given".to_string(),
        });
    }

    let fem: FilteredExpressionMatrix = store
        .get_object(&params.fem_object_ref)?
        .decode(&params.fem_object_ref)?;

    let descriptions = match fem.genome_ref.as_deref() {
        Some(genome_ref) => genomes.feature_descriptions(genome_ref)?,
        None => {
            log::warn!(
                "{} has no genome_ref; descriptions will be NA",
                params.fem_object_ref
            );
            HashMap::new()
        }
    };
    let dem = load_dem_lookup(store, &fem)?;

    build_enhanced_matrix(&fem, &descriptions, dem.as_ref())
}
