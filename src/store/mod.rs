//! External collaborators: object store and genome annotations
//!
//! The computation reads stored objects and genome features through these
//! traits only. Any retry or authentication policy belongs to the
//! implementation behind them.

mod memory;

pub use memory::MemoryStore;

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::data::FeatureUniverse;
use crate::error::{ExprError, Result};

/// A stored object with its name and declared type
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub name: String,
    pub type_name: String,
    pub data: Value,
}

impl StoredObject {
    /// Deserialize the object payload into a typed shape
    pub fn decode<T: DeserializeOwned>(&self, reference: &str) -> Result<T> {
        serde_json::from_value(self.data.clone()).map_err(|e| ExprError::Lookup {
            reference: reference.to_string(),
            reason: format!("{} object does not match expected shape: {}", self.type_name, e),
        })
    }
}

/// Key-value object store addressed by reference strings
pub trait ObjectStore {
    fn get_object(&self, reference: &str) -> Result<StoredObject>;
}

/// Feature listings and descriptions for genomes
pub trait GenomeAnnotations {
    /// Total number of features in the genome
    fn feature_count(&self, genome_ref: &str) -> Result<usize>;

    /// Up to `limit` feature ids, sorted by id
    fn feature_ids(&self, genome_ref: &str, limit: usize) -> Result<Vec<String>>;

    /// feature id -> human-readable function description
    fn feature_descriptions(&self, genome_ref: &str) -> Result<HashMap<String, String>>;
}

/// Resolve every feature id of a genome.
///
/// The full count is requested first and then exactly that many ids are
/// fetched, so the universe is never silently truncated.
pub fn resolve_feature_universe<G>(genomes: &G, genome_ref: &str) -> Result<FeatureUniverse>
where
    G: GenomeAnnotations + ?Sized,
{
    let count = genomes.feature_count(genome_ref)?;
    let mut ids = genomes.feature_ids(genome_ref, count)?;

    if ids.len() != count {
        return Err(ExprError::Lookup {
            reference: genome_ref.to_string(),
            reason: format!("expected {} feature ids, received {}", count, ids.len()),
        });
    }

    ids.sort_unstable();
    ids.dedup();
    log::info!("Resolved {} feature ids for genome {}", ids.len(), genome_ref);

    Ok(FeatureUniverse::new(genome_ref, ids))
}
