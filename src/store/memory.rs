//! In-memory object store

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::{GenomeAnnotations, ObjectStore, StoredObject};
use crate::error::{ExprError, Result};

/// Object store and genome annotations held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    objects: HashMap<String, StoredObject>,
    /// genome ref -> feature id -> description, kept sorted by id
    genomes: HashMap<String, BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an object under `reference`
    pub fn insert_object<T: Serialize>(
        &mut self,
        reference: &str,
        name: &str,
        type_name: &str,
        data: &T,
    ) -> Result<()> {
        let object = StoredObject {
            name: name.to_string(),
            type_name: type_name.to_string(),
            data: serde_json::to_value(data)?,
        };
        self.objects.insert(reference.to_string(), object);
        Ok(())
    }

    /// Register a genome's features as (id, description) pairs
    pub fn insert_genome<I, S, D>(&mut self, genome_ref: &str, features: I)
    where
        I: IntoIterator<Item = (S, D)>,
        S: Into<String>,
        D: Into<String>,
    {
        let features = features
            .into_iter()
            .map(|(id, desc)| (id.into(), desc.into()))
            .collect();
        self.genomes.insert(genome_ref.to_string(), features);
    }

    fn genome(&self, genome_ref: &str) -> Result<&BTreeMap<String, String>> {
        self.genomes.get(genome_ref).ok_or_else(|| ExprError::Lookup {
            reference: genome_ref.to_string(),
            reason: "genome not found".to_string(),
        })
    }
}

impl ObjectStore for MemoryStore {
    fn get_object(&self, reference: &str) -> Result<StoredObject> {
        self.objects.get(reference).cloned().ok_or_else(|| ExprError::Lookup {
            reference: reference.to_string(),
            reason: "object not found".to_string(),
        })
    }
}

impl GenomeAnnotations for MemoryStore {
    fn feature_count(&self, genome_ref: &str) -> Result<usize> {
        Ok(self.genome(genome_ref)?.len())
    }

    fn feature_ids(&self, genome_ref: &str, limit: usize) -> Result<Vec<String>> {
        Ok(self.genome(genome_ref)?.keys().take(limit).cloned().collect())
    }

    fn feature_descriptions(&self, genome_ref: &str) -> Result<HashMap<String, String>> {
        Ok(self
            .genome(genome_ref)?
            .iter()
            .filter(|(_, desc)| !desc.is_empty())
            .map(|(id, desc)| (id.clone(), desc.clone()))
            .collect())
    }
}
