//! Set of feature identifiers known for one genome

use std::collections::HashSet;

/// Valid feature ids for a genome.
///
/// Built once per genome reference and never mutated afterwards. Rows of a
/// quantification file are accepted only when their id is a member.
#[derive(Debug, Clone, Default)]
pub struct FeatureUniverse {
    genome_ref: String,
    ids: HashSet<String>,
}

impl FeatureUniverse {
    /// Create a universe from any collection of ids; duplicates collapse
    pub fn new<I, S>(genome_ref: &str, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            genome_ref: genome_ref.to_string(),
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Genome reference this universe was resolved from
    pub fn genome_ref(&self) -> &str {
        &self.genome_ref
    }

    pub fn contains(&self, feature_id: &str) -> bool {
        self.ids.contains(feature_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in sorted order
    pub fn sorted_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.ids.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
