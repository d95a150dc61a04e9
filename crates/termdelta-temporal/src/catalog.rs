//! Named auxiliary relations available to an engine.

use rustc_hash::FxHashMap;

use termdelta_core::errors::TemporalError;

use crate::resolve::RelationIndex;

#[derive(Debug, Default)]
pub struct RelationCatalog {
    relations: FxHashMap<String, RelationIndex>,
}

impl RelationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an index under its own name, replacing any previous one.
    pub fn insert(&mut self, index: RelationIndex) -> Option<RelationIndex> {
        self.relations.insert(index.name().to_string(), index)
    }

    pub fn get(&self, name: &str) -> Result<&RelationIndex, TemporalError> {
        self.relations
            .get(name)
            .ok_or_else(|| TemporalError::UnknownRelation {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.relations.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.relations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::TimelineSet;

    #[test]
    fn unknown_name_is_an_error() {
        let mut catalog = RelationCatalog::new();
        catalog.insert(RelationIndex::new("fsn", TimelineSet::new()));
        assert!(catalog.get("fsn").is_ok());
        assert!(catalog.contains("fsn"));
        assert!(!catalog.contains("fns"));
        assert_eq!(
            catalog.get("fns").unwrap_err(),
            TemporalError::UnknownRelation { name: "fns".to_string() }
        );
        assert_eq!(catalog.names(), ["fsn"]);
    }
}
