//! Lineage query service
//!
//! Resolves vampire names against a built lineage and answers ancestry
//! questions with vampires instead of raw handles.

use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{
    sample_records, BuiltLineage, Lineage, LineageBuilder, LineageRender, Vampire, VampireId,
};

/// Shape of the subtree below one vampire.
#[derive(Debug)]
pub struct SubtreeStats<'a> {
    /// Original at the top of the vampire's creator chain
    pub original: &'a Vampire,
    /// Generations in the subtree, the vampire itself counts as one
    pub height: usize,
    /// Vampires without offspring, in pre-order
    pub leaves: Vec<&'a Vampire>,
}

/// Service for querying one lineage by vampire name.
#[derive(Debug)]
pub struct LineageService {
    built: BuiltLineage,
    millennial_year: i32,
}

impl LineageService {
    /// Create a service over an already built lineage.
    pub fn new(built: BuiltLineage, millennial_year: i32) -> Self {
        Self {
            built,
            millennial_year,
        }
    }

    /// Build the lineage declared in settings, or the sample lineage if none is declared.
    #[instrument(level = "debug", skip(settings))]
    pub fn from_settings(settings: &Settings) -> ApplicationResult<Self> {
        let records = if settings.lineage.is_empty() {
            debug!("no lineage configured, using sample lineage");
            sample_records()
        } else {
            settings.lineage.clone()
        };
        let built = LineageBuilder::with_records(records).build()?;
        Ok(Self::new(built, settings.millennial_year))
    }

    pub fn lineage(&self) -> &Lineage {
        &self.built.lineage
    }

    pub fn millennial_year(&self) -> i32 {
        self.millennial_year
    }

    pub fn resolve(&self, name: &str) -> ApplicationResult<VampireId> {
        self.built
            .id(name)
            .ok_or_else(|| ApplicationError::VampireNotFound(name.to_string()))
    }

    fn vampires(&self, ids: &[VampireId]) -> Vec<&Vampire> {
        ids.iter().filter_map(|&id| self.lineage().get(id)).collect()
    }

    pub fn creator_of(&self, name: &str) -> ApplicationResult<Option<&Vampire>> {
        let id = self.resolve(name)?;
        Ok(self
            .lineage()
            .creator(id)
            .and_then(|creator| self.lineage().get(creator)))
    }

    pub fn offspring_of(&self, name: &str) -> ApplicationResult<Vec<&Vampire>> {
        let id = self.resolve(name)?;
        Ok(self.vampires(self.lineage().offspring(id)))
    }

    pub fn depth_of(&self, name: &str) -> ApplicationResult<usize> {
        let id = self.resolve(name)?;
        Ok(self.lineage().depth_from_root(id)?)
    }

    pub fn is_more_senior(&self, a: &str, b: &str) -> ApplicationResult<bool> {
        let (a, b) = (self.resolve(a)?, self.resolve(b)?);
        Ok(self.lineage().is_more_senior_than(a, b)?)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn closest_common_ancestor(&self, a: &str, b: &str) -> ApplicationResult<&Vampire> {
        let (a, b) = (self.resolve(a)?, self.resolve(b)?);
        let ancestor = self.lineage().closest_common_ancestor(a, b)?;
        Ok(self.lineage().lookup(ancestor)?)
    }

    pub fn total_descendants(&self, name: &str) -> ApplicationResult<usize> {
        let id = self.resolve(name)?;
        Ok(self.lineage().total_descendants(id))
    }

    /// Search `target` below `from`, or below every original in creation order.
    #[instrument(level = "debug", skip(self))]
    pub fn find(&self, target: &str, from: Option<&str>) -> ApplicationResult<Option<&Vampire>> {
        let starts = match from {
            Some(name) => vec![self.resolve(name)?],
            None => self.lineage().roots().to_vec(),
        };
        Ok(starts
            .into_iter()
            .find_map(|start| self.lineage().find_by_name(start, target))
            .and_then(|found| self.lineage().get(found)))
    }

    /// Vampires below and including `name` converted after `year`
    /// (the configured millennial year when None).
    pub fn converted_after(
        &self,
        name: &str,
        year: Option<i32>,
    ) -> ApplicationResult<(i32, Vec<&Vampire>)> {
        let id = self.resolve(name)?;
        let year = year.unwrap_or(self.millennial_year);
        let ids = self.lineage().descendants_after(id, year);
        Ok((year, self.vampires(&ids)))
    }

    /// Vampires from the original down to `name`.
    pub fn path_to(&self, name: &str) -> ApplicationResult<Vec<&Vampire>> {
        let id = self.resolve(name)?;
        let path = self.lineage().ancestry_path(id)?;
        Ok(self.vampires(&path))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn stats(&self, name: &str) -> ApplicationResult<SubtreeStats<'_>> {
        let id = self.resolve(name)?;
        let lineage = self.lineage();
        Ok(SubtreeStats {
            original: lineage.lookup(lineage.original_of(id)?)?,
            height: lineage.height(id),
            leaves: self.vampires(&lineage.leaves(id)),
        })
    }

    pub fn render(&self) -> Vec<Tree<String>> {
        self.lineage().to_forest_strings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> LineageService {
        LineageService::from_settings(&Settings::default()).unwrap()
    }

    #[test]
    fn test_default_settings_use_sample_lineage() {
        let service = service();
        assert_eq!(service.lineage().len(), 6);
        assert_eq!(service.millennial_year(), 1980);
    }

    #[test]
    fn test_unknown_name_is_not_found() {
        let err = service().depth_of("Nobody").unwrap_err();
        assert!(matches!(err, ApplicationError::VampireNotFound(name) if name == "Nobody"));
    }

    #[test]
    fn test_converted_after_defaults_to_millennial_year() {
        let service = service();
        let (year, found) = service.converted_after("Original", None).unwrap();
        assert_eq!(year, 1980);
        let names: Vec<&str> = found.iter().map(|v| v.name()).collect();
        assert_eq!(names, vec!["Andrew"]);
    }

    #[test]
    fn test_stats_describe_subtree_shape() {
        let service = service();
        let stats = service.stats("Ansel").unwrap();
        assert_eq!(stats.original.name(), "Original");
        assert_eq!(stats.height, 3);
        let leaves: Vec<&str> = stats.leaves.iter().map(|v| v.name()).collect();
        assert_eq!(leaves, vec!["Andrew", "Sarah"]);

        let leaf = service.stats("Bart").unwrap();
        assert_eq!(leaf.height, 1);
        assert_eq!(leaf.leaves.len(), 1);
    }

    #[test]
    fn test_find_without_start_searches_all_originals() {
        let settings = Settings {
            lineage: vec![
                crate::domain::VampireRecord::original("First", 1),
                crate::domain::VampireRecord::original("Second", 2),
                crate::domain::VampireRecord::offspring("Deep", 3, "Second"),
            ],
            ..Settings::default()
        };
        let service = LineageService::from_settings(&settings).unwrap();
        assert_eq!(service.find("Deep", None).unwrap().map(Vampire::name), Some("Deep"));
        assert!(service.find("Deep", Some("First")).unwrap().is_none());
    }
}
