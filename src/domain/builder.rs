//! Lineage builder: wires declarative records into a [`Lineage`].

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::domain::arena::{Lineage, VampireId};
use crate::domain::entities::VampireRecord;
use crate::domain::error::{DomainError, DomainResult};

/// A built lineage together with its name index.
#[derive(Debug)]
pub struct BuiltLineage {
    pub lineage: Lineage,
    pub by_name: HashMap<String, VampireId>,
}

impl BuiltLineage {
    pub fn id(&self, name: &str) -> Option<VampireId> {
        self.by_name.get(name).copied()
    }
}

/// Constructs a lineage from records.
///
/// Vampires are spawned in declaration order and attached in declaration
/// order, so siblings keep the order in which they were declared.
#[derive(Debug, Default)]
pub struct LineageBuilder {
    records: Vec<VampireRecord>,
}

impl LineageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = VampireRecord>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    pub fn push(&mut self, record: VampireRecord) -> &mut Self {
        self.records.push(record);
        self
    }

    #[instrument(level = "debug", skip(self))]
    pub fn build(&self) -> DomainResult<BuiltLineage> {
        let mut lineage = Lineage::new();
        let mut by_name: HashMap<String, VampireId> = HashMap::new();
        let mut spawned: Vec<VampireId> = Vec::with_capacity(self.records.len());

        for record in &self.records {
            if record.name.trim().is_empty() {
                return Err(DomainError::EmptyName);
            }
            if by_name.contains_key(&record.name) {
                return Err(DomainError::DuplicateName(record.name.clone()));
            }
            let id = lineage.spawn(&record.name, record.year);
            by_name.insert(record.name.clone(), id);
            spawned.push(id);
        }

        for (record, &child) in self.records.iter().zip(&spawned) {
            let Some(creator) = &record.creator else {
                continue;
            };
            let parent = by_name
                .get(creator)
                .copied()
                .ok_or_else(|| DomainError::UnknownCreator {
                    name: record.name.clone(),
                    creator: creator.clone(),
                })?;
            lineage.add_offspring(parent, child)?;
        }

        debug!(
            "built lineage with {} vampires and {} originals",
            lineage.len(),
            lineage.roots().len()
        );
        Ok(BuiltLineage { lineage, by_name })
    }
}
