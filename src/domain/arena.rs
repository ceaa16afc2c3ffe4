use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};

/// Handle of a vampire inside a [`Lineage`].
///
/// Handles carry the tag of the lineage that issued them, so a handle
/// from another lineage is never mistaken for one of ours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VampireId {
    lineage: u64,
    index: Index,
}

impl fmt::Display for VampireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.index.into_raw_parts();
        write!(f, "#{}:{}.{}", self.lineage, slot, generation)
    }
}

static NEXT_LINEAGE_TAG: AtomicU64 = AtomicU64::new(0);

/// One vampire in the lineage.
#[derive(Debug, Clone)]
pub struct Vampire {
    name: String,
    year_converted: i32,
    /// Creator of this vampire, None for an original
    creator: Option<VampireId>,
    /// Offspring in the order they were added
    offspring: Vec<VampireId>,
}

impl Vampire {
    fn new(name: String, year_converted: i32) -> Self {
        Self {
            name,
            year_converted,
            creator: None,
            offspring: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn year_converted(&self) -> i32 {
        self.year_converted
    }

    pub fn creator(&self) -> Option<VampireId> {
        self.creator
    }

    pub fn offspring(&self) -> &[VampireId] {
        &self.offspring
    }

    pub fn is_original(&self) -> bool {
        self.creator.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.offspring.is_empty()
    }
}

impl fmt::Display for Vampire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.year_converted)
    }
}

/// Arena-based forest of vampires.
///
/// The arena owns every vampire. Creator and offspring links are plain
/// handles, so the back-reference to a creator never owns anything.
/// Each vampire is attached at most once and never moved afterwards.
#[derive(Debug)]
pub struct Lineage {
    tag: u64,
    arena: Arena<Vampire>,
    /// Originals in creation order
    roots: Vec<VampireId>,
}

impl Default for Lineage {
    fn default() -> Self {
        Self::new()
    }
}

impl Lineage {
    pub fn new() -> Self {
        Self {
            tag: NEXT_LINEAGE_TAG.fetch_add(1, Ordering::Relaxed),
            arena: Arena::new(),
            roots: Vec::new(),
        }
    }

    /// Creates a standalone vampire without creator or offspring.
    #[instrument(level = "trace", skip(self))]
    pub fn spawn(&mut self, name: &str, year_converted: i32) -> VampireId {
        let index = self.arena.insert(Vampire::new(name.to_string(), year_converted));
        let id = VampireId {
            lineage: self.tag,
            index,
        };
        self.roots.push(id);
        id
    }

    /// Attaches `child` as the newest offspring of `parent`.
    ///
    /// Rejects a child that already has a creator and any edge that would
    /// make a vampire its own ancestor. Nothing is mutated on error.
    #[instrument(level = "debug", skip(self))]
    pub fn add_offspring(&mut self, parent: VampireId, child: VampireId) -> DomainResult<()> {
        let child_node = self.lookup(child)?;
        let parent_node = self.lookup(parent)?;

        if let Some(existing) = child_node.creator {
            return Err(DomainError::AlreadyHasCreator {
                child: child_node.name.clone(),
                creator: self.lookup(existing)?.name.clone(),
            });
        }
        // child is an original here, so it is an ancestor of parent iff it is parent's root
        if self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(DomainError::CycleDetected(parent_node.name.clone()));
        }

        if let Some(node) = self.arena.get_mut(parent.index) {
            node.offspring.push(child);
        }
        if let Some(node) = self.arena.get_mut(child.index) {
            node.creator = Some(parent);
        }
        self.roots.retain(|&root| root != child);
        debug!("attached {} below {}", child, parent);
        Ok(())
    }

    /// None for a handle issued by another lineage.
    pub fn get(&self, id: VampireId) -> Option<&Vampire> {
        if id.lineage != self.tag {
            return None;
        }
        self.arena.get(id.index)
    }

    pub(crate) fn lookup(&self, id: VampireId) -> DomainResult<&Vampire> {
        self.get(id).ok_or(DomainError::UnknownVampire(id))
    }

    /// Name of a vampire, `"?"` for a foreign handle.
    pub fn name_of(&self, id: VampireId) -> &str {
        self.get(id).map(Vampire::name).unwrap_or("?")
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Originals (vampires without creator) in creation order.
    pub fn roots(&self) -> &[VampireId] {
        &self.roots
    }

    #[instrument(level = "trace", skip(self))]
    pub fn creator(&self, id: VampireId) -> Option<VampireId> {
        self.get(id).and_then(Vampire::creator)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn offspring(&self, id: VampireId) -> &[VampireId] {
        self.get(id).map(Vampire::offspring).unwrap_or(&[])
    }

    #[instrument(level = "trace", skip(self))]
    pub fn offspring_count(&self, id: VampireId) -> usize {
        self.offspring(id).len()
    }

    /// Depth-first pre-order iterator over the subtree rooted at `id`.
    pub fn iter_from(&self, id: VampireId) -> SubtreeIterator<'_> {
        SubtreeIterator::new(self, id)
    }

    /// Post-order iterator over the subtree rooted at `id`.
    pub fn iter_postorder_from(&self, id: VampireId) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, id)
    }

    /// Visits `id` and then its offspring, depth-first in pre-order.
    #[instrument(level = "debug", skip(self, visit))]
    pub fn depth_first_traversal<F>(&self, id: VampireId, mut visit: F)
    where
        F: FnMut(VampireId, &Vampire),
    {
        for (current, vampire) in self.iter_from(id) {
            visit(current, vampire);
        }
    }

    /// First vampire named `name` in pre-order below and including `id`.
    #[instrument(level = "debug", skip(self))]
    pub fn find_by_name(&self, id: VampireId, name: &str) -> Option<VampireId> {
        self.iter_from(id)
            .find(|(_, vampire)| vampire.name == name)
            .map(|(found, _)| found)
    }

    /// Number of vampires strictly below `id`.
    #[instrument(level = "debug", skip(self))]
    pub fn total_descendants(&self, id: VampireId) -> usize {
        self.iter_from(id).skip(1).count()
    }

    /// Vampires of the subtree (including `id`) converted strictly after
    /// `year`, in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn descendants_after(&self, id: VampireId, year: i32) -> Vec<VampireId> {
        self.iter_from(id)
            .filter(|(_, vampire)| vampire.year_converted > year)
            .map(|(found, _)| found)
            .collect()
    }

    /// Leaves of the subtree rooted at `id`, in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaves(&self, id: VampireId) -> Vec<VampireId> {
        self.iter_from(id)
            .filter(|(_, vampire)| vampire.is_leaf())
            .map(|(leaf, _)| leaf)
            .collect()
    }

    /// Number of levels of the subtree rooted at `id`; a leaf has height 1.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self, id: VampireId) -> usize {
        let mut heights: HashMap<VampireId, usize> = HashMap::new();
        for (current, vampire) in self.iter_postorder_from(id) {
            let below = vampire
                .offspring
                .iter()
                .filter_map(|child| heights.get(child))
                .max()
                .copied()
                .unwrap_or(0);
            heights.insert(current, below + 1);
        }
        heights.get(&id).copied().unwrap_or(0)
    }
}

pub struct SubtreeIterator<'a> {
    lineage: &'a Lineage,
    stack: Vec<VampireId>,
}

impl<'a> SubtreeIterator<'a> {
    fn new(lineage: &'a Lineage, start: VampireId) -> Self {
        Self {
            lineage,
            stack: vec![start],
        }
    }
}

impl<'a> Iterator for SubtreeIterator<'a> {
    type Item = (VampireId, &'a Vampire);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(vampire) = self.lineage.get(current) {
                // Push offspring in reverse order for left-to-right traversal
                self.stack.extend(vampire.offspring.iter().rev());
                return Some((current, vampire));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    lineage: &'a Lineage,
    stack: Vec<(VampireId, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(lineage: &'a Lineage, start: VampireId) -> Self {
        Self {
            lineage,
            stack: vec![(start, false)],
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (VampireId, &'a Vampire);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            if let Some(vampire) = self.lineage.get(current) {
                if visited {
                    return Some((current, vampire));
                }
                self.stack.push((current, true));
                for &child in vampire.offspring.iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}
