//! Ancestor-relative queries: depth, seniority and closest common ancestor.
//!
//! All of these walk creator links upwards. The acyclic invariant is
//! enforced by [`Lineage::add_offspring`], so every walk ends at an original.

use tracing::{debug, instrument};

use crate::domain::arena::{Lineage, VampireId};
use crate::domain::error::{DomainError, DomainResult};

/// Walks from a vampire up to its original, yielding the start first.
pub struct Ancestors<'a> {
    lineage: &'a Lineage,
    next: Option<VampireId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = VampireId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.lineage.creator(current);
        Some(current)
    }
}

impl Lineage {
    /// `id` followed by its creator chain up to the original.
    /// Empty for a foreign handle.
    pub fn ancestors(&self, id: VampireId) -> Ancestors<'_> {
        Ancestors {
            lineage: self,
            next: self.get(id).map(|_| id),
        }
    }

    /// Number of creator links between `id` and its original.
    #[instrument(level = "debug", skip(self))]
    pub fn depth_from_root(&self, id: VampireId) -> DomainResult<usize> {
        self.lookup(id)?;
        Ok(self.ancestors(id).skip(1).count())
    }

    /// True iff `a` is strictly closer to its original than `b`.
    #[instrument(level = "debug", skip(self))]
    pub fn is_more_senior_than(&self, a: VampireId, b: VampireId) -> DomainResult<bool> {
        Ok(self.depth_from_root(a)? < self.depth_from_root(b)?)
    }

    /// Original at the top of `id`'s creator chain.
    #[instrument(level = "trace", skip(self))]
    pub fn original_of(&self, id: VampireId) -> DomainResult<VampireId> {
        self.ancestors(id)
            .last()
            .ok_or(DomainError::UnknownVampire(id))
    }

    /// Path from the original down to `id`, both inclusive.
    #[instrument(level = "trace", skip(self))]
    pub fn ancestry_path(&self, id: VampireId) -> DomainResult<Vec<VampireId>> {
        self.lookup(id)?;
        let mut path: Vec<VampireId> = self.ancestors(id).collect();
        path.reverse();
        Ok(path)
    }

    /// True iff `ancestor` lies on `id`'s creator chain. A vampire is its own ancestor.
    #[instrument(level = "trace", skip(self))]
    pub fn is_ancestor_of(&self, ancestor: VampireId, id: VampireId) -> DomainResult<bool> {
        self.lookup(ancestor)?;
        self.lookup(id)?;
        Ok(self.ancestors(id).any(|current| current == ancestor))
    }

    /// Deepest vampire that is an ancestor of (or identical to) both `a` and `b`.
    ///
    /// Both root-to-vampire paths are materialized and walked from the
    /// original while they agree; the last shared entry wins. When one
    /// vampire created the other (directly or not), that vampire is the result.
    ///
    /// # Errors
    /// [`DomainError::DisjointLineages`] when `a` and `b` descend from different originals.
    #[instrument(level = "debug", skip(self))]
    pub fn closest_common_ancestor(&self, a: VampireId, b: VampireId) -> DomainResult<VampireId> {
        let path_a = self.ancestry_path(a)?;
        let path_b = self.ancestry_path(b)?;

        let common = path_a
            .iter()
            .zip(path_b.iter())
            .take_while(|(x, y)| x == y)
            .last()
            .map(|(shared, _)| *shared);

        match common {
            Some(ancestor) => {
                debug!(
                    "closest common ancestor of {} and {}: {}",
                    self.name_of(a),
                    self.name_of(b),
                    self.name_of(ancestor)
                );
                Ok(ancestor)
            }
            None => Err(DomainError::DisjointLineages {
                a: self.name_of(a).to_string(),
                b: self.name_of(b).to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ancestors_of_foreign_handle_is_empty() {
        let lineage = Lineage::new();
        let mut other = Lineage::new();
        let id = other.spawn("elsewhere", 1);
        assert_eq!(lineage.ancestors(id).count(), 0);
        assert!(matches!(
            lineage.depth_from_root(id),
            Err(DomainError::UnknownVampire(_))
        ));
        assert!(lineage.original_of(id).is_err());
    }

    #[test]
    fn test_chain_depths() {
        let mut lineage = Lineage::new();
        let top = lineage.spawn("top", 1);
        let mid = lineage.spawn("mid", 2);
        let low = lineage.spawn("low", 3);
        lineage.add_offspring(top, mid).unwrap();
        lineage.add_offspring(mid, low).unwrap();

        assert_eq!(lineage.depth_from_root(top), Ok(0));
        assert_eq!(lineage.depth_from_root(low), Ok(2));
        assert_eq!(lineage.ancestry_path(low), Ok(vec![top, mid, low]));
        assert_eq!(lineage.original_of(low), Ok(top));
        assert_eq!(lineage.is_ancestor_of(mid, low), Ok(true));
        assert_eq!(lineage.is_ancestor_of(low, mid), Ok(false));
        assert_eq!(lineage.is_ancestor_of(low, low), Ok(true));
    }

    #[test]
    fn test_closest_common_ancestor_across_originals_is_an_error() {
        let mut lineage = Lineage::new();
        let left = lineage.spawn("left", 1);
        let right = lineage.spawn("right", 2);
        assert_eq!(
            lineage.closest_common_ancestor(left, right),
            Err(DomainError::DisjointLineages {
                a: "left".into(),
                b: "right".into()
            })
        );
    }
}
