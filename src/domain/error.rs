//! Domain-level errors (no I/O)

use thiserror::Error;

use crate::domain::arena::VampireId;

/// Domain errors represent violations of the lineage invariants.
/// A failed operation never leaves the lineage half-mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown vampire: {0}")]
    UnknownVampire(VampireId),

    #[error("{child} already has a creator: {creator}")]
    AlreadyHasCreator { child: String, creator: String },

    #[error("cycle detected in lineage at: {0}")]
    CycleDetected(String),

    #[error("{a} and {b} do not share a lineage")]
    DisjointLineages { a: String, b: String },

    #[error("unknown creator {creator} declared for {name}")]
    UnknownCreator { name: String, creator: String },

    #[error("duplicate vampire name: {0}")]
    DuplicateName(String),

    #[error("vampire name must not be empty")]
    EmptyName,
}

/// Result type for lineage operations.
pub type DomainResult<T> = Result<T, DomainError>;
