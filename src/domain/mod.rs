//! Domain layer: lineage model and ancestry queries
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod ancestry;
pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod render;

pub use ancestry::Ancestors;
pub use arena::{Lineage, PostOrderIterator, SubtreeIterator, Vampire, VampireId};
pub use builder::{BuiltLineage, LineageBuilder};
pub use entities::{sample_records, VampireRecord};
pub use error::{DomainError, DomainResult};
pub use render::LineageRender;
