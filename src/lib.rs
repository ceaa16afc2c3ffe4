//! bloodline: vampire lineage trees.
//!
//! A [`domain::Lineage`] owns a forest of vampires linked by creator and
//! offspring edges and answers ancestry queries over it: creator lookup,
//! offspring count, depth from the original, seniority, closest common
//! ancestor, descendant counting, name search and filtering by conversion year.
//!
//! ```
//! use bloodline::domain::Lineage;
//!
//! let mut lineage = Lineage::new();
//! let original = lineage.spawn("Original", 300);
//! let ansel = lineage.spawn("Ansel", 800);
//! let sarah = lineage.spawn("Sarah", 1600);
//! lineage.add_offspring(original, ansel)?;
//! lineage.add_offspring(ansel, sarah)?;
//!
//! assert_eq!(lineage.depth_from_root(sarah)?, 2);
//! assert_eq!(lineage.closest_common_ancestor(ansel, sarah)?, ansel);
//! assert_eq!(lineage.total_descendants(original), 2);
//! # Ok::<(), bloodline::domain::DomainError>(())
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
