//! Domain entities: declarative lineage records

use serde::{Deserialize, Serialize};

/// Declarative description of one vampire, as found in a config file.
///
/// ```toml
/// [[lineage]]
/// name = "Ansel"
/// year = 800
/// creator = "Original"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VampireRecord {
    pub name: String,
    pub year: i32,
    /// Name of the creator, None for an original
    #[serde(default)]
    pub creator: Option<String>,
}

impl VampireRecord {
    pub fn original(name: &str, year: i32) -> Self {
        Self {
            name: name.to_string(),
            year,
            creator: None,
        }
    }

    pub fn offspring(name: &str, year: i32, creator: &str) -> Self {
        Self {
            name: name.to_string(),
            year,
            creator: Some(creator.to_string()),
        }
    }
}

/// The built-in demo lineage.
///
/// ```text
/// Original (300)
/// ├── Ansel (800)
/// │   ├── Elgort (1500)
/// │   │   └── Andrew (2000)
/// │   └── Sarah (1600)
/// └── Bart (1000)
/// ```
pub fn sample_records() -> Vec<VampireRecord> {
    vec![
        VampireRecord::original("Original", 300),
        VampireRecord::offspring("Ansel", 800, "Original"),
        VampireRecord::offspring("Bart", 1000, "Original"),
        VampireRecord::offspring("Elgort", 1500, "Ansel"),
        VampireRecord::offspring("Sarah", 1600, "Ansel"),
        VampireRecord::offspring("Andrew", 2000, "Elgort"),
    ]
}
