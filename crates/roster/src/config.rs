//! Global list configuration.

use serde::{Deserialize, Serialize};

/// Immutable configuration shared by the query builder and value accessor.
///
/// Injected explicitly at construction rather than read from ambient state,
/// so two lists with different settings can coexist in one process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    /// Alias of the base entity in the assembled query.
    #[serde(default = "default_base_alias")]
    pub base_alias: String,

    /// Identifier property of the base entity (group-by target).
    #[serde(default = "default_identifier")]
    pub identifier: String,

    /// Whether header labels are translated.
    #[serde(default)]
    pub translate: bool,

    /// Translation domain for header labels.
    pub translation_domain: Option<String>,
}

fn default_base_alias() -> String {
    "l".to_string()
}

fn default_identifier() -> String {
    "id".to_string()
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            base_alias: default_base_alias(),
            identifier: default_identifier(),
            translate: false,
            translation_domain: None,
        }
    }
}
