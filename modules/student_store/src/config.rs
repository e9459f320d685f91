use serde::{Deserialize, Serialize};

/// Record store server configuration (`modules.student_store`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudentStoreConfig {
    /// Start with the sample record instead of an empty store.
    #[serde(default = "default_seed")]
    pub seed: bool,
    /// Browser origins allowed to call the API.
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
}

impl Default for StudentStoreConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            cors_allowed_origins: default_cors_allowed_origins(),
        }
    }
}

fn default_seed() -> bool {
    true
}

fn default_cors_allowed_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}
