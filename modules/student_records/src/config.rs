use serde::{Deserialize, Serialize};

/// Configuration of the record table and its store client
/// (`modules.student_records` in the app config).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudentRecordsConfig {
    /// Base address of the record store; `/students` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Initial rows per page; must be one of 5, 10, 25, 100.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

impl Default for StudentRecordsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_page_size: default_page_size(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_page_size() -> u32 {
    10
}
