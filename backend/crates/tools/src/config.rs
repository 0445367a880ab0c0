//! Tools Configuration

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ToolsConfig {
    /// Directory receiving one JSON file per submitted contact form
    pub contact_storage_dir: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            contact_storage_dir: PathBuf::from("./storage"),
        }
    }
}
