//! Repository Traits

use std::path::PathBuf;

use crate::error::ToolResult;

/// Where submitted contact forms end up
#[trait_variant::make(ContactStore: Send)]
pub trait LocalContactStore {
    /// Persist `body` and return where it went.
    async fn save(&self, kind: &str, body: &[u8]) -> ToolResult<PathBuf>;
}
