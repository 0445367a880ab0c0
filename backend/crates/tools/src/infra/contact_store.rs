//! Contact storage
//!
//! One pretty-printed JSON file per submission, named
//! `<kind>_<YYYYmmddHHMMSSffffff>.json`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Local;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::repository::ContactStore;
use crate::error::ToolResult;

/// Writes into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct JsonFileContactStore {
    dir: PathBuf,
}

impl JsonFileContactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ContactStore for JsonFileContactStore {
    async fn save(&self, kind: &str, body: &[u8]) -> ToolResult<PathBuf> {
        fs::create_dir_all(&self.dir).await?;

        let stamp = Local::now().format("%Y%m%d%H%M%S%6f").to_string();
        let mut attempt = 0u32;
        loop {
            let name = match attempt {
                0 => format!("{kind}_{stamp}.json"),
                n => format!("{kind}_{stamp}_{n}.json"),
            };
            let path = self.dir.join(name);

            // create_new never clobbers a same-microsecond submission
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut file) => {
                    file.write_all(body).await?;
                    file.flush().await?;
                    tracing::info!(path = %path.display(), "Contact saved");
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
