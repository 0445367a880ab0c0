//! Application Configuration

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// What a single-row update or delete evicts from the read cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteInvalidation {
    /// Only `student_id:<id>`. List and aggregate views may serve stale
    /// data until their TTL runs out.
    #[default]
    PointOnly,
    /// Every cached view.
    FlushAll,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown invalidation policy {0:?}, expected \"point\" or \"flush\"")]
pub struct UnknownInvalidation(String);

impl FromStr for WriteInvalidation {
    type Err = UnknownInvalidation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "point" | "point_only" => Ok(WriteInvalidation::PointOnly),
            "flush" | "flush_all" => Ok(WriteInvalidation::FlushAll),
            _ => Err(UnknownInvalidation(s.to_string())),
        }
    }
}

/// Student application configuration
#[derive(Debug, Clone)]
pub struct StudentConfig {
    /// Lifetime of a cached read view
    pub cache_ttl: Duration,
    pub write_invalidation: WriteInvalidation,
}

impl Default for StudentConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(60),
            write_invalidation: WriteInvalidation::PointOnly,
        }
    }
}
