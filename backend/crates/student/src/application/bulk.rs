//! Bulk Use Cases
//!
//! CSV import and multi-id delete. Both touch an unknown set of read views,
//! so both flush the whole cache after a successful write.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use kernel::id::StudentId;
use platform::cache::CacheStore;
use platform::task::spawn_detached;
use tokio::task::JoinHandle;

use crate::domain::repository::StudentRepository;
use crate::error::StudentResult;
use crate::infra::csv_source;

pub struct BulkStudentsUseCase<R, C>
where
    R: StudentRepository,
    C: CacheStore,
{
    repo: Arc<R>,
    cache: Arc<C>,
}

impl<R, C> Clone for BulkStudentsUseCase<R, C>
where
    R: StudentRepository,
    C: CacheStore,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl<R, C> BulkStudentsUseCase<R, C>
where
    R: StudentRepository + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, cache: Arc<C>) -> Self {
        Self { repo, cache }
    }

    /// Parse the whole file, then insert every row in one transaction.
    pub async fn import_csv(&self, path: &Path) -> StudentResult<u64> {
        let students = csv_source::read_students(path).await?;
        let inserted = self.repo.insert_many(students).await?;
        flush_views(self.cache.as_ref()).await;

        tracing::info!(path = %path.display(), inserted, "CSV imported");
        Ok(inserted)
    }

    pub async fn delete_many(&self, ids: &[StudentId]) -> StudentResult<u64> {
        let deleted = self.repo.delete_many(ids).await?;
        flush_views(self.cache.as_ref()).await;
        Ok(deleted)
    }

    /// Run [`Self::import_csv`] in the background.
    pub fn spawn_import(&self, path: PathBuf) -> JoinHandle<()> {
        let this = self.clone();
        spawn_detached("import_csv", async move {
            this.import_csv(&path)
                .await
                .map(|n| format!("{n} students imported from {}", path.display()))
        })
    }

    /// Run [`Self::delete_many`] in the background.
    pub fn spawn_delete(&self, ids: Vec<StudentId>) -> JoinHandle<()> {
        let this = self.clone();
        spawn_detached("delete_students", async move {
            this.delete_many(&ids)
                .await
                .map(|n| format!("{n} of {} students deleted", ids.len()))
        })
    }
}

/// Drop every cached view. Failures are logged only.
pub(crate) async fn flush_views<C: CacheStore>(cache: &C) {
    match cache.invalidate_all().await {
        Ok(removed) => tracing::debug!(removed, "Cache flushed"),
        Err(e) => tracing::warn!(error = %e, "Cache flush failed"),
    }
}
