//! Single-row Write Use Cases
//!
//! Create, update, and delete. Cache eviction follows
//! [`WriteInvalidation`]: point-only evicts `student_id:<id>` on update and
//! delete and nothing on create; flush-all drops every view on any write.

use std::sync::Arc;

use kernel::id::StudentId;
use platform::cache::CacheStore;

use crate::application::bulk::flush_views;
use crate::application::config::{StudentConfig, WriteInvalidation};
use crate::domain::cache_key::CacheKey;
use crate::domain::entity::{NewStudent, Student, StudentPatch};
use crate::domain::repository::StudentRepository;
use crate::error::{StudentError, StudentResult};

pub struct ManageStudentUseCase<R, C>
where
    R: StudentRepository,
    C: CacheStore,
{
    repo: Arc<R>,
    cache: Arc<C>,
    config: Arc<StudentConfig>,
}

impl<R, C> ManageStudentUseCase<R, C>
where
    R: StudentRepository,
    C: CacheStore,
{
    pub fn new(repo: Arc<R>, cache: Arc<C>, config: Arc<StudentConfig>) -> Self {
        Self {
            repo,
            cache,
            config,
        }
    }

    pub async fn create(&self, student: NewStudent) -> StudentResult<Student> {
        let student = self.repo.create(student).await?;

        if self.config.write_invalidation == WriteInvalidation::FlushAll {
            flush_views(self.cache.as_ref()).await;
        }

        Ok(student)
    }

    pub async fn update(&self, id: StudentId, patch: StudentPatch) -> StudentResult<Student> {
        let student = self
            .repo
            .update(id, patch)
            .await?
            .ok_or(StudentError::NotFound(id))?;

        self.evict(id).await;
        tracing::info!(student_id = %id, "Student updated");
        Ok(student)
    }

    pub async fn delete(&self, id: StudentId) -> StudentResult<()> {
        if !self.repo.delete(id).await? {
            return Err(StudentError::NotFound(id));
        }

        self.evict(id).await;
        tracing::info!(student_id = %id, "Student deleted");
        Ok(())
    }

    async fn evict(&self, id: StudentId) {
        match self.config.write_invalidation {
            WriteInvalidation::PointOnly => {
                let key = CacheKey::StudentId(id).to_string();
                if let Err(e) = self.cache.invalidate(&key).await {
                    tracing::warn!(cache_key = %key, error = %e, "Cache eviction failed");
                }
            }
            WriteInvalidation::FlushAll => flush_views(self.cache.as_ref()).await,
        }
    }
}
