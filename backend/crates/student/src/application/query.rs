//! Cached Read Use Cases
//!
//! Every read view goes through the cache first. On a miss the repository
//! result is serialized, stored for `cache_ttl`, and returned as the JSON
//! body. `GET /student/{id}` is cached under `student_id:<id>`; not-found
//! results are errors and are never stored.

use std::future::Future;
use std::sync::Arc;

use kernel::id::StudentId;
use platform::cache::CacheStore;
use serde::{Deserialize, Serialize};

use crate::application::config::StudentConfig;
use crate::domain::cache_key::CacheKey;
use crate::domain::repository::StudentRepository;
use crate::error::{StudentError, StudentResult};

/// Default `threshold` of the low-grade view
pub const DEFAULT_LOW_GRADE_THRESHOLD: f64 = 30.0;

/// Body of the average-grade view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageGrade {
    pub faculty: String,
    pub average_grade: Option<f64>,
}

pub struct QueryStudentsUseCase<R, C>
where
    R: StudentRepository,
    C: CacheStore,
{
    repo: Arc<R>,
    cache: Arc<C>,
    config: Arc<StudentConfig>,
}

impl<R, C> QueryStudentsUseCase<R, C>
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

    /// `student_id:<id>`. `NotFound` when absent.
    pub async fn get_by_id(&self, id: StudentId) -> StudentResult<String> {
        self.read_through(CacheKey::StudentId(id), async {
            self.repo
                .find_by_id(id)
                .await?
                .ok_or(StudentError::NotFound(id))
        })
        .await
    }

    pub async fn by_faculty(&self, faculty: &str) -> StudentResult<String> {
        self.read_through(
            CacheKey::ByFaculty(faculty),
            self.repo.find_by_faculty(faculty),
        )
        .await
    }

    pub async fn unique_courses(&self) -> StudentResult<String> {
        self.read_through(CacheKey::UniqueCourses, self.repo.unique_courses())
            .await
    }

    pub async fn average_grade(&self, faculty: &str) -> StudentResult<String> {
        self.read_through(CacheKey::AverageGrade(faculty), async {
            Ok::<_, StudentError>(AverageGrade {
                faculty: faculty.to_string(),
                average_grade: self.repo.average_grade_by_faculty(faculty).await?,
            })
        })
        .await
    }

    pub async fn low_grade(&self, course: &str, threshold: f64) -> StudentResult<String> {
        if !threshold.is_finite() {
            return Err(StudentError::validation("threshold must be a finite number"));
        }

        self.read_through(
            CacheKey::LowGrade { course, threshold },
            self.repo.find_by_course_below(course, threshold),
        )
        .await
    }

    /// Cache lookup, else `load` → serialize → store.
    ///
    /// The store is skipped when any eviction ran while `load` was in
    /// flight. Cache failures are logged and never fail the read.
    async fn read_through<V, F>(&self, key: CacheKey<'_>, load: F) -> StudentResult<String>
    where
        V: Serialize,
        F: Future<Output = StudentResult<V>>,
    {
        let key = key.to_string();

        match self.cache.get(&key).await {
            Ok(Some(body)) => {
                tracing::debug!(cache_key = %key, "Cache hit");
                return Ok(body);
            }
            Ok(None) => tracing::debug!(cache_key = %key, "Cache miss"),
            Err(e) => {
                tracing::warn!(cache_key = %key, error = %e, "Cache read failed, using store")
            }
        }

        let generation = match self.cache.generation().await {
            Ok(generation) => Some(generation),
            Err(e) => {
                tracing::warn!(cache_key = %key, error = %e, "Cache unavailable, not storing");
                None
            }
        };

        let body = serde_json::to_string(&load.await?)?;

        if let Some(generation) = generation {
            match self
                .cache
                .set_if_current(&key, body.clone(), self.config.cache_ttl, generation)
                .await
            {
                Ok(true) => {}
                Ok(false) => tracing::debug!(cache_key = %key, "Cache not filled"),
                Err(e) => tracing::warn!(cache_key = %key, error = %e, "Cache write failed"),
            }
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{NewStudent, StudentPatch};
    use crate::infra::memory::MemoryStudentRepository;
    use platform::cache::{MemoryCache, NoCache};
    use serde_json::Value;
    use std::time::Duration;

    fn use_case<C: CacheStore>(
        repo: &MemoryStudentRepository,
        cache: C,
    ) -> QueryStudentsUseCase<MemoryStudentRepository, C> {
        QueryStudentsUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(cache),
            Arc::new(StudentConfig::default()),
        )
    }

    async fn seed(repo: &MemoryStudentRepository, name: &str, faculty: &str, course: &str, grade: f64) {
        repo.create(NewStudent::new(name, faculty, course, grade).unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let repo = MemoryStudentRepository::new();
        seed(&repo, "A", "ФКН", "Математика", 45.0).await;
        let cache = MemoryCache::new();
        let uc = use_case(&repo, cache.clone());

        let first = uc.by_faculty("ФКН").await.unwrap();
        // Bypass the use case so the cache is not told
        seed(&repo, "B", "ФКН", "Физика", 30.0).await;
        let second = uc.by_faculty("ФКН").await.unwrap();

        assert_eq!(first, second);
        let stats = cache.stats().await.unwrap();
        assert_eq!((stats.hits, stats.misses), (1, 1));
    }

    #[tokio::test]
    async fn test_disabled_cache_always_reads_store() {
        let repo = MemoryStudentRepository::new();
        seed(&repo, "A", "ФКН", "Математика", 45.0).await;
        let uc = use_case(&repo, NoCache);

        uc.by_faculty("ФКН").await.unwrap();
        seed(&repo, "B", "ФКН", "Физика", 30.0).await;
        let body: Value = serde_json::from_str(&uc.by_faculty("ФКН").await.unwrap()).unwrap();

        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_not_found_is_not_cached() {
        let repo = MemoryStudentRepository::new();
        let cache = MemoryCache::new();
        let uc = use_case(&repo, cache.clone());

        let missing = StudentId::from_i64(1);
        assert!(matches!(
            uc.get_by_id(missing).await,
            Err(StudentError::NotFound(_))
        ));
        assert_eq!(cache.stats().await.unwrap().entries, 0);

        seed(&repo, "A", "ФКН", "Математика", 45.0).await;
        assert!(uc.get_by_id(missing).await.is_ok());
    }

    #[tokio::test]
    async fn test_average_grade_view() {
        let repo = MemoryStudentRepository::new();
        seed(&repo, "A", "ФКН", "Математика", 45.0).await;
        seed(&repo, "B", "ФКН", "Физика", 30.0).await;
        let uc = use_case(&repo, MemoryCache::new());

        let body: AverageGrade = serde_json::from_str(&uc.average_grade("ФКН").await.unwrap()).unwrap();
        assert_eq!(body.average_grade, Some(37.5));

        let empty: Value = serde_json::from_str(&uc.average_grade("ЭФ").await.unwrap()).unwrap();
        assert_eq!(empty, serde_json::json!({"faculty": "ЭФ", "average_grade": null}));
    }

    #[tokio::test]
    async fn test_empty_list_is_cached_as_empty_array() {
        let repo = MemoryStudentRepository::new();
        let cache = MemoryCache::new();
        let uc = use_case(&repo, cache.clone());

        assert_eq!(uc.unique_courses().await.unwrap(), "[]");
        assert_eq!(
            cache.get("unique_courses").await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_low_grade_threshold_must_be_finite() {
        let repo = MemoryStudentRepository::new();
        let uc = use_case(&repo, MemoryCache::new());
        assert!(matches!(
            uc.low_grade("Математика", f64::NAN).await,
            Err(StudentError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_cached_view_expires_after_ttl() {
        let repo = MemoryStudentRepository::new();
        seed(&repo, "A", "ФКН", "Математика", 45.0).await;
        let uc = QueryStudentsUseCase::new(
            Arc::new(repo.clone()),
            Arc::new(MemoryCache::new()),
            Arc::new(StudentConfig {
                cache_ttl: Duration::from_millis(100),
                ..StudentConfig::default()
            }),
        );

        let before = uc.get_by_id(StudentId::from_i64(1)).await.unwrap();
        let patch = StudentPatch::new(None, None, None, Some(90.0)).unwrap();
        repo.update(StudentId::from_i64(1), patch).await.unwrap();

        assert_eq!(uc.get_by_id(StudentId::from_i64(1)).await.unwrap(), before);

        tokio::time::sleep(Duration::from_millis(250)).await;
        let after: Value =
            serde_json::from_str(&uc.get_by_id(StudentId::from_i64(1)).await.unwrap()).unwrap();
        assert_eq!(after["grade"], 90.0);
    }
}
