//! HTTP Handlers
//!
//! Every route sits behind the bearer guard; mutating handlers log the
//! acting user.

use std::path::PathBuf;
use std::sync::Arc;

use auth::CurrentUser;
use axum::Json;
use axum::extract::{Path, Query, State};
use kernel::id::StudentId;
use platform::cache::CacheStore;

use crate::application::config::StudentConfig;
use crate::application::query::DEFAULT_LOW_GRADE_THRESHOLD;
use crate::application::{BulkStudentsUseCase, ManageStudentUseCase, QueryStudentsUseCase};
use crate::domain::entity::{NewStudent, Student, StudentPatch};
use crate::domain::repository::StudentRepository;
use crate::error::{StudentError, StudentResult};
use crate::presentation::dto::{
    CreateStudentQuery, CreatedResponse, CsvPathQuery, DeleteIdsQuery, FacultyQuery, JsonBody,
    LowGradeQuery, MessageResponse, UpdateStudentQuery,
};

/// Shared state for student handlers
pub struct StudentAppState<R, C>
where
    R: StudentRepository + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub cache: Arc<C>,
    pub config: Arc<StudentConfig>,
}

impl<R, C> Clone for StudentAppState<R, C>
where
    R: StudentRepository + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            cache: self.cache.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R, C> StudentAppState<R, C>
where
    R: StudentRepository + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    pub fn new(repo: R, cache: C, config: StudentConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            cache: Arc::new(cache),
            config: Arc::new(config),
        }
    }

    fn query(&self) -> QueryStudentsUseCase<R, C> {
        QueryStudentsUseCase::new(self.repo.clone(), self.cache.clone(), self.config.clone())
    }

    fn manage(&self) -> ManageStudentUseCase<R, C> {
        ManageStudentUseCase::new(self.repo.clone(), self.cache.clone(), self.config.clone())
    }

    fn bulk(&self) -> BulkStudentsUseCase<R, C> {
        BulkStudentsUseCase::new(self.repo.clone(), self.cache.clone())
    }
}

// ============================================================================
// CRUD
// ============================================================================

/// POST /student/create
pub async fn create_student<R, C>(
    State(state): State<StudentAppState<R, C>>,
    user: CurrentUser,
    Query(q): Query<CreateStudentQuery>,
) -> StudentResult<Json<CreatedResponse>>
where
    R: StudentRepository + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    let student = NewStudent::new(q.name, q.faculty, q.course, q.grade)?;
    let student = state.manage().create(student).await?;

    tracing::info!(actor = %user.id, student_id = %student.id, "Student created");

    Ok(Json(CreatedResponse {
        id: student.id.value(),
        message: "Student created".to_string(),
    }))
}

/// GET /student/{id}
pub async fn get_student<R, C>(
    State(state): State<StudentAppState<R, C>>,
    Path(id): Path<StudentId>,
) -> StudentResult<JsonBody>
where
    R: StudentRepository + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    Ok(JsonBody(state.query().get_by_id(id).await?))
}

/// PUT /student/{id}
pub async fn update_student<R, C>(
    State(state): State<StudentAppState<R, C>>,
    user: CurrentUser,
    Path(id): Path<StudentId>,
    Query(q): Query<UpdateStudentQuery>,
) -> StudentResult<Json<Student>>
where
    R: StudentRepository + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    let patch = StudentPatch::new(q.name, q.faculty, q.course, q.grade)?;
    let student = state.manage().update(id, patch).await?;

    tracing::debug!(actor = %user.id, student_id = %id, "Update applied");

    Ok(Json(student))
}

/// DELETE /student/{id}
pub async fn delete_student<R, C>(
    State(state): State<StudentAppState<R, C>>,
    user: CurrentUser,
    Path(id): Path<StudentId>,
) -> StudentResult<Json<MessageResponse>>
where
    R: StudentRepository + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    state.manage().delete(id).await?;

    tracing::debug!(actor = %user.id, student_id = %id, "Delete applied");

    Ok(Json(MessageResponse::new(format!(
        "Student with id={id} deleted successfully."
    ))))
}

// ============================================================================
// Cached views
// ============================================================================

/// GET /student/by_faculty
pub async fn by_faculty<R, C>(
    State(state): State<StudentAppState<R, C>>,
    Query(q): Query<FacultyQuery>,
) -> StudentResult<JsonBody>
where
    R: StudentRepository + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    Ok(JsonBody(state.query().by_faculty(&q.faculty).await?))
}

/// GET /student/unique_courses
pub async fn unique_courses<R, C>(
    State(state): State<StudentAppState<R, C>>,
) -> StudentResult<JsonBody>
where
    R: StudentRepository + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    Ok(JsonBody(state.query().unique_courses().await?))
}

/// GET /student/average_grade
pub async fn average_grade<R, C>(
    State(state): State<StudentAppState<R, C>>,
    Query(q): Query<FacultyQuery>,
) -> StudentResult<JsonBody>
where
    R: StudentRepository + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    Ok(JsonBody(state.query().average_grade(&q.faculty).await?))
}

/// GET /student/low_grade
pub async fn low_grade<R, C>(
    State(state): State<StudentAppState<R, C>>,
    Query(q): Query<LowGradeQuery>,
) -> StudentResult<JsonBody>
where
    R: StudentRepository + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    let threshold = q.threshold.unwrap_or(DEFAULT_LOW_GRADE_THRESHOLD);
    Ok(JsonBody(state.query().low_grade(&q.course, threshold).await?))
}

// ============================================================================
// Bulk
// ============================================================================

/// POST /student/import_csv
pub async fn import_csv<R, C>(
    State(state): State<StudentAppState<R, C>>,
    user: CurrentUser,
    Query(q): Query<CsvPathQuery>,
) -> StudentResult<Json<MessageResponse>>
where
    R: StudentRepository + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    let inserted = state
        .bulk()
        .import_csv(std::path::Path::new(&q.csv_path))
        .await?;

    tracing::info!(actor = %user.id, inserted, "Synchronous CSV import finished");

    Ok(Json(MessageResponse::new("CSV imported successfully")))
}

/// POST /student/import_csv_bg
pub async fn import_csv_bg<R, C>(
    State(state): State<StudentAppState<R, C>>,
    user: CurrentUser,
    Query(q): Query<CsvPathQuery>,
) -> Json<MessageResponse>
where
    R: StudentRepository + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    tracing::info!(actor = %user.id, path = %q.csv_path, "Scheduling CSV import");
    state.bulk().spawn_import(PathBuf::from(&q.csv_path));

    Json(MessageResponse::new(format!(
        "CSV import of '{}' started in background",
        q.csv_path
    )))
}

/// DELETE /student/delete_bg?ids=1&ids=2
pub async fn delete_bg<R, C>(
    State(state): State<StudentAppState<R, C>>,
    user: CurrentUser,
    axum_extra::extract::Query(q): axum_extra::extract::Query<DeleteIdsQuery>,
) -> StudentResult<Json<MessageResponse>>
where
    R: StudentRepository + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    if q.ids.is_empty() {
        return Err(StudentError::validation("ids must not be empty"));
    }

    tracing::info!(actor = %user.id, count = q.ids.len(), "Scheduling bulk delete");
    let message = format!("Deletion of students with ids {:?} started in background", q.ids);
    state
        .bulk()
        .spawn_delete(q.ids.into_iter().map(StudentId::from_i64).collect());

    Ok(Json(MessageResponse::new(message)))
}
