//! Repository Traits

use kernel::id::StudentId;

use crate::domain::entity::{NewStudent, Student, StudentPatch};
use crate::error::StudentResult;

/// Student persistence and aggregate queries
#[trait_variant::make(StudentRepository: Send)]
pub trait LocalStudentRepository {
    async fn create(&self, student: NewStudent) -> StudentResult<Student>;

    async fn find_by_id(&self, id: StudentId) -> StudentResult<Option<Student>>;

    /// Apply the `Some` fields of `patch`. `None` when the id does not exist.
    async fn update(&self, id: StudentId, patch: StudentPatch) -> StudentResult<Option<Student>>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: StudentId) -> StudentResult<bool>;

    /// Missing ids are skipped. Returns the number of rows removed.
    async fn delete_many(&self, ids: &[StudentId]) -> StudentResult<u64>;

    /// Ordered by id
    async fn find_by_faculty(&self, faculty: &str) -> StudentResult<Vec<Student>>;

    /// Distinct course names, sorted
    async fn unique_courses(&self) -> StudentResult<Vec<String>>;

    /// `None` when the faculty has no students
    async fn average_grade_by_faculty(&self, faculty: &str) -> StudentResult<Option<f64>>;

    /// Students of `course` with `grade < threshold`, ordered by id
    async fn find_by_course_below(
        &self,
        course: &str,
        threshold: f64,
    ) -> StudentResult<Vec<Student>>;

    /// Insert every row or none of them. Returns the number inserted.
    async fn insert_many(&self, students: Vec<NewStudent>) -> StudentResult<u64>;
}
