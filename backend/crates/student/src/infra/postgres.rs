//! PostgreSQL Repository Implementation

use kernel::id::StudentId;
use sqlx::PgPool;

use crate::domain::entity::{NewStudent, Student, StudentPatch};
use crate::domain::repository::StudentRepository;
use crate::error::StudentResult;

/// PostgreSQL-backed student repository (`students` table)
#[derive(Clone)]
pub struct PgStudentRepository {
    pool: PgPool,
}

impl PgStudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct StudentRow {
    id: i64,
    name: String,
    faculty: String,
    course: String,
    grade: f64,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Student {
            id: StudentId::from_i64(row.id),
            name: row.name,
            faculty: row.faculty,
            course: row.course,
            grade: row.grade,
        }
    }
}

fn into_students(rows: Vec<StudentRow>) -> Vec<Student> {
    rows.into_iter().map(Student::from).collect()
}

impl StudentRepository for PgStudentRepository {
    async fn create(&self, student: NewStudent) -> StudentResult<Student> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO students (name, faculty, course, grade)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&student.name)
        .bind(&student.faculty)
        .bind(&student.course)
        .bind(student.grade)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(student_id = id, "Student created");

        Ok(student.into_student(StudentId::from_i64(id)))
    }

    async fn find_by_id(&self, id: StudentId) -> StudentResult<Option<Student>> {
        let row = sqlx::query_as::<_, StudentRow>(
            "SELECT id, name, faculty, course, grade FROM students WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Student::from))
    }

    async fn update(&self, id: StudentId, patch: StudentPatch) -> StudentResult<Option<Student>> {
        let row = sqlx::query_as::<_, StudentRow>(
            r#"
            UPDATE students
            SET name = COALESCE($2, name),
                faculty = COALESCE($3, faculty),
                course = COALESCE($4, course),
                grade = COALESCE($5, grade)
            WHERE id = $1
            RETURNING id, name, faculty, course, grade
            "#,
        )
        .bind(id.value())
        .bind(patch.name)
        .bind(patch.faculty)
        .bind(patch.course)
        .bind(patch.grade)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Student::from))
    }

    async fn delete(&self, id: StudentId) -> StudentResult<bool> {
        let affected = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }

    async fn delete_many(&self, ids: &[StudentId]) -> StudentResult<u64> {
        let ids: Vec<i64> = ids.iter().map(|id| id.value()).collect();
        let affected = sqlx::query("DELETE FROM students WHERE id = ANY($1)")
            .bind(&ids)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(requested = ids.len(), deleted = affected, "Students deleted");

        Ok(affected)
    }

    async fn find_by_faculty(&self, faculty: &str) -> StudentResult<Vec<Student>> {
        let rows = sqlx::query_as::<_, StudentRow>(
            r#"
            SELECT id, name, faculty, course, grade
            FROM students
            WHERE faculty = $1
            ORDER BY id
            "#,
        )
        .bind(faculty)
        .fetch_all(&self.pool)
        .await?;

        Ok(into_students(rows))
    }

    async fn unique_courses(&self) -> StudentResult<Vec<String>> {
        let courses = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT course FROM students ORDER BY course",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(courses)
    }

    async fn average_grade_by_faculty(&self, faculty: &str) -> StudentResult<Option<f64>> {
        let avg = sqlx::query_scalar::<_, Option<f64>>(
            "SELECT AVG(grade) FROM students WHERE faculty = $1",
        )
        .bind(faculty)
        .fetch_one(&self.pool)
        .await?;

        Ok(avg)
    }

    async fn find_by_course_below(
        &self,
        course: &str,
        threshold: f64,
    ) -> StudentResult<Vec<Student>> {
        let rows = sqlx::query_as::<_, StudentRow>(
            r#"
            SELECT id, name, faculty, course, grade
            FROM students
            WHERE course = $1 AND grade < $2
            ORDER BY id
            "#,
        )
        .bind(course)
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(into_students(rows))
    }

    async fn insert_many(&self, students: Vec<NewStudent>) -> StudentResult<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;

        for student in &students {
            inserted += sqlx::query(
                "INSERT INTO students (name, faculty, course, grade) VALUES ($1, $2, $3, $4)",
            )
            .bind(&student.name)
            .bind(&student.faculty)
            .bind(&student.course)
            .bind(student.grade)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }
}
