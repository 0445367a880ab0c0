//! In-Memory Student Repository
//!
//! Used in tests and when the server runs without a database.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use kernel::id::StudentId;
use tokio::sync::RwLock;

use crate::domain::entity::{NewStudent, Student, StudentPatch};
use crate::domain::repository::StudentRepository;
use crate::error::StudentResult;

#[derive(Default)]
struct StudentTable {
    rows: BTreeMap<StudentId, Student>,
    last_id: i64,
}

impl StudentTable {
    fn insert(&mut self, student: NewStudent) -> Student {
        self.last_id += 1;
        let student = student.into_student(StudentId::from_i64(self.last_id));
        self.rows.insert(student.id, student.clone());
        student
    }

    fn matching(&self, pred: impl Fn(&Student) -> bool) -> Vec<Student> {
        self.rows.values().filter(|s| pred(s)).cloned().collect()
    }
}

/// Ids start at 1 and are never reused. Cloning shares the same table.
#[derive(Clone, Default)]
pub struct MemoryStudentRepository {
    table: Arc<RwLock<StudentTable>>,
}

impl MemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.table.read().await.rows.len()
    }
}

impl StudentRepository for MemoryStudentRepository {
    async fn create(&self, student: NewStudent) -> StudentResult<Student> {
        Ok(self.table.write().await.insert(student))
    }

    async fn find_by_id(&self, id: StudentId) -> StudentResult<Option<Student>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn update(&self, id: StudentId, patch: StudentPatch) -> StudentResult<Option<Student>> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|student| {
            patch.apply_to(student);
            student.clone()
        }))
    }

    async fn delete(&self, id: StudentId) -> StudentResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn delete_many(&self, ids: &[StudentId]) -> StudentResult<u64> {
        let mut table = self.table.write().await;
        let removed = ids
            .iter()
            .filter(|id| table.rows.remove(*id).is_some())
            .count();
        Ok(removed as u64)
    }

    async fn find_by_faculty(&self, faculty: &str) -> StudentResult<Vec<Student>> {
        Ok(self.table.read().await.matching(|s| s.faculty == faculty))
    }

    async fn unique_courses(&self) -> StudentResult<Vec<String>> {
        let table = self.table.read().await;
        let courses: BTreeSet<&str> = table.rows.values().map(|s| s.course.as_str()).collect();
        Ok(courses.into_iter().map(str::to_string).collect())
    }

    async fn average_grade_by_faculty(&self, faculty: &str) -> StudentResult<Option<f64>> {
        let grades: Vec<f64> = self
            .table
            .read()
            .await
            .rows
            .values()
            .filter(|s| s.faculty == faculty)
            .map(|s| s.grade)
            .collect();

        if grades.is_empty() {
            return Ok(None);
        }
        Ok(Some(grades.iter().sum::<f64>() / grades.len() as f64))
    }

    async fn find_by_course_below(
        &self,
        course: &str,
        threshold: f64,
    ) -> StudentResult<Vec<Student>> {
        Ok(self
            .table
            .read()
            .await
            .matching(|s| s.course == course && s.grade < threshold))
    }

    async fn insert_many(&self, students: Vec<NewStudent>) -> StudentResult<u64> {
        let mut table = self.table.write().await;
        let count = students.len() as u64;
        for student in students {
            table.insert(student);
        }
        Ok(count)
    }
}
