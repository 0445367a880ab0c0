//! Student Entity

use kernel::id::StudentId;
use serde::{Deserialize, Serialize};

use crate::error::{StudentError, StudentResult};

/// Upper bound for name, faculty, and course, in characters.
pub const MAX_FIELD_CHARS: usize = 100;

/// Stored student record. Serializes as `{id, name, faculty, course, grade}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub faculty: String,
    pub course: String,
    pub grade: f64,
}

/// A validated student that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub name: String,
    pub faculty: String,
    pub course: String,
    pub grade: f64,
}

impl NewStudent {
    pub fn new(
        name: impl AsRef<str>,
        faculty: impl AsRef<str>,
        course: impl AsRef<str>,
        grade: f64,
    ) -> StudentResult<Self> {
        Ok(Self {
            name: text_field("name", name.as_ref())?,
            faculty: text_field("faculty", faculty.as_ref())?,
            course: text_field("course", course.as_ref())?,
            grade: grade_field(grade)?,
        })
    }

    pub fn into_student(self, id: StudentId) -> Student {
        Student {
            id,
            name: self.name,
            faculty: self.faculty,
            course: self.course,
            grade: self.grade,
        }
    }
}

/// Partial update. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub faculty: Option<String>,
    pub course: Option<String>,
    pub grade: Option<f64>,
}

impl StudentPatch {
    /// Validate every present field with the same rules as [`NewStudent::new`].
    pub fn new(
        name: Option<String>,
        faculty: Option<String>,
        course: Option<String>,
        grade: Option<f64>,
    ) -> StudentResult<Self> {
        Ok(Self {
            name: name.map(|v| text_field("name", &v)).transpose()?,
            faculty: faculty.map(|v| text_field("faculty", &v)).transpose()?,
            course: course.map(|v| text_field("course", &v)).transpose()?,
            grade: grade.map(grade_field).transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.faculty.is_none() && self.course.is_none() && self.grade.is_none()
    }

    pub fn apply_to(self, student: &mut Student) {
        if let Some(name) = self.name {
            student.name = name;
        }
        if let Some(faculty) = self.faculty {
            student.faculty = faculty;
        }
        if let Some(course) = self.course {
            student.course = course;
        }
        if let Some(grade) = self.grade {
            student.grade = grade;
        }
    }
}

fn text_field(field: &str, value: &str) -> StudentResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StudentError::validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_FIELD_CHARS {
        return Err(StudentError::validation(format!(
            "{field} must be at most {MAX_FIELD_CHARS} characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn grade_field(grade: f64) -> StudentResult<f64> {
    if grade.is_finite() {
        Ok(grade)
    } else {
        Err(StudentError::validation("grade must be a finite number"))
    }
}
