//! Cache keys for student read views
//!
//! Free-text components are escaped (`%` → `%25`, `:` → `%3A`) so two
//! different queries never share a key.

use std::fmt;

use kernel::id::StudentId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CacheKey<'a> {
    /// `by_faculty:<faculty>`
    ByFaculty(&'a str),
    /// `unique_courses`
    UniqueCourses,
    /// `student_id:<id>`
    StudentId(StudentId),
    /// `average_grade:<faculty>`
    AverageGrade(&'a str),
    /// `low_grade:<course>:<threshold>`
    LowGrade { course: &'a str, threshold: f64 },
}

impl fmt::Display for CacheKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::ByFaculty(faculty) => write!(f, "by_faculty:{}", Escaped(faculty)),
            CacheKey::UniqueCourses => f.write_str("unique_courses"),
            CacheKey::StudentId(id) => write!(f, "student_id:{id}"),
            CacheKey::AverageGrade(faculty) => write!(f, "average_grade:{}", Escaped(faculty)),
            // `{:?}` keeps the decimal point: 30 renders as `30.0`
            CacheKey::LowGrade { course, threshold } => {
                write!(f, "low_grade:{}:{threshold:?}", Escaped(course))
            }
        }
    }
}

struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '%' => f.write_str("%25")?,
                ':' => f.write_str("%3A")?,
                c => fmt::Write::write_char(f, c)?,
            }
        }
        Ok(())
    }
}
