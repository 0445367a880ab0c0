//! CSV import source
//!
//! Expected header: `Фамилия,Имя,Факультет,Курс,Оценка`. The stored name is
//! `"<surname> <given name>"`. Parsing is all-or-nothing: the first bad row
//! fails the whole file.

use std::path::Path;

use serde::Deserialize;

use crate::domain::entity::NewStudent;
use crate::error::{StudentError, StudentResult};

#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(rename = "Фамилия")]
    surname: String,
    #[serde(rename = "Имя")]
    given_name: String,
    #[serde(rename = "Факультет")]
    faculty: String,
    #[serde(rename = "Курс")]
    course: String,
    #[serde(rename = "Оценка")]
    grade: String,
}

impl CsvRecord {
    fn into_new_student(self) -> StudentResult<NewStudent> {
        let grade: f64 = self
            .grade
            .trim()
            .parse()
            .map_err(|_| StudentError::validation(format!("grade {:?} is not a number", self.grade)))?;
        let name = format!("{} {}", self.surname.trim(), self.given_name.trim());
        NewStudent::new(name, self.faculty, self.course, grade)
    }
}

/// Parse CSV bytes into validated students.
pub fn parse_students(bytes: &[u8]) -> StudentResult<Vec<NewStudent>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut students = Vec::new();
    for (index, record) in reader.deserialize::<CsvRecord>().enumerate() {
        let row = index as u64 + 1;
        let student = record
            .map_err(|e| StudentError::CsvRow {
                row,
                reason: describe_csv_error(&e),
            })?
            .into_new_student()
            .map_err(|e| StudentError::CsvRow {
                row,
                reason: e.to_string(),
            })?;
        students.push(student);
    }
    Ok(students)
}

/// Read and parse a CSV file.
pub async fn read_students(path: &Path) -> StudentResult<Vec<NewStudent>> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| StudentError::CsvFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    parse_students(&bytes)
}

fn describe_csv_error(err: &csv::Error) -> String {
    match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {expected_len} columns, found {len}"),
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        _ => err.to_string(),
    }
}
