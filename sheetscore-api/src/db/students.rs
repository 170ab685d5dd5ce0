//! SQLite-backed student store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{StorageError, StudentStore};
use crate::models::{NewStudent, PointsField, StudentPoints, StudentRecord};

/// Student store on the shared SQLite pool
#[derive(Clone)]
pub struct SqliteStudentStore {
    pool: SqlitePool,
}

impl SqliteStudentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn points_columns() -> String {
    PointsField::ALL
        .iter()
        .map(|field| field.column())
        .collect::<Vec<_>>()
        .join(", ")
}

fn insert_sql() -> String {
    // guid, 3 identity, 16 points, 2 timestamps
    let placeholders = vec!["?"; 22].join(", ");
    format!(
        "INSERT INTO students (guid, student_name, house_name, campus_name, {}, created_at, updated_at) VALUES ({})",
        points_columns(),
        placeholders
    )
}

fn select_sql() -> String {
    format!(
        "SELECT guid, student_name, house_name, campus_name, {}, created_at, updated_at FROM students ORDER BY rowid",
        points_columns()
    )
}

fn parse_timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>, StorageError> {
    let text: String = row.try_get(column)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StorageError::CorruptRow(format!("{} '{}': {}", column, text, e)))
}

fn record_from_row(row: &SqliteRow) -> Result<StudentRecord, StorageError> {
    let guid: String = row.try_get("guid")?;
    let id = Uuid::parse_str(&guid)
        .map_err(|e| StorageError::CorruptRow(format!("guid '{}': {}", guid, e)))?;

    let mut points = StudentPoints::default();
    for field in PointsField::ALL {
        points.set(field, row.try_get(field.column())?);
    }

    Ok(StudentRecord {
        id,
        student: NewStudent {
            student_name: row.try_get("student_name")?,
            house_name: row.try_get("house_name")?,
            campus_name: row.try_get("campus_name")?,
            points,
        },
        created_at: parse_timestamp(row, "created_at")?,
        updated_at: parse_timestamp(row, "updated_at")?,
    })
}

#[async_trait]
impl StudentStore for SqliteStudentStore {
    async fn insert_batch(&self, students: &[NewStudent]) -> Result<usize, StorageError> {
        if students.is_empty() {
            return Err(StorageError::EmptyBatch);
        }

        let sql = insert_sql();
        let now = Utc::now().to_rfc3339();

        let mut tx = self.pool.begin().await?;
        for student in students {
            let mut query = sqlx::query(&sql)
                .bind(Uuid::new_v4().to_string())
                .bind(&student.student_name)
                .bind(&student.house_name)
                .bind(&student.campus_name);
            for field in PointsField::ALL {
                query = query.bind(student.points.get(field));
            }
            query
                .bind(&now)
                .bind(&now)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        tracing::debug!(count = students.len(), "Inserted student batch");
        Ok(students.len())
    }

    async fn list_all(&self) -> Result<Vec<StudentRecord>, StorageError> {
        let rows = sqlx::query(&select_sql()).fetch_all(&self.pool).await?;
        rows.iter().map(record_from_row).collect()
    }
}
