//! Database initialization
//!
//! Opens (creating if needed) the SQLite database and makes sure the
//! `students` table exists. Safe to run on every startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Open the database file and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // WAL lets the read endpoint proceed while an ingestion batch is writing
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_students_table(pool).await
}

/// Create the students table
///
/// `guid` is a surrogate row id; there is no natural key, so re-ingesting a
/// sheet appends duplicate students.
pub async fn create_students_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            guid TEXT PRIMARY KEY,
            student_name TEXT NOT NULL,
            house_name TEXT NOT NULL,
            campus_name TEXT NOT NULL,
            additional_effort INTEGER NOT NULL DEFAULT 0,
            supporting_peers_academics INTEGER NOT NULL DEFAULT 0,
            supporting_smaller_group INTEGER NOT NULL DEFAULT 0,
            support_large_group INTEGER NOT NULL DEFAULT 0,
            total_academic_points INTEGER NOT NULL DEFAULT 0,
            additional_efforts_life_skills INTEGER NOT NULL DEFAULT 0,
            supporting_peers_life_skills INTEGER NOT NULL DEFAULT 0,
            supporting_community_life_skills INTEGER NOT NULL DEFAULT 0,
            efforts_to_learn_english INTEGER NOT NULL DEFAULT 0,
            competition_winners INTEGER NOT NULL DEFAULT 0,
            council_activeness INTEGER NOT NULL DEFAULT 0,
            solving_problem INTEGER NOT NULL DEFAULT 0,
            task_winners INTEGER NOT NULL DEFAULT 0,
            getting_a_job INTEGER NOT NULL DEFAULT 0,
            total_culture_points INTEGER NOT NULL DEFAULT 0,
            total_academic_and_culture INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
