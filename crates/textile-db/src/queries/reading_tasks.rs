use chrono::Utc;
use rusqlite::{params, Row};

use textile_core::task::{ReadingTask, TaskStatus};

use crate::{Db, DbError};

fn row_to_task(row: &Row) -> rusqlite::Result<ReadingTask> {
    let status_str: String = row.get("status")?;
    Ok(ReadingTask {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        file_name: row.get("file_name")?,
        file_path: row.get("file_path")?,
        status: TaskStatus::parse_str(&status_str).unwrap_or_default(),
        created_at: row.get("created_at")?,
    })
}

impl Db {
    /// Insert a task with status `pending` and return the stored row.
    pub fn create_task(
        &self,
        user_id: i64,
        file_name: &str,
        file_path: &str,
    ) -> Result<ReadingTask, DbError> {
        self.with_conn(|conn| {
            let now = Utc::now();
            conn.execute(
                "INSERT INTO reading_tasks (user_id, file_name, file_path, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![user_id, file_name, file_path, TaskStatus::Pending.as_str(), now],
            )?;
            let id = conn.last_insert_rowid();
            let task = conn.query_row(
                "SELECT * FROM reading_tasks WHERE id = ?1",
                params![id],
                row_to_task,
            )?;
            Ok(task)
        })
    }

    /// Absence is a value here, not an error.
    pub fn get_task(&self, id: i64) -> Result<Option<ReadingTask>, DbError> {
        self.with_conn(|conn| {
            match conn.query_row(
                "SELECT * FROM reading_tasks WHERE id = ?1",
                params![id],
                row_to_task,
            ) {
                Ok(task) => Ok(Some(task)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(other) => Err(DbError::Sqlite(other)),
            }
        })
    }

    /// All tasks for a user, newest first. The id tie-break keeps the
    /// order deterministic for rows inserted within the same second.
    pub fn list_tasks_by_user(&self, user_id: i64) -> Result<Vec<ReadingTask>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM reading_tasks WHERE user_id = ?1
                 ORDER BY created_at DESC, id DESC",
            )?;
            let tasks = stmt
                .query_map(params![user_id], row_to_task)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(tasks)
        })
    }

    pub fn update_task_status(&self, id: i64, status: TaskStatus) -> Result<(), DbError> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE reading_tasks SET status = ?1 WHERE id = ?2",
                params![status.as_str(), id],
            )?;
            if changed == 0 {
                return Err(DbError::NotFound(format!("task {id}")));
            }
            Ok(())
        })
    }
}
