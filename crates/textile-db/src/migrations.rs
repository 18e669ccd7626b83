use rusqlite::Connection;

use crate::DbError;

pub fn run(conn: &Connection) -> Result<(), DbError> {
    // Idempotent schema. The status CHECK mirrors the enum column the
    // MySQL deployment used.
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            username   TEXT NOT NULL,
            email      TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(email);

        CREATE TABLE IF NOT EXISTS reading_tasks (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id    INTEGER NOT NULL,
            file_name  TEXT NOT NULL,
            file_path  TEXT NOT NULL,
            status     TEXT NOT NULL DEFAULT 'pending'
                           CHECK(status IN ('pending', 'processing', 'completed', 'failed')),
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_reading_tasks_user ON reading_tasks(user_id);
        ",
    )?;
    Ok(())
}
