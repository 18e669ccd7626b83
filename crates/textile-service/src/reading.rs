use std::path::{Path, PathBuf};

use bytes::Bytes;
use thiserror::Error;
use tracing::warn;

use textile_core::task::{ReadingTask, TaskResponse, TaskStatus, UploadResponse};
use textile_db::{Db, DbError};
use textile_store::{sanitize_name, unique_name, UploadStore};

/// Uploads above this size are rejected before any file I/O.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbError> for ServiceError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound(msg) => ServiceError::NotFound(msg),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

/// Orchestrates the upload flow and translates stored rows into the
/// public response shapes.
pub struct ReadingService {
    db: Db,
    store: UploadStore,
    file_url_prefix: String,
}

impl ReadingService {
    pub fn new(db: Db, store: UploadStore, file_url_prefix: impl Into<String>) -> Self {
        Self {
            db,
            store,
            file_url_prefix: file_url_prefix.into(),
        }
    }

    /// Persist an uploaded file and record its task row.
    ///
    /// The file is written under a generated unique name first; if the
    /// subsequent insert fails, the orphan file is deleted best-effort
    /// and the original error surfaces.
    pub async fn create_task(
        &self,
        user_id: i64,
        file_name: &str,
        data: Bytes,
    ) -> Result<UploadResponse, ServiceError> {
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(ServiceError::InvalidInput(format!(
                "file size exceeds the limit ({} MiB)",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }

        let original = sanitize_name(file_name);
        if original.is_empty() {
            return Err(ServiceError::InvalidInput("file name is required".into()));
        }

        let storage_name = unique_name(&original);
        let path = self
            .store
            .put(&storage_name, data)
            .await
            .map_err(|e| ServiceError::Internal(format!("save file: {e}")))?;

        let task = match self
            .db
            .create_task(user_id, &original, &path.to_string_lossy())
        {
            Ok(task) => task,
            Err(e) => {
                if let Err(cleanup) = self.store.delete(&storage_name).await {
                    warn!("failed to remove orphaned upload {storage_name}: {cleanup}");
                }
                return Err(e.into());
            }
        };

        Ok(UploadResponse {
            task_id: task.id,
            file_name: task.file_name,
            file_url: self.file_url(&storage_name),
        })
    }

    pub fn get_task(&self, task_id: i64) -> Result<Option<TaskResponse>, ServiceError> {
        Ok(self.db.get_task(task_id)?.map(|t| self.to_response(t)))
    }

    pub fn list_user_tasks(&self, user_id: i64) -> Result<Vec<TaskResponse>, ServiceError> {
        let tasks = self.db.list_tasks_by_user(user_id)?;
        Ok(tasks.into_iter().map(|t| self.to_response(t)).collect())
    }

    pub fn update_status(&self, task_id: i64, status: TaskStatus) -> Result<(), ServiceError> {
        Ok(self.db.update_task_status(task_id, status)?)
    }

    /// Server-local path for a task's file, used by download serving.
    pub fn file_path(&self, task_id: i64) -> Result<PathBuf, ServiceError> {
        match self.db.get_task(task_id)? {
            Some(task) => Ok(PathBuf::from(task.file_path)),
            None => Err(ServiceError::NotFound(format!("task {task_id}"))),
        }
    }

    pub fn store(&self) -> &UploadStore {
        &self.store
    }

    fn file_url(&self, storage_name: &str) -> String {
        format!("{}/{storage_name}", self.file_url_prefix)
    }

    fn to_response(&self, task: ReadingTask) -> TaskResponse {
        let storage_name = Path::new(&task.file_path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        TaskResponse {
            task_id: task.id,
            user_id: task.user_id,
            file_name: task.file_name,
            file_url: self.file_url(&storage_name),
            status: task.status,
            created_at: task.created_at,
        }
    }
}
