pub mod task;
pub mod user;

pub use task::{ReadingTask, TaskResponse, TaskStatus, UploadResponse};
pub use user::User;
