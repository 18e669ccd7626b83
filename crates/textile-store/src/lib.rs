mod names;
mod upload;

pub use names::{sanitize_name, unique_name};
pub use upload::{StoreError, UploadStore};
