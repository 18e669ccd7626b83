mod reading;

pub use reading::{ReadingService, ServiceError, MAX_UPLOAD_BYTES};
