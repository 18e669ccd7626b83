use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user row. User management is external; tasks reference users by id
/// without validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
