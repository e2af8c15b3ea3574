use serde::Deserialize;

use keyward_users::UserRecord;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn user_to_json(record: UserRecord) -> serde_json::Value {
    serde_json::json!({
        "id": record.id.to_string(),
        "email": record.email.as_str(),
        "first_name": record.first_name,
        "last_name": record.last_name,
        "phone": record.phone,
        "created_at": record.created_at.to_rfc3339(),
    })
}
