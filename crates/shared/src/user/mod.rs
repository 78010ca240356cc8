use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub created_at: i64,
}

/// Emails are compared case-insensitively by the identity provider.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
