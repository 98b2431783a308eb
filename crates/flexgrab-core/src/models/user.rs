//! The authenticated user record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The server-side record of an authenticated user.
///
/// On the wire the id field is `_id` and the remaining fields are
/// camelCase. The Amazon fields are the "linked identity": block
/// grabbing only activates once both are present.
///
/// Consumers receive owned copies of this record, never shared
/// references into session state.
///
/// # Security
///
/// The linked-identity secret and the bearer token are redacted from
/// `Debug` output to prevent accidental logging.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amazon_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amazon_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_token: Option<String>,
}

impl UserRecord {
    /// Returns true if both linked-identity fields are present.
    pub fn has_amazon_credentials(&self) -> bool {
        self.amazon_email.is_some() && self.amazon_password.is_some()
    }
}

// Hide secrets in Debug output
impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("amazon_email", &self.amazon_email)
            .field("amazon_password", &self.amazon_password.as_ref().map(|_| "[REDACTED]"))
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("device_token", &self.device_token)
            .finish()
    }
}
