//! User entity and response mapping

use chrono::{DateTime, Utc};
use core_kernel::{Document, Entity};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user.
///
/// The serialized form is the stored document, so field names here are the
/// stored names. The password hash is persisted with the document but never
/// leaves the service: every response goes through [`UserResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    /// Profile image URL; empty when the user never set one
    #[serde(default)]
    pub avatar: String,
}

impl Entity for User {
    const COLLECTION: &'static str = "users";
}

/// The outward-facing shape of a user document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Document<User>> for UserResponse {
    fn from(doc: Document<User>) -> Self {
        Self {
            id: doc.id,
            username: doc.data.username,
            email: doc.data.email,
            avatar: doc.data.avatar,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}
