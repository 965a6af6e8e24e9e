//! User Domain
//!
//! The registered-account entity, its outward-facing response shape, and
//! password hashing. Users are created on registration, read during
//! authentication and lookups, updated partially, and never deleted.

pub mod password;
pub mod user;

pub use password::{hash_password, verify_password, PasswordError};
pub use user::{User, UserResponse};
