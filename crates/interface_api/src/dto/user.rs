//! User DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{Patch, StoreError};

/// Partial user update; password changes are not part of this surface
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateUserDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl UpdateUserDto {
    /// Builds the patch of supplied fields
    pub fn into_patch(&self) -> Result<Patch, StoreError> {
        Patch::from_serialize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patch_carries_only_supplied_fields() {
        let dto: UpdateUserDto = serde_json::from_value(json!({"username": "janet"})).unwrap();
        assert_eq!(dto.into_patch().unwrap().as_value(), json!({"username": "janet"}));
    }

    #[test]
    fn test_bad_email_fails_validation() {
        let dto: UpdateUserDto = serde_json::from_value(json!({"email": "not-an-email"})).unwrap();
        assert!(dto.validate().is_err());
    }
}
