//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for the domain entities. Fixed fixtures give
//! deterministic assertions; random ones give variety where the exact
//! values do not matter.

use chrono::{TimeZone, Utc};
use core_kernel::UserId;
use domain_insurance::{Insurance, InsuranceType};
use domain_user::User;
use fake::faker::internet::en::{FreeEmail, Username};
use fake::Fake;
use rust_decimal::Decimal;

/// Fixtures for user documents
pub struct UserFixtures;

impl UserFixtures {
    /// A deterministic sample user. The stored hash is a placeholder; tests
    /// that verify passwords hash their own at runtime.
    pub fn jane() -> User {
        User {
            username: "jane".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: "$2b$04$CwTycUXWue0Thq9StjUM0uJ8ZkVTNOrbkwAHCO5tC5zfKTC5XmW7S".to_string(),
            avatar: "https://example.com/avatars/jane.png".to_string(),
        }
    }

    /// A user with random credentials and no avatar
    pub fn random() -> User {
        User {
            username: Username().fake(),
            email: FreeEmail().fake(),
            password_hash: "$2b$04$CwTycUXWue0Thq9StjUM0uJ8ZkVTNOrbkwAHCO5tC5zfKTC5XmW7S".to_string(),
            avatar: String::new(),
        }
    }
}

/// Fixtures for insurance documents
pub struct InsuranceFixtures;

impl InsuranceFixtures {
    /// The canonical auto policy used across the suite
    pub fn auto(user_id: UserId) -> Insurance {
        Insurance {
            policy_number: 123456,
            insurance_type: InsuranceType::Auto,
            insurance_company_name: "ABC Company".to_string(),
            start_date: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap(),
            premium_amount: Decimal::from(20000),
            tenure: 6,
            user_id,
        }
    }
}
