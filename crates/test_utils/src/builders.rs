//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults, so
//! tests specify only the fields they care about.

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_kernel::UserId;
use domain_insurance::{Insurance, InsuranceType};
use rust_decimal::Decimal;

/// Builder for insurance records
pub struct InsuranceBuilder {
    policy_number: i64,
    insurance_type: InsuranceType,
    insurance_company_name: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    premium_amount: Decimal,
    tenure: i32,
    user_id: UserId,
}

impl Default for InsuranceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InsuranceBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        Self {
            policy_number: 123456,
            insurance_type: InsuranceType::Auto,
            insurance_company_name: "ABC Company".to_string(),
            start_date: start,
            end_date: start + Duration::days(182),
            premium_amount: Decimal::from(20000),
            tenure: 6,
            user_id: UserId::new(),
        }
    }

    /// Sets the policy number
    pub fn with_policy_number(mut self, number: i64) -> Self {
        self.policy_number = number;
        self
    }

    /// Sets the insurance type
    pub fn with_insurance_type(mut self, insurance_type: InsuranceType) -> Self {
        self.insurance_type = insurance_type;
        self
    }

    /// Sets the insurance company name
    pub fn with_company_name(mut self, name: impl Into<String>) -> Self {
        self.insurance_company_name = name.into();
        self
    }

    /// Sets the coverage window
    pub fn with_coverage(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Sets the premium amount
    pub fn with_premium(mut self, premium: Decimal) -> Self {
        self.premium_amount = premium;
        self
    }

    /// Sets the tenure in months
    pub fn with_tenure(mut self, tenure: i32) -> Self {
        self.tenure = tenure;
        self
    }

    /// Sets the owning user
    pub fn with_user_id(mut self, user_id: UserId) -> Self {
        self.user_id = user_id;
        self
    }

    /// Builds the insurance record
    pub fn build(self) -> Insurance {
        Insurance {
            policy_number: self.policy_number,
            insurance_type: self.insurance_type,
            insurance_company_name: self.insurance_company_name,
            start_date: self.start_date,
            end_date: self.end_date,
            premium_amount: self.premium_amount,
            tenure: self.tenure,
            user_id: self.user_id,
        }
    }
}
