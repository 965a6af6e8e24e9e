//! Insurance DTOs
//!
//! Field requirements follow the persisted schema: everything is required on
//! create, everything is optional on update. Optional update fields skip
//! serialization so the resulting patch never nulls a stored field.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{Filter, Patch, StoreError, UserId};
use domain_insurance::{Insurance, InsuranceType};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInsuranceDto {
    #[validate(range(min = 1, message = "Policy number must be a positive number"))]
    pub policy_number: i64,
    pub insurance_type: InsuranceType,
    #[validate(length(min = 1, message = "Insurance company name must not be empty"))]
    pub insurance_company_name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    pub premium_amount: Decimal,
    #[validate(range(min = 1, message = "Tenure must be at least one month"))]
    pub tenure: i32,
    pub user_id: UserId,
}

impl CreateInsuranceDto {
    /// Builds the entity to persist
    pub fn into_insurance(self) -> Insurance {
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

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateInsuranceDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "Policy number must be a positive number"))]
    pub policy_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_type: Option<InsuranceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Insurance company name must not be empty"))]
    pub insurance_company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub premium_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "Tenure must be at least one month"))]
    pub tenure: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

impl UpdateInsuranceDto {
    /// Builds the patch of supplied fields
    pub fn into_patch(&self) -> Result<Patch, StoreError> {
        Patch::from_serialize(self)
    }
}

/// Filter payload for `POST /insurance/filter-by-user-quote`
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterInsuranceDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_type: Option<InsuranceType>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub premium_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenure: Option<i32>,
}

impl FilterInsuranceDto {
    /// Builds the store filter from the supplied fields
    pub fn into_filter(&self) -> Result<Filter, StoreError> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(fields)) => Ok(Filter::from_fields(fields)),
            Ok(other) => Err(StoreError::Serialization(format!(
                "filter must serialize to an object, got {other}"
            ))),
            Err(e) => Err(StoreError::Serialization(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_patch_skips_missing_fields() {
        let dto: UpdateInsuranceDto =
            serde_json::from_value(json!({"premiumAmount": 25000})).unwrap();
        let patch = dto.into_patch().unwrap();

        assert_eq!(patch.as_value(), json!({"premiumAmount": 25000.0}));
    }

    #[test]
    fn test_empty_update_is_an_empty_patch() {
        let dto: UpdateInsuranceDto = serde_json::from_value(json!({})).unwrap();
        assert!(dto.into_patch().unwrap().is_empty());
    }

    #[test]
    fn test_filter_keeps_only_supplied_fields() {
        let dto: FilterInsuranceDto =
            serde_json::from_value(json!({"insuranceType": "Auto", "tenure": 6})).unwrap();
        let filter = dto.into_filter().unwrap();

        assert_eq!(
            filter.fields_value(),
            json!({"insuranceType": "Auto", "tenure": 6})
        );
        assert!(filter.id().is_none());
    }

    #[test]
    fn test_create_dto_validation() {
        let dto: CreateInsuranceDto = serde_json::from_value(json!({
            "policyNumber": 0,
            "insuranceType": "Auto",
            "insuranceCompanyName": "",
            "startDate": "2026-01-01T00:00:00Z",
            "endDate": "2026-07-01T00:00:00Z",
            "premiumAmount": 20000,
            "tenure": 0,
            "userId": "8b1fcf0e-46c5-4aa9-b0dd-4971f1d0a9bd"
        }))
        .unwrap();

        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 3);
    }
}
