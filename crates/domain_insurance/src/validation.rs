//! Insurance validation rules
//!
//! Validation is a set of explicit rule checks accumulating into a
//! [`ValidationResult`], not attribute-driven reflection. Errors block
//! persistence; warnings are advisory and surface in logs only.
//!
//! # Rules
//!
//! - Policy number must be positive
//! - Insurance company name must not be blank
//! - Coverage end must come after coverage start
//! - Premium amount must be positive
//! - Tenure must be at least one month

use chrono::Duration;
use rust_decimal::Decimal;

use crate::insurance::Insurance;

/// Result of insurance validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the record is valid
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
    /// List of validation warnings (non-fatal issues)
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Creates a failed validation result with errors
    pub fn fail(errors: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Adds a warning to the result
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Merges another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Validator for insurance records
pub struct InsuranceValidator;

impl InsuranceValidator {
    /// Validates a full insurance record
    pub fn validate(insurance: &Insurance) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if insurance.policy_number <= 0 {
            result.add_error("Policy number must be a positive number");
        }

        if insurance.insurance_company_name.trim().is_empty() {
            result.add_error("Insurance company name must not be empty");
        }

        if insurance.end_date <= insurance.start_date {
            result.add_error("End date must be after start date");
        }

        if insurance.premium_amount <= Decimal::ZERO {
            result.add_error("Premium amount must be a positive number");
        }

        if insurance.tenure <= 0 {
            result.add_error("Tenure must be at least one month");
        }

        // Tenure is months; a tenure reaching well past the coverage window
        // is suspicious but not fatal.
        if insurance.tenure > 0 && insurance.end_date > insurance.start_date {
            let window = insurance.end_date - insurance.start_date;
            let tenure_days = Duration::days(i64::from(insurance.tenure) * 31);
            if tenure_days > window + Duration::days(31) {
                result.add_warning("Tenure extends past the coverage window");
            }
        }

        result
    }
}
