//! Insurance policy entity

use chrono::{DateTime, Utc};
use core_kernel::{Entity, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The line of business an insurance record covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsuranceType {
    Auto,
    Health,
    Home,
    Life,
    Travel,
}

/// An insurance policy record.
///
/// The serialized form is the stored document, so the serde names here are
/// both the stored and the wire names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insurance {
    /// Business policy number. Expected unique per business rule; the data
    /// layer does not enforce it.
    pub policy_number: i64,
    pub insurance_type: InsuranceType,
    pub insurance_company_name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Premium in the account currency, serialized as a JSON number
    #[serde(with = "rust_decimal::serde::float")]
    pub premium_amount: Decimal,
    /// Coverage length in months
    pub tenure: i32,
    /// Owning user; referential integrity is not enforced by the store
    pub user_id: UserId,
}

impl Entity for Insurance {
    const COLLECTION: &'static str = "insurances";
}
