//! Insurance Domain
//!
//! The insurance policy record and its validation rules. Records are owned
//! by a user, created through the API, mutated with partial updates, and
//! looked up by id or business policy number.

pub mod insurance;
pub mod validation;

pub use insurance::{Insurance, InsuranceType};
pub use validation::{InsuranceValidator, ValidationResult};
