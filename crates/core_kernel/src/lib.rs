//! Core Kernel - Foundational types for the insurance backend
//!
//! This crate provides the building blocks shared by every domain module:
//! - Strongly-typed entity identifiers
//! - Offset pagination primitives
//! - The generic entity store contract that all persistence goes through

pub mod identifiers;
pub mod pagination;
pub mod store;

pub use identifiers::{InsuranceId, UserId};
pub use pagination::{Page, PageParams};
pub use store::{Document, Entity, EntityStore, Filter, Patch, StoreError};
