//! Test Utilities Crate
//!
//! Shared test infrastructure for the insurance backend test suite:
//!
//! - `memory`: the in-memory entity store adapter the API tests run against
//! - `fixtures`: ready-to-use sample entities
//! - `builders`: builder patterns for test data construction

pub mod builders;
pub mod fixtures;
pub mod memory;

pub use builders::*;
pub use fixtures::*;
pub use memory::MemoryStore;

use once_cell::sync::OnceCell;

static TRACING: OnceCell<()> = OnceCell::new();

/// Initializes tracing once for a test binary. Safe to call from every test.
pub fn init_test_tracing() {
    TRACING.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
