#![deny(unsafe_code)]

//! Shared test utilities for the archief-keys workspace.
//!
//! Provides config builders, key sequence helpers, and tracing setup so that
//! individual crate tests stay concise and consistent.
//!
//! Add this crate as a `[dev-dependency]` in any workspace member:
//!
//! ```toml
//! [dev-dependencies]
//! archief-keys-test-utils = { workspace = true }
//! ```

pub mod config;
pub mod keys;
pub mod tracing_setup;
