//! Unit test suite for MCP Hub
//!
//! Cross-module tests of the sync pipeline that do not go through the CLI
//! binary. Fine-grained tests for individual modules live in `#[cfg(test)]`
//! blocks next to the code.
//!
//! # Running Unit Tests
//!
//! ```bash
//! cargo test --test unit
//! ```
//!
//! # Test Organization
//!
//! - **reconciler**: end-to-end sync behavior over temp directories:
//!   idempotence, preservation, backup gating, failure isolation

mod reconciler;
