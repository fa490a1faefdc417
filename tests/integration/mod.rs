//! Integration test suite for MCP Hub
//!
//! End-to-end tests that drive the `mcphub` binary the way a user would,
//! with the hub data directory relocated into a temp dir via `MCPHUB_HOME`.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: full command workflows (register, enable, sync, import,
//!   status, config)

mod cli;
