//! Core types and error handling for MCP Hub.
//!
//! This module hosts the strongly-typed error enum used throughout the hub
//! and the user-facing error presentation layer the CLI renders on failure.

pub mod error;

pub use error::{ErrorContext, HubError, user_friendly_error};
