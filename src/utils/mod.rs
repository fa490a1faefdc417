//! Cross-platform utilities for MCP Hub.

pub mod fs;
