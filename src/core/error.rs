//! Error handling for MCP Hub
//!
//! This module provides error types and user-friendly error reporting for the
//! hub. The error system is designed around two core principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! The error system consists of two main types:
//! - [`HubError`] - Enumerated error types for all failure cases in the hub
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Error Categories
//!
//! - **Sync failures**: [`HubError::PathUnresolved`], [`HubError::Io`],
//!   [`HubError::ConfigCorrupt`], [`HubError::BackupFailed`]. These carry the
//!   file path involved and are reported per instance, so one failing target
//!   never aborts a sync-all run.
//! - **Lookup failures**: [`HubError::ServerNotFound`],
//!   [`HubError::InstanceNotFound`], [`HubError::UnknownClientKind`].
//! - **Hub state**: [`HubError::StoreParseError`], [`HubError::ConfigError`].
//!
//! Use [`user_friendly_error`] to convert any error into a user-friendly
//! format with contextual suggestions.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mcphub_cli::core::{HubError, user_friendly_error};
//!
//! fn resolve(name: &str) -> Result<(), HubError> {
//!     Err(HubError::ServerNotFound { name: name.to_string() })
//! }
//!
//! if let Err(e) = resolve("github") {
//!     let ctx = user_friendly_error(anyhow::Error::from(e));
//!     ctx.display(); // Shows colored error with suggestions
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for MCP Hub operations
///
/// Each variant represents a specific failure mode and carries enough context
/// (paths, names, reasons) for both programmatic handling and user display.
#[derive(Error, Debug)]
pub enum HubError {
    /// A client instance has no usable config file path
    ///
    /// Raised when an instance's stored path is empty and its client kind has
    /// no default location on this platform.
    #[error("instance '{name}' has no usable config file path")]
    PathUnresolved {
        /// Name of the instance without a resolvable path
        name: String,
    },

    /// An OS-level I/O failure at a specific path
    #[error("I/O error at {path}")]
    Io {
        /// Path where the failure occurred
        path: String,
        /// The underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// An existing config file could not be parsed
    ///
    /// The sync engine refuses to guess at malformed content: a file that
    /// does not parse is reported, never overwritten.
    #[error("config file {path} is not valid JSON: {reason}")]
    ConfigCorrupt {
        /// Path to the unparseable config file
        path: String,
        /// Parser diagnostic
        reason: String,
    },

    /// A pre-write backup could not be created
    ///
    /// A file the hub cannot snapshot is never overwritten, so this aborts
    /// the sync of the affected instance.
    #[error("failed to back up {path} before writing: {reason}")]
    BackupFailed {
        /// Path to the file that could not be backed up
        path: String,
        /// Reason the backup failed
        reason: String,
    },

    /// Server definition not found in the registry
    #[error("no server named '{name}' in the registry")]
    ServerNotFound {
        /// The name or id that did not match any server
        name: String,
    },

    /// Client instance not found
    #[error("no client instance named '{name}'")]
    InstanceNotFound {
        /// The name or id that did not match any instance
        name: String,
    },

    /// Unrecognized client kind string
    #[error("unknown client kind '{value}'")]
    UnknownClientKind {
        /// The string that did not match any supported client kind
        value: String,
    },

    /// The hub's own record store failed to parse
    #[error("invalid record store syntax in {file}: {reason}")]
    StoreParseError {
        /// Path to the record store file
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// Configuration error
    #[error("configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for HubError {
    fn clone(&self) -> Self {
        match self {
            Self::PathUnresolved {
                name,
            } => Self::PathUnresolved {
                name: name.clone(),
            },
            Self::ConfigCorrupt {
                path,
                reason,
            } => Self::ConfigCorrupt {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::BackupFailed {
                path,
                reason,
            } => Self::BackupFailed {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::ServerNotFound {
                name,
            } => Self::ServerNotFound {
                name: name.clone(),
            },
            Self::InstanceNotFound {
                name,
            } => Self::InstanceNotFound {
                name: name.clone(),
            },
            Self::UnknownClientKind {
                value,
            } => Self::UnknownClientKind {
                value: value.clone(),
            },
            Self::StoreParseError {
                file,
                reason,
            } => Self::StoreParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            // For errors that don't implement Clone, convert to Other
            Self::Io {
                path,
                source,
            } => Self::Other {
                message: format!("I/O error at {path}: {source}"),
            },
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::TomlSerError(e) => Self::Other {
                message: format!("TOML serialization error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

impl HubError {
    /// Build an [`HubError::Io`] from a path and OS error.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// `ErrorContext` wraps a [`HubError`] and adds optional suggestions and
/// details. This is the primary way the hub presents errors to CLI users.
///
/// # Display Format
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying hub error
    pub error: HubError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`HubError`]
    #[must_use]
    pub const fn new(error: HubError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    ///
    /// Suggestions should be actionable steps users can take. They are
    /// displayed in green in the terminal.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    ///
    /// Details are displayed in yellow, less prominent than the main error
    /// or suggestion.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// This function is the main entry point for converting arbitrary errors into
/// user-friendly messages for CLI display. It recognizes [`HubError`] variants
/// and common I/O failures and attaches appropriate suggestions; anything else
/// is wrapped with generic formatting.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(hub_error) = error.downcast_ref::<HubError>() {
        return create_error_context(hub_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(HubError::Other {
                    message: format!("permission denied: {io_error}"),
                })
                .with_suggestion("Check file ownership or re-run with the needed permissions")
                .with_details("The hub does not have permission to read or write a file it needs");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(HubError::Other {
                    message: format!("file not found: {io_error}"),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(HubError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Fix the TOML syntax in the hub config file")
        .with_details("Run 'mcphub config show' to see which file is being loaded");
    }

    ErrorContext::new(HubError::Other {
        message: format!("{error:#}"),
    })
}

fn create_error_context(error: HubError) -> ErrorContext {
    match &error {
        HubError::PathUnresolved {
            name,
        } => {
            let name = name.clone();
            ErrorContext::new(error)
                .with_suggestion(format!(
                    "Set an explicit path with 'mcphub instance add {name} --kind <kind> --path <file>'"
                ))
                .with_details(
                    "The instance has no stored config path and its client kind has no default location on this platform",
                )
        }
        HubError::ConfigCorrupt {
            path, ..
        } => {
            let path = path.clone();
            ErrorContext::new(error)
                .with_suggestion(format!("Fix or remove the malformed file at {path} and sync again"))
                .with_details("The hub never overwrites a config file it cannot parse")
        }
        HubError::BackupFailed {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check permissions on the hub backup directory")
            .with_details("A config file that cannot be snapshotted is never overwritten"),
        HubError::ServerNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Run 'mcphub server list' to see registered servers"),
        HubError::InstanceNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Run 'mcphub instance list' to see configured instances"),
        HubError::UnknownClientKind {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Run 'mcphub detect' to list the supported client kinds"),
        HubError::StoreParseError {
            file, ..
        } => {
            let file = file.clone();
            ErrorContext::new(error).with_details(format!(
                "The hub record store at {file} is damaged; restore it from a backup or remove it to start fresh"
            ))
        }
        _ => ErrorContext::new(error),
    }
}
