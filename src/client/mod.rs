//! Supported MCP client applications and their platform config paths.
//!
//! Every client the hub can sync into is a [`ClientKind`]. A kind knows its
//! display name, its stable string form (used on the CLI and in the store),
//! and where the client keeps its config file on each platform. The
//! `Custom` kind has no default path; instances of it always carry an
//! explicit one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::core::HubError;

/// A supported MCP client application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClientKind {
    /// Claude Desktop app
    ClaudeDesktop,
    /// Claude Code CLI
    ClaudeCode,
    /// Cursor editor
    Cursor,
    /// Windsurf editor
    Windsurf,
    /// Visual Studio Code (native MCP support)
    VsCode,
    /// Zed editor
    Zed,
    /// Continue extension
    Continue,
    /// Cline extension
    Cline,
    /// Gemini CLI
    GeminiCli,
    /// OpenCode CLI
    OpenCode,
    /// Amp
    Amp,
    /// LM Studio
    LmStudio,
    /// Any other client with a user-supplied config path
    Custom,
}

impl ClientKind {
    /// All supported kinds, in display order.
    pub const fn all() -> &'static [Self] {
        &[
            Self::ClaudeDesktop,
            Self::ClaudeCode,
            Self::Cursor,
            Self::Windsurf,
            Self::VsCode,
            Self::Zed,
            Self::Continue,
            Self::Cline,
            Self::GeminiCli,
            Self::OpenCode,
            Self::Amp,
            Self::LmStudio,
            Self::Custom,
        ]
    }

    /// Stable string form, matching the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClaudeDesktop => "claude-desktop",
            Self::ClaudeCode => "claude-code",
            Self::Cursor => "cursor",
            Self::Windsurf => "windsurf",
            Self::VsCode => "vs-code",
            Self::Zed => "zed",
            Self::Continue => "continue",
            Self::Cline => "cline",
            Self::GeminiCli => "gemini-cli",
            Self::OpenCode => "open-code",
            Self::Amp => "amp",
            Self::LmStudio => "lm-studio",
            Self::Custom => "custom",
        }
    }

    /// Human-readable name for tables and messages.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ClaudeDesktop => "Claude Desktop",
            Self::ClaudeCode => "Claude Code",
            Self::Cursor => "Cursor",
            Self::Windsurf => "Windsurf",
            Self::VsCode => "VS Code",
            Self::Zed => "Zed",
            Self::Continue => "Continue",
            Self::Cline => "Cline",
            Self::GeminiCli => "Gemini CLI",
            Self::OpenCode => "OpenCode",
            Self::Amp => "Amp",
            Self::LmStudio => "LM Studio",
            Self::Custom => "Custom",
        }
    }

    /// Default config file location for this kind on the current platform.
    ///
    /// Returns `None` when the kind has no well-known location here, which
    /// includes `Custom` everywhere.
    pub fn default_config_path(self) -> Option<PathBuf> {
        match self {
            Self::ClaudeDesktop => claude_desktop_config_path(),
            Self::ClaudeCode => dirs::home_dir().map(|home| home.join(".claude.json")),
            Self::Cursor => dirs::home_dir().map(|home| home.join(".cursor/mcp.json")),
            Self::Windsurf => {
                dirs::home_dir().map(|home| home.join(".codeium/windsurf/mcp_config.json"))
            }
            Self::VsCode => vs_code_user_dir().map(|user| user.join("mcp.json")),
            Self::Zed => zed_config_path(),
            Self::Continue => dirs::home_dir().map(|home| home.join(".continue/config.json")),
            Self::Cline => vs_code_user_dir().map(|user| {
                user.join("globalStorage/saoudrizwan.claude-dev/settings/cline_mcp_settings.json")
            }),
            Self::GeminiCli => dirs::home_dir().map(|home| home.join(".gemini/settings.json")),
            Self::OpenCode => dirs::home_dir().map(|home| home.join(".opencode/mcp.json")),
            Self::Amp => dirs::config_dir().map(|config| config.join("amp/settings.json")),
            Self::LmStudio => dirs::home_dir().map(|home| home.join(".lmstudio/mcp.json")),
            Self::Custom => None,
        }
    }
}

impl fmt::Display for ClientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientKind {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| HubError::UnknownClientKind {
                value: s.to_string(),
            })
    }
}

fn claude_desktop_config_path() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        dirs::home_dir()
            .map(|home| home.join("Library/Application Support/Claude/claude_desktop_config.json"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::config_dir().map(|config| config.join("Claude/claude_desktop_config.json"))
    }
}

fn vs_code_user_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        dirs::home_dir().map(|home| home.join("Library/Application Support/Code/User"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::config_dir().map(|config| config.join("Code/User"))
    }
}

fn zed_config_path() -> Option<PathBuf> {
    // Zed keeps ~/.config/zed on macOS and Linux alike
    #[cfg(target_os = "windows")]
    {
        dirs::config_dir().map(|config| config.join("Zed/settings.json"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        dirs::home_dir().map(|home| home.join(".config/zed/settings.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_forms_round_trip() {
        for kind in ClientKind::all() {
            let parsed: ClientKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, *kind);
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = "not-a-client".parse::<ClientKind>().unwrap_err();
        assert!(matches!(err, HubError::UnknownClientKind { value } if value == "not-a-client"));
    }

    #[test]
    fn serde_matches_as_str() {
        for kind in ClientKind::all() {
            let json = serde_json::to_string(kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn custom_has_no_default_path() {
        assert!(ClientKind::Custom.default_config_path().is_none());
    }

    #[test]
    fn known_kinds_resolve_paths_on_this_platform() {
        // With a home directory available, the table should resolve
        if dirs::home_dir().is_some() {
            assert!(ClientKind::ClaudeCode.default_config_path().is_some());
            assert!(ClientKind::Cursor.default_config_path().is_some());
        }
    }
}
