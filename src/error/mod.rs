//! Error types and handling for vibe-flow
//!
//! Uses `thiserror` for error definitions and `miette` for diagnostic codes and
//! help text. Each variant of [`VibeFlowError`] maps to one entry of the exit
//! code taxonomy, see [`VibeFlowError::exit_code`].
//!
//! Sub-modules:
//! - [`fs`]: classification of `std::io::Error` into filesystem or permission errors

pub mod fs;


pub use fs::{fs_error, read_failed, write_failed};

use miette::Diagnostic;
use thiserror::Error;

/// Process exit codes, one per error category
pub mod exit_code {
    pub const UNKNOWN: i32 = 1;
    /// Reserved for clap usage errors
    pub const USAGE: i32 = 2;
    pub const NETWORK: i32 = 3;
    pub const FILE_SYSTEM: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const DEPENDENCY: i32 = 6;
    pub const RUNTIME_VERSION: i32 = 7;
}

/// Main error type for vibe-flow operations
#[derive(Error, Diagnostic, Debug)]
pub enum VibeFlowError {
    #[error("Failed to download framework from {url}: {reason}")]
    #[diagnostic(
        code(vibe_flow::network),
        help("Check your internet connection and that github.com is reachable, then retry")
    )]
    Network { url: String, reason: String },

    #[error("File system error at {path}: {reason}")]
    #[diagnostic(
        code(vibe_flow::fs),
        help("Check available disk space and that the target directory is valid")
    )]
    FileSystem { path: String, reason: String },

    #[error("Permission denied: {path}")]
    #[diagnostic(
        code(vibe_flow::permission),
        help("Make sure you have write access to the project directory (check ownership and mode)")
    )]
    Permission { path: String },

    #[error("Required command not found: {name}")]
    #[diagnostic(
        code(vibe_flow::dependency),
        help("Install '{name}' and make sure it is on your PATH")
    )]
    Dependency { name: String },

    #[error("Installer {found} is too old, this framework release requires {required} or newer")]
    #[diagnostic(
        code(vibe_flow::runtime_version),
        help("Upgrade vibe-flow to {required} or newer and run the install again")
    )]
    RuntimeVersion { required: String, found: String },

    #[error("Failed to parse {path}: {reason}")]
    #[diagnostic(
        code(vibe_flow::config::parse_failed),
        help("Fix the JSON syntax in the file or remove it and run the install again")
    )]
    ConfigParse { path: String, reason: String },

    #[error("Unknown install profile: {name}")]
    #[diagnostic(
        code(vibe_flow::config::unknown_profile),
        help("Use one of the built-in profiles (current, legacy) or a path to a YAML profile")
    )]
    UnknownProfile { name: String },

    #[error("Unexpected error: {message}")]
    #[diagnostic(
        code(vibe_flow::unknown),
        help("Run again with DEBUG=1 for details and report the issue if it persists")
    )]
    Unknown { message: String },
}

impl VibeFlowError {
    /// Exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            VibeFlowError::Network { .. } => exit_code::NETWORK,
            VibeFlowError::FileSystem { .. } | VibeFlowError::ConfigParse { .. } => {
                exit_code::FILE_SYSTEM
            }
            VibeFlowError::Permission { .. } => exit_code::PERMISSION,
            VibeFlowError::Dependency { .. } => exit_code::DEPENDENCY,
            VibeFlowError::RuntimeVersion { .. } => exit_code::RUNTIME_VERSION,
            VibeFlowError::UnknownProfile { .. } => exit_code::USAGE,
            VibeFlowError::Unknown { .. } => exit_code::UNKNOWN,
        }
    }

    /// One actionable suggestion for the user
    pub fn suggestion(&self) -> String {
        self.help()
            .map(|h| h.to_string())
            .unwrap_or_else(|| "Run again with DEBUG=1 for details".to_string())
    }
}

impl From<serde_json::Error> for VibeFlowError {
    fn from(err: serde_json::Error) -> Self {
        VibeFlowError::ConfigParse {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for VibeFlowError {
    fn from(err: inquire::InquireError) -> Self {
        VibeFlowError::Unknown {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, VibeFlowError>;
