//! Unified error types for the light service.
//!
//! A single `Error` enum that startup converts into: configuration and
//! face setup. All variants are `Copy` so they can be passed around
//! without allocation.
//!
//! Per-request problems never surface here: a malformed or foreign
//! Interest is a silent rejection (see [`Rejection`](crate::app::matcher::Rejection)).

use core::fmt;

use crate::ndn::name::NameError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible setup or I/O operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Startup configuration is invalid.
    Config(ConfigError),
    /// The network face failed.
    Face(FaceError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Face(e) => write!(f, "face: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<FaceError> for Error {
    fn from(e: FaceError) -> Self {
        Self::Face(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Startup configuration problems. All of them are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The identity name has no components.
    EmptyIdentity,
    /// The identity string is not a valid name URI.
    InvalidIdentity(NameError),
    /// The config file is not valid JSON for [`DeviceConfig`](crate::config::DeviceConfig).
    Parse { line: usize, column: usize },
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyIdentity => write!(f, "identity must have at least one component"),
            Self::InvalidIdentity(e) => write!(f, "invalid identity: {e}"),
            Self::Parse { line, column } => {
                write!(f, "malformed config at line {line}, column {column}")
            }
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Face errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceError {
    /// Socket setup (bind, multicast join, options) failed.
    Setup(std::io::ErrorKind),
    /// A send or receive call failed.
    Io(std::io::ErrorKind),
}

impl fmt::Display for FaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup(kind) => write!(f, "setup failed ({kind})"),
            Self::Io(kind) => write!(f, "I/O error ({kind})"),
        }
    }
}

impl std::error::Error for FaceError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
