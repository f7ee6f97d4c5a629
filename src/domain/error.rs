//! Error types for the hero roster.
//!
//! This module defines the centralized error type [`RosterError`] and a type alias
//! [`Result`] used throughout the crate. Validation failures, not-found mutations,
//! and out-of-range page requests are *not* errors; they are handled locally by
//! the components that detect them.

use thiserror::Error;

/// The main error type for hero roster operations.
///
/// # Examples
///
/// ```
/// use hero_roster::RosterError;
///
/// fn create_remote() -> Result<(), RosterError> {
///     Err(RosterError::Repository("backend unavailable".to_string()))
/// }
///
/// assert!(create_remote().is_err());
/// ```
#[derive(Debug, Error)]
pub enum RosterError {
    /// A repository mutation (create, update, delete) failed.
    ///
    /// The string carries the backend's diagnostic. It is logged, never shown
    /// verbatim to the user.
    #[error("Repository error: {0}")]
    Repository(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Raised while reading configuration files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A hero was created with an id another live hero already uses.
    #[error("Duplicate hero id: {0}")]
    DuplicateId(String),

    /// The hero being edited is no longer in the store.
    #[error("Hero not found: {0}")]
    HeroNotFound(String),

    /// A page size of zero was requested.
    #[error("Invalid page size: {0} (must be greater than zero)")]
    InvalidPageSize(usize),

    /// A form field name did not match any hero form field.
    #[error("Unknown form field: {0}")]
    UnknownField(String),
}

/// A specialized `Result` type for hero roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;
