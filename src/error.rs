//! Error taxonomy for registration and accessor calls.

use thiserror::Error;

use crate::config::ConfigError;

/// Error type returned by a before-write hook to abort the write.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while registering a translatable field or calling its accessors.
///
/// None of these are transient; they signal a programming or configuration
/// mistake and are always propagated to the caller. A missing translation is
/// not an error and is reported as `Ok(None)`.
#[derive(Error, Debug)]
pub enum TranslatableError {
    /// The raw field name does not end with the required suffix.
    #[error("Field '{field}' must end with '{suffix}'")]
    InvalidSuffix {
        /// Raw field name passed to the registrar
        field: String,
        /// Effective suffix at registration time
        suffix: String,
    },

    /// The field is already registered on this model type.
    #[error("Field '{field}' is already registered as translatable")]
    DuplicateRegistration {
        /// Raw field name
        field: String,
    },

    /// The requested locale is absent or outside the current locale set.
    #[error("Invalid locale: {}", .0.as_deref().unwrap_or("<none>"))]
    InvalidLocale(Option<String>),

    /// The record exposes neither a plain accessor nor an instance slot for the field.
    #[error("No accessor for field '{field}'")]
    MissingAccessor {
        /// Raw field name
        field: String,
    },

    /// No generated operation with this name exists on the model type.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// The before-write hook refused the change.
    #[error("Write to '{field}' aborted by before-write hook: {source}")]
    WriteAborted {
        /// Raw field name
        field: String,
        /// Error returned by the hook
        source: HookError,
    },

    /// Configuration could not be applied.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result alias used across the crate.
pub type Result<T, E = TranslatableError> = std::result::Result<T, E>;
