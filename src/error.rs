//! Error types for the Increment Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while managing employees and
//! policies or loading configuration.

use thiserror::Error;

/// The main error type for the Increment Engine.
///
/// The matcher and calculator never return errors; these variants cover the
/// boundary around them: configuration, validation and the record store.
///
/// # Example
///
/// ```
/// use increment_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "E042".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: E042");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An experience range string did not match either range grammar.
    #[error("Malformed experience range '{range}': {message}")]
    MalformedRange {
        /// The offending range text.
        range: String,
        /// Why the text was rejected.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A policy record was invalid or contained inconsistent data.
    #[error("Invalid policy field '{field}': {message}")]
    InvalidPolicy {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A partial update carried no fields.
    #[error("At least one field is required to update {entity}")]
    EmptyUpdate {
        /// The kind of record being updated ("employee" or "policy").
        entity: String,
    },

    /// No employee exists with the given id.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        employee_id: String,
    },

    /// No policy exists with the given id.
    #[error("Policy not found: {policy_id}")]
    PolicyNotFound {
        /// The id that was looked up.
        policy_id: i64,
    },

    /// An employee with this id is already registered.
    #[error("Employee with ID {employee_id} already exists")]
    DuplicateEmployee {
        /// The conflicting id.
        employee_id: String,
    },

    /// The record store failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

impl From<rusqlite::Error> for EngineError {
    fn from(error: rusqlite::Error) -> Self {
        EngineError::Storage {
            message: error.to_string(),
        }
    }
}
