use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to distinguish a refused operation from a
/// usage error or a failure talking to the planning API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// The operation was refused: missing permission or a declined confirmation
    Refused = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (API error, network error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Picks the exit code matching an error returned by a command.
    pub fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<ApiError>() {
            Some(ApiError::PermissionDenied { .. }) => return ExitCode::Refused,
            Some(_) => return ExitCode::ApplicationError,
            None => {}
        }
        match error.downcast_ref::<PlannerError>() {
            Some(PlannerError::ConfirmationDeclined) => ExitCode::Refused,
            _ => ExitCode::ApplicationError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::Refused => write!(f, "Refused (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors produced while talking to the planning API.
///
/// Call sites keep them inside `anyhow::Error` and recover the variant with
/// `downcast_ref` when they need to decide how to surface the failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Rejected locally before any request was sent
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Transport failure: connection refused, DNS, timeout
    #[error("Server unavailable: {message}\n\n💡 Hint: Check that the planning API is running and reachable")]
    Network { message: String },

    #[error("Unauthorized: {message}\n\n💡 Hint: Run `event-planner login` to open a new session")]
    Unauthorized { message: String },

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response from the planning API: {details}")]
    Decode { details: String },
}

impl ApiError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Builds the error for a non-success HTTP status.
    ///
    /// `server_message` is the message extracted from the response body, if any.
    pub fn from_status(status: u16, server_message: Option<String>) -> Self {
        match status {
            401 => ApiError::Unauthorized {
                message: server_message
                    .unwrap_or_else(|| "Votre session a expiré".to_string()),
            },
            403 => ApiError::PermissionDenied {
                message: server_message
                    .unwrap_or_else(|| "Permissions insuffisantes pour cette action".to_string()),
            },
            404 => ApiError::NotFound {
                message: server_message
                    .unwrap_or_else(|| "La ressource demandée n'existe pas.".to_string()),
            },
            _ => ApiError::Server {
                status,
                message: server_message.unwrap_or_else(|| format!("HTTP status {}", status)),
            },
        }
    }

    /// HTTP-like status of the error, `0` for transport failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Validation { .. } | ApiError::Decode { .. } => None,
            ApiError::Network { .. } => Some(0),
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::PermissionDenied { .. } => Some(403),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Server { status, .. } => Some(*status),
        }
    }
}

/// Local failures of the client: files, configuration, session and UI flow.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("No active session\n\n💡 Hint: Run `event-planner login` first")]
    NotAuthenticated,

    /// Only one confirmation may be outstanding at a time
    #[error("Another confirmation is already waiting for an answer")]
    ConfirmationPending,

    #[error("Operation cancelled")]
    ConfirmationDeclined,

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
