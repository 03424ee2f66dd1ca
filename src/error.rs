//! Error types for the DFS lineup optimizer

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;


pub type Result<T> = std::result::Result<T, DfsError>;

/// Coarse error classes reported back to callers.
///
/// Invalid input and infeasibility are the caller's to fix; resource
/// exhaustion means the time budget ran out before any lineup was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    InvalidInput,
    Infeasible,
    ResourceExhausted,
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCategory::InvalidInput => "invalid_input",
            ErrorCategory::Infeasible => "infeasible",
            ErrorCategory::ResourceExhausted => "resource_exhausted",
            ErrorCategory::Internal => "internal",
        };
        write!(f, "{}", s)
    }
}

#[derive(Error, Debug)]
pub enum DfsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Unsupported site: {site}")]
    UnsupportedSite { site: String },

    #[error("Unsupported sport: {sport}")]
    UnsupportedSport { sport: String },

    #[error("Unsupported site/sport combination: {site} {sport}")]
    UnsupportedRoster { site: String, sport: String },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Invalid player {id}: {reason}")]
    InvalidPlayer { id: String, reason: String },

    #[error("Duplicate player id: {id}")]
    DuplicatePlayer { id: String },

    #[error("Unknown player id: {id}")]
    UnknownPlayer { id: String },

    #[error("Invalid constraint: {message}")]
    InvalidConstraint { message: String },

    #[error("Invalid configuration for {key}: {message}")]
    InvalidConfig { key: String, message: String },

    #[error("Infeasible lineup: {reason}")]
    Infeasible { reason: String },

    #[error("Exceeded time budget of {limit_ms} ms without finding a lineup")]
    TimeBudgetExceeded { limit_ms: u64 },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DfsError {
    pub fn infeasible(reason: impl Into<String>) -> Self {
        DfsError::Infeasible {
            reason: reason.into(),
        }
    }

    pub fn invalid_constraint(message: impl Into<String>) -> Self {
        DfsError::InvalidConstraint {
            message: message.into(),
        }
    }

    /// Map the error onto the category reported in responses.
    pub fn category(&self) -> ErrorCategory {
        match self {
            DfsError::Json(_)
            | DfsError::UnsupportedSite { .. }
            | DfsError::UnsupportedSport { .. }
            | DfsError::UnsupportedRoster { .. }
            | DfsError::InvalidPosition { .. }
            | DfsError::InvalidPlayer { .. }
            | DfsError::DuplicatePlayer { .. }
            | DfsError::UnknownPlayer { .. }
            | DfsError::InvalidConstraint { .. }
            | DfsError::InvalidConfig { .. } => ErrorCategory::InvalidInput,
            DfsError::Infeasible { .. } => ErrorCategory::Infeasible,
            DfsError::TimeBudgetExceeded { .. } => ErrorCategory::ResourceExhausted,
            DfsError::Http(_)
            | DfsError::Io(_)
            | DfsError::Storage { .. }
            | DfsError::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

impl From<rusqlite::Error> for DfsError {
    fn from(err: rusqlite::Error) -> Self {
        DfsError::Storage {
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for DfsError {
    fn from(err: anyhow::Error) -> Self {
        DfsError::Storage {
            message: err.to_string(),
        }
    }
}
