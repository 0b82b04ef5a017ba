// Central Error Type for the Application

use std::fmt;
use thiserror::Error;

/// Schema constraint that rejected a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    NotNull,
    Unique,
    PrimaryKey,
    ForeignKey,
    Check,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKind::NotNull => write!(f, "NOT NULL"),
            ConstraintKind::Unique => write!(f, "UNIQUE"),
            ConstraintKind::PrimaryKey => write!(f, "PRIMARY KEY"),
            ConstraintKind::ForeignKey => write!(f, "FOREIGN KEY"),
            ConstraintKind::Check => write!(f, "CHECK"),
        }
    }
}

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] crate::domain::DomainError),

    #[error("{kind} constraint violation: {message}")]
    ConstraintViolation {
        kind: ConstraintKind,
        message: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{entity} {id} is still referenced by {dependent}")]
    ReferentialIntegrity {
        entity: String,
        id: String,
        dependent: String,
    },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Constraint kind, when the engine rejected the write
    pub fn constraint_kind(&self) -> Option<ConstraintKind> {
        match self {
            AppError::ConstraintViolation { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
