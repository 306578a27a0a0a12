use std::fmt::Display;

use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Database error: {0}")]
    Db(#[from] DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("Incomplete driver configuration: {0}")]
    Builder(#[from] fieldx::error::FieldXError),

    #[error("Failed to initialize tracing: {0}")]
    Tracing(#[from] tracing_subscriber::util::TryInitError),

    /// A lookup by identifier found nothing. The payload is the entity name, as shown to the user.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
}

impl BillingError {
    pub fn invalid_input<F: Display, R: Display>(field: F, reason: R) -> Self {
        Self::InvalidInput {
            field:  field.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T, E = BillingError> = std::result::Result<T, E>;

// Produce an `InvalidInput` error with a formatted reason.
macro_rules! invalid_input {
    ($field:expr, $($fmt:tt)+) => {
        $crate::types::BillingError::invalid_input($field, format!($($fmt)+))
    };
}

pub(crate) use invalid_input;
