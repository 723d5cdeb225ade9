//! Unified error type for the booking core.
//!
//! Every fallible operation in the crate returns [`Result`]. Storage failures raised
//! while the availability resolver gathers its inputs are folded into a single
//! [`Error::DataFetch`] so callers never mistake a failed read for an empty calendar.

use chrono::NaiveDate;
use thiserror::Error;

/// All errors produced by `chair-time`.
#[derive(Debug, Error)]
pub enum Error {
    /// Raw database failure from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A read backing an availability query failed; the whole query is aborted
    #[error("Failed to fetch {query}: {message}")]
    DataFetch {
        /// Which input could not be loaded (e.g. `"weekly availability"`)
        query: &'static str,
        /// Underlying failure description
        message: String,
    },

    /// A day is marked available but has no usable working window
    #[error("Schedule for barber {barber_id} on {date} is available but has no start/end time")]
    MalformedSchedule {
        /// Barber whose schedule is malformed
        barber_id: i64,
        /// Affected calendar date
        date: NaiveDate,
    },

    /// Caller supplied values that fail validation
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Human-readable reason
        message: String,
    },

    /// Configuration file or environment problem
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable reason
        message: String,
    },

    #[error("Barber not found: {id}")]
    BarberNotFound {
        /// Missing barber id
        id: i64,
    },

    #[error("Service not found: {id}")]
    ServiceNotFound {
        /// Missing service id
        id: i64,
    },

    #[error("Appointment not found: {id}")]
    AppointmentNotFound {
        /// Missing appointment id
        id: i64,
    },

    /// Status text outside `pending|confirmed|completed|cancelled`
    #[error("Unknown appointment status: {status}")]
    InvalidStatus {
        /// The rejected value
        status: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Folds a failure raised while loading resolver inputs into [`Error::DataFetch`].
    /// An error that already is a `DataFetch` is passed through unchanged.
    #[must_use]
    pub fn into_data_fetch(self, query: &'static str) -> Self {
        match self {
            fetch @ Self::DataFetch { .. } => fetch,
            other => Self::DataFetch {
                query,
                message: other.to_string(),
            },
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
