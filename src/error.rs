//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The amount for a new purchase was missing, zero or negative.
    #[error("invalid purchase amount")]
    InvalidPurchaseAmount,

    /// The amount used to edit a purchase was missing, zero or negative.
    #[error("invalid amount")]
    InvalidAmount,

    /// A purchase was made for a phone number with no customer record and
    /// the request did not include a name to register the customer with.
    #[error("a name is required to register a new customer")]
    MissingCustomerName,

    /// No customer is registered under the requested phone number.
    #[error("the customer could not be found")]
    CustomerNotFound,

    /// No purchase exists with the requested ID.
    #[error("the purchase could not be found")]
    PurchaseNotFound,

    /// A dataset file contained a row that could not be parsed.
    ///
    /// The whole read is aborted when this happens, there is no best-effort
    /// parsing of the remaining rows.
    #[error("could not parse the CSV dataset: {0}")]
    InvalidCsv(String),

    /// The purchase dataset already holds the largest possible ID, so no
    /// new purchase can be given a unique one.
    #[error("no purchase IDs are left to assign")]
    PurchaseIdsExhausted,

    /// Reading or writing a dataset file failed.
    #[error("an I/O error occurred: {0}")]
    IoError(String),

    /// Could not acquire the record store lock.
    #[error("could not acquire the record store lock")]
    StoreLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        if value.is_io_error() {
            Error::IoError(value.to_string())
        } else {
            Error::InvalidCsv(value.to_string())
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::IoError(value.to_string())
    }
}

/// The JSON body sent to the client when a request fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMessage {
    /// A short, human readable description of what went wrong.
    pub message: String,
}

impl ErrorMessage {
    /// Create a message body from a string slice.
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, message) = match self {
            Error::InvalidPurchaseAmount => {
                (StatusCode::BAD_REQUEST, "Invalid purchase amount.")
            }
            Error::InvalidAmount => (StatusCode::BAD_REQUEST, "Invalid amount."),
            Error::MissingCustomerName => {
                (StatusCode::BAD_REQUEST, "Name required for new customer.")
            }
            Error::CustomerNotFound => (StatusCode::NOT_FOUND, "Customer not found."),
            Error::PurchaseNotFound => (StatusCode::NOT_FOUND, "Purchase not found."),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.",
                )
            }
        };

        (status_code, Json(ErrorMessage::new(message))).into_response()
    }
}
