//! Error types for route lookups and airport list loads.
//!
//! `Display` on these errors is what the user sees. Anything more detailed lives in the variant
//! payload and only goes to the log.

use thiserror::Error;

/// Message shown in the primary result slot when the route service can't be reached.
pub const FETCH_FAILED_MESSAGE: &str = "Error fetching route. Please try again.";

/// Message shown when the route service answers with something we can't make sense of.
pub const UNEXPECTED_RESPONSE_MESSAGE: &str =
    "Unexpected response from the route service. Please try again.";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RouteError {
    #[error("Error fetching route. Please try again.")]
    Unreachable(String),
    #[error("Error fetching route. Please try again.")]
    BadStatus(u16),
    #[error("{description}")]
    Rejected { status: u16, description: String },
    #[error("Unexpected response from the route service. Please try again.")]
    UnexpectedResponse(String),
    #[error("Error fetching route. Please try again.")]
    InvalidAddress(String),
}

impl RouteError {
    /// Detail for the log, never shown to the user.
    pub fn detail(&self) -> String {
        match self {
            RouteError::Unreachable(d) => format!("route service unreachable: {}", d),
            RouteError::BadStatus(s) => format!("route service answered with status {}", s),
            RouteError::Rejected {
                status,
                description,
            } => format!("route service rejected query ({}): {}", status, description),
            RouteError::UnexpectedResponse(d) => format!("unexpected route response: {}", d),
            RouteError::InvalidAddress(d) => format!("invalid route service address: {}", d),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AirportError {
    #[error("Error fetching airport list.")]
    Unreachable(String),
    #[error("Bad response when fetching airport list.")]
    BadStatus(u16),
    #[error("Airport list is not text.")]
    NotText,
}
