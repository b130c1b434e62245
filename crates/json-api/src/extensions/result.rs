//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::{debug, error};

/// Map any error to an HTTP error.
pub(crate) trait ResultExt<T> {
    /// Reject as a client error, surfacing `brief` to the caller.
    fn or_400(self, brief: &str) -> Result<T, StatusError>;

    /// Log and hide the error behind an internal server error.
    fn or_500(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_400(self, brief: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            debug!("{brief}: {error}");

            StatusError::bad_request().brief(brief)
        })
    }

    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            StatusError::internal_server_error()
        })
    }
}
