pub mod contacts;
pub mod health;
pub mod projects;
pub mod users;

pub use contacts::*;
pub use health::*;
pub use projects::*;
pub use users::*;

use crate::error::Error;

/// Logs a failed handler operation at a level matching its cause.
fn log_handler_error(operation: &str, e: &Error) {
    if e.is_client_error() {
        tracing::warn!(operation = operation, error = %e, "Handler operation failed");
    } else {
        tracing::error!(operation = operation, error = %e, "Handler operation failed");
    }
}
