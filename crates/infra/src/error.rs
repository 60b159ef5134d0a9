use thiserror::Error;

/// Failures a product backend could not classify into an `Outcome`.
///
/// These escape the service boundary on purpose; only the API's last-resort
/// handler deals with them.
#[derive(Debug, Error)]
pub enum BackendError {
    /// A writer panicked while holding the store lock.
    #[error("product store lock poisoned")]
    StorePoisoned,

    /// The HTTP client could not be constructed.
    #[error("failed to build downstream http client: {0}")]
    Client(#[source] reqwest::Error),
}
