//! Uniform success/failure value returned by every service and handler operation.
//!
//! An [`Outcome`] either carries a value (status 200) or a human-readable error
//! message plus an HTTP-style status code. Outcomes are plain data: once a
//! failure has been classified it flows to the HTTP boundary as a return value,
//! never as an error that has to be caught.

use core::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Status code attached to every successful outcome.
pub const SUCCESS_STATUS: u16 = 200;

/// Status code used by [`Outcome::failure`] when the caller supplies none.
pub const DEFAULT_FAILURE_STATUS: u16 = 400;

/// Resource name used by [`Outcome::not_found_resource`].
pub const DEFAULT_RESOURCE_NAME: &str = "Resource";

/// Message recorded for a failure constructed with an empty one.
pub const DEFAULT_FAILURE_MESSAGE: &str = "The operation failed";

/// Fixed message surfaced for failures nobody classified.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Success-with-value or failure-with-message-and-status.
///
/// Fields are private: an outcome cannot change after construction. Use the
/// named constructors to build one and the accessors to inspect it.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<V> {
    inner: Inner<V>,
}

#[derive(Debug, Clone, PartialEq)]
enum Inner<V> {
    Success { value: V },
    Failure { message: String, status_code: u16 },
}

impl<V> Outcome<V> {
    /// Successful outcome holding `value` (status 200).
    pub fn success(value: V) -> Self {
        Self {
            inner: Inner::Success { value },
        }
    }

    /// Failed outcome with the default status (400).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::failure_with_status(message, DEFAULT_FAILURE_STATUS)
    }

    /// Failed outcome with a caller-chosen status.
    ///
    /// Codes outside `100..=599` are not valid HTTP statuses and are recorded
    /// as 500. An empty message is replaced by [`DEFAULT_FAILURE_MESSAGE`], so
    /// only successes report an empty error message.
    pub fn failure_with_status(message: impl Into<String>, status_code: u16) -> Self {
        let status_code = if (100..=599).contains(&status_code) {
            status_code
        } else {
            500
        };
        let mut message = message.into();
        if message.is_empty() {
            message = DEFAULT_FAILURE_MESSAGE.to_string();
        }
        Self {
            inner: Inner::Failure {
                message,
                status_code,
            },
        }
    }

    /// `"{resource_name} not found"` with status 404.
    pub fn not_found(resource_name: impl fmt::Display) -> Self {
        Self::failure_with_status(format!("{resource_name} not found"), 404)
    }

    /// [`Outcome::not_found`] for the generic resource name.
    pub fn not_found_resource() -> Self {
        Self::not_found(DEFAULT_RESOURCE_NAME)
    }

    pub fn unauthorized() -> Self {
        Self::unauthorized_with("Unauthorized")
    }

    pub fn unauthorized_with(message: impl Into<String>) -> Self {
        Self::failure_with_status(message, 401)
    }

    pub fn forbidden() -> Self {
        Self::forbidden_with("Forbidden")
    }

    pub fn forbidden_with(message: impl Into<String>) -> Self {
        Self::failure_with_status(message, 403)
    }

    /// The outcome handed back when an error escaped classification.
    pub fn unexpected() -> Self {
        Self::failure_with_status(UNEXPECTED_ERROR_MESSAGE, 500)
    }

    pub fn is_success(&self) -> bool {
        matches!(self.inner, Inner::Success { .. })
    }

    pub fn value(&self) -> Option<&V> {
        match &self.inner {
            Inner::Success { value } => Some(value),
            Inner::Failure { .. } => None,
        }
    }

    pub fn into_value(self) -> Option<V> {
        match self.inner {
            Inner::Success { value } => Some(value),
            Inner::Failure { .. } => None,
        }
    }

    /// Empty on success.
    pub fn error_message(&self) -> &str {
        match &self.inner {
            Inner::Success { .. } => "",
            Inner::Failure { message, .. } => message,
        }
    }

    pub fn status_code(&self) -> u16 {
        match &self.inner {
            Inner::Success { .. } => SUCCESS_STATUS,
            Inner::Failure { status_code, .. } => *status_code,
        }
    }

    /// Transform the success value; failures pass through untouched.
    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> Outcome<U> {
        match self.inner {
            Inner::Success { value } => Outcome::success(f(value)),
            Inner::Failure {
                message,
                status_code,
            } => Outcome {
                inner: Inner::Failure {
                    message,
                    status_code,
                },
            },
        }
    }
}

impl Outcome<()> {
    /// Bare success with no payload (status 200).
    pub fn completed() -> Self {
        Self::success(())
    }
}

/// Wire form: `{"isSuccess", "error", "statusCode", "value"?}`.
///
/// `value` is written only for successes whose payload is not zero-sized, so
/// `Outcome<()>` serializes without it.
impl<V: Serialize> Serialize for Outcome<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.value().filter(|_| core::mem::size_of::<V>() != 0);
        let len = if value.is_some() { 4 } else { 3 };

        let mut state = serializer.serialize_struct("Outcome", len)?;
        state.serialize_field("isSuccess", &self.is_success())?;
        state.serialize_field("error", self.error_message())?;
        state.serialize_field("statusCode", &self.status_code())?;
        match value {
            Some(v) => state.serialize_field("value", v)?,
            None => state.skip_field("value")?,
        }
        state.end()
    }
}
