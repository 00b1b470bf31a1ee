//! Railway-style result used by every public lifecycle operation.
//!
//! Expected failure modes (validation, state conflicts, unknown ids) travel as
//! data in [`Outcome::Failure`]. Panics are reserved for contract violations
//! such as [`Outcome::into_value`] on a failure.

use std::fmt;

/// Broad category of a [`Failure`], used by adapters to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A field or business rule was violated.
    Validation,
    /// The requested transition conflicts with the current state or revision.
    Conflict,
    /// No application with the given id exists.
    NotFound,
    /// The registry refused to grow past its configured limit.
    Capacity,
    /// Anything unexpected caught at the handler boundary.
    Internal,
}

impl FailureKind {
    /// Stable snake_case code, e.g. `"not_found"`.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            FailureKind::Validation => "validation",
            FailureKind::Conflict => "conflict",
            FailureKind::NotFound => "not_found",
            FailureKind::Capacity => "capacity",
            FailureKind::Internal => "internal",
        }
    }
}

/// Why an operation was refused. Displays as the bare message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    #[must_use]
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Internal, message)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Failure {}

/// Either a success value or a [`Failure`]; never both.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    Success(T),
    Failure(Failure),
}

impl<T> Outcome<T> {
    pub fn ok(value: T) -> Self {
        Outcome::Success(value)
    }

    pub fn fail(kind: FailureKind, message: impl Into<String>) -> Self {
        Outcome::Failure(Failure::new(kind, message))
    }

    /// Wrap any error that knows how to describe itself as a [`Failure`].
    pub fn from_error(err: impl Into<Failure>) -> Self {
        Outcome::Failure(err.into())
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Transform the success value; failures pass through untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(failure) => Outcome::Failure(failure),
        }
    }

    /// Chain an operation that may itself fail, flattening one level.
    pub fn flat_map<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Outcome::Success(value) => f(value),
            Outcome::Failure(failure) => Outcome::Failure(failure),
        }
    }

    /// Alias of [`Outcome::flat_map`] matching `Result::and_then`.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        self.flat_map(f)
    }

    /// Rewrite the failure; successes pass through untouched.
    pub fn map_failure(self, f: impl FnOnce(Failure) -> Failure) -> Self {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(failure) => Outcome::Failure(f(failure)),
        }
    }

    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(failure) => Some(failure),
        }
    }

    /// The failure message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.failure().map(|f| f.message.as_str())
    }

    /// Take the success value.
    ///
    /// # Panics
    ///
    /// Panics when called on a failure. Check [`Outcome::is_success`] first or
    /// use [`Outcome::into_result`].
    pub fn into_value(self) -> T {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(failure) => {
                panic!("called Outcome::into_value() on a Failure: {failure}")
            }
        }
    }

    /// Convert into a std `Result` so callers can use `?`.
    ///
    /// # Errors
    ///
    /// Returns the carried [`Failure`] when this is not a success.
    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(failure) => Err(failure),
        }
    }
}

impl<T, E: Into<Failure>> From<Result<T, E>> for Outcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(err) => Outcome::Failure(err.into()),
        }
    }
}
