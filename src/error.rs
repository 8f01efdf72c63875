//! Error types produced by the crate itself.
//!
//! Most causes held by a failed [`Attempt`] come from user code. The types
//! here are the few the crate synthesizes: a filter that rejected its value,
//! an inversion of a success, a captured panic, an abandoned completion, and
//! a pattern match that settled nothing.

use std::error::Error as StdError;
use std::fmt;

use crate::attempt::Attempt;

/// A [`filter`](Attempt::filter) predicate rejected the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoSuchElement;

impl fmt::Display for NoSuchElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "The value did not meet the predicate.")
    }
}

impl StdError for NoSuchElement {}

/// [`failed`](Attempt::failed) was called on a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnsupportedOperation;

impl fmt::Display for UnsupportedOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot invert Succeeded.")
    }
}

impl StdError for UnsupportedOperation {}

/// A non-fatal panic captured from a user closure.
///
/// # Example
///
/// ```
/// use attempt::{Attempt, Panicked};
///
/// let attempt = Attempt::succeed(1).map(|_: i32| -> i32 { panic!("overflow") });
/// let cause = attempt.cause().unwrap();
/// assert_eq!(cause.downcast_ref::<Panicked>().unwrap().message(), "overflow");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panicked {
    message: String,
}

impl Panicked {
    /// Create a captured panic with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Panicked {
            message: message.into(),
        }
    }

    /// The panic message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Panicked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panicked: {}", self.message)
    }
}

impl StdError for Panicked {}

/// Every [`Completion`](crate::Completion) of a forced
/// [`Deferred`](crate::Deferred) was dropped before one was completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Abandoned;

impl fmt::Display for Abandoned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "completion dropped before it was invoked")
    }
}

impl StdError for Abandoned {}

/// [`matching`](Attempt::matching) settled no branch and had no fallback.
///
/// Carries the original subject for diagnostics.
///
/// # Example
///
/// ```
/// use attempt::Attempt;
///
/// let unmatched = Attempt::succeed(3)
///     .matching(|m| {
///         m.on_success_value(4, |n| n * 10);
///     })
///     .unwrap_err();
///
/// assert_eq!(unmatched.actual(), &Attempt::succeed(3));
/// assert_eq!(unmatched.to_string(), "Failed to match value: Succeeded(3)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedPattern<T> {
    actual: Attempt<T>,
}

impl<T> UnmatchedPattern<T> {
    /// Create the error for an unmatched subject.
    pub fn new(actual: Attempt<T>) -> Self {
        UnmatchedPattern { actual }
    }

    /// The subject that nothing matched.
    pub fn actual(&self) -> &Attempt<T> {
        &self.actual
    }

    /// Consume the error and return the subject.
    pub fn into_actual(self) -> Attempt<T> {
        self.actual
    }
}

impl<T: fmt::Debug> fmt::Display for UnmatchedPattern<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to match value: {:?}", self.actual)
    }
}

impl<T: fmt::Debug> StdError for UnmatchedPattern<T> {}

/// A cause known only by its description, restored by deserialization.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribedCause {
    description: String,
}

#[cfg(feature = "serde")]
impl DescribedCause {
    /// Create a cause from a description.
    pub fn new(description: impl Into<String>) -> Self {
        DescribedCause {
            description: description.into(),
        }
    }

    /// The description of the original cause.
    pub fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(feature = "serde")]
impl fmt::Display for DescribedCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

#[cfg(feature = "serde")]
impl StdError for DescribedCause {}
