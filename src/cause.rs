//! The captured failure payload of a failed [`Attempt`](crate::Attempt).
//!
//! A [`Cause`] is a cheap, shared handle around any
//! `std::error::Error + Send + Sync + 'static`. Cloning a cause never copies
//! the underlying error, so a cause that travels through several combinators
//! stays reference-equal to the one that was originally captured.
//!
//! # Examples
//!
//! ```
//! use attempt::Cause;
//!
//! let parse = "x1".parse::<i32>().unwrap_err();
//! let cause = Cause::new(parse);
//!
//! assert!(cause.is::<std::num::ParseIntError>());
//! assert_eq!(cause.to_string(), "invalid digit found in string");
//! ```

use std::any::TypeId;
use std::error::Error as StdError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// A shared, immutable failure cause.
///
/// `Cause` deliberately does not implement [`std::error::Error`] itself, so
/// that every error type can be converted into it with `?` or `.into()`.
/// It dereferences to `dyn Error + Send + Sync`, which gives access to
/// `source()` and the rest of the error API.
///
/// Two causes are equal when they are the same shared error, or when they
/// wrap the same concrete error type with the same description.
#[derive(Clone)]
pub struct Cause {
    error: Arc<dyn StdError + Send + Sync + 'static>,
    type_id: TypeId,
    type_name: &'static str,
}

impl Cause {
    /// Wrap an error into a cause.
    ///
    /// # Example
    ///
    /// ```
    /// use attempt::Cause;
    /// use std::io;
    ///
    /// let cause = Cause::new(io::Error::new(io::ErrorKind::NotFound, "missing"));
    /// assert!(cause.is::<io::Error>());
    /// ```
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Cause {
            error: Arc::new(error),
            type_id: TypeId::of::<E>(),
            type_name: std::any::type_name::<E>(),
        }
    }

    /// Create a cause from a plain message.
    ///
    /// # Example
    ///
    /// ```
    /// use attempt::Cause;
    ///
    /// let cause = Cause::msg("connection reset");
    /// assert_eq!(cause.to_string(), "connection reset");
    /// assert_eq!(cause, Cause::msg("connection reset"));
    /// ```
    pub fn msg(message: impl Into<String>) -> Self {
        Cause::new(Message(message.into()))
    }

    /// Returns `true` if the wrapped error is of type `E`.
    pub fn is<E>(&self) -> bool
    where
        E: StdError + 'static,
    {
        self.type_id == TypeId::of::<E>()
    }

    /// Returns a reference to the wrapped error if it is of type `E`.
    ///
    /// # Example
    ///
    /// ```
    /// use attempt::Cause;
    /// use std::num::ParseIntError;
    ///
    /// let cause = Cause::new("nope".parse::<u8>().unwrap_err());
    /// assert!(cause.downcast_ref::<ParseIntError>().is_some());
    /// assert!(cause.downcast_ref::<std::io::Error>().is_none());
    /// ```
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.error.downcast_ref::<E>()
    }

    /// The type name of the wrapped error, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if this cause must never be captured.
    ///
    /// See [`crate::fatal`] for the classification.
    pub fn is_fatal(&self) -> bool {
        crate::fatal::is_fatal(self)
    }

    /// Returns `true` if both causes share the same underlying error.
    pub fn ptr_eq(&self, other: &Cause) -> bool {
        Arc::ptr_eq(&self.error, &other.error)
    }

    /// Borrow the wrapped error.
    pub fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.error
    }
}

impl Deref for Cause {
    type Target = dyn StdError + Send + Sync + 'static;

    fn deref(&self) -> &Self::Target {
        &*self.error
    }
}

impl<E> From<E> for Cause
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Cause::new(error)
    }
}

impl PartialEq for Cause {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.type_id == other.type_id && self.error.to_string() == other.error.to_string())
    }
}

impl Eq for Cause {}

impl Hash for Cause {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
        self.error.to_string().hash(state);
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.error, f)
    }
}

impl fmt::Debug for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.error, f)
    }
}

impl From<Cause> for Box<dyn StdError + Send + Sync + 'static> {
    fn from(cause: Cause) -> Self {
        Box::new(Shared(cause))
    }
}

impl From<Cause> for Box<dyn StdError + 'static> {
    fn from(cause: Cause) -> Self {
        Box::new(Shared(cause))
    }
}

/// A plain message used by [`Cause::msg`].
#[derive(Clone, PartialEq, Eq)]
struct Message(String);

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for Message {}

/// Adapter that lets a cause leave the crate as a boxed error.
struct Shared(Cause);

impl fmt::Debug for Shared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for Shared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for Shared {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.as_error().source()
    }
}
