//! A computation that either succeeded with a value or failed with a cause.
//!
//! # Attempt vs Result
//!
//! `Attempt<T>` is close to `Result<T, Cause>`, with two differences that
//! make it useful at the boundary with code you do not control:
//!
//! - Every combinator runs its closure inside a panic boundary. A closure that
//!   panics produces `Failed` instead of unwinding through your code.
//! - Fatal causes (see [`crate::fatal`]) are never captured. They keep
//!   unwinding no matter which combinator they pass through.
//!
//! Use `Result` and `?` inside your own functions; reach for `Attempt` when
//! you want failures captured, recovered from, or matched on as values.
//!
//! # Examples
//!
//! ```rust
//! use attempt::Attempt;
//! use std::num::ParseIntError;
//!
//! let port = Attempt::from_fn(|| "80a".parse::<u16>())
//!     .recover_on(|_: &ParseIntError| 8080)
//!     .filter(|port| *port >= 1024);
//!
//! assert_eq!(port, Attempt::succeed(8080));
//! ```

use std::error::Error as StdError;
use std::fmt;

use crate::cause::Cause;
use crate::error::{NoSuchElement, UnmatchedPattern, UnsupportedOperation};
use crate::fatal;
use crate::matcher::Matcher;

/// The outcome of a computation: `Succeeded(T)` or `Failed(Cause)`.
///
/// A `Failed` never holds a fatal cause. Every constructor and combinator
/// that would build one raises the cause instead.
///
/// # Example
///
/// ```rust
/// use attempt::Attempt;
///
/// let ok: Attempt<i32> = Attempt::succeed(42);
/// let err: Attempt<i32> = Attempt::fail(attempt::Cause::msg("no answer"));
///
/// match ok {
///     Attempt::Succeeded(n) => assert_eq!(n, 42),
///     Attempt::Failed(cause) => panic!("unexpected: {}", cause),
/// }
/// assert_eq!(err.get_or_else(0), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Attempt<T> {
    /// The computation produced a value.
    Succeeded(T),
    /// The computation failed.
    Failed(Cause),
}

impl<T> Attempt<T> {
    // ========== Constructors ==========

    /// Create a successful attempt.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::Attempt;
    ///
    /// assert!(Attempt::succeed("done").is_succeeded());
    /// ```
    #[inline]
    pub fn succeed(value: T) -> Self {
        Attempt::Succeeded(value)
    }

    /// Create a failed attempt.
    ///
    /// If the cause is fatal it is raised right away and no attempt is
    /// produced.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::{Attempt, Cause};
    ///
    /// let failed = Attempt::<u8>::fail(Cause::msg("bad byte"));
    /// assert!(failed.is_failed());
    /// ```
    pub fn fail(cause: impl Into<Cause>) -> Self {
        Attempt::Failed(fatal::screen(cause.into()))
    }

    /// Run a fallible supplier and capture its outcome.
    ///
    /// `Ok` becomes `Succeeded`. `Err` and non-fatal panics become `Failed`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::Attempt;
    ///
    /// let parsed = Attempt::from_fn(|| "17".parse::<i32>());
    /// assert_eq!(parsed, Attempt::succeed(17));
    ///
    /// let broken = Attempt::from_fn(|| "seventeen".parse::<i32>());
    /// assert!(broken.is_failed());
    /// ```
    pub fn from_fn<F, E>(supplier: F) -> Self
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<Cause>,
    {
        Self::settle(fatal::capture(supplier).and_then(|result| result.map_err(Into::into)))
    }

    /// Run a supplier that can only fail by panicking.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::Attempt;
    ///
    /// let items: Vec<i32> = Vec::new();
    /// let first = Attempt::catching(|| items[0]);
    /// assert!(first.is_failed());
    /// ```
    pub fn catching<F>(supplier: F) -> Self
    where
        F: FnOnce() -> T,
    {
        Self::settle(fatal::capture(supplier))
    }

    /// Convert a `Result` into an attempt.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::Attempt;
    ///
    /// let attempt = Attempt::from_result("9".parse::<u8>());
    /// assert_eq!(attempt.get().unwrap(), 9);
    /// ```
    pub fn from_result<E>(result: Result<T, E>) -> Self
    where
        E: Into<Cause>,
    {
        match result {
            Ok(value) => Attempt::Succeeded(value),
            Err(error) => Attempt::fail(error),
        }
    }

    pub(crate) fn settle(outcome: Result<T, Cause>) -> Self {
        match outcome {
            Ok(value) => Attempt::Succeeded(value),
            Err(cause) => Attempt::fail(cause),
        }
    }

    // ========== Predicates ==========

    /// Returns `true` if this is `Succeeded`.
    #[inline]
    pub fn is_succeeded(&self) -> bool {
        matches!(self, Attempt::Succeeded(_))
    }

    /// Returns `true` if this is `Failed`.
    #[inline]
    pub fn is_failed(&self) -> bool {
        matches!(self, Attempt::Failed(_))
    }

    /// Returns `true` if this failed with a cause of type `E`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::Attempt;
    /// use std::num::ParseIntError;
    ///
    /// let failed = Attempt::from_fn(|| "x".parse::<i32>());
    /// assert!(failed.is_failed_with::<ParseIntError>());
    /// assert!(!failed.is_failed_with::<std::io::Error>());
    /// ```
    pub fn is_failed_with<E>(&self) -> bool
    where
        E: StdError + 'static,
    {
        match self {
            Attempt::Succeeded(_) => false,
            Attempt::Failed(cause) => cause.is::<E>(),
        }
    }

    // ========== Extractors ==========

    /// Return the value, or the cause as an error.
    ///
    /// This is the accessor that re-raises a failure: use `?` on it to
    /// propagate the cause.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::{Attempt, Cause};
    ///
    /// fn doubled(input: &str) -> Result<i32, Cause> {
    ///     let n = Attempt::from_fn(|| input.parse::<i32>()).get()?;
    ///     Ok(n * 2)
    /// }
    ///
    /// assert_eq!(doubled("21").unwrap(), 42);
    /// assert!(doubled("twenty-one").is_err());
    /// ```
    pub fn get(self) -> Result<T, Cause> {
        match self {
            Attempt::Succeeded(value) => Ok(value),
            Attempt::Failed(cause) => Err(cause),
        }
    }

    /// Same as [`get`](Self::get), named for symmetry with `From<Result>`.
    #[inline]
    pub fn into_result(self) -> Result<T, Cause> {
        self.get()
    }

    /// Borrow the cause of a failure.
    pub fn cause(&self) -> Option<&Cause> {
        match self {
            Attempt::Succeeded(_) => None,
            Attempt::Failed(cause) => Some(cause),
        }
    }

    /// Return the value, or `default` on failure.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::{Attempt, Cause};
    ///
    /// assert_eq!(Attempt::succeed(1).get_or_else(0), 1);
    /// assert_eq!(Attempt::<i32>::fail(Cause::msg("x")).get_or_else(0), 0);
    /// ```
    pub fn get_or_else(self, default: T) -> T {
        match self {
            Attempt::Succeeded(value) => value,
            Attempt::Failed(_) => default,
        }
    }

    /// Return `self` if it succeeded, otherwise `other`.
    pub fn or_else(self, other: Attempt<T>) -> Attempt<T> {
        match self {
            Attempt::Succeeded(value) => Attempt::Succeeded(value),
            Attempt::Failed(_) => other,
        }
    }

    /// The value as an `Option`, discarding any cause.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::{Attempt, Cause};
    ///
    /// assert_eq!(Attempt::succeed(5).ok(), Some(5));
    /// assert_eq!(Attempt::<i32>::fail(Cause::msg("x")).ok(), None);
    /// ```
    pub fn ok(self) -> Option<T> {
        match self {
            Attempt::Succeeded(value) => Some(value),
            Attempt::Failed(_) => None,
        }
    }

    /// Convert `&Attempt<T>` to `Attempt<&T>`.
    pub fn as_ref(&self) -> Attempt<&T> {
        match self {
            Attempt::Succeeded(value) => Attempt::Succeeded(value),
            Attempt::Failed(cause) => Attempt::Failed(cause.clone()),
        }
    }

    // ========== Transformations ==========

    /// Transform the value of a success.
    ///
    /// A panic in `f` becomes `Failed`. A failure is returned untouched and
    /// `f` is not called.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::Attempt;
    ///
    /// assert_eq!(Attempt::succeed(20).map(|n| n + 1), Attempt::succeed(21));
    ///
    /// let divided = Attempt::succeed(0).map(|n: i32| 10 / n);
    /// assert!(divided.is_failed());
    /// ```
    pub fn map<R, F>(self, f: F) -> Attempt<R>
    where
        F: FnOnce(T) -> R,
    {
        match self {
            Attempt::Succeeded(value) => Attempt::settle(fatal::capture(move || f(value))),
            Attempt::Failed(cause) => Attempt::Failed(cause),
        }
    }

    /// Transform the value of a success with a fallible function.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::Attempt;
    ///
    /// let port = Attempt::succeed("8080").try_map(|s| s.parse::<u16>());
    /// assert_eq!(port, Attempt::succeed(8080));
    /// ```
    pub fn try_map<R, E, F>(self, f: F) -> Attempt<R>
    where
        F: FnOnce(T) -> Result<R, E>,
        E: Into<Cause>,
    {
        match self {
            Attempt::Succeeded(value) => Attempt::from_fn(move || f(value)),
            Attempt::Failed(cause) => Attempt::Failed(cause),
        }
    }

    /// Chain a computation that itself produces an attempt.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::Attempt;
    ///
    /// fn parse(s: &str) -> Attempt<i32> {
    ///     Attempt::from_fn(|| s.parse::<i32>())
    /// }
    ///
    /// assert_eq!(Attempt::succeed("7").flat_map(parse), Attempt::succeed(7));
    /// assert!(Attempt::succeed("seven").flat_map(parse).is_failed());
    /// ```
    pub fn flat_map<R, F>(self, f: F) -> Attempt<R>
    where
        F: FnOnce(T) -> Attempt<R>,
    {
        match self {
            Attempt::Succeeded(value) => match fatal::capture(move || f(value)) {
                Ok(next) => next,
                Err(cause) => Attempt::fail(cause),
            },
            Attempt::Failed(cause) => Attempt::Failed(cause),
        }
    }

    /// Combine the values of two successes.
    ///
    /// If `self` failed, `other` is ignored. If `other` failed, its cause is
    /// returned. `f` only runs when both succeeded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::{Attempt, Cause};
    ///
    /// let sum = Attempt::succeed(2).combine_map(Attempt::succeed(3), |a, b| a + b);
    /// assert_eq!(sum, Attempt::succeed(5));
    ///
    /// let missing = Attempt::succeed(2)
    ///     .combine_map(Attempt::<i32>::fail(Cause::msg("no rhs")), |a, b| a + b);
    /// assert_eq!(missing, Attempt::fail(Cause::msg("no rhs")));
    /// ```
    pub fn combine_map<U, R, F>(self, other: Attempt<U>, f: F) -> Attempt<R>
    where
        F: FnOnce(T, U) -> R,
    {
        match self {
            Attempt::Succeeded(value) => other.map(move |other_value| f(value, other_value)),
            Attempt::Failed(cause) => Attempt::Failed(cause),
        }
    }

    /// Combine two successes with a function that produces an attempt.
    pub fn combine_flat_map<U, R, F>(self, other: Attempt<U>, f: F) -> Attempt<R>
    where
        F: FnOnce(T, U) -> Attempt<R>,
    {
        match self {
            Attempt::Succeeded(value) => other.flat_map(move |other_value| f(value, other_value)),
            Attempt::Failed(cause) => Attempt::Failed(cause),
        }
    }

    /// Keep a success only if its value satisfies `predicate`.
    ///
    /// A rejected value becomes `Failed` with [`NoSuchElement`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::{Attempt, NoSuchElement};
    ///
    /// assert!(Attempt::succeed(4).filter(|n| n % 2 == 0).is_succeeded());
    /// assert!(Attempt::succeed(5)
    ///     .filter(|n| n % 2 == 0)
    ///     .is_failed_with::<NoSuchElement>());
    /// ```
    pub fn filter<P>(self, predicate: P) -> Attempt<T>
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Attempt::Succeeded(value) => match fatal::capture(|| predicate(&value)) {
                Ok(true) => Attempt::Succeeded(value),
                Ok(false) => Attempt::fail(NoSuchElement),
                Err(cause) => Attempt::fail(cause),
            },
            Attempt::Failed(cause) => Attempt::Failed(cause),
        }
    }

    // ========== Recovery ==========

    /// Turn any failure into a value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::{Attempt, Cause};
    ///
    /// let recovered = Attempt::<String>::fail(Cause::msg("offline"))
    ///     .recover(|cause| format!("cached ({})", cause));
    /// assert_eq!(recovered, Attempt::succeed("cached (offline)".to_string()));
    /// ```
    pub fn recover<F>(self, f: F) -> Attempt<T>
    where
        F: FnOnce(Cause) -> T,
    {
        match self {
            Attempt::Succeeded(value) => Attempt::Succeeded(value),
            Attempt::Failed(cause) => {
                let cause = fatal::screen(cause);
                Attempt::settle(fatal::capture(move || f(cause)))
            }
        }
    }

    /// Turn any failure into the outcome of a fallible function.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::{Attempt, Cause};
    ///
    /// let retried = Attempt::<i32>::fail(Cause::msg("empty"))
    ///     .try_recover(|_| "12".parse::<i32>());
    /// assert_eq!(retried, Attempt::succeed(12));
    ///
    /// let still_broken = Attempt::<i32>::fail(Cause::msg("empty"))
    ///     .try_recover(|_| "twelve".parse::<i32>());
    /// assert!(still_broken.is_failed_with::<std::num::ParseIntError>());
    /// ```
    pub fn try_recover<E, F>(self, f: F) -> Attempt<T>
    where
        F: FnOnce(Cause) -> Result<T, E>,
        E: Into<Cause>,
    {
        match self {
            Attempt::Succeeded(value) => Attempt::Succeeded(value),
            Attempt::Failed(cause) => {
                let cause = fatal::screen(cause);
                Attempt::from_fn(move || f(cause))
            }
        }
    }

    /// Turn a failure whose cause is of type `E` into a value.
    ///
    /// Failures with other causes are returned untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::{Attempt, Cause};
    /// use std::num::ParseIntError;
    ///
    /// let parsed = Attempt::from_fn(|| "?".parse::<i32>()).recover_on(|_: &ParseIntError| -1);
    /// assert_eq!(parsed, Attempt::succeed(-1));
    ///
    /// let other = Attempt::<i32>::fail(Cause::msg("io"))
    ///     .recover_on(|_: &ParseIntError| -1);
    /// assert!(other.is_failed());
    /// ```
    pub fn recover_on<E, F>(self, f: F) -> Attempt<T>
    where
        E: StdError + 'static,
        F: FnOnce(&E) -> T,
    {
        match self {
            Attempt::Succeeded(value) => Attempt::Succeeded(value),
            Attempt::Failed(cause) => {
                let cause = fatal::screen(cause);
                let recovered = cause
                    .downcast_ref::<E>()
                    .map(|error| fatal::capture(|| f(error)));
                match recovered {
                    Some(outcome) => Attempt::settle(outcome),
                    None => Attempt::Failed(cause),
                }
            }
        }
    }

    /// Like [`recover_on`](Attempt::recover_on), with a fallible handler.
    pub fn try_recover_on<E, X, F>(self, f: F) -> Attempt<T>
    where
        E: StdError + 'static,
        X: Into<Cause>,
        F: FnOnce(&E) -> Result<T, X>,
    {
        match self {
            Attempt::Succeeded(value) => Attempt::Succeeded(value),
            Attempt::Failed(cause) => {
                let cause = fatal::screen(cause);
                let recovered = cause
                    .downcast_ref::<E>()
                    .map(|error| fatal::capture(|| f(error)));
                match recovered {
                    Some(Ok(outcome)) => Attempt::from_result(outcome),
                    Some(Err(panicked)) => Attempt::fail(panicked),
                    None => Attempt::Failed(cause),
                }
            }
        }
    }

    /// Replace any failure with the attempt returned by `f`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::{Attempt, Cause};
    ///
    /// let fallback = Attempt::<i32>::fail(Cause::msg("primary down"))
    ///     .recover_with(|_| Attempt::succeed(7));
    /// assert_eq!(fallback, Attempt::succeed(7));
    /// ```
    pub fn recover_with<F>(self, f: F) -> Attempt<T>
    where
        F: FnOnce(Cause) -> Attempt<T>,
    {
        match self {
            Attempt::Succeeded(value) => Attempt::Succeeded(value),
            Attempt::Failed(cause) => {
                let cause = fatal::screen(cause);
                match fatal::capture(move || f(cause)) {
                    Ok(next) => next,
                    Err(cause) => Attempt::fail(cause),
                }
            }
        }
    }

    /// Replace a failure whose cause is of type `E` with the attempt
    /// returned by `f`.
    pub fn recover_with_on<E, F>(self, f: F) -> Attempt<T>
    where
        E: StdError + 'static,
        F: FnOnce(&E) -> Attempt<T>,
    {
        match self {
            Attempt::Succeeded(value) => Attempt::Succeeded(value),
            Attempt::Failed(cause) => {
                let cause = fatal::screen(cause);
                let recovered = cause
                    .downcast_ref::<E>()
                    .map(|error| fatal::capture(|| f(error)));
                match recovered {
                    Some(Ok(next)) => next,
                    Some(Err(panicked)) => Attempt::fail(panicked),
                    None => Attempt::Failed(cause),
                }
            }
        }
    }

    /// Apply `on_success` or `on_failure`, whichever matches.
    ///
    /// Either branch runs inside a panic boundary, so a panicking branch
    /// produces `Failed` rather than unwinding.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::{Attempt, Cause};
    ///
    /// let describe = |attempt: Attempt<i32>| {
    ///     attempt.fold(|cause| format!("error: {}", cause), |n| format!("value: {}", n))
    /// };
    ///
    /// assert_eq!(describe(Attempt::succeed(3)), Attempt::succeed("value: 3".to_string()));
    /// assert_eq!(
    ///     describe(Attempt::fail(Cause::msg("nope"))),
    ///     Attempt::succeed("error: nope".to_string())
    /// );
    /// ```
    pub fn fold<R, FF, FS>(self, on_failure: FF, on_success: FS) -> Attempt<R>
    where
        FF: FnOnce(Cause) -> R,
        FS: FnOnce(T) -> R,
    {
        match self {
            Attempt::Succeeded(value) => Attempt::settle(fatal::capture(move || on_success(value))),
            Attempt::Failed(cause) => {
                let cause = fatal::screen(cause);
                Attempt::settle(fatal::capture(move || on_failure(cause)))
            }
        }
    }

    /// Like [`fold`](Attempt::fold), with fallible branches.
    ///
    /// An `Err` from either branch produces `Failed`.
    pub fn try_fold<R, E, FF, FS>(self, on_failure: FF, on_success: FS) -> Attempt<R>
    where
        E: Into<Cause>,
        FF: FnOnce(Cause) -> Result<R, E>,
        FS: FnOnce(T) -> Result<R, E>,
    {
        match self {
            Attempt::Succeeded(value) => Attempt::from_fn(move || on_success(value)),
            Attempt::Failed(cause) => {
                let cause = fatal::screen(cause);
                Attempt::from_fn(move || on_failure(cause))
            }
        }
    }

    /// Invert the attempt: a failure becomes a success holding its cause.
    ///
    /// A success cannot be inverted and becomes `Failed` with
    /// [`UnsupportedOperation`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::{Attempt, Cause, UnsupportedOperation};
    ///
    /// let cause = Cause::msg("lost");
    /// assert_eq!(Attempt::<()>::fail(cause.clone()).failed(), Attempt::succeed(cause));
    /// assert!(Attempt::succeed(1).failed().is_failed_with::<UnsupportedOperation>());
    /// ```
    pub fn failed(self) -> Attempt<Cause> {
        match self {
            Attempt::Succeeded(_) => Attempt::fail(UnsupportedOperation),
            Attempt::Failed(cause) => Attempt::Succeeded(fatal::screen(cause)),
        }
    }

    // ========== Observers ==========

    /// Call `f` with the value of a success.
    pub fn if_succeeded<F>(&self, f: F)
    where
        F: FnOnce(&T),
    {
        if let Attempt::Succeeded(value) = self {
            f(value);
        }
    }

    /// Call `f` with the cause of a failure.
    pub fn if_failed<F>(&self, f: F)
    where
        F: FnOnce(&Cause),
    {
        if let Attempt::Failed(cause) = self {
            fatal::screen(cause.clone());
            f(cause);
        }
    }

    /// Call `f` with the cause of a failure if it is of type `E`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::Attempt;
    /// use std::num::ParseIntError;
    ///
    /// let mut seen = None;
    /// Attempt::from_fn(|| "z".parse::<i32>())
    ///     .if_failed_with(|error: &ParseIntError| seen = Some(error.to_string()));
    /// assert_eq!(seen.as_deref(), Some("invalid digit found in string"));
    /// ```
    pub fn if_failed_with<E, F>(&self, f: F)
    where
        E: StdError + 'static,
        F: FnOnce(&E),
    {
        if let Some(cause) = self.cause() {
            fatal::screen(cause.clone());
            if let Some(error) = cause.downcast_ref::<E>() {
                f(error);
            }
        }
    }

    // ========== Pattern matching ==========

    /// Decide the outcome with ordered, guarded branches.
    ///
    /// `build` registers branches on a [`Matcher`]. The first branch whose
    /// guard holds settles the result; later branches are skipped. If nothing
    /// settles, the subject is returned inside [`UnmatchedPattern`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::Attempt;
    /// use std::num::ParseIntError;
    ///
    /// let label = Attempt::from_fn(|| "-4".parse::<i32>())
    ///     .matching(|m| {
    ///         m.on_success_when(|n| *n < 0, |_| "negative")
    ///             .on_success(|_| "non-negative")
    ///             .on_failure_of(|_: &ParseIntError| "not a number");
    ///     })
    ///     .unwrap();
    ///
    /// assert_eq!(label, Attempt::succeed("negative"));
    /// ```
    pub fn matching<R, F>(self, build: F) -> Result<Attempt<R>, UnmatchedPattern<T>>
    where
        F: FnOnce(&mut Matcher<T, R>),
    {
        let mut matcher = Matcher::new(self);
        build(&mut matcher);
        matcher.finish()
    }
}

impl<T, E> From<Result<T, E>> for Attempt<T>
where
    E: Into<Cause>,
{
    fn from(result: Result<T, E>) -> Self {
        Attempt::from_result(result)
    }
}

impl<T: fmt::Display> fmt::Display for Attempt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attempt::Succeeded(value) => write!(f, "Succeeded[{}]", value),
            Attempt::Failed(cause) => write!(f, "Failed[{}]", cause),
        }
    }
}
