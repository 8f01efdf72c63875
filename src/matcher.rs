//! Ordered, guarded pattern matching over an [`Attempt`].
//!
//! A [`Matcher`] is created by [`Attempt::matching`] and lives for the
//! duration of that call. Branches are checked in the order they are
//! registered. Each branch is a guard plus a handler: when the guard holds,
//! the handler settles the result and every later branch becomes a no-op.
//! When a guard does not hold, matching falls through to the next branch.
//!
//! # Examples
//!
//! ```rust
//! use attempt::Attempt;
//! use std::io;
//!
//! let outcome = Attempt::<u32>::fail(io::Error::new(io::ErrorKind::TimedOut, "slow"))
//!     .matching(|m| {
//!         m.on_failure_when(|cause| cause.to_string().contains("refused"), |_| 0)
//!             .on_failure_of(|error: &io::Error| error.raw_os_error().unwrap_or(1) as u32)
//!             .or_else_succeed(99);
//!     })
//!     .unwrap();
//!
//! assert_eq!(outcome, Attempt::succeed(1));
//! ```

use std::error::Error as StdError;
use std::fmt;

use crate::attempt::Attempt;
use crate::cause::Cause;
use crate::error::UnmatchedPattern;
use crate::fatal;

/// The branch accumulator handed to [`Attempt::matching`].
///
/// Handlers run inside a panic boundary, like [`Attempt::map`]. Guards do
/// not: a panicking guard unwinds out of `matching`.
pub struct Matcher<T, R> {
    subject: Option<Attempt<T>>,
    settled: Option<Attempt<R>>,
}

impl<T, R> Matcher<T, R> {
    /// A fatal subject is raised before any branch can see it.
    pub(crate) fn new(subject: Attempt<T>) -> Self {
        let subject = match subject {
            Attempt::Failed(cause) => Attempt::Failed(fatal::screen(cause)),
            succeeded => succeeded,
        };
        Matcher {
            subject: Some(subject),
            settled: None,
        }
    }

    pub(crate) fn finish(self) -> Result<Attempt<R>, UnmatchedPattern<T>> {
        match (self.settled, self.subject) {
            (Some(settled), _) => Ok(settled),
            (None, Some(subject)) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("No branch matched a {} attempt", variant_name(&subject));
                Err(UnmatchedPattern::new(subject))
            }
            // Branches only take the subject to settle it in the same call.
            (None, None) => unreachable!("matcher consumed its subject without settling"),
        }
    }

    /// Returns `true` once a branch or fallback has settled the result.
    pub fn is_settled(&self) -> bool {
        self.settled.is_some()
    }

    /// Hand out the subject if nothing settled yet and `guard` holds.
    fn take_if<G>(&mut self, guard: G) -> Option<Attempt<T>>
    where
        G: FnOnce(&Attempt<T>) -> bool,
    {
        if self.settled.is_some() {
            return None;
        }
        self.subject.take_if(|subject| guard(subject))
    }

    fn settle(&mut self, outcome: Attempt<R>) {
        if self.settled.is_none() {
            self.settled = Some(outcome);
        }
    }

    // ========== Success branches ==========

    /// Match any success.
    pub fn on_success<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(T) -> R,
    {
        if let Some(subject) = self.take_if(Attempt::is_succeeded) {
            self.settle(subject.map(f));
        }
        self
    }

    /// Match a success whose value equals `expected`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::Attempt;
    ///
    /// let word = Attempt::succeed(2)
    ///     .matching(|m| {
    ///         m.on_success_value(1, |_| "one")
    ///             .on_success_value(2, |_| "two")
    ///             .on_success(|_| "many");
    ///     })
    ///     .unwrap();
    /// assert_eq!(word, Attempt::succeed("two"));
    /// ```
    pub fn on_success_value<F>(&mut self, expected: T, f: F) -> &mut Self
    where
        T: PartialEq,
        F: FnOnce(T) -> R,
    {
        let guard = |subject: &Attempt<T>| {
            matches!(subject, Attempt::Succeeded(value) if *value == expected)
        };
        if let Some(subject) = self.take_if(guard) {
            self.settle(subject.map(f));
        }
        self
    }

    /// Match a success whose value satisfies `predicate`.
    pub fn on_success_when<P, F>(&mut self, predicate: P, f: F) -> &mut Self
    where
        P: FnOnce(&T) -> bool,
        F: FnOnce(T) -> R,
    {
        let guard = |subject: &Attempt<T>| match subject {
            Attempt::Succeeded(value) => predicate(value),
            Attempt::Failed(_) => false,
        };
        if let Some(subject) = self.take_if(guard) {
            self.settle(subject.map(f));
        }
        self
    }

    /// Match any success with a fallible handler.
    ///
    /// An `Err` from the handler settles `Failed`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::Attempt;
    /// use std::num::ParseIntError;
    ///
    /// let parsed = Attempt::succeed("x1")
    ///     .matching(|m| {
    ///         m.try_on_success(|s| s.parse::<i32>());
    ///     })
    ///     .unwrap();
    /// assert!(parsed.is_failed_with::<ParseIntError>());
    /// ```
    pub fn try_on_success<E, F>(&mut self, f: F) -> &mut Self
    where
        E: Into<Cause>,
        F: FnOnce(T) -> Result<R, E>,
    {
        if let Some(subject) = self.take_if(Attempt::is_succeeded) {
            self.settle(subject.try_map(f));
        }
        self
    }

    // ========== Failure branches ==========

    /// Match any failure.
    pub fn on_failure<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(Cause) -> R,
    {
        if let Some(Attempt::Failed(cause)) = self.take_if(Attempt::is_failed) {
            self.settle(Attempt::settle(fatal::capture(move || f(cause))));
        }
        self
    }

    /// Match a failure whose cause is of type `E`.
    pub fn on_failure_of<E, F>(&mut self, f: F) -> &mut Self
    where
        E: StdError + 'static,
        F: FnOnce(&E) -> R,
    {
        if let Some(Attempt::Failed(cause)) = self.take_if(Attempt::is_failed_with::<E>) {
            let handled = cause
                .downcast_ref::<E>()
                .map(|error| fatal::capture(|| f(error)));
            self.settle(match handled {
                Some(outcome) => Attempt::settle(outcome),
                None => Attempt::Failed(cause),
            });
        }
        self
    }

    /// Match a failure whose cause satisfies `predicate`.
    pub fn on_failure_when<P, F>(&mut self, predicate: P, f: F) -> &mut Self
    where
        P: FnOnce(&Cause) -> bool,
        F: FnOnce(Cause) -> R,
    {
        let guard = |subject: &Attempt<T>| match subject {
            Attempt::Succeeded(_) => false,
            Attempt::Failed(cause) => predicate(cause),
        };
        if let Some(Attempt::Failed(cause)) = self.take_if(guard) {
            self.settle(Attempt::settle(fatal::capture(move || f(cause))));
        }
        self
    }

    /// Match any failure with a fallible handler.
    pub fn try_on_failure<E, F>(&mut self, f: F) -> &mut Self
    where
        E: Into<Cause>,
        F: FnOnce(Cause) -> Result<R, E>,
    {
        if let Some(Attempt::Failed(cause)) = self.take_if(Attempt::is_failed) {
            self.settle(Attempt::from_fn(move || f(cause)));
        }
        self
    }

    // ========== Fallbacks ==========

    /// Settle with the outcome of `supplier` if nothing matched.
    pub fn or_else<F, E>(&mut self, supplier: F)
    where
        F: FnOnce() -> Result<R, E>,
        E: Into<Cause>,
    {
        if !self.is_settled() {
            self.settle(Attempt::from_fn(supplier));
        }
    }

    /// Settle with `value` if nothing matched.
    pub fn or_else_succeed(&mut self, value: R) {
        if !self.is_settled() {
            self.settle(Attempt::succeed(value));
        }
    }

    /// Settle with `cause` if nothing matched.
    ///
    /// A fatal cause is raised, as with [`Attempt::fail`].
    pub fn or_else_fail(&mut self, cause: impl Into<Cause>) {
        if !self.is_settled() {
            self.settle(Attempt::fail(cause));
        }
    }
}

impl<T, R> fmt::Debug for Matcher<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("subject", &self.subject.as_ref().map(variant_name))
            .field("settled", &self.settled.as_ref().map(variant_name))
            .finish()
    }
}

fn variant_name<A>(attempt: &Attempt<A>) -> &'static str {
    match attempt {
        Attempt::Succeeded(_) => "Succeeded",
        Attempt::Failed(_) => "Failed",
    }
}
