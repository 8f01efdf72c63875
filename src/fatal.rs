//! Fatal-cause classification.
//!
//! Some failures are too severe to be captured into an
//! [`Attempt`](crate::Attempt): running out of memory, a forced termination,
//! a symbol that cannot be linked, or an interrupted thread. A cause is fatal
//! when its concrete error is [`Fatal`]; every path that would build a
//! `Failed` checks this first and raises the cause instead.
//!
//! Raising a cause means unwinding with the [`Cause`] as the panic payload,
//! so callers that must observe it can use [`std::panic::catch_unwind`] and
//! downcast the payload.
//!
//! # Examples
//!
//! ```
//! use attempt::fatal::{self, Fatal};
//! use attempt::Cause;
//!
//! assert!(fatal::is_fatal(&Cause::new(Fatal::interrupted("worker stopped"))));
//! assert!(fatal::is_non_fatal(&Cause::msg("bad input")));
//! ```

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::cause::Cause;
use crate::error::Panicked;

/// The category of a fatal failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FatalKind {
    /// The runtime itself is out of a resource (memory, stack).
    ResourceExhausted,
    /// The process or thread was asked to stop unconditionally.
    Terminated,
    /// Code or data could not be linked or loaded.
    Linkage,
    /// The running thread was interrupted.
    Interrupted,
}

impl fmt::Display for FatalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FatalKind::ResourceExhausted => "resource exhausted",
            FatalKind::Terminated => "terminated",
            FatalKind::Linkage => "linkage error",
            FatalKind::Interrupted => "interrupted",
        };
        f.write_str(name)
    }
}

/// An error that must never be captured.
///
/// # Example
///
/// ```
/// use attempt::fatal::{Fatal, FatalKind};
///
/// let fatal = Fatal::resource_exhausted("heap limit reached");
/// assert_eq!(fatal.kind(), FatalKind::ResourceExhausted);
/// assert_eq!(fatal.to_string(), "resource exhausted: heap limit reached");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fatal {
    kind: FatalKind,
    message: String,
}

impl Fatal {
    /// Create a fatal error of the given kind.
    pub fn new(kind: FatalKind, message: impl Into<String>) -> Self {
        Fatal {
            kind,
            message: message.into(),
        }
    }

    /// A runtime-level resource exhaustion.
    pub fn resource_exhausted(message: impl Into<String>) -> Self {
        Self::new(FatalKind::ResourceExhausted, message)
    }

    /// A forced termination.
    pub fn terminated(message: impl Into<String>) -> Self {
        Self::new(FatalKind::Terminated, message)
    }

    /// A link or load failure.
    pub fn linkage(message: impl Into<String>) -> Self {
        Self::new(FatalKind::Linkage, message)
    }

    /// A thread interruption.
    pub fn interrupted(message: impl Into<String>) -> Self {
        Self::new(FatalKind::Interrupted, message)
    }

    /// The category of this failure.
    pub fn kind(&self) -> FatalKind {
        self.kind
    }

    /// The message describing this failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Fatal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl StdError for Fatal {}

/// Returns `true` if `cause` must never be captured.
pub fn is_fatal(cause: &Cause) -> bool {
    cause.is::<Fatal>()
}

/// Returns `true` if `cause` may be captured into a `Failed`.
pub fn is_non_fatal(cause: &Cause) -> bool {
    !is_fatal(cause)
}

/// Raise `error` by unwinding with it as a [`Cause`] payload.
///
/// A [`Cause`] is raised unchanged. Any other error is wrapped into a new
/// `Cause` first.
///
/// # Example
///
/// ```
/// use attempt::fatal::{self, Fatal};
/// use attempt::Cause;
/// use std::panic::{self, AssertUnwindSafe};
///
/// let cause = Cause::new(Fatal::terminated("shutdown"));
/// let raised = cause.clone();
/// let payload = panic::catch_unwind(AssertUnwindSafe(move || {
///     fatal::rethrow(raised);
/// }))
/// .unwrap_err();
///
/// let unwound = payload.downcast::<Cause>().unwrap();
/// assert!(unwound.ptr_eq(&cause));
/// ```
pub fn rethrow<E>(error: E) -> !
where
    E: Into<Cause>,
{
    let cause = error.into();
    #[cfg(feature = "tracing")]
    if cause.is_fatal() {
        tracing::error!("Raising fatal cause: {}", cause);
    }
    panic::resume_unwind(Box::new(cause))
}

/// Pass `cause` through if it may be captured, raise it otherwise.
pub(crate) fn screen(cause: Cause) -> Cause {
    if is_fatal(&cause) {
        rethrow(cause)
    }
    cause
}

/// Run `f`, turning a non-fatal panic into a [`Cause`].
///
/// Fatal payloads keep unwinding.
pub(crate) fn capture<R, F>(f: F) -> Result<R, Cause>
where
    F: FnOnce() -> R,
{
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(classify)
}

fn classify(payload: Box<dyn Any + Send>) -> Cause {
    let payload = match payload.downcast::<Cause>() {
        Ok(cause) => return screen(*cause),
        Err(payload) => payload,
    };
    let payload = match payload.downcast::<Fatal>() {
        Ok(fatal) => rethrow(*fatal),
        Err(payload) => payload,
    };

    let message = if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Box<dyn Any>".to_string()
    };

    #[cfg(feature = "tracing")]
    tracing::debug!("Captured panic: {}", message);

    Cause::new(Panicked::new(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn raised_cause(f: impl FnOnce()) -> Cause {
        let payload = panic::catch_unwind(AssertUnwindSafe(f)).unwrap_err();
        *payload.downcast::<Cause>().unwrap()
    }

    #[test]
    fn test_fatal_kinds_are_fatal() {
        for fatal in [
            Fatal::resource_exhausted("oom"),
            Fatal::terminated("kill"),
            Fatal::linkage("missing symbol"),
            Fatal::interrupted("interrupt"),
        ] {
            let cause = Cause::new(fatal);
            assert!(is_fatal(&cause));
            assert!(!is_non_fatal(&cause));
            assert!(cause.is_fatal());
        }
    }

    #[test]
    fn test_ordinary_errors_are_non_fatal() {
        let cause = Cause::new(io::Error::new(io::ErrorKind::Interrupted, "EINTR"));
        assert!(is_non_fatal(&cause));
        assert!(is_non_fatal(&Cause::msg("plain")));
        assert!(is_non_fatal(&Cause::new(Panicked::new("boom"))));
    }

    #[test]
    fn test_rethrow_cause_unchanged() {
        let cause = Cause::msg("runtime failure");
        let raised = cause.clone();
        let unwound = raised_cause(move || {
            rethrow(raised);
        });
        assert!(unwound.ptr_eq(&cause));
    }

    #[test]
    fn test_rethrow_fatal_cause_unchanged() {
        let cause = Cause::new(Fatal::resource_exhausted("oom"));
        let raised = cause.clone();
        let unwound = raised_cause(move || {
            rethrow(raised);
        });
        assert!(unwound.ptr_eq(&cause));
    }

    #[test]
    fn test_rethrow_wraps_plain_error() {
        let unwound = raised_cause(|| {
            rethrow(Fatal::interrupted("stop"));
        });
        assert!(unwound.is::<Fatal>());
        assert_eq!(
            unwound.downcast_ref::<Fatal>().unwrap().kind(),
            FatalKind::Interrupted
        );
    }

    #[test]
    fn test_screen_passes_non_fatal() {
        let cause = Cause::msg("fine");
        assert!(screen(cause.clone()).ptr_eq(&cause));
    }

    #[test]
    fn test_screen_raises_fatal() {
        let cause = Cause::new(Fatal::linkage("libfoo.so"));
        let raised = cause.clone();
        let unwound = raised_cause(move || {
            screen(raised);
        });
        assert!(unwound.ptr_eq(&cause));
    }

    #[test]
    fn test_capture_ok() {
        assert_eq!(capture(|| 21 * 2).unwrap(), 42);
    }

    #[test]
    fn test_capture_str_panic() {
        let cause = capture(|| -> i32 { panic!("static message") }).unwrap_err();
        assert_eq!(
            cause.downcast_ref::<Panicked>().unwrap().message(),
            "static message"
        );
    }

    #[test]
    fn test_capture_formatted_panic() {
        let code = 7;
        let cause = capture(|| -> i32 { panic!("code {}", code) }).unwrap_err();
        assert_eq!(cause.downcast_ref::<Panicked>().unwrap().message(), "code 7");
    }

    #[test]
    fn test_capture_opaque_payload() {
        let cause = capture(|| -> i32 { panic::panic_any(17u8) }).unwrap_err();
        assert_eq!(
            cause.downcast_ref::<Panicked>().unwrap().message(),
            "Box<dyn Any>"
        );
    }

    #[test]
    fn test_capture_non_fatal_cause_payload() {
        let cause = Cause::msg("thrown");
        let thrown = cause.clone();
        let captured = capture(move || -> i32 { rethrow(thrown) }).unwrap_err();
        assert!(captured.ptr_eq(&cause));
    }

    #[test]
    fn test_capture_reraises_fatal_cause() {
        let cause = Cause::new(Fatal::terminated("sigkill"));
        let thrown = cause.clone();
        let unwound = raised_cause(move || {
            let _ = capture(move || -> i32 { rethrow(thrown) });
        });
        assert!(unwound.ptr_eq(&cause));
    }

    #[test]
    fn test_capture_reraises_fatal_payload() {
        let unwound = raised_cause(|| {
            let _ = capture(|| -> i32 { panic::panic_any(Fatal::interrupted("stop")) });
        });
        assert!(unwound.is_fatal());
    }

    #[test]
    fn test_fatal_display() {
        assert_eq!(
            Fatal::linkage("undefined symbol: foo").to_string(),
            "linkage error: undefined symbol: foo"
        );
        assert_eq!(Fatal::terminated("bye").message(), "bye");
    }
}
