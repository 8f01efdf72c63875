//! Deferred computations that resolve to an [`Attempt`].
//!
//! A [`Deferred<T>`] is a description of work, not the work itself. Building
//! one, or chaining [`map`](Deferred::map) and [`flat_map`](Deferred::flat_map)
//! onto it, runs nothing. The pipeline runs when it is forced with
//! [`get`](Deferred::get) (blocking) or [`force`](Deferred::force) (async).
//!
//! Each step is a continuation: when a parent resolves, the next step runs on
//! whichever thread delivered the parent's outcome. For
//! [`from_sync`](Deferred::from_sync) that is the forcing thread; for
//! [`from_async`](Deferred::from_async) it is the thread that calls
//! [`Completion::complete`].
//!
//! Forcing is not memoized. Every call to `get` or `force` runs the whole
//! chain again.
//!
//! # Examples
//!
//! ```rust
//! use attempt::Deferred;
//! use std::thread;
//! use std::time::Duration;
//!
//! let line = Deferred::from_async(|completion| {
//!     thread::spawn(move || {
//!         thread::sleep(Duration::from_millis(10));
//!         completion.succeed("111".to_string());
//!     });
//! });
//!
//! let parsed = line.try_map(|s| s.parse::<i32>());
//! assert_eq!(parsed.get().unwrap(), 111);
//! ```

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use futures::channel::oneshot;
use futures::FutureExt;

use crate::attempt::Attempt;
use crate::cause::Cause;
use crate::error::Abandoned;
use crate::fatal;

type Continuation<T> = Box<dyn FnOnce(Attempt<T>) + Send>;
type Launch<T> = dyn Fn(Continuation<T>) + Send + Sync;

/// A lazy, reusable description of a computation yielding an [`Attempt`].
pub struct Deferred<T> {
    launch: Arc<Launch<T>>,
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Deferred {
            launch: Arc::clone(&self.launch),
        }
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("launch", &"<function>")
            .finish()
    }
}

impl<T: Send + 'static> Deferred<T> {
    fn from_launch<L>(launch: L) -> Self
    where
        L: Fn(Continuation<T>) + Send + Sync + 'static,
    {
        Deferred {
            launch: Arc::new(launch),
        }
    }

    // ========== Constructors ==========

    /// Defer a fallible synchronous supplier.
    ///
    /// When forced, the supplier runs on the forcing thread and its outcome
    /// is captured as with [`Attempt::from_fn`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::Deferred;
    ///
    /// let parsed = Deferred::from_sync(|| "42".parse::<i32>());
    /// assert_eq!(parsed.get().unwrap(), 42);
    /// ```
    pub fn from_sync<F, E>(supplier: F) -> Self
    where
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
        E: Into<Cause>,
    {
        Self::from_launch(move |resolve: Continuation<T>| resolve(Attempt::from_fn(&supplier)))
    }

    /// Defer a supplier that can only fail by panicking.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::Deferred;
    ///
    /// let quotient = Deferred::delay(|| 333 / 111).map(|x| x);
    /// assert_eq!(quotient.get().unwrap(), 3);
    /// ```
    pub fn delay<F>(supplier: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::from_launch(move |resolve: Continuation<T>| resolve(Attempt::catching(&supplier)))
    }

    /// Lift an existing attempt. Every forcing yields a clone of it.
    pub fn from_attempt(attempt: Attempt<T>) -> Self
    where
        T: Clone + Sync,
    {
        Self::from_launch(move |resolve: Continuation<T>| resolve(attempt.clone()))
    }

    /// Defer a callback-driven asynchronous computation.
    ///
    /// When forced, `starter` is called with a [`Completion`]. It should
    /// arrange for exactly one call to [`Completion::complete`], from any
    /// thread. If the starter panics before completing, the pipeline
    /// resolves to that failure.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::{Attempt, Deferred};
    ///
    /// let ready = Deferred::from_async(|completion| completion.complete(Attempt::succeed(7)));
    /// assert_eq!(ready.map(|n| n * 6).get().unwrap(), 42);
    /// ```
    pub fn from_async<S>(starter: S) -> Self
    where
        S: Fn(Completion<T>) + Send + Sync + 'static,
    {
        Self::from_launch(move |resolve: Continuation<T>| {
            let completion = Completion::new(resolve);
            let handle = completion.clone();
            if let Err(cause) = fatal::capture(|| starter(handle)) {
                if !completion.is_completed() {
                    completion.complete(Attempt::Failed(cause));
                }
            }
        })
    }

    /// Defer a future built by `factory`.
    ///
    /// Each forcing calls `factory` on a dedicated worker thread and drives
    /// the future there with [`futures::executor::block_on`]; continuations
    /// run on that worker. The future must not need a runtime context such
    /// as a tokio reactor. A fatal cause unwinds the worker, and the
    /// pipeline then resolves to [`Abandoned`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::Deferred;
    ///
    /// let answer = Deferred::from_future(|| async { "42".parse::<i32>() });
    /// assert_eq!(answer.get().unwrap(), 42);
    /// ```
    pub fn from_future<F, Fut, E>(factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + 'static,
        E: Into<Cause>,
    {
        let factory = Arc::new(factory);
        Self::from_async(move |completion: Completion<T>| {
            let factory = Arc::clone(&factory);
            let worker = completion.clone();
            let spawned = thread::Builder::new()
                .name("attempt-future".to_string())
                .spawn(move || {
                    worker.complete(Attempt::from_fn(|| futures::executor::block_on(factory())))
                });
            if let Err(error) = spawned {
                completion.fail(error);
            }
        })
    }

    // ========== Composition ==========

    /// Transform the eventual value.
    ///
    /// A panic in `f` resolves the new pipeline to `Failed`.
    pub fn map<R, F>(&self, f: F) -> Deferred<R>
    where
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        let parent = Arc::clone(&self.launch);
        let f = Arc::new(f);
        Deferred::from_launch(move |resolve: Continuation<R>| {
            let f = Arc::clone(&f);
            parent(Box::new(move |outcome: Attempt<T>| {
                resolve(outcome.map(|value| f(value)))
            }))
        })
    }

    /// Transform the eventual value with a fallible function.
    ///
    /// An `Err` or a panic in `f` resolves the new pipeline to `Failed`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::Deferred;
    /// use std::num::ParseIntError;
    ///
    /// let line = Deferred::delay(|| "abc".to_string());
    /// let parsed = line.try_map(|s| s.parse::<i32>());
    /// assert!(parsed.get().unwrap_err().is::<ParseIntError>());
    /// ```
    pub fn try_map<R, E, F>(&self, f: F) -> Deferred<R>
    where
        R: Send + 'static,
        E: Into<Cause>,
        F: Fn(T) -> Result<R, E> + Send + Sync + 'static,
    {
        let parent = Arc::clone(&self.launch);
        let f = Arc::new(f);
        Deferred::from_launch(move |resolve: Continuation<R>| {
            let f = Arc::clone(&f);
            parent(Box::new(move |outcome: Attempt<T>| {
                resolve(outcome.try_map(|value| f(value)))
            }))
        })
    }

    /// Continue with another deferred computation built from the value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::Deferred;
    ///
    /// let parsed = Deferred::from_sync(|| "333".parse::<i32>());
    /// let divisor = Deferred::from_sync(|| "111".parse::<i32>());
    /// let divided = parsed.flat_map(move |x| divisor.map(move |y| x / y));
    /// assert_eq!(divided.get().unwrap(), 3);
    /// ```
    pub fn flat_map<R, F>(&self, f: F) -> Deferred<R>
    where
        R: Send + 'static,
        F: Fn(T) -> Deferred<R> + Send + Sync + 'static,
    {
        let parent = Arc::clone(&self.launch);
        let f = Arc::new(f);
        Deferred::from_launch(move |resolve: Continuation<R>| {
            let f = Arc::clone(&f);
            parent(Box::new(move |outcome: Attempt<T>| {
                Deferred::chain(outcome.map(|value| f(value)), resolve)
            }))
        })
    }

    /// Continue with a deferred computation built by a fallible function.
    ///
    /// An `Err` from `f` resolves the new pipeline to `Failed` without
    /// launching anything further.
    pub fn try_flat_map<R, E, F>(&self, f: F) -> Deferred<R>
    where
        R: Send + 'static,
        E: Into<Cause>,
        F: Fn(T) -> Result<Deferred<R>, E> + Send + Sync + 'static,
    {
        let parent = Arc::clone(&self.launch);
        let f = Arc::new(f);
        Deferred::from_launch(move |resolve: Continuation<R>| {
            let f = Arc::clone(&f);
            parent(Box::new(move |outcome: Attempt<T>| {
                Deferred::chain(outcome.try_map(|value| f(value)), resolve)
            }))
        })
    }

    fn chain(next: Attempt<Deferred<T>>, resolve: Continuation<T>) {
        match next {
            Attempt::Succeeded(next) => (next.launch)(resolve),
            Attempt::Failed(cause) => resolve(Attempt::Failed(cause)),
        }
    }

    // ========== Forcing ==========

    /// Run the pipeline now and return a future of its outcome.
    ///
    /// The pipeline starts before this returns; the future only waits for
    /// the final continuation.
    ///
    /// # Example
    ///
    /// ```rust
    /// use attempt::{Attempt, Deferred};
    ///
    /// # tokio_test::block_on(async {
    /// let deferred = Deferred::delay(|| "async".len());
    /// assert_eq!(deferred.force().await, Attempt::succeed(5));
    /// # });
    /// ```
    pub fn force(&self) -> impl Future<Output = Attempt<T>> + Send + 'static {
        let (sender, receiver) = oneshot::channel();
        (self.launch)(Box::new(move |outcome| {
            // The caller may have dropped the future already.
            let _ = sender.send(outcome);
        }));
        receiver.map(|received| received.unwrap_or_else(|_| Attempt::Failed(Cause::new(Abandoned))))
    }

    /// Run the pipeline and block the calling thread until it resolves.
    ///
    /// There is no timeout. A pipeline whose completion is never invoked,
    /// and never dropped, blocks forever.
    pub fn get(&self) -> Result<T, Cause> {
        futures::executor::block_on(self.force()).get()
    }
}

/// The one-shot callback handed to a [`Deferred::from_async`] starter.
///
/// Clones share the same slot: the first completion through any clone wins
/// and later ones are ignored. Dropping every clone without completing
/// resolves the pipeline to [`Abandoned`].
pub struct Completion<T> {
    slot: Arc<Mutex<Option<Continuation<T>>>>,
}

impl<T> Clone for Completion<T> {
    fn clone(&self) -> Self {
        Completion {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("completed", &self.is_completed())
            .finish()
    }
}

impl<T> Completion<T> {
    fn new(resolve: Continuation<T>) -> Self {
        Completion {
            slot: Arc::new(Mutex::new(Some(resolve))),
        }
    }

    /// Resolve the pipeline with `outcome`.
    ///
    /// The continuation runs on the calling thread. Only the first call has
    /// any effect. A failure holding a fatal cause is raised on the calling
    /// thread instead of being delivered.
    pub fn complete(&self, outcome: Attempt<T>) {
        let outcome = match outcome {
            Attempt::Failed(cause) => Attempt::fail(cause),
            succeeded => succeeded,
        };
        let resolve = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match resolve {
            Some(resolve) => resolve(outcome),
            None => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Completion invoked after it already resolved; ignoring outcome");
                #[cfg(not(feature = "tracing"))]
                eprintln!("Completion invoked after it already resolved; ignoring outcome");
            }
        }
    }

    /// Resolve the pipeline with a value.
    pub fn succeed(&self, value: T) {
        self.complete(Attempt::Succeeded(value));
    }

    /// Resolve the pipeline with a failure.
    ///
    /// A fatal cause is raised on the calling thread instead.
    pub fn fail(&self, cause: impl Into<Cause>) {
        self.complete(Attempt::fail(cause));
    }

    /// Returns `true` once any clone of this completion has been used.
    pub fn is_completed(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}
