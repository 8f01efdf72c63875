//! # Attempt
//!
//! Capture the outcome of a computation as a value.
//!
//! An [`Attempt<T>`] is either `Succeeded(T)` or `Failed(Cause)`. Every
//! combinator runs its closure behind a panic boundary, so code that returns
//! `Err` and code that panics are captured the same way. Fatal causes are the
//! exception: they are classified by [`fatal`] and always keep unwinding.
//!
//! On top of the value type the crate offers:
//!
//! - ordered pattern matching over outcomes with [`Attempt::matching`];
//! - [`Deferred`], a lazy pipeline over callback-driven async work that
//!   resolves to an `Attempt` when forced.
//!
//! ## Quick Example
//!
//! ```rust
//! use attempt::prelude::*;
//! use std::num::ParseIntError;
//!
//! fn port(raw: &str) -> Attempt<u16> {
//!     Attempt::from_fn(|| raw.parse::<u16>())
//!         .recover_on(|_: &ParseIntError| 8080)
//!         .filter(|port| *port >= 1024)
//! }
//!
//! assert_eq!(port("9000"), Attempt::succeed(9000));
//! assert_eq!(port("http"), Attempt::succeed(8080));
//! assert!(port("80").is_failed_with::<NoSuchElement>());
//!
//! let label = port("80")
//!     .matching(|m| {
//!         m.on_success(|port| format!("listening on {}", port))
//!             .on_failure_of(|_: &NoSuchElement| "privileged port".to_string());
//!     })
//!     .unwrap();
//! assert_eq!(label, Attempt::succeed("privileged port".to_string()));
//! ```
//!
//! ## Cargo features
//!
//! - `tracing`: emit `tracing` events for captured panics, raised fatal
//!   causes and ignored completions.
//! - `serde`: `Serialize`/`Deserialize` for `Attempt`.
//! - `proptest`: an `Arbitrary` implementation for `Attempt`.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod attempt;
pub mod cause;
pub mod deferred;
pub mod error;
pub mod fatal;
pub mod matcher;
pub mod testing;

#[cfg(feature = "serde")]
mod serde_impl;

// Re-exports
pub use attempt::Attempt;
pub use cause::Cause;
pub use deferred::{Completion, Deferred};
#[cfg(feature = "serde")]
pub use error::DescribedCause;
pub use error::{Abandoned, NoSuchElement, Panicked, UnmatchedPattern, UnsupportedOperation};
pub use fatal::{Fatal, FatalKind};
pub use matcher::Matcher;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::attempt::Attempt;
    pub use crate::cause::Cause;
    pub use crate::deferred::{Completion, Deferred};
    pub use crate::error::{NoSuchElement, UnmatchedPattern};
    pub use crate::fatal::{Fatal, FatalKind};
    pub use crate::matcher::Matcher;
}
