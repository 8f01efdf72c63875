//! Testing utilities for code that produces [`Attempt`](crate::Attempt)s.
//!
//! This module provides assertion macros and, with the `proptest` feature,
//! a proptest `Arbitrary` implementation for property-based tests.
//!
//! # Examples
//!
//! ```rust
//! use attempt::{assert_failed, assert_failed_with, assert_succeeded, Attempt};
//! use std::num::ParseIntError;
//!
//! let parsed = Attempt::from_fn(|| "42".parse::<i32>());
//! assert_succeeded!(parsed, 42);
//!
//! let broken = Attempt::from_fn(|| "forty-two".parse::<i32>());
//! assert_failed!(broken.clone());
//! assert_failed_with!(broken, ParseIntError);
//! ```

/// Assert that an attempt succeeded, optionally with a specific value.
///
/// This macro will panic if the attempt is `Failed`.
///
/// # Example
///
/// ```rust
/// use attempt::{assert_succeeded, Attempt};
///
/// assert_succeeded!(Attempt::succeed(1));
/// assert_succeeded!(Attempt::succeed(1), 1);
/// ```
#[macro_export]
macro_rules! assert_succeeded {
    ($attempt:expr) => {
        match $attempt {
            $crate::Attempt::Succeeded(_) => {}
            $crate::Attempt::Failed(cause) => {
                panic!("Expected Succeeded, got Failed: {:?}", cause);
            }
        }
    };
    ($attempt:expr, $expected:expr) => {
        match $attempt {
            $crate::Attempt::Succeeded(value) => {
                assert_eq!(value, $expected);
            }
            $crate::Attempt::Failed(cause) => {
                panic!(
                    "Expected Succeeded with {:?}, got Failed: {:?}",
                    $expected, cause
                );
            }
        }
    };
}

/// Assert that an attempt failed.
///
/// This macro will panic if the attempt is `Succeeded`.
///
/// # Example
///
/// ```rust
/// use attempt::{assert_failed, Attempt, Cause};
///
/// assert_failed!(Attempt::<i32>::fail(Cause::msg("nope")));
/// ```
#[macro_export]
macro_rules! assert_failed {
    ($attempt:expr) => {
        match $attempt {
            $crate::Attempt::Failed(_) => {}
            $crate::Attempt::Succeeded(value) => {
                panic!("Expected Failed, got Succeeded: {:?}", value);
            }
        }
    };
}

/// Assert that an attempt failed with a cause of the given error type.
///
/// # Example
///
/// ```rust
/// use attempt::{assert_failed_with, Attempt, NoSuchElement};
///
/// let filtered = Attempt::succeed(3).filter(|n| n % 2 == 0);
/// assert_failed_with!(filtered, NoSuchElement);
/// ```
#[macro_export]
macro_rules! assert_failed_with {
    ($attempt:expr, $error:ty) => {
        match $attempt {
            $crate::Attempt::Failed(cause) => {
                if !cause.is::<$error>() {
                    panic!(
                        "Expected Failed with {}, got Failed with {}: {:?}",
                        stringify!($error),
                        cause.type_name(),
                        cause
                    );
                }
            }
            $crate::Attempt::Succeeded(value) => {
                panic!(
                    "Expected Failed with {}, got Succeeded: {:?}",
                    stringify!($error),
                    value
                );
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl<T> Arbitrary for crate::Attempt<T>
where
    T: Arbitrary + 'static,
{
    type Parameters = T::Parameters;
    type Strategy = BoxedStrategy<Self>;

    /// Successes carry an arbitrary value; failures carry a message cause.
    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            any_with::<T>(args).prop_map(crate::Attempt::Succeeded),
            "[a-z ]{0,16}".prop_map(|message| crate::Attempt::Failed(crate::Cause::msg(message))),
        ]
        .boxed()
    }
}
