//! Property-based tests for the `Attempt` combinators.

use attempt::{Attempt, Cause, Panicked, UnmatchedPattern};
use proptest::prelude::*;
use std::cell::Cell;
use std::io;

fn message_cause() -> impl Strategy<Value = Cause> {
    "[a-z]{1,12}".prop_map(Cause::msg)
}

fn io_cause() -> impl Strategy<Value = Cause> {
    "[a-z]{1,12}".prop_map(|message| Cause::new(io::Error::new(io::ErrorKind::Other, message)))
}

fn attempt_of_i32() -> impl Strategy<Value = Attempt<i32>> {
    prop_oneof![
        any::<i32>().prop_map(Attempt::succeed),
        message_cause().prop_map(Attempt::Failed),
    ]
}

proptest! {
    #[test]
    fn prop_map_applies_function(value in any::<i32>()) {
        let f = |n: i32| n.wrapping_mul(3);
        prop_assert_eq!(Attempt::succeed(value).map(f), Attempt::succeed(f(value)));
    }

    #[test]
    fn prop_try_map_err_fails(value in any::<i32>(), cause in message_cause()) {
        let mapped = Attempt::succeed(value).try_map(|_| Err::<i32, _>(cause.clone()));
        prop_assert_eq!(mapped, Attempt::fail(cause));
    }

    #[test]
    fn prop_map_panic_captured(value in any::<i32>()) {
        let mapped = Attempt::succeed(value).map(|_| -> i32 { panic!("boom") });
        prop_assert!(mapped.is_failed_with::<Panicked>());
    }

    #[test]
    fn prop_map_skips_failure(cause in message_cause()) {
        let calls = Cell::new(0);
        let mapped = Attempt::<i32>::fail(cause.clone()).map(|n| {
            calls.set(calls.get() + 1);
            n
        });
        prop_assert_eq!(mapped, Attempt::fail(cause));
        prop_assert_eq!(calls.get(), 0);
    }

    #[test]
    fn prop_recover_on_runs_only_for_matching_type(cause in prop_oneof![message_cause(), io_cause()]) {
        let calls = Cell::new(0);
        let recovered = Attempt::<i32>::fail(cause.clone()).recover_on(|_: &io::Error| {
            calls.set(calls.get() + 1);
            7
        });

        if cause.is::<io::Error>() {
            prop_assert_eq!(calls.get(), 1);
            prop_assert_eq!(recovered, Attempt::succeed(7));
        } else {
            prop_assert_eq!(calls.get(), 0);
            prop_assert_eq!(recovered, Attempt::fail(cause));
        }
    }

    #[test]
    fn prop_combine_map_needs_both(left in attempt_of_i32(), right in attempt_of_i32()) {
        let calls = Cell::new(0);
        let combined = left.clone().combine_map(right.clone(), |a, b| {
            calls.set(calls.get() + 1);
            a.wrapping_add(b)
        });

        match (left, right) {
            (Attempt::Succeeded(a), Attempt::Succeeded(b)) => {
                prop_assert_eq!(calls.get(), 1);
                prop_assert_eq!(combined, Attempt::succeed(a.wrapping_add(b)));
            }
            (Attempt::Failed(cause), _) | (Attempt::Succeeded(_), Attempt::Failed(cause)) => {
                prop_assert_eq!(calls.get(), 0);
                prop_assert_eq!(combined, Attempt::Failed(cause));
            }
        }
    }

    #[test]
    fn prop_from_fn_matches_constructors(value in any::<i32>(), cause in message_cause()) {
        prop_assert_eq!(Attempt::from_fn(|| Ok::<_, Cause>(value)), Attempt::succeed(value));
        prop_assert_eq!(Attempt::<i32>::from_fn(|| Err(cause.clone())), Attempt::fail(cause));
    }

    #[test]
    fn prop_or_else_prefers_success(first in attempt_of_i32(), second in attempt_of_i32()) {
        let chosen = first.clone().or_else(second.clone());
        if first.is_succeeded() {
            prop_assert_eq!(chosen, first);
        } else {
            prop_assert_eq!(chosen, second);
        }
    }

    #[test]
    fn prop_matching_first_satisfied_branch_wins(value in any::<i32>()) {
        let label = Attempt::succeed(value)
            .matching(|m| {
                m.on_success_when(|n| *n < 0, |_| "negative")
                    .on_success_when(|n| *n % 2 == 0, |_| "even")
                    .on_success(|_| "odd");
            })
            .unwrap();

        let expected = if value < 0 {
            "negative"
        } else if value % 2 == 0 {
            "even"
        } else {
            "odd"
        };
        prop_assert_eq!(label, Attempt::succeed(expected));
    }

    #[test]
    fn prop_matching_without_match_returns_subject(subject in attempt_of_i32()) {
        let result: Result<Attempt<()>, UnmatchedPattern<i32>> =
            subject.clone().matching(|m| {
                m.on_success_when(|_| false, |_| ())
                    .on_failure_when(|_| false, |_| ());
            });
        prop_assert_eq!(result.unwrap_err().into_actual(), subject);
    }

    #[test]
    fn prop_fold_consumes_both_variants(subject in attempt_of_i32()) {
        let folded = subject.clone().fold(|cause| cause.to_string().len() as i64, i64::from);
        match subject {
            Attempt::Succeeded(n) => prop_assert_eq!(folded, Attempt::succeed(i64::from(n))),
            Attempt::Failed(cause) => {
                prop_assert_eq!(folded, Attempt::succeed(cause.to_string().len() as i64))
            }
        }
    }
}
