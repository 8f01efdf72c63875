//! Fatal causes must escape every capture boundary.

use attempt::fatal::{self, Fatal, FatalKind};
use attempt::{Attempt, Cause, Deferred};
use std::panic::{self, AssertUnwindSafe};

fn escaped<R>(f: impl FnOnce() -> R) -> Cause {
    let payload = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(_) => panic!("fatal cause was captured"),
        Err(payload) => payload,
    };
    *payload
        .downcast::<Cause>()
        .unwrap_or_else(|_| panic!("payload was not a Cause"))
}

fn out_of_memory() -> Cause {
    Cause::new(Fatal::resource_exhausted("allocation of 16 GiB failed"))
}

#[test]
fn test_fail_constructor() {
    let cause = escaped(|| Attempt::<i32>::fail(out_of_memory()));
    assert_eq!(
        cause.downcast_ref::<Fatal>().unwrap().kind(),
        FatalKind::ResourceExhausted
    );
}

#[test]
fn test_supplier_returning_fatal() {
    let cause = escaped(|| Attempt::<i32>::from_fn(|| Err(Fatal::terminated("SIGKILL"))));
    assert!(cause.is_fatal());
}

#[test]
fn test_supplier_rethrowing_fatal() {
    let cause = escaped(|| {
        Attempt::<i32>::catching(|| {
            fatal::rethrow(Fatal::interrupted("worker cancelled"));
        })
    });
    assert_eq!(cause.to_string(), "interrupted: worker cancelled");
}

#[test]
fn test_raw_fatal_payload_is_wrapped() {
    let cause = escaped(|| Attempt::<i32>::catching(|| panic::panic_any(Fatal::linkage("libssl.so.3"))));
    assert_eq!(
        cause.downcast_ref::<Fatal>().unwrap().kind(),
        FatalKind::Linkage
    );
}

#[test]
fn test_every_combinator_lets_fatal_through() {
    let oom = out_of_memory();

    let raised = oom.clone();
    assert!(escaped(|| Attempt::succeed(1).map(|_: i32| -> i32 { fatal::rethrow(raised) })).ptr_eq(&oom));

    let raised = oom.clone();
    assert!(escaped(|| Attempt::succeed(1).try_map(|_: i32| Err::<i32, _>(raised))).ptr_eq(&oom));

    let raised = oom.clone();
    assert!(escaped(|| Attempt::succeed(1).filter(|_| fatal::rethrow(raised))).ptr_eq(&oom));

    let raised = oom.clone();
    assert!(escaped(|| Attempt::<i32>::fail(Cause::msg("x")).recover(|_| fatal::rethrow(raised))).ptr_eq(&oom));

    let raised = oom.clone();
    assert!(escaped(|| Attempt::<i32>::fail(Cause::msg("x")).recover_with(|_| Attempt::fail(raised))).ptr_eq(&oom));
}

#[test]
fn test_matching_branch_raising_fatal() {
    let oom = out_of_memory();
    let raised = oom.clone();
    let cause = escaped(move || {
        Attempt::succeed(1).matching(|m| {
            m.on_success(|_: i32| -> i32 { fatal::rethrow(raised) });
        })
    });
    assert!(cause.ptr_eq(&oom));
}

#[test]
fn test_forcing_deferred_raises_fatal() {
    let deferred = Deferred::<i32>::from_sync(|| Err(Fatal::terminated("shutdown")));
    let cause = escaped(|| deferred.get());
    assert_eq!(
        cause.downcast_ref::<Fatal>().unwrap().kind(),
        FatalKind::Terminated
    );
}

#[test]
fn test_non_fatal_panic_is_captured() {
    let attempt = Attempt::<i32>::catching(|| panic!("ordinary"));
    assert!(attempt.cause().is_some_and(fatal::is_non_fatal));
}
