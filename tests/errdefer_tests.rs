//! Scoped cleanup tests: callbacks fire in registration order, exactly
//! once each, only when the owning run fails.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use genflow::prelude::*;
use tokio::time::sleep;

#[derive(Debug, Clone, PartialEq)]
struct DependencyError(&'static str);

#[tokio::test]
async fn cleanups_fire_in_registration_order_when_the_chain_fails() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let first = order.clone();
    let second = order.clone();

    let chain = gen_flow! {
        one <= lift(|| async { Ok::<_, DependencyError>("dependency one") });
        _ <= errdefer(move |error: &DependencyError| {
            assert_eq!(error.0, "some failing dependency");
            first.lock().unwrap().push(1);
        });
        _ <= noop();
        two <= lift(|| async { Ok::<_, DependencyError>("dependency two") });
        _ <= errdefer(move |error: &DependencyError| {
            assert_eq!(error.0, "some failing dependency");
            second.lock().unwrap().push(2);
        });
        _ <= lift(|| async {
            Err::<&str, _>(DependencyError("some failing dependency"))
        });
        Gen::done((one, two))
    };

    let result = flow(chain).await;

    assert_eq!(result, Err(DependencyError("some failing dependency")));
    assert_eq!(*order.lock().unwrap(), vec![1, 2]);
}

#[tokio::test]
async fn cleanups_never_fire_when_the_chain_succeeds() {
    let fired = Arc::new(AtomicBool::new(false));
    let flag = fired.clone();

    let chain = gen_flow! {
        _ <= errdefer(move |_error: &DependencyError| flag.store(true, Ordering::SeqCst));
        value <= lift(|| async { Ok::<_, DependencyError>(11) });
        Gen::done(value)
    };

    assert_eq!(flow(chain).await, Ok(11));
    assert!(!fired.load(Ordering::SeqCst));
}

#[tokio::test]
async fn a_registration_is_a_no_op_for_the_chain_itself() {
    let chain = gen_flow! {
        _ <= errdefer(|_error: &DependencyError| {});
        Gen::done(5)
    };
    assert_eq!(flow(chain).await, Ok(5));
}

#[tokio::test(start_paused = true)]
async fn async_cleanups_run_sequentially_in_registration_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let slow = order.clone();
    let fast = order.clone();

    let chain = gen_flow! {
        _ <= errdefer_async(move |_error: &&'static str| {
            let log = slow;
            async move {
                sleep(Duration::from_millis(20)).await;
                log.lock().unwrap().push(1);
            }
        });
        _ <= errdefer_async(move |_error: &&'static str| {
            let log = fast;
            async move { log.lock().unwrap().push(2) }
        });
        _ <= Gen::<&'static str, ()>::fail("late failure");
        Gen::done(())
    };

    assert_eq!(flow(chain).await, Err("late failure"));
    // the slower first cleanup is awaited before the second runs
    assert_eq!(*order.lock().unwrap(), vec![1, 2]);
}

#[tokio::test]
async fn each_cleanup_receives_the_triggering_error() {
    let observed = Arc::new(Mutex::new(None));
    let slot = observed.clone();

    let chain = gen_flow! {
        _ <= errdefer(move |error: &DependencyError| {
            *slot.lock().unwrap() = Some(error.clone());
        });
        _ <= Gen::<DependencyError, ()>::fail(DependencyError("tripped"));
        Gen::done(())
    };

    assert_eq!(flow(chain).await, Err(DependencyError("tripped")));
    assert_eq!(*observed.lock().unwrap(), Some(DependencyError("tripped")));
}
