//! `Either` tests, focused on how the crate uses it: widened error
//! channels around `timeout`.

use std::time::Duration;

use genflow::prelude::*;
use rstest::rstest;

#[rstest]
fn sides_are_distinguishable() {
    let left: Either<&str, i32> = Either::Left("source error");
    let right: Either<&str, i32> = Either::Right(42);

    assert!(left.is_left() && !left.is_right());
    assert!(right.is_right() && !right.is_left());
    assert_eq!(left.left(), Some("source error"));
    assert_eq!(right.right(), Some(42));
}

#[rstest]
fn references_do_not_consume() {
    let widened: Either<&str, TimeoutError> = Either::Right(TimeoutError {
        timeout: Duration::from_millis(5),
    });

    assert_eq!(widened.left_ref(), None);
    assert_eq!(
        widened.right_ref().map(|e| e.timeout),
        Some(Duration::from_millis(5))
    );
}

#[rstest]
fn maps_touch_only_their_side() {
    let left: Either<i32, &str> = Either::Left(10);

    assert_eq!(left.map_left(|n| n * 2), Either::Left(20));
    assert_eq!(left.map_right(|s: &str| s.len()), Either::Left(10));
}

#[rstest]
fn fold_collapses_both_sides() {
    let describe = |outcome: Either<&str, TimeoutError>| {
        outcome.fold(
            |error| format!("failed: {error}"),
            |timed_out| format!("deadline: {}ms", timed_out.timeout.as_millis()),
        )
    };

    assert_eq!(describe(Either::Left("boom")), "failed: boom");
    assert_eq!(
        describe(Either::Right(TimeoutError {
            timeout: Duration::from_millis(20),
        })),
        "deadline: 20ms"
    );
}
