//! Deadline: bound a computation's wall-clock time.
//!
//! [`timeout`] races a computation against a cancellable timer. Whichever
//! settles first decides the outcome; at most one of the two does. When the
//! source wins, the pending timer is dropped, which releases its scheduled
//! wake-up so it cannot fire afterwards. When the deadline elapses first,
//! the aggregate fails with [`TimeoutError`] while the source - consistent
//! with [`race`](crate::join::race) - keeps running in the background.
//!
//! The error side widens to [`Either`]: `Left` is the source's own error,
//! `Right` is the deadline.

use std::fmt;
use std::time::Duration;

use tokio::time::Instant;

use crate::either::Either;
use crate::flow::flow;
use crate::r#gen::{Gen, lift};

/// The error a computation fails with when its deadline elapses first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutError {
    /// The deadline that was exceeded.
    pub timeout: Duration,
}

impl fmt::Display for TimeoutError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "computation timed out after {}ms",
            self.timeout.as_millis()
        )
    }
}

impl std::error::Error for TimeoutError {}

/// Bounds `computation` to `duration` of wall-clock time.
///
/// The source starts immediately, driven under its own [`flow`] on a
/// spawned task, and the deadline clock starts at the same moment - not
/// when the returned computation is eventually driven. Like the parallel
/// combinators, `timeout` must be invoked from within a tokio runtime
/// context.
///
/// # Examples
///
/// ```rust,ignore
/// use genflow::prelude::*;
/// use std::time::Duration;
///
/// let result = flow(timeout(Duration::from_millis(20), slow_fetch())).await;
/// match result {
///     Ok(value) => { /* finished in time */ }
///     Err(Either::Left(error)) => { /* slow_fetch's own error */ }
///     Err(Either::Right(timed_out)) => {
///         assert_eq!(timed_out.timeout, Duration::from_millis(20));
///     }
/// }
/// ```
#[must_use]
pub fn timeout<E, V>(duration: Duration, computation: Gen<E, V>) -> Gen<Either<E, TimeoutError>, V>
where
    E: Send + 'static,
    V: Send + 'static,
{
    let deadline = Instant::now() + duration;
    let source = tokio::spawn(flow(computation));

    lift(move || async move {
        tokio::select! {
            outcome = source => crate::join::settled(outcome).map_err(Either::Left),
            () = tokio::time::sleep_until(deadline) => {
                Err(Either::Right(TimeoutError { timeout: duration }))
            }
        }
    })
}
