//! Parallel combinators: run independently-driven computations concurrently.
//!
//! Both combinators start every branch the moment they are invoked, each
//! under its own [`flow`] drive on a spawned task, so branches make
//! progress even before (and after) the aggregate computation itself is
//! driven. Neither combinator cancels anything: losing or sibling branches
//! run to completion in the background. Callers needing bounded total cost
//! wrap each branch in its own [`timeout`](crate::timeout::timeout).
//!
//! A branch that panics is a broken composition, not an expected failure;
//! the combinators re-raise the panic instead of converting it into a
//! domain error.
//!
//! Because branches are spawned eagerly, both combinators must be invoked
//! from within a tokio runtime context.
//!
//! [`flow`]: crate::flow::flow

use futures::future;
use tokio::task::JoinHandle;

use crate::flow::flow;
use crate::r#gen::{Gen, lift};

/// Re-raises a panic from a spawned branch drive; a cancelled branch can
/// only mean the runtime is shutting down, which is equally fatal here.
pub(crate) fn settled<E, V>(
    outcome: Result<Result<V, E>, tokio::task::JoinError>,
) -> Result<V, E> {
    match outcome {
        Ok(result) => result,
        Err(join_error) => match join_error.try_into_panic() {
            Ok(payload) => std::panic::resume_unwind(payload),
            Err(join_error) => panic!("flow branch aborted: {join_error}"),
        },
    }
}

fn spawn_branches<E, V>(computations: Vec<Gen<E, V>>) -> Vec<JoinHandle<Result<V, E>>>
where
    E: Send + 'static,
    V: Send + 'static,
{
    computations
        .into_iter()
        .map(|computation| tokio::spawn(flow(computation)))
        .collect()
}

/// Runs every computation concurrently and waits for all of them to settle.
///
/// On success the aggregate value is the branch values in input order, no
/// matter in which order they completed. If any branch failed, the error of
/// the failing branch with the lowest input index is surfaced - positional
/// tie-break, not temporal: a branch that failed later in wall-clock time
/// still wins if it sits at a lower index. Either way, every branch runs to
/// completion before the aggregate settles.
///
/// `all` of an empty vector completes immediately with an empty vector.
///
/// # Examples
///
/// ```rust,ignore
/// use genflow::prelude::*;
///
/// let result = flow(all(vec![fetch(1), fetch(2), fetch(3)])).await;
/// // Ok(vec![v1, v2, v3]) or the error of the lowest-index failure.
/// ```
#[must_use]
pub fn all<E, V>(computations: Vec<Gen<E, V>>) -> Gen<E, Vec<V>>
where
    E: Send + 'static,
    V: Send + 'static,
{
    let branches = spawn_branches(computations);

    lift(move || async move {
        let outcomes = future::join_all(branches).await;

        let mut values = Vec::with_capacity(outcomes.len());
        let mut first_failure: Option<E> = None;

        for outcome in outcomes {
            match settled(outcome) {
                Ok(value) => values.push(value),
                Err(error) => {
                    if first_failure.is_none() {
                        first_failure = Some(error);
                    }
                }
            }
        }

        match first_failure {
            None => Ok(values),
            Some(error) => Err(error),
        }
    })
}

/// Runs every computation concurrently and mirrors whichever settles first.
///
/// The aggregate outcome is the first branch outcome in wall-clock order,
/// success or failure alike. Losing branches are not cancelled; they keep
/// running in the background and their outcomes are discarded.
///
/// # Panics
///
/// Panics if `computations` is empty - such a race could never settle.
///
/// # Examples
///
/// ```rust,ignore
/// use genflow::prelude::*;
///
/// // replica_b answers first, so its value wins.
/// let fastest = flow(race(vec![query(replica_a), query(replica_b)])).await;
/// ```
#[must_use]
pub fn race<E, V>(computations: Vec<Gen<E, V>>) -> Gen<E, V>
where
    E: Send + 'static,
    V: Send + 'static,
{
    assert!(
        !computations.is_empty(),
        "race requires at least one computation"
    );
    let branches = spawn_branches(computations);

    lift(move || async move {
        let (first, _index, _losers) = future::select_all(branches).await;
        settled(first)
    })
}
