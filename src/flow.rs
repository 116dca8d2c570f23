//! Drivers: run a computation to its decisive step and return a `Result`.
//!
//! [`flow`] is the entry point of the whole crate. It owns one driver run:
//! it asks the computation for steps, stores cleanup registrations as they
//! appear, and converts the decisive step into `Ok(value)` or `Err(error)`.
//! Expected failures never cross the boundary as panics; callers branch on
//! the returned `Result` and the error type is the exact union of what the
//! chain can yield.
//!
//! ```rust,ignore
//! use genflow::prelude::*;
//!
//! let result = flow(gen_flow! {
//!     a <= service_a();
//!     b <= service_b(a);
//!     Gen::done(b)
//! })
//! .await;
//!
//! match result {
//!     Ok(value) => { /* value of service_b */ }
//!     Err(error) => { /* error of service_a or service_b */ }
//! }
//! ```

use std::fmt;

use futures::future::BoxFuture;
use smallvec::SmallVec;

use crate::r#gen::Gen;
use crate::step::{Cleanup, Step};

/// Inline capacity for the per-run cleanup list; chains rarely register
/// more than a handful.
type Cleanups<E> = SmallVec<[Cleanup<E>; 4]>;

/// Runs one computation to completion or to its first error.
///
/// For a computation that never suspends, exactly one step is requested and
/// its value is returned as `Ok`. A [`Step::Fail`] ends the run: every
/// cleanup registered so far is invoked in registration order, each awaited
/// before the next, with the triggering error passed by reference, and the
/// error is then returned as `Err` unchanged. A [`Step::Defer`] is stored
/// and the computation resumed transparently; on success the stored
/// cleanups are dropped without firing.
///
/// # Errors
///
/// Returns the first error the chain suspended with.
pub async fn flow<E, V>(computation: Gen<E, V>) -> Result<V, E>
where
    E: Send + 'static,
    V: Send + 'static,
{
    let mut current = computation;
    let mut cleanups: Cleanups<E> = SmallVec::new();

    loop {
        match current.step().await {
            Step::Done(value) => return Ok(value),
            Step::Fail(error) => {
                for cleanup in cleanups {
                    let invoked = cleanup.run(&error);
                    invoked.await;
                }
                return Err(error);
            }
            Step::Defer(cleanup, rest) => {
                cleanups.push(cleanup);
                current = *rest;
            }
        }
    }
}

/// Turns a computation factory into a reusable callable that applies
/// [`flow`] per invocation.
///
/// Factories taking several arguments take them as one tuple:
///
/// ```rust,ignore
/// let divide = wrap_flow(|(num, den): (i32, i32)| safe_divide(num, den));
///
/// assert_eq!(divide((10, 2)).await, Ok(5));
/// assert_eq!(divide((10, 0)).await, Err(DivisionByZero));
/// ```
pub fn wrap_flow<Args, E, V, F>(factory: F) -> impl Fn(Args) -> BoxFuture<'static, Result<V, E>>
where
    F: Fn(Args) -> Gen<E, V>,
    E: Send + 'static,
    V: Send + 'static,
{
    move |args| Box::pin(flow(factory(args)))
}

/// Runs [`flow`] and unwraps the value, panicking on failure.
///
/// Only for call sites with no structured story for the error (tooling,
/// scaffolding, tests of infallible chains). The panic message carries the
/// domain error so it stays inspectable in the crash output.
///
/// # Panics
///
/// Panics if the computation suspends with an error.
pub async fn unsafe_flow_or_panic<E, V>(computation: Gen<E, V>) -> V
where
    E: fmt::Debug + Send + 'static,
    V: Send + 'static,
{
    match flow(computation).await {
        Ok(value) => value,
        Err(error) => panic!("unwrapping a failed flow: {error:?}"),
    }
}
