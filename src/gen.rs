//! `Gen` - a lazily-evaluated, one-shot cooperative computation.
//!
//! `Gen<E, V>` describes a unit of work that, when driven, either completes
//! with a `V` or suspends with a payload for its driver (see
//! [`crate::step`]). Nothing runs until the computation is driven, so a
//! `Gen` can be built, passed around and composed freely; driving it
//! consumes it, which is how the "never reused once driven" rule of the
//! protocol is enforced. Restarting means rebuilding the computation, e.g.
//! by calling [`lift`] again.
//!
//! # Composition
//!
//! Chains are written with [`Gen::flat_map`] (or the
//! [`gen_flow!`](crate::gen_flow) macro on top of it), which delegates
//! transparently: the inner computation's suspensions are forwarded
//! unchanged to whichever driver ultimately owns the chain, and the
//! continuation only runs if the inner computation completed.
//!
//! ```rust,ignore
//! use genflow::prelude::*;
//!
//! #[derive(Debug, PartialEq)]
//! struct ParseFailed;
//!
//! let chain = lift(|| async { "21".parse::<i32>().map_err(|_| ParseFailed) })
//!     .flat_map(|n| Gen::done(n * 2));
//!
//! assert_eq!(flow(chain).await, Ok(42));
//! ```
//!
//! # Evaluation semantics
//!
//! `Gen::done` and `Gen::fail` hold an already-decided first step, so
//! composing on top of them happens immediately and without allocation.
//! Everything produced by [`Gen::new`], [`lift`] and [`lift_with`] is a
//! deferred, boxed step future that is only polled once a driver asks for
//! the first step.

use std::fmt;
use std::future::{Future, IntoFuture};

use futures::future::BoxFuture;

use crate::flow::flow;
use crate::step::Step;

// =============================================================================
// Gen
// =============================================================================

/// A suspendable computation with error type `E` and result type `V`.
///
/// See the [module documentation](self) for the composition model. A `Gen`
/// is inert until driven by [`flow`] (or awaited directly, which is the same
/// thing), and is consumed by driving it.
pub struct Gen<E, V> {
    state: State<E, V>,
}

/// Internal state: either the first step is already decided, or it has to be
/// computed asynchronously.
enum State<E, V> {
    /// An already-decided first step. Composing on top of this state is
    /// immediate and allocation-free.
    Ready(Step<E, V>),
    /// A deferred step. The boxed future is created eagerly but not polled
    /// until a driver requests the step.
    Pending(BoxFuture<'static, Step<E, V>>),
}

impl<E, V> Gen<E, V>
where
    E: Send + 'static,
    V: Send + 'static,
{
    // =========================================================================
    // Construction
    // =========================================================================

    /// A computation that completes with `value` without suspending.
    #[must_use]
    pub fn done(value: V) -> Self {
        Self {
            state: State::Ready(Step::Done(value)),
        }
    }

    /// A computation that suspends with `error` as its first and only step.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let failed: Gen<&str, i32> = Gen::fail("nope");
    /// assert_eq!(flow(failed).await, Err("nope"));
    /// ```
    #[must_use]
    pub fn fail(error: E) -> Self {
        Self {
            state: State::Ready(Step::Fail(error)),
        }
    }

    /// Lifts an infallible async thunk into a computation.
    ///
    /// The thunk is not invoked until the computation is driven, so side
    /// effects stay deferred:
    ///
    /// ```rust,ignore
    /// let computation: Gen<MyError, &str> = Gen::new(|| async {
    ///     tokio::time::sleep(Duration::from_millis(10)).await;
    ///     "delayed"
    /// });
    /// ```
    #[must_use]
    pub fn new<F, Fut>(thunk: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = V> + Send + 'static,
    {
        Self {
            state: State::Pending(Box::pin(async move { Step::Done(thunk().await) })),
        }
    }

    pub(crate) fn from_step(step: Step<E, V>) -> Self {
        Self {
            state: State::Ready(step),
        }
    }

    pub(crate) fn from_step_future(future: BoxFuture<'static, Step<E, V>>) -> Self {
        Self {
            state: State::Pending(future),
        }
    }

    // =========================================================================
    // Driving
    // =========================================================================

    /// Advances the computation to its first step, consuming it.
    ///
    /// This is the raw driver-side entry point. Application code normally
    /// goes through [`flow`], which also interprets [`Step::Defer`]
    /// registrations; a custom driver using `step` directly must honor the
    /// same contract (accumulate `Defer`, stop on `Fail`).
    pub async fn step(self) -> Step<E, V> {
        match self.state {
            State::Ready(step) => step,
            State::Pending(future) => future.await,
        }
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Transparent delegation: runs `self`, then feeds its value to
    /// `continuation`.
    ///
    /// Suspensions of `self` are forwarded unchanged to the owning driver:
    /// a `Fail` short-circuits the whole chain (the continuation never
    /// runs), and a `Defer` registration bubbles up with the rest of the
    /// chain attached behind it.
    #[must_use]
    pub fn flat_map<U, F>(self, continuation: F) -> Gen<E, U>
    where
        U: Send + 'static,
        F: FnOnce(V) -> Gen<E, U> + Send + 'static,
    {
        match self.state {
            State::Ready(step) => match step {
                Step::Done(value) => continuation(value),
                Step::Fail(error) => Gen::fail(error),
                Step::Defer(cleanup, rest) => Gen::from_step(Step::Defer(
                    cleanup,
                    Box::new(rest.flat_map(continuation)),
                )),
            },
            State::Pending(future) => Gen::from_step_future(Box::pin(async move {
                match future.await {
                    Step::Done(value) => continuation(value).step().await,
                    Step::Fail(error) => Step::Fail(error),
                    Step::Defer(cleanup, rest) => {
                        Step::Defer(cleanup, Box::new(rest.flat_map(continuation)))
                    }
                }
            })),
        }
    }

    /// Applies a function to the completion value.
    #[must_use]
    pub fn map<U, F>(self, function: F) -> Gen<E, U>
    where
        U: Send + 'static,
        F: FnOnce(V) -> U + Send + 'static,
    {
        self.flat_map(move |value| Gen::done(function(value)))
    }

    /// Runs `self`, discards its value and continues with `next`.
    #[must_use]
    pub fn then<U>(self, next: Gen<E, U>) -> Gen<E, U>
    where
        U: Send + 'static,
    {
        self.flat_map(move |_| next)
    }

    /// Maps the error of the whole computation into another error type.
    ///
    /// `self` is driven under its own inner [`flow`], so any cleanup
    /// registrations inside it are owned (and, on failure, fired) by that
    /// inner drive before the mapped error surfaces. This is the seam for
    /// widening a narrow error type, e.g. into an
    /// [`Either`](crate::either::Either), before composing with
    /// computations that fail differently.
    #[must_use]
    pub fn map_fail<E2, F>(self, function: F) -> Gen<E2, V>
    where
        E2: Send + 'static,
        F: FnOnce(E) -> E2 + Send + 'static,
    {
        lift_with(move || flow(self), function)
    }
}

impl<E: fmt::Debug, V: fmt::Debug> fmt::Debug for Gen<E, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Ready(step) => formatter.debug_tuple("Gen").field(step).finish(),
            State::Pending(_) => formatter.write_str("Gen(pending)"),
        }
    }
}

// =============================================================================
// IntoFuture
// =============================================================================

/// Awaiting a `Gen` drives it under [`flow`]:
///
/// ```rust,ignore
/// let value = lift(|| async { Ok::<_, MyError>(42) }).await;
/// assert_eq!(value, Ok(42));
/// ```
impl<E, V> IntoFuture for Gen<E, V>
where
    E: Send + 'static,
    V: Send + 'static,
{
    type Output = Result<V, E>;
    type IntoFuture = BoxFuture<'static, Result<V, E>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(flow(self))
    }
}

// =============================================================================
// Adapters
// =============================================================================

/// Lifts an ordinary fallible async call into a computation.
///
/// If the callback's future resolves to `Ok(value)` the computation
/// completes with `value` and no suspension occurs; if it resolves to
/// `Err(error)` the computation suspends once with `error` and is finished.
/// The error passes through unchanged; use [`lift_with`] to translate it.
///
/// The callback is not invoked until the computation is driven.
///
/// # Examples
///
/// ```rust,ignore
/// async fn fetch_user(id: u64) -> Result<User, DbError> { /* ... */ }
///
/// let computation = lift(move || fetch_user(7));
/// match flow(computation).await {
///     Ok(user) => println!("{user:?}"),
///     Err(DbError::NotFound) => println!("no such user"),
///     Err(other) => println!("db failed: {other}"),
/// }
/// ```
#[must_use]
pub fn lift<F, Fut, V, E>(callback: F) -> Gen<E, V>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<V, E>> + Send + 'static,
    E: Send + 'static,
    V: Send + 'static,
{
    lift_with(callback, core::convert::identity)
}

/// Like [`lift`], but translates the callback's error through `map_error`
/// before it enters the suspension channel.
///
/// This is the seam where untyped or foreign failures become domain errors:
///
/// ```rust,ignore
/// #[derive(Debug, PartialEq)]
/// enum AppError {
///     Parse(std::num::ParseIntError),
/// }
///
/// let computation = lift_with(
///     || async { "not a number".parse::<i32>() },
///     AppError::Parse,
/// );
/// assert!(matches!(flow(computation).await, Err(AppError::Parse(_))));
/// ```
#[must_use]
pub fn lift_with<F, Fut, M, V, E0, E>(callback: F, map_error: M) -> Gen<E, V>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<V, E0>> + Send + 'static,
    M: FnOnce(E0) -> E + Send + 'static,
    E0: Send + 'static,
    E: Send + 'static,
    V: Send + 'static,
{
    Gen::from_step_future(Box::pin(async move {
        match callback().await {
            Ok(value) => Step::Done(value),
            Err(error) => Step::Fail(map_error(error)),
        }
    }))
}
