//! Trivial computations for type anchoring and unreachable branches.

use crate::r#gen::Gen;

/// A computation that does nothing and completes with `()`.
///
/// Useful as a type-inference anchor when a chain needs its error type
/// pinned without doing any work:
///
/// ```rust,ignore
/// let anchored = noop::<ApiError>().then(Gen::done(42));
/// ```
#[must_use]
pub fn noop<E>() -> Gen<E, ()>
where
    E: Send + 'static,
{
    Gen::done(())
}

/// A computation that completes with `value` unchanged, routed through
/// [`noop`] so the error type can be anchored the same way.
#[must_use]
pub fn identity<E, V>(value: V) -> Gen<E, V>
where
    E: Send + 'static,
    V: Send + 'static,
{
    noop().flat_map(move |()| Gen::done(value))
}

/// Asserts that a branch of control flow is unreachable.
///
/// Reaching it is a broken composition invariant (a protocol violation,
/// not a recoverable error) and crashes rather than being swallowed.
///
/// # Panics
///
/// Always.
pub fn never() -> ! {
    panic!("entered a flow branch marked as unreachable")
}
