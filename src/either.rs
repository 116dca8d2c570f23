//! `Either` - a value of one of two types.
//!
//! Used by this crate to widen error channels: a computation wrapped in
//! [`timeout`](crate::timeout::timeout) fails with
//! `Either<E, TimeoutError>`, where `Left` is the source's own error and
//! `Right` is the elapsed deadline. Consumers match exhaustively:
//!
//! ```rust,ignore
//! match flow(timeout(limit, fetch())).await {
//!     Ok(value) => handle(value),
//!     Err(Either::Left(fetch_error)) => retry_later(fetch_error),
//!     Err(Either::Right(timed_out)) => report_slow(timed_out.timeout),
//! }
//! ```

/// A value that is either `Left(L)` or `Right(R)`.
///
/// By this crate's convention in error positions, `Left` carries the inner
/// computation's error and `Right` carries the combinator's own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Either<L, R> {
    /// The left alternative.
    Left(L),
    /// The right alternative.
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Returns `true` if this is a `Left` value.
    #[inline]
    pub const fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    /// Returns `true` if this is a `Right` value.
    #[inline]
    pub const fn is_right(&self) -> bool {
        matches!(self, Self::Right(_))
    }

    /// Consumes the value, returning `Some` for `Left`.
    #[inline]
    pub fn left(self) -> Option<L> {
        match self {
            Self::Left(value) => Some(value),
            Self::Right(_) => None,
        }
    }

    /// Consumes the value, returning `Some` for `Right`.
    #[inline]
    pub fn right(self) -> Option<R> {
        match self {
            Self::Left(_) => None,
            Self::Right(value) => Some(value),
        }
    }

    /// Returns a reference to the left value, if present.
    #[inline]
    pub const fn left_ref(&self) -> Option<&L> {
        match self {
            Self::Left(value) => Some(value),
            Self::Right(_) => None,
        }
    }

    /// Returns a reference to the right value, if present.
    #[inline]
    pub const fn right_ref(&self) -> Option<&R> {
        match self {
            Self::Left(_) => None,
            Self::Right(value) => Some(value),
        }
    }

    /// Applies a function to the left value, leaving a `Right` untouched.
    #[inline]
    pub fn map_left<T, F: FnOnce(L) -> T>(self, function: F) -> Either<T, R> {
        match self {
            Self::Left(value) => Either::Left(function(value)),
            Self::Right(value) => Either::Right(value),
        }
    }

    /// Applies a function to the right value, leaving a `Left` untouched.
    #[inline]
    pub fn map_right<T, F: FnOnce(R) -> T>(self, function: F) -> Either<L, T> {
        match self {
            Self::Left(value) => Either::Left(value),
            Self::Right(value) => Either::Right(function(value)),
        }
    }

    /// Collapses the value with one function per side.
    #[inline]
    pub fn fold<T>(self, on_left: impl FnOnce(L) -> T, on_right: impl FnOnce(R) -> T) -> T {
        match self {
            Self::Left(value) => on_left(value),
            Self::Right(value) => on_right(value),
        }
    }
}
