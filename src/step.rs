//! The suspension protocol between a computation and its driver.
//!
//! A [`Gen`](crate::r#gen::Gen) advances by producing a [`Step`]: either it
//! finished with a value, or it suspended and handed a payload to the driver.
//! Two payloads share the suspension channel, and they are distinct enum
//! variants rather than a runtime tag check, so an application error can
//! never be mistaken for a cleanup registration:
//!
//! - [`Step::Fail`] carries a domain error. It is decisive: there is no
//!   continuation to resume, so "the driver never resumes after an error"
//!   holds by construction.
//! - [`Step::Defer`] carries a [`Cleanup`] registration plus the rest of the
//!   computation. The driver stores the registration and resumes the
//!   continuation transparently.
//!
//! Most code never touches this module directly: [`flow`](crate::flow::flow)
//! is the canonical driver, and [`errdefer`](crate::errdefer::errdefer) is
//! the only producer of `Defer` steps. The types are public so custom
//! drivers can be written against the same contract.

use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;

/// The outcome of advancing a cooperative computation by one step.
///
/// Produced by [`Gen::step`](crate::r#gen::Gen::step) and interpreted by the
/// driver loop in [`flow`](crate::flow::flow).
pub enum Step<E, V> {
    /// The computation finished with a value. No suspension occurred.
    Done(V),
    /// The computation suspended with a domain error. This is final: the
    /// computation carries no continuation and cannot be resumed.
    Fail(E),
    /// The computation registered a cleanup callback and expects to be
    /// resumed. The boxed computation is everything that comes after the
    /// registration point.
    Defer(Cleanup<E>, Box<crate::r#gen::Gen<E, V>>),
}

impl<E: fmt::Debug, V: fmt::Debug> fmt::Debug for Step<E, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done(value) => formatter.debug_tuple("Done").field(value).finish(),
            Self::Fail(error) => formatter.debug_tuple("Fail").field(error).finish(),
            Self::Defer(..) => formatter.write_str("Defer(..)"),
        }
    }
}

/// A cleanup callback registered through
/// [`errdefer`](crate::errdefer::errdefer), waiting for the driver to decide
/// whether the run failed.
///
/// Owned by exactly one driver run. If that run fails, the driver invokes
/// every registration in order, passing the triggering error by reference
/// and awaiting each callback before the next. If the run succeeds the
/// registration is dropped without firing.
///
/// Applications never build a `Cleanup` directly; the constructors are
/// crate-internal on purpose so the suspension channel stays unambiguous.
pub struct Cleanup<E> {
    callback: Box<dyn for<'a> FnOnce(&'a E) -> BoxFuture<'static, ()> + Send>,
}

impl<E> Cleanup<E> {
    pub(crate) fn new<F, Fut>(callback: F) -> Self
    where
        F: FnOnce(&E) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            callback: Box::new(move |error: &E| {
                let invoked: BoxFuture<'static, ()> = Box::pin(callback(error));
                invoked
            }),
        }
    }

    /// Invokes the callback with the error that terminated the run. The
    /// callback itself runs synchronously; what comes back is an owned
    /// future, so awaiting it holds no borrow of the error.
    pub(crate) fn run(self, error: &E) -> BoxFuture<'static, ()> {
        (self.callback)(error)
    }
}

impl<E> fmt::Debug for Cleanup<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Cleanup(..)")
    }
}
