//! Scoped cleanup: register callbacks that fire only if the chain fails.
//!
//! `errdefer` is the "undo on failure" primitive. A chain that acquires
//! long-lived resources step by step registers one cleanup after each
//! acquisition; if a later step fails, the owning [`flow`] run invokes the
//! callbacks in registration order (oldest first), each awaited before the
//! next, with the error that ended the run. If the chain completes, nothing
//! fires and the registrations are dropped.
//!
//! In the chain itself a registration is a no-op step: it suspends once to
//! hand the callback to the driver and resumes immediately with `()`.
//!
//! ```rust,ignore
//! use genflow::prelude::*;
//!
//! let chain = gen_flow! {
//!     session <= open_session();
//!     _ <= errdefer(move |_error: &ApiError| drop_session(session_id));
//!     profile <= load_profile(session);
//!     Gen::done(profile)
//! };
//! // load_profile failing closes the session; success leaves it open.
//! ```
//!
//! [`flow`]: crate::flow::flow

use std::future::Future;

use crate::r#gen::Gen;
use crate::step::{Cleanup, Step};

/// Registers a synchronous cleanup with the enclosing driver run.
///
/// The callback receives the error that terminated the run by reference.
/// Registration order is invocation order.
pub fn errdefer<E, F>(callback: F) -> Gen<E, ()>
where
    E: Send + 'static,
    F: FnOnce(&E) + Send + 'static,
{
    errdefer_async(move |error: &E| {
        callback(error);
        std::future::ready(())
    })
}

/// Registers an asynchronous cleanup with the enclosing driver run.
///
/// The callback inspects the error by reference and returns an owned
/// future; anything the cleanup needs beyond that moment must be cloned
/// into it. The driver awaits each cleanup before invoking the next, so
/// cleanup side effects are strictly sequential.
///
/// ```rust,ignore
/// let release = errdefer_async(move |_error: &ApiError| {
///     let pool = pool.clone();
///     async move { pool.release(lease_id).await }
/// });
/// ```
pub fn errdefer_async<E, F, Fut>(callback: F) -> Gen<E, ()>
where
    E: Send + 'static,
    F: FnOnce(&E) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Gen::from_step(Step::Defer(Cleanup::new(callback), Box::new(Gen::done(()))))
}
