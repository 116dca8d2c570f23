//! # genflow
//!
//! Typed, suspendable error-handling flows: a structured alternative to
//! "throw and hope" built on one-shot cooperative computations.
//!
//! ## Overview
//!
//! A [`Gen`](r#gen::Gen) describes a fallible async step. Chains of steps are
//! composed with [`flat_map`](r#gen::Gen::flat_map) (or the [`gen_flow!`]
//! macro) and run by the [`flow`](flow::flow) driver, which returns a plain
//! `Result`: run the steps in sequence, short-circuit on the first error,
//! collect the final value or that error. Every error a chain can produce
//! is part of the chain's type; nothing throws across an expected-failure
//! path.
//!
//! - **Adapter**: [`lift`](r#gen::lift) / [`lift_with`](r#gen::lift_with) turn
//!   ordinary `Result`-returning async calls into computations.
//! - **Drivers**: [`flow`](flow::flow), [`wrap_flow`](flow::wrap_flow),
//!   [`unsafe_flow_or_panic`](flow::unsafe_flow_or_panic).
//! - **Combinators**: [`all`](join::all), [`race`](join::race),
//!   [`timeout`](timeout::timeout).
//! - **Scoped cleanup**: [`errdefer`](errdefer::errdefer) registers
//!   callbacks that fire only if the chain fails.
//!
//! ## Example
//!
//! ```rust,ignore
//! use genflow::prelude::*;
//! use std::time::Duration;
//!
//! #[derive(Debug, PartialEq)]
//! enum AppError {
//!     Db(DbError),
//!     Quota,
//! }
//!
//! let result = flow(gen_flow! {
//!     user <= lift_with(move || load_user(id), AppError::Db);
//!     _ <= errdefer(move |_e: &AppError| metrics_rollback(id));
//!     quota <= lift(move || check_quota(user.plan));
//!     Gen::done((user, quota))
//! })
//! .await;
//!
//! match result {
//!     Ok((user, quota)) => { /* ... */ }
//!     Err(AppError::Db(db)) => { /* ... */ }
//!     Err(AppError::Quota) => { /* ... */ }
//! }
//! ```
//!
//! ## Concurrency model
//!
//! Everything is cooperative interleaving on the tokio runtime; there is no
//! preemption between suspension points and no shared mutable state beyond
//! the per-run cleanup list owned by a single driver invocation.
//! [`all`](join::all) and [`race`](join::race) start their branches eagerly
//! and never cancel siblings; [`timeout`](timeout::timeout) is the one
//! primitive that releases a pending timer when its race settles.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod either;
pub mod errdefer;
pub mod flow;
pub mod r#gen;
mod gen_macro;
pub mod helpers;
pub mod join;
pub mod step;
pub mod timeout;

/// Prelude module for convenient imports.
///
/// ```rust
/// use genflow::prelude::*;
/// ```
pub mod prelude {
    pub use crate::either::Either;
    pub use crate::errdefer::{errdefer, errdefer_async};
    pub use crate::flow::{flow, unsafe_flow_or_panic, wrap_flow};
    pub use crate::r#gen::{Gen, lift, lift_with};
    pub use crate::gen_flow;
    pub use crate::helpers::{identity, never, noop};
    pub use crate::join::{all, race};
    pub use crate::step::{Cleanup, Step};
    pub use crate::timeout::{TimeoutError, timeout};
}
