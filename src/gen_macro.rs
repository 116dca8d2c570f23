//! Do-notation macro for writing flow chains.
//!
//! `gen_flow!` turns a nested [`flat_map`](crate::r#gen::Gen::flat_map) chain
//! into straight-line steps. `<=` is the bind operator (`<-` cannot be
//! matched by Rust macros): the pattern on the left receives the value of
//! the computation on the right, and any suspension short-circuits the rest
//! of the block. The final expression is the tail of the chain and must be
//! a [`Gen`](crate::r#gen::Gen).
//!
//! ```rust,ignore
//! use genflow::prelude::*;
//!
//! let chain = gen_flow! {
//!     user <= load_user(request.user_id);
//!     _ <= errdefer(move |_e: &ApiError| audit_rollback(request.id));
//!     let greeting = format!("hello {}", user.name);
//!     token <= issue_token(user);
//!     Gen::done((greeting, token))
//! };
//! let result = flow(chain).await;
//! ```

/// Do-notation for [`Gen`](crate::r#gen::Gen) chains.
///
/// - `pattern <= computation;` binds the computation's value
/// - `let pattern = expr;` is an ordinary let binding
/// - the final expression is the chain tail and must be a `Gen`
#[macro_export]
macro_rules! gen_flow {
    // Terminal case: the tail of the chain.
    ($tail:expr) => {
        $tail
    };

    // Bind with identifier pattern: `name <= computation; rest`
    ($pattern:ident <= $computation:expr ; $($rest:tt)+) => {
        $computation.flat_map(move |$pattern| {
            $crate::gen_flow!($($rest)+)
        })
    };

    // Bind with tuple pattern: `(a, b) <= computation; rest`
    (($($pattern:tt)*) <= $computation:expr ; $($rest:tt)+) => {
        $computation.flat_map(move |($($pattern)*)| {
            $crate::gen_flow!($($rest)+)
        })
    };

    // Bind with wildcard pattern: `_ <= computation; rest`
    (_ <= $computation:expr ; $($rest:tt)+) => {
        $computation.flat_map(move |_| {
            $crate::gen_flow!($($rest)+)
        })
    };

    // Pure let binding: `let name = expr; rest`
    (let $pattern:ident = $expr:expr ; $($rest:tt)+) => {
        {
            let $pattern = $expr;
            $crate::gen_flow!($($rest)+)
        }
    };

    // Pure let binding with tuple pattern: `let (a, b) = expr; rest`
    (let ($($pattern:tt)*) = $expr:expr ; $($rest:tt)+) => {
        {
            let ($($pattern)*) = $expr;
            $crate::gen_flow!($($rest)+)
        }
    };

    // Pure let binding with type annotation: `let name: Type = expr; rest`
    (let $pattern:ident : $ty:ty = $expr:expr ; $($rest:tt)+) => {
        {
            let $pattern: $ty = $expr;
            $crate::gen_flow!($($rest)+)
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::flow::flow;
    use crate::r#gen::Gen;

    #[tokio::test]
    async fn single_bind() {
        let chain = gen_flow! {
            x <= Gen::<&str, _>::done(5);
            Gen::done(x * 2)
        };
        assert_eq!(flow(chain).await, Ok(10));
    }

    #[tokio::test]
    async fn bind_with_let_and_tuple() {
        let chain = gen_flow! {
            (x, y) <= Gen::<&str, _>::done((3, 4));
            let sum = x + y;
            z <= Gen::done(sum * 10);
            Gen::done(z + 1)
        };
        assert_eq!(flow(chain).await, Ok(71));
    }

    #[tokio::test]
    async fn let_with_type_annotation() {
        let chain = gen_flow! {
            x <= Gen::<&str, _>::done(200u8);
            let widened: u32 = u32::from(x) * 300;
            Gen::done(widened)
        };
        assert_eq!(flow(chain).await, Ok(60_000));
    }

    #[tokio::test]
    async fn failure_short_circuits_rest() {
        let chain = gen_flow! {
            x <= Gen::done(1);
            _ <= Gen::<&str, ()>::fail("boom");
            Gen::done(x + 1)
        };
        assert_eq!(flow(chain).await, Err("boom"));
    }
}
