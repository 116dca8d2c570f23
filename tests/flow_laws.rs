//! Property tests for composition and aggregate-ordering laws.

use genflow::prelude::*;
use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("test runtime")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // done(v).flat_map(f) == f(v)
    #[test]
    fn binding_a_pure_value_applies_the_continuation(value in any::<i32>()) {
        let result = runtime().block_on(flow(
            Gen::<&str, _>::done(value).flat_map(|v| Gen::done(v.wrapping_mul(3))),
        ));
        prop_assert_eq!(result, Ok(value.wrapping_mul(3)));
    }

    // fail(e).flat_map(f) == fail(e), whatever f is
    #[test]
    fn a_failure_ignores_any_continuation(error in "[a-z]{1,8}") {
        let result = runtime().block_on(flow(
            Gen::<String, i32>::fail(error.clone()).flat_map(|v| Gen::done(v + 1)),
        ));
        prop_assert_eq!(result, Err(error));
    }

    // identity(v) == done(v)
    #[test]
    fn identity_is_a_pure_completion(value in any::<i64>()) {
        let result = runtime().block_on(flow(identity::<&str, _>(value)));
        prop_assert_eq!(result, Ok(value));
    }

    // all() fails with the lowest-index failure, succeeds in input order
    #[test]
    fn all_aggregates_by_input_index(failures in proptest::collection::vec(any::<bool>(), 0..8)) {
        let expected_failure = failures.iter().position(|fails| *fails);
        let result = runtime().block_on(async {
            let branches: Vec<Gen<usize, usize>> = failures
                .iter()
                .enumerate()
                .map(|(index, fails)| {
                    if *fails {
                        Gen::fail(index)
                    } else {
                        Gen::done(index)
                    }
                })
                .collect();
            flow(all(branches)).await
        });

        match expected_failure {
            Some(index) => prop_assert_eq!(result, Err(index)),
            None => prop_assert_eq!(result, Ok((0..failures.len()).collect::<Vec<_>>())),
        }
    }

    // race of one computation mirrors it exactly
    #[test]
    fn race_of_one_is_that_computation(value in any::<i32>(), fails in any::<bool>()) {
        let result = runtime().block_on(async {
            let branch: Gen<i32, i32> = if fails {
                Gen::fail(value)
            } else {
                Gen::done(value)
            };
            flow(race(vec![branch])).await
        });

        if fails {
            prop_assert_eq!(result, Err(value));
        } else {
            prop_assert_eq!(result, Ok(value));
        }
    }
}
