//! Sequencing many `Either` values into one.
//!
//! Both [`sequence`] and [`traverse`] scan their input in iteration order and
//! stop at the first `Left`; elements after it are never pulled from the
//! iterator, so lazily produced inputs are not evaluated past the failure.
//!
//! # Examples
//!
//! ```rust
//! use eitherway::control::{Either, sequence, traverse};
//!
//! let all_right: Vec<Either<String, i32>> = vec![Either::Right(1), Either::Right(2)];
//! assert_eq!(sequence(all_right), Either::Right(vec![1, 2]));
//!
//! let parsed = traverse(["1", "x", "3"], |text| {
//!     Either::from(text.parse::<i32>()).map_left(|_| format!("bad input: {text}"))
//! });
//! assert_eq!(parsed, Either::Left("bad input: x".to_string()));
//! ```

use super::Either;

/// Collects the right values of `values` in order, or returns the first `Left`.
pub fn sequence<L, R, I>(values: I) -> Either<L, Vec<R>>
where
    I: IntoIterator<Item = Either<L, R>>,
{
    values.into_iter().collect()
}

/// Maps every element through `mapper` and sequences the results.
///
/// Equivalent to `sequence(values.into_iter().map(mapper))`, with `mapper`
/// never called for elements after the first `Left`.
pub fn traverse<T, L, R, I, F>(values: I, mapper: F) -> Either<L, Vec<R>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> Either<L, R>,
{
    values.into_iter().map(mapper).collect()
}

impl<L, R, C> FromIterator<Either<L, R>> for Either<L, C>
where
    C: FromIterator<R>,
{
    fn from_iter<I: IntoIterator<Item = Either<L, R>>>(iterator: I) -> Self {
        let mut failure = None;
        let collected = iterator
            .into_iter()
            .map_while(|element| match element {
                Either::Right(value) => Some(value),
                Either::Left(error) => {
                    failure = Some(error);
                    None
                }
            })
            .collect();
        match failure {
            Some(error) => Self::Left(error),
            None => Self::Right(collected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;
    use std::collections::BTreeSet;

    #[rstest]
    fn sequence_stops_at_first_left() {
        let produced = Cell::new(0);
        let inputs = [Either::Right(1), Either::Right(2), Either::Left("e"), Either::Right(3)];
        let generator = inputs.into_iter().inspect(|_| produced.set(produced.get() + 1));

        assert_eq!(sequence(generator), Either::Left("e"));
        assert_eq!(produced.get(), 3);
    }

    #[rstest]
    fn sequence_preserves_order() {
        let inputs: Vec<Either<&str, i32>> = vec![Either::Right(3), Either::Right(1), Either::Right(2)];
        assert_eq!(sequence(inputs), Either::Right(vec![3, 1, 2]));
    }

    #[rstest]
    fn sequence_of_nothing_is_empty_right() {
        let inputs: Vec<Either<&str, i32>> = Vec::new();
        assert_eq!(sequence(inputs), Either::Right(Vec::new()));
    }

    #[rstest]
    fn traverse_does_not_map_past_failure() {
        let calls = Cell::new(0);
        let result = traverse(1..=5, |value| {
            calls.set(calls.get() + 1);
            if value == 2 {
                Either::Left(format!("rejected {value}"))
            } else {
                Either::Right(value * 10)
            }
        });
        assert_eq!(result, Either::Left("rejected 2".to_string()));
        assert_eq!(calls.get(), 2);
    }

    #[rstest]
    fn collect_into_other_containers() {
        let collected: Either<&str, BTreeSet<i32>> =
            [Either::Right(2), Either::Right(1), Either::Right(2)].into_iter().collect();
        assert_eq!(collected, Either::Right(BTreeSet::from([1, 2])));
    }
}
