//! Option-set builders.
//!
//! Every builder starts from the correct answer, adds distractors from the
//! `preferred` candidates first and the wider `pool` second, skips anything in
//! `excluded` (other values that would also be correct) and shuffles.

use std::ops::RangeInclusive;

use crate::diagnostics::Fallback;
use crate::random::{Picker, RandomSource};

pub(crate) fn distinct_options<T, R>(
    p: &mut Picker<R>,
    correct: T,
    preferred: &[T],
    pool: &[T],
    excluded: &[T],
    n: usize,
) -> Vec<T>
where
    T: Copy + PartialEq,
    R: RandomSource,
{
    let mut options = vec![correct];
    let preferred = p.shuffled(preferred);
    let pool = p.shuffled(pool);

    for candidate in preferred.into_iter().chain(pool) {
        if options.len() >= n {
            break;
        }
        if !options.contains(&candidate) && !excluded.contains(&candidate) {
            options.push(candidate);
        }
    }

    if options.len() < n {
        p.record(Fallback::OptionsShort);
    }
    p.shuffle(&mut options);
    options
}

/// Numeric options clustered around `correct` inside `range`
pub(crate) fn number_options<R: RandomSource>(
    p: &mut Picker<R>,
    correct: u32,
    range: RangeInclusive<u32>,
    excluded: &[u32],
    n: usize,
) -> Vec<u32> {
    let spread = n.saturating_sub(1) as u32;
    let lo = correct.saturating_sub(spread).max(*range.start());
    let hi = correct.saturating_add(spread).min(*range.end());
    let near: Vec<u32> = (lo..=hi).collect();
    let all: Vec<u32> = range.collect();
    distinct_options(p, correct, &near, &all, excluded, n)
}
