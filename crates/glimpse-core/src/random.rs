//! Random source abstraction and the palette draw primitives built on it.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::diagnostics::{Fallback, FallbackLog};
use crate::palette::{Color, Shape};

/// Source of uniform randomness.
///
/// Only [`RandomSource::uniform`] is required; the derived helpers can be
/// overridden by sources that have faster native equivalents.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`
    fn uniform(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        let scaled = (self.uniform() * len as f64) as usize;
        scaled.min(len.saturating_sub(1))
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.uniform() < probability
    }

    /// In-place Fisher-Yates shuffle
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}

/// [`RandomSource`] backed by `rand`'s `StdRng`
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Seed from the operating system's entropy source
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic source for replays and tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl RandomSource for StdRandom {
    fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

/// Draw helper that pairs a random source with the fallback counters.
///
/// All generators draw through a `Picker` so that every degraded draw is
/// recorded in one place.
#[derive(Debug, Clone)]
pub struct Picker<R> {
    rng: R,
    fallbacks: FallbackLog,
}

impl<R: RandomSource> Picker<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            fallbacks: FallbackLog::new(),
        }
    }

    pub fn fallbacks(&self) -> &FallbackLog {
        &self.fallbacks
    }

    pub fn record(&mut self, kind: Fallback) {
        self.fallbacks.record(kind);
    }

    pub fn uniform(&mut self) -> f64 {
        self.rng.uniform()
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.chance(probability)
    }

    pub fn index(&mut self, len: usize) -> usize {
        self.rng.index(len)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        self.rng.shuffle(items);
    }

    pub fn shuffled<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        self.rng.shuffle(&mut out);
        out
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.rng.index(items.len())])
        }
    }

    /// Pick one colour from the palette minus `exclude`.
    ///
    /// Falls back to the first palette colour when everything is excluded.
    pub fn pick_color(&mut self, exclude: &[Color]) -> Color {
        match self.pick_color_from(&Color::ALL, exclude) {
            Some(color) => color,
            None => {
                self.record(Fallback::ColorPaletteExhausted);
                Color::ALL[0]
            }
        }
    }

    /// Pick one colour from `pool` minus `exclude`, or `None` if nothing is left
    pub fn pick_color_from(&mut self, pool: &[Color], exclude: &[Color]) -> Option<Color> {
        let eligible: Vec<Color> = pool
            .iter()
            .copied()
            .filter(|c| !exclude.contains(c))
            .collect();
        self.choose(&eligible).copied()
    }

    /// Pick one shape from the shape set minus `exclude`.
    ///
    /// Falls back to the first shape when everything is excluded.
    pub fn pick_shape(&mut self, exclude: &[Shape]) -> Shape {
        let eligible: Vec<Shape> = Shape::ALL
            .iter()
            .copied()
            .filter(|s| !exclude.contains(s))
            .collect();
        match self.choose(&eligible) {
            Some(shape) => *shape,
            None => {
                self.record(Fallback::ShapeSetExhausted);
                Shape::ALL[0]
            }
        }
    }

    /// `n` colours without duplicates among themselves or with `exclude`.
    ///
    /// When fewer than `n` colours are eligible the shuffled eligible set is
    /// cycled to pad the result, so duplicates only appear in that case.
    pub fn pick_distinct_colors(&mut self, n: usize, exclude: &[Color]) -> Vec<Color> {
        self.distinct(&Color::ALL, n, exclude, Fallback::ColorsPadded)
    }

    /// `n` shapes without duplicates among themselves or with `exclude`.
    ///
    /// Pads by cycling like [`Picker::pick_distinct_colors`].
    pub fn pick_distinct_shapes(&mut self, n: usize, exclude: &[Shape]) -> Vec<Shape> {
        self.distinct(&Shape::ALL, n, exclude, Fallback::ShapesPadded)
    }

    fn distinct<T: Copy + PartialEq>(
        &mut self,
        all: &[T],
        n: usize,
        exclude: &[T],
        padded: Fallback,
    ) -> Vec<T> {
        if n == 0 {
            return Vec::new();
        }

        let mut eligible: Vec<T> = all.iter().copied().filter(|v| !exclude.contains(v)).collect();
        if eligible.is_empty() {
            self.record(padded);
            eligible = all.to_vec();
        }
        self.rng.shuffle(&mut eligible);

        if eligible.len() >= n {
            eligible.truncate(n);
            return eligible;
        }

        self.record(padded);
        (0..n).map(|i| eligible[i % eligible.len()]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn picker(seed: u64) -> Picker<StdRandom> {
        Picker::new(StdRandom::seeded(seed))
    }

    #[test]
    fn test_seeded_sources_are_reproducible() {
        let mut a = StdRandom::seeded(7);
        let mut b = StdRandom::seeded(7);
        for _ in 0..32 {
            assert_eq!(a.uniform(), b.uniform());
        }
    }

    #[test]
    fn test_default_index_stays_in_range() {
        struct Max;
        impl RandomSource for Max {
            fn uniform(&mut self) -> f64 {
                0.999_999_999
            }
        }
        let mut max = Max;
        assert_eq!(max.index(3), 2);
        assert_eq!(max.index(1), 0);
    }

    #[test]
    fn test_default_shuffle_is_permutation() {
        struct Half;
        impl RandomSource for Half {
            fn uniform(&mut self) -> f64 {
                0.5
            }
        }
        let mut items = vec![1, 2, 3, 4, 5, 6];
        Half.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_pick_color_respects_exclude() {
        let mut p = picker(1);
        let exclude = [Color::Red, Color::Blue, Color::Green];
        for _ in 0..200 {
            assert!(!exclude.contains(&p.pick_color(&exclude)));
        }
        assert!(p.fallbacks().is_empty());
    }

    #[test]
    fn test_pick_color_fallback_when_exhausted() {
        let mut p = picker(2);
        assert_eq!(p.pick_color(&Color::ALL), Color::Red);
        assert_eq!(p.fallbacks().count(Fallback::ColorPaletteExhausted), 1);

        assert_eq!(p.pick_shape(&Shape::ALL), Shape::Square);
        assert_eq!(p.fallbacks().count(Fallback::ShapeSetExhausted), 1);
    }

    #[test]
    fn test_pick_distinct_colors_without_duplicates() {
        let mut p = picker(3);
        for exclude_len in 0..=4 {
            let exclude: Vec<Color> = Color::ALL[..exclude_len].to_vec();
            for n in 0..=(8 - exclude_len) {
                let colors = p.pick_distinct_colors(n, &exclude);
                assert_eq!(colors.len(), n);
                let unique: HashSet<_> = colors.iter().collect();
                assert_eq!(unique.len(), n);
                assert!(colors.iter().all(|c| !exclude.contains(c)));
            }
        }
        assert!(p.fallbacks().is_empty());
    }

    #[test]
    fn test_pick_distinct_shapes_pads_when_undersupplied() {
        let mut p = picker(4);
        let shapes = p.pick_distinct_shapes(7, &[Shape::Star]);
        assert_eq!(shapes.len(), 7);
        assert!(!shapes.contains(&Shape::Star));
        // cycling a shuffled set of four never repeats back to back
        for pair in shapes.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
        assert_eq!(p.fallbacks().count(Fallback::ShapesPadded), 1);
    }

    #[test]
    fn test_pick_distinct_when_everything_excluded() {
        let mut p = picker(5);
        let colors = p.pick_distinct_colors(2, &Color::ALL);
        assert_eq!(colors.len(), 2);
        assert!(p.fallbacks().count(Fallback::ColorsPadded) >= 1);
    }

    #[test]
    fn test_choose_empty_is_none() {
        let mut p = picker(6);
        let empty: [u8; 0] = [];
        assert!(p.choose(&empty).is_none());
        assert_eq!(p.choose(&[9]), Some(&9));
    }
}
