//! Counters for the silent fallback paths taken during generation.
//!
//! Generation is total: an exhausted palette or a question variant whose
//! precondition fails never surfaces as an error. Each such event is counted
//! here instead so balancing tools can see how often it happens.

use std::collections::BTreeMap;

use serde::Serialize;
use strum::{Display, IntoStaticStr};
use tracing::debug;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, IntoStaticStr, Display,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Fallback {
    /// `pick_color` had every colour excluded and returned the first palette entry
    ColorPaletteExhausted,
    /// `pick_shape` had every shape excluded and returned the first shape
    ShapeSetExhausted,
    /// A distinct colour draw was padded by cycling the eligible set
    ColorsPadded,
    /// A distinct shape draw was padded by cycling the eligible set
    ShapesPadded,
    /// A mismatch round ran out of strict colours and used neutral filler
    NeutralFiller,
    /// Fewer distractors than requested were available
    OptionsShort,
    /// A chosen question variant could not be computed from the payload
    VariantFailed,
    /// No question variant could be computed at all
    NoQuestion,
}

/// Running tally of fallbacks, keyed by kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FallbackLog {
    counts: BTreeMap<Fallback, u32>,
}

impl FallbackLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: Fallback) {
        let count = self.counts.entry(kind).or_insert(0);
        *count += 1;
        debug!("Fallback taken: {} (total {})", kind, count);
    }

    pub fn count(&self, kind: Fallback) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Fallback, u32)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }
}
