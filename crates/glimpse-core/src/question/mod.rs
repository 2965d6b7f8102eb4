//! Question generation: pick a variant that fits the payload, derive its
//! single correct answer and a shuffled, duplicate-free option set.

mod options;
mod rules;
mod variant;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use variant::QuestionVariant;

use crate::catalog::StageConfig;
use crate::diagnostics::Fallback;
use crate::palette::{Color, PathKind, Shape, Slot};
use crate::random::{Picker, RandomSource};
use crate::session::RoundHistoryEntry;
use crate::stimulus::DisplayPayload;

/// A candidate answer as offered to the player
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Answer {
    Color(Color),
    Shape(Shape),
    /// A word that was shown on screen
    Text(String),
    Number(u32),
    Slot(Slot),
    Path(PathKind),
    YesNo(bool),
}

impl Answer {
    /// Player-facing text of the answer
    pub fn label(&self) -> String {
        match self {
            Self::Color(color) => color.label().to_string(),
            Self::Shape(shape) => shape.label().to_string(),
            Self::Text(text) => text.clone(),
            Self::Number(n) => n.to_string(),
            Self::Slot(slot) => slot.label().to_string(),
            Self::Path(path) => path.label().to_string(),
            Self::YesNo(true) => "Yes".to_string(),
            Self::YesNo(false) => "No".to_string(),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPayload {
    pub question_text: String,
    pub correct_answer: Answer,
    /// Unique candidates, exactly one of which equals `correct_answer`
    pub options: Vec<Answer>,
    pub variant: QuestionVariant,
}

impl QuestionPayload {
    pub fn is_correct(&self, answer: &Answer) -> bool {
        *answer == self.correct_answer
    }
}

/// Variants of the payload's round type whose structural preconditions hold
pub fn valid_variants(
    payload: &DisplayPayload,
    history: &[RoundHistoryEntry],
) -> Vec<QuestionVariant> {
    QuestionVariant::for_round(payload.round_type())
        .iter()
        .copied()
        .filter(|v| rules::applies(*v, payload, history))
        .collect()
}

/// Build a question for `payload`.
///
/// One valid variant is chosen uniformly; if its answer cannot be derived the
/// remaining variants are tried in random order. `None` means no variant
/// worked, which the session treats as an unscored round.
pub fn generate_question<R: RandomSource>(
    payload: &DisplayPayload,
    config: &StageConfig,
    history: &[RoundHistoryEntry],
    picker: &mut Picker<R>,
) -> Option<QuestionPayload> {
    let mut candidates = valid_variants(payload, history);
    picker.shuffle(&mut candidates);

    for variant in candidates {
        match rules::compute(variant, payload, history, config.num_options, picker) {
            Some(question) => {
                debug!(
                    "Question for {}: {} ({} options)",
                    payload.round_type(),
                    variant,
                    question.options.len()
                );
                return Some(question);
            }
            None => {
                warn!("Variant {} failed for {} payload", variant, payload.round_type());
                picker.record(Fallback::VariantFailed);
            }
        }
    }

    warn!("No question could be built for {}", payload.round_type());
    picker.record(Fallback::NoQuestion);
    None
}

/// Build a question with one specific variant, if it applies to `payload`
pub fn generate_question_with<R: RandomSource>(
    variant: QuestionVariant,
    payload: &DisplayPayload,
    config: &StageConfig,
    history: &[RoundHistoryEntry],
    picker: &mut Picker<R>,
) -> Option<QuestionPayload> {
    if !rules::applies(variant, payload, history) {
        return None;
    }
    rules::compute(variant, payload, history, config.num_options, picker)
}
