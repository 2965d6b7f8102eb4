//! # glimpse-core
//!
//! Round generation and question engine for the Glimpse reaction/memory game.
//!
//! This crate provides:
//! - The fixed stimulus vocabulary (colours, shapes, colour groups)
//! - A catalog of the 18 round types and their timing/option configuration
//! - Randomized stimulus payloads per round type
//! - Question variants with a unique correct answer and plausible distractors
//! - Latency scoring and a ticketed session state machine
//!
//! All randomness flows through [`RandomSource`], so a seeded [`StdRandom`]
//! replays a session exactly.

pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod frontend;
pub mod palette;
pub mod question;
pub mod random;
pub mod scoring;
pub mod session;
pub mod stimulus;

pub use catalog::{
    RoundType, StageConfig, all_round_types, config_for, name_for, parse_round_type,
};
pub use config::{EngineConfig, EngineConfigBuilder};
pub use diagnostics::{Fallback, FallbackLog};
pub use error::{Error, Result};
pub use frontend::{Frontend, Presentation, Response, play, play_practice};
pub use palette::{Color, ColorGroup, PathKind, Shape, ShapePart, Slot};
pub use question::{
    Answer, QuestionPayload, QuestionVariant, generate_question, generate_question_with,
    valid_variants,
};
pub use random::{Picker, RandomSource, StdRandom};
pub use scoring::{format_score, speed_score, speed_score_with_max};
pub use session::{
    AnswerOutcome, Round, RoundHistoryEntry, Sequencer, SessionState, Stage, Ticket,
};
pub use stimulus::{DisplayPayload, MixedPayload, PayloadField, ShapeInstance, TextInstance};
