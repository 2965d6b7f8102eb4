//! Session sequencer.
//!
//! [`SessionState`] is a plain value. Every transition on [`Sequencer`] takes
//! the current state by reference and returns the next one, so a collaborator
//! can keep, compare or discard states freely. Events carry a [`Ticket`]
//! naming the session generation and round they were issued for; events for
//! anything but the current round are rejected as stale.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};
use tracing::{debug, info, warn};

use crate::catalog::{RoundType, StageConfig};
use crate::config::EngineConfig;
use crate::diagnostics::FallbackLog;
use crate::error::{Error, Result};
use crate::question::{Answer, QuestionPayload, generate_question};
use crate::random::{Picker, RandomSource, StdRandom};
use crate::scoring::speed_score_with_max;
use crate::stimulus::{self, DisplayPayload};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr, Display,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Menu,
    Display,
    Question,
    GameOver,
    Victory,
}

impl Stage {
    /// Only a reset leaves a terminal stage
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::GameOver | Self::Victory)
    }
}

/// Snapshot of a finished round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundHistoryEntry {
    pub round_type: RoundType,
    pub display: DisplayPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// 0-based position of the round in its session
    pub index: u32,
    pub round_type: RoundType,
    pub config: StageConfig,
    pub display: DisplayPayload,
    /// Set on reveal; `None` afterwards means no question could be built
    pub question: Option<QuestionPayload>,
    /// Single-round drill outside the normal progression
    pub practice: bool,
}

impl Round {
    pub fn ticket(&self, generation: u64) -> Ticket {
        Ticket {
            generation,
            round: self.index,
        }
    }
}

/// Identifies the round an event was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket {
    pub generation: u64,
    pub round: u32,
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.generation, self.round)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Bumped on every reset
    pub generation: u64,
    pub stage: Stage,
    pub score: u32,
    pub round: Option<Round>,
    /// Round types played this session, in order, without repeats
    pub played: Vec<RoundType>,
    pub history: Vec<RoundHistoryEntry>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// A fresh session in the menu
    pub fn new() -> Self {
        Self {
            generation: 0,
            stage: Stage::Menu,
            score: 0,
            round: None,
            played: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Ticket of the round in progress
    pub fn ticket(&self) -> Option<Ticket> {
        self.round.as_ref().map(|r| r.ticket(self.generation))
    }

    pub fn current_round_type(&self) -> Option<RoundType> {
        self.round.as_ref().map(|r| r.round_type)
    }

    pub fn question(&self) -> Option<&QuestionPayload> {
        self.round.as_ref().and_then(|r| r.question.as_ref())
    }

    /// Number of rounds a full session consists of
    pub fn rounds_total() -> usize {
        RoundType::ALL.len()
    }
}

/// Result of answering a question, for collaborator feedback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum AnswerOutcome {
    Correct { points: u32 },
    Incorrect { correct_answer: Answer },
    /// The round had no question; nothing was scored
    Skipped,
}

impl AnswerOutcome {
    pub fn points(&self) -> u32 {
        match self {
            Self::Correct { points } => *points,
            _ => 0,
        }
    }
}

/// Drives [`SessionState`] through its stages.
///
/// Owns the random source and the fallback counters; holds no session data.
#[derive(Debug)]
pub struct Sequencer<R> {
    picker: Picker<R>,
    config: EngineConfig,
}

impl Sequencer<StdRandom> {
    /// Sequencer seeded from `config.seed`, or from entropy when unset
    pub fn from_config(config: EngineConfig) -> Self {
        let rng = StdRandom::from_seed_option(config.seed);
        Self::new(rng, config)
    }
}

impl<R: RandomSource> Sequencer<R> {
    pub fn new(rng: R, config: EngineConfig) -> Self {
        Self {
            picker: Picker::new(rng),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn fallbacks(&self) -> &FallbackLog {
        self.picker.fallbacks()
    }

    /// Begin a session: the first round, or victory if nothing is left
    pub fn start(&mut self, state: &SessionState) -> Result<SessionState> {
        expect_stage(state, Stage::Menu, "start")?;
        info!("Session {} started", state.generation);
        Ok(self.advance(state.clone()))
    }

    /// Single drill of `round_type`; the played list is not touched
    pub fn practice(&mut self, state: &SessionState, round_type: RoundType) -> Result<SessionState> {
        expect_stage(state, Stage::Menu, "practice")?;
        info!("Practice round: {}", round_type);
        let mut next = state.clone();
        next.round = Some(self.build_round(0, round_type, true));
        next.stage = Stage::Display;
        Ok(next)
    }

    /// Display time is over: build the question
    pub fn reveal_question(&mut self, state: &SessionState, ticket: Ticket) -> Result<SessionState> {
        expect_ticket(state, ticket)?;
        expect_stage(state, Stage::Display, "reveal_question")?;

        let mut next = state.clone();
        if let Some(round) = next.round.as_mut() {
            round.question = generate_question(
                &round.display,
                &round.config,
                &state.history,
                &mut self.picker,
            );
            if round.question.is_none() {
                warn!("Round {} ({}) has no question", round.index, round.round_type);
            }
        }
        next.stage = Stage::Question;
        Ok(next)
    }

    /// Judge `selection` and move on.
    ///
    /// `elapsed_ms` is the time between question reveal and the answer. A
    /// missing selection counts as wrong unless the round had no question, in
    /// which case any response advances without scoring.
    pub fn answer(
        &mut self,
        state: &SessionState,
        ticket: Ticket,
        selection: Option<&Answer>,
        elapsed_ms: i64,
    ) -> Result<(SessionState, AnswerOutcome)> {
        expect_ticket(state, ticket)?;
        expect_stage(state, Stage::Question, "answer")?;

        let Some(round) = state.round.as_ref() else {
            return Err(Error::InvalidTransition {
                event: "answer",
                stage: state.stage,
            });
        };

        let outcome = match &round.question {
            None => AnswerOutcome::Skipped,
            Some(question) if selection.is_some_and(|s| question.is_correct(s)) => {
                AnswerOutcome::Correct {
                    points: speed_score_with_max(elapsed_ms, self.config.max_response_ms),
                }
            }
            Some(question) => AnswerOutcome::Incorrect {
                correct_answer: question.correct_answer.clone(),
            },
        };

        let mut next = state.clone();
        next.score = next.score.saturating_add(outcome.points());
        debug!(
            "Round {} ({}) answered in {}ms: {:?}",
            round.index, round.round_type, elapsed_ms, outcome
        );

        let next = match (&outcome, round.practice) {
            (AnswerOutcome::Incorrect { .. }, _) => {
                info!("Game over after {} rounds, score {}", next.played.len(), next.score);
                next.stage = Stage::GameOver;
                next
            }
            (_, true) => {
                next.stage = Stage::Victory;
                next
            }
            (_, false) => self.advance(next),
        };
        Ok((next, outcome))
    }

    /// Back to the menu with a new generation; pending tickets become stale
    pub fn reset(&self, state: &SessionState) -> SessionState {
        info!("Session {} reset from {}", state.generation, state.stage);
        SessionState {
            generation: state.generation + 1,
            ..SessionState::new()
        }
    }

    /// The start transition: archive the finished round, then pick the next
    fn advance(&mut self, mut state: SessionState) -> SessionState {
        if let Some(round) = state.round.take() {
            state.history.push(RoundHistoryEntry {
                round_type: round.round_type,
                display: round.display,
            });
        }

        let remaining: Vec<RoundType> = RoundType::ALL
            .into_iter()
            .filter(|t| !state.played.contains(t))
            .collect();

        let Some(&round_type) = self.picker.choose(&remaining) else {
            info!("Victory with score {}", state.score);
            state.stage = Stage::Victory;
            return state;
        };

        let index = state.played.len() as u32;
        debug!(
            "Round {} selected: {} ({} remaining)",
            index,
            round_type,
            remaining.len() - 1
        );
        state.played.push(round_type);
        state.round = Some(self.build_round(index, round_type, false));
        state.stage = Stage::Display;
        state
    }

    fn build_round(&mut self, index: u32, round_type: RoundType, practice: bool) -> Round {
        Round {
            index,
            round_type,
            config: round_type.config(),
            display: stimulus::generate(round_type, &mut self.picker),
            question: None,
            practice,
        }
    }
}

fn expect_stage(state: &SessionState, stage: Stage, event: &'static str) -> Result<()> {
    if state.stage == stage {
        Ok(())
    } else {
        Err(Error::InvalidTransition {
            event,
            stage: state.stage,
        })
    }
}

fn expect_ticket(state: &SessionState, ticket: Ticket) -> Result<()> {
    match state.ticket() {
        Some(current) if current == ticket => Ok(()),
        current => {
            let expected = current.map_or_else(|| "none".to_string(), |t| t.to_string());
            warn!("Ignoring stale event for {} (current {})", ticket, expected);
            Err(Error::StaleEvent {
                expected,
                actual: ticket.to_string(),
            })
        }
    }
}
