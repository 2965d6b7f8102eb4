//! Collaborator boundary and the loop that drives a session through it.

use tracing::info;

use crate::catalog::RoundType;
use crate::error::{Error, Result};
use crate::question::{Answer, QuestionPayload};
use crate::random::RandomSource;
use crate::session::{AnswerOutcome, Round, Sequencer, SessionState};

/// What happened while a stimulus was on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Shown for the full display time
    Shown,
    /// The player left before the display time was over
    Abandoned,
}

/// The player's reply to a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub selection: Option<Answer>,
    /// Time from question render to selection (ms)
    pub elapsed_ms: i64,
}

/// Renders rounds and collects answers.
///
/// Implementations own all timing: `render` returns once the round's display
/// time has elapsed.
pub trait Frontend {
    fn render(&mut self, round: &Round) -> Presentation;

    /// Show the question (or a bare continue prompt when there is none) and
    /// wait for the player. `None` abandons the session.
    fn render_question(&mut self, question: Option<&QuestionPayload>) -> Option<Response>;

    fn notify(&mut self, outcome: &AnswerOutcome);
}

/// Play a full session and return its final state.
///
/// An abandoned session is reset; the returned state is then the new menu.
pub fn play<R, F>(sequencer: &mut Sequencer<R>, frontend: &mut F) -> Result<SessionState>
where
    R: RandomSource,
    F: Frontend,
{
    let state = sequencer.start(&SessionState::new())?;
    drive(sequencer, frontend, state)
}

/// Play a single practice round of `round_type`
pub fn play_practice<R, F>(
    sequencer: &mut Sequencer<R>,
    frontend: &mut F,
    round_type: RoundType,
) -> Result<SessionState>
where
    R: RandomSource,
    F: Frontend,
{
    let state = sequencer.practice(&SessionState::new(), round_type)?;
    drive(sequencer, frontend, state)
}

fn drive<R, F>(
    sequencer: &mut Sequencer<R>,
    frontend: &mut F,
    mut state: SessionState,
) -> Result<SessionState>
where
    R: RandomSource,
    F: Frontend,
{
    while !state.stage.is_terminal() {
        let (Some(round), Some(ticket)) = (state.round.as_ref(), state.ticket()) else {
            return Err(Error::InvalidTransition {
                event: "render",
                stage: state.stage,
            });
        };

        if frontend.render(round) == Presentation::Abandoned {
            info!("Session abandoned during round {}", round.index);
            return Ok(sequencer.reset(&state));
        }

        state = sequencer.reveal_question(&state, ticket)?;
        let Some(response) = frontend.render_question(state.question()) else {
            info!("Session abandoned at question {}", ticket.round);
            return Ok(sequencer.reset(&state));
        };

        let (next, outcome) =
            sequencer.answer(&state, ticket, response.selection.as_ref(), response.elapsed_ms)?;
        frontend.notify(&outcome);
        state = next;
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::random::StdRandom;
    use crate::session::Stage;

    /// Scripted player: answers correctly until `mistake_at`, abandons at `quit_at`
    #[derive(Default)]
    struct Scripted {
        answered: u32,
        mistake_at: Option<u32>,
        quit_at: Option<u32>,
        rendered: Vec<RoundType>,
        outcomes: Vec<AnswerOutcome>,
    }

    impl Frontend for Scripted {
        fn render(&mut self, round: &Round) -> Presentation {
            self.rendered.push(round.round_type);
            if self.quit_at == Some(self.answered) {
                Presentation::Abandoned
            } else {
                Presentation::Shown
            }
        }

        fn render_question(&mut self, question: Option<&QuestionPayload>) -> Option<Response> {
            let question = question?;
            let selection = if self.mistake_at == Some(self.answered) {
                question
                    .options
                    .iter()
                    .find(|o| **o != question.correct_answer)
                    .cloned()
            } else {
                Some(question.correct_answer.clone())
            };
            self.answered += 1;
            Some(Response {
                selection,
                elapsed_ms: 1000,
            })
        }

        fn notify(&mut self, outcome: &AnswerOutcome) {
            self.outcomes.push(outcome.clone());
        }
    }

    fn sequencer(seed: u64) -> Sequencer<StdRandom> {
        Sequencer::new(StdRandom::seeded(seed), EngineConfig::default())
    }

    #[test]
    fn test_play_through_to_victory() {
        let mut frontend = Scripted::default();
        let state = play(&mut sequencer(100), &mut frontend).unwrap();
        assert_eq!(state.stage, Stage::Victory);
        assert_eq!(frontend.rendered.len(), 18);
        assert_eq!(frontend.outcomes.len(), 18);
        assert_eq!(state.score, 18 * 910);
    }

    #[test]
    fn test_play_stops_at_first_mistake() {
        let mut frontend = Scripted {
            mistake_at: Some(3),
            ..Default::default()
        };
        let state = play(&mut sequencer(101), &mut frontend).unwrap();
        assert_eq!(state.stage, Stage::GameOver);
        assert_eq!(frontend.rendered.len(), 4);
        assert_eq!(state.score, 3 * 910);
        assert!(matches!(
            frontend.outcomes.last(),
            Some(AnswerOutcome::Incorrect { .. })
        ));
    }

    #[test]
    fn test_abandon_resets_session() {
        let mut frontend = Scripted {
            quit_at: Some(2),
            ..Default::default()
        };
        let state = play(&mut sequencer(102), &mut frontend).unwrap();
        assert_eq!(state.stage, Stage::Menu);
        assert_eq!(state.generation, 1);
        assert_eq!(state.score, 0);
        assert_eq!(frontend.outcomes.len(), 2);
    }

    #[test]
    fn test_practice_single_round() {
        let mut frontend = Scripted::default();
        let state =
            play_practice(&mut sequencer(103), &mut frontend, RoundType::ColorMatch).unwrap();
        assert_eq!(state.stage, Stage::Victory);
        assert_eq!(frontend.rendered, vec![RoundType::ColorMatch]);
    }
}
