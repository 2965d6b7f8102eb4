//! Interactive sessions: the full game and single-round practice.

use anyhow::Result;
use glimpse_core::{
    EngineConfig, RandomSource, RoundType, Sequencer, SessionState, Stage, format_score, play,
    play_practice,
};
use tracing::debug;

use crate::shutdown;
use crate::terminal::TerminalFrontend;

/// Closing line shown after a session ends
pub fn summary(state: &SessionState) -> String {
    let score = format_score(state.score);
    let practice = state.round.as_ref().is_some_and(|r| r.practice);
    match state.stage {
        Stage::Victory if practice => format!("Practice round cleared. Score: {score}"),
        Stage::Victory => format!(
            "All {} rounds cleared! Final score: {score}",
            SessionState::rounds_total()
        ),
        Stage::GameOver if practice => "Practice round missed.".to_string(),
        Stage::GameOver => format!(
            "Game over on round {}. Final score: {score}",
            state.round.as_ref().map_or(0, |r| r.index + 1)
        ),
        _ => "Session abandoned.".to_string(),
    }
}

/// Play every round until victory or the first mistake
pub fn run(config: EngineConfig) -> Result<()> {
    let shutdown = shutdown::install()?;
    let mut frontend = TerminalFrontend::new(shutdown, config.post_answer_delay_ms);
    let mut sequencer = Sequencer::from_config(config);

    let state = play(&mut sequencer, &mut frontend)?;
    report_fallbacks(&sequencer);
    println!("\n{}", summary(&state));
    Ok(())
}

/// Play a single round of `round_type`
pub fn run_practice(config: EngineConfig, round_type: RoundType) -> Result<()> {
    let shutdown = shutdown::install()?;
    let mut frontend = TerminalFrontend::new(shutdown, config.post_answer_delay_ms);
    let mut sequencer = Sequencer::from_config(config);

    let state = play_practice(&mut sequencer, &mut frontend, round_type)?;
    report_fallbacks(&sequencer);
    println!("\n{}", summary(&state));
    Ok(())
}

fn report_fallbacks<R: RandomSource>(sequencer: &Sequencer<R>) {
    for (kind, count) in sequencer.fallbacks().iter() {
        debug!("Fallback {}: {}", kind, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimpse_core::{Frontend, Presentation, QuestionPayload, Response, Round};
    use glimpse_core::{AnswerOutcome, StdRandom};

    /// Always picks the last option
    struct LastOption;

    impl Frontend for LastOption {
        fn render(&mut self, _round: &Round) -> Presentation {
            Presentation::Shown
        }

        fn render_question(&mut self, question: Option<&QuestionPayload>) -> Option<Response> {
            Some(Response {
                selection: question.and_then(|q| q.options.last().cloned()),
                elapsed_ms: 0,
            })
        }

        fn notify(&mut self, _outcome: &AnswerOutcome) {}
    }

    #[test]
    fn test_summary_for_abandoned_session() {
        assert_eq!(summary(&SessionState::new()), "Session abandoned.");
    }

    #[test]
    fn test_summary_for_victory() {
        let state = SessionState {
            stage: Stage::Victory,
            score: 12345,
            ..SessionState::new()
        };
        assert_eq!(summary(&state), "All 18 rounds cleared! Final score: 12,345");
    }

    #[test]
    fn test_summary_after_practice() {
        let mut sequencer = Sequencer::new(StdRandom::seeded(8), EngineConfig::default());
        let state = play_practice(&mut sequencer, &mut LastOption, RoundType::Stroop).unwrap();
        let text = summary(&state);
        match state.stage {
            Stage::Victory => assert!(text.starts_with("Practice round cleared")),
            _ => assert_eq!(text, "Practice round missed."),
        }
    }

    #[test]
    fn test_summary_for_game_over_names_round() {
        let (mut sequencer, state) = (0..)
            .map(|seed| {
                let mut sequencer =
                    Sequencer::new(StdRandom::seeded(seed), EngineConfig::default());
                let state = sequencer.start(&SessionState::new()).unwrap();
                let ticket = state.ticket().unwrap();
                let state = sequencer.reveal_question(&state, ticket).unwrap();
                (sequencer, state)
            })
            .find(|(_, state)| state.question().is_some())
            .unwrap();
        let ticket = state.ticket().unwrap();
        let (over, _) = sequencer.answer(&state, ticket, None, 500).unwrap();
        assert_eq!(over.stage, Stage::GameOver);
        assert_eq!(summary(&over), "Game over on round 1. Final score: 0");
    }
}
