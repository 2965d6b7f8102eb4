use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};
use glimpse_core::{
    AnswerOutcome, Frontend, Presentation, QuestionPayload, Response, Round, SessionState,
    format_score,
};
use owo_colors::OwoColorize;
use tracing::{debug, warn};

use crate::render::{self, Line};
use crate::shutdown::ShutdownSignal;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What a key press means while waiting at a question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// 0-based option index
    Select(usize),
    /// Move on from a round without a question
    Continue,
    Quit,
    Ignore,
}

pub fn key_action(key: &KeyEvent, option_count: usize) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        KeyCode::Enter | KeyCode::Char(' ') if option_count == 0 => KeyAction::Continue,
        KeyCode::Char(c) => match c.to_digit(10) {
            Some(d) if d >= 1 && d as usize <= option_count => KeyAction::Select(d as usize - 1),
            _ => KeyAction::Ignore,
        },
        _ => KeyAction::Ignore,
    }
}

/// Restores cooked mode when dropped
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Plays rounds on the controlling terminal.
///
/// Stimuli are drawn as coloured glyphs; answers are single key presses.
pub struct TerminalFrontend {
    shutdown: Arc<ShutdownSignal>,
    post_answer_delay: Duration,
    score: u32,
    round_label: String,
}

impl TerminalFrontend {
    pub fn new(shutdown: Arc<ShutdownSignal>, post_answer_delay_ms: u64) -> Self {
        Self {
            shutdown,
            post_answer_delay: Duration::from_millis(post_answer_delay_ms),
            score: 0,
            round_label: String::new(),
        }
    }

    fn clear(&self) {
        execute!(
            io::stdout(),
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )
        .ok();
    }

    fn print(&self, lines: &[Line]) {
        let mut out = io::stdout().lock();
        writeln!(
            out,
            "{}   Score {}\n",
            self.round_label.bold(),
            format_score(self.score)
        )
        .ok();
        for line in lines {
            writeln!(out, "  {}", render::paint_line(line)).ok();
        }
        out.flush().ok();
    }

    /// Block until a meaningful key; `None` when the player quits
    fn wait_key(&self, option_count: usize) -> Option<KeyAction> {
        let _raw = match RawMode::enable() {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to enable raw mode: {}", e);
                return None;
            }
        };

        while !self.shutdown.is_shutdown() {
            match event::poll(POLL_INTERVAL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    warn!("Failed to poll terminal events: {}", e);
                    return None;
                }
            }
            if let Ok(Event::Key(key)) = event::read() {
                match key_action(&key, option_count) {
                    KeyAction::Ignore => {}
                    KeyAction::Quit => {
                        debug!("Quit key pressed: {:?}", key.code);
                        self.shutdown.trigger();
                        return None;
                    }
                    action => return Some(action),
                }
            }
        }
        None
    }
}

impl Frontend for TerminalFrontend {
    fn render(&mut self, round: &Round) -> Presentation {
        self.round_label = if round.practice {
            format!("Practice · {}", round.round_type.name())
        } else {
            format!(
                "Round {}/{} · {}",
                round.index + 1,
                SessionState::rounds_total(),
                round.round_type.name()
            )
        };

        let frames = render::frames(&round.display);
        let per_frame =
            Duration::from_millis(round.config.display_time_ms) / frames.len().max(1) as u32;
        for frame in &frames {
            if self.shutdown.is_shutdown() {
                return Presentation::Abandoned;
            }
            self.clear();
            self.print(&frame.lines);
            if self.shutdown.wait(per_frame) {
                return Presentation::Abandoned;
            }
        }
        Presentation::Shown
    }

    fn render_question(&mut self, question: Option<&QuestionPayload>) -> Option<Response> {
        self.clear();
        let option_count = match question {
            Some(q) => {
                let mut lines = render::question_lines(q);
                lines.push(vec![]);
                lines.push(vec![render::Span::plain(format!(
                    "Press 1-{} to answer, q to quit",
                    q.options.len()
                ))]);
                self.print(&lines);
                q.options.len()
            }
            None => {
                self.print(&[vec![render::Span::plain(
                    "Nothing to ask this round. Press Enter to continue.",
                )]]);
                0
            }
        };

        let start = Instant::now();
        let action = self.wait_key(option_count)?;
        let elapsed_ms = i64::try_from(start.elapsed().as_millis()).unwrap_or(i64::MAX);

        let selection = match (action, question) {
            (KeyAction::Select(i), Some(q)) => q.options.get(i).cloned(),
            _ => None,
        };
        Some(Response {
            selection,
            elapsed_ms,
        })
    }

    fn notify(&mut self, outcome: &AnswerOutcome) {
        match outcome {
            AnswerOutcome::Correct { points } => {
                self.score = self.score.saturating_add(*points);
                println!("\n  {} +{}", "Correct!".green().bold(), format_score(*points));
            }
            AnswerOutcome::Incorrect { correct_answer } => {
                println!(
                    "\n  {} The answer was {}",
                    "Wrong.".red().bold(),
                    render::paint(&render::answer_span(correct_answer))
                );
            }
            AnswerOutcome::Skipped => println!("\n  Skipped"),
        }
        io::stdout().flush().ok();
        self.shutdown.wait(self.post_answer_delay);
    }
}
