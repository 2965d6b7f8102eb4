//! Text-mode rendering of stimuli.
//!
//! Each payload becomes one or more [`Frame`]s; the terminal shows them one
//! after another, splitting the round's display time evenly between them.

use glimpse_core::stimulus::{
    DisplayPayload, GridCell, MixedPayload, PartialShape, PathTrack, Position, SequenceMode,
    ShapeColorMode, ShapeInstance, TextInstance,
};
use glimpse_core::{Answer, Color, PathKind, QuestionPayload, ShapePart, Slot};
use owo_colors::OwoColorize;

const SWATCH: &str = "███";
const FLASH: &str = "████████████████";
const TRACK_WIDTH: usize = 30;
const RACE_FRAMES: usize = 6;
const PATH_FRAMES: usize = 4;
const PATH_STEP: usize = 5;
/// Frames in a hard Stroop round; inks change between them
const INK_FRAMES: u8 = 4;
const GRID_CELLS: usize = 9;
/// Backdrop used so black ink stays visible on dark terminals
const BLACK_BACKDROP: (u8, u8, u8) = (0xE5, 0xE7, 0xEB);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub color: Option<Color>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    pub fn colored(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }
}

pub type Line = Vec<Span>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<Line>,
}

impl Frame {
    fn of(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    fn single(line: Line) -> Self {
        Self { lines: vec![line] }
    }

    /// The frame without colour codes, one row per line
    #[cfg(test)]
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().map(|s| s.text.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn paint(span: &Span) -> String {
    match span.color {
        None => span.text.clone(),
        Some(Color::Black) => {
            let (r, g, b) = BLACK_BACKDROP;
            span.text.truecolor(0, 0, 0).on_truecolor(r, g, b).to_string()
        }
        Some(color) => {
            let (r, g, b) = color.rgb();
            span.text.truecolor(r, g, b).to_string()
        }
    }
}

pub fn paint_line(line: &[Span]) -> String {
    line.iter().map(paint).collect()
}

/// Frames to show for `display`, in order
pub fn frames(display: &DisplayPayload) -> Vec<Frame> {
    match display {
        DisplayPayload::ShapeColor { mode, shapes } => match mode {
            ShapeColorMode::Sequential => by_order(shapes)
                .into_iter()
                .map(|s| Frame::single(vec![big(s)]))
                .collect(),
            ShapeColorMode::Sized => vec![Frame::single(spaced(
                by_slot(shapes).into_iter().map(sized).collect(),
            ))],
        },
        DisplayPayload::Stroop { texts } => vec![Frame::single(words(&by_text_slot(texts)))],
        DisplayPayload::StroopHard { texts } => (0..INK_FRAMES)
            .map(|k| {
                let line = spaced(
                    texts
                        .iter()
                        .map(|t| Span::colored(t.text.to_uppercase(), ink_at(t, k)))
                        .collect(),
                );
                Frame::single(line)
            })
            .collect(),
        DisplayPayload::MultiShape { shapes } => vec![shape_grid(shapes, None)],
        DisplayPayload::ColorSequence { mode, sequence } => match mode {
            SequenceMode::Simon => sequence.iter().map(|&c| flash(c)).collect(),
            SequenceMode::Sequence => vec![Frame::single(swatches(sequence))],
        },
        DisplayPayload::AnimatedShapes { shapes, .. } => race(shapes),
        DisplayPayload::Mixed(mixed) => vec![mixed_frame(mixed)],
        DisplayPayload::PositionMemory { grid } => vec![cell_grid(grid)],
        DisplayPayload::SpeedReading { sequence } => {
            sequence.iter().map(|&c| Frame::single(vec![swatch(c)])).collect()
        }
        DisplayPayload::ShapeCounting { shapes } => by_order(shapes)
            .into_iter()
            .map(|s| Frame::single(vec![glyph(s)]))
            .collect(),
        DisplayPayload::ColorMatch {
            left_colors,
            right_texts,
        } => {
            let lines = left_colors
                .iter()
                .zip(right_texts)
                .map(|(&color, text)| {
                    vec![
                        swatch(color),
                        Span::plain("   "),
                        Span::colored(text.text.to_uppercase(), text.text_color),
                    ]
                })
                .collect();
            vec![Frame::of(lines)]
        }
        DisplayPayload::DistractionTest {
            main_shape,
            distraction_shapes,
        } => vec![shape_grid(distraction_shapes, Some(main_shape))],
        DisplayPayload::FlashMemory {
            flash_sequence,
            shapes,
        } => {
            let mut frames: Vec<Frame> = flash_sequence.iter().map(|&c| flash(c)).collect();
            frames.extend(shapes.iter().map(|s| Frame::single(vec![big(s)])));
            frames
        }
        DisplayPayload::IncreasingSequence { sequence } => (1..=sequence.len())
            .map(|k| Frame::single(swatches(&sequence[..k])))
            .collect(),
        DisplayPayload::PartialShapes { partial_shape, .. } => vec![partial(partial_shape)],
        DisplayPayload::OverlappingChaos { shapes } => {
            vec![Frame::single(by_layer(shapes).into_iter().map(glyph).collect())]
        }
        DisplayPayload::PathTracking { paths, .. } => (1..=PATH_FRAMES)
            .map(|k| Frame::of(paths.iter().map(|p| trail(p, k * PATH_STEP)).collect()))
            .collect(),
        DisplayPayload::WrongColorMix { shapes, .. } => {
            vec![Frame::single(spaced(shapes.iter().map(glyph).collect()))]
        }
    }
}

/// Question text followed by numbered options
pub fn question_lines(question: &QuestionPayload) -> Vec<Line> {
    let mut lines = vec![vec![Span::plain(question.question_text.clone())], vec![]];
    for (i, option) in question.options.iter().enumerate() {
        lines.push(vec![Span::plain(format!("  {}) ", i + 1)), answer_span(option)]);
    }
    lines
}

pub fn answer_span(answer: &Answer) -> Span {
    match answer {
        Answer::Color(color) => Span::colored(answer.label(), *color),
        _ => Span::plain(answer.label()),
    }
}

fn glyph(shape: &ShapeInstance) -> Span {
    Span::colored(shape.shape.glyph().to_string(), shape.color)
}

fn big(shape: &ShapeInstance) -> Span {
    let g = shape.shape.glyph();
    Span::colored(format!("{g} {g} {g}"), shape.color)
}

/// One glyph per size step: 100px -> 1, 120px -> 2, 150px -> 3
fn sized(shape: &ShapeInstance) -> Span {
    let steps = shape.size.map_or(1, |size| (size.saturating_sub(80) / 20).clamp(1, 3));
    let text: String = std::iter::repeat_n(shape.shape.glyph(), steps as usize).collect();
    Span::colored(text, shape.color)
}

fn swatch(color: Color) -> Span {
    Span::colored(SWATCH, color)
}

fn swatches(colors: &[Color]) -> Line {
    spaced(colors.iter().map(|&c| swatch(c)).collect())
}

fn flash(color: Color) -> Frame {
    let line = vec![Span::colored(FLASH, color)];
    Frame::of(vec![line.clone(), line])
}

fn words(texts: &[&TextInstance]) -> Line {
    spaced(
        texts
            .iter()
            .map(|t| Span::colored(t.text.to_uppercase(), t.text_color))
            .collect(),
    )
}

fn spaced(spans: Vec<Span>) -> Line {
    let mut line = Vec::with_capacity(spans.len() * 2);
    for (i, span) in spans.into_iter().enumerate() {
        if i > 0 {
            line.push(Span::plain("   "));
        }
        line.push(span);
    }
    line
}

fn slot_rank(slot: Slot) -> usize {
    Slot::ALL.iter().position(|&s| s == slot).unwrap_or(Slot::ALL.len())
}

fn by_order(shapes: &[ShapeInstance]) -> Vec<&ShapeInstance> {
    let mut sorted: Vec<&ShapeInstance> = shapes.iter().collect();
    sorted.sort_by_key(|s| s.order.unwrap_or(u8::MAX));
    sorted
}

fn by_slot(shapes: &[ShapeInstance]) -> Vec<&ShapeInstance> {
    let mut sorted: Vec<&ShapeInstance> = shapes.iter().collect();
    sorted.sort_by_key(|s| match s.position {
        Some(Position::Slot(slot)) => slot_rank(slot),
        _ => Slot::ALL.len(),
    });
    sorted
}

fn by_text_slot(texts: &[TextInstance]) -> Vec<&TextInstance> {
    let mut sorted: Vec<&TextInstance> = texts.iter().collect();
    sorted.sort_by_key(|t| t.position.map_or(Slot::ALL.len(), slot_rank));
    sorted
}

fn by_layer(shapes: &[ShapeInstance]) -> Vec<&ShapeInstance> {
    let mut sorted: Vec<&ShapeInstance> = shapes.iter().collect();
    sorted.sort_by_key(|s| match s.position {
        Some(Position::Layer(layer)) => layer,
        _ => 0,
    });
    sorted
}

/// Ink of `text` in frame `k`; the last change lands on `text_color`
fn ink_at(text: &TextInstance, k: u8) -> Color {
    let remaining = text.color_changes.unwrap_or(0).saturating_sub(k) as usize;
    if remaining == 0 {
        return text.text_color;
    }
    let base = Color::WORDS
        .iter()
        .position(|&c| c == text.text_color)
        .unwrap_or(0);
    Color::WORDS[(base + remaining) % Color::WORDS.len()]
}

fn grid_frame(cells: [Option<Span>; GRID_CELLS]) -> Frame {
    let mut lines = Vec::with_capacity(3);
    let mut row = Vec::new();
    for (i, cell) in cells.into_iter().enumerate() {
        row.push(cell.unwrap_or_else(|| Span::plain("·")));
        if i % 3 == 2 {
            lines.push(spaced(std::mem::take(&mut row)));
        }
    }
    Frame::of(lines)
}

/// Shapes placed by their cell; unplaced shapes fill the first free cells.
///
/// The main shape, when there is one, is drawn enlarged.
fn shape_grid(shapes: &[ShapeInstance], main: Option<&ShapeInstance>) -> Frame {
    let mut cells: [Option<Span>; GRID_CELLS] = Default::default();
    let mut loose = Vec::new();
    let placed = main
        .map(big)
        .into_iter()
        .zip(main)
        .chain(shapes.iter().map(|s| (glyph(s), s)));
    for (span, shape) in placed {
        match shape.position {
            Some(Position::Cell(i)) if (i as usize) < GRID_CELLS && cells[i as usize].is_none() => {
                cells[i as usize] = Some(span);
            }
            _ => loose.push(span),
        }
    }
    for span in loose {
        if let Some(free) = cells.iter_mut().find(|c| c.is_none()) {
            *free = Some(span);
        }
    }
    grid_frame(cells)
}

fn cell_grid(grid: &[GridCell]) -> Frame {
    let mut cells: [Option<Span>; GRID_CELLS] = Default::default();
    for cell in grid {
        let (Some(color), Some(slot)) = (cell.color, cells.get_mut(cell.position as usize)) else {
            continue;
        };
        let g = cell.shape.map_or('●', |s| s.glyph());
        *slot = Some(Span::colored(g.to_string(), color));
    }
    grid_frame(cells)
}

fn mixed_frame(mixed: &MixedPayload) -> Frame {
    match mixed {
        MixedPayload::Combo {
            shapes,
            texts,
            sequence,
        } => Frame::of(vec![
            spaced(shapes.iter().map(glyph).collect()),
            words(&by_text_slot(texts)),
            swatches(sequence),
        ]),
        MixedPayload::OverlapRotate { shapes, texts } => Frame::of(vec![
            shapes.iter().map(glyph).collect(),
            words(&by_text_slot(texts)),
        ]),
    }
}

/// Track distance in `[0, 1]` covered by `shape` after `t` seconds
fn distance(shape: &ShapeInstance, t: f64) -> f64 {
    let speed = shape.speed.unwrap_or(100.0);
    let covered = match shape.speed_change {
        Some(factor) if t * speed > 0.5 => 0.5 + (t - 0.5 / speed) * speed * factor,
        _ => t * speed,
    };
    covered.clamp(0.0, 1.0)
}

fn race(shapes: &[ShapeInstance]) -> Vec<Frame> {
    let total = shapes
        .iter()
        .map(ShapeInstance::finish_time)
        .fold(0.0_f64, f64::max);
    (1..=RACE_FRAMES)
        .map(|k| {
            let t = total * k as f64 / RACE_FRAMES as f64;
            let lines = shapes
                .iter()
                .map(|shape| {
                    let column = (distance(shape, t) * TRACK_WIDTH as f64).round() as usize;
                    vec![
                        Span::plain("·".repeat(column)),
                        glyph(shape),
                        Span::plain("·".repeat(TRACK_WIDTH - column.min(TRACK_WIDTH))),
                        Span::plain("|"),
                    ]
                })
                .collect();
            Frame::of(lines)
        })
        .collect()
}

fn partial(part: &PartialShape) -> Frame {
    let shown = Span::colored(part.shape.glyph().to_string(), part.color);
    let hidden = Span::plain("░");
    match part.part {
        ShapePart::Top => Frame::of(vec![vec![shown], vec![hidden]]),
        ShapePart::Bottom => Frame::of(vec![vec![hidden], vec![shown]]),
        ShapePart::Left => Frame::single(vec![shown, hidden]),
        ShapePart::Right => Frame::single(vec![hidden, shown]),
    }
}

fn trail(track: &PathTrack, len: usize) -> Line {
    let body: String = (0..len)
        .map(|i| match track.path {
            PathKind::Straight => '─',
            PathKind::Curve => {
                if i < len / 2 {
                    '╭'
                } else {
                    '╮'
                }
            }
            PathKind::Zigzag => {
                if i % 2 == 0 {
                    '/'
                } else {
                    '\\'
                }
            }
        })
        .collect();
    vec![
        Span::plain(body),
        Span::colored(track.shape.glyph().to_string(), track.color),
    ]
}
