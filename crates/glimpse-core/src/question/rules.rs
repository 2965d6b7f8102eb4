//! Answer derivation for each question variant.
//!
//! [`applies`] is the cheap structural check used to build the candidate list;
//! [`compute`] does the work and returns `None` when a deeper precondition
//! (such as a unique answer) does not hold.

use crate::palette::{Color, ColorGroup, PathKind, Shape, Slot};
use crate::random::{Picker, RandomSource};
use crate::session::RoundHistoryEntry;
use crate::stimulus::{
    DisplayPayload, MixedPayload, Position, SequenceMode, ShapeColorMode, ShapeInstance,
    TextInstance,
};

use super::options::{distinct_options, number_options};
use super::{Answer, QuestionPayload, QuestionVariant};

const GRID_CELLS: u32 = 9;
const NTH_COLOR: usize = 7;
const NTH_FLASH: usize = 2;
const CHANGED_TWICE: u8 = 2;

pub(super) fn applies(
    variant: QuestionVariant,
    payload: &DisplayPayload,
    history: &[RoundHistoryEntry],
) -> bool {
    use DisplayPayload as P;
    use QuestionVariant as V;
    match (variant, payload) {
        (V::FirstColor | V::LastColor, P::ShapeColor { mode, .. }) => {
            *mode == ShapeColorMode::Sequential
        }
        (V::LargestColor, P::ShapeColor { shapes, .. }) => shapes.iter().any(|s| s.size.is_some()),
        (V::PositionColor, P::ShapeColor { shapes, .. }) => shapes
            .iter()
            .any(|s| matches!(s.position, Some(Position::Slot(_)))),
        (V::ShapeSeen, P::ShapeColor { shapes, .. }) => !shapes.is_empty(),
        (V::CorrectStroop | V::TextColor, P::Stroop { texts }) => !texts.is_empty(),
        (V::DifferentStroop, P::Stroop { texts }) => odd_ink(texts).is_some(),
        (V::FourthColor, P::MultiShape { shapes }) => shapes.len() >= 4,
        (V::CountColor, P::MultiShape { shapes }) => has_repeated_color(shapes),
        (V::RecallPrevious, P::MultiShape { .. }) => !history.is_empty(),
        (
            V::SequenceLeft | V::SequenceMiddle | V::SequenceRight,
            P::ColorSequence { sequence, .. },
        ) => !sequence.is_empty(),
        (V::BeforeColor, P::ColorSequence { sequence, .. }) => sequence.len() >= 2,
        (
            V::FastestShape | V::FastestColor | V::SlowestShape | V::SlowestColor,
            P::AnimatedShapes { shapes, .. },
        ) => shapes.iter().all(|s| s.speed.is_some() && s.speed_change.is_none()),
        (V::SpeedChangeShape, P::AnimatedShapes { shapes, .. }) => {
            shapes.iter().filter(|s| s.speed_change.is_some()).count() == 1
        }
        (V::FinishFirst, P::AnimatedShapes { shapes, .. }) => !shapes.is_empty(),
        (V::MissingColor, P::Mixed(_)) => true,
        (V::AppearTwice, P::Mixed(mixed)) => matches!(mixed, MixedPayload::Combo { .. }),
        (V::OverlapTop, P::Mixed(mixed)) => matches!(mixed, MixedPayload::OverlapRotate { .. }),
        (V::PositionNumber, P::PositionMemory { grid }) => !grid.is_empty(),
        (V::EmptyPosition, P::PositionMemory { grid }) => grid.len() < GRID_CELLS as usize,
        (V::NthColor, P::SpeedReading { sequence }) => sequence.len() >= NTH_COLOR,
        (V::ColorExists, P::SpeedReading { sequence }) => !sequence.is_empty(),
        (V::ShapeCount | V::FirstShape, P::ShapeCounting { shapes }) => !shapes.is_empty(),
        (V::ColorMismatch, P::ColorMatch { right_texts, .. }) => !right_texts.is_empty(),
        (V::MainColor, P::DistractionTest { .. }) => true,
        (V::MainPosition, P::DistractionTest { main_shape, .. }) => {
            matches!(main_shape.position, Some(Position::Cell(_)))
        }
        (V::FlashColor, P::FlashMemory { flash_sequence, .. }) => flash_sequence.len() >= NTH_FLASH,
        (V::FlashExists, P::FlashMemory { flash_sequence, .. }) => !flash_sequence.is_empty(),
        (V::LastColor, P::IncreasingSequence { sequence }) => !sequence.is_empty(),
        (V::LastThreeColors, P::IncreasingSequence { sequence }) => sequence.len() >= 3,
        (V::PartialShapeType | V::PartialShapeColor, P::PartialShapes { .. }) => true,
        (V::TopShape, P::OverlappingChaos { shapes }) => !shapes.is_empty(),
        (V::ColorCountChaos, P::OverlappingChaos { shapes }) => has_repeated_color(shapes),
        (V::PathShape, P::PathTracking { paths, .. }) => !paths.is_empty(),
        (V::DirectionChange, P::PathTracking { paths, .. }) => {
            paths.iter().any(|t| t.path == PathKind::Zigzag)
        }
        (V::ColorChangeCount, P::StroopHard { texts }) => {
            texts.iter().any(|t| t.color_changes.is_some())
        }
        (V::WrongGroupColor, P::WrongColorMix { .. }) => true,
        _ => false,
    }
}

pub(super) fn compute<R: RandomSource>(
    variant: QuestionVariant,
    payload: &DisplayPayload,
    history: &[RoundHistoryEntry],
    n: usize,
    p: &mut Picker<R>,
) -> Option<QuestionPayload> {
    use DisplayPayload as P;
    use QuestionVariant as V;

    let seen = payload.colors();
    let ask = Ask { variant, n };

    match (variant, payload) {
        (V::FirstColor, P::ShapeColor { shapes, .. }) => {
            let first = shapes.iter().filter(|s| s.order.is_some()).min_by_key(|s| s.order)?;
            Some(ask.color(p, "What colour appeared first?", first.color, &seen, &[]))
        }
        (V::LastColor, P::ShapeColor { shapes, .. }) => {
            let last = shapes.iter().filter(|s| s.order.is_some()).max_by_key(|s| s.order)?;
            Some(ask.color(p, "What colour appeared last?", last.color, &seen, &[]))
        }
        (V::LargestColor, P::ShapeColor { shapes, .. }) => {
            let largest = unique_max_by(shapes, |s| s.size.map(f64::from))?;
            Some(ask.color(p, "What colour was the largest shape?", largest.color, &seen, &[]))
        }
        (V::PositionColor, P::ShapeColor { shapes, .. }) => {
            let placed: Vec<(&ShapeInstance, Slot)> = shapes
                .iter()
                .filter_map(|s| match s.position {
                    Some(Position::Slot(slot)) => Some((s, slot)),
                    _ => None,
                })
                .collect();
            let (target, slot) = *p.choose(&placed)?;
            unique_color(shapes, target.color)?;
            let text = format!("Where was the {} shape?", target.color.label());
            Some(ask.slot(p, text, slot))
        }
        (V::ShapeSeen, P::ShapeColor { shapes, .. }) => {
            let shown = shapes_of(shapes);
            let correct = *p.choose(&shown)?;
            // Every other shown shape would also be right, so none is offered.
            let options = distinct_options(p, correct, &[], &Shape::ALL, &shown, n);
            Some(ask.shapes("Which of these shapes appeared?", correct, options))
        }

        (V::CorrectStroop, P::Stroop { texts }) => {
            let congruent = single(texts.iter().filter(|t| t.is_congruent()))?;
            let words = words_of(texts);
            Some(ask.word(p, "Which word is printed in its own colour?", congruent.word, &words))
        }
        (V::TextColor, P::Stroop { texts }) => {
            let target = p.choose(texts)?;
            let inks: Vec<Color> = texts.iter().map(|t| t.text_color).collect();
            let text = format!("What colour was the word \"{}\" printed in?", target.text);
            Some(ask.color(p, text, target.text_color, &inks, &[]))
        }
        (V::DifferentStroop, P::Stroop { texts }) => {
            let odd = odd_ink(texts)?;
            let words = words_of(texts);
            let text = "Which word was printed in a different colour from the others?";
            Some(ask.word(p, text, odd.word, &words))
        }

        (V::FourthColor, P::MultiShape { shapes }) => {
            let fourth = shapes.get(3)?;
            Some(ask.color(p, "What colour was the 4th shape?", fourth.color, &seen, &[]))
        }
        (V::CountColor, P::MultiShape { shapes }) => {
            let target = p.choose(shapes)?.color;
            let count = shapes.iter().filter(|s| s.color == target).count() as u32;
            let text = format!("How many {} shapes were there?", target.label());
            Some(ask.number(p, text, count, 0..=shapes.len() as u32))
        }
        (V::RecallPrevious, P::MultiShape { .. }) => {
            let previous = history.last()?.display.colors();
            let shared: Vec<Color> = dedup(&seen)
                .into_iter()
                .filter(|c| previous.contains(c))
                .collect();
            let correct = *p.choose(&shared)?;
            Some(ask.color(
                p,
                "Which of these colours also appeared in the previous round?",
                correct,
                &seen,
                &previous,
            ))
        }

        (V::SequenceLeft, P::ColorSequence { sequence, .. }) => {
            let first = *sequence.first()?;
            Some(ask.color(p, "What was the leftmost colour?", first, sequence, &[]))
        }
        (V::SequenceMiddle, P::ColorSequence { sequence, .. }) => {
            let middle = *sequence.get(sequence.len() / 2)?;
            let text = "What colour was in the middle of the sequence?";
            Some(ask.color(p, text, middle, sequence, &[]))
        }
        (V::SequenceRight, P::ColorSequence { sequence, .. }) => {
            let last = *sequence.last()?;
            Some(ask.color(p, "What was the rightmost colour?", last, sequence, &[]))
        }
        (V::BeforeColor, P::ColorSequence { sequence, mode }) => {
            if sequence.len() < 2 {
                return None;
            }
            let index = 1 + p.index(sequence.len() - 1);
            let target = sequence[index];
            if sequence.iter().filter(|c| **c == target).count() != 1 {
                return None;
            }
            let pool = match mode {
                SequenceMode::Simon => sequence.as_slice(),
                SequenceMode::Sequence => &Color::ALL[..],
            };
            let text = format!("Which colour came right before {}?", target.label());
            let options = distinct_options(p, sequence[index - 1], sequence, pool, &[target], n);
            Some(ask.colors(text, sequence[index - 1], options))
        }

        (V::FastestShape | V::FastestColor, P::AnimatedShapes { shapes, .. }) => {
            let fastest = unique_max_by(shapes, |s| s.speed)?;
            Some(if variant == V::FastestShape {
                ask.shape(p, "Which shape was the fastest?", fastest.shape, &shapes_of(shapes))
            } else {
                ask.color(p, "What colour was the fastest shape?", fastest.color, &seen, &[])
            })
        }
        (V::SlowestShape | V::SlowestColor, P::AnimatedShapes { shapes, .. }) => {
            let slowest = unique_max_by(shapes, |s| s.speed.map(|v| -v))?;
            Some(if variant == V::SlowestShape {
                ask.shape(p, "Which shape was the slowest?", slowest.shape, &shapes_of(shapes))
            } else {
                ask.color(p, "What colour was the slowest shape?", slowest.color, &seen, &[])
            })
        }
        (V::SpeedChangeShape, P::AnimatedShapes { shapes, .. }) => {
            let changed = single(shapes.iter().filter(|s| s.speed_change.is_some()))?;
            unique_shape(shapes, changed.shape)?;
            let text = "Which shape changed speed?";
            Some(ask.shape(p, text, changed.shape, &shapes_of(shapes)))
        }
        (V::FinishFirst, P::AnimatedShapes { shapes, .. }) => {
            let winner = unique_max_by(shapes, |s| Some(-s.finish_time()))?;
            unique_shape(shapes, winner.shape)?;
            let text = "Which shape crossed the finish line first?";
            Some(ask.shape(p, text, winner.shape, &shapes_of(shapes)))
        }

        (V::MissingColor, P::Mixed(_)) => {
            let missing: Vec<Color> = Color::ALL
                .into_iter()
                .filter(|c| !seen.contains(c))
                .collect();
            let correct = *p.choose(&missing)?;
            // Only colours that were shown can be distractors.
            let options = distinct_options(p, correct, &dedup(&seen), &[], &missing, n);
            Some(ask.colors("Which colour did NOT appear?", correct, options))
        }
        (V::AppearTwice, P::Mixed(MixedPayload::Combo { .. })) => {
            let twice: Vec<Color> = dedup(&seen)
                .into_iter()
                .filter(|c| seen.iter().filter(|s| *s == c).count() == 2)
                .collect();
            let correct = *p.choose(&twice)?;
            Some(ask.color(p, "Which colour appeared exactly twice?", correct, &seen, &twice))
        }
        (V::OverlapTop, P::Mixed(MixedPayload::OverlapRotate { shapes, .. })) => {
            let top = shapes.last()?;
            unique_shape(shapes, top.shape)?;
            Some(ask.shape(p, "Which shape was on top?", top.shape, &shapes_of(shapes)))
        }

        (V::PositionNumber, P::PositionMemory { grid }) => {
            let target = p.choose(grid)?;
            let color = target.color?;
            if grid.iter().filter(|c| c.color == Some(color)).count() != 1 {
                return None;
            }
            let text = format!("Which cell (1-9) held the {} circle?", color.label());
            Some(ask.number(p, text, u32::from(target.position) + 1, 1..=GRID_CELLS))
        }
        (V::EmptyPosition, P::PositionMemory { grid }) => {
            let occupied: Vec<u32> = grid.iter().map(|c| u32::from(c.position) + 1).collect();
            let empty: Vec<u32> = (1..=GRID_CELLS).filter(|c| !occupied.contains(c)).collect();
            let correct = *p.choose(&empty)?;
            let options = distinct_options(p, correct, &occupied, &[], &empty, n);
            Some(ask.numbers("Which cell (1-9) was empty?", correct, options))
        }

        (V::NthColor, P::SpeedReading { sequence }) => {
            let nth = *sequence.get(NTH_COLOR - 1)?;
            let text = format!("What was colour #{}?", NTH_COLOR);
            Some(ask.color(p, text, nth, sequence, &[]))
        }
        (V::ColorExists, P::SpeedReading { sequence }) => {
            let (color, present) = existence_target(p, sequence)?;
            let text = format!("Did {} appear?", color.label());
            Some(ask.yes_no(text, present))
        }

        (V::ShapeCount, P::ShapeCounting { shapes }) => {
            let target = p.choose(shapes)?.shape;
            let count = shapes.iter().filter(|s| s.shape == target).count() as u32;
            let text = format!("How many {} shapes were there?", target.label());
            Some(ask.number(p, text, count, 0..=shapes.len() as u32))
        }
        (V::FirstShape, P::ShapeCounting { shapes }) => {
            let first = shapes.iter().filter(|s| s.order.is_some()).min_by_key(|s| s.order)?;
            let text = "Which shape appeared first?";
            Some(ask.shape(p, text, first.shape, &shapes_of(shapes)))
        }

        (V::ColorMismatch, P::ColorMatch { right_texts, .. }) => {
            let odd = single(right_texts.iter().filter(|t| !t.is_congruent()))?;
            let words = words_of(right_texts);
            Some(ask.word(p, "Which word did not match its colour?", odd.word, &words))
        }

        (V::MainColor, P::DistractionTest { main_shape, .. }) => {
            let text = "What colour was the large shape?";
            Some(ask.color(p, text, main_shape.color, &seen, &[]))
        }
        (V::MainPosition, P::DistractionTest { main_shape, .. }) => {
            let Some(Position::Cell(cell)) = main_shape.position else {
                return None;
            };
            let text = "Which cell (1-9) held the large shape?";
            Some(ask.number(p, text, u32::from(cell) + 1, 1..=GRID_CELLS))
        }

        (V::FlashColor, P::FlashMemory { flash_sequence, .. }) => {
            let nth = *flash_sequence.get(NTH_FLASH - 1)?;
            let text = format!("What colour was flash #{}?", NTH_FLASH);
            Some(ask.color(p, text, nth, flash_sequence, &[]))
        }
        (V::FlashExists, P::FlashMemory { flash_sequence, .. }) => {
            let (color, present) = existence_target(p, flash_sequence)?;
            let text = format!("Did {} flash?", color.label());
            Some(ask.yes_no(text, present))
        }

        (V::LastColor, P::IncreasingSequence { sequence }) => {
            let last = *sequence.last()?;
            Some(ask.color(p, "What was the last colour?", last, sequence, &[]))
        }
        (V::LastThreeColors, P::IncreasingSequence { sequence }) => {
            let third = *sequence.iter().rev().nth(2)?;
            let text = "What was the third-to-last colour?";
            Some(ask.color(p, text, third, sequence, &[]))
        }

        (V::PartialShapeType, P::PartialShapes { partial_shape, .. }) => {
            Some(ask.shape(p, "What shape was partly shown?", partial_shape.shape, &[]))
        }
        (V::PartialShapeColor, P::PartialShapes { partial_shape, .. }) => {
            let text = "What colour was the partial shape?";
            Some(ask.color(p, text, partial_shape.color, &[], &[]))
        }

        (V::TopShape, P::OverlappingChaos { shapes }) => {
            let top = unique_max_by(shapes, |s| match s.position {
                Some(Position::Layer(layer)) => Some(f64::from(layer)),
                _ => None,
            })
            .or(shapes.last())?;
            unique_shape(shapes, top.shape)?;
            Some(ask.shape(p, "Which shape was on top?", top.shape, &shapes_of(shapes)))
        }
        (V::ColorCountChaos, P::OverlappingChaos { shapes }) => {
            let target = p.choose(shapes)?.color;
            let count = shapes.iter().filter(|s| s.color == target).count() as u32;
            let text = format!("How many {} shapes were there?", target.label());
            Some(ask.number(p, text, count, 0..=shapes.len() as u32))
        }

        (V::PathShape, P::PathTracking { paths, .. }) => {
            let target = p.choose(paths)?;
            if paths.iter().filter(|t| t.shape == target.shape).count() != 1 {
                return None;
            }
            let text = format!("Which path did the {} follow?", target.shape.label());
            Some(ask.path(p, text, target.path))
        }
        (V::DirectionChange, P::PathTracking { paths, .. }) => {
            let zigzag = single(paths.iter().filter(|t| t.path == PathKind::Zigzag))?;
            let shapes: Vec<Shape> = paths.iter().map(|t| t.shape).collect();
            if shapes.iter().filter(|s| **s == zigzag.shape).count() != 1 {
                return None;
            }
            Some(ask.shape(p, "Which shape changed direction?", zigzag.shape, &shapes))
        }

        (V::ColorChangeCount, P::StroopHard { texts }) => {
            let changed = single(
                texts
                    .iter()
                    .filter(|t| t.color_changes == Some(CHANGED_TWICE)),
            )?;
            let words = words_of(texts);
            let text = "Which word changed colour exactly twice?";
            Some(ask.word(p, text, changed.word, &words))
        }

        (V::WrongGroupColor, P::WrongColorMix { color_group, shapes }) => {
            let outsider = single(
                shapes
                    .iter()
                    .filter(|s| color_group.opposite().contains(s.color)),
            )?;
            // Neutral filler is not an answer either, so only in-group colours
            // are offered next to the outsider.
            let options = distinct_options(
                p,
                outsider.color,
                &dedup(&seen),
                color_group.members(),
                &non_members(*color_group),
                n,
            );
            let text = "Which colour does not belong with the others?";
            Some(ask.colors(text, outsider.color, options))
        }

        _ => None,
    }
}

/// Shared question-building state for one variant
struct Ask {
    variant: QuestionVariant,
    n: usize,
}

impl Ask {
    fn build(&self, text: impl Into<String>, correct: Answer, options: Vec<Answer>) -> QuestionPayload {
        QuestionPayload {
            question_text: text.into(),
            correct_answer: correct,
            options,
            variant: self.variant,
        }
    }

    fn color<R: RandomSource>(
        &self,
        p: &mut Picker<R>,
        text: impl Into<String>,
        correct: Color,
        preferred: &[Color],
        excluded: &[Color],
    ) -> QuestionPayload {
        let options = distinct_options(p, correct, preferred, &Color::ALL, excluded, self.n);
        self.colors(text, correct, options)
    }

    fn colors(&self, text: impl Into<String>, correct: Color, options: Vec<Color>) -> QuestionPayload {
        let options = options.into_iter().map(Answer::Color).collect();
        self.build(text, Answer::Color(correct), options)
    }

    fn shape<R: RandomSource>(
        &self,
        p: &mut Picker<R>,
        text: impl Into<String>,
        correct: Shape,
        preferred: &[Shape],
    ) -> QuestionPayload {
        let options = distinct_options(p, correct, preferred, &Shape::ALL, &[], self.n);
        self.shapes(text, correct, options)
    }

    fn shapes(&self, text: impl Into<String>, correct: Shape, options: Vec<Shape>) -> QuestionPayload {
        let options = options.into_iter().map(Answer::Shape).collect();
        self.build(text, Answer::Shape(correct), options)
    }

    /// Word answers; only words that were on screen are offered
    fn word<R: RandomSource>(
        &self,
        p: &mut Picker<R>,
        text: impl Into<String>,
        correct: Color,
        words: &[Color],
    ) -> QuestionPayload {
        let word = |c: Color| Answer::Text(c.label().to_string());
        let options = distinct_options(p, correct, words, &[], &[], self.n);
        self.build(text, word(correct), options.into_iter().map(word).collect())
    }

    fn number<R: RandomSource>(
        &self,
        p: &mut Picker<R>,
        text: impl Into<String>,
        correct: u32,
        range: std::ops::RangeInclusive<u32>,
    ) -> QuestionPayload {
        let options = number_options(p, correct, range, &[], self.n);
        self.numbers(text, correct, options)
    }

    fn numbers(&self, text: impl Into<String>, correct: u32, options: Vec<u32>) -> QuestionPayload {
        let options = options.into_iter().map(Answer::Number).collect();
        self.build(text, Answer::Number(correct), options)
    }

    fn slot<R: RandomSource>(
        &self,
        p: &mut Picker<R>,
        text: impl Into<String>,
        correct: Slot,
    ) -> QuestionPayload {
        let options = distinct_options(p, correct, &[], &Slot::ALL, &[], self.n);
        let options = options.into_iter().map(Answer::Slot).collect();
        self.build(text, Answer::Slot(correct), options)
    }

    fn path<R: RandomSource>(
        &self,
        p: &mut Picker<R>,
        text: impl Into<String>,
        correct: PathKind,
    ) -> QuestionPayload {
        let options = distinct_options(p, correct, &[], &PathKind::ALL, &[], self.n);
        let options = options.into_iter().map(Answer::Path).collect();
        self.build(text, Answer::Path(correct), options)
    }

    /// Yes/no questions always offer both answers, yes first
    fn yes_no(&self, text: impl Into<String>, correct: bool) -> QuestionPayload {
        let options = vec![Answer::YesNo(true), Answer::YesNo(false)];
        self.build(text, Answer::YesNo(correct), options)
    }
}

/// The only item of `items`, or `None` when there are zero or several
fn single<T>(mut items: impl Iterator<Item = T>) -> Option<T> {
    let first = items.next()?;
    match items.next() {
        Some(_) => None,
        None => Some(first),
    }
}

/// Item with the strictly greatest key; ties and missing keys yield `None`
fn unique_max_by<F>(shapes: &[ShapeInstance], key: F) -> Option<&ShapeInstance>
where
    F: Fn(&ShapeInstance) -> Option<f64>,
{
    let keyed: Vec<(&ShapeInstance, f64)> = shapes
        .iter()
        .map(|s| key(s).map(|k| (s, k)))
        .collect::<Option<_>>()?;
    let best = keyed
        .iter()
        .map(|(_, k)| *k)
        .fold(f64::NEG_INFINITY, f64::max);
    single(
        keyed
            .into_iter()
            .filter(|(_, k)| (k - best).abs() < 1e-9)
            .map(|(s, _)| s),
    )
}

fn unique_color(shapes: &[ShapeInstance], color: Color) -> Option<()> {
    (shapes.iter().filter(|s| s.color == color).count() == 1).then_some(())
}

fn unique_shape(shapes: &[ShapeInstance], shape: Shape) -> Option<()> {
    (shapes.iter().filter(|s| s.shape == shape).count() == 1).then_some(())
}

/// The one text whose ink no other text shares, when all the others share one ink
fn odd_ink(texts: &[TextInstance]) -> Option<&TextInstance> {
    let ink_count = |ink: Color| texts.iter().filter(|t| t.text_color == ink).count();
    let odd = single(texts.iter().filter(|t| ink_count(t.text_color) == 1))?;
    let others = texts.len() - 1;
    let shared = texts.iter().find(|t| t.text_color != odd.text_color)?;
    (others >= 2 && ink_count(shared.text_color) == others).then_some(odd)
}

/// Some colour is used by more than one shape, so colour counts differ
fn has_repeated_color(shapes: &[ShapeInstance]) -> bool {
    shapes
        .iter()
        .any(|s| shapes.iter().filter(|o| o.color == s.color).count() > 1)
}

fn shapes_of(shapes: &[ShapeInstance]) -> Vec<Shape> {
    shapes.iter().map(|s| s.shape).collect()
}

fn words_of(texts: &[TextInstance]) -> Vec<Color> {
    texts.iter().map(|t| t.word).collect()
}

fn dedup(colors: &[Color]) -> Vec<Color> {
    let mut out: Vec<Color> = Vec::with_capacity(colors.len());
    for color in colors {
        if !out.contains(color) {
            out.push(*color);
        }
    }
    out
}

fn non_members(group: ColorGroup) -> Vec<Color> {
    Color::ALL
        .into_iter()
        .filter(|c| !group.contains(*c))
        .collect()
}

/// Half the time a colour that was shown, otherwise one that was not
fn existence_target<R: RandomSource>(p: &mut Picker<R>, shown: &[Color]) -> Option<(Color, bool)> {
    let absent: Vec<Color> = Color::ALL
        .into_iter()
        .filter(|c| !shown.contains(c))
        .collect();
    if absent.is_empty() || p.chance(0.5) {
        p.choose(shown).map(|c| (*c, true))
    } else {
        p.choose(&absent).map(|c| (*c, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::StdRandom;
    use crate::stimulus::{GridCell, MotionMode, PathTrack};

    fn picker(seed: u64) -> Picker<StdRandom> {
        Picker::new(StdRandom::seeded(seed))
    }

    fn ask(
        variant: QuestionVariant,
        payload: &DisplayPayload,
        n: usize,
    ) -> QuestionPayload {
        assert!(applies(variant, payload, &[]));
        compute(variant, payload, &[], n, &mut picker(60)).unwrap()
    }

    fn sequence(colors: &[Color]) -> DisplayPayload {
        DisplayPayload::ColorSequence {
            mode: SequenceMode::Simon,
            sequence: colors.to_vec(),
        }
    }

    #[test]
    fn test_sequence_left_is_first_color() {
        let payload = sequence(&[
            Color::Red,
            Color::Blue,
            Color::Green,
            Color::Yellow,
            Color::Purple,
        ]);
        let q = ask(QuestionVariant::SequenceLeft, &payload, 4);
        assert_eq!(q.correct_answer, Answer::Color(Color::Red));
        assert_eq!(q.options.len(), 4);

        let q = ask(QuestionVariant::SequenceMiddle, &payload, 4);
        assert_eq!(q.correct_answer, Answer::Color(Color::Green));
        let q = ask(QuestionVariant::SequenceRight, &payload, 4);
        assert_eq!(q.correct_answer, Answer::Color(Color::Purple));
    }

    #[test]
    fn test_before_color_never_offers_target() {
        let payload = sequence(&[
            Color::Red,
            Color::Blue,
            Color::Green,
            Color::Yellow,
            Color::Purple,
        ]);
        let mut p = picker(61);
        for _ in 0..50 {
            let q = compute(QuestionVariant::BeforeColor, &payload, &[], 4, &mut p).unwrap();
            let Answer::Color(correct) = q.correct_answer else {
                panic!("expected colour answer");
            };
            let index = payload.colors().iter().position(|c| *c == correct).unwrap();
            let target = payload.colors()[index + 1];
            assert!(!q.options.contains(&Answer::Color(target)));
            assert!(q.question_text.contains(target.label()));
        }
    }

    #[test]
    fn test_speed_variants_need_no_speed_change() {
        let mut shapes = vec![
            ShapeInstance::new(Shape::Star, Color::Red),
            ShapeInstance::new(Shape::Circle, Color::Blue),
            ShapeInstance::new(Shape::Square, Color::Green),
        ];
        for (shape, speed) in shapes.iter_mut().zip([150.0, 70.0, 100.0]) {
            shape.speed = Some(speed);
        }
        let payload = DisplayPayload::AnimatedShapes {
            motion: MotionMode::Normal,
            shapes: shapes.clone(),
        };
        let q = ask(QuestionVariant::FastestShape, &payload, 3);
        assert_eq!(q.correct_answer, Answer::Shape(Shape::Star));
        let q = ask(QuestionVariant::SlowestColor, &payload, 3);
        assert_eq!(q.correct_answer, Answer::Color(Color::Blue));
        assert!(!applies(QuestionVariant::SpeedChangeShape, &payload, &[]));

        // slowing the fastest shape changes who finishes first
        shapes[0].speed_change = Some(0.3);
        let payload = DisplayPayload::AnimatedShapes {
            motion: MotionMode::SpeedChange,
            shapes,
        };
        assert!(!applies(QuestionVariant::FastestShape, &payload, &[]));
        let q = ask(QuestionVariant::SpeedChangeShape, &payload, 3);
        assert_eq!(q.correct_answer, Answer::Shape(Shape::Star));
        let q = ask(QuestionVariant::FinishFirst, &payload, 3);
        assert_eq!(q.correct_answer, Answer::Shape(Shape::Square));
    }

    #[test]
    fn test_empty_position_offers_only_occupied_cells() {
        let grid: Vec<GridCell> = [0u8, 1, 2, 4, 6, 8]
            .iter()
            .zip(Color::ALL)
            .map(|(cell, color)| GridCell {
                position: *cell,
                color: Some(color),
                shape: Some(Shape::Circle),
            })
            .collect();
        let payload = DisplayPayload::PositionMemory { grid };
        let mut p = picker(62);
        for _ in 0..30 {
            let q = compute(QuestionVariant::EmptyPosition, &payload, &[], 4, &mut p).unwrap();
            let empties = [4, 6, 8];
            let offered_empty = q
                .options
                .iter()
                .filter(|o| matches!(o, Answer::Number(n) if empties.contains(n)))
                .count();
            assert_eq!(offered_empty, 1);
            assert!(q.options.contains(&q.correct_answer));
        }
    }

    #[test]
    fn test_position_number_is_one_based() {
        let payload = DisplayPayload::PositionMemory {
            grid: vec![GridCell {
                position: 0,
                color: Some(Color::Pink),
                shape: Some(Shape::Circle),
            }],
        };
        let q = ask(QuestionVariant::PositionNumber, &payload, 4);
        assert_eq!(q.correct_answer, Answer::Number(1));
        assert!(q.question_text.contains("Pink"));
    }

    #[test]
    fn test_position_color_answers_with_slot() {
        let shapes: Vec<ShapeInstance> = Slot::ALL
            .iter()
            .zip([Color::Red, Color::Blue, Color::Green])
            .map(|(slot, color)| ShapeInstance {
                position: Some(Position::Slot(*slot)),
                size: Some(100),
                ..ShapeInstance::new(Shape::Circle, color)
            })
            .collect();
        let payload = DisplayPayload::ShapeColor {
            mode: ShapeColorMode::Sized,
            shapes,
        };
        let q = ask(QuestionVariant::PositionColor, &payload, 3);
        assert!(matches!(q.correct_answer, Answer::Slot(_)));
        assert_eq!(q.options.len(), 3);
        // equal sizes leave no single largest shape
        assert!(compute(QuestionVariant::LargestColor, &payload, &[], 3, &mut picker(63)).is_none());
        assert!(!applies(QuestionVariant::FirstColor, &payload, &[]));
    }

    #[test]
    fn test_missing_color_distractors_were_shown() {
        let payload = DisplayPayload::Mixed(MixedPayload::OverlapRotate {
            shapes: vec![
                ShapeInstance::new(Shape::Star, Color::Red),
                ShapeInstance::new(Shape::Circle, Color::Blue),
            ],
            texts: vec![
                TextInstance::new(Color::Green, Color::Yellow),
                TextInstance::new(Color::Purple, Color::Orange),
            ],
        });
        let shown = payload.colors();
        let q = ask(QuestionVariant::MissingColor, &payload, 5);
        assert_eq!(q.options.len(), 5);
        let Answer::Color(correct) = q.correct_answer else {
            panic!("expected colour answer");
        };
        assert!(!shown.contains(&correct));
        for option in &q.options {
            if let Answer::Color(c) = option {
                assert!(*c == correct || shown.contains(c));
            }
        }
    }

    #[test]
    fn test_missing_color_fails_when_everything_shown() {
        let shapes = Color::ALL
            .iter()
            .map(|c| ShapeInstance::new(Shape::Square, *c))
            .collect();
        let payload = DisplayPayload::Mixed(MixedPayload::OverlapRotate {
            shapes,
            texts: vec![],
        });
        assert!(compute(QuestionVariant::MissingColor, &payload, &[], 5, &mut picker(64)).is_none());
    }

    #[test]
    fn test_wrong_group_color_offers_only_group_members() {
        let payload = DisplayPayload::WrongColorMix {
            color_group: ColorGroup::Cool,
            shapes: [Color::Blue, Color::Green, Color::Purple, Color::Red, Color::Black]
                .iter()
                .map(|c| ShapeInstance::new(Shape::Diamond, *c))
                .collect(),
        };
        let q = ask(QuestionVariant::WrongGroupColor, &payload, 5);
        assert_eq!(q.correct_answer, Answer::Color(Color::Red));
        assert_eq!(q.options.len(), 4);
        assert!(!q.options.contains(&Answer::Color(Color::Black)));
    }

    #[test]
    fn test_color_change_count_picks_word_changed_twice() {
        let texts: Vec<TextInstance> = [(Color::Red, 1), (Color::Blue, 2), (Color::Green, 3)]
            .iter()
            .map(|(word, changes)| TextInstance {
                color_changes: Some(*changes),
                ..TextInstance::new(*word, Color::Pink)
            })
            .collect();
        let payload = DisplayPayload::StroopHard { texts };
        let q = ask(QuestionVariant::ColorChangeCount, &payload, 3);
        assert_eq!(q.correct_answer, Answer::Text("Blue".to_string()));
        assert_eq!(q.options.len(), 3);
    }

    #[test]
    fn test_recall_previous_excludes_previous_colors() {
        let previous = sequence(&[Color::Red, Color::Blue]);
        let history = vec![RoundHistoryEntry {
            round_type: previous.round_type(),
            display: previous,
        }];
        let payload = DisplayPayload::MultiShape {
            shapes: [Color::Red, Color::Green, Color::Yellow, Color::Pink, Color::Black]
                .iter()
                .map(|c| ShapeInstance::new(Shape::Star, *c))
                .collect(),
        };
        assert!(!applies(QuestionVariant::RecallPrevious, &payload, &[]));
        assert!(applies(QuestionVariant::RecallPrevious, &payload, &history));
        let q = compute(QuestionVariant::RecallPrevious, &payload, &history, 4, &mut picker(65))
            .unwrap();
        assert_eq!(q.correct_answer, Answer::Color(Color::Red));
        assert!(!q.options.contains(&Answer::Color(Color::Blue)));
    }

    #[test]
    fn test_direction_change_finds_zigzag() {
        let paths = vec![
            PathTrack {
                shape: Shape::Star,
                color: Color::Red,
                path: PathKind::Straight,
            },
            PathTrack {
                shape: Shape::Circle,
                color: Color::Blue,
                path: PathKind::Zigzag,
            },
        ];
        let shapes = paths
            .iter()
            .map(|t| ShapeInstance::new(t.shape, t.color))
            .collect();
        let payload = DisplayPayload::PathTracking { paths, shapes };
        let q = ask(QuestionVariant::DirectionChange, &payload, 3);
        assert_eq!(q.correct_answer, Answer::Shape(Shape::Circle));
    }

    #[test]
    fn test_shape_seen_offers_only_unshown_distractors() {
        let shapes = vec![
            ShapeInstance::new(Shape::Star, Color::Red),
            ShapeInstance::new(Shape::Circle, Color::Blue),
            ShapeInstance::new(Shape::Square, Color::Green),
        ];
        let shown = shapes_of(&shapes);
        let payload = DisplayPayload::ShapeColor {
            mode: ShapeColorMode::Sequential,
            shapes,
        };
        let mut p = picker(66);
        for _ in 0..30 {
            let q = compute(QuestionVariant::ShapeSeen, &payload, &[], 3, &mut p).unwrap();
            let Answer::Shape(correct) = q.correct_answer else {
                panic!("expected shape answer");
            };
            assert!(shown.contains(&correct));
            assert_eq!(q.options.len(), 3);
            let offered_shown = q
                .options
                .iter()
                .filter(|o| matches!(o, Answer::Shape(s) if shown.contains(s)))
                .count();
            assert_eq!(offered_shown, 1);
        }
        assert!(p.fallbacks().is_empty());
    }

    #[test]
    fn test_different_stroop_needs_one_odd_ink() {
        let paired = DisplayPayload::Stroop {
            texts: vec![
                TextInstance::new(Color::Red, Color::Red),
                TextInstance::new(Color::Blue, Color::Red),
                TextInstance::new(Color::Green, Color::Purple),
            ],
        };
        let q = ask(QuestionVariant::DifferentStroop, &paired, 3);
        assert_eq!(q.correct_answer, Answer::Text("Green".to_string()));
        assert_eq!(q.options.len(), 3);

        let all_distinct = DisplayPayload::Stroop {
            texts: vec![
                TextInstance::new(Color::Red, Color::Red),
                TextInstance::new(Color::Blue, Color::Green),
                TextInstance::new(Color::Green, Color::Purple),
            ],
        };
        assert!(!applies(QuestionVariant::DifferentStroop, &all_distinct, &[]));
    }

    #[test]
    fn test_color_counts_need_a_repeated_color() {
        let distinct: Vec<ShapeInstance> = [Color::Red, Color::Blue, Color::Green, Color::Pink]
            .iter()
            .map(|c| ShapeInstance::new(Shape::Star, *c))
            .collect();
        let multi = DisplayPayload::MultiShape {
            shapes: distinct.clone(),
        };
        let chaos = DisplayPayload::OverlappingChaos { shapes: distinct };
        assert!(!applies(QuestionVariant::CountColor, &multi, &[]));
        assert!(!applies(QuestionVariant::ColorCountChaos, &chaos, &[]));

        let repeated: Vec<ShapeInstance> = [Color::Red, Color::Blue, Color::Red, Color::Pink]
            .iter()
            .map(|c| ShapeInstance::new(Shape::Star, *c))
            .collect();
        let chaos = DisplayPayload::OverlappingChaos { shapes: repeated };
        let mut p = picker(67);
        let mut answers = std::collections::HashSet::new();
        for _ in 0..40 {
            let q = compute(QuestionVariant::ColorCountChaos, &chaos, &[], 4, &mut p).unwrap();
            answers.insert(q.correct_answer);
        }
        assert!(answers.contains(&Answer::Number(2)));
        assert!(answers.contains(&Answer::Number(1)));
    }
}
