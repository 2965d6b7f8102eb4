//! Generators for rounds built around colour words.

use crate::diagnostics::Fallback;
use crate::palette::{Color, Slot};
use crate::random::{Picker, RandomSource};

use super::payload::{DisplayPayload, MixedPayload, ShapeInstance, TextInstance};

const STROOP_WORDS: usize = 3;
const MATCH_PAIRS: usize = 4;
const HARD_COLOR_CHANGES: [u8; 3] = [1, 2, 3];
const MIXED_SHAPES: usize = 2;
const MIXED_SEQUENCE: usize = 3;
const OVERLAP_ROTATION: u16 = 45;

/// Ink for `word` that is neither the word itself nor already taken
fn mismatched_ink<R: RandomSource>(p: &mut Picker<R>, word: Color, taken: &[Color]) -> Color {
    let mut exclude = taken.to_vec();
    exclude.push(word);
    match p.pick_color_from(&Color::ALL, &exclude) {
        Some(ink) => ink,
        None => {
            p.record(Fallback::NeutralFiller);
            p.pick_color(&[word])
        }
    }
}

/// `count` distinct words, each inked in a colour that differs from its meaning
/// and from the other inks
fn mismatched_texts<R: RandomSource>(p: &mut Picker<R>, count: usize) -> Vec<TextInstance> {
    let words = p.shuffled(&Color::WORDS);
    let mut inks: Vec<Color> = Vec::with_capacity(count);
    let mut texts = Vec::with_capacity(count);
    for word in words.into_iter().take(count) {
        let ink = mismatched_ink(p, word, &inks);
        inks.push(ink);
        texts.push(TextInstance::new(word, ink));
    }
    texts
}

/// Three words in the three slots; exactly one is printed in its own colour.
///
/// In a paired layout the first mismatched word borrows the congruent word's
/// ink, leaving the other mismatched word as the only one with an ink of its own.
pub fn stroop<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    let words = p.shuffled(&Color::WORDS);
    let words = &words[..STROOP_WORDS];
    let congruent = p.index(STROOP_WORDS);
    let slots = p.shuffled(&Slot::ALL);
    let mut paired = p.chance(0.5);

    let mut inks = vec![words[congruent]];
    let mut texts = Vec::with_capacity(STROOP_WORDS);
    for (i, &word) in words.iter().enumerate() {
        let ink = if i == congruent {
            word
        } else if paired {
            paired = false;
            words[congruent]
        } else {
            let ink = mismatched_ink(p, word, &inks);
            inks.push(ink);
            ink
        };
        let shuffled = p.chance(0.3);
        texts.push(TextInstance {
            position: Some(slots[i]),
            shuffled: Some(shuffled),
            ..TextInstance::new(word, ink)
        });
    }

    DisplayPayload::Stroop { texts }
}

/// Three moving mismatched words whose ink changes 1, 2 and 3 times
pub fn stroop_hard<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    let changes = p.shuffled(&HARD_COLOR_CHANGES);
    let texts = mismatched_texts(p, STROOP_WORDS)
        .into_iter()
        .zip(changes)
        .map(|(text, changes)| TextInstance {
            shuffled: Some(true),
            color_changes: Some(changes),
            ..text
        })
        .collect();

    DisplayPayload::StroopHard { texts }
}

/// Four swatches next to four words; exactly one word is inked wrong
pub fn color_match<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    let left_colors = p.pick_distinct_colors(MATCH_PAIRS, &[]);
    let mismatch = p.index(left_colors.len());

    let right_texts = left_colors
        .iter()
        .enumerate()
        .map(|(i, &color)| {
            if i == mismatch {
                let ink = p.pick_color(&[color]);
                TextInstance::new(color, ink)
            } else {
                TextInstance::new(color, color)
            }
        })
        .collect();

    DisplayPayload::ColorMatch {
        left_colors,
        right_texts,
    }
}

pub fn mixed<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    if p.chance(0.4) {
        mixed_combo(p)
    } else {
        mixed_overlap(p)
    }
}

pub fn mixed_combo<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    let shapes = distinct_shapes(p, MIXED_SHAPES);
    let slots = p.shuffled(&Slot::ALL);
    let texts = mismatched_texts(p, STROOP_WORDS)
        .into_iter()
        .zip(slots)
        .map(|(text, slot)| TextInstance {
            position: Some(slot),
            ..text
        })
        .collect();
    // The sequence repeats one shape colour so the round never shows the
    // whole palette.
    let shape_colors: Vec<Color> = shapes
        .iter()
        .map(|s| s.color)
        .filter(|c| *c != Color::Black)
        .collect();
    let anchor = p.pick_color_from(&shape_colors, &[]);
    let mut exclude = vec![Color::Black];
    exclude.extend(anchor);
    let mut sequence: Vec<Color> = anchor.into_iter().collect();
    while sequence.len() < MIXED_SEQUENCE {
        let color = p.pick_color(&exclude);
        exclude.push(color);
        sequence.push(color);
    }
    p.shuffle(&mut sequence);

    DisplayPayload::Mixed(MixedPayload::Combo {
        shapes,
        texts,
        sequence,
    })
}

pub fn mixed_overlap<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    let mut shapes = distinct_shapes(p, MIXED_SHAPES);
    if let Some(top) = shapes.last_mut() {
        top.rotation = Some(OVERLAP_ROTATION);
    }
    let texts = mismatched_texts(p, STROOP_WORDS);

    DisplayPayload::Mixed(MixedPayload::OverlapRotate { shapes, texts })
}

fn distinct_shapes<R: RandomSource>(p: &mut Picker<R>, n: usize) -> Vec<ShapeInstance> {
    let kinds = p.pick_distinct_shapes(n, &[]);
    let colors = p.pick_distinct_colors(n, &[]);
    kinds
        .into_iter()
        .zip(colors)
        .map(|(shape, color)| ShapeInstance::new(shape, color))
        .collect()
}
