//! Generators for rounds that show colours one at a time or on a grid.

use crate::catalog::RoundType;
use crate::palette::{Color, Shape};
use crate::random::{Picker, RandomSource};

use super::payload::{DisplayPayload, GridCell, SequenceMode, ShapeInstance};

/// Colours a simon round draws from
pub const SIMON_COLORS: [Color; 5] = [
    Color::Red,
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::Purple,
];
const SEQUENCE_LENGTH: usize = 5;
const SPEED_READING_LENGTH: usize = 10;
const FLASHES: usize = 3;
const GRID_CELLS: u8 = 9;
const OCCUPIED_CELLS: usize = 6;

pub fn color_sequence<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    if p.chance(0.3) {
        simon_sequence(p)
    } else {
        palette_sequence(p)
    }
}

/// Five distinct colours from the five simon colours
pub fn simon_sequence<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    let mut sequence = p.shuffled(&SIMON_COLORS);
    sequence.truncate(SEQUENCE_LENGTH);
    DisplayPayload::ColorSequence {
        mode: SequenceMode::Simon,
        sequence,
    }
}

/// Five distinct colours from the whole palette
pub fn palette_sequence<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    DisplayPayload::ColorSequence {
        mode: SequenceMode::Sequence,
        sequence: p.pick_distinct_colors(SEQUENCE_LENGTH, &[]),
    }
}

/// Ten colours flashed quickly; neighbours never repeat
pub fn speed_reading<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    let mut sequence: Vec<Color> = Vec::with_capacity(SPEED_READING_LENGTH);
    for _ in 0..SPEED_READING_LENGTH {
        let previous: Vec<Color> = sequence.last().copied().into_iter().collect();
        sequence.push(p.pick_color(&previous));
    }
    DisplayPayload::SpeedReading { sequence }
}

pub fn flash_memory<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    let flash_sequence = p.pick_distinct_colors(FLASHES, &[]);
    let shape = p.pick_shape(&[]);
    let shapes = vec![ShapeInstance::new(shape, flash_sequence[0])];
    DisplayPayload::FlashMemory {
        flash_sequence,
        shapes,
    }
}

/// A growing run of distinct colours, capped at the palette size
pub fn increasing_sequence<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    let length = RoundType::IncreasingSequence
        .config()
        .num_shapes
        .min(Color::ALL.len());
    DisplayPayload::IncreasingSequence {
        sequence: p.pick_distinct_colors(length, &[]),
    }
}

/// Six circles of distinct colours in six of the nine grid cells
pub fn position_memory<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    let cells: Vec<u8> = (0..GRID_CELLS).collect();
    let cells = p.shuffled(&cells);
    let colors = p.pick_distinct_colors(OCCUPIED_CELLS, &[]);

    let grid = cells
        .into_iter()
        .zip(colors)
        .map(|(position, color)| GridCell {
            position,
            color: Some(color),
            shape: Some(Shape::Circle),
        })
        .collect();

    DisplayPayload::PositionMemory { grid }
}
