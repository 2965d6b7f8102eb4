//! Stimulus generation: one random [`DisplayPayload`] per round type.
//!
//! Generation never fails. Degraded draws are counted in the picker's
//! [`FallbackLog`](crate::diagnostics::FallbackLog).

mod payload;
pub mod sequence;
pub mod shapes;
pub mod text;

pub use payload::*;

use tracing::trace;

use crate::catalog::RoundType;
use crate::random::{Picker, RandomSource};

/// Build the display payload for `round_type`
pub fn generate<R: RandomSource>(round_type: RoundType, picker: &mut Picker<R>) -> DisplayPayload {
    let payload = match round_type {
        RoundType::ShapeColor => shapes::shape_color(picker),
        RoundType::Stroop => text::stroop(picker),
        RoundType::MultiShape => shapes::multi_shape(picker),
        RoundType::ColorSequence => sequence::color_sequence(picker),
        RoundType::AnimatedShapes => shapes::animated_shapes(picker),
        RoundType::Mixed => text::mixed(picker),
        RoundType::PositionMemory => sequence::position_memory(picker),
        RoundType::SpeedReading => sequence::speed_reading(picker),
        RoundType::ShapeCounting => shapes::shape_counting(picker),
        RoundType::ColorMatch => text::color_match(picker),
        RoundType::DistractionTest => shapes::distraction_test(picker),
        RoundType::FlashMemory => sequence::flash_memory(picker),
        RoundType::IncreasingSequence => sequence::increasing_sequence(picker),
        RoundType::PartialShapes => shapes::partial_shapes(picker),
        RoundType::OverlappingChaos => shapes::overlapping_chaos(picker),
        RoundType::PathTracking => shapes::path_tracking(picker),
        RoundType::StroopHard => text::stroop_hard(picker),
        RoundType::WrongColorMix => shapes::wrong_color_mix(picker),
    };
    trace!("Generated {} payload: {:?}", round_type, payload.fields());
    payload
}
