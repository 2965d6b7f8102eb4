//! Static registry of round types, their timing/option configuration and
//! display names.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::{Error, Result};
use crate::question::QuestionVariant;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum RoundType {
    ShapeColor,
    Stroop,
    MultiShape,
    ColorSequence,
    AnimatedShapes,
    Mixed,
    PositionMemory,
    SpeedReading,
    ShapeCounting,
    ColorMatch,
    DistractionTest,
    FlashMemory,
    IncreasingSequence,
    PartialShapes,
    OverlappingChaos,
    PathTracking,
    StroopHard,
    WrongColorMix,
}

/// Per-round-type constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConfig {
    /// How long the stimulus stays on screen (ms)
    pub display_time_ms: u64,
    pub num_options: usize,
    pub num_shapes: usize,
    pub num_texts: usize,
    /// Primary question variant of the round type
    pub question: QuestionVariant,
}

impl StageConfig {
    const fn new(
        display_time_ms: u64,
        num_options: usize,
        num_shapes: usize,
        num_texts: usize,
        question: QuestionVariant,
    ) -> Self {
        Self {
            display_time_ms,
            num_options,
            num_shapes,
            num_texts,
            question,
        }
    }
}

impl RoundType {
    /// Every round type, in catalog order
    pub const ALL: [RoundType; 18] = [
        RoundType::ShapeColor,
        RoundType::Stroop,
        RoundType::MultiShape,
        RoundType::ColorSequence,
        RoundType::AnimatedShapes,
        RoundType::Mixed,
        RoundType::PositionMemory,
        RoundType::SpeedReading,
        RoundType::ShapeCounting,
        RoundType::ColorMatch,
        RoundType::DistractionTest,
        RoundType::FlashMemory,
        RoundType::IncreasingSequence,
        RoundType::PartialShapes,
        RoundType::OverlappingChaos,
        RoundType::PathTracking,
        RoundType::StroopHard,
        RoundType::WrongColorMix,
    ];

    pub fn id(&self) -> &'static str {
        self.into()
    }

    pub fn config(&self) -> StageConfig {
        use QuestionVariant as Q;
        match self {
            Self::ShapeColor => StageConfig::new(4000, 3, 1, 0, Q::LastColor),
            Self::Stroop => StageConfig::new(6000, 3, 0, 3, Q::TextColor),
            Self::MultiShape => StageConfig::new(5000, 4, 3, 0, Q::FourthColor),
            Self::ColorSequence => StageConfig::new(6000, 4, 5, 0, Q::SequenceMiddle),
            Self::AnimatedShapes => StageConfig::new(6000, 3, 3, 0, Q::FastestShape),
            Self::Mixed => StageConfig::new(7000, 5, 2, 3, Q::MissingColor),
            Self::PositionMemory => StageConfig::new(4000, 4, 6, 0, Q::PositionNumber),
            Self::SpeedReading => StageConfig::new(8000, 4, 0, 0, Q::NthColor),
            Self::ShapeCounting => StageConfig::new(10000, 4, 10, 0, Q::ShapeCount),
            Self::ColorMatch => StageConfig::new(6000, 4, 0, 4, Q::ColorMismatch),
            Self::DistractionTest => StageConfig::new(5000, 4, 5, 0, Q::MainColor),
            Self::FlashMemory => StageConfig::new(3000, 4, 1, 0, Q::FlashColor),
            Self::IncreasingSequence => StageConfig::new(8000, 4, 9, 0, Q::LastThreeColors),
            Self::PartialShapes => StageConfig::new(4000, 4, 1, 0, Q::PartialShapeType),
            Self::OverlappingChaos => StageConfig::new(6000, 4, 5, 0, Q::TopShape),
            Self::PathTracking => StageConfig::new(6000, 3, 3, 0, Q::PathShape),
            Self::StroopHard => StageConfig::new(8000, 3, 0, 3, Q::ColorChangeCount),
            Self::WrongColorMix => StageConfig::new(5000, 5, 5, 0, Q::WrongGroupColor),
        }
    }

    /// Player-facing name of the round type
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShapeColor => "Shapes & Colors",
            Self::Stroop => "Stroop Test",
            Self::MultiShape => "Many Shapes",
            Self::ColorSequence => "Color Sequence",
            Self::AnimatedShapes => "Racing Shapes",
            Self::Mixed => "Mixed",
            Self::PositionMemory => "Position Memory",
            Self::SpeedReading => "Speed Reading",
            Self::ShapeCounting => "Quick Count",
            Self::ColorMatch => "Color Match",
            Self::DistractionTest => "Distraction Test",
            Self::FlashMemory => "Flash Memory",
            Self::IncreasingSequence => "Growing Sequence",
            Self::PartialShapes => "Partial Shapes",
            Self::OverlappingChaos => "Overlapping Chaos",
            Self::PathTracking => "Path Tracking",
            Self::StroopHard => "Hard Stroop",
            Self::WrongColorMix => "Odd Color Out",
        }
    }
}

/// Every round type, in catalog order
pub fn all_round_types() -> &'static [RoundType] {
    &RoundType::ALL
}

pub fn config_for(round_type: RoundType) -> StageConfig {
    round_type.config()
}

pub fn name_for(round_type: RoundType) -> &'static str {
    round_type.name()
}

/// Parse a kebab-case round identifier such as `"wrong-color-mix"`
pub fn parse_round_type(id: &str) -> Result<RoundType> {
    RoundType::from_str(id.trim()).map_err(|_| Error::InvalidRoundType(id.to_string()))
}
