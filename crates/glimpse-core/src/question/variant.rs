use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::catalog::RoundType;

/// Question phrasing and answer-derivation rule
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
pub enum QuestionVariant {
    FirstColor,
    LastColor,
    LargestColor,
    PositionColor,
    ShapeSeen,
    CorrectStroop,
    TextColor,
    DifferentStroop,
    FourthColor,
    CountColor,
    RecallPrevious,
    #[strum(serialize = "sequence:left")]
    #[serde(rename = "sequence:left")]
    SequenceLeft,
    #[strum(serialize = "sequence:middle")]
    #[serde(rename = "sequence:middle")]
    SequenceMiddle,
    #[strum(serialize = "sequence:right")]
    #[serde(rename = "sequence:right")]
    SequenceRight,
    BeforeColor,
    FastestShape,
    FastestColor,
    SlowestShape,
    SlowestColor,
    SpeedChangeShape,
    FinishFirst,
    MissingColor,
    AppearTwice,
    OverlapTop,
    PositionNumber,
    EmptyPosition,
    NthColor,
    ColorExists,
    ShapeCount,
    FirstShape,
    ColorMismatch,
    MainColor,
    MainPosition,
    FlashColor,
    FlashExists,
    LastThreeColors,
    PartialShapeType,
    PartialShapeColor,
    TopShape,
    ColorCountChaos,
    PathShape,
    DirectionChange,
    ColorChangeCount,
    WrongGroupColor,
}

impl QuestionVariant {
    pub fn id(&self) -> &'static str {
        self.into()
    }

    /// Variants a round type can ask, before payload preconditions are checked
    pub fn for_round(round_type: RoundType) -> &'static [QuestionVariant] {
        use QuestionVariant::*;
        match round_type {
            RoundType::ShapeColor => {
                &[FirstColor, LastColor, LargestColor, PositionColor, ShapeSeen]
            }
            RoundType::Stroop => &[CorrectStroop, TextColor, DifferentStroop],
            RoundType::MultiShape => &[FourthColor, CountColor, RecallPrevious],
            RoundType::ColorSequence => {
                &[SequenceLeft, SequenceMiddle, SequenceRight, BeforeColor]
            }
            RoundType::AnimatedShapes => &[
                FastestShape,
                FastestColor,
                SlowestShape,
                SlowestColor,
                SpeedChangeShape,
                FinishFirst,
            ],
            RoundType::Mixed => &[MissingColor, AppearTwice, OverlapTop],
            RoundType::PositionMemory => &[PositionNumber, EmptyPosition],
            RoundType::SpeedReading => &[NthColor, ColorExists],
            RoundType::ShapeCounting => &[ShapeCount, FirstShape],
            RoundType::ColorMatch => &[ColorMismatch],
            RoundType::DistractionTest => &[MainColor, MainPosition],
            RoundType::FlashMemory => &[FlashColor, FlashExists],
            RoundType::IncreasingSequence => &[LastColor, LastThreeColors],
            RoundType::PartialShapes => &[PartialShapeType, PartialShapeColor],
            RoundType::OverlappingChaos => &[TopShape, ColorCountChaos],
            RoundType::PathTracking => &[PathShape, DirectionChange],
            RoundType::StroopHard => &[ColorChangeCount],
            RoundType::WrongColorMix => &[WrongGroupColor],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_sequence_ids_keep_colon() {
        assert_eq!(QuestionVariant::SequenceLeft.id(), "sequence:left");
        assert_eq!(
            QuestionVariant::from_str("sequence:right").unwrap(),
            QuestionVariant::SequenceRight
        );
        let json = serde_json::to_string(&QuestionVariant::SequenceMiddle).unwrap();
        assert_eq!(json, "\"sequence:middle\"");
        assert_eq!(QuestionVariant::DifferentStroop.id(), "different-stroop");
        assert_eq!(QuestionVariant::ShapeSeen.id(), "shape-seen");
    }

    #[test]
    fn test_primary_question_is_offered_by_its_round() {
        for round_type in RoundType::ALL {
            let primary = round_type.config().question;
            assert!(
                QuestionVariant::for_round(round_type).contains(&primary),
                "{} does not offer {}",
                round_type,
                primary
            );
        }
    }
}
