use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

use crate::catalog::RoundType;
use crate::palette::{Color, ColorGroup, PathKind, Shape, ShapePart, Slot};

/// Where a shape sits on the stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Position {
    /// One of the three horizontal slots
    Slot(Slot),
    /// Cell index (0-based) of a 3x3 grid
    Cell(u8),
    /// Stacking layer; higher values are drawn on top
    Layer(u8),
}

/// A single rendered shape plus round-specific metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeInstance {
    pub shape: Shape,
    pub color: Color,
    /// Motion speed (px/s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Edge length (px)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Rotation (degrees)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<u16>,
    /// 1-based appearance order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fade_in: Option<bool>,
    /// Speed multiplier applied halfway through the run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_change: Option<f64>,
}

impl ShapeInstance {
    pub fn new(shape: Shape, color: Color) -> Self {
        Self {
            shape,
            color,
            speed: None,
            size: None,
            position: None,
            rotation: None,
            order: None,
            fade_in: None,
            speed_change: None,
        }
    }

    /// Time to cross a unit-length track, honouring a mid-run speed change
    pub fn finish_time(&self) -> f64 {
        let speed = self.speed.unwrap_or(100.0);
        match self.speed_change {
            Some(factor) => 0.5 / speed + 0.5 / (speed * factor),
            None => 1.0 / speed,
        }
    }
}

/// A colour word, possibly inked in a different colour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextInstance {
    /// The word as displayed (the label of `word`)
    pub text: String,
    /// The colour the word names
    pub word: Color,
    /// The ink the word is printed in
    pub text_color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Slot>,
    /// Whether the word moves around while displayed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shuffled: Option<bool>,
    /// How many times the ink changes while displayed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_changes: Option<u8>,
}

impl TextInstance {
    pub fn new(word: Color, text_color: Color) -> Self {
        Self {
            text: word.label().to_string(),
            word,
            text_color,
            position: None,
            shuffled: None,
            color_changes: None,
        }
    }

    /// Word meaning and ink agree
    pub fn is_congruent(&self) -> bool {
        self.word == self.text_color
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    /// 0-based cell index in a 3x3 grid
    pub position: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Shape>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathTrack {
    pub shape: Shape,
    pub color: Color,
    pub path: PathKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialShape {
    pub shape: Shape,
    pub color: Color,
    pub part: ShapePart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, Display)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ShapeColorMode {
    /// Three shapes appear one after another
    Sequential,
    /// Three differently sized shapes side by side
    Sized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, Display)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SequenceMode {
    /// Five colours from the five primary colours
    Simon,
    /// Five colours from the whole palette
    Sequence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, Display)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum MotionMode {
    /// One shape changes speed halfway
    SpeedChange,
    /// Shapes run along curved tracks
    Curve,
    Normal,
}

/// The two structurally different payloads of a mixed round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum MixedPayload {
    /// Two shapes, three Stroop words and a three-colour sequence
    Combo {
        shapes: Vec<ShapeInstance>,
        texts: Vec<TextInstance>,
        sequence: Vec<Color>,
    },
    /// Two overlapping shapes (the second rotated 45°) and three Stroop words
    OverlapRotate {
        shapes: Vec<ShapeInstance>,
        texts: Vec<TextInstance>,
    },
}

/// Stimulus data for one round, one variant per round type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "round", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum DisplayPayload {
    ShapeColor {
        mode: ShapeColorMode,
        shapes: Vec<ShapeInstance>,
    },
    Stroop {
        texts: Vec<TextInstance>,
    },
    MultiShape {
        shapes: Vec<ShapeInstance>,
    },
    ColorSequence {
        mode: SequenceMode,
        sequence: Vec<Color>,
    },
    AnimatedShapes {
        motion: MotionMode,
        shapes: Vec<ShapeInstance>,
    },
    Mixed(MixedPayload),
    PositionMemory {
        grid: Vec<GridCell>,
    },
    SpeedReading {
        sequence: Vec<Color>,
    },
    ShapeCounting {
        shapes: Vec<ShapeInstance>,
    },
    ColorMatch {
        left_colors: Vec<Color>,
        right_texts: Vec<TextInstance>,
    },
    DistractionTest {
        main_shape: ShapeInstance,
        distraction_shapes: Vec<ShapeInstance>,
    },
    FlashMemory {
        flash_sequence: Vec<Color>,
        shapes: Vec<ShapeInstance>,
    },
    IncreasingSequence {
        sequence: Vec<Color>,
    },
    PartialShapes {
        partial_shape: PartialShape,
        shapes: Vec<ShapeInstance>,
    },
    OverlappingChaos {
        shapes: Vec<ShapeInstance>,
    },
    PathTracking {
        paths: Vec<PathTrack>,
        shapes: Vec<ShapeInstance>,
    },
    StroopHard {
        texts: Vec<TextInstance>,
    },
    WrongColorMix {
        color_group: ColorGroup,
        shapes: Vec<ShapeInstance>,
    },
}

/// Names of the optional payload fields a round can populate
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, IntoStaticStr, Display,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum PayloadField {
    Shapes,
    Texts,
    Sequence,
    Grid,
    FlashSequence,
    Paths,
    MainShape,
    DistractionShapes,
    LeftColors,
    RightTexts,
    PartialShape,
    ColorGroup,
}

impl DisplayPayload {
    pub fn round_type(&self) -> RoundType {
        match self {
            Self::ShapeColor { .. } => RoundType::ShapeColor,
            Self::Stroop { .. } => RoundType::Stroop,
            Self::MultiShape { .. } => RoundType::MultiShape,
            Self::ColorSequence { .. } => RoundType::ColorSequence,
            Self::AnimatedShapes { .. } => RoundType::AnimatedShapes,
            Self::Mixed(_) => RoundType::Mixed,
            Self::PositionMemory { .. } => RoundType::PositionMemory,
            Self::SpeedReading { .. } => RoundType::SpeedReading,
            Self::ShapeCounting { .. } => RoundType::ShapeCounting,
            Self::ColorMatch { .. } => RoundType::ColorMatch,
            Self::DistractionTest { .. } => RoundType::DistractionTest,
            Self::FlashMemory { .. } => RoundType::FlashMemory,
            Self::IncreasingSequence { .. } => RoundType::IncreasingSequence,
            Self::PartialShapes { .. } => RoundType::PartialShapes,
            Self::OverlappingChaos { .. } => RoundType::OverlappingChaos,
            Self::PathTracking { .. } => RoundType::PathTracking,
            Self::StroopHard { .. } => RoundType::StroopHard,
            Self::WrongColorMix { .. } => RoundType::WrongColorMix,
        }
    }

    /// The payload fields this variant populates
    pub fn fields(&self) -> &'static [PayloadField] {
        use PayloadField as F;
        match self {
            Self::ShapeColor { .. }
            | Self::MultiShape { .. }
            | Self::AnimatedShapes { .. }
            | Self::ShapeCounting { .. }
            | Self::OverlappingChaos { .. } => &[F::Shapes],
            Self::Stroop { .. } | Self::StroopHard { .. } => &[F::Texts],
            Self::ColorSequence { .. }
            | Self::SpeedReading { .. }
            | Self::IncreasingSequence { .. } => &[F::Sequence],
            Self::Mixed(MixedPayload::Combo { .. }) => &[F::Shapes, F::Texts, F::Sequence],
            Self::Mixed(MixedPayload::OverlapRotate { .. }) => &[F::Shapes, F::Texts],
            Self::PositionMemory { .. } => &[F::Grid],
            Self::ColorMatch { .. } => &[F::LeftColors, F::RightTexts],
            Self::DistractionTest { .. } => &[F::MainShape, F::DistractionShapes],
            Self::FlashMemory { .. } => &[F::Shapes, F::FlashSequence],
            Self::PartialShapes { .. } => &[F::Shapes, F::PartialShape],
            Self::PathTracking { .. } => &[F::Shapes, F::Paths],
            Self::WrongColorMix { .. } => &[F::Shapes, F::ColorGroup],
        }
    }

    /// The `shapes` field, when populated
    pub fn shapes(&self) -> Option<&[ShapeInstance]> {
        match self {
            Self::ShapeColor { shapes, .. }
            | Self::MultiShape { shapes }
            | Self::AnimatedShapes { shapes, .. }
            | Self::ShapeCounting { shapes }
            | Self::FlashMemory { shapes, .. }
            | Self::PartialShapes { shapes, .. }
            | Self::OverlappingChaos { shapes }
            | Self::PathTracking { shapes, .. }
            | Self::WrongColorMix { shapes, .. }
            | Self::Mixed(MixedPayload::Combo { shapes, .. })
            | Self::Mixed(MixedPayload::OverlapRotate { shapes, .. }) => Some(shapes.as_slice()),
            _ => None,
        }
    }

    /// Every colour the player could have seen, in display order, with repeats
    pub fn colors(&self) -> Vec<Color> {
        let from_shapes =
            |shapes: &[ShapeInstance]| -> Vec<Color> { shapes.iter().map(|s| s.color).collect() };
        let inks =
            |texts: &[TextInstance]| -> Vec<Color> { texts.iter().map(|t| t.text_color).collect() };
        match self {
            Self::Stroop { texts } | Self::StroopHard { texts } => inks(texts),
            Self::ColorSequence { sequence, .. }
            | Self::SpeedReading { sequence }
            | Self::IncreasingSequence { sequence } => sequence.clone(),
            Self::Mixed(MixedPayload::Combo {
                shapes,
                texts,
                sequence,
            }) => {
                let mut colors = from_shapes(shapes);
                colors.extend(inks(texts));
                colors.extend(sequence.iter().copied());
                colors
            }
            Self::Mixed(MixedPayload::OverlapRotate { shapes, texts }) => {
                let mut colors = from_shapes(shapes);
                colors.extend(inks(texts));
                colors
            }
            Self::PositionMemory { grid } => grid.iter().filter_map(|c| c.color).collect(),
            Self::ColorMatch {
                left_colors,
                right_texts,
            } => {
                let mut colors = left_colors.clone();
                colors.extend(inks(right_texts));
                colors
            }
            Self::DistractionTest {
                main_shape,
                distraction_shapes,
            } => {
                let mut colors = vec![main_shape.color];
                colors.extend(distraction_shapes.iter().map(|s| s.color));
                colors
            }
            Self::FlashMemory { flash_sequence, .. } => flash_sequence.clone(),
            Self::ShapeColor { shapes, .. }
            | Self::MultiShape { shapes }
            | Self::AnimatedShapes { shapes, .. }
            | Self::ShapeCounting { shapes }
            | Self::PartialShapes { shapes, .. }
            | Self::OverlappingChaos { shapes }
            | Self::PathTracking { shapes, .. }
            | Self::WrongColorMix { shapes, .. } => from_shapes(shapes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_time_with_speed_change() {
        let mut shape = ShapeInstance::new(Shape::Star, Color::Red);
        shape.speed = Some(100.0);
        assert!((shape.finish_time() - 0.01).abs() < 1e-12);

        shape.speed_change = Some(0.5);
        assert!((shape.finish_time() - 0.015).abs() < 1e-12);
    }

    #[test]
    fn test_text_instance_uses_label() {
        let text = TextInstance::new(Color::Orange, Color::Blue);
        assert_eq!(text.text, "Orange");
        assert!(!text.is_congruent());
        assert!(TextInstance::new(Color::Blue, Color::Blue).is_congruent());
    }

    #[test]
    fn test_serialized_payload_is_sparse() {
        let payload = DisplayPayload::FlashMemory {
            flash_sequence: vec![Color::Red, Color::Blue, Color::Green],
            shapes: vec![ShapeInstance::new(Shape::Circle, Color::Red)],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["round"], "flash-memory");
        assert_eq!(json["flashSequence"][1], "blue");
        assert_eq!(json["shapes"][0]["shape"], "circle");
        // unset shape metadata is omitted, not null-filled
        assert!(json["shapes"][0].get("speed").is_none());
        assert!(json.get("texts").is_none());
    }

    #[test]
    fn test_mixed_fields_follow_mode() {
        let overlap = DisplayPayload::Mixed(MixedPayload::OverlapRotate {
            shapes: vec![],
            texts: vec![],
        });
        assert_eq!(overlap.fields(), &[PayloadField::Shapes, PayloadField::Texts]);
        assert_eq!(overlap.round_type(), RoundType::Mixed);
    }
}
