//! Fixed stimulus vocabulary: colours, shapes, colour groups and the small
//! placement enums the generators attach to shapes.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

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
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    Black,
    Pink,
}

impl Color {
    /// The whole palette, in draw order
    pub const ALL: [Color; 8] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Purple,
        Color::Orange,
        Color::Black,
        Color::Pink,
    ];

    /// Colours whose names are used as Stroop words
    pub const WORDS: [Color; 6] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Purple,
        Color::Orange,
    ];

    pub fn id(&self) -> &'static str {
        self.into()
    }

    /// Player-facing name, also the word shown in Stroop rounds
    pub fn label(&self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Blue => "Blue",
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Purple => "Purple",
            Self::Orange => "Orange",
            Self::Black => "Black",
            Self::Pink => "Pink",
        }
    }

    /// Display hex value (`#RRGGBB`)
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Red => "#EF4444",
            Self::Blue => "#3B82F6",
            Self::Green => "#10B981",
            Self::Yellow => "#FBBF24",
            Self::Purple => "#A855F7",
            Self::Orange => "#F97316",
            Self::Black => "#000000",
            Self::Pink => "#EC4899",
        }
    }

    /// RGB components of [`Color::hex`]
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Red => (0xEF, 0x44, 0x44),
            Self::Blue => (0x3B, 0x82, 0xF6),
            Self::Green => (0x10, 0xB9, 0x81),
            Self::Yellow => (0xFB, 0xBF, 0x24),
            Self::Purple => (0xA8, 0x55, 0xF7),
            Self::Orange => (0xF9, 0x73, 0x16),
            Self::Black => (0x00, 0x00, 0x00),
            Self::Pink => (0xEC, 0x48, 0x99),
        }
    }

    /// Warm/cool membership; black belongs to neither
    pub fn group(&self) -> Option<ColorGroup> {
        match self {
            Self::Red | Self::Orange | Self::Yellow | Self::Pink => Some(ColorGroup::Warm),
            Self::Blue | Self::Green | Self::Purple => Some(ColorGroup::Cool),
            Self::Black => None,
        }
    }
}

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
pub enum Shape {
    Square,
    Circle,
    Triangle,
    Diamond,
    Star,
}

impl Shape {
    pub const ALL: [Shape; 5] = [
        Shape::Square,
        Shape::Circle,
        Shape::Triangle,
        Shape::Diamond,
        Shape::Star,
    ];

    pub fn id(&self) -> &'static str {
        self.into()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Square => "Square",
            Self::Circle => "Circle",
            Self::Triangle => "Triangle",
            Self::Diamond => "Diamond",
            Self::Star => "Star",
        }
    }

    /// Single-glyph rendering used by text frontends
    pub fn glyph(&self) -> char {
        match self {
            Self::Square => '■',
            Self::Circle => '●',
            Self::Triangle => '▲',
            Self::Diamond => '◆',
            Self::Star => '★',
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr, Display,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ColorGroup {
    Warm,
    Cool,
}

impl ColorGroup {
    pub fn members(&self) -> &'static [Color] {
        match self {
            Self::Warm => &[Color::Red, Color::Orange, Color::Yellow, Color::Pink],
            Self::Cool => &[Color::Blue, Color::Green, Color::Purple],
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Self::Warm => Self::Cool,
            Self::Cool => Self::Warm,
        }
    }

    pub fn contains(&self, color: Color) -> bool {
        color.group() == Some(*self)
    }
}

/// Trajectory followed by a shape in path-tracking rounds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr, Display,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PathKind {
    Straight,
    Curve,
    Zigzag,
}

impl PathKind {
    pub const ALL: [PathKind; 3] = [PathKind::Straight, PathKind::Curve, PathKind::Zigzag];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Straight => "Straight",
            Self::Curve => "Curve",
            Self::Zigzag => "Zigzag",
        }
    }
}

/// Which part of a partially revealed shape is visible
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr, Display,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ShapePart {
    Top,
    Bottom,
    Left,
    Right,
}

impl ShapePart {
    pub const ALL: [ShapePart; 4] = [
        ShapePart::Top,
        ShapePart::Bottom,
        ShapePart::Left,
        ShapePart::Right,
    ];
}

/// Horizontal slot on a three-wide stage
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr, Display,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Slot {
    Left,
    Center,
    Right,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Left, Slot::Center, Slot::Right];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Center => "Center",
            Self::Right => "Right",
        }
    }
}
