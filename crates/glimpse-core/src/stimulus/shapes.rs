//! Generators for the shape-based round types.

use crate::diagnostics::Fallback;
use crate::palette::{Color, ColorGroup, PathKind, ShapePart, Slot};
use crate::random::{Picker, RandomSource};

use super::payload::{
    DisplayPayload, MotionMode, PartialShape, PathTrack, Position, ShapeColorMode, ShapeInstance,
};

/// Sizes (px) handed out to the three shapes of a sized shape-color round
const SHAPE_COLOR_SIZES: [u32; 3] = [100, 120, 150];
const MULTI_SHAPE_COUNT: usize = 5;
const BASE_SPEED: f64 = 100.0;
const SPEED_RATIOS: [f64; 3] = [0.7, 1.0, 1.5];
const SPEED_UP: f64 = 1.5;
const SLOW_DOWN: f64 = 0.7;
const FALLING_SHAPES: usize = 10;
const CHAOS_SHAPES: usize = 5;
const MAIN_SHAPE_SIZE: u32 = 150;
const DISTRACTION_SIZE: u32 = 60;
const DISTRACTIONS: usize = 4;
const GRID_CELLS: usize = 9;
const WRONG_MIX_SHAPES: usize = 5;

pub fn shape_color<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    if p.chance(0.5) {
        shape_color_sequential(p)
    } else {
        shape_color_sized(p)
    }
}

/// Three shapes shown one after another, no repeated shape or colour
pub fn shape_color_sequential<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    let kinds = p.pick_distinct_shapes(3, &[]);
    let colors = p.pick_distinct_colors(3, &[]);

    let shapes = kinds
        .into_iter()
        .zip(colors)
        .enumerate()
        .map(|(i, (shape, color))| ShapeInstance {
            order: Some(i as u8 + 1),
            fade_in: Some(true),
            ..ShapeInstance::new(shape, color)
        })
        .collect();

    DisplayPayload::ShapeColor {
        mode: ShapeColorMode::Sequential,
        shapes,
    }
}

/// Three shapes of different sizes in the left/center/right slots
pub fn shape_color_sized<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    let sizes = p.shuffled(&SHAPE_COLOR_SIZES);
    let colors = p.pick_distinct_colors(3, &[]);

    let mut shapes = Vec::with_capacity(3);
    for (i, color) in colors.into_iter().enumerate() {
        let shape = p.pick_shape(&[]);
        let fade_in = p.chance(0.5);
        shapes.push(ShapeInstance {
            size: Some(sizes[i]),
            position: Some(Position::Slot(Slot::ALL[i])),
            fade_in: Some(fade_in),
            ..ShapeInstance::new(shape, color)
        });
    }

    DisplayPayload::ShapeColor {
        mode: ShapeColorMode::Sized,
        shapes,
    }
}

/// `n` colours; with `repeat` one of them is used twice so colour counts differ
fn colors_maybe_repeated<R: RandomSource>(
    p: &mut Picker<R>,
    n: usize,
    repeat: bool,
) -> Vec<Color> {
    if !repeat || n < 2 {
        return p.pick_distinct_colors(n, &[]);
    }
    let mut colors = p.pick_distinct_colors(n - 1, &[]);
    let twin = colors[p.index(colors.len())];
    colors.push(twin);
    p.shuffle(&mut colors);
    colors
}

pub fn multi_shape<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    let kinds = p.pick_distinct_shapes(MULTI_SHAPE_COUNT, &[]);
    let repeat = p.chance(0.5);
    let colors = colors_maybe_repeated(p, MULTI_SHAPE_COUNT, repeat);

    let mut shapes = Vec::with_capacity(MULTI_SHAPE_COUNT);
    for (i, (shape, color)) in kinds.into_iter().zip(colors).enumerate() {
        let rotation = if p.chance(0.5) {
            Some(p.index(360) as u16).filter(|r| *r != 0)
        } else {
            None
        };
        shapes.push(ShapeInstance {
            position: Some(Position::Cell(i as u8)),
            rotation,
            ..ShapeInstance::new(shape, color)
        });
    }

    DisplayPayload::MultiShape { shapes }
}

pub fn animated_shapes<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    let motion = if p.chance(0.3) {
        MotionMode::SpeedChange
    } else if p.chance(0.5) {
        MotionMode::Curve
    } else {
        MotionMode::Normal
    };
    animated_shapes_with(p, motion)
}

/// Three racing shapes; speed ranking is shuffled independently of creation order
pub fn animated_shapes_with<R: RandomSource>(p: &mut Picker<R>, motion: MotionMode) -> DisplayPayload {
    let speeds: Vec<f64> = SPEED_RATIOS.iter().map(|r| BASE_SPEED * r).collect();
    let speeds = p.shuffled(&speeds);
    let kinds = p.pick_distinct_shapes(3, &[]);
    let colors = p.pick_distinct_colors(3, &[]);

    let mut shapes: Vec<ShapeInstance> = kinds
        .into_iter()
        .zip(colors)
        .zip(speeds)
        .map(|((shape, color), speed)| ShapeInstance {
            speed: Some(speed),
            ..ShapeInstance::new(shape, color)
        })
        .collect();

    if motion == MotionMode::SpeedChange {
        let changed = p.index(shapes.len());
        let factor = if p.chance(0.5) { SPEED_UP } else { SLOW_DOWN };
        shapes[changed].speed_change = Some(factor);
    }

    DisplayPayload::AnimatedShapes { motion, shapes }
}

/// Ten falling shapes; shapes and colours may repeat
pub fn shape_counting<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    let shapes = (0..FALLING_SHAPES)
        .map(|i| {
            let shape = p.pick_shape(&[]);
            let color = p.pick_color(&[]);
            ShapeInstance {
                order: Some(i as u8 + 1),
                ..ShapeInstance::new(shape, color)
            }
        })
        .collect();

    DisplayPayload::ShapeCounting { shapes }
}

pub fn overlapping_chaos<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    let kinds = p.pick_distinct_shapes(CHAOS_SHAPES, &[]);
    let repeat = p.chance(0.5);
    let colors = colors_maybe_repeated(p, CHAOS_SHAPES, repeat);

    let shapes = kinds
        .into_iter()
        .zip(colors)
        .enumerate()
        .map(|(layer, (shape, color))| ShapeInstance {
            position: Some(Position::Layer(layer as u8)),
            ..ShapeInstance::new(shape, color)
        })
        .collect();

    DisplayPayload::OverlappingChaos { shapes }
}

pub fn partial_shapes<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    let shape = p.pick_shape(&[]);
    let color = p.pick_color(&[]);
    let part = ShapePart::ALL[p.index(ShapePart::ALL.len())];

    DisplayPayload::PartialShapes {
        partial_shape: PartialShape { shape, color, part },
        shapes: vec![ShapeInstance::new(shape, color)],
    }
}

pub fn path_tracking<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    let kinds = p.shuffled(&PathKind::ALL);
    let shape_kinds = p.pick_distinct_shapes(kinds.len(), &[]);
    let colors = p.pick_distinct_colors(kinds.len(), &[]);

    let paths: Vec<PathTrack> = shape_kinds
        .into_iter()
        .zip(colors)
        .zip(kinds)
        .map(|((shape, color), path)| PathTrack { shape, color, path })
        .collect();
    let shapes = paths
        .iter()
        .map(|t| ShapeInstance::new(t.shape, t.color))
        .collect();

    DisplayPayload::PathTracking { paths, shapes }
}

/// One large shape in a random grid cell among small rotated distractions
pub fn distraction_test<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    let shape = p.pick_shape(&[]);
    let color = p.pick_color(&[]);
    let cell = p.index(GRID_CELLS) as u8;
    let main_shape = ShapeInstance {
        size: Some(MAIN_SHAPE_SIZE),
        position: Some(Position::Cell(cell)),
        ..ShapeInstance::new(shape, color)
    };

    let colors = p.pick_distinct_colors(DISTRACTIONS, &[color]);
    let mut distraction_shapes = Vec::with_capacity(DISTRACTIONS);
    for color in colors {
        let shape = p.pick_shape(&[]);
        let rotation = p.index(360) as u16;
        distraction_shapes.push(ShapeInstance {
            size: Some(DISTRACTION_SIZE),
            rotation: Some(rotation),
            ..ShapeInstance::new(shape, color)
        });
    }

    DisplayPayload::DistractionTest {
        main_shape,
        distraction_shapes,
    }
}

pub fn wrong_color_mix<R: RandomSource>(p: &mut Picker<R>) -> DisplayPayload {
    let group = if p.chance(0.5) {
        ColorGroup::Warm
    } else {
        ColorGroup::Cool
    };
    wrong_color_mix_with(p, group)
}

/// Every colour of `group`, exactly one colour of the opposite group, and
/// neutral filler when the group is too small to reach five shapes
pub fn wrong_color_mix_with<R: RandomSource>(p: &mut Picker<R>, group: ColorGroup) -> DisplayPayload {
    let mut colors = p.shuffled(group.members());
    colors.truncate(WRONG_MIX_SHAPES - 1);

    let odd = group.opposite().members();
    colors.push(odd[p.index(odd.len())]);

    while colors.len() < WRONG_MIX_SHAPES {
        let filler = Color::ALL
            .into_iter()
            .find(|c| c.group().is_none() && !colors.contains(c));
        let filler = match filler {
            Some(color) => color,
            // Reuse an in-group colour; the odd one out stays unique.
            None => group.members()[p.index(group.members().len())],
        };
        p.record(Fallback::NeutralFiller);
        colors.push(filler);
    }

    let mut shapes: Vec<ShapeInstance> = Vec::with_capacity(colors.len());
    for color in colors {
        let shape = p.pick_shape(&[]);
        shapes.push(ShapeInstance::new(shape, color));
    }
    p.shuffle(&mut shapes);

    DisplayPayload::WrongColorMix {
        color_group: group,
        shapes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Shape;
    use crate::random::StdRandom;
    use std::collections::HashSet;

    fn picker(seed: u64) -> Picker<StdRandom> {
        Picker::new(StdRandom::seeded(seed))
    }

    fn all_shapes_distinct(shapes: &[ShapeInstance]) -> bool {
        shapes.iter().map(|s| s.shape).collect::<HashSet<_>>().len() == shapes.len()
    }

    fn unique_colors(shapes: &[ShapeInstance]) -> usize {
        shapes.iter().map(|s| s.color).collect::<HashSet<_>>().len()
    }

    #[test]
    fn test_sequential_shape_color_orders_and_never_repeats() {
        let mut p = picker(10);
        for _ in 0..50 {
            let DisplayPayload::ShapeColor { mode, shapes } = shape_color_sequential(&mut p) else {
                panic!("wrong payload");
            };
            assert_eq!(mode, ShapeColorMode::Sequential);
            assert_eq!(shapes.len(), 3);
            assert!(all_shapes_distinct(&shapes));
            assert_eq!(unique_colors(&shapes), 3);
            let orders: Vec<_> = shapes.iter().map(|s| s.order).collect();
            assert_eq!(orders, vec![Some(1), Some(2), Some(3)]);
        }
    }

    #[test]
    fn test_sized_shape_color_uses_each_size_once() {
        let mut p = picker(11);
        for _ in 0..50 {
            let DisplayPayload::ShapeColor { shapes, .. } = shape_color_sized(&mut p) else {
                panic!("wrong payload");
            };
            let mut sizes: Vec<u32> = shapes.iter().filter_map(|s| s.size).collect();
            sizes.sort();
            assert_eq!(sizes, SHAPE_COLOR_SIZES.to_vec());
            assert_eq!(shapes[0].position, Some(Position::Slot(Slot::Left)));
            assert_eq!(shapes[2].position, Some(Position::Slot(Slot::Right)));
        }
    }

    #[test]
    fn test_animated_speed_change_marks_exactly_one_shape() {
        let mut p = picker(12);
        for _ in 0..50 {
            let DisplayPayload::AnimatedShapes { shapes, .. } =
                animated_shapes_with(&mut p, MotionMode::SpeedChange)
            else {
                panic!("wrong payload");
            };
            assert_eq!(shapes.iter().filter(|s| s.speed_change.is_some()).count(), 1);
            let mut speeds: Vec<i64> = shapes.iter().map(|s| s.speed.unwrap() as i64).collect();
            speeds.sort();
            assert_eq!(speeds, vec![70, 100, 150]);
        }
    }

    #[test]
    fn test_animated_speed_rank_not_tied_to_creation_order() {
        let mut p = picker(13);
        let mut fastest_slots = HashSet::new();
        for _ in 0..100 {
            let DisplayPayload::AnimatedShapes { shapes, .. } =
                animated_shapes_with(&mut p, MotionMode::Normal)
            else {
                panic!("wrong payload");
            };
            let fastest = shapes
                .iter()
                .position(|s| s.speed == Some(150.0))
                .unwrap();
            fastest_slots.insert(fastest);
        }
        assert_eq!(fastest_slots.len(), 3);
    }

    #[test]
    fn test_path_tracking_uses_every_path_once() {
        let mut p = picker(14);
        let DisplayPayload::PathTracking { paths, shapes } = path_tracking(&mut p) else {
            panic!("wrong payload");
        };
        let kinds: HashSet<_> = paths.iter().map(|t| t.path).collect();
        assert_eq!(kinds.len(), 3);
        assert_eq!(shapes.len(), 3);
        assert!(paths.iter().zip(&shapes).all(|(t, s)| t.shape == s.shape));
    }

    #[test]
    fn test_distractions_never_share_main_color() {
        let mut p = picker(15);
        for _ in 0..50 {
            let DisplayPayload::DistractionTest {
                main_shape,
                distraction_shapes,
            } = distraction_test(&mut p)
            else {
                panic!("wrong payload");
            };
            assert_eq!(distraction_shapes.len(), DISTRACTIONS);
            assert!(distraction_shapes.iter().all(|s| s.color != main_shape.color));
            assert!(matches!(main_shape.position, Some(Position::Cell(c)) if c < 9));
        }
    }

    #[test]
    fn test_warm_mix_has_exactly_one_outsider() {
        let mut p = picker(16);
        let warm = [Color::Red, Color::Orange, Color::Yellow, Color::Pink];
        for _ in 0..100 {
            let DisplayPayload::WrongColorMix { color_group, shapes } =
                wrong_color_mix_with(&mut p, ColorGroup::Warm)
            else {
                panic!("wrong payload");
            };
            assert_eq!(color_group, ColorGroup::Warm);
            assert_eq!(shapes.len(), 5);
            assert_eq!(shapes.iter().filter(|s| !warm.contains(&s.color)).count(), 1);
        }
        assert_eq!(p.fallbacks().count(Fallback::NeutralFiller), 0);
    }

    #[test]
    fn test_cool_mix_pads_with_neutral() {
        let mut p = picker(17);
        let DisplayPayload::WrongColorMix { shapes, .. } =
            wrong_color_mix_with(&mut p, ColorGroup::Cool)
        else {
            panic!("wrong payload");
        };
        assert_eq!(shapes.len(), 5);
        assert_eq!(unique_colors(&shapes), 5);
        let warm = shapes
            .iter()
            .filter(|s| ColorGroup::Warm.contains(s.color))
            .count();
        assert_eq!(warm, 1);
        assert!(shapes.iter().any(|s| s.color == Color::Black));
        assert_eq!(p.fallbacks().count(Fallback::NeutralFiller), 1);
    }

    #[test]
    fn test_shape_counting_orders_ten_shapes() {
        let mut p = picker(18);
        let DisplayPayload::ShapeCounting { shapes } = shape_counting(&mut p) else {
            panic!("wrong payload");
        };
        assert_eq!(shapes.len(), 10);
        assert_eq!(shapes.last().unwrap().order, Some(10));
    }

    #[test]
    fn test_shape_kinds_cover_all_shapes() {
        let mut p = picker(19);
        let DisplayPayload::OverlappingChaos { shapes } = overlapping_chaos(&mut p) else {
            panic!("wrong payload");
        };
        let kinds: HashSet<Shape> = shapes.iter().map(|s| s.shape).collect();
        assert_eq!(kinds.len(), Shape::ALL.len());
    }

    #[test]
    fn test_chaos_and_multi_shape_sometimes_repeat_a_color() {
        let mut p = picker(24);
        let (mut repeated, mut distinct) = (0, 0);
        for _ in 0..60 {
            let payload = if p.chance(0.5) {
                multi_shape(&mut p)
            } else {
                overlapping_chaos(&mut p)
            };
            let colors: HashSet<Color> = payload.colors().into_iter().collect();
            match colors.len() {
                5 => distinct += 1,
                4 => repeated += 1,
                n => panic!("{} colours", n),
            }
        }
        assert!(repeated > 0 && distinct > 0);
    }
}
