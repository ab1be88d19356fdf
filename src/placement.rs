//! Edge indicator placement for off-screen targets.
//!
//! Maps a world-space target to a clamped screen-space position and rotation so an indicator
//! drawn there points from the visible screen edge toward the target. Screen and world
//! coordinates are both y-down pixels; the camera offset converts between them.

use std::f32::consts::FRAC_PI_2;
use std::f32::consts::FRAC_PI_4;
use std::f32::consts::PI;

use bevy::prelude::*;

// ============================================================================
// Constants
// ============================================================================

/// Size of one world tile in pixels
pub const TILE_SIZE: f32 = 64.0;
/// Inset from each screen edge that bounds where indicators may render
pub const DEFAULT_MARGIN: f32 = 8.0;
/// Targets within this distance of the visible area count as on-screen
pub const DEFAULT_VISIBILITY_RADIUS: f32 = TILE_SIZE * 0.5;
/// Pivot of the indicator sprite in texels (center of the 4-texel tracker arrow)
pub const INDICATOR_PIVOT: Vec2 = Vec2::splat(2.0);

pub const ROTATION_UP: f32 = 0.0;
pub const ROTATION_RIGHT: f32 = FRAC_PI_2;
pub const ROTATION_DOWN: f32 = PI;
pub const ROTATION_LEFT: f32 = -FRAC_PI_2;
/// Extra rotation applied when an indicator is pushed out of a screen corner
pub const CORNER_ROTATION: f32 = FRAC_PI_4;

// ============================================================================
// Types
// ============================================================================

/// World-space location of a tracked target
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum TargetPosition {
    /// Grid cell; the target sits at the pixel center of the tile
    Tile(IVec2),
    /// Exact world pixel
    Pixel(Vec2),
}

impl TargetPosition {
    /// Returns the world-space pixel center of the target
    pub fn center(self) -> Vec2 {
        match self {
            Self::Tile(tile) => tile.as_vec2() * TILE_SIZE + Vec2::splat(TILE_SIZE * 0.5),
            Self::Pixel(pixel) => pixel,
        }
    }
}

/// The visible window into the world.
///
/// `screen` is in screen pixels (top-left origin). `camera_offset` and `camera_max` are the
/// world-space top-left and bottom-right corners currently visible.
#[derive(Resource, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Resource)]
pub struct TrackerViewport {
    pub screen:        Rect,
    pub camera_offset: Vec2,
    pub camera_max:    Vec2,
}

impl TrackerViewport {
    /// Viewport whose screen starts at the origin and whose visible world area is `size`
    /// pixels starting at `camera_offset`.
    pub fn new(size: Vec2, camera_offset: Vec2) -> Self {
        Self {
            screen: Rect::from_corners(Vec2::ZERO, size),
            camera_offset,
            camera_max: camera_offset + size,
        }
    }

    /// Returns true if a world-space point lies within the visible area grown by `radius`
    pub fn contains_world(&self, point: Vec2, radius: f32) -> bool {
        point.x >= self.camera_offset.x - radius
            && point.x <= self.camera_max.x + radius
            && point.y >= self.camera_offset.y - radius
            && point.y <= self.camera_max.y + radius
    }
}

impl Default for TrackerViewport {
    fn default() -> Self { Self::new(Vec2::new(1280.0, 720.0), Vec2::ZERO) }
}

/// Tunables for [`place_with`]
#[derive(Resource, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Resource)]
pub struct PlacementParams {
    /// Inset from each screen edge in pixels
    pub margin:            f32,
    /// Inclusion radius around the visible area used by the on-screen test
    pub visibility_radius: f32,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            margin:            DEFAULT_MARGIN,
            visibility_radius: DEFAULT_VISIBILITY_RADIUS,
        }
    }
}

/// Which screen edge or corner an indicator was placed against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ScreenSide {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ScreenSide {
    pub const ALL: [Self; 8] = [
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    pub const fn is_corner(self) -> bool {
        matches!(
            self,
            Self::TopLeft | Self::TopRight | Self::BottomLeft | Self::BottomRight
        )
    }

    /// Classifies a target center by where it lies relative to the visible area.
    /// Used when the clamped position touches no edge, which only happens for icons larger
    /// than the visibility band.
    fn toward(center: Vec2, viewport: &TrackerViewport) -> Self {
        let left = center.x < viewport.camera_offset.x;
        let right = center.x > viewport.camera_max.x;
        let top = center.y < viewport.camera_offset.y;
        let bottom = center.y > viewport.camera_max.y;

        match (left, right, top, bottom) {
            (true, _, true, _) => Self::TopLeft,
            (true, _, _, true) => Self::BottomLeft,
            (_, true, true, _) => Self::TopRight,
            (_, true, _, true) => Self::BottomRight,
            (true, ..) => Self::Left,
            (_, true, ..) => Self::Right,
            (.., true) => Self::Bottom,
            _ => Self::Top,
        }
    }
}

/// Screen-space draw parameters for one indicator
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Placement {
    /// Screen position of the sprite's pivot
    pub position: Vec2,
    /// Clockwise rotation in radians
    pub rotation: f32,
    /// Pivot within the sprite, in texels
    pub origin:   Vec2,
    pub side:     ScreenSide,
}

// ============================================================================
// Placement
// ============================================================================

/// Places an indicator for `target` using the default margin and visibility radius.
/// Returns `None` if the target is already visible.
pub fn place(
    target: TargetPosition,
    viewport: &TrackerViewport,
    icon_size: Vec2,
) -> Option<Placement> {
    place_with(target, viewport, icon_size, &PlacementParams::default())
}

/// Places an indicator for `target`, an icon of `icon_size` screen pixels (already scaled).
/// Returns `None` if the target is within the visible area grown by
/// `params.visibility_radius`.
pub fn place_with(
    target: TargetPosition,
    viewport: &TrackerViewport,
    icon_size: Vec2,
    params: &PlacementParams,
) -> Option<Placement> {
    let center = target.center();
    if viewport.contains_world(center, params.visibility_radius) {
        return None;
    }

    let margin = params.margin;
    let offset = viewport.camera_offset;
    // World positions map to screen positions relative to the screen's own origin
    let screen_min = viewport.screen.min;
    let min_x = screen_min.x + margin;
    let min_y = screen_min.y + margin;
    let max_x = viewport.screen.max.x - margin;
    let max_y = viewport.screen.max.y - margin;

    let mut unclamped = center - icon_size * 0.5;
    let mut position = Vec2::ZERO;
    let mut rotation = ROTATION_UP;

    // A sideways icon swaps width and height when centered vertically
    if unclamped.x > viewport.camera_max.x - margin {
        position.x = max_x;
        rotation = ROTATION_RIGHT;
        unclamped.y = center.y - icon_size.x * 0.5;
    } else if unclamped.x < offset.x + margin {
        position.x = min_x;
        rotation = ROTATION_LEFT;
        unclamped.y = center.y + icon_size.x * 0.5;
    } else {
        position.x = unclamped.x - offset.x + screen_min.x;
    }

    if unclamped.y > viewport.camera_max.y - margin {
        position.y = max_y;
        rotation = ROTATION_DOWN;
        // Rotated 180° about the top-left pivot, so the icon hangs left of `x`
        if position.x > min_x {
            position.x = (center.x + icon_size.x * 0.5 - offset.x + screen_min.x).min(max_x);
        }
    } else if unclamped.y >= offset.y + margin {
        position.y = unclamped.y - offset.y + screen_min.y;
    } else {
        position.y = min_y;
    }

    let at_left = position.x == min_x;
    let at_right = position.x == max_x;
    let at_top = position.y == min_y;
    let at_bottom = position.y == max_y;

    let side = if at_left && at_top {
        position.y += icon_size.y;
        rotation += CORNER_ROTATION;
        ScreenSide::TopLeft
    } else if at_left && at_bottom {
        position.x += icon_size.x;
        rotation += CORNER_ROTATION;
        ScreenSide::BottomLeft
    } else if at_right && at_top {
        position.x -= icon_size.x;
        rotation -= CORNER_ROTATION;
        ScreenSide::TopRight
    } else if at_right && at_bottom {
        position.y -= icon_size.y;
        rotation -= CORNER_ROTATION;
        ScreenSide::BottomRight
    } else if at_left {
        ScreenSide::Left
    } else if at_right {
        ScreenSide::Right
    } else if at_top {
        ScreenSide::Top
    } else if at_bottom {
        ScreenSide::Bottom
    } else {
        ScreenSide::toward(center, viewport)
    };

    Some(Placement {
        position,
        rotation,
        origin: INDICATOR_PIVOT,
        side,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ICON: Vec2 = Vec2::splat(16.0);

    fn screen() -> TrackerViewport { TrackerViewport::new(Vec2::new(800.0, 600.0), Vec2::ZERO) }

    fn place_pixel(x: f32, y: f32) -> Option<Placement> {
        place(TargetPosition::Pixel(Vec2::new(x, y)), &screen(), ICON)
    }

    fn assert_angle(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "rotation {actual} != expected {expected}"
        );
    }

    #[test]
    fn visible_targets_produce_nothing() {
        for (x, y) in [(0.0, 0.0), (400.0, 300.0), (800.0, 600.0), (-20.0, 300.0), (810.0, 620.0)] {
            assert!(place_pixel(x, y).is_none(), "({x}, {y}) should be on-screen");
        }
    }

    #[test]
    fn tile_targets_use_the_tile_center() {
        assert_eq!(
            TargetPosition::Tile(IVec2::new(2, 3)).center(),
            Vec2::new(160.0, 224.0)
        );
        // Tile 12 spans 768..832, center 800 sits on the right screen edge
        assert!(place(TargetPosition::Tile(IVec2::new(12, 4)), &screen(), ICON).is_none());
    }

    #[test]
    fn far_right_target_points_right() {
        let placement = place_pixel(2000.0, 300.0).unwrap();
        assert_eq!(placement.position.x, 792.0);
        assert!((placement.position.y - 300.0).abs() <= ICON.y);
        assert_angle(placement.rotation, ROTATION_RIGHT);
        assert_eq!(placement.side, ScreenSide::Right);
        assert_eq!(placement.origin, INDICATOR_PIVOT);
    }

    #[test]
    fn upper_left_target_takes_the_top_left_corner() {
        let placement = place_pixel(-500.0, -500.0).unwrap();
        assert_eq!(placement.position, Vec2::new(8.0, 24.0));
        assert_angle(placement.rotation, ROTATION_LEFT + CORNER_ROTATION);
        assert_eq!(placement.side, ScreenSide::TopLeft);
    }

    #[test]
    fn left_target_points_left() {
        let placement = place_pixel(-500.0, 300.0).unwrap();
        assert_eq!(placement.position, Vec2::new(8.0, 308.0));
        assert_angle(placement.rotation, ROTATION_LEFT);
        assert_eq!(placement.side, ScreenSide::Left);
    }

    #[test]
    fn top_target_points_up() {
        let placement = place_pixel(400.0, -500.0).unwrap();
        assert_eq!(placement.position, Vec2::new(392.0, 8.0));
        assert_angle(placement.rotation, ROTATION_UP);
        assert_eq!(placement.side, ScreenSide::Top);
    }

    #[test]
    fn bottom_target_shifts_right_for_the_flipped_icon() {
        let placement = place_pixel(400.0, 2000.0).unwrap();
        assert_eq!(placement.position, Vec2::new(408.0, 592.0));
        assert_angle(placement.rotation, ROTATION_DOWN);
        assert_eq!(placement.side, ScreenSide::Bottom);
    }

    #[test]
    fn remaining_corners() {
        let bottom_left = place_pixel(-500.0, 2000.0).unwrap();
        assert_eq!(bottom_left.position, Vec2::new(24.0, 592.0));
        assert_angle(bottom_left.rotation, ROTATION_DOWN + CORNER_ROTATION);
        assert_eq!(bottom_left.side, ScreenSide::BottomLeft);

        let top_right = place_pixel(2000.0, -500.0).unwrap();
        assert_eq!(top_right.position, Vec2::new(776.0, 8.0));
        assert_angle(top_right.rotation, ROTATION_RIGHT - CORNER_ROTATION);
        assert_eq!(top_right.side, ScreenSide::TopRight);

        let bottom_right = place_pixel(2000.0, 2000.0).unwrap();
        assert_eq!(bottom_right.position, Vec2::new(792.0, 576.0));
        assert_angle(bottom_right.rotation, ROTATION_DOWN - CORNER_ROTATION);
        assert_eq!(bottom_right.side, ScreenSide::BottomRight);
    }

    #[test]
    fn corner_classifications_are_distinct_from_edges() {
        let left = place_pixel(-500.0, 300.0).unwrap();
        let top = place_pixel(400.0, -500.0).unwrap();
        let corner = place_pixel(-500.0, -500.0).unwrap();
        assert!(corner.side.is_corner());
        assert!(!left.side.is_corner() && !top.side.is_corner());
        assert_ne!(corner.position, left.position);
        assert_ne!(corner.position, top.position);
    }

    #[test]
    fn camera_offset_is_applied() {
        let viewport = TrackerViewport::new(Vec2::new(800.0, 600.0), Vec2::new(1000.0, 500.0));

        let left = place(TargetPosition::Pixel(Vec2::new(0.0, 800.0)), &viewport, ICON).unwrap();
        assert_eq!(left.position, Vec2::new(8.0, 308.0));
        assert_eq!(left.side, ScreenSide::Left);

        let top = place(TargetPosition::Pixel(Vec2::new(1400.0, 0.0)), &viewport, ICON).unwrap();
        assert_eq!(top.position, Vec2::new(392.0, 8.0));

        assert!(place(TargetPosition::Pixel(Vec2::new(1400.0, 800.0)), &viewport, ICON).is_none());
    }

    #[test]
    fn screen_rect_away_from_the_origin_shifts_every_edge() {
        let viewport = TrackerViewport {
            screen:        Rect::new(400.0, 0.0, 1200.0, 600.0),
            camera_offset: Vec2::ZERO,
            camera_max:    Vec2::new(800.0, 600.0),
        };
        let at = |x: f32, y: f32| place(TargetPosition::Pixel(Vec2::new(x, y)), &viewport, ICON);

        let top = at(400.0, -500.0).unwrap();
        assert_eq!(top.position, Vec2::new(792.0, 8.0));
        assert_eq!(top.side, ScreenSide::Top);

        let left = at(-500.0, 300.0).unwrap();
        assert_eq!(left.position, Vec2::new(408.0, 308.0));
        assert_eq!(left.side, ScreenSide::Left);

        let bottom = at(400.0, 2000.0).unwrap();
        assert_eq!(bottom.position, Vec2::new(808.0, 592.0));
        assert_eq!(bottom.side, ScreenSide::Bottom);

        let corner = at(-500.0, -500.0).unwrap();
        assert_eq!(corner.position, Vec2::new(408.0, 24.0));
        assert_eq!(corner.side, ScreenSide::TopLeft);

        let steps = [-5000.0, -300.0, 0.0, 400.0, 845.0, 3000.0];
        for x in steps {
            for y in steps {
                let Some(placement) = at(x, y) else {
                    continue;
                };
                let p = placement.position;
                assert!(
                    p.x >= 408.0 && p.x <= 1192.0 && p.y >= 8.0 && p.y <= 592.0,
                    "({x}, {y}) placed outside the screen rect: {p:?}"
                );
            }
        }
    }

    #[test]
    fn every_placement_stays_inside_the_margin_box() {
        let viewport = screen();
        let margin = DEFAULT_MARGIN;
        let steps = [-1.0e6, -5000.0, -300.0, -41.0, 0.0, 123.0, 400.0, 799.0, 845.0, 3000.0, 1.0e6];

        for x in steps {
            for y in steps {
                let Some(placement) = place_pixel(x, y) else {
                    continue;
                };
                let p = placement.position;
                assert!(
                    p.x >= margin && p.x <= viewport.screen.max.x - margin,
                    "x out of bounds for ({x}, {y}): {p:?}"
                );
                assert!(
                    p.y >= margin && p.y <= viewport.screen.max.y - margin,
                    "y out of bounds for ({x}, {y}): {p:?}"
                );
            }
        }
    }

    #[test]
    fn moving_a_target_further_away_does_not_move_the_indicator() {
        for (near, far) in [
            ((2000.0, 300.0), (2.0e6, 300.0)),
            ((-500.0, 300.0), (-2.0e6, 300.0)),
            ((400.0, -500.0), (400.0, -2.0e6)),
            ((400.0, 2000.0), (400.0, 2.0e6)),
            ((-500.0, -500.0), (-2.0e6, -2.0e6)),
            ((2000.0, 2000.0), (2.0e6, 2.0e6)),
        ] {
            assert_eq!(place_pixel(near.0, near.1), place_pixel(far.0, far.1));
        }
    }

    #[test]
    fn rotations_are_one_of_eight_values() {
        let allowed = [
            ROTATION_UP,
            ROTATION_RIGHT,
            ROTATION_DOWN,
            ROTATION_LEFT,
            ROTATION_LEFT + CORNER_ROTATION,
            ROTATION_DOWN + CORNER_ROTATION,
            ROTATION_RIGHT - CORNER_ROTATION,
            ROTATION_DOWN - CORNER_ROTATION,
        ];
        let steps = [-3000.0, -100.0, 50.0, 400.0, 750.0, 900.0, 3000.0];

        let mut seen = std::collections::HashSet::new();
        for x in steps {
            for y in steps {
                if let Some(placement) = place_pixel(x, y) {
                    assert!(
                        allowed.iter().any(|a| (a - placement.rotation).abs() < 1e-5),
                        "unexpected rotation {} for ({x}, {y})",
                        placement.rotation
                    );
                    seen.insert(placement.side);
                }
            }
        }
        assert_eq!(seen.len(), ScreenSide::ALL.len());
    }

    #[test]
    fn oversized_icons_still_classify() {
        let huge = Vec2::splat(200.0);
        // Just below the visibility band, but the icon's box never crosses the bottom limit
        let placement = place(TargetPosition::Pixel(Vec2::new(400.0, 640.0)), &screen(), huge)
            .unwrap();
        assert_eq!(placement.position, Vec2::new(300.0, 540.0));
        assert_eq!(placement.side, ScreenSide::Bottom);
    }
}
