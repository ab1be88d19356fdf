//! Per-frame draw list for tracker indicators.
//!
//! Every frame the tracked points are filtered by the host gate and the category settings,
//! placed against the screen edge, and turned into sprite draws for the overlay.

use bevy::prelude::*;

use crate::components::TargetAppearance;
use crate::components::TrackedPoint;
use crate::config::TrackerConfig;
use crate::placement::PlacementParams;
use crate::placement::TargetPosition;
use crate::placement::TrackerViewport;
use crate::placement::place_with;
use crate::sprites::IconMode;
use crate::sprites::IndicatorSprite;
use crate::sprites::TrackerSprites;

/// Host game state that decides whether trackers may be shown this frame.
/// Written by the host each frame.
#[derive(Resource, Reflect, Debug, Clone, Copy)]
#[reflect(Resource)]
pub struct HostContext {
    /// The player can act (no menu, dialogue or transition in progress)
    pub player_free:      bool,
    /// The player has the perk that normally unlocks trackers
    pub has_tracker_perk: bool,
    /// A cutscene or festival event is playing
    pub cutscene_active:  bool,
}

impl Default for HostContext {
    fn default() -> Self {
        Self {
            player_free:      true,
            has_tracker_perk: false,
            cutscene_active:  false,
        }
    }
}

impl HostContext {
    /// Returns true if trackers may be drawn under `config`
    pub const fn allows_trackers(&self, config: &TrackerConfig) -> bool {
        self.player_free
            && !self.cutscene_active
            && (self.has_tracker_perk || config.enable_without_perk)
    }
}

/// Whether indicators are layered beneath or above the game interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum DrawLayer {
    BehindInterface,
    AboveInterface,
}

impl DrawLayer {
    pub const fn from_config(config: &TrackerConfig) -> Self {
        if config.draw_behind_interface {
            Self::BehindInterface
        } else {
            Self::AboveInterface
        }
    }
}

/// What a frame draws for each tracked point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// The dedicated tracker arrow
    Tracker,
    /// Each target's own icon, over the background when one is loaded
    TargetIcons,
}

impl RenderMode {
    /// Picks the render mode for the session's icon mode. Returns `None` while textures are
    /// not resolved.
    pub const fn select(mode: IconMode, config: &TrackerConfig) -> Option<Self> {
        match mode {
            IconMode::Unloaded | IconMode::Loading => None,
            IconMode::PrimaryLoaded if !config.replace_with_target_icons => Some(Self::Tracker),
            IconMode::PrimaryLoaded | IconMode::FallbackLoaded => Some(Self::TargetIcons),
        }
    }
}

/// One sprite draw in screen space
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct IndicatorDraw {
    pub image:    Handle<Image>,
    pub sprite:   IndicatorSprite,
    /// Screen position of `origin`
    pub position: Vec2,
    /// Clockwise rotation about `origin`, in radians
    pub rotation: f32,
    /// Pivot within the sprite, in texels
    pub origin:   Vec2,
    pub layer:    DrawLayer,
}

impl IndicatorDraw {
    /// Axis-aligned rectangle which, rotated by `rotation` about its own center, covers the
    /// same pixels as the sprite rotated about `origin`.
    pub fn node_rect(&self) -> Rect {
        let size = self.sprite.render_size();
        let pivot_to_center = size * 0.5 - self.origin * self.sprite.scale;
        let center = self.position + Vec2::from_angle(self.rotation).rotate(pivot_to_center);
        Rect::from_center_size(center, size)
    }
}

/// Draws produced for the current frame, in paint order
#[derive(Resource, Reflect, Debug, Default)]
#[reflect(Resource)]
pub struct TrackerDrawList {
    pub draws: Vec<IndicatorDraw>,
}

/// System that rebuilds the draw list from the tracked points
pub fn collect_indicator_draws(
    config: Res<TrackerConfig>,
    host: Res<HostContext>,
    viewport: Res<TrackerViewport>,
    params: Res<PlacementParams>,
    sprites: Res<TrackerSprites>,
    points: Query<(&TrackedPoint, Option<&TargetAppearance>)>,
    mut draw_list: ResMut<TrackerDrawList>,
) {
    draw_list.draws.clear();

    if !host.allows_trackers(&config) {
        return;
    }
    let Some(render_mode) = RenderMode::select(sprites.mode(), &config) else {
        return;
    };

    let layer = DrawLayer::from_config(&config);
    let scale = config.pixel_scale;
    let tracked = points
        .iter()
        .filter(|(point, _)| config.tracks(point.category));

    match render_mode {
        RenderMode::Tracker => {
            let Some((image, sprite)) = sprites.tracker_sprite(scale) else {
                return;
            };
            for (point, _) in tracked {
                let Some(placement) =
                    place_with(point.position, &viewport, sprite.render_size(), &params)
                else {
                    continue;
                };
                draw_list.draws.push(IndicatorDraw {
                    image: image.clone(),
                    sprite,
                    position: placement.position,
                    rotation: placement.rotation,
                    origin: placement.origin,
                    layer,
                });
            }
        },
        RenderMode::TargetIcons => {
            let background = sprites.background_sprite(scale);
            for (point, appearance) in tracked {
                let Some(appearance) = appearance else {
                    continue;
                };
                push_target_icon(
                    &mut draw_list.draws,
                    point.position,
                    appearance,
                    background.as_ref(),
                    scale,
                    layer,
                    &viewport,
                    &params,
                );
            }
        },
    }
}

/// Draws a target's own icon, unrotated, centered where the rotated frame would sit.
/// The frame is the background when one is loaded, otherwise the icon itself.
#[allow(clippy::too_many_arguments)]
fn push_target_icon(
    draws: &mut Vec<IndicatorDraw>,
    target: TargetPosition,
    appearance: &TargetAppearance,
    background: Option<&(Handle<Image>, IndicatorSprite)>,
    scale: f32,
    layer: DrawLayer,
    viewport: &TrackerViewport,
    params: &PlacementParams,
) {
    let icon = IndicatorSprite::new(appearance.rect, scale);
    let (frame_image, frame_sprite) = background
        .cloned()
        .unwrap_or_else(|| (appearance.image.clone(), icon));

    let Some(placement) = place_with(target, viewport, frame_sprite.render_size(), params) else {
        return;
    };

    let frame = IndicatorDraw {
        image: frame_image,
        sprite: frame_sprite,
        position: placement.position,
        rotation: placement.rotation,
        origin: placement.origin,
        layer,
    };
    let center = frame.node_rect().center();
    if background.is_some() {
        draws.push(frame);
    }

    draws.push(IndicatorDraw {
        image: appearance.image.clone(),
        sprite: icon,
        position: center,
        rotation: 0.0,
        origin: appearance.rect.size() * 0.5,
        layer,
    });
}
