//! Tracker textures and the session's icon mode.
//!
//! The tracker arrow is requested once per session. If it fails to load, the overlay switches
//! to drawing each target's own icon and stays that way until the session ends.

use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::config::TrackerConfig;
use crate::events::IconModeChanged;

/// Source region within a texture plus the scale it is drawn at
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct IndicatorSprite {
    /// Source region in texels
    pub rect:  Rect,
    /// Screen pixels per texel
    pub scale: f32,
}

impl IndicatorSprite {
    pub const fn new(rect: Rect, scale: f32) -> Self { Self { rect, scale } }

    /// Sprite covering a whole texture of `size` texels
    pub fn whole(size: UVec2, scale: f32) -> Self {
        Self::new(Rect::from_corners(Vec2::ZERO, size.as_vec2()), scale)
    }

    /// On-screen size in pixels
    pub fn render_size(&self) -> Vec2 { self.rect.size() * self.scale }
}

/// Which icon the overlay draws for the rest of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum IconMode {
    /// Nothing requested yet; nothing is drawn
    #[default]
    Unloaded,
    /// Tracker texture requested; nothing is drawn until it resolves
    Loading,
    /// Dedicated tracker arrow
    PrimaryLoaded,
    /// Tracker arrow unavailable; targets are drawn with their own icons
    FallbackLoaded,
}

/// Load status of a requested texture, reduced to what the icon mode cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    Pending,
    Ready,
    Failed,
}

impl From<&LoadState> for AssetStatus {
    fn from(state: &LoadState) -> Self {
        match state {
            LoadState::Loaded => Self::Ready,
            LoadState::Failed(_) => Self::Failed,
            _ => Self::Pending,
        }
    }
}

impl IconMode {
    /// Mode after a load request. Only an unloaded session starts loading.
    pub const fn requested(self) -> Self {
        match self {
            Self::Unloaded => Self::Loading,
            other => other,
        }
    }

    /// Mode after observing the tracker texture's load status.
    /// Only `Loading` reacts; loaded modes never change again.
    pub const fn resolved(self, status: AssetStatus) -> Self {
        match (self, status) {
            (Self::Loading, AssetStatus::Ready) => Self::PrimaryLoaded,
            (Self::Loading, AssetStatus::Failed) => Self::FallbackLoaded,
            (mode, _) => mode,
        }
    }
}

/// Texture handles for the overlay and the current icon mode
#[derive(Resource, Reflect, Debug, Default)]
#[reflect(Resource)]
pub struct TrackerSprites {
    /// Tracker arrow texture
    pub tracker:            Option<Handle<Image>>,
    /// Optional background drawn behind target icons
    pub background:         Option<Handle<Image>>,
    /// Whether `background` finished loading
    pub background_ready:   bool,
    /// Texel size of the tracker texture, known once it has loaded
    pub tracker_size:       Option<UVec2>,
    /// Texel size of the background texture, known once it has loaded
    pub background_size:    Option<UVec2>,
    mode:                   IconMode,
}

impl TrackerSprites {
    pub const fn mode(&self) -> IconMode { self.mode }

    /// Sets the mode and returns the change event if it differs from the current one
    pub fn transition(&mut self, next: IconMode) -> Option<IconModeChanged> {
        if next == self.mode {
            return None;
        }
        let previous = std::mem::replace(&mut self.mode, next);
        Some(IconModeChanged {
            previous,
            current: next,
        })
    }

    /// Tracker sprite at `scale`, if the arrow is loaded
    pub fn tracker_sprite(&self, scale: f32) -> Option<(Handle<Image>, IndicatorSprite)> {
        if self.mode != IconMode::PrimaryLoaded {
            return None;
        }
        let handle = self.tracker.clone()?;
        let size = self.tracker_size?;
        Some((handle, IndicatorSprite::whole(size, scale)))
    }

    /// Background sprite at `scale`, if the background is loaded
    pub fn background_sprite(&self, scale: f32) -> Option<(Handle<Image>, IndicatorSprite)> {
        if !self.background_ready {
            return None;
        }
        let handle = self.background.clone()?;
        let size = self.background_size?;
        Some((handle, IndicatorSprite::whole(size, scale)))
    }
}

/// Requests the tracker and background textures if this session has not done so yet
pub fn request_tracker_sprites(
    commands: &mut Commands,
    sprites: &mut TrackerSprites,
    config: &TrackerConfig,
    asset_server: &AssetServer,
) {
    let next = sprites.mode().requested();
    let Some(changed) = sprites.transition(next) else {
        debug!("Tracker sprites already requested ({:?})", sprites.mode());
        return;
    };

    info!("Loading tracker sprites from {}", config.tracker_texture);
    sprites.tracker = Some(asset_server.load(config.tracker_texture.clone()));
    sprites.background = Some(asset_server.load(config.background_texture.clone()));
    sprites.background_ready = false;
    commands.trigger(changed);
}

/// Load status of `handle`. Images already present in `images` count as ready.
fn image_status(
    asset_server: &AssetServer,
    images: &Assets<Image>,
    handle: Option<&Handle<Image>>,
) -> AssetStatus {
    let Some(handle) = handle else {
        return AssetStatus::Failed;
    };
    if images.contains(handle.id()) {
        return AssetStatus::Ready;
    }
    asset_server
        .get_load_state(handle.id())
        .as_ref()
        .map_or(AssetStatus::Pending, AssetStatus::from)
}

impl TrackerSprites {
    /// Applies the observed status of the tracker texture.
    /// A texture reported ready whose image is not available yet keeps the session loading.
    pub fn resolve_tracker(
        &mut self,
        status: AssetStatus,
        images: &Assets<Image>,
    ) -> Option<IconModeChanged> {
        let next = self.mode.resolved(status);
        match next {
            IconMode::PrimaryLoaded => {
                let size = self
                    .tracker
                    .as_ref()
                    .and_then(|handle| images.get(handle))
                    .map(Image::size);
                let Some(size) = size else {
                    debug!("Tracker texture loaded but its image is not available yet");
                    return None;
                };
                self.tracker_size = Some(size);
            },
            IconMode::FallbackLoaded if self.mode == IconMode::Loading => {
                warn!("Tracker texture failed to load; drawing target icons instead");
            },
            _ => {},
        }
        self.transition(next)
    }

    /// Applies the observed status of the background texture. Failure only drops the
    /// background.
    pub fn resolve_background(&mut self, status: AssetStatus, images: &Assets<Image>) {
        if self.background_ready {
            return;
        }
        let Some(handle) = self.background.as_ref() else {
            return;
        };
        match status {
            AssetStatus::Ready => {
                let Some(size) = images.get(handle).map(Image::size) else {
                    return;
                };
                self.background_size = Some(size);
                self.background_ready = true;
            },
            AssetStatus::Failed => {
                warn!("Tracker background texture failed to load; drawing icons without it");
                self.background = None;
            },
            AssetStatus::Pending => {},
        }
    }
}

/// System that resolves pending texture loads into the session's icon mode
pub fn poll_tracker_sprites(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    mut sprites: ResMut<TrackerSprites>,
) {
    if sprites.mode() == IconMode::Loading {
        let status = image_status(&asset_server, &images, sprites.tracker.as_ref());
        if let Some(changed) = sprites.resolve_tracker(status, &images) {
            commands.trigger(changed);
        }
    }

    if !sprites.background_ready && sprites.background.is_some() {
        let status = image_status(&asset_server, &images, sprites.background.as_ref());
        sprites.resolve_background(status, &images);
    }
}
