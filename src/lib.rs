// bevy_edge_tracker
// HUD overlay that points toward off-screen points of interest:
// - Edge clamping and rotation for indicators
// - Tracker arrow with a target-icon fallback when the arrow texture is missing
// - RON settings file with save/reset events

use std::path::PathBuf;

use bevy::prelude::*;

mod components;
mod config;
mod draw;
mod events;
mod observers;
mod overlay;
mod placement;
pub mod prelude;
mod sprites;

// Public API - Events
pub use events::DayStarted;
pub use events::IconModeChanged;
pub use events::ResetTrackerConfig;
pub use events::SaveTrackerConfig;

// Public API - Components (attached by the host)
pub use components::TargetAppearance;
pub use components::TrackedCategory;
pub use components::TrackedPoint;
pub use components::TrackerIndicator;

// Public API - Placement
pub use placement::DEFAULT_MARGIN;
pub use placement::DEFAULT_VISIBILITY_RADIUS;
pub use placement::Placement;
pub use placement::PlacementParams;
pub use placement::ScreenSide;
pub use placement::TILE_SIZE;
pub use placement::TargetPosition;
pub use placement::TrackerViewport;
pub use placement::place;
pub use placement::place_with;

// Public API - Configuration
pub use config::ConfigError;
pub use config::TrackerConfig;
pub use config::TrackerConfigPath;

// Public API - Per-frame state written or read by the host
pub use draw::DrawLayer;
pub use draw::HostContext;
pub use draw::IndicatorDraw;
pub use draw::TrackerDrawList;
pub use sprites::IconMode;
pub use sprites::IndicatorSprite;
pub use sprites::TrackerSprites;

// Internal - used by plugin, not for external use
use draw::collect_indicator_draws;
use observers::log_icon_mode_changed;
use observers::on_day_started;
use observers::on_reset_tracker_config;
use observers::on_save_tracker_config;
use overlay::sync_indicator_nodes;
use sprites::poll_tracker_sprites;

/// Plugin that adds the edge tracker overlay.
///
/// With a `config_path`, settings are read from that RON file at startup (created with defaults
/// if missing) and written back on `SaveTrackerConfig`/`ResetTrackerConfig`. Without one the
/// defaults are used and never persisted.
#[derive(Debug, Clone, Default)]
pub struct EdgeTrackerPlugin {
    pub config_path: Option<PathBuf>,
}

impl EdgeTrackerPlugin {
    pub fn with_config_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }
}

impl Plugin for EdgeTrackerPlugin {
    fn build(&self, app: &mut App) {
        let config = self
            .config_path
            .as_ref()
            .map_or_else(TrackerConfig::default, TrackerConfig::load_or_default);
        if let Some(path) = &self.config_path {
            app.insert_resource(TrackerConfigPath(path.clone()));
        }

        app.insert_resource(config)
            // Initialize resources
            .init_resource::<TrackerViewport>()
            .init_resource::<HostContext>()
            .init_resource::<PlacementParams>()
            .init_resource::<TrackerSprites>()
            .init_resource::<TrackerDrawList>()
            // Register observers for lifecycle events
            .add_observer(on_day_started)
            .add_observer(on_save_tracker_config)
            .add_observer(on_reset_tracker_config)
            .add_observer(log_icon_mode_changed)
            // Add systems
            .add_systems(
                Update,
                (
                    poll_tracker_sprites,
                    collect_indicator_draws,
                    sync_indicator_nodes,
                )
                    .chain(),
            );
    }
}
