//! Observers that wire host events to tracker behavior.

use bevy::prelude::*;

use crate::config::TrackerConfig;
use crate::config::TrackerConfigPath;
use crate::events::DayStarted;
use crate::events::IconModeChanged;
use crate::events::ResetTrackerConfig;
use crate::events::SaveTrackerConfig;
use crate::sprites::TrackerSprites;
use crate::sprites::request_tracker_sprites;

/// Observer for `DayStarted` - requests tracker textures on the first day of a session
pub fn on_day_started(
    _day: On<DayStarted>,
    mut commands: Commands,
    mut sprites: ResMut<TrackerSprites>,
    config: Res<TrackerConfig>,
    asset_server: Res<AssetServer>,
) {
    request_tracker_sprites(&mut commands, &mut sprites, &config, &asset_server);
}

/// Observer for `SaveTrackerConfig` - writes the current settings to disk
pub fn on_save_tracker_config(
    _save: On<SaveTrackerConfig>,
    config: Res<TrackerConfig>,
    path: Option<Res<TrackerConfigPath>>,
) {
    let Some(path) = path else {
        debug!("SaveTrackerConfig: no settings path configured");
        return;
    };
    match config.save(&path.0) {
        Ok(()) => info!("Saved tracker settings to {}", path.0.display()),
        Err(e) => warn!("SaveTrackerConfig: {e}"),
    }
}

/// Observer for `ResetTrackerConfig` - restores defaults and persists them
pub fn on_reset_tracker_config(
    _reset: On<ResetTrackerConfig>,
    mut commands: Commands,
    mut config: ResMut<TrackerConfig>,
) {
    *config = TrackerConfig::default();
    info!("Tracker settings reset to defaults");
    commands.trigger(SaveTrackerConfig);
}

/// Observer for `IconModeChanged`
pub fn log_icon_mode_changed(changed: On<IconModeChanged>) {
    debug!(
        "Tracker icon mode: {:?} -> {:?}",
        changed.previous, changed.current
    );
}
