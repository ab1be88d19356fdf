//! Lifecycle events between the host and the tracker overlay.

use bevy::prelude::*;

use crate::sprites::IconMode;

/// Triggered by the host at the start of each in-game day (and so at session start).
/// Requests the tracker textures if they have not been requested yet.
#[derive(Event, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Event, FromReflect)]
pub struct DayStarted;

/// Writes the current `TrackerConfig` to its settings file
#[derive(Event, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Event, FromReflect)]
pub struct SaveTrackerConfig;

/// Restores default settings and writes them to the settings file
#[derive(Event, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Event, FromReflect)]
pub struct ResetTrackerConfig;

/// Fired when the icon mode changes, at most twice per session
/// (`Unloaded` → `Loading` → loaded).
#[derive(Event, Reflect, Debug, Clone, Copy)]
#[reflect(Event, FromReflect)]
pub struct IconModeChanged {
    pub previous: IconMode,
    pub current:  IconMode,
}
