//! Settings record for the tracker overlay, stored as a RON file.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use bevy::prelude::*;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::components::TrackedCategory;

pub const DEFAULT_PIXEL_SCALE: f32 = 4.0;
pub const MIN_PIXEL_SCALE: f32 = 1.0;
pub const MAX_PIXEL_SCALE: f32 = 16.0;
pub const DEFAULT_TRACKER_TEXTURE: &str = "tracker.png";
pub const DEFAULT_BACKGROUND_TEXTURE: &str = "background.png";

/// Errors from reading or writing the settings file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path:   PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] ron::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
}

/// User-facing settings for the tracker overlay
#[derive(Resource, Reflect, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[reflect(Resource)]
#[serde(default)]
pub struct TrackerConfig {
    /// Show trackers even when the player lacks the tracker perk
    pub enable_without_perk:       bool,
    /// Draw each target's own icon instead of the tracker arrow
    pub replace_with_target_icons: bool,
    /// Draw trackers beneath the game's interface instead of above it
    pub draw_behind_interface:     bool,
    /// Screen pixels per texel of the tracker sprite
    pub pixel_scale:               f32,
    pub track_forage:              bool,
    pub track_artifact_spots:      bool,
    pub track_panning_spots:       bool,
    pub track_spring_onions:       bool,
    pub track_berry_bushes:        bool,
    pub track_walnut_bushes:       bool,
    /// Asset path of the tracker arrow texture
    pub tracker_texture:           String,
    /// Asset path of the background drawn behind target icons
    pub background_texture:        String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            enable_without_perk:       false,
            replace_with_target_icons: false,
            draw_behind_interface:     false,
            pixel_scale:               DEFAULT_PIXEL_SCALE,
            track_forage:              true,
            track_artifact_spots:      true,
            track_panning_spots:       true,
            track_spring_onions:       true,
            track_berry_bushes:        true,
            track_walnut_bushes:       true,
            tracker_texture:           DEFAULT_TRACKER_TEXTURE.to_string(),
            background_texture:        DEFAULT_BACKGROUND_TEXTURE.to_string(),
        }
    }
}

impl TrackerConfig {
    /// Returns true if indicators should be drawn for `category`
    pub const fn tracks(&self, category: TrackedCategory) -> bool {
        match category {
            TrackedCategory::Forage => self.track_forage,
            TrackedCategory::ArtifactSpot => self.track_artifact_spots,
            TrackedCategory::PanningSpot => self.track_panning_spots,
            TrackedCategory::SpringOnion => self.track_spring_onions,
            TrackedCategory::BerryBush => self.track_berry_bushes,
            TrackedCategory::WalnutBush => self.track_walnut_bushes,
        }
    }

    /// Reads settings from `path`. Out-of-range values are clamped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = ron::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.sanitized())
    }

    /// Writes settings to `path`, creating parent directories as needed
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;

        let write_error = |source: io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(path, text).map_err(write_error)
    }

    /// Reads settings from `path`, falling back to defaults.
    /// A missing file is created with the defaults; an unreadable one is left untouched.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded tracker settings from {}", path.display());
                config
            },
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                let config = Self::default();
                match config.save(path) {
                    Ok(()) => info!("Created default tracker settings at {}", path.display()),
                    Err(e) => warn!("{e}"),
                }
                config
            },
            Err(e) => {
                warn!("{e}; using default tracker settings");
                Self::default()
            },
        }
    }

    fn sanitized(mut self) -> Self {
        if !self.pixel_scale.is_finite() {
            warn!(
                "Invalid tracker pixel scale {}; using {DEFAULT_PIXEL_SCALE}",
                self.pixel_scale
            );
            self.pixel_scale = DEFAULT_PIXEL_SCALE;
        }
        self.pixel_scale = self.pixel_scale.clamp(MIN_PIXEL_SCALE, MAX_PIXEL_SCALE);
        self
    }
}

/// Location of the settings file, when the plugin persists settings
#[derive(Resource, Debug, Clone)]
pub struct TrackerConfigPath(pub PathBuf);
