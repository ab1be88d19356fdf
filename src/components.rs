//! Components the host attaches to trackable world entities, and the overlay's own markers.

use bevy::prelude::*;

use crate::placement::TargetPosition;

/// Kind of point of interest, each toggled by its own setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum TrackedCategory {
    /// Spawned forage objects
    Forage,
    /// Buried artifact spots
    ArtifactSpot,
    /// Ore panning spots in water
    PanningSpot,
    SpringOnion,
    /// Harvestable salmonberry and blackberry bushes
    BerryBush,
    WalnutBush,
}

/// A world location the overlay should indicate while it is off-screen.
/// Positions are read fresh every frame; nothing is cached between frames.
#[derive(Component, Reflect, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct TrackedPoint {
    pub position: TargetPosition,
    pub category: TrackedCategory,
}

impl TrackedPoint {
    pub const fn tile(tile: IVec2, category: TrackedCategory) -> Self {
        Self {
            position: TargetPosition::Tile(tile),
            category,
        }
    }

    pub const fn pixel(pixel: Vec2, category: TrackedCategory) -> Self {
        Self {
            position: TargetPosition::Pixel(pixel),
            category,
        }
    }
}

/// The target's own sprite, drawn instead of the tracker arrow in target-icon mode
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct TargetAppearance {
    pub image: Handle<Image>,
    /// Source region within `image`, in texels
    pub rect:  Rect,
}

/// Marks a UI node owned by the overlay. `slot` is the index into the frame's draw list.
#[derive(Component, Reflect, Debug)]
#[reflect(Component)]
pub struct TrackerIndicator {
    pub slot: usize,
}
