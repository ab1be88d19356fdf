//! Demonstrates edge trackers for off-screen points using `bevy_edge_tracker`.
//!
//! - Arrow keys pan the camera across a field of scattered points
//! - Points outside the window get an indicator at the nearest screen edge
//! - Press 'P' to toggle the tracker perk, 'B' to toggle drawing behind the interface
//! - Press 'S' to save settings, 'R' to reset them
//!
//! Without `assets/tracker.png` the overlay falls back to drawing each point's own icon, which
//! the demo generates at startup.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::Extent3d;
use bevy::render::render_resource::TextureDimension;
use bevy::render::render_resource::TextureFormat;
use bevy::window::PrimaryWindow;
use bevy_brp_extras::BrpExtrasPlugin;
use bevy_edge_tracker::DayStarted;
use bevy_edge_tracker::EdgeTrackerPlugin;
use bevy_edge_tracker::HostContext;
use bevy_edge_tracker::IconModeChanged;
use bevy_edge_tracker::ResetTrackerConfig;
use bevy_edge_tracker::SaveTrackerConfig;
use bevy_edge_tracker::TILE_SIZE;
use bevy_edge_tracker::TargetAppearance;
use bevy_edge_tracker::TrackedCategory;
use bevy_edge_tracker::TrackedPoint;
use bevy_edge_tracker::TrackerConfig;
use bevy_edge_tracker::TrackerViewport;

const CAMERA_SPEED: f32 = 600.0;
const SETTINGS_PATH: &str = "target/tracker_demo.ron";
const POINT_ICON_TEXELS: u32 = 16;
const POINT_ICON_FILL: [u8; 4] = [90, 200, 110, 255];
const POINT_ICON_BORDER: [u8; 4] = [20, 60, 30, 255];

const POINTS: [(IVec2, TrackedCategory); 8] = [
    (IVec2::new(-12, -8), TrackedCategory::Forage),
    (IVec2::new(30, 2), TrackedCategory::ArtifactSpot),
    (IVec2::new(4, 20), TrackedCategory::PanningSpot),
    (IVec2::new(-20, 14), TrackedCategory::SpringOnion),
    (IVec2::new(26, -15), TrackedCategory::BerryBush),
    (IVec2::new(8, -22), TrackedCategory::WalnutBush),
    (IVec2::new(-30, 0), TrackedCategory::Forage),
    (IVec2::new(5, 5), TrackedCategory::Forage),
];

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            EdgeTrackerPlugin::with_config_path(SETTINGS_PATH),
            BrpExtrasPlugin::default(),
        ))
        .insert_resource(HostContext {
            has_tracker_perk: true,
            ..default()
        })
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (move_camera, update_viewport, toggle_settings).chain(),
        )
        .add_observer(log_icon_mode)
        .run();
}

/// Demo world coordinates are y-down pixels; Bevy's are y-up.
fn world_to_translation(world: Vec2) -> Vec3 { Vec3::new(world.x, -world.y, 0.0) }

/// Filled square with a dark border, used as every point's own icon
fn point_icon() -> Image {
    let size = POINT_ICON_TEXELS;
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let border = x == 0 || y == 0 || x == size - 1 || y == size - 1;
            data.extend_from_slice(if border {
                &POINT_ICON_BORDER
            } else {
                &POINT_ICON_FILL
            });
        }
    }
    Image::new(
        Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}

fn setup(mut commands: Commands, mut images: ResMut<Assets<Image>>) {
    commands.spawn(Camera2d);

    let icon = images.add(point_icon());
    let icon_rect = Rect::new(0.0, 0.0, POINT_ICON_TEXELS as f32, POINT_ICON_TEXELS as f32);
    for (tile, category) in POINTS {
        let point = TrackedPoint::tile(tile, category);
        commands.spawn((
            Name::new(format!("{category:?} at {tile}")),
            point,
            TargetAppearance {
                image: icon.clone(),
                rect:  icon_rect,
            },
            Sprite {
                image: icon.clone(),
                custom_size: Some(Vec2::splat(TILE_SIZE * 0.5)),
                ..default()
            },
            Transform::from_translation(world_to_translation(point.position.center())),
        ));
    }

    commands.trigger(DayStarted);
}

fn move_camera(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut camera: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(mut transform) = camera.single_mut() else {
        return;
    };
    let mut direction = Vec2::ZERO;
    if keys.pressed(KeyCode::ArrowLeft) {
        direction.x -= 1.0;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        direction.x += 1.0;
    }
    if keys.pressed(KeyCode::ArrowUp) {
        direction.y += 1.0;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        direction.y -= 1.0;
    }
    let step = direction.normalize_or_zero() * CAMERA_SPEED * time.delta_secs();
    transform.translation += step.extend(0.0);
}

fn update_viewport(
    window: Query<&Window, With<PrimaryWindow>>,
    camera: Query<&Transform, With<Camera2d>>,
    mut viewport: ResMut<TrackerViewport>,
) {
    let (Ok(window), Ok(camera)) = (window.single(), camera.single()) else {
        return;
    };
    let size = window.size();
    let center = Vec2::new(camera.translation.x, -camera.translation.y);
    *viewport = TrackerViewport::new(size, center - size * 0.5);
}

fn toggle_settings(
    keys: Res<ButtonInput<KeyCode>>,
    mut commands: Commands,
    mut host: ResMut<HostContext>,
    mut config: ResMut<TrackerConfig>,
) {
    if keys.just_pressed(KeyCode::KeyP) {
        host.has_tracker_perk = !host.has_tracker_perk;
        info!("Tracker perk: {}", host.has_tracker_perk);
    }
    if keys.just_pressed(KeyCode::KeyB) {
        config.draw_behind_interface = !config.draw_behind_interface;
    }
    if keys.just_pressed(KeyCode::KeyS) {
        commands.trigger(SaveTrackerConfig);
    }
    if keys.just_pressed(KeyCode::KeyR) {
        commands.trigger(ResetTrackerConfig);
    }
}

fn log_icon_mode(changed: On<IconModeChanged>) {
    info!("Icon mode {:?} -> {:?}", changed.previous, changed.current);
}
