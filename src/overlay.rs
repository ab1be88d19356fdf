//! UI overlay that mirrors the frame's draw list as rotated image nodes.

use bevy::prelude::*;
use bevy::ui::UiTransform;

use crate::components::TrackerIndicator;
use crate::draw::DrawLayer;
use crate::draw::IndicatorDraw;
use crate::draw::TrackerDrawList;

// Global z-indices for the two layers. The game interface sits at 0.
const BEHIND_INTERFACE_Z: i32 = -100;
const ABOVE_INTERFACE_Z: i32 = 100;

const fn layer_z_index(layer: DrawLayer) -> GlobalZIndex {
    match layer {
        DrawLayer::BehindInterface => GlobalZIndex(BEHIND_INTERFACE_Z),
        DrawLayer::AboveInterface => GlobalZIndex(ABOVE_INTERFACE_Z),
    }
}

fn indicator_node(draw: &IndicatorDraw) -> Node {
    let rect = draw.node_rect();
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(rect.min.x),
        top: Val::Px(rect.min.y),
        width: Val::Px(rect.width()),
        height: Val::Px(rect.height()),
        ..default()
    }
}

fn indicator_image(draw: &IndicatorDraw) -> ImageNode {
    ImageNode {
        image: draw.image.clone(),
        rect: Some(draw.sprite.rect),
        ..default()
    }
}

fn indicator_transform(draw: &IndicatorDraw) -> UiTransform {
    UiTransform {
        rotation: Rot2::radians(draw.rotation),
        ..default()
    }
}

/// System that updates the indicator node pool in place, spawning nodes for new draw slots
/// and despawning nodes whose slot no longer exists.
pub fn sync_indicator_nodes(
    mut commands: Commands,
    draw_list: Res<TrackerDrawList>,
    mut indicators: Query<(
        Entity,
        &TrackerIndicator,
        &mut Node,
        &mut ImageNode,
        &mut UiTransform,
        &mut GlobalZIndex,
    )>,
) {
    let mut filled = vec![false; draw_list.draws.len()];

    for (entity, indicator, mut node, mut image, mut transform, mut z_index) in &mut indicators {
        let Some(draw) = draw_list.draws.get(indicator.slot) else {
            commands.entity(entity).despawn();
            continue;
        };
        if filled[indicator.slot] {
            commands.entity(entity).despawn();
            continue;
        }
        filled[indicator.slot] = true;

        *node = indicator_node(draw);
        *image = indicator_image(draw);
        *transform = indicator_transform(draw);
        *z_index = layer_z_index(draw.layer);
    }

    for (slot, draw) in draw_list.draws.iter().enumerate() {
        if filled[slot] {
            continue;
        }
        commands.spawn((
            Name::new(format!("Tracker Indicator {slot}")),
            TrackerIndicator { slot },
            indicator_node(draw),
            indicator_image(draw),
            indicator_transform(draw),
            layer_z_index(draw.layer),
        ));
    }
}
