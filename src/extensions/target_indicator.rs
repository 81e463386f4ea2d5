//! A `bevy_follow_window` extension that draws where each window is heading. This makes it easier
//! to tune offsets and follow speed, since the outline shows the settled pose while the window is
//! still catching up.

use bevy_app::prelude::*;
use bevy_color::Color;
use bevy_ecs::prelude::*;
use bevy_gizmos::prelude::*;
use bevy_math::{prelude::*, Isometry3d};
use bevy_reflect::prelude::*;
use bevy_transform::prelude::*;

use crate::prelude::*;

/// See the [module](self) docs.
pub struct TargetIndicatorPlugin;

impl Plugin for TargetIndicatorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            draw_targets.after(bevy_transform::TransformSystem::TransformPropagate),
        )
        .register_type::<TargetIndicator>();
    }
}

/// Optional. Configures whether or not a [`FollowWindow`] should show its target pose. The
/// indicator is disabled if this component is not present.
#[derive(Debug, Component, Reflect)]
pub struct TargetIndicator {
    /// Should the indicator be visible for this window?
    pub enabled: bool,
    /// The size of the outline, before the window scale is applied.
    pub size: Vec2,
}

impl Default for TargetIndicator {
    fn default() -> Self {
        Self {
            enabled: true,
            size: Vec2::new(1.6, 0.9),
        }
    }
}

/// Use gizmos to draw each window's target outline, and a line from the window to it.
pub fn draw_targets(
    controllers: Query<(&FollowWindow, &TargetIndicator)>,
    windows: Query<&GlobalTransform, With<FollowedWindow>>,
    mut gizmos: Gizmos,
) {
    let color = Color::srgb(1.0, 0.8, 0.2);
    for (follow, indicator) in controllers.iter().filter(|(_, i)| i.enabled) {
        let Some((translation, rotation)) = follow.last_target() else {
            continue;
        };
        gizmos.rect(
            Isometry3d::new(translation, rotation),
            indicator.size * follow.scale(),
            color,
        );

        let Some(window) = follow.window().and_then(|w| windows.get(w).ok()) else {
            continue;
        };
        let current = window.translation();
        if current.distance(translation) > 1e-3 {
            gizmos.line(current, translation, color);
        }
    }
}
