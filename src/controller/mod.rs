//! The window follow controller: anchoring, target pose math, and the per-frame follow system.

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_transform::TransformSystem;
use bevy_window::RequestRedraw;

pub mod anchor;
pub mod component;
pub mod fov;
pub mod inputs;
pub mod pose;

/// Adds the [`component::FollowWindow`] systems. Spawn a `FollowWindow` to use it.
pub struct WindowFollowPlugin;

impl Plugin for WindowFollowPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<fov::CaptureSignal>()
            .add_event::<inputs::WindowInput>()
            .add_event::<fov::CaptureStateChanged>()
            .add_event::<RequestRedraw>()
            .add_systems(
                PostUpdate,
                (
                    fov::CaptureStateChanged::receive,
                    inputs::WindowInput::receive,
                    component::FollowWindow::sync_windows,
                    component::FollowWindow::update_windows,
                )
                    .chain()
                    .before(TransformSystem::TransformPropagate),
            )
            .register_type::<component::FollowWindow>()
            .register_type::<component::FollowedWindow>()
            .register_type::<anchor::WindowAnchor>()
            .register_type::<anchor::AnchorRow>()
            .register_type::<anchor::AnchorColumn>()
            .register_type::<pose::TiltQuaternions>()
            .register_type::<pose::CameraPose>();
    }
}
