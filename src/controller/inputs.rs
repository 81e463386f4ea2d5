//! Events for driving a [`FollowWindow`] from UI controls.

use bevy_ecs::prelude::*;
use bevy_log::prelude::*;

use super::{anchor::WindowAnchor, component::FollowWindow};

/// Send this event to adjust a [`FollowWindow`], typically from a slider. Inputs are applied in
/// `PostUpdate`, before the window moves.
#[derive(Debug, Clone, Copy, Event)]
pub struct WindowInput {
    /// The entity holding the [`FollowWindow`] to adjust.
    pub controller: Entity,
    /// What to change.
    pub kind: WindowInputKind,
}

/// A single adjustment to a [`FollowWindow`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowInputKind {
    /// Slider value in `[0, 1]`, see [`FollowWindow::set_horizontal_offset`].
    Horizontal(f32),
    /// Slider value in `[0, 1]`, see [`FollowWindow::set_vertical_offset`].
    Vertical(f32),
    /// See [`FollowWindow::set_depth_offset`].
    Depth(f32),
    /// See [`FollowWindow::set_scale`].
    Scale(f32),
    /// See [`FollowWindow::set_follow_speed`].
    FollowSpeed(f32),
    /// See [`FollowWindow::set_anchor`].
    Anchor(WindowAnchor),
    /// See [`FollowWindow::snap`].
    Snap,
}

impl WindowInputKind {
    /// Apply this adjustment to `window`.
    pub fn apply(self, window: &mut FollowWindow) {
        match self {
            Self::Horizontal(value) => window.set_horizontal_offset(value),
            Self::Vertical(value) => window.set_vertical_offset(value),
            Self::Depth(value) => window.set_depth_offset(value),
            Self::Scale(value) => window.set_scale(value),
            Self::FollowSpeed(value) => window.set_follow_speed(value),
            Self::Anchor(anchor) => window.set_anchor(anchor),
            Self::Snap => window.snap(),
        }
    }
}

impl WindowInput {
    /// Set the horizontal offset of `controller` from a slider value.
    pub fn horizontal(controller: Entity, value: f32) -> Self {
        Self {
            controller,
            kind: WindowInputKind::Horizontal(value),
        }
    }

    /// Set the vertical offset of `controller` from a slider value.
    pub fn vertical(controller: Entity, value: f32) -> Self {
        Self {
            controller,
            kind: WindowInputKind::Vertical(value),
        }
    }

    /// Set the depth offset of `controller`.
    pub fn depth(controller: Entity, value: f32) -> Self {
        Self {
            controller,
            kind: WindowInputKind::Depth(value),
        }
    }

    /// Set the scale of `controller`.
    pub fn scale(controller: Entity, value: f32) -> Self {
        Self {
            controller,
            kind: WindowInputKind::Scale(value),
        }
    }

    /// Set the follow speed of `controller`.
    pub fn follow_speed(controller: Entity, value: f32) -> Self {
        Self {
            controller,
            kind: WindowInputKind::FollowSpeed(value),
        }
    }

    /// Park `controller` at `anchor`.
    pub fn anchor(controller: Entity, anchor: WindowAnchor) -> Self {
        Self {
            controller,
            kind: WindowInputKind::Anchor(anchor),
        }
    }

    /// Move the window of `controller` straight to its target on the next update.
    pub fn snap(controller: Entity) -> Self {
        Self {
            controller,
            kind: WindowInputKind::Snap,
        }
    }

    pub(crate) fn receive(mut events: EventReader<Self>, mut controllers: Query<&mut FollowWindow>) {
        for event in events.read() {
            let Ok(mut window) = controllers.get_mut(event.controller) else {
                debug!("Dropping {:?}, no FollowWindow on {}", event.kind, event.controller);
                continue;
            };
            event.kind.apply(&mut window);
        }
    }
}
