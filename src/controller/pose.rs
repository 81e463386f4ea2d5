//! Computes where a followed window wants to be, given the camera that it follows.

use bevy_math::prelude::*;
use bevy_reflect::prelude::*;
use bevy_render::prelude::*;
use bevy_transform::prelude::*;

use super::anchor::WindowAnchor;

/// Numerator of the field-of-view based view distance, in world units times degrees.
pub const VIEW_DISTANCE_FACTOR: f32 = 16.0;
/// The window is never placed closer than this, even if the camera's near plane is closer.
pub const MIN_CLIP_DISTANCE: f32 = 0.5;
/// Tilt applied to windows anchored in the top or bottom row.
pub const DEFAULT_HORIZONTAL_TILT_DEGREES: f32 = 20.0;
/// Tilt applied to windows anchored in the left or right column.
pub const DEFAULT_VERTICAL_TILT_DEGREES: f32 = 10.0;

/// A snapshot of the camera a window follows, taken once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct CameraPose {
    /// World space position of the camera.
    pub position: Vec3,
    /// World space rotation of the camera.
    pub rotation: Quat,
    /// Vertical field of view, in degrees.
    pub fov_degrees: f32,
    /// Distance to the near clipping plane.
    pub near: f32,
}

impl CameraPose {
    /// Build a pose from a camera's transform and projection. Only perspective projections have a
    /// field of view, so any other projection yields `None`.
    pub fn from_camera(transform: &GlobalTransform, projection: &Projection) -> Option<Self> {
        let Projection::Perspective(perspective) = projection else {
            return None;
        };
        let (_, rotation, position) = transform.to_scale_rotation_translation();
        Some(Self {
            position,
            rotation,
            fov_degrees: perspective.fov.to_degrees(),
            near: perspective.near,
        })
    }

    /// The direction the camera is looking.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// The camera's right direction.
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// The camera's up direction.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

/// Rotations that turn an off-center window back toward the viewer.
///
/// `horizontal` pitches about the camera's local X axis and is used by the top and bottom rows,
/// `vertical` yaws about the local Y axis and is used by the left and right columns. The signs
/// assume the window's visible face points along its local +Z, as Bevy's `Rectangle` mesh does.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct TiltQuaternions {
    pub horizontal: Quat,
    pub horizontal_inverse: Quat,
    pub vertical: Quat,
    pub vertical_inverse: Quat,
}

impl Default for TiltQuaternions {
    fn default() -> Self {
        Self::from_degrees(
            DEFAULT_HORIZONTAL_TILT_DEGREES,
            DEFAULT_VERTICAL_TILT_DEGREES,
        )
    }
}

impl TiltQuaternions {
    /// Precompute the tilt rotations for the given angles.
    pub fn from_degrees(horizontal_degrees: f32, vertical_degrees: f32) -> Self {
        let horizontal = Quat::from_rotation_x(-horizontal_degrees.to_radians());
        let vertical = Quat::from_rotation_y(-vertical_degrees.to_radians());
        Self {
            horizontal,
            horizontal_inverse: horizontal.inverse(),
            vertical,
            vertical_inverse: vertical.inverse(),
        }
    }

    /// The correction applied on top of the camera rotation for a window parked at `anchor`.
    pub fn correction(&self, anchor: WindowAnchor) -> Quat {
        match anchor {
            WindowAnchor::TopLeft => self.horizontal_inverse * self.vertical_inverse,
            WindowAnchor::TopCenter => self.horizontal_inverse,
            WindowAnchor::TopRight => self.horizontal_inverse * self.vertical,
            WindowAnchor::MiddleLeft => self.vertical_inverse,
            WindowAnchor::MiddleCenter => Quat::IDENTITY,
            WindowAnchor::MiddleRight => self.vertical,
            WindowAnchor::BottomLeft => self.horizontal * self.vertical_inverse,
            WindowAnchor::BottomCenter => self.horizontal,
            WindowAnchor::BottomRight => self.horizontal * self.vertical,
        }
    }
}

/// Distance from the camera to the window along the view axis, before the depth offset.
///
/// Narrow fields of view push the window further away, but never inside the near plane or
/// [`MIN_CLIP_DISTANCE`].
pub fn view_distance(fov_degrees: f32, near: f32) -> f32 {
    (VIEW_DISTANCE_FACTOR / fov_degrees).max(near.max(MIN_CLIP_DISTANCE))
}

/// The world space position the window should move toward.
///
/// `fov_degrees` is passed separately from the pose because the field of view sample may be held
/// while the platform is recording, see [`FieldOfViewSource`](super::fov::FieldOfViewSource).
pub fn target_position(pose: &CameraPose, offset: Vec3, fov_degrees: f32) -> Vec3 {
    let distance = view_distance(fov_degrees, pose.near) + offset.z;
    pose.position + pose.forward() * distance + pose.right() * offset.x + pose.up() * offset.y
}

/// The world space rotation the window should turn toward.
pub fn target_rotation(pose: &CameraPose, anchor: WindowAnchor, tilt: &TiltQuaternions) -> Quat {
    pose.rotation * tilt.correction(anchor)
}
