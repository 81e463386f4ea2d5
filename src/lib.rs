//! A Bevy plugin that keeps a UI panel in view of a moving camera, for head-mounted and AR
//! displays where a panel locked rigidly to the head is uncomfortable to read.
//!
//! A [`FollowWindow`](controller::component::FollowWindow) owns a window entity and eases it
//! toward a pose in front of the camera every frame. Horizontal and vertical offsets, typically
//! from sliders, nudge the window around and snap it between nine anchors in a 3x3 grid. Windows
//! parked away from the center are tilted back toward the viewer.
//!
//! ```rust,ignore
//! App::new()
//!     .add_plugins((DefaultPlugins, DefaultWindowFollowPlugins))
//!     .add_systems(Startup, |mut commands: Commands| {
//!         let camera = commands.spawn(Camera3d::default()).id();
//!         commands.spawn(FollowWindow::new(camera).with_scale(0.5));
//!     })
//!     .run();
//! ```

pub mod controller;
pub mod extensions;

/// Common imports.
pub mod prelude {
    pub use crate::{
        controller::{
            anchor::{AnchorColumn, AnchorRow, WindowAnchor},
            component::{FollowWindow, FollowedWindow},
            fov::{
                CaptureAwareFieldOfView, CaptureSignal, CaptureStateChanged, FieldOfViewSource,
                LiveFieldOfView,
            },
            inputs::{WindowInput, WindowInputKind},
            pose::{CameraPose, TiltQuaternions},
            WindowFollowPlugin,
        },
        DefaultWindowFollowPlugins,
    };
}

/// Adds [`WindowFollowPlugin`](controller::WindowFollowPlugin) and the extensions enabled by cargo
/// features.
pub struct DefaultWindowFollowPlugins;

impl bevy_app::PluginGroup for DefaultWindowFollowPlugins {
    fn build(self) -> bevy_app::PluginGroupBuilder {
        let group = bevy_app::PluginGroupBuilder::start::<Self>().add(controller::WindowFollowPlugin);

        #[cfg(feature = "extension_target_indicator")]
        let group = group.add(extensions::target_indicator::TargetIndicatorPlugin);

        group
    }
}
