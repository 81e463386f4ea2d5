//! The primary [`Component`] of the plugin, [`FollowWindow`].

use std::time::Duration;

use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use bevy_math::prelude::*;
use bevy_reflect::prelude::*;
use bevy_render::prelude::*;
use bevy_time::prelude::*;
use bevy_transform::{helper::TransformHelper, prelude::*};
use bevy_window::RequestRedraw;

use super::{
    anchor::WindowAnchor,
    fov::{FieldOfViewSource, LiveFieldOfView},
    pose::{target_position, target_rotation, CameraPose, TiltQuaternions},
};

/// Smallest allowed window scale.
pub const MIN_SCALE: f32 = 0.1;
/// Largest allowed window scale.
pub const MAX_SCALE: f32 = 10.0;

/// Keeps a window entity floating in front of a camera.
///
/// Adding this component to an entity makes the plugin spawn a window entity for it, tagged with
/// [`FollowedWindow`]. Parent your panel content to that entity; [`FollowWindow::window`] returns
/// it once it has been built. Every frame the window eases toward a target pose in front of the
/// camera. Removing the component, or despawning its entity, despawns the window.
///
/// # Moving the Window
///
/// Offsets arrive as slider values in `[0, 1]` with the midpoint at `0.5`, either by calling
/// [`FollowWindow::set_horizontal_offset`] and [`FollowWindow::set_vertical_offset`] directly, or
/// by sending a [`WindowInput`](super::inputs::WindowInput) event. Moving an offset far enough from
/// the midpoint snaps the [`WindowAnchor`] to another cell of the 3x3 grid, which tilts the window
/// back toward the viewer.
#[derive(Debug, Component, Reflect)]
#[reflect(from_reflect = false)]
pub struct FollowWindow {
    /// The camera to follow. When `None`, the window follows the only active camera with a
    /// perspective projection, and holds still if there are several.
    pub camera: Option<Entity>,
    anchor: WindowAnchor,
    offset: Vec3,
    scale: f32,
    follow_speed: f32,
    tilt: TiltQuaternions,
    #[reflect(ignore)]
    fov_source: Box<dyn FieldOfViewSource>,
    window: Option<Entity>,
    snap_requested: bool,
    last_target: Option<(Vec3, Quat)>,
}

impl Default for FollowWindow {
    fn default() -> Self {
        Self {
            camera: None,
            anchor: WindowAnchor::default(),
            offset: Vec3::new(1.0, 1.0, 0.0),
            scale: 0.7,
            follow_speed: 5.0,
            tilt: TiltQuaternions::default(),
            fov_source: Box::new(LiveFieldOfView),
            window: None,
            snap_requested: false,
            last_target: None,
        }
    }
}

/// Marks the window entity spawned for a [`FollowWindow`].
#[derive(Debug, Clone, Copy, Component, Reflect)]
pub struct FollowedWindow {
    /// The entity holding the [`FollowWindow`] that owns this window.
    pub controller: Entity,
}

impl FollowWindow {
    /// Create a window controller that follows `camera`.
    pub fn new(camera: Entity) -> Self {
        Self::default().with_camera(camera)
    }

    /// Follow the given camera instead of looking one up.
    pub fn with_camera(self, camera: Entity) -> Self {
        Self {
            camera: Some(camera),
            ..self
        }
    }

    /// Set the initial anchor.
    pub fn with_anchor(mut self, anchor: WindowAnchor) -> Self {
        self.set_anchor(anchor);
        self
    }

    /// Set the initial offset. The anchor is left as is.
    pub fn with_offset(self, offset: Vec3) -> Self {
        Self { offset, ..self }
    }

    /// Set the initial scale, clamped to [`MIN_SCALE`]..=[`MAX_SCALE`].
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.set_scale(scale);
        self
    }

    /// Set the initial follow speed. Negative values are made positive.
    pub fn with_follow_speed(mut self, follow_speed: f32) -> Self {
        self.set_follow_speed(follow_speed);
        self
    }

    /// Choose how the field of view is sampled, for example
    /// [`CaptureAwareFieldOfView`](super::fov::CaptureAwareFieldOfView) on platforms that report
    /// screen recording.
    pub fn with_field_of_view_source(self, source: impl FieldOfViewSource) -> Self {
        Self {
            fov_source: Box::new(source),
            ..self
        }
    }

    /// The cell of the anchor grid the window is parked in.
    pub fn anchor(&self) -> WindowAnchor {
        self.anchor
    }

    /// The current offset. See [`FollowWindow::set_horizontal_offset`].
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// The uniform scale applied to the window.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// How quickly the window catches up with its target, per second.
    pub fn follow_speed(&self) -> f32 {
        self.follow_speed
    }

    /// The tilt rotations applied at off-center anchors.
    pub fn tilt(&self) -> &TiltQuaternions {
        &self.tilt
    }

    /// The window entity, once it has been built.
    pub fn window(&self) -> Option<Entity> {
        self.window
    }

    /// The target translation and rotation computed on the last update, if the window has followed
    /// a camera yet.
    pub fn last_target(&self) -> Option<(Vec3, Quat)> {
        self.last_target
    }

    /// Park the window in the given cell, regardless of the current offset.
    pub fn set_anchor(&mut self, anchor: WindowAnchor) {
        self.anchor = anchor;
    }

    /// Set the horizontal offset from a slider value in `[0, 1]`, and snap the anchor to the
    /// matching column. The anchor row is kept.
    pub fn set_horizontal_offset(&mut self, value: f32) {
        if !value.is_finite() {
            warn_once!("Ignoring non-finite horizontal window offset {value}");
            return;
        }
        self.offset.x = value - 0.5;
        self.anchor = self.anchor.resolve_horizontal(self.offset.x);
    }

    /// Set the vertical offset from a slider value in `[0, 1]`, and snap the anchor to the matching
    /// row. The anchor column is kept.
    pub fn set_vertical_offset(&mut self, value: f32) {
        if !value.is_finite() {
            warn_once!("Ignoring non-finite vertical window offset {value}");
            return;
        }
        self.offset.y = value - 0.5;
        self.anchor = self.anchor.resolve_vertical(self.offset.y);
    }

    /// Set the distance added to the view distance. Does not affect the anchor.
    pub fn set_depth_offset(&mut self, value: f32) {
        if !value.is_finite() {
            warn_once!("Ignoring non-finite depth window offset {value}");
            return;
        }
        self.offset.z = value;
    }

    /// Set the window scale, clamped to [`MIN_SCALE`]..=[`MAX_SCALE`].
    pub fn set_scale(&mut self, scale: f32) {
        if scale.is_nan() {
            warn_once!("Ignoring NaN window scale");
            return;
        }
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Set the follow speed. Negative values are made positive.
    pub fn set_follow_speed(&mut self, follow_speed: f32) {
        if !follow_speed.is_finite() {
            warn_once!("Ignoring non-finite window follow speed {follow_speed}");
            return;
        }
        self.follow_speed = follow_speed.abs();
    }

    /// Move the window straight to its target on the next update, skipping the easing.
    pub fn snap(&mut self) {
        self.snap_requested = true;
    }

    /// The pose the window is easing toward.
    ///
    /// This samples the [`FieldOfViewSource`], so call it at most once per frame.
    pub fn target_pose(&mut self, camera: &CameraPose) -> (Vec3, Quat) {
        let fov_degrees = self.fov_source.sample(camera.fov_degrees);
        (
            target_position(camera, self.offset, fov_degrees),
            target_rotation(camera, self.anchor, &self.tilt),
        )
    }

    /// The fraction of the remaining distance to the target covered in a frame lasting
    /// `delta_time`.
    pub fn follow_factor(&self, delta_time: Duration) -> f32 {
        (delta_time.as_secs_f32() * self.follow_speed).clamp(0.0, 1.0)
    }

    /// Ease `transform` toward its target pose. Returns `true` if the window has not yet settled.
    pub fn follow(
        &mut self,
        transform: &mut Transform,
        camera: &CameraPose,
        delta_time: Duration,
    ) -> bool {
        let (target_translation, target_rotation) = self.target_pose(camera);
        if !target_translation.is_finite() || !target_rotation.is_finite() {
            error_once!("Window target pose is not finite, check the camera transform and projection");
            return false;
        }
        self.last_target = Some((target_translation, target_rotation));

        let factor = if std::mem::take(&mut self.snap_requested) {
            1.0
        } else {
            self.follow_factor(delta_time)
        };

        transform.translation = transform.translation.lerp(target_translation, factor);
        transform.rotation = transform.rotation.slerp(target_rotation, factor);
        transform.scale = Vec3::ONE * self.scale;

        const SETTLED_DISTANCE: f32 = 1e-4;
        const SETTLED_DOT: f32 = 1e-6;
        transform.translation.distance(target_translation) > SETTLED_DISTANCE
            || 1.0 - transform.rotation.dot(target_rotation).abs() > SETTLED_DOT
    }

    /// Find the pose of the camera this window follows, if there is one.
    ///
    /// The camera's world transform is composed from its local [`Transform`] and those of its
    /// ancestors, so movement made earlier in the frame is seen before transform propagation.
    fn camera_pose(
        &self,
        cameras: &Query<(Entity, &Camera, &Projection)>,
        transforms: &TransformHelper,
    ) -> Option<CameraPose> {
        let (entity, camera, projection) = match self.camera {
            Some(entity) => {
                let Ok(camera) = cameras.get(entity) else {
                    warn_once!("Followed camera {entity} does not exist or is not a camera");
                    return None;
                };
                camera
            }
            None => {
                let mut active = cameras.iter().filter(|(_, camera, projection)| {
                    camera.is_active && matches!(projection, Projection::Perspective(_))
                });
                let camera = active.next()?;
                if active.next().is_some() {
                    warn_once!("Several active cameras, set FollowWindow::camera to pick one");
                    return None;
                }
                camera
            }
        };
        if !camera.is_active {
            return None;
        }
        let transform = match transforms.compute_global_transform(entity) {
            Ok(transform) => transform,
            Err(err) => {
                warn_once!("Cannot compute the transform of camera {entity}: {err}");
                return None;
            }
        };
        let pose = CameraPose::from_camera(&transform, projection);
        if pose.is_none() {
            warn_once!("FollowWindow requires a camera with a perspective projection");
        }
        pose
    }

    /// Keep window entities in step with their [`FollowWindow`]s.
    ///
    /// Spawns a window for every controller that does not have one yet, including one whose
    /// component was just replaced, and despawns the windows of removed or replaced controllers.
    pub fn sync_windows(
        mut commands: Commands,
        mut removed: RemovedComponents<FollowWindow>,
        mut controllers: Query<(Entity, &mut FollowWindow), Changed<FollowWindow>>,
        windows: Query<(Entity, &FollowedWindow)>,
    ) {
        let mut stale: Vec<Entity> = removed.read().collect();
        stale.extend(
            controllers
                .iter()
                .filter(|(_, follow)| follow.window.is_none())
                .map(|(controller, _)| controller),
        );
        if stale.is_empty() {
            return;
        }

        for (window, followed) in &windows {
            if stale.contains(&followed.controller) {
                debug!("Tearing down window {window} of {}", followed.controller);
                commands.entity(window).despawn();
            }
        }

        for (controller, mut follow) in &mut controllers {
            if follow.window.is_some() {
                continue;
            }
            let window = commands
                .spawn((
                    Transform::from_scale(Vec3::ONE * follow.scale),
                    Visibility::default(),
                    FollowedWindow { controller },
                ))
                .id();
            debug!("Built window {window} for {controller}");
            follow.window = Some(window);
            // Appear at the target instead of flying in from the origin.
            follow.snap_requested = true;
        }
    }

    /// Ease all windows toward their targets. Called once per frame.
    pub fn update_windows(
        mut controllers: Query<&mut FollowWindow>,
        cameras: Query<(Entity, &Camera, &Projection)>,
        mut transforms: ParamSet<(
            TransformHelper,
            Query<&mut Transform, With<FollowedWindow>>,
        )>,
        mut redraw: EventWriter<RequestRedraw>,
        time: Res<Time>,
    ) {
        let dt = time.delta();
        for mut follow in &mut controllers {
            let Some(window) = follow.window else {
                continue;
            };
            let Some(pose) = follow.camera_pose(&cameras, &transforms.p0()) else {
                continue;
            };
            let mut windows = transforms.p1();
            let Ok(transform) = windows.get_mut(window) else {
                continue;
            };
            // Unwrap Mut<T> once, the transform is written every frame anyway.
            if follow.follow(transform.into_inner(), &pose, dt) {
                redraw.write(RequestRedraw);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{
        fov::{CaptureAwareFieldOfView, CaptureSignal, CaptureStateChanged},
        WindowFollowPlugin,
    };
    use bevy_app::prelude::*;
    use bevy_time::{TimePlugin, TimeUpdateStrategy};
    use bevy_transform::TransformPlugin;

    fn pose_facing(position: Vec3, direction: Vec3) -> CameraPose {
        CameraPose {
            position,
            rotation: Transform::default().looking_to(direction, Vec3::Y).rotation,
            fov_degrees: 60.0,
            near: 0.3,
        }
    }

    fn same_rotation(a: Quat, b: Quat) -> bool {
        (a.dot(b).abs() - 1.0).abs() < 1e-5
    }

    fn test_app(frame: Duration) -> App {
        let mut app = App::new();
        app.add_plugins((TimePlugin, WindowFollowPlugin))
            .insert_resource(TimeUpdateStrategy::ManualDuration(frame));
        app
    }

    fn spawn_camera(app: &mut App, transform: Transform) -> Entity {
        app.world_mut()
            .spawn((
                Camera::default(),
                Projection::Perspective(PerspectiveProjection {
                    fov: 60f32.to_radians(),
                    near: 0.3,
                    ..Default::default()
                }),
                transform,
            ))
            .id()
    }

    fn set_camera_fov(app: &mut App, camera: Entity, fov_degrees: f32) {
        let mut projection = app.world_mut().get_mut::<Projection>(camera).unwrap();
        if let Projection::Perspective(perspective) = &mut *projection {
            perspective.fov = fov_degrees.to_radians();
        }
    }

    fn window_transform(app: &App, controller: Entity) -> Transform {
        let world = app.world();
        let window = world
            .get::<FollowWindow>(controller)
            .and_then(FollowWindow::window)
            .unwrap();
        *world.get::<Transform>(window).unwrap()
    }

    #[test]
    fn defaults() {
        let follow = FollowWindow::default();
        assert_eq!(follow.anchor(), WindowAnchor::MiddleCenter);
        assert_eq!(follow.offset(), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(follow.scale(), 0.7);
        assert_eq!(follow.follow_speed(), 5.0);
        assert_eq!(follow.window(), None);
    }

    #[test]
    fn scale_is_clamped() {
        let mut follow = FollowWindow::default();
        follow.set_scale(15.0);
        assert_eq!(follow.scale(), MAX_SCALE);
        follow.set_scale(-3.0);
        assert_eq!(follow.scale(), MIN_SCALE);
        follow.set_scale(2.5);
        assert_eq!(follow.scale(), 2.5);
    }

    #[test]
    fn follow_speed_is_made_positive() {
        let mut follow = FollowWindow::default();
        follow.set_follow_speed(-7.0);
        assert_eq!(follow.follow_speed(), 7.0);
    }

    #[test]
    fn horizontal_sequence_walks_the_middle_row() {
        let mut follow = FollowWindow::default();
        let anchors: Vec<_> = [0.9, 0.1, 0.5]
            .into_iter()
            .map(|value| {
                follow.set_horizontal_offset(value);
                follow.anchor()
            })
            .collect();
        assert_eq!(
            anchors,
            [
                WindowAnchor::MiddleRight,
                WindowAnchor::MiddleLeft,
                WindowAnchor::MiddleCenter
            ]
        );
    }

    #[test]
    fn axes_keep_each_other() {
        let mut follow = FollowWindow::default();
        follow.set_vertical_offset(0.9);
        assert_eq!(follow.anchor(), WindowAnchor::TopCenter);
        follow.set_horizontal_offset(0.0);
        assert_eq!(follow.anchor(), WindowAnchor::TopLeft);
        follow.set_vertical_offset(0.5);
        assert_eq!(follow.anchor(), WindowAnchor::MiddleLeft);
        assert!((follow.offset().x + 0.5).abs() < 1e-6);
        assert!(follow.offset().y.abs() < 1e-6);
    }

    #[test]
    fn depth_offset_leaves_anchor_alone() {
        let mut follow = FollowWindow::default().with_anchor(WindowAnchor::BottomRight);
        follow.set_depth_offset(1.5);
        assert_eq!(follow.offset().z, 1.5);
        assert_eq!(follow.anchor(), WindowAnchor::BottomRight);
    }

    #[test]
    fn non_finite_inputs_are_ignored() {
        let mut follow = FollowWindow::default();
        follow.set_horizontal_offset(f32::NAN);
        follow.set_vertical_offset(f32::INFINITY);
        follow.set_depth_offset(f32::NEG_INFINITY);
        follow.set_scale(f32::NAN);
        follow.set_follow_speed(f32::NAN);
        let defaults = FollowWindow::default();
        assert_eq!(follow.offset(), defaults.offset());
        assert_eq!(follow.anchor(), defaults.anchor());
        assert_eq!(follow.scale(), defaults.scale());
        assert_eq!(follow.follow_speed(), defaults.follow_speed());
    }

    #[test]
    fn long_frame_snaps_to_target() {
        let mut follow = FollowWindow::default().with_offset(Vec3::ZERO);
        let pose = pose_facing(Vec3::ZERO, Vec3::Z);
        let mut transform = Transform::from_xyz(4.0, -2.0, 9.0);

        let moving = follow.follow(&mut transform, &pose, Duration::from_secs(1));

        assert!(!moving);
        assert!(transform
            .translation
            .abs_diff_eq(Vec3::new(0.0, 0.0, 0.5), 1e-5));
        assert!(same_rotation(transform.rotation, pose.rotation));
        assert_eq!(transform.scale, Vec3::splat(0.7));
    }

    #[test]
    fn short_frame_eases_toward_target() {
        let mut follow = FollowWindow::default()
            .with_offset(Vec3::ZERO)
            .with_follow_speed(5.0);
        let pose = pose_facing(Vec3::ZERO, Vec3::NEG_Z);
        let mut transform = Transform::from_xyz(0.0, 0.0, 0.5);

        let moving = follow.follow(&mut transform, &pose, Duration::from_millis(100));

        assert!(moving);
        assert!(transform
            .translation
            .abs_diff_eq(Vec3::new(0.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn snap_skips_easing_once() {
        let mut follow = FollowWindow::default().with_offset(Vec3::ZERO);
        let pose = pose_facing(Vec3::ZERO, Vec3::NEG_Z);
        let mut transform = Transform::from_xyz(3.0, 0.0, 0.0);

        follow.snap();
        follow.follow(&mut transform, &pose, Duration::ZERO);
        assert!(transform
            .translation
            .abs_diff_eq(Vec3::new(0.0, 0.0, -0.5), 1e-5));

        transform.translation = Vec3::X;
        follow.follow(&mut transform, &pose, Duration::ZERO);
        assert_eq!(transform.translation, Vec3::X);
    }

    #[test]
    fn capture_holds_view_distance() {
        let signal = CaptureSignal::default();
        let mut follow = FollowWindow::default()
            .with_offset(Vec3::ZERO)
            .with_field_of_view_source(CaptureAwareFieldOfView::new(signal.clone()));
        let mut pose = pose_facing(Vec3::ZERO, Vec3::NEG_Z);
        pose.fov_degrees = 10.0;
        pose.near = 0.1;

        let (position, _) = follow.target_pose(&pose);
        assert!((position.z + 1.6).abs() < 1e-5);

        signal.set_capturing(true);
        pose.fov_degrees = 20.0;
        let (position, _) = follow.target_pose(&pose);
        assert!((position.z + 1.6).abs() < 1e-5);

        signal.set_capturing(false);
        let (position, _) = follow.target_pose(&pose);
        assert!((position.z + 0.8).abs() < 1e-5);
    }

    #[test]
    fn plugin_builds_and_follows() {
        let mut app = test_app(Duration::from_millis(100));
        let camera_transform = Transform::default().looking_to(Vec3::Z, Vec3::Y);
        let camera = spawn_camera(&mut app, camera_transform);
        let controller = app
            .world_mut()
            .spawn(FollowWindow::new(camera).with_offset(Vec3::ZERO))
            .id();

        app.update();

        let window = window_transform(&app, controller);
        assert!(window.translation.abs_diff_eq(Vec3::new(0.0, 0.0, 0.5), 1e-5));
        assert!(same_rotation(window.rotation, camera_transform.rotation));
        assert_eq!(window.scale, Vec3::splat(0.7));

        let moved = camera_transform.with_translation(Vec3::new(2.0, 0.0, 0.0));
        app.world_mut().entity_mut(camera).insert(moved);
        app.update();

        let window = window_transform(&app, controller);
        assert!(
            window.translation.abs_diff_eq(Vec3::new(1.0, 0.0, 0.5), 1e-4),
            "{}",
            window.translation
        );
    }

    #[test]
    fn plugin_finds_the_only_camera() {
        let mut app = test_app(Duration::from_millis(100));
        spawn_camera(&mut app, Transform::default());
        let controller = app
            .world_mut()
            .spawn(FollowWindow::default().with_offset(Vec3::ZERO))
            .id();

        app.update();

        let window = window_transform(&app, controller);
        assert!(window.translation.abs_diff_eq(Vec3::new(0.0, 0.0, -0.5), 1e-5));
    }

    #[test]
    fn missing_camera_leaves_window_alone() {
        let mut app = test_app(Duration::from_millis(100));
        let controller = app.world_mut().spawn(FollowWindow::default()).id();

        app.update();

        let window = window_transform(&app, controller);
        assert_eq!(window.translation, Vec3::ZERO);
    }

    #[test]
    fn removing_controller_despawns_window() {
        let mut app = test_app(Duration::from_millis(100));
        let controller = app.world_mut().spawn(FollowWindow::default()).id();
        app.update();
        let window = app
            .world()
            .get::<FollowWindow>(controller)
            .and_then(FollowWindow::window)
            .unwrap();
        assert!(app.world().entities().contains(window));

        app.world_mut().despawn(controller);
        app.update();

        assert!(!app.world().entities().contains(window));
    }

    #[test]
    fn camera_moved_this_frame_is_followed_this_frame() {
        let mut app = test_app(Duration::from_secs(1));
        app.add_plugins(TransformPlugin);
        let camera = spawn_camera(&mut app, Transform::default());
        let controller = app
            .world_mut()
            .spawn(FollowWindow::new(camera).with_offset(Vec3::ZERO))
            .id();
        app.update();
        assert!(window_transform(&app, controller)
            .translation
            .abs_diff_eq(Vec3::new(0.0, 0.0, -0.5), 1e-5));

        app.world_mut()
            .get_mut::<Transform>(camera)
            .unwrap()
            .translation
            .x = 2.0;
        app.update();

        let window = window_transform(&app, controller);
        assert!(
            window.translation.abs_diff_eq(Vec3::new(2.0, 0.0, -0.5), 1e-5),
            "{}",
            window.translation
        );
    }

    #[test]
    fn camera_rig_moved_this_frame_is_followed_this_frame() {
        let mut app = test_app(Duration::from_secs(1));
        app.add_plugins(TransformPlugin);
        let rig = app.world_mut().spawn(Transform::default()).id();
        let camera = spawn_camera(&mut app, Transform::from_xyz(0.0, 1.5, 0.0));
        app.world_mut().entity_mut(camera).insert(ChildOf(rig));
        let controller = app
            .world_mut()
            .spawn(FollowWindow::new(camera).with_offset(Vec3::ZERO))
            .id();
        app.update();

        app.world_mut().get_mut::<Transform>(rig).unwrap().translation = Vec3::new(0.0, 0.0, 3.0);
        app.update();

        let window = window_transform(&app, controller);
        assert!(
            window.translation.abs_diff_eq(Vec3::new(0.0, 1.5, 2.5), 1e-5),
            "{}",
            window.translation
        );
    }

    #[test]
    fn replacing_controller_rebuilds_window() {
        let mut app = test_app(Duration::from_millis(100));
        let camera = spawn_camera(&mut app, Transform::default());
        let controller = app.world_mut().spawn(FollowWindow::new(camera)).id();
        app.update();
        let old_window = app
            .world()
            .get::<FollowWindow>(controller)
            .and_then(FollowWindow::window)
            .unwrap();

        app.world_mut()
            .entity_mut(controller)
            .insert(FollowWindow::new(camera).with_scale(2.0));
        app.update();

        let new_window = app
            .world()
            .get::<FollowWindow>(controller)
            .and_then(FollowWindow::window)
            .unwrap();
        assert_ne!(new_window, old_window);
        assert!(!app.world().entities().contains(old_window));
        assert_eq!(window_transform(&app, controller).scale, Vec3::splat(2.0));

        app.update();
        assert_eq!(
            app.world()
                .get::<FollowWindow>(controller)
                .and_then(FollowWindow::window),
            Some(new_window)
        );
        let windows = app
            .world_mut()
            .query::<&FollowedWindow>()
            .iter(app.world())
            .count();
        assert_eq!(windows, 1);
    }

    #[test]
    fn capture_event_holds_window_distance() {
        let mut app = test_app(Duration::from_secs(1));
        let camera = spawn_camera(&mut app, Transform::default());
        set_camera_fov(&mut app, camera, 10.0);
        let signal = app.world().resource::<CaptureSignal>().clone();
        let controller = app
            .world_mut()
            .spawn(
                FollowWindow::new(camera)
                    .with_offset(Vec3::ZERO)
                    .with_field_of_view_source(CaptureAwareFieldOfView::new(signal)),
            )
            .id();
        app.update();
        let z = window_transform(&app, controller).translation.z;
        assert!((z + 1.6).abs() < 1e-4, "{z}");

        app.world_mut()
            .send_event(CaptureStateChanged { capturing: true });
        set_camera_fov(&mut app, camera, 20.0);
        app.update();
        let z = window_transform(&app, controller).translation.z;
        assert!((z + 1.6).abs() < 1e-4, "{z}");

        app.world_mut()
            .send_event(CaptureStateChanged { capturing: false });
        app.update();
        let z = window_transform(&app, controller).translation.z;
        assert!((z + 0.8).abs() < 1e-4, "{z}");
    }
}
