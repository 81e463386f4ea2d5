//! A panel that follows a swaying camera, standing in for head motion.
//!
//! Arrow keys move the sliders that drive the window offset, `PageUp`/`PageDown` change its scale,
//! `Space` snaps it into place, and `C` toggles a simulated screen recording.

use bevy::prelude::*;
use bevy_follow_window::{extensions::target_indicator::TargetIndicator, prelude::*};

fn main() {
    App::new()
        .add_plugins((DefaultPlugins, DefaultWindowFollowPlugins))
        .init_resource::<Sliders>()
        .add_systems(Startup, setup)
        .add_systems(Update, (sway_camera, drive_sliders, toggle_capture, fill_window))
        .run();
}

const PANEL_SIZE: Vec2 = Vec2::new(0.4, 0.225);

/// Slider positions, in `[0, 1]`.
#[derive(Resource)]
struct Sliders {
    horizontal: f32,
    vertical: f32,
    scale: f32,
}

impl Default for Sliders {
    fn default() -> Self {
        Self {
            horizontal: 0.5,
            vertical: 0.5,
            scale: 0.7,
        }
    }
}

#[derive(Component)]
struct Head;

fn setup(
    mut commands: Commands,
    signal: Res<CaptureSignal>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let camera = commands
        .spawn((Camera3d::default(), Transform::from_xyz(0.0, 1.6, 0.0), Head))
        .id();
    commands.spawn((
        FollowWindow::new(camera)
            .with_offset(Vec3::ZERO)
            .with_field_of_view_source(CaptureAwareFieldOfView::new(signal.clone())),
        TargetIndicator {
            size: PANEL_SIZE,
            ..default()
        },
    ));

    commands.spawn((
        DirectionalLight::default(),
        Transform::from_xyz(2.0, 4.0, 1.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    let cube = meshes.add(Cuboid::new(0.5, 0.5, 0.5));
    let material = materials.add(Color::srgb(0.3, 0.5, 0.8));
    for i in 0..8 {
        let angle = i as f32 / 8.0 * std::f32::consts::TAU;
        commands.spawn((
            Mesh3d(cube.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_xyz(angle.sin() * 4.0, 1.0, angle.cos() * 4.0),
        ));
    }
}

fn sway_camera(time: Res<Time>, mut heads: Query<&mut Transform, With<Head>>) {
    let t = time.elapsed_secs();
    for mut transform in &mut heads {
        transform.rotation =
            Quat::from_rotation_y((t * 0.4).sin() * 0.8) * Quat::from_rotation_x((t * 0.7).sin() * 0.2);
    }
}

fn drive_sliders(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut sliders: ResMut<Sliders>,
    controllers: Query<Entity, With<FollowWindow>>,
    mut inputs: EventWriter<WindowInput>,
) {
    let step = time.delta_secs() * 0.5;
    let axis = |negative, positive| {
        keys.pressed(positive) as i32 as f32 - keys.pressed(negative) as i32 as f32
    };
    let horizontal = axis(KeyCode::ArrowLeft, KeyCode::ArrowRight);
    let vertical = axis(KeyCode::ArrowDown, KeyCode::ArrowUp);
    let scale = axis(KeyCode::PageDown, KeyCode::PageUp);

    for controller in &controllers {
        if horizontal != 0.0 {
            sliders.horizontal = (sliders.horizontal + horizontal * step).clamp(0.0, 1.0);
            inputs.write(WindowInput::horizontal(controller, sliders.horizontal));
        }
        if vertical != 0.0 {
            sliders.vertical = (sliders.vertical + vertical * step).clamp(0.0, 1.0);
            inputs.write(WindowInput::vertical(controller, sliders.vertical));
        }
        if scale != 0.0 {
            sliders.scale += scale * step;
            inputs.write(WindowInput::scale(controller, sliders.scale));
        }
        if keys.just_pressed(KeyCode::Space) {
            inputs.write(WindowInput::snap(controller));
        }
    }
}

fn toggle_capture(
    keys: Res<ButtonInput<KeyCode>>,
    signal: Res<CaptureSignal>,
    mut events: EventWriter<CaptureStateChanged>,
) {
    if keys.just_pressed(KeyCode::KeyC) {
        let capturing = !signal.is_capturing();
        info!("Simulated capture: {capturing}");
        events.write(CaptureStateChanged { capturing });
    }
}

fn fill_window(
    mut commands: Commands,
    windows: Query<Entity, Added<FollowedWindow>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for window in &windows {
        commands.entity(window).with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(Rectangle::from_size(PANEL_SIZE))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgba(0.1, 0.1, 0.12, 0.85),
                    alpha_mode: AlphaMode::Blend,
                    unlit: true,
                    ..default()
                })),
            ));
        });
    }
}
