use astrum_core::constants::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, ORBIT_DAMPING, ORBIT_MAX_DISTANCE,
    ORBIT_MIN_DISTANCE,
};
use astrum_sim::Session;
use astrum_sim::flight::{CameraFlight, CameraPose};
use astrum_sim::motion::OrbitMotion;
use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::picking::mesh_picking::RayCastPickable;
use bevy::prelude::*;

use super::bodies::CelestialBody;

/// Velocities below this are treated as settled
const SETTLED: f32 = 1e-5;
/// Keeps the orbit off the poles
const PITCH_LIMIT: f32 = 1.55;
/// Pixel scroll (trackpads) per wheel notch
const PIXELS_PER_LINE: f32 = 100.0;
/// Largest fraction of the distance one frame may zoom by
const MAX_ZOOM_STEP: f32 = 0.5;

/// Orbit-style camera: drag to rotate around `target`, scroll to zoom.
/// Input feeds velocities that decay each frame, so motion glides to a stop.
#[derive(Component, Debug, Clone)]
pub struct OrbitRig {
    pub target: Vec3,
    pub sensitivity: f32,
    pub zoom_speed: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
    zoom_velocity: f32,
    /// Scripted move toward a pose; replaced whole on each focus change
    pub flight: Option<CameraFlight>,
}

impl OrbitRig {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            sensitivity: 0.005,
            zoom_speed: 0.08,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            zoom_velocity: 0.0,
            flight: None,
        }
    }

    fn is_settled(&self) -> bool {
        self.yaw_velocity.abs() < SETTLED
            && self.pitch_velocity.abs() < SETTLED
            && self.zoom_velocity.abs() < SETTLED
    }
}

/// Where the camera is and what it looks at right now
pub fn shown_pose(transform: &Transform, rig: &OrbitRig) -> CameraPose {
    CameraPose {
        eye: transform.translation,
        target: rig.target,
    }
}

/// Spawn the perspective camera at the overview pose
pub fn spawn_camera(mut commands: Commands) {
    let pose = CameraPose::overview();

    info!(
        "Camera spawned at ({:.0}, {:.0}, {:.0})",
        pose.eye.x, pose.eye.y, pose.eye.z
    );

    commands.spawn((
        Camera3d::default(),
        IsDefaultUiCamera,
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_translation(pose.eye).looking_at(pose.target, Vec3::Y),
        OrbitRig::new(pose.target),
        RayCastPickable,
    ));
}

/// Left-drag orbits, scroll zooms. Drag is ignored while a generation
/// overlay is up.
pub fn orbit_controls_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    session: Res<Session>,
    mut query: Query<(&mut Transform, &mut OrbitRig)>,
) {
    let Ok((mut transform, mut rig)) = query.get_single_mut() else {
        return;
    };

    if mouse_button.pressed(MouseButton::Left) && !session.is_generating() {
        let delta = mouse_motion.delta;
        rig.yaw_velocity -= delta.x * rig.sensitivity;
        rig.pitch_velocity += delta.y * rig.sensitivity;
    }

    let scroll = scroll_lines(mouse_scroll.unit, mouse_scroll.delta.y);
    if scroll != 0.0 {
        rig.zoom_velocity -= scroll * rig.zoom_speed;
    }

    if rig.is_settled() {
        return;
    }
    apply_orbit_step(&mut transform, &mut rig);
}

/// Scroll amount in wheel notches, whatever device produced it
fn scroll_lines(unit: MouseScrollUnit, delta: f32) -> f32 {
    match unit {
        MouseScrollUnit::Line => delta,
        MouseScrollUnit::Pixel => delta / PIXELS_PER_LINE,
    }
}

/// Move the camera one damped step around its target. Each frame applies
/// `ORBIT_DAMPING` of the remaining velocity, so one input adds up to
/// exactly its own size once the motion settles.
fn apply_orbit_step(transform: &mut Transform, rig: &mut OrbitRig) {
    let offset = transform.translation - rig.target;
    let radius = offset.length().max(ORBIT_MIN_DISTANCE);
    let yaw = offset.x.atan2(offset.z) + rig.yaw_velocity * ORBIT_DAMPING;
    let pitch = ((offset.y / radius).clamp(-1.0, 1.0).asin()
        + rig.pitch_velocity * ORBIT_DAMPING)
        .clamp(-PITCH_LIMIT, PITCH_LIMIT);
    let zoom = (rig.zoom_velocity * ORBIT_DAMPING).clamp(-MAX_ZOOM_STEP, MAX_ZOOM_STEP);
    let radius = (radius * (1.0 + zoom)).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);

    transform.translation = rig.target
        + Vec3::new(
            radius * pitch.cos() * yaw.sin(),
            radius * pitch.sin(),
            radius * pitch.cos() * yaw.cos(),
        );
    transform.look_at(rig.target, Vec3::Y);

    let keep = 1.0 - ORBIT_DAMPING;
    rig.yaw_velocity *= keep;
    rig.pitch_velocity *= keep;
    rig.zoom_velocity *= keep;
}

/// Start a flight whenever focus changes, from wherever the camera is
/// shown at that instant
pub fn focus_camera_system(
    time: Res<Time>,
    session: Res<Session>,
    mut last_focus: Local<Option<&'static str>>,
    bodies: Query<(&CelestialBody, &OrbitMotion)>,
    mut cameras: Query<(&Transform, &mut OrbitRig)>,
) {
    let focus = session.focus_id();
    if *last_focus == focus {
        return;
    }
    *last_focus = focus;

    let Ok((transform, mut rig)) = cameras.get_single_mut() else {
        return;
    };
    let now = time.elapsed_secs();
    let current = shown_pose(transform, &rig);

    let flight = match session.focus() {
        Some(planet) => {
            let angle = bodies
                .iter()
                .find(|(body, _)| body.record.id == planet.id)
                .map(|(_, motion)| motion.angle_at(now))
                .unwrap_or(0.0);
            info!("Camera: flying to {}", planet.name);
            CameraFlight::toward_focus(current, planet, angle, now)
        }
        None => {
            info!("Camera: returning to overview");
            CameraFlight::toward_overview(current, now)
        }
    };
    rig.flight = Some(flight);
}

/// Drive the active flight, re-aiming at the target every frame
pub fn flight_system(time: Res<Time>, mut cameras: Query<(&mut Transform, &mut OrbitRig)>) {
    let now = time.elapsed_secs();
    for (mut transform, mut rig) in &mut cameras {
        let Some(flight) = rig.flight else {
            continue;
        };
        let pose = flight.sample(now);
        transform.translation = pose.eye;
        rig.target = pose.target;
        transform.look_at(pose.target, Vec3::Y);

        if flight.is_finished(now) {
            rig.flight = None;
        }
    }
}
