// Scene constants (render units, seconds, radians)

/// Self-spin of every body about its local vertical axis (rad/s)
pub const SPIN_RATE: f32 = 0.05;
/// Cloud shell spin, slightly faster than the surface
pub const CLOUD_SPIN_RATE: f32 = 0.07;
/// Ring system spin about its own normal
pub const RING_SPIN_RATE: f32 = 0.02;
/// Orbital rate numerator: `rate = ORBIT_SPEED_FACTOR / (distance + 1)`
pub const ORBIT_SPEED_FACTOR: f32 = 0.2;

/// Gentle bobbing of each body
pub const FLOAT_SPEED: f32 = 0.8;
pub const FLOAT_AMPLITUDE: f32 = 0.1;
pub const FLOAT_TILT: f32 = 0.05;

/// Sub-geometry scales relative to the body radius
pub const CLOUD_SCALE: f32 = 1.02;
pub const ATMOSPHERE_SCALE: f32 = 1.05;
pub const RING_INNER_SCALE: f32 = 1.5;
pub const RING_OUTER_SCALE: f32 = 2.8;
/// Ring plane tilt from the orbital plane
pub const RING_TILT: f32 = std::f32::consts::PI / 2.5;
/// Half width of the orbit path ring
pub const ORBIT_PATH_HALF_WIDTH: f32 = 0.1;

/// Label height above the body surface
pub const LABEL_CLEARANCE: f32 = 1.5;

/// Overview camera pose
pub const OVERVIEW_EYE: [f32; 3] = [0.0, 80.0, 120.0];
pub const OVERVIEW_TARGET: [f32; 3] = [0.0, 0.0, 0.0];
pub const OVERVIEW_FLIGHT_SECS: f32 = 2.0;

/// Focus camera offset from the planet slot: `(distance + radius + STANDOFF, HEIGHT, SIDE)`
pub const FOCUS_EYE_STANDOFF: f32 = 8.0;
pub const FOCUS_EYE_HEIGHT: f32 = 3.0;
pub const FOCUS_EYE_SIDE: f32 = 6.0;
pub const FOCUS_FLIGHT_SECS: f32 = 2.5;

/// Perspective camera
pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 2000.0;

/// Orbit controls
pub const ORBIT_MIN_DISTANCE: f32 = 2.0;
pub const ORBIT_MAX_DISTANCE: f32 = 1000.0;
pub const ORBIT_DAMPING: f32 = 0.05;

/// Star field shell
pub const STAR_SHELL_RADIUS: f32 = 500.0;
pub const STAR_SHELL_DEPTH: f32 = 100.0;
