use astrum_core::PlanetRecord;
use astrum_core::constants::{
    FOCUS_EYE_HEIGHT, FOCUS_EYE_SIDE, FOCUS_EYE_STANDOFF, FOCUS_FLIGHT_SECS, OVERVIEW_EYE,
    OVERVIEW_FLIGHT_SECS, OVERVIEW_TARGET,
};
use bevy::prelude::*;

/// Cubic ease-in-out: slow start, fast middle, slow end
pub fn ease_power3_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Camera position plus the point it looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    /// High distant vantage looking at the sun
    pub fn overview() -> Self {
        Self {
            eye: Vec3::from_array(OVERVIEW_EYE),
            target: Vec3::from_array(OVERVIEW_TARGET),
        }
    }

    /// Pose framing a planet whose orbit frame is rotated by `orbit_angle` about Y
    pub fn focused_on(planet: &PlanetRecord, orbit_angle: f32) -> Self {
        let frame = Quat::from_rotation_y(orbit_angle);
        let eye = Vec3::new(
            planet.distance + planet.radius + FOCUS_EYE_STANDOFF,
            FOCUS_EYE_HEIGHT,
            FOCUS_EYE_SIDE,
        );
        let target = Vec3::new(planet.distance, 0.0, 0.0);
        Self {
            eye: frame * eye,
            target: frame * target,
        }
    }

    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            eye: self.eye.lerp(other.eye, t),
            target: self.target.lerp(other.target, t),
        }
    }
}

/// Timed, eased move between two poses. A new flight replaces the old one
/// whole, so a frame never sees a mix of two flights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFlight {
    from: CameraPose,
    to: CameraPose,
    started: f32,
    duration: f32,
}

impl CameraFlight {
    pub fn new(from: CameraPose, to: CameraPose, now: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            started: now,
            duration,
        }
    }

    pub fn toward_focus(current: CameraPose, planet: &PlanetRecord, orbit_angle: f32, now: f32) -> Self {
        Self::new(
            current,
            CameraPose::focused_on(planet, orbit_angle),
            now,
            FOCUS_FLIGHT_SECS,
        )
    }

    pub fn toward_overview(current: CameraPose, now: f32) -> Self {
        Self::new(current, CameraPose::overview(), now, OVERVIEW_FLIGHT_SECS)
    }

    pub fn destination(&self) -> CameraPose {
        self.to
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Linear progress in 0..=1
    pub fn progress(&self, now: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.started) / self.duration).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now: f32) -> CameraPose {
        self.from.lerp(&self.to, ease_power3_in_out(self.progress(now)))
    }

    pub fn is_finished(&self, now: f32) -> bool {
        self.progress(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astrum_core::catalog::find;

    fn close(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1e-4
    }

    #[test]
    fn easing_endpoints_and_symmetry() {
        assert_eq!(ease_power3_in_out(0.0), 0.0);
        assert_eq!(ease_power3_in_out(1.0), 1.0);
        assert!((ease_power3_in_out(0.5) - 0.5).abs() < 1e-6);
        for i in 1..10 {
            let t = i as f32 / 10.0;
            let a = ease_power3_in_out(t);
            let b = ease_power3_in_out(1.0 - t);
            assert!((a + b - 1.0).abs() < 1e-5);
            assert!(ease_power3_in_out(t) > ease_power3_in_out(t - 0.05));
        }
        assert_eq!(ease_power3_in_out(-1.0), 0.0);
        assert_eq!(ease_power3_in_out(2.0), 1.0);
    }

    #[test]
    fn focus_pose_at_zero_angle() {
        let earth = find("earth").unwrap();
        let pose = CameraPose::focused_on(earth, 0.0);
        assert!(close(pose.target, Vec3::new(earth.distance, 0.0, 0.0)));
        assert!(close(
            pose.eye,
            Vec3::new(earth.distance + earth.radius + 8.0, 3.0, 6.0)
        ));
    }

    #[test]
    fn focus_pose_follows_orbit_frame() {
        let mars = find("mars").unwrap();
        let angle = std::f32::consts::FRAC_PI_2;
        let pose = CameraPose::focused_on(mars, angle);
        // +X rotated a quarter turn about Y lands on -Z
        assert!(close(pose.target, Vec3::new(0.0, 0.0, -mars.distance)));
        assert!((pose.eye.y - 3.0).abs() < 1e-5);
        let flat = CameraPose::focused_on(mars, 0.0);
        assert!((pose.eye.distance(pose.target) - flat.eye.distance(flat.target)).abs() < 1e-4);
    }

    #[test]
    fn flight_interpolates_and_finishes() {
        let start = CameraPose {
            eye: Vec3::new(0.0, 10.0, 0.0),
            target: Vec3::ZERO,
        };
        let flight = CameraFlight::toward_overview(start, 1.0);
        assert_eq!(flight.duration(), 2.0);
        assert_eq!(flight.sample(1.0), start);
        assert!(!flight.is_finished(2.0));

        let mid = flight.sample(2.0);
        assert!(close(mid.eye, start.eye.lerp(CameraPose::overview().eye, 0.5)));

        assert!(flight.is_finished(3.0));
        assert_eq!(flight.sample(10.0), CameraPose::overview());
    }

    #[test]
    fn superseding_flight_starts_from_shown_pose() {
        let earth = find("earth").unwrap();
        let first = CameraFlight::toward_focus(CameraPose::overview(), earth, 0.0, 0.0);
        let shown = first.sample(1.0);

        let second = CameraFlight::toward_overview(shown, 1.0);
        assert_eq!(second.sample(1.0), shown);
        assert_eq!(second.destination(), CameraPose::overview());
    }

    #[test]
    fn zero_duration_jumps() {
        let a = CameraPose::overview();
        let b = CameraPose {
            eye: Vec3::ONE,
            target: Vec3::X,
        };
        let flight = CameraFlight::new(a, b, 0.0, 0.0);
        assert!(flight.is_finished(0.0));
        assert_eq!(flight.sample(0.0), b);
    }
}
