use astrum_core::constants::{FLOAT_AMPLITUDE, FLOAT_SPEED, FLOAT_TILT, ORBIT_SPEED_FACTOR};
use bevy::prelude::*;

/// Angular rate of revolution about the origin. Strictly decreasing in
/// distance and positive for any finite distance.
pub fn orbit_rate(distance: f32) -> f32 {
    ORBIT_SPEED_FACTOR / (distance + 1.0)
}

/// Revolution of one body about the origin, as a function of elapsed time.
/// `angle = base + rate * (now - anchor)` while running; frozen at `base`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitMotion {
    rate: f32,
    base: f32,
    anchor: f32,
    frozen: bool,
}

impl OrbitMotion {
    pub fn new(distance: f32) -> Self {
        Self {
            rate: orbit_rate(distance),
            base: 0.0,
            anchor: 0.0,
            frozen: false,
        }
    }

    /// Start counting from `now` instead of time zero
    pub fn starting_at(mut self, now: f32) -> Self {
        self.anchor = now;
        self
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn angle_at(&self, now: f32) -> f32 {
        if self.frozen {
            self.base
        } else {
            self.base + self.rate * (now - self.anchor)
        }
    }

    /// Hold the current angle
    pub fn freeze(&mut self, now: f32) {
        if !self.frozen {
            self.base = self.angle_at(now);
            self.frozen = true;
        }
    }

    /// Continue from the held angle
    pub fn resume(&mut self, now: f32) {
        if self.frozen {
            self.anchor = now;
            self.frozen = false;
        }
    }

    pub fn set_frozen(&mut self, frozen: bool, now: f32) {
        if frozen {
            self.freeze(now);
        } else {
            self.resume(now);
        }
    }
}

/// Spin about a local axis. Never paused, so it depends on time alone.
pub fn spin_angle(rate: f32, now: f32) -> f32 {
    rate * now
}

/// Bobbing of a body: vertical offset and a small tilt, phase-shifted per body
pub fn float_offset(now: f32, phase: f32) -> (f32, f32) {
    let t = now * FLOAT_SPEED + phase;
    (t.sin() * FLOAT_AMPLITUDE, (t * 0.5).cos() * FLOAT_TILT)
}
