//! Euler rotations in degrees and the per-axis rotation limiter.
//!
//! # Conventions
//! - Y is up.
//! - `yaw` is the heading in the XZ plane, measured from +X toward +Z.
//! - `pitch` is the elevation of the forward axis toward +Y.
//! - `roll` spins around the forward axis.
//!
//! All angles are degrees. [`Rotator::quat`] and [`Rotator::from_quat`] convert to and from
//! nalgebra unit quaternions so rotations can be composed and applied to vectors.

use std::ops::{Add, Sub};

use crate::{Quat, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    pub const ZERO: Rotator = Rotator {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    #[inline]
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    #[inline]
    pub const fn from_yaw(yaw: f32) -> Self {
        Self::new(0.0, yaw, 0.0)
    }

    /// Rotation that points the forward axis (+X) along `direction`, with zero roll.
    ///
    /// Returns `None` if the direction is too short to define a heading.
    pub fn from_direction(direction: Vec3) -> Option<Self> {
        let planar = (direction.x * direction.x + direction.z * direction.z).sqrt();
        if planar <= f32::EPSILON && direction.y.abs() <= f32::EPSILON {
            return None;
        }
        // A vertical direction has no heading of its own; keep yaw at zero.
        let yaw = if planar > f32::EPSILON {
            direction.z.atan2(direction.x).to_degrees()
        } else {
            0.0
        };
        let pitch = direction.y.atan2(planar).to_degrees();
        Some(Self::new(pitch, yaw, 0.0))
    }

    /// Convert to a unit quaternion (yaw, then pitch, then roll in local space).
    pub fn quat(&self) -> Quat {
        let yaw = Quat::from_axis_angle(&Vec3::y_axis(), -self.yaw.to_radians());
        let pitch = Quat::from_axis_angle(&Vec3::z_axis(), self.pitch.to_radians());
        let roll = Quat::from_axis_angle(&Vec3::x_axis(), self.roll.to_radians());
        yaw * pitch * roll
    }

    /// Inverse of [`Rotator::quat`], up to the usual Euler ambiguities near +-90 pitch.
    pub fn from_quat(q: &Quat) -> Self {
        let forward = q * Vec3::x();
        let planar = (forward.x * forward.x + forward.z * forward.z).sqrt();
        let yaw = forward.z.atan2(forward.x).to_degrees();
        let pitch = forward.y.atan2(planar).to_degrees();

        // Whatever is left after removing yaw and pitch is a spin around local +X.
        let unrolled = Rotator::new(pitch, yaw, 0.0).quat();
        let local_up = (unrolled.inverse() * q) * Vec3::y();
        let roll = local_up.z.atan2(local_up.y).to_degrees();

        Self::new(pitch, yaw, roll)
    }

    /// Rotate a vector from local into world space.
    #[inline]
    pub fn rotate_vector(&self, v: Vec3) -> Vec3 {
        self.quat() * v
    }

    /// Unit forward (+X) direction in world space.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotate_vector(Vec3::x())
    }

    /// Every axis wrapped into (-180, 180].
    pub fn normalized(&self) -> Self {
        Self::new(
            normalize_axis(self.pitch),
            normalize_axis(self.yaw),
            normalize_axis(self.roll),
        )
    }

    /// Axis-wise comparison of the normalized difference against `tolerance` degrees.
    pub fn equals(&self, other: &Rotator, tolerance: f32) -> bool {
        let d = (*self - *other).normalized();
        d.pitch.abs() <= tolerance && d.yaw.abs() <= tolerance && d.roll.abs() <= tolerance
    }
}

impl Add for Rotator {
    type Output = Rotator;

    fn add(self, rhs: Rotator) -> Rotator {
        Rotator::new(
            self.pitch + rhs.pitch,
            self.yaw + rhs.yaw,
            self.roll + rhs.roll,
        )
    }
}

impl Sub for Rotator {
    type Output = Rotator;

    fn sub(self, rhs: Rotator) -> Rotator {
        Rotator::new(
            self.pitch - rhs.pitch,
            self.yaw - rhs.yaw,
            self.roll - rhs.roll,
        )
    }
}

/// Wrap an angle in degrees into (-180, 180].
#[inline]
pub fn normalize_axis(angle: f32) -> f32 {
    let mut a = angle % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a <= -180.0 {
        a += 360.0;
    }
    a
}

/// Rotate `old` toward `desired`, moving each axis by at most `max_speed * dt` degrees.
///
/// Each axis takes the shortest way around, so a yaw of 170 heading for -170 turns through
/// 180 rather than back through 0. A clamped step never passes the target: when the
/// remaining delta is smaller than the allowed step the axis lands exactly on it.
pub fn limit_rotation(old: Rotator, desired: Rotator, dt: f32, max_speed: f32) -> Rotator {
    let max_step = (max_speed * dt).max(0.0);
    let delta = (desired - old).normalized();
    let step = |d: f32| d.clamp(-max_step, max_step);

    let base = old.normalized();
    Rotator::new(
        base.pitch + step(delta.pitch),
        base.yaw + step(delta.yaw),
        base.roll + step(delta.roll),
    )
}
