/*!
Collision types and math aliases shared by the collision submodules.

This module contains no algorithms. It defines the data exchanged between:
- broad (static obstacle AABBs and candidate queries)
- narrow_phase (parry3d time-of-impact queries)
- the footprint sweep used to answer tile obstruction queries
*/

use nalgebra as na;

pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;
pub type Iso = na::Isometry3<f32>;

/// World pose of an obstacle.
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Transform {
    #[inline]
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Quat::identity())
    }

    #[inline]
    pub fn iso(&self) -> Iso {
        Iso::from_parts(na::Translation3::from(self.translation), self.rotation)
    }
}

/// Static obstacles that can block a footprint sweep.
///
/// Floors are not modelled here: tiles already describe where the ground is, and a swept
/// footprint resting on an infinite floor would report contact on every query.
#[derive(Clone, Copy, Debug)]
pub enum StaticShape {
    /// Box of `half_extents` (local axes) posed by `transform`: walls, crates, pillars.
    Cuboid {
        half_extents: Vec3,
        transform: Transform,
    },
    /// Only the translation of `transform` matters.
    Sphere { radius: f32, transform: Transform },
    /// Upright when `transform` has no rotation; `half_height` excludes the caps.
    Capsule {
        radius: f32,
        half_height: f32,
        transform: Transform,
    },
}

/// Capsule footprint of a grid mover.
///
/// half_height is the half-length of the cylinder section (aligned with +Y),
/// so the total capsule height is 2*half_height + 2*radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapsuleSpec {
    pub radius: f32,
    pub half_height: f32,
}

impl CapsuleSpec {
    #[inline]
    pub const fn new(radius: f32, half_height: f32) -> Self {
        Self {
            radius,
            half_height,
        }
    }

    /// Distance from the feet to the capsule center.
    #[inline]
    pub fn center_height(&self) -> f32 {
        self.half_height + self.radius
    }
}

/// Earliest contact of a sweep.
#[derive(Clone, Copy, Debug)]
pub struct MoveHit {
    /// World-space contact normal on the moving shape.
    pub normal: Vec3,
    /// Fraction (0..1) of the tested translation where the hit occurred.
    pub fraction: f32,
}
