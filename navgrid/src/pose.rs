use crate::{Rotator, Vec3};

/// Position, orientation and scale of a grid mover.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Rotator,
    /// Carried through every movement tick untouched.
    pub scale: Vec3,
}

impl Pose {
    pub fn new(position: Vec3, rotation: Rotator) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn at(position: Vec3) -> Self {
        Self::new(position, Rotator::ZERO)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::at(Vec3::zeros())
    }
}
