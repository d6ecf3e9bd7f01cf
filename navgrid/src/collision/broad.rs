use nalgebra as na;
use rapier3d::parry::{
    bounding_volume::{Aabb, BoundingVolume},
    shape as pshape,
};

use crate::collision::{StaticShape, Transform};

/// Broad-phase data for immutable static obstacles.
///
/// Obstacle counts on a tactical map are small, so AABBs are scanned linearly to generate
/// candidates. `aabbs[i]` bounds `statics[i]` of the slice this was built from.
#[derive(Clone, Debug, Default)]
pub struct WorldAccel {
    pub aabbs: Vec<Aabb>,
}

impl WorldAccel {
    /// Return true if this accelerator has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.aabbs.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.aabbs.len()
    }
}

/// Build the broad-phase accelerator over world statics.
pub fn build_world_accel(statics: &[StaticShape]) -> WorldAccel {
    let aabbs = statics
        .iter()
        .map(|s| match *s {
            StaticShape::Cuboid {
                half_extents,
                transform,
            } => pshape::Cuboid::new(half_extents).aabb(&transform.iso()),
            StaticShape::Sphere { radius, transform } => {
                pshape::Ball::new(radius).aabb(&Transform::from_translation(transform.translation).iso())
            }
            StaticShape::Capsule {
                radius,
                half_height,
                transform,
            } => pshape::Capsule::new_y(half_height, radius).aabb(&transform.iso()),
        })
        .collect();

    WorldAccel { aabbs }
}

/// Compute a swept AABB for a Y-aligned capsule moving from `start_pos` to `start_pos + desired`.
///
/// The resulting AABB is inflated by `skin` to conservatively include near misses.
pub fn swept_capsule_aabb(
    capsule_half_height: f32,
    capsule_radius: f32,
    start_pos: na::Vector3<f32>,
    desired: na::Vector3<f32>,
    skin: f32,
) -> Aabb {
    let capsule = pshape::Capsule::new_y(capsule_half_height, capsule_radius);

    let aabb_start = capsule.aabb(&Transform::from_translation(start_pos).iso());
    let aabb_end = capsule.aabb(&Transform::from_translation(start_pos + desired).iso());

    let swept = aabb_start.merged(&aabb_end);
    if skin > 0.0 {
        swept.loosened(skin)
    } else {
        swept
    }
}

/// Indices of statics whose AABB intersects `swept`.
pub fn query_candidates<'a>(accel: &'a WorldAccel, swept: &'a Aabb) -> impl Iterator<Item = usize> + 'a {
    accel
        .aabbs
        .iter()
        .enumerate()
        .filter(move |(_, aabb)| aabb.intersects(swept))
        .map(|(i, _)| i)
}
