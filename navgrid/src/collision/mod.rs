/*!
Collision root module.

Answers one question for the grid: can a mover's capsule footprint travel in a straight
line between two floor positions without touching a static obstacle? The code is split
for clarity:

- types:        shared data types (Transform, StaticShape, CapsuleSpec, etc.)
- settings:     sweep tolerances
- broad:        broad-phase helpers (swept AABBs, candidate queries)
- narrow_phase: thin wrappers over parry3d queries (TOI)
*/

pub mod broad;
pub mod narrow_phase;
pub mod settings;
pub mod types;

use nalgebra as na;
use rapier3d::parry::shape as pshape;

pub use broad::{WorldAccel, build_world_accel};
pub use types::{CapsuleSpec, Iso, MoveHit, Quat, StaticShape, Transform, Vec3};

use settings::{DEFAULT_SKIN, MAX_BLOCKING_FRACTION, MIN_SWEEP_SQ};

/// Convenience: build a `StaticShape::Cuboid` with given half extents and pose.
#[inline]
pub fn cuboid_from_pose(half_extents: Vec3, translation: Vec3, rotation: Quat) -> StaticShape {
    StaticShape::Cuboid {
        half_extents,
        transform: Transform {
            translation,
            rotation,
        },
    }
}

/// Earliest hit of the footprint standing at `from` (feet position) and sweeping to `to`.
///
/// The capsule is lifted so its bottom rests `DEFAULT_SKIN` above the feet position.
pub fn sweep_footprint(
    statics: &[StaticShape],
    accel: &WorldAccel,
    footprint: CapsuleSpec,
    from: Vec3,
    to: Vec3,
) -> Option<MoveHit> {
    let motion = to - from;
    if motion.norm_squared() <= MIN_SWEEP_SQ {
        return None;
    }

    let lift = Vec3::new(0.0, footprint.center_height() + DEFAULT_SKIN, 0.0);
    let start = from + lift;
    let capsule_shape = pshape::Capsule::new_y(footprint.half_height, footprint.radius);
    let capsule_iso = Iso::from_parts(na::Translation3::from(start), Quat::identity());

    let swept = broad::swept_capsule_aabb(
        footprint.half_height,
        footprint.radius,
        start,
        motion,
        DEFAULT_SKIN,
    );

    broad::query_candidates(accel, &swept)
        .filter_map(|idx| {
            narrow_phase::cast_capsule_against_static(
                capsule_iso,
                &capsule_shape,
                motion,
                1.0,
                &statics[idx],
            )
        })
        .min_by(|a, b| a.fraction.total_cmp(&b.fraction))
}

/// True if a static obstacle sits between `from` and `to` for the given footprint.
#[inline]
pub fn footprint_blocked(
    statics: &[StaticShape],
    accel: &WorldAccel,
    footprint: CapsuleSpec,
    from: Vec3,
    to: Vec3,
) -> bool {
    sweep_footprint(statics, accel, footprint, from, to)
        .is_some_and(|hit| hit.fraction < MAX_BLOCKING_FRACTION)
}
