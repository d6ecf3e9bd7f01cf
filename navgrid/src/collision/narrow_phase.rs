use nalgebra as na;
use rapier3d::parry::{
    query::{self, ShapeCastOptions},
    shape as pshape,
};

use super::types::{Iso, MoveHit, StaticShape, Vec3};

/// Sweep the footprint capsule (posed at `capsule_iso`) along `vel` against one obstacle.
///
/// Only hits within `max_toi` (a fraction of `vel`) count. Starting in contact reports a
/// hit at fraction zero.
pub fn cast_capsule_against_static(
    capsule_iso: Iso,
    capsule: &pshape::Capsule,
    vel: Vec3,
    max_toi: f32,
    shape: &StaticShape,
) -> Option<MoveHit> {
    match *shape {
        StaticShape::Cuboid {
            half_extents,
            transform,
        } => {
            let cuboid = pshape::Cuboid::new(half_extents);
            cast(capsule_iso, capsule, vel, max_toi, transform.iso(), &cuboid)
        }
        StaticShape::Sphere { radius, transform } => {
            // Rotation is irrelevant for a ball.
            let ball = pshape::Ball::new(radius);
            let ball_iso = Iso::from_parts(
                na::Translation3::from(transform.translation),
                na::UnitQuaternion::identity(),
            );
            cast(capsule_iso, capsule, vel, max_toi, ball_iso, &ball)
        }
        StaticShape::Capsule {
            radius,
            half_height,
            transform,
        } => {
            let static_capsule = pshape::Capsule::new_y(half_height, radius);
            cast(
                capsule_iso,
                capsule,
                vel,
                max_toi,
                transform.iso(),
                &static_capsule,
            )
        }
    }
}

fn cast(
    capsule_iso: Iso,
    capsule: &pshape::Capsule,
    vel: Vec3,
    max_toi: f32,
    static_iso: Iso,
    static_shape: &dyn pshape::Shape,
) -> Option<MoveHit> {
    let mut opts = ShapeCastOptions::with_max_time_of_impact(max_toi);
    opts.stop_at_penetration = true;

    let hit = query::cast_shapes(
        &capsule_iso,
        &vel,
        capsule as &dyn pshape::Shape,
        &static_iso,
        &na::Vector3::zeros(),
        static_shape,
        opts,
    )
    .ok()
    .flatten()?;

    // Normal on the footprint, facing against the motion.
    let mut normal = hit.normal1.into_inner();
    if normal.dot(&vel) > 0.0 {
        normal = -normal;
    }
    Some(MoveHit {
        normal,
        fraction: hit.time_of_impact,
    })
}
