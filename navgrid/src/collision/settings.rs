/*!
Footprint sweep settings and tolerances.

Distances are in world units (the same units tiles are placed in).
*/

/// Clearance kept between the footprint and the floor when sweeping (units).
/// Without it a capsule resting on a floor-level obstacle reports contact at fraction 0.
pub const DEFAULT_SKIN: f32 = 2.0;

/// Minimum squared sweep length worth testing (units^2).
/// Shorter sweeps are treated as unobstructed.
pub const MIN_SWEEP_SQ: f32 = 1.0e-6;

/// Hits at or beyond this fraction of the sweep are contacts at the destination itself, not
/// obstacles in between.
pub const MAX_BLOCKING_FRACTION: f32 = 1.0 - 1.0e-4;
