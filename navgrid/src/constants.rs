/// Default walking speed along a path (units per second).
pub const DEFAULT_MAX_WALK_SPEED: f32 = 450.0;

/// Default climbing speed along a ladder segment (units per second).
pub const DEFAULT_MAX_CLIMB_SPEED: f32 = 200.0;

/// Default angular speed limit applied to each rotation axis (degrees per second).
pub const DEFAULT_MAX_ROTATION_SPEED: f32 = 720.0;

/// Default distance before the path end where the movement phase switches to `Ending`.
pub const DEFAULT_STOPPING_DISTANCE: f32 = 0.0;

/// How far ahead along the path the next tile is sampled when re-evaluating the movement
/// mode (units).
///
/// Looking ahead lets the controller start a climb before the mover is physically on the
/// ladder. Tuned by hand; lower values make the transition visibly late.
pub const LOOK_AHEAD_DISTANCE: f32 = 50.0;

/// Largest vertical separation between two tiles that string pulling will shortcut across
/// (units). Anything steeper keeps its intermediate waypoint.
pub const MAX_STEP_HEIGHT: f32 = 30.0;

/// Speed (units per second) under which an `Ending` movement is considered settled.
pub const ARRIVAL_SPEED_THRESHOLD: f32 = 25.0;

/// Root motion slower than this (units per second) is treated as "no animation signal" and
/// the fixed per-mode speed is used instead.
pub const ROOT_MOTION_MIN_SPEED: f32 = 25.0;

/// Per-axis tolerance (degrees) when deciding that an in-place turn has finished.
pub const ROTATION_EQUALS_TOLERANCE: f32 = 1.0e-3;

/// Practical small distance for comparisons (units).
pub const DIST_EPS: f32 = 1.0e-4;

/// Default footprint capsule radius used for obstruction tests (units).
pub const DEFAULT_FOOTPRINT_RADIUS: f32 = 34.0;

/// Default footprint capsule half height (cylinder section only, units).
pub const DEFAULT_FOOTPRINT_HALF_HEIGHT: f32 = 54.0;
