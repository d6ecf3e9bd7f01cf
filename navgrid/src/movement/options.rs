use crate::{
    CapsuleSpec, MovementMode, Rotator,
    constants::{
        ARRIVAL_SPEED_THRESHOLD, DEFAULT_FOOTPRINT_HALF_HEIGHT, DEFAULT_FOOTPRINT_RADIUS,
        DEFAULT_MAX_CLIMB_SPEED, DEFAULT_MAX_ROTATION_SPEED, DEFAULT_MAX_WALK_SPEED,
        DEFAULT_STOPPING_DISTANCE, LOOK_AHEAD_DISTANCE, MAX_STEP_HEIGHT, ROOT_MOTION_MIN_SPEED,
    },
    movement::AvailableModes,
};

/// Per-mover tuning, fixed when the controller is created.
#[derive(Clone, Debug, PartialEq)]
pub struct MovementOptions {
    pub available_modes: AvailableModes,

    /// Units per second.
    pub max_walk_speed: f32,
    pub max_climb_speed: f32,
    /// Degrees per second, per axis.
    pub max_rotation_speed: f32,
    /// Distance before the end of a path at which the phase turns to `Ending`.
    pub stopping_distance: f32,

    /// Simplify tile chains before following them.
    pub string_pull: bool,

    pub lock_roll: bool,
    pub lock_pitch: bool,
    pub lock_yaw: bool,

    /// Let animation drive path traversal.
    pub use_root_motion: bool,
    /// Let animation move the mover while it is stationary.
    pub always_use_root_motion: bool,
    /// Facing offset of the animated mesh relative to the mover.
    pub mesh_rotation: Rotator,

    pub look_ahead_distance: f32,
    pub max_step_height: f32,
    pub arrival_speed_threshold: f32,
    /// Root motion below this speed (units per second) counts as no motion at all.
    pub root_motion_min_speed: f32,
    pub footprint: CapsuleSpec,
}

impl MovementOptions {
    /// Whether either climbing mode is enabled.
    #[inline]
    pub fn can_climb(&self) -> bool {
        self.available_modes
            .contains_any(&[MovementMode::ClimbingUp, MovementMode::ClimbingDown])
    }

    /// Path speed for `mode`, zero for modes that do not follow a path.
    pub fn max_speed(&self, mode: MovementMode) -> f32 {
        match mode {
            MovementMode::Walking => self.max_walk_speed,
            MovementMode::ClimbingUp | MovementMode::ClimbingDown => self.max_climb_speed,
            MovementMode::Stationary | MovementMode::InPlaceTurn => 0.0,
        }
    }
}

impl Default for MovementOptions {
    fn default() -> Self {
        Self {
            available_modes: AvailableModes::all(),
            max_walk_speed: DEFAULT_MAX_WALK_SPEED,
            max_climb_speed: DEFAULT_MAX_CLIMB_SPEED,
            max_rotation_speed: DEFAULT_MAX_ROTATION_SPEED,
            stopping_distance: DEFAULT_STOPPING_DISTANCE,
            string_pull: true,
            lock_roll: false,
            lock_pitch: false,
            lock_yaw: false,
            use_root_motion: false,
            always_use_root_motion: false,
            mesh_rotation: Rotator::ZERO,
            look_ahead_distance: LOOK_AHEAD_DISTANCE,
            max_step_height: MAX_STEP_HEIGHT,
            arrival_speed_threshold: ARRIVAL_SPEED_THRESHOLD,
            root_motion_min_speed: ROOT_MOTION_MIN_SPEED,
            footprint: CapsuleSpec::new(DEFAULT_FOOTPRINT_RADIUS, DEFAULT_FOOTPRINT_HALF_HEIGHT),
        }
    }
}
