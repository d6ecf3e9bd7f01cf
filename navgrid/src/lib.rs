pub mod bitmask_flags;
pub mod collision;
pub mod constants;
pub mod error;
pub mod grid;
pub mod movement;
pub mod path;
pub mod pose;
pub mod root_motion;
pub mod rotator;
pub mod tile_map;

pub use collision::{CapsuleSpec, Quat, StaticShape, Vec3};
pub use error::MovementError;
pub use grid::{NavGrid, NavTile, TileId, resolve_tile};
pub use movement::{
    AvailableModes, GridMovement, MovementEvent, MovementMode, MovementOptions, MovementPhase,
};
pub use path::{PathSample, PathSpline, build_path, string_pull};
pub use pose::Pose;
pub use root_motion::{RootMotion, RootMotionBlender, RootMotionSource, ScriptedRootMotion};
pub use rotator::{Rotator, limit_rotation};
pub use tile_map::{TileKind, TileMap};
