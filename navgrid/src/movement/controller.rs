use std::collections::HashSet;

use crate::{
    MovementError, NavGrid, NavTile, Pose, Rotator, TileId, Vec3,
    grid::resolve_tile,
    movement::{MovementEvent, MovementMode, MovementOptions, MovementPhase},
    path::{PathSpline, build_path},
    root_motion::{RootMotionBlender, RootMotionSource},
};

/// Moves one grid-bound actor along tile paths.
///
/// The controller never owns the actor's transform: every tick it is handed the current
/// pose and returns the next one. It owns everything else about the movement: the active
/// path, progress along it, mode, phase and the last computed velocity.
#[derive(Debug)]
pub struct GridMovement {
    pub(super) options: MovementOptions,
    pub(super) root_motion: RootMotionBlender,

    pub(super) mode: MovementMode,
    pub(super) phase: MovementPhase,
    pub(super) distance: f32,
    pub(super) path: PathSpline,
    pub(super) desired_forward_rotation: Rotator,
    pub(super) velocity: Vec3,

    pub(super) events: Vec<MovementEvent>,
}

impl GridMovement {
    pub fn new(options: MovementOptions) -> Self {
        Self::with_root_motion(options, None)
    }

    /// A controller that reads animation displacement from `source` when the options ask
    /// for root motion.
    pub fn with_root_motion(
        options: MovementOptions,
        source: Option<Box<dyn RootMotionSource>>,
    ) -> Self {
        let root_motion = RootMotionBlender::new(
            source,
            options.mesh_rotation,
            options.use_root_motion,
            options.always_use_root_motion,
        );
        Self {
            options,
            root_motion,
            mode: MovementMode::Stationary,
            phase: MovementPhase::Done,
            distance: 0.0,
            path: PathSpline::new(),
            desired_forward_rotation: Rotator::ZERO,
            velocity: Vec3::zeros(),
            events: Vec::new(),
        }
    }

    // --- Requests ---

    /// Start walking from `actor` to `target`.
    ///
    /// The stored path is dropped before the new one is built. On failure mode, phase and
    /// distance are left as they were, and an actor that was walking comes to a halt on its
    /// next tick.
    pub fn move_to<G: NavGrid>(
        &mut self,
        grid: &G,
        actor: &Pose,
        target: TileId,
    ) -> Result<(), MovementError> {
        if !self.options.available_modes.contains(MovementMode::Walking) {
            log::warn!("move to {target:?} refused: walking is not available");
            return Err(MovementError::ModeUnavailable(MovementMode::Walking));
        }

        self.path.clear();
        let path = build_path(grid, actor, target, &self.options)
            .inspect_err(|e| log::warn!("move to {target:?} failed: {e}"))?;

        log::debug!(
            "new path to {target:?}: {} points, {:.1} units",
            path.points().len(),
            path.length()
        );
        self.path = path;
        self.distance = 0.0;
        self.change_mode(MovementMode::Walking);
        self.phase = MovementPhase::Beginning;
        Ok(())
    }

    /// Turn in place until facing `rotation`. Ignored when in-place turns are not
    /// available; otherwise any active path is dropped.
    pub fn turn_to(&mut self, rotation: Rotator) {
        if !self.options.available_modes.contains(MovementMode::InPlaceTurn) {
            log::debug!("turn ignored: in-place turns are not available");
            return;
        }
        self.desired_forward_rotation = rotation;
        self.path.clear();
        self.distance = 0.0;
        if !self.change_mode(MovementMode::InPlaceTurn) {
            self.phase = MovementPhase::Beginning;
        }
    }

    /// Cancel the current movement. An active movement ends the same way a finished one
    /// does: the phase turns to `Ending` and arrival fires once the actor settles.
    pub fn stop(&mut self) {
        self.path.clear();
        self.distance = 0.0;
        if self.mode != MovementMode::Stationary {
            self.change_mode(MovementMode::Stationary);
            self.phase = MovementPhase::Ending;
        }
    }

    // --- Grid queries ---

    /// Tile under `pose`, falling back to footing below it when the actor can climb.
    pub fn tile<G: NavGrid>(&self, grid: &G, pose: &Pose) -> Option<TileId> {
        resolve_tile(grid, pose.position, self.options.can_climb())
    }

    /// `pose` moved onto the standing spot of the tile it is over; unchanged when off grid.
    pub fn snap_to_grid<G: NavGrid>(&self, grid: &G, pose: &Pose) -> Pose {
        match self.tile(grid, pose).and_then(|id| grid.tile(id)) {
            Some(tile) => Pose {
                position: tile.pawn_location(),
                ..*pose
            },
            None => *pose,
        }
    }

    /// Tiles the actor at `pose` can move to this turn.
    pub fn tiles_in_range<G: NavGrid>(&self, grid: &G, pose: &Pose) -> HashSet<TileId> {
        grid.tiles_in_range(pose, true)
    }

    pub fn can_move_to<G: NavGrid>(&self, grid: &G, pose: &Pose, target: TileId) -> bool {
        self.tiles_in_range(grid, pose).contains(&target)
    }

    /// Point on the active path `ahead` units past the current progress, clamped to its end.
    pub fn forward_location(&self, ahead: f32) -> Vec3 {
        let d = (self.distance + ahead).min(self.path.length());
        self.path.location_at(d)
    }

    // --- Observables ---

    #[inline]
    pub fn mode(&self) -> MovementMode {
        self.mode
    }

    #[inline]
    pub fn phase(&self) -> MovementPhase {
        self.phase
    }

    /// Velocity computed by the last tick (units per second).
    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Progress along the active path.
    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    #[inline]
    pub fn path(&self) -> &PathSpline {
        &self.path
    }

    #[inline]
    pub fn desired_forward_rotation(&self) -> Rotator {
        self.desired_forward_rotation
    }

    #[inline]
    pub fn options(&self) -> &MovementOptions {
        &self.options
    }

    /// Take the notifications raised since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<MovementEvent> {
        std::mem::take(&mut self.events)
    }

    /// Switch to `mode` and announce it. Returns false when nothing changed: the mode is
    /// already active or this actor may not enter it.
    pub(super) fn change_mode(&mut self, mode: MovementMode) -> bool {
        if mode == self.mode {
            return false;
        }
        if !self.options.available_modes.contains(mode) {
            log::debug!("ignoring switch {:?} -> {mode:?}: mode not available", self.mode);
            return false;
        }

        log::debug!("movement mode {:?} -> {mode:?}", self.mode);
        self.events.push(MovementEvent::ModeChanged {
            from: self.mode,
            to: mode,
        });
        self.mode = mode;
        if mode != MovementMode::Stationary {
            self.phase = MovementPhase::Beginning;
        }
        true
    }
}

impl Default for GridMovement {
    fn default() -> Self {
        Self::new(MovementOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{movement::AvailableModes, tile_map::corridor};

    #[test]
    fn new_controller_is_at_rest() {
        let movement = GridMovement::default();
        assert_eq!(movement.mode(), MovementMode::Stationary);
        assert_eq!(movement.phase(), MovementPhase::Done);
        assert_eq!(movement.distance(), 0.0);
        assert!(movement.path().is_empty());
    }

    #[test]
    fn move_to_switches_to_walking() {
        let (map, tiles) = corridor();
        let mut movement = GridMovement::default();

        movement.move_to(&map, &Pose::default(), tiles[3]).unwrap();
        assert_eq!(movement.mode(), MovementMode::Walking);
        assert_eq!(movement.phase(), MovementPhase::Beginning);
        assert!((movement.path().length() - 300.0).abs() < 1.0e-3);
        assert_eq!(
            movement.drain_events(),
            vec![MovementEvent::ModeChanged {
                from: MovementMode::Stationary,
                to: MovementMode::Walking,
            }]
        );
        assert!(movement.drain_events().is_empty());
    }

    #[test]
    fn failed_move_drops_the_path_but_keeps_mode_and_progress() {
        let (mut map, tiles) = corridor();
        let island = map.add_floor(Vec3::new(0.0, 0.0, 700.0));
        let mut movement = GridMovement::default();
        movement.move_to(&map, &Pose::default(), tiles[2]).unwrap();
        movement.distance = 42.0;
        movement.drain_events();

        let err = movement.move_to(&map, &Pose::default(), island);
        assert_eq!(err, Err(MovementError::NoPathToTarget(island)));
        assert_eq!(movement.mode(), MovementMode::Walking);
        assert_eq!(movement.phase(), MovementPhase::Beginning);
        assert_eq!(movement.distance(), 42.0);
        assert!(movement.path().is_empty());
        assert!(movement.drain_events().is_empty());
    }

    #[test]
    fn failed_move_while_walking_halts_on_the_next_tick() {
        let (mut map, tiles) = corridor();
        let island = map.add_floor(Vec3::new(0.0, 0.0, 700.0));
        let mut movement = GridMovement::default();
        let mut pose = Pose::default();
        movement.move_to(&map, &pose, tiles[3]).unwrap();
        for _ in 0..5 {
            pose = movement.advance(&map, &pose, 1.0 / 60.0);
        }
        assert!(pose.position.x > 0.0);
        movement.drain_events();

        assert!(movement.move_to(&map, &pose, island).is_err());
        let next = movement.advance(&map, &pose, 1.0 / 60.0);

        assert_eq!(movement.mode(), MovementMode::Stationary);
        assert_eq!(next.position, pose.position);
        assert_eq!(movement.velocity(), Vec3::zeros());
        assert!(movement.drain_events().contains(&MovementEvent::ModeChanged {
            from: MovementMode::Walking,
            to: MovementMode::Stationary,
        }));
    }

    #[test]
    fn move_without_walking_is_refused() {
        let (map, tiles) = corridor();
        let mut movement = GridMovement::new(MovementOptions {
            available_modes: AvailableModes::all().without(MovementMode::Walking),
            ..MovementOptions::default()
        });

        assert_eq!(
            movement.move_to(&map, &Pose::default(), tiles[3]),
            Err(MovementError::ModeUnavailable(MovementMode::Walking))
        );
        assert_eq!(movement.mode(), MovementMode::Stationary);
    }

    #[test]
    fn turn_to_is_a_no_op_without_in_place_turns() {
        let mut movement = GridMovement::new(MovementOptions {
            available_modes: AvailableModes::all().without(MovementMode::InPlaceTurn),
            ..MovementOptions::default()
        });

        movement.turn_to(Rotator::from_yaw(90.0));
        assert_eq!(movement.mode(), MovementMode::Stationary);
        assert_eq!(movement.phase(), MovementPhase::Done);
        assert!(movement.drain_events().is_empty());
    }

    #[test]
    fn turn_to_drops_the_active_path() {
        let (map, tiles) = corridor();
        let mut movement = GridMovement::default();
        movement.move_to(&map, &Pose::default(), tiles[3]).unwrap();

        movement.turn_to(Rotator::from_yaw(-90.0));
        assert_eq!(movement.mode(), MovementMode::InPlaceTurn);
        assert_eq!(movement.phase(), MovementPhase::Beginning);
        assert!(movement.path().is_empty());
        assert_eq!(movement.desired_forward_rotation(), Rotator::from_yaw(-90.0));
    }

    #[test]
    fn stop_cancels_an_active_path() {
        let (map, tiles) = corridor();
        let mut movement = GridMovement::default();
        movement.move_to(&map, &Pose::default(), tiles[3]).unwrap();
        movement.drain_events();

        movement.stop();
        assert_eq!(movement.mode(), MovementMode::Stationary);
        assert_eq!(movement.phase(), MovementPhase::Ending);
        assert!(movement.path().is_empty());
        assert_eq!(movement.distance(), 0.0);
        assert_eq!(
            movement.drain_events(),
            vec![MovementEvent::ModeChanged {
                from: MovementMode::Walking,
                to: MovementMode::Stationary,
            }]
        );

        // Stopping at rest does nothing.
        let mut idle = GridMovement::default();
        idle.stop();
        assert_eq!(idle.phase(), MovementPhase::Done);
    }

    #[test]
    fn snap_to_grid_moves_onto_the_tile() {
        let (map, _) = corridor();
        let movement = GridMovement::default();
        let pose = Pose::new(Vec3::new(130.0, 4.0, -20.0), Rotator::from_yaw(45.0));

        let snapped = movement.snap_to_grid(&map, &pose);
        assert_eq!(snapped.position, Vec3::new(100.0, 0.0, 0.0));
        assert_eq!(snapped.rotation, pose.rotation);

        let off_grid = Pose::at(Vec3::new(0.0, 0.0, 900.0));
        assert_eq!(movement.snap_to_grid(&map, &off_grid), off_grid);
    }

    #[test]
    fn range_queries_use_the_grid() {
        let (mut map, tiles) = corridor();
        let island = map.add_floor(Vec3::new(0.0, 0.0, 700.0));
        let movement = GridMovement::default();

        assert!(movement.can_move_to(&map, &Pose::default(), tiles[3]));
        assert!(!movement.can_move_to(&map, &Pose::default(), island));
        assert_eq!(movement.tiles_in_range(&map, &Pose::default()).len(), 4);
        assert_eq!(movement.tile(&map, &Pose::default()), Some(tiles[0]));
    }

    #[test]
    fn forward_location_is_clamped_to_the_path_end() {
        let (map, tiles) = corridor();
        let mut movement = GridMovement::default();
        movement.move_to(&map, &Pose::default(), tiles[3]).unwrap();

        assert!((movement.forward_location(50.0) - Vec3::new(50.0, 0.0, 0.0)).norm() < 1.0e-3);
        assert!((movement.forward_location(1.0e4) - Vec3::new(300.0, 0.0, 0.0)).norm() < 1.0e-3);
    }
}
