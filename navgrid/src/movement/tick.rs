//! The per-frame step of [`GridMovement`].

use crate::{
    NavGrid, NavTile, Pose, Rotator,
    constants::ROTATION_EQUALS_TOLERANCE,
    grid::resolve_tile,
    movement::{GridMovement, MovementEvent, MovementMode, MovementPhase},
    rotator::limit_rotation,
};

impl GridMovement {
    /// Advance the movement by `dt` seconds and return the actor's next pose.
    ///
    /// Never fails. Anything the tick cannot work out (no tile under a look-ahead point, no
    /// ladder under a climbing actor) holds the current value instead. A non-positive or
    /// non-finite `dt` returns `actor` and leaves the controller as it was.
    pub fn advance<G: NavGrid>(&mut self, grid: &G, actor: &Pose, dt: f32) -> Pose {
        if !dt.is_finite() || dt <= 0.0 {
            return *actor;
        }

        self.reconsider_mode(grid, actor);

        let mut next = match self.mode {
            MovementMode::Stationary => self.pose_from_root_motion(actor),
            MovementMode::InPlaceTurn => self.pose_from_turn(actor, dt),
            MovementMode::Walking | MovementMode::ClimbingUp | MovementMode::ClimbingDown => {
                self.pose_from_path(grid, actor, dt)
            }
        };

        if self.options.lock_roll {
            next.rotation.roll = actor.rotation.roll;
        }
        if self.options.lock_pitch {
            next.rotation.pitch = actor.rotation.pitch;
        }
        if self.options.lock_yaw {
            next.rotation.yaw = actor.rotation.yaw;
        }
        next.scale = actor.scale;

        self.velocity = (next.position - actor.position) / dt;

        match self.phase {
            MovementPhase::Beginning => self.phase = MovementPhase::Middle,
            MovementPhase::Ending
                if self.mode == MovementMode::Stationary
                    && self.velocity.norm() < self.options.arrival_speed_threshold =>
            {
                log::debug!("movement settled");
                self.phase = MovementPhase::Done;
                self.events.push(MovementEvent::Arrived);
            }
            _ => {}
        }

        next
    }

    /// Pick walking or climbing from the tile a little further along the path, so a
    /// climb starts as the actor reaches the ladder rather than once it is on it.
    fn reconsider_mode<G: NavGrid>(&mut self, grid: &G, actor: &Pose) {
        if !self.mode.follows_path() {
            return;
        }
        let ahead = self.forward_location(self.options.look_ahead_distance);
        let Some(tile) =
            resolve_tile(grid, ahead, self.options.can_climb()).and_then(|id| grid.tile(id))
        else {
            return;
        };

        let mode = if !tile.is_ladder() {
            MovementMode::Walking
        } else if ahead.y > actor.position.y {
            MovementMode::ClimbingUp
        } else {
            MovementMode::ClimbingDown
        };
        self.change_mode(mode);
    }

    fn pose_from_root_motion(&mut self, actor: &Pose) -> Pose {
        if !self.root_motion.always_use_root_motion() || self.phase == MovementPhase::Ending {
            return *actor;
        }

        let sample = self.root_motion.consume();
        let anim_to_world = actor.rotation + self.root_motion.mesh_rotation();
        Pose {
            position: actor.position + anim_to_world.rotate_vector(sample.translation),
            rotation: Rotator::from_quat(&(actor.rotation.quat() * sample.rotation)),
            scale: actor.scale,
        }
    }

    fn pose_from_turn(&mut self, actor: &Pose, dt: f32) -> Pose {
        if actor
            .rotation
            .equals(&self.desired_forward_rotation, ROTATION_EQUALS_TOLERANCE)
        {
            self.change_mode(MovementMode::Stationary);
            self.phase = MovementPhase::Ending;
            return *actor;
        }

        Pose {
            rotation: limit_rotation(
                actor.rotation,
                self.desired_forward_rotation,
                dt,
                self.options.max_rotation_speed,
            ),
            ..*actor
        }
    }

    fn pose_from_path<G: NavGrid>(&mut self, grid: &G, actor: &Pose, dt: f32) -> Pose {
        if self.path.is_empty() {
            self.finish_path();
            return *actor;
        }

        let mut speed = 0.0;
        if self.root_motion.use_root_motion() {
            speed = self.root_motion.consume().translation.norm();
        }
        // Slower than this reads as "no animation signal", not as a slow walk.
        if speed < self.options.root_motion_min_speed * dt {
            speed = self.options.max_speed(self.mode) * dt;
        }

        let length = self.path.length();
        self.distance = (self.distance + speed).min(length);
        let sample = self.path.sample(self.distance);

        let desired = if self.mode.is_climbing() {
            // Face the wall the ladder leans on.
            grid.tile_at(actor.position, false)
                .and_then(|id| grid.tile(id))
                .map(|tile| {
                    let mut r = tile.rotation();
                    r.yaw -= 180.0;
                    r
                })
                .unwrap_or(actor.rotation)
        } else {
            Rotator::from_direction(sample.tangent).unwrap_or(actor.rotation)
        };

        let next = Pose {
            position: sample.position,
            rotation: limit_rotation(actor.rotation, desired, dt, self.options.max_rotation_speed),
            scale: actor.scale,
        };

        let in_progress = matches!(self.phase, MovementPhase::Beginning | MovementPhase::Middle);
        if in_progress && self.distance + self.options.stopping_distance >= length {
            self.phase = MovementPhase::Ending;
        }
        if speed == 0.0 || self.distance >= length {
            self.finish_path();
        }

        next
    }

    fn finish_path(&mut self) {
        self.change_mode(MovementMode::Stationary);
        self.phase = MovementPhase::Ending;
        self.distance = 0.0;
        self.path.clear();
    }
}
