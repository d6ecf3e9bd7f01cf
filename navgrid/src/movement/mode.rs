use crate::bitmask_flags::{BitmaskFlags, FlagBitmask};

/// Kind of locomotion a mover is performing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MovementMode {
    #[default]
    Stationary = 0,
    Walking = 1,
    ClimbingUp = 2,
    ClimbingDown = 3,
    InPlaceTurn = 4,
}

impl MovementMode {
    pub const ALL: [MovementMode; 5] = [
        MovementMode::Stationary,
        MovementMode::Walking,
        MovementMode::ClimbingUp,
        MovementMode::ClimbingDown,
        MovementMode::InPlaceTurn,
    ];

    /// Modes that advance along the stored path.
    #[inline]
    pub fn follows_path(self) -> bool {
        matches!(
            self,
            MovementMode::Walking | MovementMode::ClimbingUp | MovementMode::ClimbingDown
        )
    }

    #[inline]
    pub fn is_climbing(self) -> bool {
        matches!(self, MovementMode::ClimbingUp | MovementMode::ClimbingDown)
    }
}

impl FlagBitmask for MovementMode {
    type Storage = u8;

    fn bit_index(&self) -> u8 {
        *self as u8
    }
}

/// Progress within the current mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MovementPhase {
    #[default]
    Done,
    Beginning,
    Middle,
    Ending,
}

/// Modes a mover is allowed to enter. `Stationary` is always allowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AvailableModes(BitmaskFlags<u8>);

impl AvailableModes {
    pub fn all() -> Self {
        Self(BitmaskFlags::from_flags(&MovementMode::ALL))
    }

    pub fn only(modes: &[MovementMode]) -> Self {
        Self(BitmaskFlags::from_flags(modes))
    }

    pub fn contains(&self, mode: MovementMode) -> bool {
        mode == MovementMode::Stationary || self.0.has(mode)
    }

    pub fn contains_any(&self, modes: &[MovementMode]) -> bool {
        modes.contains(&MovementMode::Stationary) || self.0.has_any(modes)
    }

    pub fn insert(&mut self, mode: MovementMode) {
        self.0.add(mode);
    }

    pub fn remove(&mut self, mode: MovementMode) {
        self.0.remove(mode);
    }

    pub fn with(mut self, mode: MovementMode) -> Self {
        self.insert(mode);
        self
    }

    pub fn without(mut self, mode: MovementMode) -> Self {
        self.remove(mode);
        self
    }
}

impl Default for AvailableModes {
    fn default() -> Self {
        Self::all()
    }
}
