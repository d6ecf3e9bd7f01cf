use crate::MovementMode;

/// Notifications raised by the movement tick, queued until the owner drains them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovementEvent {
    /// Every mode transition, including into `Stationary`.
    ModeChanged {
        from: MovementMode,
        to: MovementMode,
    },
    /// A path or turn settled: phase went from `Ending` to `Done`.
    Arrived,
}
