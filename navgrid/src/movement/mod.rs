/*!
Per-actor movement controller.

- mode:       movement modes, phases and the available-modes set
- options:    per-mover tuning
- events:     notifications drained by the owner
- controller: `GridMovement` state, requests and queries
- tick:       the per-frame step
*/

pub mod controller;
pub mod events;
pub mod mode;
pub mod options;
mod tick;

pub use controller::GridMovement;
pub use events::MovementEvent;
pub use mode::{AvailableModes, MovementMode, MovementPhase};
pub use options::MovementOptions;
