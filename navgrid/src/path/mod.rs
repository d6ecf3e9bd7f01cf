/*!
From a grid search result to something a mover can follow.

- builder:     walks backpointers and emits waypoints for a target tile
- string_pull: drops waypoints a straight walk can skip
- spline:      arc-length parameterized polyline sampled every tick
*/

pub mod builder;
pub mod spline;
pub mod string_pull;

pub use builder::{backpointer_chain, build_path};
pub use spline::{PathSample, PathSpline};
pub use string_pull::string_pull;
