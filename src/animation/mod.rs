// Animation: the walk cycle and turning toward a target

pub mod look_at;
pub mod walk;
pub mod walk_cycle;

pub use look_at::{LookAtOutcome, look_at};
pub use walk::{WalkStep, Walker};
pub use walk_cycle::{LimbDeltas, PhaseBand, WalkCycle};
