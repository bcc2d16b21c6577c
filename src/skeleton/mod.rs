// Articulated figure: segment table, pose composition, ground contact

mod ground;
mod layout;
mod robot;
mod segment;

pub use ground::FootTips;
pub use layout::{SegmentSpec, humanoid};
pub use robot::{Robot, rest_facing};
pub use segment::{Primitive, Segment, SegmentId};
