// Homogeneous transform helpers

pub mod transform;

pub use transform::*;
