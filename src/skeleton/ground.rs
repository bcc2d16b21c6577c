// Keeps the lowest foot on the y = 0 ground plane

use nalgebra_glm as glm;

/// World positions of the two foot tips
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootTips {
    pub left: glm::DVec3,
    pub right: glm::DVec3,
}

impl FootTips {
    pub fn lowest(&self) -> f64 {
        self.left.y.min(self.right.y)
    }

    /// Vertical lift that cancels the lower foot's penetration.
    /// Never negative: a figure whose feet are both above ground is left alone.
    pub fn clamp_offset(&self) -> f64 {
        (-self.lowest()).max(0.0)
    }
}
