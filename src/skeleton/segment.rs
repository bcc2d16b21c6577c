use crate::error::ParseError;
use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one rigid segment of the figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentId {
    Torso,
    Head,
    LeftLeg,
    LeftLowerLeg,
    RightLeg,
    RightLowerLeg,
    LeftArm,
    LeftForearm,
    RightArm,
    RightForearm,
}

impl SegmentId {
    /// Every segment, in selection order
    pub const ALL: [SegmentId; 10] = [
        SegmentId::Torso,
        SegmentId::Head,
        SegmentId::LeftLeg,
        SegmentId::LeftLowerLeg,
        SegmentId::RightLeg,
        SegmentId::RightLowerLeg,
        SegmentId::LeftArm,
        SegmentId::LeftForearm,
        SegmentId::RightArm,
        SegmentId::RightForearm,
    ];

    /// Human readable label shown when the segment is selected
    pub fn label(self) -> &'static str {
        match self {
            SegmentId::Torso => "Torso",
            SegmentId::Head => "Head",
            SegmentId::LeftLeg => "Left leg",
            SegmentId::LeftLowerLeg => "Lower left leg",
            SegmentId::RightLeg => "Right leg",
            SegmentId::RightLowerLeg => "Lower right leg",
            SegmentId::LeftArm => "Left arm",
            SegmentId::LeftForearm => "Left forearm",
            SegmentId::RightArm => "Right arm",
            SegmentId::RightForearm => "Right forearm",
        }
    }

    fn key(self) -> &'static str {
        match self {
            SegmentId::Torso => "torso",
            SegmentId::Head => "head",
            SegmentId::LeftLeg => "left_leg",
            SegmentId::LeftLowerLeg => "left_lower_leg",
            SegmentId::RightLeg => "right_leg",
            SegmentId::RightLowerLeg => "right_lower_leg",
            SegmentId::LeftArm => "left_arm",
            SegmentId::LeftForearm => "left_forearm",
            SegmentId::RightArm => "right_arm",
            SegmentId::RightForearm => "right_forearm",
        }
    }

    /// Position in `ALL`; parents always come before their children
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_arm(self) -> bool {
        matches!(self, SegmentId::LeftArm | SegmentId::RightArm)
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SegmentId {
    type Err = ParseError;

    /// Accepts both the snake_case key and the display label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SegmentId::ALL
            .into_iter()
            .find(|id| id.key() == wanted || id.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseError::UnknownSegment(s.to_string()))
    }
}

/// Unit-sized renderable shape; the segment's rescale gives it its size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    /// Axis aligned box spanning [-0.5, 0.5] on every axis
    Cuboid,
    /// Sphere of diameter 1 centred on the origin
    Ellipsoid,
}

/// One rigid segment of the figure.
///
/// `frame = parent_frame · pose · rest` is what children hang from;
/// `world = frame · rescale` is what the renderable receives.
#[derive(Debug, Clone)]
pub struct Segment {
    pub id: SegmentId,
    pub parent: Option<SegmentId>,
    pub primitive: Primitive,

    /// Joint-to-centre offset, constant
    pub rest: glm::DMat4,
    /// Joint anchor plus accumulated rotations
    pub pose: glm::DMat4,
    /// Pose at construction, restored by reset
    pub initial_pose: glm::DMat4,
    /// Maps the unit primitive to the segment's size
    pub rescale: glm::DMat4,

    pub frame: glm::DMat4,
    pub world: glm::DMat4,
}

impl Segment {
    pub fn new(
        id: SegmentId,
        parent: Option<SegmentId>,
        primitive: Primitive,
        pose: glm::DMat4,
        rest: glm::DMat4,
        rescale: glm::DMat4,
    ) -> Self {
        Self {
            id,
            parent,
            primitive,
            rest,
            pose,
            initial_pose: pose,
            rescale,
            frame: glm::identity(),
            world: glm::identity(),
        }
    }

    /// Recompute the cached transforms under a parent frame
    pub fn recompute(&mut self, parent_frame: &glm::DMat4) {
        self.frame = parent_frame * self.pose * self.rest;
        self.world = self.frame * self.rescale;
    }
}
