// Rest layout of the humanoid, one table row per segment.
// The figure faces +Z with +Y up, so its left side is +X.

use super::segment::{Primitive, Segment, SegmentId};
use crate::math::{scale_matrix, translation_matrix};
use crate::settings::BodyDimensions;
use nalgebra_glm as glm;

/// Static description of a segment before any posing
#[derive(Debug, Clone)]
pub struct SegmentSpec {
    pub id: SegmentId,
    pub parent: Option<SegmentId>,
    pub primitive: Primitive,
    /// Joint position in the parent's frame
    pub anchor: glm::DVec3,
    /// Joint-to-centre offset along the segment's own Y
    pub centre_offset: f64,
    /// Extent of the primitive along X, Y and Z
    pub size: glm::DVec3,
}

impl SegmentSpec {
    pub fn build(&self) -> Segment {
        Segment::new(
            self.id,
            self.parent,
            self.primitive,
            translation_matrix(self.anchor.x, self.anchor.y, self.anchor.z),
            translation_matrix(0.0, self.centre_offset, 0.0),
            scale_matrix(self.size.x, self.size.y, self.size.z),
        )
    }
}

/// Centre of a limb hanging from its joint, `ratio` of it poking above
fn hanging_centre(length: f64, ratio: f64) -> f64 {
    -length * (0.5 - ratio)
}

/// Joint at the far end of the parent limb, measured from the parent's centre
fn distal_anchor(parent_length: f64, child_length: f64, child_ratio: f64) -> glm::DVec3 {
    glm::vec3(0.0, -parent_length / 2.0 + child_ratio * child_length, 0.0)
}

/// Rows in `SegmentId::ALL` order, so every parent precedes its children
pub fn humanoid(body: &BodyDimensions) -> Vec<SegmentSpec> {
    let b = body;
    let limb = |r: f64, len: f64| glm::vec3(2.0 * r, len, 2.0 * r);

    let shoulder_x = b.torso_radius + b.arm_radius * 5.0 / 4.0;
    let shoulder_y = b.torso_height / 3.0;
    let hip_x = b.torso_radius / 2.0 + b.leg_radius / 2.0;
    let hip_y = -b.torso_height / 2.0;

    let leg = |id, x: f64| SegmentSpec {
        id,
        parent: Some(SegmentId::Torso),
        primitive: Primitive::Ellipsoid,
        anchor: glm::vec3(x, hip_y, 0.0),
        centre_offset: hanging_centre(b.leg_height, b.hip_joint_ratio),
        size: limb(b.leg_radius, b.leg_height),
    };
    let lower_leg = |id, parent| SegmentSpec {
        id,
        parent: Some(parent),
        primitive: Primitive::Ellipsoid,
        anchor: distal_anchor(b.leg_height, b.lower_leg_height, b.knee_joint_ratio),
        centre_offset: hanging_centre(b.lower_leg_height, b.knee_joint_ratio),
        size: limb(b.lower_leg_radius, b.lower_leg_height),
    };
    let arm = |id, x: f64| SegmentSpec {
        id,
        parent: Some(SegmentId::Torso),
        primitive: Primitive::Ellipsoid,
        anchor: glm::vec3(x, shoulder_y, 0.0),
        centre_offset: hanging_centre(b.arm_length, b.arm_joint_ratio),
        size: limb(b.arm_radius, b.arm_length),
    };
    let forearm = |id, parent| SegmentSpec {
        id,
        parent: Some(parent),
        primitive: Primitive::Ellipsoid,
        anchor: distal_anchor(b.arm_length, b.forearm_length, b.elbow_joint_ratio),
        centre_offset: hanging_centre(b.forearm_length, b.elbow_joint_ratio),
        size: limb(b.forearm_radius, b.forearm_length),
    };

    vec![
        SegmentSpec {
            id: SegmentId::Torso,
            parent: None,
            primitive: Primitive::Cuboid,
            anchor: glm::vec3(0.0, 0.0, 0.0),
            centre_offset: 0.0,
            size: glm::vec3(2.0 * b.torso_radius, b.torso_height, b.torso_radius),
        },
        SegmentSpec {
            id: SegmentId::Head,
            parent: Some(SegmentId::Torso),
            primitive: Primitive::Cuboid,
            anchor: glm::vec3(0.0, b.torso_height / 2.0, 0.0),
            centre_offset: b.head_radius,
            size: glm::vec3(2.0 * b.head_radius, b.head_radius, b.head_radius),
        },
        leg(SegmentId::LeftLeg, hip_x),
        lower_leg(SegmentId::LeftLowerLeg, SegmentId::LeftLeg),
        leg(SegmentId::RightLeg, -hip_x),
        lower_leg(SegmentId::RightLowerLeg, SegmentId::RightLeg),
        arm(SegmentId::LeftArm, shoulder_x),
        forearm(SegmentId::LeftForearm, SegmentId::LeftArm),
        arm(SegmentId::RightArm, -shoulder_x),
        forearm(SegmentId::RightForearm, SegmentId::RightArm),
    ]
}
