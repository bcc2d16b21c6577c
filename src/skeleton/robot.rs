// The posable humanoid: segments, pose composition and ground clamping

use super::ground::FootTips;
use super::layout;
use super::segment::{Segment, SegmentId};
use crate::math::{
    Axis, compose, rotation_matrix, transform_direction, transform_point, translate,
    translation_matrix, translation_of,
};
use crate::scene::SceneGraph;
use crate::settings::BodyDimensions;
use nalgebra_glm as glm;

/// Facing of the unposed figure
pub fn rest_facing() -> glm::DVec3 {
    glm::vec3(0.0, 0.0, 1.0)
}

/// Articulated figure.
///
/// Joint rotations are applied in the joint's local frame (`pose · R`);
/// root translations are applied in world space (`T · pose`).
#[derive(Debug, Clone)]
pub struct Robot {
    /// Indexed by `SegmentId::index`, parents first
    segments: Vec<Segment>,
    /// Foot tip in the lower leg's frame
    foot_tip: glm::DVec3,
    ground_offset: f64,
}

impl Robot {
    pub fn new(body: &BodyDimensions) -> Self {
        let segments = layout::humanoid(body).iter().map(|spec| spec.build()).collect();
        let mut robot = Self {
            segments,
            foot_tip: glm::vec3(0.0, -body.lower_leg_height / 2.0, 0.0),
            ground_offset: 0.0,
        };
        robot.update_pose();
        robot
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id.index()]
    }

    pub fn pose(&self, id: SegmentId) -> &glm::DMat4 {
        &self.segment(id).pose
    }

    /// Unscaled transform children hang from
    pub fn frame(&self, id: SegmentId) -> &glm::DMat4 {
        &self.segment(id).frame
    }

    /// Transform handed to the segment's renderable
    pub fn world(&self, id: SegmentId) -> &glm::DMat4 {
        &self.segment(id).world
    }

    pub fn ground_offset(&self) -> f64 {
        self.ground_offset
    }

    /// Recompute every frame and world transform top-down.
    /// Pure in the pose state, so repeated calls give identical results.
    pub fn update_pose(&mut self) {
        self.recompute_frames(&glm::identity());
        self.ground_offset = self.foot_tips().clamp_offset();
        let lift = translation_matrix(0.0, self.ground_offset, 0.0);
        self.recompute_frames(&lift);
    }

    fn recompute_frames(&mut self, root: &glm::DMat4) {
        for i in 0..self.segments.len() {
            let parent_frame = match self.segments[i].parent {
                Some(parent) => self.segments[parent.index()].frame,
                None => *root,
            };
            self.segments[i].recompute(&parent_frame);
        }
    }

    /// Rotate a segment about its own joint, then refresh the pose
    pub fn apply_rotation(&mut self, id: SegmentId, angle: f64, axis: Axis) {
        self.rotate_joint(id, angle, axis);
        self.update_pose();
    }

    /// Rotate several joints and refresh once
    pub fn apply_rotations(&mut self, rotations: &[(SegmentId, f64, Axis)]) {
        for &(id, angle, axis) in rotations {
            self.rotate_joint(id, angle, axis);
        }
        self.update_pose();
    }

    fn rotate_joint(&mut self, id: SegmentId, angle: f64, axis: Axis) {
        if angle == 0.0 {
            return;
        }
        let segment = &mut self.segments[id.index()];
        segment.pose = compose(&segment.pose, &rotation_matrix(angle, axis));
    }

    /// Turn the whole figure in place about the vertical axis
    pub fn turn(&mut self, angle: f64) {
        self.apply_rotation(SegmentId::Torso, angle, Axis::Y);
    }

    /// Move the root in world space
    pub fn translate_root(&mut self, dx: f64, dy: f64, dz: f64) {
        let torso = &mut self.segments[SegmentId::Torso.index()];
        torso.pose = translate(&torso.pose, dx, dy, dz);
        self.update_pose();
    }

    /// Unit walking direction on the ground plane
    pub fn facing(&self) -> glm::DVec3 {
        let forward = transform_direction(self.pose(SegmentId::Torso), &rest_facing());
        let flat = glm::vec3(forward.x, 0.0, forward.z);
        let len = glm::length(&flat);
        if len < 1e-12 {
            // Torso pitched straight up or down; keep walking the rest way.
            rest_facing()
        } else {
            flat / len
        }
    }

    /// Torso centre in world space
    pub fn position(&self) -> glm::DVec3 {
        translation_of(self.frame(SegmentId::Torso))
    }

    pub fn foot_tips(&self) -> FootTips {
        FootTips {
            left: transform_point(self.frame(SegmentId::LeftLowerLeg), &self.foot_tip),
            right: transform_point(self.frame(SegmentId::RightLowerLeg), &self.foot_tip),
        }
    }

    /// Back to the layout pose at the origin
    pub fn reset(&mut self) {
        for segment in &mut self.segments {
            segment.pose = segment.initial_pose;
        }
        self.update_pose();
    }

    /// Register one renderable per segment with the host scene
    pub fn attach(&self, scene: &mut dyn SceneGraph) {
        for segment in &self.segments {
            scene.add_renderable(segment.id, segment.primitive);
        }
        self.publish(scene);
    }

    /// Push the cached world transforms to the host scene
    pub fn publish(&self, scene: &mut dyn SceneGraph) {
        for segment in &self.segments {
            scene.set_transform(segment.id, &segment.world);
        }
    }
}

impl Default for Robot {
    fn default() -> Self {
        Self::new(&BodyDimensions::default())
    }
}
