// Walk driver: moves the root along its facing and steps the limbs

use super::walk_cycle::{PhaseBand, WalkCycle};
use crate::math::Axis;
use crate::settings::WalkSettings;
use crate::skeleton::{Robot, SegmentId};
use std::f64::consts::PI;

/// What one call to `apply_translation` did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkStep {
    pub distance: f64,
    pub units: i64,
    pub position: u32,
    pub band: PhaseBand,
}

/// `sign(0) = 0`, unlike `f64::signum`
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

pub struct Walker {
    cycle: WalkCycle,
    settings: WalkSettings,
}

impl Walker {
    pub fn new(settings: WalkSettings) -> Self {
        Self {
            cycle: WalkCycle::new(settings.cycle_length),
            settings,
        }
    }

    pub fn cycle(&self) -> &WalkCycle {
        &self.cycle
    }

    pub fn reset(&mut self) {
        self.cycle.reset();
    }

    /// Whole movement units covered by a scaled distance.
    /// Truncates toward zero so tiny moves either way count as none.
    pub fn movement_units(&self, distance: f64) -> i64 {
        if self.settings.unit_duration <= 0.0 {
            return 0;
        }
        (distance / self.settings.unit_duration).trunc() as i64
    }

    /// Walk the figure by a signed speed: move the root along its facing,
    /// advance the cycle and rotate the limbs for the current band
    pub fn apply_translation(&mut self, robot: &mut Robot, speed: f64) -> WalkStep {
        let distance = speed * self.settings.stride_scale;
        let facing = robot.facing();
        robot.translate_root(facing.x * distance, facing.y * distance, facing.z * distance);

        let previous = self.cycle.band();
        let units = self.movement_units(distance);
        self.cycle.advance(units);
        let band = self.cycle.band();
        if band != previous {
            log::debug!(
                "Walk cycle {:?} -> {:?} at unit {}",
                previous,
                band,
                self.cycle.position()
            );
        }

        let d = band.deltas();
        let angle = |delta: f64| sign(speed) * -PI * delta;
        robot.apply_rotations(&[
            (SegmentId::LeftLeg, angle(d.left_leg), Axis::X),
            (SegmentId::LeftLowerLeg, angle(d.left_lower_leg), Axis::X),
            (SegmentId::RightLeg, angle(d.right_leg), Axis::X),
            (SegmentId::RightLowerLeg, angle(d.right_lower_leg), Axis::X),
            (SegmentId::LeftArm, angle(d.left_arm), Axis::X),
            (SegmentId::LeftForearm, angle(d.left_forearm), Axis::X),
            (SegmentId::RightArm, angle(d.right_arm), Axis::X),
            (SegmentId::RightForearm, angle(d.right_forearm), Axis::X),
        ]);

        WalkStep {
            distance,
            units,
            position: self.cycle.position(),
            band,
        }
    }
}

impl Default for Walker {
    fn default() -> Self {
        Self::new(WalkSettings::default())
    }
}
