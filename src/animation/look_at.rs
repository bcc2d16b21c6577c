// Turning the figure toward a world point

use crate::skeleton::Robot;
use nalgebra_glm as glm;
use std::f64::consts::PI;

/// Angles below this count as already facing the target.
/// acos cannot resolve much finer than 1.5e-8 near a cosine of 1.
pub const FACING_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAtOutcome {
    /// Turns actually applied
    pub iterations: u32,
    /// Signed sum of the turns, radians about +Y
    pub total_rotation: f64,
    /// False only when the iteration budget ran out first
    pub converged: bool,
}

/// Unsigned angle for a cosine, treating a NaN from rounding past ±1
/// as the nearest valid direction: coincident gives 0, opposite gives π.
pub fn facing_angle(cosine: f64) -> f64 {
    let angle = cosine.acos();
    if angle.is_nan() {
        if cosine < 0.0 { PI } else { 0.0 }
    } else {
        angle
    }
}

/// Direction from the torso to `target` on the ground plane, if any
fn ground_direction(robot: &Robot, target: &glm::DVec3) -> Option<glm::DVec3> {
    let from = robot.position();
    let flat = glm::vec3(target.x - from.x, 0.0, target.z - from.z);
    let len = glm::length(&flat);
    (len > 1e-12).then(|| flat / len)
}

/// Turn the torso about Y until it faces `target`, at most `max_iterations` turns
pub fn look_at(robot: &mut Robot, target: &glm::DVec3, max_iterations: u32) -> LookAtOutcome {
    let mut outcome = LookAtOutcome {
        iterations: 0,
        total_rotation: 0.0,
        converged: false,
    };

    while outcome.iterations < max_iterations {
        let Some(wanted) = ground_direction(robot, target) else {
            outcome.converged = true;
            break;
        };
        let facing = robot.facing();
        let angle = facing_angle(glm::dot(&facing, &wanted));
        if angle < FACING_TOLERANCE {
            outcome.converged = true;
            break;
        }
        let turn = if glm::cross(&facing, &wanted).y < 0.0 {
            -angle
        } else {
            angle
        };
        robot.turn(turn);
        outcome.iterations += 1;
        outcome.total_rotation += turn;
    }

    if outcome.converged {
        log::debug!(
            "Look-at settled after {} turn(s), {:.4} rad",
            outcome.iterations,
            outcome.total_rotation
        );
    } else {
        log::warn!(
            "Look-at gave up after {} turns toward ({:.3}, {:.3}, {:.3})",
            outcome.iterations,
            target.x,
            target.y,
            target.z
        );
    }
    outcome
}
