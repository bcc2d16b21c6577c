// Commands a host input layer or a script can send to the figure

use crate::error::RigError;
use crate::math::Axis;
use crate::settings::ControlSettings;
use crate::skeleton::SegmentId;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    SelectNext,
    SelectPrevious,
    Select { segment: SegmentId },
    /// Drive whatever segment is selected
    Drive { direction: Direction },
    /// Look at the host's last pointer hit
    Aim,
    LookAt { target: [f64; 3] },
    Rotate { segment: SegmentId, angle: f64, axis: Axis },
    Walk { speed: f64 },
    Reset,
}

/// What a drive command resolves to for the selected segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Walk(f64),
    Rotate(SegmentId, f64, Axis),
}

/// Control table. Up/Down walks the torso and bends limbs about X;
/// Left/Right turns the torso or head about Y and raises arms about Z.
pub fn control_action(
    segment: SegmentId,
    direction: Direction,
    controls: &ControlSettings,
) -> Option<Action> {
    use Direction::*;

    let sign = match direction {
        Up | Left => 1.0,
        Down | Right => -1.0,
    };
    match (segment, direction) {
        (SegmentId::Torso, Up | Down) => Some(Action::Walk(sign * controls.move_speed)),
        (SegmentId::Torso | SegmentId::Head, Left | Right) => {
            Some(Action::Rotate(segment, sign * controls.turn_step, Axis::Y))
        }
        (SegmentId::Head, Up | Down) => None,
        (_, Up | Down) => Some(Action::Rotate(segment, -sign * controls.limb_step, Axis::X)),
        (arm, Left | Right) if arm.is_arm() => {
            Some(Action::Rotate(arm, -sign * controls.limb_step, Axis::Z))
        }
        _ => None,
    }
}

fn one() -> u32 {
    1
}

/// A command and how many consecutive frames it runs for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub command: Command,
    #[serde(default = "one")]
    pub repeat: u32,
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>, RigError> {
    Ok(serde_json::from_str(text)?)
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>, RigError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        RigError::new("script-read")
            .with_arg("path", path.display())
            .push_std(e)
    })?;
    parse_script(&text).map_err(|e| {
        RigError::new("script-parse")
            .with_arg("path", path.display())
            .push_rig(e)
    })
}
