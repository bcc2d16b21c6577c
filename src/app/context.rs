use super::command::{Action, Command, control_action};
use super::input::{KeyBindings, KeyboardState};
use super::selection::Selection;
use crate::animation::{LookAtOutcome, PhaseBand, Walker, look_at};
use crate::scene::SceneGraph;
use crate::settings::RigSettings;
use crate::skeleton::{Robot, SegmentId};
use nalgebra_glm as glm;
use serde::Serialize;

/// Read-only summary for hosts and the CLI
#[derive(Debug, Clone, Serialize)]
pub struct Status {
    pub selected: SegmentId,
    pub facing: [f64; 3],
    pub position: [f64; 3],
    pub ground_offset: f64,
    pub cycle_position: u32,
    pub cycle_units: i64,
    pub band: PhaseBand,
}

/// Everything the per-frame update touches, owned in one place
pub struct AppContext {
    robot: Robot,
    walker: Walker,
    selection: Selection,
    settings: RigSettings,
    pointer_target: Option<glm::DVec3>,
}

impl AppContext {
    pub fn new(settings: RigSettings) -> Self {
        Self {
            robot: Robot::new(&settings.body),
            walker: Walker::new(settings.walk.clone()),
            selection: Selection::new(),
            settings,
            pointer_target: None,
        }
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn walker(&self) -> &Walker {
        &self.walker
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn settings(&self) -> &RigSettings {
        &self.settings
    }

    pub fn selectable_segments(&self) -> &[SegmentId] {
        self.selection.items()
    }

    /// Latest pointer hit from the host's raycast; `None` when it misses
    pub fn set_pointer_target(&mut self, target: Option<glm::DVec3>) {
        self.pointer_target = target;
    }

    pub fn pointer_target(&self) -> Option<glm::DVec3> {
        self.pointer_target
    }

    pub fn handle(&mut self, command: &Command) {
        match command {
            Command::SelectNext => {
                let id = self.selection.next();
                log::info!("{} selected", id.label());
            }
            Command::SelectPrevious => {
                let id = self.selection.previous();
                log::info!("{} selected", id.label());
            }
            Command::Select { segment } => {
                if self.selection.select(*segment) {
                    log::info!("{} selected", segment.label());
                }
            }
            Command::Drive { direction } => {
                let selected = self.selection.current();
                match control_action(selected, *direction, &self.settings.controls) {
                    Some(action) => self.perform(action),
                    None => log::debug!("{direction:?} does nothing for {selected}"),
                }
            }
            Command::Aim => match self.pointer_target {
                Some(target) => {
                    self.look_at(&target);
                }
                None => log::debug!("Aim without a pointer target"),
            },
            Command::LookAt { target } => {
                self.look_at(&glm::vec3(target[0], target[1], target[2]));
            }
            Command::Rotate {
                segment,
                angle,
                axis,
            } => self.perform(Action::Rotate(*segment, *angle, *axis)),
            Command::Walk { speed } => self.perform(Action::Walk(*speed)),
            Command::Reset => {
                self.robot.reset();
                self.walker.reset();
                log::info!("Pose reset");
            }
        }
    }

    fn perform(&mut self, action: Action) {
        match action {
            Action::Walk(speed) => {
                self.walker.apply_translation(&mut self.robot, speed);
            }
            Action::Rotate(segment, angle, axis) => {
                self.robot.apply_rotation(segment, angle, axis);
            }
        }
    }

    pub fn look_at(&mut self, target: &glm::DVec3) -> LookAtOutcome {
        look_at(&mut self.robot, target, self.settings.look_at.max_iterations)
    }

    /// One update step: run the commands due for the current keys,
    /// then hand the fresh transforms to the scene
    pub fn frame(
        &mut self,
        bindings: &KeyBindings,
        keys: &mut KeyboardState,
        scene: &mut dyn SceneGraph,
    ) {
        for command in bindings.commands_for(keys) {
            self.handle(&command);
        }
        keys.end_frame();
        self.robot.publish(scene);
    }

    pub fn status(&self) -> Status {
        let facing = self.robot.facing();
        let position = self.robot.position();
        let cycle = self.walker.cycle();
        Status {
            selected: self.selection.current(),
            facing: [facing.x, facing.y, facing.z],
            position: [position.x, position.y, position.z],
            ground_offset: self.robot.ground_offset(),
            cycle_position: cycle.position(),
            cycle_units: cycle.total_units(),
            band: cycle.band(),
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(RigSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::command::Direction;
    use crate::math::{Axis, max_abs_diff, rotation_matrix};
    use crate::scene::SceneSnapshot;
    use winit::keyboard::KeyCode;

    #[test]
    fn drive_follows_selection() {
        let mut ctx = AppContext::default();
        ctx.handle(&Command::Drive {
            direction: Direction::Up,
        });
        assert!(ctx.robot().position().z > 0.0);

        ctx.handle(&Command::Select {
            segment: SegmentId::LeftArm,
        });
        let before = *ctx.robot().pose(SegmentId::LeftArm);
        ctx.handle(&Command::Drive {
            direction: Direction::Left,
        });
        let expected = before * rotation_matrix(-0.01, Axis::Z);
        assert!(max_abs_diff(ctx.robot().pose(SegmentId::LeftArm), &expected) < 1e-12);
        assert!(max_abs_diff(&expected, &before) > 0.0);
    }

    #[test]
    fn aim_needs_a_pointer_target() {
        let mut ctx = AppContext::default();
        ctx.handle(&Command::Aim);
        assert!((ctx.robot().facing().z - 1.0).abs() < 1e-9);

        ctx.set_pointer_target(Some(glm::vec3(4.0, 0.0, 0.0)));
        ctx.handle(&Command::Aim);
        assert!((ctx.robot().facing().x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn frame_runs_keys_and_publishes() {
        let mut ctx = AppContext::default();
        let bindings = KeyBindings::default();
        let mut keys = KeyboardState::new();
        let mut scene = SceneSnapshot::new();
        ctx.robot().attach(&mut scene);

        keys.on_key(KeyCode::KeyE, true);
        ctx.frame(&bindings, &mut keys, &mut scene);
        ctx.frame(&bindings, &mut keys, &mut scene);
        assert_eq!(ctx.selection().current(), SegmentId::Head);

        let head = scene.get(SegmentId::Head).unwrap();
        assert_eq!(head.updates, 3);
    }

    #[test]
    fn held_walk_key_advances_cycle() {
        let mut ctx = AppContext::default();
        let bindings = KeyBindings::default();
        let mut keys = KeyboardState::new();
        let mut scene = SceneSnapshot::new();
        ctx.robot().attach(&mut scene);

        keys.on_key(KeyCode::KeyW, true);
        for _ in 0..25 {
            ctx.frame(&bindings, &mut keys, &mut scene);
        }
        let status = ctx.status();
        assert_eq!(status.cycle_position, 25);
        assert_eq!(status.band, PhaseBand::Second);
        assert!((status.position[2] - 25.0 * 0.05).abs() < 1e-9);
    }

    #[test]
    fn reset_clears_pose_and_cycle() {
        let mut ctx = AppContext::default();
        ctx.handle(&Command::Walk { speed: 0.4 });
        ctx.handle(&Command::Reset);
        let status = ctx.status();
        assert_eq!(status.cycle_units, 0);
        assert_eq!(status.position[0], 0.0);
        assert_eq!(status.position[2], 0.0);
    }

    #[test]
    fn selectable_segments_are_in_menu_order() {
        let ctx = AppContext::default();
        assert_eq!(ctx.selectable_segments(), &SegmentId::ALL[..]);
    }
}
