use nalgebra_glm as glm;
use std::f64::consts::FRAC_PI_2;
use walkbot::app::{Command, Direction, load_script};
use walkbot::math::{identity, max_abs_diff, rotate};
use walkbot::{AppContext, Axis, RigSettings, Robot, SceneGraph, SceneSnapshot, SegmentId, look_at};

const EPS: f64 = 1e-9;

#[test]
fn rotations_cancel_on_every_axis() {
    for axis in [Axis::X, Axis::Y, Axis::Z] {
        let m = rotate(&rotate(&identity(), 1.234, axis), -1.234, axis);
        assert!(max_abs_diff(&m, &identity()) < EPS);
    }
}

#[test]
fn walk_turn_and_look_session() {
    let mut ctx = AppContext::new(RigSettings::default());
    let mut scene = SceneSnapshot::new();
    ctx.robot().attach(&mut scene);

    for _ in 0..30 {
        ctx.handle(&Command::Drive {
            direction: Direction::Up,
        });
        assert!(ctx.robot().foot_tips().lowest().abs() < EPS);
    }
    for _ in 0..45 {
        ctx.handle(&Command::Drive {
            direction: Direction::Down,
        });
        assert!(ctx.status().cycle_position < 80);
    }
    // 30 forward, 45 back
    assert_eq!(ctx.status().cycle_units, -15);
    assert_eq!(ctx.status().cycle_position, 65);

    let z = ctx.robot().position().z;
    ctx.handle(&Command::LookAt {
        target: [10.0, 0.0, z],
    });
    let facing = ctx.robot().facing();
    assert!((facing - glm::vec3(1.0, 0.0, 0.0)).norm() < 1e-6);

    ctx.robot().publish(&mut scene);
    assert_eq!(scene.len(), SegmentId::ALL.len());
}

#[test]
fn quarter_turn_example() {
    let mut robot = Robot::default();
    robot.turn(FRAC_PI_2);
    assert!((robot.facing() - glm::vec3(1.0, 0.0, 0.0)).norm() < EPS);
}

#[test]
fn look_at_straight_ahead_keeps_pose() {
    let mut robot = Robot::default();
    let before = *robot.world(SegmentId::Torso);
    let outcome = look_at(&mut robot, &glm::vec3(0.0, 1.0, 8.0), 100);
    assert_eq!(outcome.total_rotation, 0.0);
    assert_eq!(max_abs_diff(robot.world(SegmentId::Torso), &before), 0.0);
}

#[test]
fn ground_offset_cancels_penetration_for_static_poses() {
    let poses: [&[(SegmentId, f64, Axis)]; 3] = [
        &[],
        &[(SegmentId::RightLeg, -0.6, Axis::X), (SegmentId::RightLowerLeg, 0.9, Axis::X)],
        &[(SegmentId::LeftLeg, 0.4, Axis::X), (SegmentId::Torso, 0.7, Axis::Y)],
    ];
    for rotations in poses {
        let mut robot = Robot::default();
        robot.apply_rotations(rotations);
        assert!(robot.ground_offset() >= 0.0);
        assert!(robot.foot_tips().lowest().abs() < EPS);
    }
}

#[test]
fn scripts_drive_the_context() {
    let path = std::env::temp_dir().join(format!("walkbot-script-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"[
            { "command": { "type": "select", "segment": "head" } },
            { "command": { "type": "drive", "direction": "left" }, "repeat": 3 },
            { "command": { "type": "select_previous" } }
        ]"#,
    )
    .unwrap();
    let steps = load_script(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let mut ctx = AppContext::default();
    for step in &steps {
        for _ in 0..step.repeat {
            ctx.handle(&step.command);
        }
    }
    assert_eq!(ctx.selection().current(), SegmentId::Torso);
    // Head turns do not move the torso
    assert!((ctx.robot().facing() - glm::vec3(0.0, 0.0, 1.0)).norm() < EPS);
}

#[test]
fn missing_script_is_an_error() {
    let err = load_script(std::path::Path::new("/definitely/not/here.json")).unwrap_err();
    assert_eq!(err.key, "script-read");
}

struct CountingScene(usize);

impl SceneGraph for CountingScene {
    fn add_renderable(&mut self, _: SegmentId, _: walkbot::skeleton::Primitive) {}
    fn set_transform(&mut self, _: SegmentId, _: &glm::DMat4) {
        self.0 += 1;
    }
}

#[test]
fn hosts_can_bring_their_own_scene() {
    let robot = Robot::default();
    let mut scene = CountingScene(0);
    robot.publish(&mut scene);
    assert_eq!(scene.0, 10);
}
