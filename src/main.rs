use anyhow::Context;
use serde::Serialize;
use std::path::PathBuf;
use walkbot::app::{Command, Direction, ScriptStep, load_script};
use walkbot::{AppContext, RigSettings, SceneSnapshot, SegmentId};

#[derive(Serialize)]
struct Report<'a> {
    status: walkbot::app::Status,
    scene: &'a SceneSnapshot,
}

/// Walk forward, turn, raise an arm, then look at a point off to the side
fn demo_script() -> Vec<ScriptStep> {
    let step = |command, repeat| ScriptStep { command, repeat };
    vec![
        step(Command::Drive { direction: Direction::Up }, 40),
        step(Command::Drive { direction: Direction::Left }, 5),
        step(Command::Select { segment: SegmentId::LeftArm }, 1),
        step(Command::Drive { direction: Direction::Up }, 60),
        step(Command::LookAt { target: [3.0, 0.0, -2.0] }, 1),
    ]
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Parse command line arguments
    let mut script_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut use_defaults = false;
    let mut save = false;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--defaults" => use_defaults = true,
            "--save" => save = true,
            "--config" => {
                let path = args.next().context("--config needs a file path")?;
                config_path = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                println!("usage: walkbot [--defaults] [--config FILE] [--save] [SCRIPT.json]");
                return Ok(());
            }
            _ => script_path = Some(PathBuf::from(arg)),
        }
    }

    let settings = match (&config_path, use_defaults) {
        (_, true) => RigSettings::default(),
        (Some(path), false) => RigSettings::load_from(path)?,
        (None, false) => RigSettings::load(),
    };
    if save {
        match &config_path {
            Some(path) => settings.save_to(path)?,
            None => settings.save()?,
        }
        log::info!("Settings saved");
    }

    let steps = match &script_path {
        Some(path) => load_script(path)
            .with_context(|| format!("Failed to load script '{}'", path.display()))?,
        None => {
            log::info!("No script given, running the demo");
            demo_script()
        }
    };

    let mut ctx = AppContext::new(settings);
    let mut scene = SceneSnapshot::new();
    ctx.robot().attach(&mut scene);

    let mut frames = 0u64;
    for (i, step) in steps.iter().enumerate() {
        log::debug!("Step {i}: {:?} x{}", step.command, step.repeat);
        for _ in 0..step.repeat {
            ctx.handle(&step.command);
            ctx.robot().publish(&mut scene);
            frames += 1;
        }
    }
    log::info!("Ran {} step(s) over {frames} frame(s)", steps.len());

    let report = Report {
        status: ctx.status(),
        scene: &scene,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
