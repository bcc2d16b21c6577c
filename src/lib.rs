// Posable humanoid figure: pose composition, walk cycle, look-at and controls

pub mod animation;
pub mod app;
pub mod error;
pub mod math;
pub mod scene;
pub mod settings;
pub mod skeleton;

pub use animation::{LookAtOutcome, WalkCycle, Walker, look_at};
pub use app::{AppContext, Command, KeyBindings, KeyboardState};
pub use error::RigError;
pub use math::Axis;
pub use scene::{SceneGraph, SceneSnapshot};
pub use settings::RigSettings;
pub use skeleton::{Robot, SegmentId};

pub const CONFY_APP_NAME: &str = "walkbot";
