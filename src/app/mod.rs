// Application layer: owns the figure and turns input into pose changes

mod command;
mod context;
mod input;
mod selection;

pub use command::{Action, Command, Direction, ScriptStep, control_action, load_script, parse_script};
pub use context::{AppContext, Status};
pub use input::{Binding, KeyBindings, KeyboardState, Trigger};
pub use selection::Selection;
