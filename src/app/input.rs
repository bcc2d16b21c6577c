// Keyboard state and default key map, in winit key codes

use super::command::{Command, Direction};
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// When a bound key fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Once, on the frame the key goes down
    Press,
    /// Every frame while the key is down
    Hold,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub key: KeyCode,
    pub trigger: Trigger,
    pub command: Command,
}

/// Held keys plus the keys that went down since the last frame
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
    pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_key(&mut self, key: KeyCode, down: bool) {
        if down {
            if self.held.insert(key) {
                self.pressed.insert(key);
            }
        } else {
            self.held.remove(&key);
        }
    }

    /// Feed a winit keyboard event
    pub fn on_key_event(&mut self, event: &KeyEvent) {
        self.on_physical_key(event.physical_key, event.state);
    }

    /// Unidentified keys are ignored
    pub fn on_physical_key(&mut self, key: PhysicalKey, state: ElementState) {
        if let PhysicalKey::Code(code) = key {
            self.on_key(code, state == ElementState::Pressed);
        }
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    pub fn was_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Forget this frame's press edges
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }

    /// Drop everything, e.g. when the window loses focus
    pub fn clear(&mut self) {
        self.held.clear();
        self.pressed.clear();
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<Binding>,
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bind a key, replacing any earlier binding for it
    pub fn bind(&mut self, key: KeyCode, trigger: Trigger, command: Command) {
        self.bindings.retain(|b| b.key != key);
        self.bindings.push(Binding {
            key,
            trigger,
            command,
        });
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Commands due this frame, in binding order
    pub fn commands_for(&self, keys: &KeyboardState) -> Vec<Command> {
        self.bindings
            .iter()
            .filter(|b| match b.trigger {
                Trigger::Press => keys.was_pressed(b.key),
                Trigger::Hold => keys.is_held(b.key),
            })
            .map(|b| b.command.clone())
            .collect()
    }
}

impl Default for KeyBindings {
    /// E/Q cycle the selection, W/S/A/D drive it, F looks at the pointer
    fn default() -> Self {
        let mut keys = Self::empty();
        keys.bind(KeyCode::KeyE, Trigger::Press, Command::SelectNext);
        keys.bind(KeyCode::KeyQ, Trigger::Press, Command::SelectPrevious);
        let drive = |direction| Command::Drive { direction };
        keys.bind(KeyCode::KeyW, Trigger::Hold, drive(Direction::Up));
        keys.bind(KeyCode::KeyS, Trigger::Hold, drive(Direction::Down));
        keys.bind(KeyCode::KeyA, Trigger::Hold, drive(Direction::Left));
        keys.bind(KeyCode::KeyD, Trigger::Hold, drive(Direction::Right));
        keys.bind(KeyCode::KeyF, Trigger::Hold, Command::Aim);
        keys
    }
}
