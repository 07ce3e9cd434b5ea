/// Keyboard bindings for camera movement
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use wf3d_core::Movement;

/// What a key press asks the host to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Move(Movement),
    Quit,
}

/// Key assigned to each camera move.
///
/// The defaults are laid out for AZERTY keyboards (`z`/`q`/`s`/`d` plus
/// `a`/`e` for up/down); arrow keys always move in the horizontal plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub forward: char,
    pub backward: char,
    pub left: char,
    pub right: char,
    pub up: char,
    pub down: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: 'z',
            backward: 's',
            left: 'q',
            right: 'd',
            up: 'a',
            down: 'e',
        }
    }
}

impl KeyBindings {
    /// QWERTY layout: `w`/`a`/`s`/`d`, `r`/`f` for up/down
    pub fn qwerty() -> Self {
        Self {
            forward: 'w',
            backward: 's',
            left: 'a',
            right: 'd',
            up: 'r',
            down: 'f',
        }
    }

    pub fn movement_for(&self, key: char) -> Option<Movement> {
        let key = key.to_ascii_lowercase();
        [
            (self.forward, Movement::Forward),
            (self.backward, Movement::Backward),
            (self.left, Movement::Left),
            (self.right, Movement::Right),
            (self.up, Movement::Up),
            (self.down, Movement::Down),
        ]
        .into_iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, movement)| movement)
    }

    pub fn resolve(&self, event: &KeyEvent) -> Option<InputAction> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        match event.code {
            KeyCode::Esc => Some(InputAction::Quit),
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(InputAction::Quit)
            }
            KeyCode::Up => Some(InputAction::Move(Movement::Forward)),
            KeyCode::Down => Some(InputAction::Move(Movement::Backward)),
            KeyCode::Left => Some(InputAction::Move(Movement::Left)),
            KeyCode::Right => Some(InputAction::Move(Movement::Right)),
            KeyCode::Char(c) => self.movement_for(c).map(InputAction::Move),
            _ => None,
        }
    }

    /// One-line summary for the status overlay
    pub fn legend(&self) -> String {
        format!(
            "{}{}{}{}/Arrows=Move {}/{}=Up/Down Esc=Quit",
            self.forward.to_ascii_uppercase(),
            self.left.to_ascii_uppercase(),
            self.backward.to_ascii_uppercase(),
            self.right.to_ascii_uppercase(),
            self.up.to_ascii_uppercase(),
            self.down.to_ascii_uppercase(),
        )
    }
}
