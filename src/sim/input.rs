//! Input identifiers and built-in commands
//!
//! Keys are raw platform key codes (SDL keycode values). Mouse buttons occupy
//! the codes 1..=5, which no keyboard key uses, so a button can hold an item
//! exactly like a key.

use serde::{Deserialize, Serialize};

/// Raw key or mouse-button code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputKey(pub i32);

impl InputKey {
    pub const MOUSE_LEFT: InputKey = InputKey(1);
    pub const MOUSE_MIDDLE: InputKey = InputKey(2);
    pub const MOUSE_RIGHT: InputKey = InputKey(3);
    pub const MOUSE_X1: InputKey = InputKey(4);
    pub const MOUSE_X2: InputKey = InputKey(5);

    pub const TAB: InputKey = InputKey(9);
    pub const RETURN: InputKey = InputKey(13);
    pub const ESCAPE: InputKey = InputKey(27);
    pub const SPACE: InputKey = InputKey(32);

    pub const W: InputKey = InputKey('w' as i32);
    pub const A: InputKey = InputKey('a' as i32);
    pub const S: InputKey = InputKey('s' as i32);
    pub const D: InputKey = InputKey('d' as i32);

    /// Key for a printable ASCII character (letters are stored lowercase)
    pub fn from_char(c: char) -> Self {
        InputKey(c.to_ascii_lowercase() as i32)
    }

    /// Key code for a mouse button
    pub fn mouse(button: i32) -> Self {
        InputKey(button)
    }

    pub fn is_mouse_button(self) -> bool {
        (Self::MOUSE_LEFT.0..=Self::MOUSE_X2.0).contains(&self.0)
    }
}

/// Human-readable name for a key or mouse button
pub fn input_name(key: InputKey) -> String {
    if key.is_mouse_button() {
        return match key {
            InputKey::MOUSE_LEFT => "Left Mouse",
            InputKey::MOUSE_MIDDLE => "Middle Mouse",
            InputKey::MOUSE_RIGHT => "Right Mouse",
            InputKey::MOUSE_X1 => "Mouse X1",
            InputKey::MOUSE_X2 => "Mouse X2",
            _ => "Unknown button",
        }
        .to_string();
    }

    match key {
        InputKey::TAB => "Tab".to_string(),
        InputKey::RETURN => "Return".to_string(),
        InputKey::ESCAPE => "Escape".to_string(),
        InputKey::SPACE => "Space".to_string(),
        InputKey(code) => match u8::try_from(code).ok().map(char::from) {
            Some(c) if c.is_ascii_graphic() => c.to_ascii_uppercase().to_string(),
            _ => "Unknown key or button".to_string(),
        },
    }
}

/// Built-in commands that are bound to keys like items but never leave the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    /// Quit to menu
    Menu,
    /// Hold to enter drop mode
    Drop,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::Up,
        Command::Down,
        Command::Left,
        Command::Right,
        Command::Menu,
        Command::Drop,
    ];

    /// Command token (also used as the command item's name)
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Up => "UP",
            Command::Down => "DOWN",
            Command::Left => "LEFT",
            Command::Right => "RIGHT",
            Command::Menu => "MENU",
            Command::Drop => "DROP",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(token))
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
