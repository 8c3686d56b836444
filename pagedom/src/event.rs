//! Input events as the document sees them, plus conversion from crossterm.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

/// Input event aimed at an element id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press. `target` is the focused element, if any.
    Key {
        target: Option<String>,
        key: Key,
        modifiers: Modifiers,
    },
    /// Button press on the element with `target` id.
    Click {
        target: Option<String>,
        button: MouseButton,
    },
}

impl Event {
    /// Key press without modifiers.
    pub fn key(key: Key) -> Self {
        Event::Key {
            target: None,
            key,
            modifiers: Modifiers::default(),
        }
    }

    /// Left click on the element with `target` id.
    pub fn click(target: impl Into<String>) -> Self {
        Event::Click {
            target: Some(target.into()),
            button: MouseButton::Left,
        }
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            Event::Key { target, .. } | Event::Click { target, .. } => target.as_deref(),
        }
    }
}

/// Keys the document distinguishes. Anything else is dropped at conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

impl Key {
    /// Map a crossterm key code. Function keys, media keys and the like
    /// have no counterpart.
    pub fn from_code(code: KeyCode) -> Option<Self> {
        let key = match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            _ => return None,
        };
        Some(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(button: crossterm::event::MouseButton) -> Self {
        match button {
            crossterm::event::MouseButton::Left => MouseButton::Left,
            crossterm::event::MouseButton::Right => MouseButton::Right,
            crossterm::event::MouseButton::Middle => MouseButton::Middle,
        }
    }
}

/// Convert a crossterm key press into a key event aimed at `target`.
/// Releases, repeats and unmapped keys yield None.
pub fn from_crossterm_key(key_event: &KeyEvent, target: Option<String>) -> Option<Event> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    Some(Event::Key {
        target,
        key: Key::from_code(key_event.code)?,
        modifiers: key_event.modifiers.into(),
    })
}

/// Convert a crossterm button press into a click on `target`, the element
/// found under the pointer by the caller. Other mouse activity yields None.
pub fn from_crossterm_mouse(mouse_event: &MouseEvent, target: Option<String>) -> Option<Event> {
    match mouse_event.kind {
        MouseEventKind::Down(button) => Some(Event::Click {
            target,
            button: button.into(),
        }),
        _ => None,
    }
}
