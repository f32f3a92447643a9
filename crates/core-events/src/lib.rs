//! Pointer and key event types delivered to the selection engine.
//!
//! The window system adapter (outside this workspace) converts native
//! events into these before handing them to a session or widget. Pointer
//! positions are viewport pixels; timestamps are monotonic milliseconds.

use std::fmt;
use std::str::FromStr;

use core_layout::Point;

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const CTRL  = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const SHIFT = 0b0000_0100;
        const SUPER = 0b0000_1000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pos: Point,
    pub button: PointerButton,
    pub time_ms: u64,
}

impl PointerEvent {
    pub fn down(pos: Point, time_ms: u64) -> Self {
        Self {
            kind: PointerKind::Down,
            pos,
            button: PointerButton::Primary,
            time_ms,
        }
    }

    pub fn moved(pos: Point, time_ms: u64) -> Self {
        Self {
            kind: PointerKind::Move,
            ..Self::down(pos, time_ms)
        }
    }

    pub fn up(pos: Point, time_ms: u64) -> Self {
        Self {
            kind: PointerKind::Up,
            ..Self::down(pos, time_ms)
        }
    }
}

/// Logical key identity, independent of keyboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySym {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

/// A key press. `text` carries committed input (typed characters, IME
/// commits) when the platform produced any; it is never logged verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub sym: KeySym,
    pub text: Option<String>,
    pub mods: Modifiers,
}

impl KeyEvent {
    pub fn new(sym: KeySym, mods: Modifiers) -> Self {
        Self {
            sym,
            text: None,
            mods,
        }
    }

    /// A printable key whose committed text is the character itself.
    pub fn char(c: char) -> Self {
        Self {
            sym: KeySym::Char(c),
            text: Some(c.to_string()),
            mods: Modifiers::empty(),
        }
    }

    /// Committed text with no meaningful key identity (IME commit, paste).
    pub fn commit(text: impl Into<String>) -> Self {
        let text = text.into();
        let sym = KeySym::Char(text.chars().next().unwrap_or(' '));
        Self {
            sym,
            text: Some(text),
            mods: Modifiers::empty(),
        }
    }

    pub fn with_mods(mut self, mods: Modifiers) -> Self {
        self.mods = mods;
        self
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, flag) in [
            ("Ctrl", Modifiers::CTRL),
            ("Alt", Modifiers::ALT),
            ("Shift", Modifiers::SHIFT),
            ("Super", Modifiers::SUPER),
        ] {
            if self.mods.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        match self.sym {
            KeySym::Char(_) => f.write_str("Char"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseKeyError {
    #[error("empty key chord")]
    Empty,
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),
    #[error("unknown key `{0}`")]
    UnknownKey(String),
}

impl FromStr for KeySym {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(KeySym::Char(c));
        }
        let sym = match s.to_ascii_lowercase().as_str() {
            "enter" | "return" => KeySym::Enter,
            "esc" | "escape" => KeySym::Escape,
            "backspace" => KeySym::Backspace,
            "delete" | "del" => KeySym::Delete,
            "tab" => KeySym::Tab,
            "left" => KeySym::Left,
            "right" => KeySym::Right,
            "up" => KeySym::Up,
            "down" => KeySym::Down,
            "home" => KeySym::Home,
            "end" => KeySym::End,
            "space" => KeySym::Char(' '),
            "" => return Err(ParseKeyError::Empty),
            _ => return Err(ParseKeyError::UnknownKey(s.to_string())),
        };
        Ok(sym)
    }
}

/// Parse a chord such as `Ctrl+Shift+Left` or `a`. The key is the last
/// `+`-separated part; a lone `+` is the plus key.
pub fn parse_chord(chord: &str) -> Result<KeyEvent, ParseKeyError> {
    let chord = chord.trim();
    if chord.is_empty() {
        return Err(ParseKeyError::Empty);
    }
    let (prefix, key) = match chord.strip_suffix("++") {
        Some(rest) => (rest, "+"),
        None if chord == "+" => ("", "+"),
        None => chord.rsplit_once('+').unwrap_or(("", chord)),
    };
    let mut mods = Modifiers::empty();
    for part in prefix.split('+').filter(|p| !p.is_empty()) {
        mods |= match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => Modifiers::CTRL,
            "alt" => Modifiers::ALT,
            "shift" => Modifiers::SHIFT,
            "super" | "meta" => Modifiers::SUPER,
            _ => return Err(ParseKeyError::UnknownModifier(part.to_string())),
        };
    }
    let sym: KeySym = key.parse()?;
    let text = match sym {
        KeySym::Char(c) if !mods.intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER) => {
            Some(c.to_string())
        }
        _ => None,
    };
    Ok(KeyEvent { sym, text, mods })
}
