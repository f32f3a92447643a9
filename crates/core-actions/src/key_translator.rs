//! KeyTranslator: key event -> [`EditAction`].
//!
//! Stateless apart from the `multiline` flag: single-line fields (run
//! dialog, settings entries) ignore Enter so the surrounding surface can
//! treat it as "submit".
//!
//! Table:
//! * printable text without Ctrl/Alt/Super -> `InsertText` (NFC);
//! * Backspace / Delete, Ctrl for whole words;
//! * Left / Right (Ctrl by word), Home / End (Ctrl for document edges),
//!   Shift extends the selection;
//! * Ctrl+A select all, Ctrl+Z undo, Ctrl+Y or Ctrl+Shift+Z redo;
//! * Enter -> newline when multiline.

use crate::{EditAction, Motion};
use core_events::{KeyEvent, KeySym, Modifiers};
use core_text::segment::normalize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyTranslator {
    multiline: bool,
}

impl KeyTranslator {
    pub fn new(multiline: bool) -> Self {
        Self { multiline }
    }

    pub fn single_line() -> Self {
        Self::new(false)
    }

    pub fn multiline() -> Self {
        Self::new(true)
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn translate(&self, key: &KeyEvent) -> Option<EditAction> {
        let ctrl = key.mods.contains(Modifiers::CTRL);
        let shift = key.mods.contains(Modifiers::SHIFT);
        let command = key.mods.intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER);

        let action = match key.sym {
            KeySym::Char(c) if ctrl => match c.to_ascii_lowercase() {
                'a' => EditAction::SelectAll,
                'z' if shift || c == 'Z' => EditAction::Redo,
                'z' => EditAction::Undo,
                'y' => EditAction::Redo,
                _ => return None,
            },
            KeySym::Char(_) if command => return None,
            KeySym::Char(c) => {
                let text = match key.text.as_deref() {
                    Some(t) => normalize(t),
                    None => c.to_string(),
                };
                let text: String = text.chars().filter(|c| !c.is_control()).collect();
                if text.is_empty() {
                    return None;
                }
                EditAction::InsertText(text)
            }
            KeySym::Enter if self.multiline && !command => EditAction::InsertNewline,
            KeySym::Backspace => EditAction::DeleteBackward { word: ctrl },
            KeySym::Delete => EditAction::DeleteForward { word: ctrl },
            KeySym::Left => movement(if ctrl { Motion::WordLeft } else { Motion::Left }, shift),
            KeySym::Right => movement(if ctrl { Motion::WordRight } else { Motion::Right }, shift),
            KeySym::Home => movement(if ctrl { Motion::DocStart } else { Motion::Home }, shift),
            KeySym::End => movement(if ctrl { Motion::DocEnd } else { Motion::End }, shift),
            KeySym::Enter | KeySym::Escape | KeySym::Tab | KeySym::Up | KeySym::Down => {
                return None;
            }
        };
        Some(action)
    }
}

fn movement(motion: Motion, extend: bool) -> EditAction {
    EditAction::Move { motion, extend }
}
