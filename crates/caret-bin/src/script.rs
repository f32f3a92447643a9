//! Gesture scripts for `caret replay`.
//!
//! ```toml
//! [viewport]
//! width = 200.0
//! height = 100.0
//!
//! [[block]]
//! text = "alpha beta"
//!
//! [[event]]
//! kind = "down"
//! at_ms = 0
//! x = 12.0
//! y = 10.0
//!
//! [[event]]
//! kind = "key"
//! at_ms = 300
//! chord = "Ctrl+z"
//! ```
//!
//! Blocks without a `y` are stacked under the previous one. Event times are
//! milliseconds from the start of the replay and must not decrease.

use std::fs;
use std::path::{Path, PathBuf};

use core_events::{KeyEvent, ParseKeyError, PointerEvent, parse_chord};
use core_layout::Point;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("event {index}: key events need exactly one of `chord` or `text`")]
    KeySpec { index: usize },
    #[error("event {index}: {source}")]
    Chord {
        index: usize,
        #[source]
        source: ParseKeyError,
    },
    #[error("event {index}: at_ms {at_ms} is earlier than the previous event")]
    OutOfOrder { index: usize, at_ms: u64 },
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct ViewportSpec {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportSpec {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 400.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BlockSpec {
    pub text: String,
    pub x: Option<f32>,
    pub y: Option<f32>,
    /// Wrap width; defaults to the viewport width.
    pub width: Option<f32>,
    #[serde(default)]
    pub single_line: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RawEvent {
    Down { at_ms: u64, x: f32, y: f32 },
    Move { at_ms: u64, x: f32, y: f32 },
    Up { at_ms: u64, x: f32, y: f32 },
    Key {
        at_ms: u64,
        chord: Option<String>,
        text: Option<String>,
    },
    Wait { at_ms: u64 },
}

#[derive(Debug, Deserialize)]
struct RawScript {
    #[serde(default)]
    viewport: ViewportSpec,
    #[serde(default, rename = "block")]
    blocks: Vec<BlockSpec>,
    #[serde(default, rename = "event")]
    events: Vec<RawEvent>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Pointer(PointerEvent),
    Key { at_ms: u64, key: KeyEvent },
    /// Let time pass (auto-scroll keeps ticking).
    Wait { at_ms: u64 },
}

impl Step {
    pub fn at_ms(&self) -> u64 {
        match self {
            Step::Pointer(ev) => ev.time_ms,
            Step::Key { at_ms, .. } | Step::Wait { at_ms } => *at_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub viewport: ViewportSpec,
    pub blocks: Vec<BlockSpec>,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn parse(content: &str) -> Result<Self, ScriptError> {
        let raw: RawScript = toml::from_str(content)?;
        let mut steps = Vec::with_capacity(raw.events.len());
        let mut last = 0u64;
        for (index, event) in raw.events.into_iter().enumerate() {
            let step = lower(index, event)?;
            let at_ms = step.at_ms();
            if at_ms < last {
                return Err(ScriptError::OutOfOrder { index, at_ms });
            }
            last = at_ms;
            steps.push(step);
        }
        Ok(Self {
            viewport: raw.viewport,
            blocks: raw.blocks,
            steps,
        })
    }

    pub fn read(path: &Path) -> Result<Self, ScriptError> {
        let content = fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }
}

fn lower(index: usize, event: RawEvent) -> Result<Step, ScriptError> {
    Ok(match event {
        RawEvent::Down { at_ms, x, y } => Step::Pointer(PointerEvent::down(Point::new(x, y), at_ms)),
        RawEvent::Move { at_ms, x, y } => Step::Pointer(PointerEvent::moved(Point::new(x, y), at_ms)),
        RawEvent::Up { at_ms, x, y } => Step::Pointer(PointerEvent::up(Point::new(x, y), at_ms)),
        RawEvent::Key { at_ms, chord, text } => {
            let key = match (chord, text) {
                (Some(chord), None) => {
                    parse_chord(&chord).map_err(|source| ScriptError::Chord { index, source })?
                }
                (None, Some(text)) if !text.is_empty() => KeyEvent::commit(text),
                _ => return Err(ScriptError::KeySpec { index }),
            };
            Step::Key { at_ms, key }
        }
        RawEvent::Wait { at_ms } => Step::Wait { at_ms },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::{KeySym, Modifiers, PointerKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_blocks_and_events() {
        let script = Script::parse(
            r#"
            [viewport]
            width = 120.0
            height = 60.0

            [[block]]
            text = "one"

            [[block]]
            text = "two"
            y = 40.0
            single_line = true

            [[event]]
            kind = "down"
            at_ms = 0
            x = 1.0
            y = 2.0

            [[event]]
            kind = "key"
            at_ms = 10
            chord = "Ctrl+z"

            [[event]]
            kind = "key"
            at_ms = 10
            text = "hi"

            [[event]]
            kind = "wait"
            at_ms = 500
            "#,
        )
        .unwrap();
        assert_eq!(script.viewport, ViewportSpec { width: 120.0, height: 60.0 });
        assert_eq!(script.blocks.len(), 2);
        assert_eq!(script.blocks[1].y, Some(40.0));
        assert!(script.blocks[1].single_line);
        assert_eq!(script.steps.len(), 4);
        let Step::Pointer(down) = &script.steps[0] else {
            panic!("expected pointer step");
        };
        assert_eq!(down.kind, PointerKind::Down);
        assert_eq!(down.pos, Point::new(1.0, 2.0));
        let Step::Key { key, .. } = &script.steps[1] else {
            panic!("expected key step");
        };
        assert_eq!(key.sym, KeySym::Char('z'));
        assert!(key.mods.contains(Modifiers::CTRL));
        assert_eq!(script.steps[2], Step::Key { at_ms: 10, key: KeyEvent::commit("hi") });
        assert_eq!(script.steps[3].at_ms(), 500);
    }

    #[test]
    fn empty_script_uses_default_viewport() {
        let script = Script::parse("").unwrap();
        assert_eq!(script.viewport, ViewportSpec::default());
        assert!(script.blocks.is_empty());
        assert!(script.steps.is_empty());
    }

    #[test]
    fn rejects_decreasing_times() {
        let err = Script::parse(
            r#"
            [[event]]
            kind = "wait"
            at_ms = 20
            [[event]]
            kind = "wait"
            at_ms = 10
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ScriptError::OutOfOrder { index: 1, at_ms: 10 }));
    }

    #[test]
    fn key_needs_one_source() {
        let both = r#"
            [[event]]
            kind = "key"
            at_ms = 0
            chord = "a"
            text = "a"
        "#;
        assert!(matches!(Script::parse(both), Err(ScriptError::KeySpec { index: 0 })));
        let bad = r#"
            [[event]]
            kind = "key"
            at_ms = 0
            chord = "Hyper+a"
        "#;
        assert!(matches!(Script::parse(bad), Err(ScriptError::Chord { index: 0, .. })));
    }

    #[test]
    fn unknown_kind_is_parse_error() {
        let err = Script::parse("[[event]]\nkind = \"fly\"\nat_ms = 0\n").unwrap_err();
        assert!(matches!(err, ScriptError::Parse(_)));
    }

    #[test]
    fn read_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Script::read(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ScriptError::Read { .. }));
    }
}
