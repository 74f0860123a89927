//! Shared types, enums, and constants.
//!
//! All types that cross module boundaries live here: the input event
//! alphabet, list items, and the styled-span primitives renderers produce.

use bitflags::bitflags;
use serde::Deserialize;

// ============================================================================
// Input Events
// ============================================================================

/// A decoded key event. Anything that is not a named control sequence arrives
/// as `Text` and is inserted verbatim by the text editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Interrupt,
    Backspace,
    Delete,
    Space,
    Text(String),
}

impl InputEvent {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// True when this event is the single character `c` typed as text.
    pub fn is_char(&self, c: char) -> bool {
        match self {
            Self::Text(s) => {
                let mut chars = s.chars();
                chars.next() == Some(c) && chars.next().is_none()
            }
            _ => false,
        }
    }
}

// ============================================================================
// Items
// ============================================================================

/// One entry of a selectable collection.
///
/// Identity is `key` when present, otherwise `value`. The label is display
/// text only and never takes part in identity.
#[derive(Debug, Clone, Deserialize)]
pub struct Item<V> {
    #[serde(default)]
    pub key: Option<String>,
    pub label: String,
    pub value: V,
}

impl<V> Item<V> {
    pub fn new(label: impl Into<String>, value: V) -> Self {
        Self {
            key: None,
            label: label.into(),
            value,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl<V: PartialEq> Item<V> {
    pub fn same_item(&self, other: &Item<V>) -> bool {
        match (&self.key, &other.key) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.value == other.value,
            _ => false,
        }
    }
}

// ============================================================================
// Color Encoding (u32)
// ============================================================================
//
// Bits 31-24: Mode tag
//   0x00 = Default (terminal default)
//   0x01 = RGB truecolor (bits 23-0 = 0xRRGGBB)
//   0x02 = Indexed (bits 7-0 = palette index 0-255)

pub const COLOR_DEFAULT: u32 = 0x00000000;
pub const COLOR_GREEN: u32 = 0x02000002;
pub const COLOR_BLUE: u32 = 0x02000004;

pub fn color_tag(color: u32) -> u8 {
    ((color >> 24) & 0xFF) as u8
}

pub fn color_to_crossterm(color: u32) -> Option<crossterm::style::Color> {
    match color_tag(color) {
        0x00 => None,
        0x01 => {
            let r = ((color >> 16) & 0xFF) as u8;
            let g = ((color >> 8) & 0xFF) as u8;
            let b = (color & 0xFF) as u8;
            Some(crossterm::style::Color::Rgb { r, g, b })
        }
        0x02 => {
            let index = (color & 0xFF) as u8;
            Some(crossterm::style::Color::AnsiValue(index))
        }
        _ => None, // Invalid tag: treat as Default
    }
}

// ============================================================================
// Cell Attributes (bitflags)
// ============================================================================

bitflags! {
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CellAttrs: u8 {
        const BOLD    = 0b0000_0001;
        const DIM     = 0b0000_0010;
        const INVERSE = 0b0000_0100;
    }
}

// ============================================================================
// Styled Span (renderer output)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub attrs: CellAttrs,
    pub fg: u32,
}

impl StyledSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attrs: CellAttrs::empty(),
            fg: COLOR_DEFAULT,
        }
    }

    pub fn colored(text: impl Into<String>, fg: u32) -> Self {
        Self {
            text: text.into(),
            attrs: CellAttrs::empty(),
            fg,
        }
    }

    pub fn with_attrs(mut self, attrs: CellAttrs) -> Self {
        self.attrs |= attrs;
        self
    }
}

/// A rendered row.
pub type Line = Vec<StyledSpan>;

/// Concatenated text of a line, ignoring styling.
pub fn line_text(line: &[StyledSpan]) -> String {
    line.iter().map(|s| s.text.as_str()).collect()
}
