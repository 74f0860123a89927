//! Text Edit Module — single-line editor state machine.
//!
//! Responsibilities:
//! - Apply one `InputEvent` to a `TextEditState`, producing a new state
//! - Keep the cursor clamped to `[0, chars(value)]`
//! - Track the width of the last bulk (pasted) insertion for highlighting
//! - `TextInput` widget: options, focus gating, change/submit callbacks

use crate::config::TextInputOptions;
use crate::text_utils::{char_count, char_to_byte_idx};
use crate::types::InputEvent;

// ============================================================================
// TextEditState
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextEditState {
    value: String,
    cursor_offset: usize,
    cursor_width: usize,
}

/// What a single event did to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The event is not meant for the editor; state unchanged.
    Ignored,
    /// Enter: submit the current value; state unchanged.
    Submit,
    /// A new state was produced. `changed` is true when the value differs.
    Edited { changed: bool },
}

impl TextEditState {
    /// A state with the cursor placed after the last character.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor_offset = char_count(&value);
        Self {
            value,
            cursor_offset,
            cursor_width: 0,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor_offset(&self) -> usize {
        self.cursor_offset
    }

    pub fn cursor_width(&self) -> usize {
        self.cursor_width
    }

    /// Replace the value from outside (controlled input), keeping the cursor
    /// where it was when it still fits.
    pub fn with_value(&self, value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor_offset = self.cursor_offset.min(char_count(&value));
        Self {
            value,
            cursor_offset,
            cursor_width: 0,
        }
    }

    /// Apply one event. `movable_cursor` is false when arrows must not move
    /// the cursor (cursor hidden or a mask is set).
    pub fn apply(&self, event: &InputEvent, movable_cursor: bool) -> (Self, EditOutcome) {
        let mut offset = self.cursor_offset as isize;
        let mut value = self.value.clone();
        let mut width = 0;

        match event {
            InputEvent::Up | InputEvent::Down | InputEvent::Interrupt => {
                return (self.clone(), EditOutcome::Ignored);
            }
            InputEvent::Enter => return (self.clone(), EditOutcome::Submit),
            InputEvent::Left => {
                if movable_cursor {
                    offset -= 1;
                }
            }
            InputEvent::Right => {
                if movable_cursor {
                    offset += 1;
                }
            }
            InputEvent::Backspace | InputEvent::Delete => {
                if self.cursor_offset > 0 {
                    let start = char_to_byte_idx(&value, self.cursor_offset - 1);
                    let end = char_to_byte_idx(&value, self.cursor_offset);
                    value.replace_range(start..end, "");
                }
                offset -= 1;
            }
            InputEvent::Space => {
                insert_at(&mut value, self.cursor_offset, " ");
                offset += 1;
            }
            InputEvent::Text(chunk) => {
                insert_at(&mut value, self.cursor_offset, chunk);
                let len = char_count(chunk);
                offset += len as isize;
                if len > 1 {
                    width = len;
                }
            }
        }

        let cursor_offset = offset.clamp(0, char_count(&value) as isize) as usize;
        let changed = value != self.value;
        let next = Self {
            value,
            cursor_offset,
            cursor_width: width,
        };
        (next, EditOutcome::Edited { changed })
    }
}

fn insert_at(value: &mut String, char_idx: usize, chunk: &str) {
    let byte_idx = char_to_byte_idx(value, char_idx);
    value.insert_str(byte_idx, chunk);
}

// ============================================================================
// TextInput widget
// ============================================================================

pub type ChangeCallback = Box<dyn FnMut(&str)>;
pub type SubmitCallback = Box<dyn FnMut(&str)>;

/// Interactive single-line input.
///
/// Callbacks run synchronously inside `handle`. They must not feed another
/// event into this widget; `&mut self` already rules that out unless the
/// widget is shared through interior mutability, which is unsupported.
pub struct TextInput {
    state: TextEditState,
    options: TextInputOptions,
    on_change: Option<ChangeCallback>,
    on_submit: Option<SubmitCallback>,
}

impl TextInput {
    pub fn new(value: impl Into<String>, options: TextInputOptions) -> Self {
        Self {
            state: TextEditState::new(value),
            options,
            on_change: None,
            on_submit: None,
        }
    }

    pub fn on_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn on_submit(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_submit = Some(Box::new(f));
        self
    }

    pub fn state(&self) -> &TextEditState {
        &self.state
    }

    pub fn value(&self) -> &str {
        self.state.value()
    }

    pub fn options(&self) -> &TextInputOptions {
        &self.options
    }

    pub fn focused(&self) -> bool {
        self.options.focus
    }

    pub fn set_focus(&mut self, focus: bool) {
        self.options.focus = focus;
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.state = self.state.with_value(value);
    }

    fn movable_cursor(&self) -> bool {
        self.options.show_cursor && self.options.mask.is_none()
    }

    /// Route one event through the editor and fire callbacks.
    pub fn handle(&mut self, event: &InputEvent) -> EditOutcome {
        if !self.options.focus {
            return EditOutcome::Ignored;
        }
        tracing::trace!(?event, "text input event");

        let (next, outcome) = self.state.apply(event, self.movable_cursor());
        match outcome {
            EditOutcome::Ignored => {}
            EditOutcome::Submit => {
                if let Some(cb) = self.on_submit.as_mut() {
                    cb(self.state.value());
                }
            }
            EditOutcome::Edited { changed } => {
                self.state = next;
                if changed {
                    if let Some(cb) = self.on_change.as_mut() {
                        cb(self.state.value());
                    }
                }
            }
        }
        outcome
    }
}
