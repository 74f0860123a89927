//! InputSource trait + CrosstermSource implementation.
//!
//! Sessions and widgets depend on this trait, not on crossterm directly.
//! This enables headless and mock sources for testing.

use std::collections::VecDeque;
use std::io::Write;
use std::time::Duration;

use crate::decode::decode_crossterm;
use crate::error::{InputError, Result};
use crate::types::{color_to_crossterm, CellAttrs, InputEvent, StyledSpan};

// ============================================================================
// InputSource Trait
// ============================================================================

pub trait InputSource {
    fn enable_raw_mode(&mut self) -> Result<()>;
    fn disable_raw_mode(&mut self) -> Result<()>;
    /// Wait up to `timeout` for input and return every decoded event ready.
    fn read_events(&mut self, timeout: Duration) -> Result<Vec<InputEvent>>;

    /// Downcast support for test code.
    #[cfg(test)]
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

// ============================================================================
// CrosstermSource
// ============================================================================

#[derive(Debug, Default)]
pub struct CrosstermSource {
    raw: bool,
}

impl CrosstermSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputSource for CrosstermSource {
    fn enable_raw_mode(&mut self) -> Result<()> {
        use crossterm::{event::EnableBracketedPaste, terminal, ExecutableCommand};

        terminal::enable_raw_mode().map_err(|e| InputError::Terminal(format!("raw mode: {e}")))?;
        undo_on_error(
            || {
                std::io::stdout()
                    .execute(EnableBracketedPaste)
                    .map(|_| ())
                    .map_err(|e| InputError::Terminal(format!("bracketed paste: {e}")))
            },
            || {
                terminal::disable_raw_mode()
                    .map_err(|e| InputError::Terminal(format!("disable raw mode: {e}")))
            },
        )?;
        self.raw = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        use crossterm::{event::DisableBracketedPaste, terminal, ExecutableCommand};

        if !self.raw {
            return Ok(());
        }
        self.raw = false;
        let paste = std::io::stdout()
            .execute(DisableBracketedPaste)
            .map(|_| ())
            .map_err(|e| InputError::Terminal(format!("bracketed paste: {e}")));
        terminal::disable_raw_mode()
            .map_err(|e| InputError::Terminal(format!("disable raw mode: {e}")))?;
        paste
    }

    fn read_events(&mut self, timeout: Duration) -> Result<Vec<InputEvent>> {
        use crossterm::event;

        let mut events = Vec::new();
        if event::poll(timeout)? {
            while event::poll(Duration::ZERO)? {
                if let Some(decoded) = decode_crossterm(&event::read()?) {
                    events.push(decoded);
                }
            }
        }
        Ok(events)
    }

    #[cfg(test)]
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl Drop for CrosstermSource {
    fn drop(&mut self) {
        if let Err(e) = self.disable_raw_mode() {
            tracing::warn!(error = %e, "failed to leave raw mode on drop");
        }
    }
}

/// Run a setup step that follows entering raw mode. If it fails, `undo`
/// leaves raw mode again before the step's error is returned.
fn undo_on_error(
    step: impl FnOnce() -> Result<()>,
    undo: impl FnOnce() -> Result<()>,
) -> Result<()> {
    if let Err(e) = step() {
        if let Err(undo_err) = undo() {
            tracing::warn!(error = %undo_err, "failed to leave raw mode after setup error");
        }
        return Err(e);
    }
    Ok(())
}

// ============================================================================
// HeadlessSource (for CI and host-side tests)
// ============================================================================

/// Replays a scripted queue of events; raw mode is tracked but never touches
/// a terminal.
#[derive(Debug, Default)]
pub struct HeadlessSource {
    pub raw: bool,
    pub queue: VecDeque<InputEvent>,
}

impl HeadlessSource {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            raw: false,
            queue: events.into_iter().collect(),
        }
    }
}

impl InputSource for HeadlessSource {
    fn enable_raw_mode(&mut self) -> Result<()> {
        self.raw = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        self.raw = false;
        Ok(())
    }

    fn read_events(&mut self, _timeout: Duration) -> Result<Vec<InputEvent>> {
        Ok(self.queue.drain(..).collect())
    }

    #[cfg(test)]
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

// ============================================================================
// MockSource (for Rust unit tests only)
// ============================================================================

#[cfg(test)]
pub struct MockSource {
    /// Every raw-mode toggle, in order (`true` = enabled).
    pub raw_log: std::rc::Rc<std::cell::RefCell<Vec<bool>>>,
    pub injected_events: Vec<InputEvent>,
    pub fail_enable: bool,
    pub fail_disable: bool,
}

#[cfg(test)]
impl MockSource {
    pub fn new() -> Self {
        Self {
            raw_log: Default::default(),
            injected_events: Vec::new(),
            fail_enable: false,
            fail_disable: false,
        }
    }
}

#[cfg(test)]
impl InputSource for MockSource {
    fn enable_raw_mode(&mut self) -> Result<()> {
        if self.fail_enable {
            return Err(InputError::Terminal("not a tty".to_string()));
        }
        self.raw_log.borrow_mut().push(true);
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        if self.fail_disable {
            return Err(InputError::Terminal("tty gone".to_string()));
        }
        self.raw_log.borrow_mut().push(false);
        Ok(())
    }

    fn read_events(&mut self, _timeout: Duration) -> Result<Vec<InputEvent>> {
        Ok(std::mem::take(&mut self.injected_events))
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

// ============================================================================
// Output
// ============================================================================

/// Queue rendered lines at the current cursor row, clearing each row first.
/// Leaves the cursor at the start of the first line so the next frame
/// overwrites this one.
pub fn write_lines(out: &mut impl Write, lines: &[Vec<StyledSpan>]) -> Result<()> {
    use crossterm::{
        cursor::{MoveToColumn, MoveToNextLine, MoveToPreviousLine},
        style::{Attribute, Color, Print, SetAttribute, SetForegroundColor},
        terminal::{Clear, ClearType},
        QueueableCommand,
    };

    for (row, line) in lines.iter().enumerate() {
        if row > 0 {
            out.queue(MoveToNextLine(1))?;
        }
        out.queue(MoveToColumn(0))?.queue(Clear(ClearType::CurrentLine))?;
        for span in line {
            let fg = color_to_crossterm(span.fg).unwrap_or(Color::Reset);
            out.queue(SetForegroundColor(fg))?;
            if span.attrs.contains(CellAttrs::BOLD) {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if span.attrs.contains(CellAttrs::DIM) {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
            if span.attrs.contains(CellAttrs::INVERSE) {
                out.queue(SetAttribute(Attribute::Reverse))?;
            }
            out.queue(Print(&span.text))?
                .queue(SetAttribute(Attribute::Reset))?;
        }
    }
    if lines.len() > 1 {
        out.queue(MoveToPreviousLine((lines.len() - 1) as u16))?;
    }
    out.flush()?;
    Ok(())
}
