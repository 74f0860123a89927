//! Session Module — exclusive raw-input ownership and widget mounting.
//!
//! Raw mode is a process-wide terminal setting, so at most one widget may own
//! it at a time. Ownership is an explicit token: `SessionRegistry::acquire`
//! hands out an `InputSession`, and dropping (or releasing) the session
//! restores the terminal and frees the registry. Composite widgets hold one
//! session and route events to their children themselves.
//!
//! `Mount` ties a widget's lifetime to a session: events only reach the
//! widget while it is mounted and focused, and `unmount` (or drop) releases
//! everything synchronously.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use crate::autocomplete::AutoComplete;
use crate::error::{InputError, Result};
use crate::list::ListController;
use crate::terminal::InputSource;
use crate::text_edit::{EditOutcome, TextInput};
use crate::types::InputEvent;

// ============================================================================
// Registry & Session
// ============================================================================

static GLOBAL_REGISTRY: OnceLock<SessionRegistry> = OnceLock::new();

#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    owned: Arc<AtomicBool>,
}

impl SessionRegistry {
    /// A registry independent of the process-wide one.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry guarding the real terminal.
    pub fn global() -> &'static SessionRegistry {
        GLOBAL_REGISTRY.get_or_init(SessionRegistry::new)
    }

    pub fn is_owned(&self) -> bool {
        self.owned.load(Ordering::Acquire)
    }

    /// Take ownership of raw input through `source`. Fails with
    /// `SessionBusy` while another session is alive; if enabling raw mode
    /// fails the registry is left free.
    pub fn acquire(&self, source: Box<dyn InputSource>) -> Result<InputSession> {
        self.try_acquire(source).map_err(|(e, _)| e)
    }

    /// Like `acquire`, but a refused source comes back with the error so the
    /// caller can try again later.
    pub fn try_acquire(
        &self,
        mut source: Box<dyn InputSource>,
    ) -> std::result::Result<InputSession, Refused> {
        if self
            .owned
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err((InputError::SessionBusy, source));
        }
        if let Err(e) = source.enable_raw_mode() {
            self.owned.store(false, Ordering::Release);
            return Err((e, source));
        }
        tracing::debug!("input session acquired");
        Ok(InputSession {
            registry: self.clone(),
            source,
            active: true,
        })
    }
}

/// A source the registry would not take, with the reason.
pub type Refused = (InputError, Box<dyn InputSource>);

/// Stands in for the source once a session has handed it back.
struct Detached;

impl InputSource for Detached {
    fn enable_raw_mode(&mut self) -> Result<()> {
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        Ok(())
    }

    fn read_events(&mut self, _timeout: Duration) -> Result<Vec<InputEvent>> {
        Ok(Vec::new())
    }

    #[cfg(test)]
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

/// Proof of raw-input ownership. Dropping it restores the terminal.
pub struct InputSession {
    registry: SessionRegistry,
    source: Box<dyn InputSource>,
    active: bool,
}

impl InputSession {
    pub fn read_events(&mut self, timeout: Duration) -> Result<Vec<InputEvent>> {
        self.source.read_events(timeout)
    }

    /// Give up ownership. The source always comes back, ready for a later
    /// `acquire`; the second value reports whether raw mode was turned off.
    pub fn release(mut self) -> (Box<dyn InputSource>, Result<()>) {
        let restored = self.finish();
        tracing::debug!("input session released");
        (std::mem::replace(&mut self.source, Box::new(Detached)), restored)
    }

    /// Leave raw mode and free the registry. Runs at most once.
    fn finish(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let restored = self.source.disable_raw_mode();
        self.registry.owned.store(false, Ordering::Release);
        restored
    }

    #[cfg(test)]
    fn source_mut(&mut self) -> &mut Box<dyn InputSource> {
        &mut self.source
    }
}

impl Drop for InputSession {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        if let Err(e) = self.finish() {
            tracing::warn!(error = %e, "failed to restore terminal mode");
        }
        tracing::debug!("input session dropped");
    }
}

// ============================================================================
// Widget
// ============================================================================

/// Anything that consumes input events.
pub trait Widget {
    /// Handle one event. Returns true when the widget consumed it.
    fn handle_event(&mut self, event: &InputEvent) -> bool;
    fn set_focus(&mut self, focus: bool);
}

impl Widget for TextInput {
    fn handle_event(&mut self, event: &InputEvent) -> bool {
        !matches!(self.handle(event), EditOutcome::Ignored)
    }

    fn set_focus(&mut self, focus: bool) {
        TextInput::set_focus(self, focus);
    }
}

impl<V: Clone + PartialEq> Widget for ListController<V> {
    fn handle_event(&mut self, event: &InputEvent) -> bool {
        self.handle(event)
    }

    fn set_focus(&mut self, focus: bool) {
        ListController::set_focus(self, focus);
    }
}

impl<V: Clone + PartialEq + 'static> Widget for AutoComplete<V> {
    fn handle_event(&mut self, event: &InputEvent) -> bool {
        self.handle(event)
    }

    fn set_focus(&mut self, focus: bool) {
        AutoComplete::set_focus(self, focus);
    }
}

// ============================================================================
// Mount
// ============================================================================

enum Ownership {
    Active(InputSession),
    /// Focus lost: raw mode released, source kept for refocus.
    Parked(Box<dyn InputSource>),
    Unmounted,
}

/// A widget holding raw input for as long as it is mounted.
pub struct Mount<W: Widget> {
    widget: W,
    registry: SessionRegistry,
    ownership: Ownership,
}

impl<W: Widget> Mount<W> {
    pub fn new(
        registry: &SessionRegistry,
        source: Box<dyn InputSource>,
        widget: W,
    ) -> Result<Self> {
        let session = registry.acquire(source)?;
        Ok(Self {
            widget,
            registry: registry.clone(),
            ownership: Ownership::Active(session),
        })
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn is_mounted(&self) -> bool {
        !matches!(self.ownership, Ownership::Unmounted)
    }

    pub fn has_session(&self) -> bool {
        matches!(self.ownership, Ownership::Active(_))
    }

    /// Deliver one event. Dropped unless mounted and holding the session.
    pub fn dispatch(&mut self, event: &InputEvent) -> bool {
        match self.ownership {
            Ownership::Active(_) => self.widget.handle_event(event),
            _ => false,
        }
    }

    /// Read whatever input is ready and dispatch it. Returns the number of
    /// events the widget consumed.
    pub fn pump(&mut self, timeout: Duration) -> Result<usize> {
        let events = match &mut self.ownership {
            Ownership::Active(session) => session.read_events(timeout)?,
            _ => return Ok(0),
        };
        let mut consumed = 0;
        for event in &events {
            if self.dispatch(event) {
                consumed += 1;
            }
        }
        Ok(consumed)
    }

    /// Losing focus releases raw mode; regaining it re-acquires. A refocus
    /// that cannot take input (another session owns it, or raw mode fails)
    /// returns the error and leaves the mount parked, as does a failure to
    /// restore the terminal on focus loss.
    pub fn set_focus(&mut self, focus: bool) -> Result<()> {
        let active = matches!(self.ownership, Ownership::Active(_));
        let parked = matches!(self.ownership, Ownership::Parked(_));
        match (focus, active, parked) {
            (false, true, _) => {
                self.widget.set_focus(false);
                if let Ownership::Active(session) =
                    std::mem::replace(&mut self.ownership, Ownership::Unmounted)
                {
                    let (source, restored) = session.release();
                    self.ownership = Ownership::Parked(source);
                    restored?;
                }
            }
            (true, _, true) => {
                if let Ownership::Parked(source) =
                    std::mem::replace(&mut self.ownership, Ownership::Unmounted)
                {
                    match self.registry.try_acquire(source) {
                        Ok(session) => {
                            self.ownership = Ownership::Active(session);
                            self.widget.set_focus(true);
                        }
                        Err((e, source)) => {
                            self.ownership = Ownership::Parked(source);
                            return Err(e);
                        }
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Release input synchronously. Later events are dropped without
    /// reaching the widget.
    pub fn unmount(&mut self) {
        if let Ownership::Active(session) =
            std::mem::replace(&mut self.ownership, Ownership::Unmounted)
        {
            drop(session);
        }
        tracing::debug!("widget unmounted");
    }

    #[cfg(test)]
    fn source_mut(&mut self) -> Option<&mut Box<dyn InputSource>> {
        match &mut self.ownership {
            Ownership::Active(session) => Some(session.source_mut()),
            Ownership::Parked(source) => Some(source),
            Ownership::Unmounted => None,
        }
    }
}

impl<W: Widget> Drop for Mount<W> {
    fn drop(&mut self) {
        if self.is_mounted() {
            self.unmount();
        }
    }
}
