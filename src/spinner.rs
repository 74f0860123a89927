//! Spinner Module — frame-cycling activity indicator.
//!
//! Delta-time driven: the host loop calls `advance` with the time since its
//! last frame (or `tick` with the current instant) and redraws `frame()`.
//! There is no timer thread; dropping the spinner stops it.

use std::time::{Duration, Instant};

use serde::Deserialize;

/// Deserialises from a name through `from_name`, so unknown names in JSON
/// fall back to `Dots` as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum SpinnerKind {
    Dots,
    #[default]
    Point,
    Line,
    Arc,
}

impl SpinnerKind {
    /// Look a kind up by name. Unknown names fall back to `Dots`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "point" => Self::Point,
            "line" => Self::Line,
            "arc" => Self::Arc,
            _ => Self::Dots,
        }
    }

    pub fn frames(self) -> &'static [&'static str] {
        match self {
            Self::Dots => &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
            Self::Point => &["∙∙∙", "●∙∙", "∙●∙", "∙∙●", "∙∙∙"],
            Self::Line => &["-", "\\", "|", "/"],
            Self::Arc => &["◜", "◠", "◝", "◞", "◡", "◟"],
        }
    }

    pub fn interval(self) -> Duration {
        Duration::from_millis(match self {
            Self::Dots => 80,
            Self::Point => 125,
            Self::Line => 130,
            Self::Arc => 100,
        })
    }
}

impl From<String> for SpinnerKind {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

#[derive(Debug, Clone)]
pub struct Spinner {
    kind: SpinnerKind,
    frame_idx: usize,
    frame_elapsed: Duration,
    last_tick: Option<Instant>,
}

impl Spinner {
    pub fn new(kind: SpinnerKind) -> Self {
        Self {
            kind,
            frame_idx: 0,
            frame_elapsed: Duration::ZERO,
            last_tick: None,
        }
    }

    pub fn kind(&self) -> SpinnerKind {
        self.kind
    }

    pub fn frame_index(&self) -> usize {
        self.frame_idx
    }

    pub fn frame(&self) -> &'static str {
        self.kind.frames()[self.frame_idx]
    }

    /// Add `elapsed` to the frame timer, stepping (and wrapping) once per
    /// whole interval. Returns true when the visible frame changed.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        let interval = self.kind.interval();
        let frames = self.kind.frames().len();
        let before = self.frame_idx;

        self.frame_elapsed += elapsed;
        while self.frame_elapsed >= interval {
            self.frame_elapsed -= interval;
            self.frame_idx = (self.frame_idx + 1) % frames;
        }

        if self.frame_idx != before {
            tracing::trace!(kind = ?self.kind, frame = self.frame_idx, "spinner frame");
        }
        self.frame_idx != before
    }

    /// Advance by the time since the previous tick. The first tick only
    /// starts the clock.
    pub fn tick(&mut self, now: Instant) -> bool {
        let elapsed = match self.last_tick {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last_tick = Some(now);
        self.advance(elapsed)
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new(SpinnerKind::default())
    }
}
