//! Kraken Input — interactive terminal input widgets.
//!
//! Layering:
//! 1. `decode` turns raw chunks or crossterm events into `InputEvent`s
//! 2. `text_edit`, `rotate` and `selection` hold the pure state transitions
//! 3. `list` and `autocomplete` wrap them into widgets that fire callbacks
//! 4. `session` owns raw input and routes events to a mounted widget
//! 5. `render` turns widget state into styled spans; `terminal` writes them
//!
//! Everything is single-threaded. A widget processes one event to completion
//! before the next, and its callbacks must not call back into it.

pub mod autocomplete;
pub mod config;
pub mod decode;
pub mod error;
pub mod list;
pub mod render;
pub mod rotate;
pub mod selection;
pub mod session;
pub mod spinner;
pub mod terminal;
pub mod text_edit;
mod text_utils;
pub mod types;

pub use autocomplete::{default_match, filter_items, AutoComplete};
pub use config::{AutoCompleteOptions, SelectOptions, TextInputOptions, DEFAULT_LIMIT};
pub use decode::{decode_chunk, decode_crossterm};
pub use error::{InputError, Result};
pub use list::ListController;
pub use render::{render_autocomplete, render_text_input, DefaultParts, ListParts, ListRenderer};
pub use rotate::{compute_visible, rotate, RotationState};
pub use selection::{ListEffect, ListKey, SelectionSet, SelectionState};
pub use session::{InputSession, Mount, SessionRegistry, Widget};
pub use spinner::{Spinner, SpinnerKind};
pub use terminal::{write_lines, CrosstermSource, HeadlessSource, InputSource};
pub use text_edit::{EditOutcome, TextEditState, TextInput};
pub use types::{CellAttrs, InputEvent, Item, Line, StyledSpan};
