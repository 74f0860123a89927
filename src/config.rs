//! Widget options.
//!
//! Options deserialize from JSON with camelCase keys so hosts can keep widget
//! setup in a config file. Missing keys take the defaults below.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{InputError, Result};
use crate::types::Item;

pub const DEFAULT_LIMIT: usize = 6;

// ============================================================================
// TextInput
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextInputOptions {
    /// Shown dimmed while the value is empty.
    pub placeholder: String,
    pub focus: bool,
    /// Render every character as this one; also freezes the cursor.
    pub mask: Option<char>,
    pub show_cursor: bool,
    /// Invert the whole span of the last pasted chunk.
    pub highlight_pasted_text: bool,
}

impl Default for TextInputOptions {
    fn default() -> Self {
        Self {
            placeholder: String::new(),
            focus: true,
            mask: None,
            show_cursor: true,
            highlight_pasted_text: true,
        }
    }
}

impl TextInputOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// Select list
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase", bound(deserialize = "V: Deserialize<'de>"))]
pub struct SelectOptions<V> {
    /// Maximum number of rows in the visible window.
    pub limit: usize,
    pub multi: bool,
    /// Accept `j`/`k` as Down/Up.
    pub vim_mode: bool,
    pub focus: bool,
    pub default_selected: Vec<Item<V>>,
    pub initial_index: usize,
}

impl<V> Default for SelectOptions<V> {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            multi: false,
            vim_mode: true,
            focus: true,
            default_selected: Vec::new(),
            initial_index: 0,
        }
    }
}

impl<V: DeserializeOwned> SelectOptions<V> {
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }
}

impl<V> SelectOptions<V> {
    pub fn validate(&self) -> Result<()> {
        validate_limit(self.limit)
    }
}

// ============================================================================
// AutoComplete
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutoCompleteOptions {
    /// Rendered in green before the input.
    pub prompt: String,
    pub placeholder: String,
    pub limit: usize,
}

impl Default for AutoCompleteOptions {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            placeholder: String::new(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl AutoCompleteOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        validate_limit(options.limit)?;
        Ok(options)
    }
}

fn validate_limit(limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(InputError::InvalidOption {
            name: "limit",
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}
