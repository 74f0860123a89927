//! Render Module — widget state → styled spans.
//!
//! Responsibilities:
//! - Text input with a fake cursor (inverted cell), paste highlight, mask and
//!   dimmed placeholder
//! - Select list rows built from overridable parts (indicator, check box,
//!   label), optionally truncated to a display width
//! - Autocomplete prompt line followed by its list
//!
//! Nothing here touches the terminal; `terminal::write_lines` does.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::autocomplete::AutoComplete;
use crate::list::ListController;
use crate::text_edit::TextInput;
use crate::text_utils::char_count;
use crate::types::{CellAttrs, Item, Line, StyledSpan, COLOR_BLUE, COLOR_DEFAULT, COLOR_GREEN};

/// Append text to a line, extending the last span when the style matches.
fn push_styled(line: &mut Line, text: &str, attrs: CellAttrs, fg: u32) {
    if text.is_empty() {
        return;
    }
    match line.last_mut() {
        Some(last) if last.attrs == attrs && last.fg == fg => last.text.push_str(text),
        _ => line.push(StyledSpan {
            text: text.to_string(),
            attrs,
            fg,
        }),
    }
}

// ============================================================================
// Text Input
// ============================================================================

/// Render the editor line.
///
/// The cursor is drawn only while focused, with `show_cursor` on and no mask.
/// An empty value with a placeholder shows the placeholder dimmed instead.
pub fn render_text_input(input: &TextInput) -> Line {
    let options = input.options();
    let state = input.state();
    let value = state.value();
    let mut line = Line::new();

    if value.is_empty() && !options.placeholder.is_empty() {
        push_styled(&mut line, &options.placeholder, CellAttrs::DIM, COLOR_DEFAULT);
        return line;
    }

    if let Some(mask) = options.mask {
        let masked: String = std::iter::repeat(mask).take(char_count(value)).collect();
        push_styled(&mut line, &masked, CellAttrs::empty(), COLOR_DEFAULT);
        return line;
    }

    if !(options.show_cursor && input.focused()) {
        push_styled(&mut line, value, CellAttrs::empty(), COLOR_DEFAULT);
        return line;
    }

    let offset = state.cursor_offset();
    let width = if options.highlight_pasted_text {
        state.cursor_width()
    } else {
        0
    };
    let start = offset.saturating_sub(width);

    let mut buf = [0u8; 4];
    for (i, ch) in value.chars().enumerate() {
        let attrs = if i >= start && i <= offset {
            CellAttrs::INVERSE
        } else {
            CellAttrs::empty()
        };
        push_styled(&mut line, ch.encode_utf8(&mut buf), attrs, COLOR_DEFAULT);
    }

    // Cursor past the last char (or on an empty value) is a blank cell.
    if offset >= char_count(value) {
        push_styled(&mut line, " ", CellAttrs::INVERSE, COLOR_DEFAULT);
    }
    line
}

// ============================================================================
// Select List
// ============================================================================

/// Row fragments of a select list. Every method has a default; implement
/// only the ones to restyle.
pub trait ListParts<V> {
    /// Leading marker, two cells wide.
    fn indicator(&self, highlighted: bool) -> StyledSpan {
        if highlighted {
            StyledSpan::colored("❯ ", COLOR_BLUE)
        } else {
            StyledSpan::plain("  ")
        }
    }

    /// Selection box, shown in multi mode only.
    fn check_box(&self, selected: bool) -> StyledSpan {
        StyledSpan::colored(if selected { "◉ " } else { "◯ " }, COLOR_GREEN)
    }

    fn item_label(&self, item: &Item<V>, highlighted: bool) -> StyledSpan {
        if highlighted {
            StyledSpan::colored(item.label.as_str(), COLOR_BLUE)
        } else {
            StyledSpan::plain(item.label.as_str())
        }
    }
}

/// The stock look: blue `❯`, green `◉`/`◯`, blue highlighted label.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultParts;

impl<V> ListParts<V> for DefaultParts {}

pub struct ListRenderer<P = DefaultParts> {
    parts: P,
    max_width: Option<usize>,
}

impl ListRenderer<DefaultParts> {
    pub fn new() -> Self {
        Self::with_parts(DefaultParts)
    }
}

impl Default for ListRenderer<DefaultParts> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ListRenderer<P> {
    pub fn with_parts(parts: P) -> Self {
        Self {
            parts,
            max_width: None,
        }
    }

    /// Truncate each row to `width` terminal columns.
    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    /// One line per visible item, top to bottom.
    pub fn render<V>(&self, list: &ListController<V>) -> Vec<Line>
    where
        V: Clone + PartialEq,
        P: ListParts<V>,
    {
        let highlighted_index = list.highlighted_index();
        list.visible()
            .into_iter()
            .enumerate()
            .map(|(row, item)| {
                let highlighted = row == highlighted_index;
                let mut line = vec![self.parts.indicator(highlighted)];
                if list.is_multi() {
                    line.push(self.parts.check_box(list.is_selected(item)));
                }
                line.push(self.parts.item_label(item, highlighted));
                match self.max_width {
                    Some(width) => truncate_line(line, width),
                    None => line,
                }
            })
            .collect()
    }
}

/// Cut a line to `width` columns. A wide char that would straddle the edge
/// is dropped whole.
fn truncate_line(line: Line, width: usize) -> Line {
    let mut used = 0usize;
    let mut out = Line::new();
    for mut span in line {
        let span_width = UnicodeWidthStr::width(span.text.as_str());
        if used + span_width <= width {
            used += span_width;
            out.push(span);
            continue;
        }
        let mut kept = String::new();
        for ch in span.text.chars() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if used + w > width {
                break;
            }
            used += w;
            kept.push(ch);
        }
        if !kept.is_empty() {
            span.text = kept;
            out.push(span);
        }
        break;
    }
    out
}

// ============================================================================
// AutoComplete
// ============================================================================

/// Prompt (green) and editor on the first line, list rows below.
pub fn render_autocomplete<V, P>(ac: &AutoComplete<V>, list: &ListRenderer<P>) -> Vec<Line>
where
    V: Clone + PartialEq + 'static,
    P: ListParts<V>,
{
    let mut first = Line::new();
    let prompt = &ac.options().prompt;
    if !prompt.is_empty() {
        push_styled(&mut first, prompt, CellAttrs::empty(), COLOR_GREEN);
    }
    first.extend(render_text_input(ac.input()));

    let mut lines = vec![first];
    lines.extend(list.render(ac.list()));
    lines
}
