//! Selection Module — highlight/rotation state machine and the selection set.
//!
//! Transitions are pure: `SelectionState::apply` returns the next state plus
//! the effect the owner should report. Effects carry indices into the item
//! collection the transition ran against.

use crate::rotate::{source_index, window_size, RotationState};
use crate::types::{InputEvent, Item};

// ============================================================================
// Keys
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKey {
    Up,
    Down,
    Toggle,
    Submit,
}

impl ListKey {
    /// Normalise an input event. `Space` only means something in multi mode;
    /// `k`/`j` only in vim mode.
    pub fn from_event(event: &InputEvent, vim_mode: bool, multi: bool) -> Option<Self> {
        match event {
            InputEvent::Up => Some(Self::Up),
            InputEvent::Down => Some(Self::Down),
            InputEvent::Enter => Some(Self::Submit),
            InputEvent::Space if multi => Some(Self::Toggle),
            InputEvent::Text(_) if vim_mode && event.is_char('k') => Some(Self::Up),
            InputEvent::Text(_) if vim_mode && event.is_char('j') => Some(Self::Down),
            _ => None,
        }
    }
}

/// What the owner of a `SelectionState` must report after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEffect {
    Highlight(usize),
    Select(usize),
    Unselect(usize),
    Submit,
}

// ============================================================================
// SelectionSet
// ============================================================================

/// Chosen items in selection order, unique by identity.
#[derive(Debug, Clone)]
pub struct SelectionSet<V> {
    items: Vec<Item<V>>,
}

impl<V> Default for SelectionSet<V> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<V: Clone + PartialEq> SelectionSet<V> {
    /// Build from initial contents, dropping later duplicates.
    pub fn new(initial: Vec<Item<V>>) -> Self {
        let mut set = Self::default();
        for item in initial {
            if !set.contains(&item) {
                set.items.push(item);
            }
        }
        set
    }

    pub fn contains(&self, item: &Item<V>) -> bool {
        self.items.iter().any(|s| s.same_item(item))
    }

    pub fn items(&self) -> &[Item<V>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove `item` if present, otherwise append it. Returns whether it ended
    /// up selected.
    pub fn toggled(&self, item: &Item<V>) -> (Self, bool) {
        if self.contains(item) {
            let items = self
                .items
                .iter()
                .filter(|s| !s.same_item(item))
                .cloned()
                .collect();
            (Self { items }, false)
        } else {
            let mut items = self.items.clone();
            items.push(item.clone());
            (Self { items }, true)
        }
    }
}

// ============================================================================
// SelectionState
// ============================================================================

#[derive(Debug, Clone)]
pub struct SelectionState<V> {
    rotation: RotationState,
    selected: SelectionSet<V>,
}

impl<V: Clone + PartialEq> SelectionState<V> {
    pub fn new(initial_index: usize, default_selected: Vec<Item<V>>) -> Self {
        Self {
            rotation: RotationState::new(initial_index),
            selected: SelectionSet::new(default_selected),
        }
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn selected(&self) -> &SelectionSet<V> {
        &self.selected
    }

    /// Same selection, rotation back at the top.
    pub fn reset_rotation(&self) -> Self {
        Self {
            rotation: RotationState::default(),
            selected: self.selected.clone(),
        }
    }

    /// Highlighted position within the visible window, clamped to it.
    pub fn highlighted_position(&self, item_count: usize, limit: usize) -> usize {
        let size = window_size(item_count, limit);
        self.rotation.highlighted_index.min(size.saturating_sub(1))
    }

    /// Index into `items` of the highlighted row, if there are any items.
    pub fn highlighted_source(&self, item_count: usize, limit: usize) -> Option<usize> {
        if item_count == 0 {
            return None;
        }
        let pos = self.highlighted_position(item_count, limit);
        Some(visible_source(item_count, limit, self.rotation.rotate_index, pos))
    }

    pub fn apply(
        &self,
        key: ListKey,
        items: &[Item<V>],
        limit: usize,
        multi: bool,
    ) -> (Self, Option<ListEffect>) {
        let count = items.len();
        if count == 0 {
            return (self.clone(), None);
        }
        let windowed = count > limit;
        let last = window_size(count, limit) - 1;
        let current = self.highlighted_position(count, limit);
        let rotate_index = self.rotation.rotate_index;

        match key {
            ListKey::Up => {
                let rotation = match (windowed, current) {
                    (true, 0) => RotationState {
                        rotate_index: rotate_index + 1,
                        highlighted_index: 0,
                    },
                    (false, 0) => RotationState {
                        rotate_index,
                        highlighted_index: last,
                    },
                    (_, i) => RotationState {
                        rotate_index,
                        highlighted_index: i - 1,
                    },
                };
                self.moved(rotation, count, limit)
            }
            ListKey::Down => {
                let rotation = match (windowed, current == last) {
                    (true, true) => RotationState {
                        rotate_index: rotate_index - 1,
                        highlighted_index: last,
                    },
                    (false, true) => RotationState {
                        rotate_index,
                        highlighted_index: 0,
                    },
                    (_, false) => RotationState {
                        rotate_index,
                        highlighted_index: current + 1,
                    },
                };
                self.moved(rotation, count, limit)
            }
            ListKey::Toggle => {
                if !multi {
                    return (self.clone(), None);
                }
                let idx = visible_source(count, limit, rotate_index, current);
                let (selected, now_selected) = self.selected.toggled(&items[idx]);
                let next = Self {
                    rotation: RotationState {
                        rotate_index,
                        highlighted_index: current,
                    },
                    selected,
                };
                let effect = if now_selected {
                    ListEffect::Select(idx)
                } else {
                    ListEffect::Unselect(idx)
                };
                (next, Some(effect))
            }
            ListKey::Submit => {
                if multi {
                    (self.clone(), Some(ListEffect::Submit))
                } else {
                    let idx = visible_source(count, limit, rotate_index, current);
                    (self.clone(), Some(ListEffect::Select(idx)))
                }
            }
        }
    }

    fn moved(
        &self,
        rotation: RotationState,
        count: usize,
        limit: usize,
    ) -> (Self, Option<ListEffect>) {
        let idx = visible_source(
            count,
            limit,
            rotation.rotate_index,
            rotation.highlighted_index,
        );
        let next = Self {
            rotation,
            selected: self.selected.clone(),
        };
        (next, Some(ListEffect::Highlight(idx)))
    }
}

/// Source index of visible row `pos`. Unwindowed lists show items in order.
fn visible_source(count: usize, limit: usize, rotate_index: i64, pos: usize) -> usize {
    if count > limit {
        source_index(count, rotate_index, pos)
    } else {
        pos
    }
}
