//! List Module — interactive select list.
//!
//! Responsibilities:
//! - Own the item collection, options, and `SelectionState`
//! - Gate input on focus and translate events to `ListKey`s
//! - Reset rotation when a different collection is supplied
//! - Fire select/unselect/highlight/submit callbacks
//! - Expose the visible window for renderers

use std::rc::Rc;

use crate::config::SelectOptions;
use crate::error::Result;
use crate::rotate::{compute_visible, RotationState};
use crate::selection::{ListEffect, ListKey, SelectionSet, SelectionState};
use crate::types::{InputEvent, Item};

pub type ItemCallback<V> = Box<dyn FnMut(&Item<V>)>;
pub type SubmitSetCallback<V> = Box<dyn FnMut(&[Item<V>])>;

/// Interactive list over a shared item collection.
///
/// In single mode Enter selects the highlighted item. In multi mode Space
/// toggles the highlighted item and Enter submits everything collected so far.
/// Callbacks must not feed events back into the list they were fired from.
pub struct ListController<V> {
    items: Rc<[Item<V>]>,
    options: SelectOptions<V>,
    state: SelectionState<V>,
    on_select: Option<ItemCallback<V>>,
    on_unselect: Option<ItemCallback<V>>,
    on_highlight: Option<ItemCallback<V>>,
    on_submit: Option<SubmitSetCallback<V>>,
}

impl<V: Clone + PartialEq> ListController<V> {
    pub fn new(items: Rc<[Item<V>]>, options: SelectOptions<V>) -> Result<Self> {
        options.validate()?;
        let state = SelectionState::new(options.initial_index, options.default_selected.clone());
        Ok(Self {
            items,
            options,
            state,
            on_select: None,
            on_unselect: None,
            on_highlight: None,
            on_submit: None,
        })
    }

    pub fn on_select(mut self, f: impl FnMut(&Item<V>) + 'static) -> Self {
        self.on_select = Some(Box::new(f));
        self
    }

    pub fn on_unselect(mut self, f: impl FnMut(&Item<V>) + 'static) -> Self {
        self.on_unselect = Some(Box::new(f));
        self
    }

    pub fn on_highlight(mut self, f: impl FnMut(&Item<V>) + 'static) -> Self {
        self.on_highlight = Some(Box::new(f));
        self
    }

    pub fn on_submit(mut self, f: impl FnMut(&[Item<V>]) + 'static) -> Self {
        self.on_submit = Some(Box::new(f));
        self
    }

    pub fn items(&self) -> &Rc<[Item<V>]> {
        &self.items
    }

    pub fn options(&self) -> &SelectOptions<V> {
        &self.options
    }

    pub fn rotation(&self) -> RotationState {
        self.state.rotation()
    }

    pub fn selected(&self) -> &SelectionSet<V> {
        self.state.selected()
    }

    pub fn is_selected(&self, item: &Item<V>) -> bool {
        self.state.selected().contains(item)
    }

    pub fn is_multi(&self) -> bool {
        self.options.multi
    }

    pub fn focused(&self) -> bool {
        self.options.focus
    }

    pub fn set_focus(&mut self, focus: bool) {
        self.options.focus = focus;
    }

    /// Supply a collection. A different allocation resets the rotation even
    /// when the contents compare equal; the same `Rc` is a no-op.
    pub fn set_items(&mut self, items: Rc<[Item<V>]>) {
        if Rc::ptr_eq(&self.items, &items) {
            return;
        }
        tracing::debug!(count = items.len(), "list collection replaced");
        self.items = items;
        self.state = self.state.reset_rotation();
    }

    /// Highlighted row within the visible window.
    pub fn highlighted_index(&self) -> usize {
        self.state.highlighted_position(self.items.len(), self.options.limit)
    }

    pub fn highlighted_item(&self) -> Option<&Item<V>> {
        self.state
            .highlighted_source(self.items.len(), self.options.limit)
            .map(|idx| &self.items[idx])
    }

    /// Rows currently on screen, top to bottom.
    pub fn visible(&self) -> Vec<&Item<V>> {
        if self.items.len() > self.options.limit {
            // Non-empty: the collection is larger than a limit of at least 1.
            compute_visible(&self.items, self.state.rotation().rotate_index, self.options.limit)
                .unwrap_or_default()
        } else {
            self.items.iter().collect()
        }
    }

    /// Route one event. Returns true when the list consumed it.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        if !self.options.focus {
            return false;
        }
        let key = match ListKey::from_event(event, self.options.vim_mode, self.options.multi) {
            Some(key) => key,
            None => return false,
        };
        tracing::trace!(?key, "list key");

        let (next, effect) = self
            .state
            .apply(key, &self.items, self.options.limit, self.options.multi);
        self.state = next;

        let effect = match effect {
            Some(effect) => effect,
            None => return false,
        };
        let rotation = self.state.rotation();
        tracing::debug!(
            rotate_index = rotation.rotate_index,
            highlighted_index = rotation.highlighted_index,
            ?effect,
            "list transition"
        );

        match effect {
            ListEffect::Highlight(idx) => {
                if let Some(cb) = self.on_highlight.as_mut() {
                    cb(&self.items[idx]);
                }
            }
            ListEffect::Select(idx) => {
                if let Some(cb) = self.on_select.as_mut() {
                    cb(&self.items[idx]);
                }
            }
            ListEffect::Unselect(idx) => {
                if let Some(cb) = self.on_unselect.as_mut() {
                    cb(&self.items[idx]);
                }
            }
            ListEffect::Submit => {
                if let Some(cb) = self.on_submit.as_mut() {
                    cb(self.state.selected().items());
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn abc() -> Rc<[Item<char>]> {
        vec![Item::new("A", 'a'), Item::new("B", 'b'), Item::new("C", 'c')].into()
    }

    fn numbered(n: u32) -> Rc<[Item<u32>]> {
        (0..n)
            .map(|i| Item::new(format!("Item {i}"), i))
            .collect::<Vec<_>>()
            .into()
    }

    fn options<V>(limit: usize, multi: bool) -> SelectOptions<V> {
        SelectOptions {
            limit,
            multi,
            ..SelectOptions::default()
        }
    }

    fn labels<V>(list: &ListController<V>) -> Vec<String>
    where
        V: Clone + PartialEq,
    {
        list.visible().iter().map(|i| i.label.clone()).collect()
    }

    #[test]
    fn test_zero_limit_rejected() {
        assert!(ListController::new(abc(), options(0, false)).is_err());
    }

    #[test]
    fn test_highlight_wraps_without_window() {
        let highlighted = Rc::new(RefCell::new(Vec::new()));
        let log = highlighted.clone();
        let mut list = ListController::new(abc(), options(10, false))
            .unwrap()
            .on_highlight(move |item| log.borrow_mut().push(item.value));

        assert!(list.handle(&InputEvent::Up));
        assert_eq!(list.highlighted_index(), 2);
        assert!(list.handle(&InputEvent::Down));
        assert_eq!(list.highlighted_index(), 0);
        assert_eq!(*highlighted.borrow(), vec!['c', 'a']);
    }

    #[test]
    fn test_windowed_scroll_reveals_predecessor() {
        let mut list = ListController::new(numbered(10), options(3, false)).unwrap();
        assert_eq!(labels(&list), vec!["Item 0", "Item 1", "Item 2"]);

        list.handle(&InputEvent::Up);
        assert_eq!(list.rotation().rotate_index, 1);
        assert_eq!(list.highlighted_index(), 0);
        assert_eq!(labels(&list), vec!["Item 9", "Item 0", "Item 1"]);
        assert_eq!(list.highlighted_item().map(|i| i.value), Some(9));
    }

    #[test]
    fn test_windowed_scroll_down_past_bottom() {
        let mut list = ListController::new(numbered(10), options(3, false)).unwrap();
        for _ in 0..3 {
            list.handle(&InputEvent::Down);
        }
        assert_eq!(list.highlighted_index(), 2);
        assert_eq!(labels(&list), vec!["Item 1", "Item 2", "Item 3"]);
        assert_eq!(list.highlighted_item().map(|i| i.value), Some(3));
    }

    #[test]
    fn test_multi_select_accumulates_in_order() {
        let submitted = Rc::new(RefCell::new(Vec::new()));
        let log = submitted.clone();
        let mut list = ListController::new(abc(), options(10, true))
            .unwrap()
            .on_submit(move |set| {
                let values: Vec<char> = set.iter().map(|i| i.value).collect();
                log.borrow_mut().push(values);
            });

        list.handle(&InputEvent::Space);
        list.handle(&InputEvent::Down);
        list.handle(&InputEvent::Space);
        list.handle(&InputEvent::Enter);
        assert_eq!(submitted.borrow().last().cloned(), Some(vec!['a', 'b']));

        list.handle(&InputEvent::Up);
        list.handle(&InputEvent::Space);
        list.handle(&InputEvent::Enter);
        assert_eq!(submitted.borrow().last().cloned(), Some(vec!['b']));
    }

    #[test]
    fn test_multi_select_callbacks() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sel = events.clone();
        let unsel = events.clone();
        let mut list = ListController::new(abc(), options(10, true))
            .unwrap()
            .on_select(move |item| sel.borrow_mut().push(format!("+{}", item.label)))
            .on_unselect(move |item| unsel.borrow_mut().push(format!("-{}", item.label)));

        list.handle(&InputEvent::Space);
        list.handle(&InputEvent::Space);
        assert_eq!(*events.borrow(), vec!["+A".to_string(), "-A".to_string()]);
        assert!(list.selected().is_empty());
    }

    #[test]
    fn test_single_select_enter_selects() {
        let chosen = Rc::new(RefCell::new(None));
        let slot = chosen.clone();
        let mut list = ListController::new(abc(), options(10, false))
            .unwrap()
            .on_select(move |item| *slot.borrow_mut() = Some(item.value));

        list.handle(&InputEvent::Down);
        list.handle(&InputEvent::Down);
        list.handle(&InputEvent::Enter);
        assert_eq!(*chosen.borrow(), Some('c'));
    }

    #[test]
    fn test_space_ignored_in_single_mode() {
        let mut list = ListController::new(abc(), options(10, false)).unwrap();
        assert!(!list.handle(&InputEvent::Space));
        assert!(list.selected().is_empty());
    }

    #[test]
    fn test_focus_gating() {
        let fired = Rc::new(RefCell::new(0));
        let (a, b, c) = (fired.clone(), fired.clone(), fired.clone());
        let mut opts = options(2, true);
        opts.focus = false;
        let mut list = ListController::new(abc(), opts)
            .unwrap()
            .on_highlight(move |_| *a.borrow_mut() += 1)
            .on_select(move |_| *b.borrow_mut() += 1)
            .on_submit(move |_| *c.borrow_mut() += 1);

        for event in [InputEvent::Up, InputEvent::Down, InputEvent::Space, InputEvent::Enter] {
            assert!(!list.handle(&event));
        }
        assert_eq!(list.rotation(), RotationState::default());
        assert!(list.selected().is_empty());
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn test_vim_keys() {
        let mut list = ListController::new(abc(), options(10, false)).unwrap();
        list.handle(&InputEvent::text("j"));
        assert_eq!(list.highlighted_index(), 1);
        list.handle(&InputEvent::text("k"));
        assert_eq!(list.highlighted_index(), 0);

        let mut opts = options(10, false);
        opts.vim_mode = false;
        let mut plain = ListController::new(abc(), opts).unwrap();
        assert!(!plain.handle(&InputEvent::text("j")));
        assert_eq!(plain.highlighted_index(), 0);
    }

    #[test]
    fn test_new_collection_resets_rotation() {
        let mut list = ListController::new(numbered(10), options(3, true)).unwrap();
        list.handle(&InputEvent::Up);
        list.handle(&InputEvent::Down);
        list.handle(&InputEvent::Space);
        assert_ne!(list.rotation(), RotationState::default());

        // Same contents, different allocation.
        list.set_items(numbered(10));
        assert_eq!(list.rotation(), RotationState::default());
        assert_eq!(list.selected().len(), 1);
    }

    #[test]
    fn test_same_collection_keeps_rotation() {
        let items = numbered(10);
        let mut list = ListController::new(items.clone(), options(3, false)).unwrap();
        list.handle(&InputEvent::Up);
        list.set_items(items);
        assert_eq!(list.rotation().rotate_index, 1);
    }

    #[test]
    fn test_default_selected_and_initial_index() {
        let mut opts = options(10, true);
        opts.default_selected = vec![Item::new("B", 'b')];
        opts.initial_index = 2;
        let list = ListController::new(abc(), opts).unwrap();
        assert_eq!(list.highlighted_index(), 2);
        assert!(list.is_selected(&Item::new("B", 'b')));
        assert!(!list.is_selected(&Item::new("A", 'a')));
    }

    #[test]
    fn test_empty_list_ignores_navigation() {
        let empty: Rc<[Item<u32>]> = Vec::new().into();
        let mut list = ListController::new(empty, options(3, false)).unwrap();
        assert!(!list.handle(&InputEvent::Down));
        assert!(!list.handle(&InputEvent::Enter));
        assert!(list.visible().is_empty());
        assert!(list.highlighted_item().is_none());
    }
}
