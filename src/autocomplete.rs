//! AutoComplete Module — text input driving a filtered select list.
//!
//! The typed value filters the collection through a match predicate. The
//! list shows the matches, or the whole collection while the query is empty,
//! and only takes keys while there is at least one match so an empty result
//! never steals navigation from the editor.

use std::rc::Rc;

use crate::config::{AutoCompleteOptions, SelectOptions, TextInputOptions};
use crate::error::Result;
use crate::list::ListController;
use crate::text_edit::{EditOutcome, TextInput};
use crate::text_utils::contains_ignore_case;
use crate::types::{InputEvent, Item};

pub type MatchFn<V> = Box<dyn Fn(&str, &Item<V>) -> bool>;

/// Case-insensitive substring match on the label. An empty query matches
/// nothing.
pub fn default_match<V>(query: &str, item: &Item<V>) -> bool {
    !query.is_empty() && contains_ignore_case(&item.label, query)
}

/// Items of `items` accepted by `matcher` for `query`, in order.
pub fn filter_items<V: Clone>(
    items: &[Item<V>],
    query: &str,
    matcher: &dyn Fn(&str, &Item<V>) -> bool,
) -> Vec<Item<V>> {
    items
        .iter()
        .filter(|item| matcher(query, item))
        .cloned()
        .collect()
}

pub struct AutoComplete<V> {
    input: TextInput,
    list: ListController<V>,
    items: Rc<[Item<V>]>,
    matches: usize,
    matcher: MatchFn<V>,
    options: AutoCompleteOptions,
    on_change: Option<Box<dyn FnMut(&str)>>,
    on_submit: Option<Box<dyn FnMut(&Item<V>)>>,
}

impl<V: Clone + PartialEq + 'static> AutoComplete<V> {
    pub fn new(items: Rc<[Item<V>]>, options: AutoCompleteOptions) -> Result<Self> {
        Self::with_value(items, "", options)
    }

    /// Start with `value` already typed.
    pub fn with_value(
        items: Rc<[Item<V>]>,
        value: &str,
        options: AutoCompleteOptions,
    ) -> Result<Self> {
        let input = TextInput::new(
            value,
            TextInputOptions {
                placeholder: options.placeholder.clone(),
                ..TextInputOptions::default()
            },
        );
        let list = ListController::new(
            items.clone(),
            SelectOptions {
                limit: options.limit,
                vim_mode: false,
                multi: false,
                ..SelectOptions::default()
            },
        )?;
        let mut this = Self {
            input,
            list,
            items,
            matches: 0,
            matcher: Box::new(default_match::<V>),
            options,
            on_change: None,
            on_submit: None,
        };
        this.refilter();
        Ok(this)
    }

    /// Replace the match predicate and refilter.
    pub fn with_matcher(mut self, matcher: impl Fn(&str, &Item<V>) -> bool + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self.refilter();
        self
    }

    pub fn on_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Fired with the chosen suggestion when Enter lands on the list.
    pub fn on_submit(mut self, f: impl FnMut(&Item<V>) + 'static) -> Self {
        self.on_submit = Some(Box::new(f));
        self
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn list(&self) -> &ListController<V> {
        &self.list
    }

    pub fn options(&self) -> &AutoCompleteOptions {
        &self.options
    }

    pub fn has_suggestion(&self) -> bool {
        self.matches > 0
    }

    /// Swap the backing collection and refilter.
    pub fn set_items(&mut self, items: Rc<[Item<V>]>) {
        self.items = items;
        self.refilter();
    }

    pub fn set_focus(&mut self, focus: bool) {
        self.input.set_focus(focus);
        let list_focus = focus && self.has_suggestion();
        self.list.set_focus(list_focus);
    }

    fn refilter(&mut self) {
        let query = self.input.value();
        let filtered = filter_items(&self.items, query, &*self.matcher);
        self.matches = filtered.len();
        let shown = if query.is_empty() {
            self.items.clone()
        } else {
            filtered.into()
        };
        tracing::debug!(query, matches = self.matches, "autocomplete refiltered");
        let list_focus = self.input.focused() && self.has_suggestion();
        self.list.set_items(shown);
        self.list.set_focus(list_focus);
    }

    /// Route one event to the list (when it has focus) and the editor.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        if !self.input.focused() {
            return false;
        }

        let mut chosen = None;
        let list_consumed = if self.list.focused() {
            if matches!(event, InputEvent::Enter) {
                chosen = self.list.highlighted_item().cloned();
            }
            self.list.handle(event)
        } else {
            false
        };
        if let (true, Some(item)) = (list_consumed, chosen) {
            if let Some(cb) = self.on_submit.as_mut() {
                cb(&item);
            }
        }

        let outcome = self.input.handle(event);
        if let EditOutcome::Edited { changed: true } = outcome {
            self.refilter();
            if let Some(cb) = self.on_change.as_mut() {
                cb(self.input.value());
            }
        }

        list_consumed || !matches!(outcome, EditOutcome::Ignored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn fruit() -> Rc<[Item<&'static str>]> {
        vec![
            Item::new("Apple", "apple"),
            Item::new("Banana", "banana"),
            Item::new("Grape", "grape"),
        ]
        .into()
    }

    fn labels(ac: &AutoComplete<&'static str>) -> Vec<String> {
        ac.list().visible().iter().map(|i| i.label.clone()).collect()
    }

    #[test]
    fn test_default_match_filters_case_insensitive() {
        let items = fruit();
        let hits = filter_items(&items, "ap", &default_match::<&str>);
        let names: Vec<&str> = hits.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(names, vec!["Apple", "Grape"]);
        assert!(filter_items(&items, "", &default_match::<&str>).is_empty());
    }

    #[test]
    fn test_empty_query_shows_everything_unfocused() {
        let ac = AutoComplete::new(fruit(), AutoCompleteOptions::default()).unwrap();
        assert_eq!(labels(&ac), vec!["Apple", "Banana", "Grape"]);
        assert!(!ac.has_suggestion());
        assert!(!ac.list().focused());
    }

    #[test]
    fn test_typing_filters_and_focuses_list() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let log = changes.clone();
        let mut ac = AutoComplete::new(fruit(), AutoCompleteOptions::default())
            .unwrap()
            .on_change(move |v| log.borrow_mut().push(v.to_string()));

        ac.handle(&InputEvent::text("A"));
        ac.handle(&InputEvent::text("P"));
        assert_eq!(ac.value(), "AP");
        assert_eq!(labels(&ac), vec!["Apple", "Grape"]);
        assert!(ac.list().focused());
        assert_eq!(*changes.borrow(), vec!["A".to_string(), "AP".to_string()]);
    }

    #[test]
    fn test_no_match_keeps_navigation_off_list() {
        let mut ac = AutoComplete::new(fruit(), AutoCompleteOptions::default()).unwrap();
        ac.handle(&InputEvent::text("zz"));
        assert!(!ac.has_suggestion());
        assert!(ac.list().visible().is_empty());
        assert!(!ac.handle(&InputEvent::Down));
        assert_eq!(ac.list().highlighted_index(), 0);
    }

    #[test]
    fn test_enter_submits_highlighted_match() {
        let chosen = Rc::new(RefCell::new(Vec::new()));
        let log = chosen.clone();
        let mut ac = AutoComplete::new(fruit(), AutoCompleteOptions::default())
            .unwrap()
            .on_submit(move |item| log.borrow_mut().push(item.value));

        ac.handle(&InputEvent::text("ap"));
        ac.handle(&InputEvent::Down);
        assert!(ac.handle(&InputEvent::Enter));
        assert_eq!(*chosen.borrow(), vec!["grape"]);
        assert_eq!(ac.value(), "ap");
    }

    #[test]
    fn test_enter_without_suggestion_does_nothing() {
        let fired = Rc::new(RefCell::new(false));
        let flag = fired.clone();
        let mut ac = AutoComplete::new(fruit(), AutoCompleteOptions::default())
            .unwrap()
            .on_submit(move |_| *flag.borrow_mut() = true);
        ac.handle(&InputEvent::Enter);
        assert!(!*fired.borrow());
    }

    #[test]
    fn test_refilter_resets_highlight() {
        let mut ac = AutoComplete::new(fruit(), AutoCompleteOptions::default()).unwrap();
        ac.handle(&InputEvent::text("a"));
        ac.handle(&InputEvent::Down);
        assert_eq!(ac.list().highlighted_index(), 1);
        ac.handle(&InputEvent::text("n"));
        assert_eq!(labels(&ac), vec!["Banana"]);
        assert_eq!(ac.list().highlighted_index(), 0);
    }

    #[test]
    fn test_vim_keys_are_text() {
        let mut ac = AutoComplete::new(fruit(), AutoCompleteOptions::default()).unwrap();
        ac.handle(&InputEvent::text("a"));
        ac.handle(&InputEvent::text("j"));
        assert_eq!(ac.value(), "aj");
        assert_eq!(ac.list().highlighted_index(), 0);
    }

    #[test]
    fn test_custom_matcher() {
        let mut ac = AutoComplete::new(fruit(), AutoCompleteOptions::default())
            .unwrap()
            .with_matcher(|query, item| item.value.starts_with(query));
        ac.handle(&InputEvent::text("b"));
        assert_eq!(labels(&ac), vec!["Banana"]);
    }

    #[test]
    fn test_backspace_to_empty_restores_full_list() {
        let mut ac =
            AutoComplete::with_value(fruit(), "gr", AutoCompleteOptions::default()).unwrap();
        assert_eq!(labels(&ac), vec!["Grape"]);
        ac.handle(&InputEvent::Backspace);
        ac.handle(&InputEvent::Backspace);
        assert_eq!(ac.value(), "");
        assert_eq!(labels(&ac), vec!["Apple", "Banana", "Grape"]);
        assert!(!ac.list().focused());
    }

    #[test]
    fn test_unfocused_ignores_every_event() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (changes, submits) = (log.clone(), log.clone());
        let mut ac = AutoComplete::new(fruit(), AutoCompleteOptions::default())
            .unwrap()
            .on_change(move |v| changes.borrow_mut().push(format!("change {v}")))
            .on_submit(move |item| {
                let line = format!("submit {}", item.value);
                submits.borrow_mut().push(line);
            });
        ac.handle(&InputEvent::text("ap"));
        log.borrow_mut().clear();

        ac.set_focus(false);
        assert!(!ac.input().focused());
        assert!(!ac.list().focused());
        assert!(!ac.handle(&InputEvent::text("x")));
        assert!(!ac.handle(&InputEvent::Down));
        assert!(!ac.handle(&InputEvent::Enter));
        assert_eq!(ac.value(), "ap");
        assert_eq!(labels(&ac), vec!["Apple", "Grape"]);
        assert_eq!(ac.list().highlighted_index(), 0);
        assert!(log.borrow().is_empty());

        ac.set_focus(true);
        assert!(ac.list().focused());
        assert!(ac.handle(&InputEvent::Down));
        assert_eq!(ac.list().highlighted_index(), 1);
    }
}
