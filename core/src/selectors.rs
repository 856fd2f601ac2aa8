//! Derived views: read-only projections of [`AppState`].
//!
//! Filters return `Cow` so that a filter which keeps everything hands back
//! the input slice instead of a copy.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::command::ItemStateFilter;
use crate::state::{AppState, ListRevision};
use crate::types::Item;

pub fn select_list_by_item_state(list: &[Item], item_state: ItemStateFilter) -> Cow<'_, [Item]> {
    match item_state {
        ItemStateFilter::All => Cow::Borrowed(list),
        filter => Cow::Owned(list.iter().filter(|item| filter.matches(item)).cloned().collect()),
    }
}

/// Case-insensitive substring match on the title. An empty substring keeps
/// every item.
pub fn select_list_by_substring<'a>(list: &'a [Item], substring: &str) -> Cow<'a, [Item]> {
    if substring.is_empty() {
        return Cow::Borrowed(list);
    }
    let needle = substring.to_lowercase();
    Cow::Owned(
        list.iter()
            .filter(|item| title_contains(item, &needle))
            .cloned()
            .collect(),
    )
}

/// Substring filter first, then the completion-state filter.
pub fn select_filtered_list(state: &AppState) -> Cow<'_, [Item]> {
    let filter = &state.filter;
    match select_list_by_substring(state.todo.list(), &filter.substring) {
        Cow::Borrowed(list) => select_list_by_item_state(list, filter.item_state),
        Cow::Owned(mut list) => {
            list.retain(|item| filter.item_state.matches(item));
            Cow::Owned(list)
        }
    }
}

fn title_contains(item: &Item, lowercase_needle: &str) -> bool {
    item.title.to_lowercase().contains(lowercase_needle)
}

/// Item counts per completion-state category, over the unfiltered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsCount {
    pub all: usize,
    pub done: usize,
    pub not_done: usize,
}

impl ItemsCount {
    pub fn count(list: &[Item]) -> Self {
        let done = list.iter().filter(|item| item.is_checked).count();
        Self {
            all: list.len(),
            done,
            not_done: list.len() - done,
        }
    }

    pub fn get(&self, item_state: ItemStateFilter) -> usize {
        match item_state {
            ItemStateFilter::All => self.all,
            ItemStateFilter::Done => self.done,
            ItemStateFilter::NotDone => self.not_done,
        }
    }
}

/// Unmemoized count. Prefer [`ItemsCountSelector`] when called per frame.
pub fn select_items_count(state: &AppState) -> ItemsCount {
    ItemsCount::count(state.todo.list())
}

/// Memoized [`select_items_count`], keyed on the list revision. Filter,
/// status and error changes keep the revision, so they never trigger a
/// recount.
#[derive(Debug, Clone, Default)]
pub struct ItemsCountSelector {
    cached: Option<(ListRevision, ItemsCount)>,
    recomputations: usize,
}

impl ItemsCountSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, state: &AppState) -> ItemsCount {
        let revision = state.todo.revision();
        if let Some((cached_revision, counts)) = self.cached {
            if cached_revision == revision {
                trace!(revision = revision.get(), "items count cache hit");
                return counts;
            }
        }
        trace!(revision = revision.get(), "items count cache miss");
        let counts = select_items_count(state);
        self.cached = Some((revision, counts));
        self.recomputations += 1;
        counts
    }

    /// How many times the counts were actually computed.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}
