//! Aggregate state and its pure transition functions.
//!
//! # Design
//! The aggregate is split into two independent slices, each with its own
//! transition function over the full [`Command`] stream:
//! - [`ItemListState`] owns the items plus the status of the last request.
//! - [`FilterState`] owns the substring and completion-state filters.
//!
//! Transitions take `&self` and return a new snapshot. The item list sits
//! behind an `Arc`, so a command that does not touch it shares the previous
//! list instead of copying it. Every transition that does replace the list
//! mints a fresh [`ListRevision`]; derived views memoize on it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::command::{Command, ItemStateFilter, RequestStatus};
use crate::types::Item;

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

/// Identifies one concrete list value. Revision 0 is the initial empty list;
/// every other revision is handed out exactly once per process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ListRevision(u64);

impl ListRevision {
    fn next() -> Self {
        Self(NEXT_REVISION.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// The item collection and the status of the last remote request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemListState {
    list: Arc<Vec<Item>>,
    #[serde(skip, default = "ListRevision::next")]
    revision: ListRevision,
    pub request_status: RequestStatus,
    pub error: String,
}

// Equality is by content; revisions say nothing about what the list holds.
impl PartialEq for ItemListState {
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list
            && self.request_status == other.request_status
            && self.error == other.error
    }
}

impl Eq for ItemListState {}

impl ItemListState {
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            list: Arc::new(items),
            revision: ListRevision::next(),
            ..Self::default()
        }
    }

    pub fn list(&self) -> &[Item] {
        &self.list
    }

    /// The shared list pointer. Two snapshots return the same `Arc` when the
    /// transitions between them left the list alone.
    pub fn shared_list(&self) -> &Arc<Vec<Item>> {
        &self.list
    }

    pub fn revision(&self) -> ListRevision {
        self.revision
    }

    pub fn reduce(&self, command: &Command) -> Self {
        match command {
            Command::Add(item) => {
                let mut list = Vec::with_capacity(self.list.len() + 1);
                list.extend(self.list.iter().cloned());
                list.push(item.clone());
                self.replace_list(list)
            }
            Command::AddAll(items) => self.replace_list(items.clone()),
            Command::Delete(id) => {
                if !self.contains(id) {
                    return self.clone();
                }
                self.replace_list(self.list.iter().filter(|item| item.id != *id).cloned().collect())
            }
            Command::Edit { id, title } => self.map_matching(id, |item| Item {
                title: title.clone(),
                ..item.clone()
            }),
            Command::Checked(id) => self.map_matching(id, |item| Item {
                is_checked: !item.is_checked,
                ..item.clone()
            }),
            Command::SetRequestStatus(status) => Self {
                request_status: *status,
                ..self.clone()
            },
            Command::SetError(error) => Self {
                error: error.clone(),
                ..self.clone()
            },
            Command::FilterItemState(_) | Command::FilterSubstring(_) => self.clone(),
        }
    }

    fn contains(&self, id: &str) -> bool {
        self.list.iter().any(|item| item.id == id)
    }

    /// Rebuild the list with `f` applied to every item whose id matches.
    /// Unknown ids leave the list (and its revision) untouched.
    fn map_matching<F>(&self, id: &str, f: F) -> Self
    where
        F: Fn(&Item) -> Item,
    {
        if !self.contains(id) {
            return self.clone();
        }
        let list = self
            .list
            .iter()
            .map(|item| if item.id == id { f(item) } else { item.clone() })
            .collect();
        self.replace_list(list)
    }

    fn replace_list(&self, list: Vec<Item>) -> Self {
        Self {
            list: Arc::new(list),
            revision: ListRevision::next(),
            request_status: self.request_status,
            error: self.error.clone(),
        }
    }
}

/// Active substring and completion-state filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub substring: String,
    pub item_state: ItemStateFilter,
}

impl FilterState {
    pub fn reduce(&self, command: &Command) -> Self {
        match command {
            Command::FilterItemState(item_state) => Self {
                item_state: *item_state,
                ..self.clone()
            },
            Command::FilterSubstring(substring) => Self {
                substring: substring.clone(),
                ..self.clone()
            },
            Command::Add(_)
            | Command::AddAll(_)
            | Command::Delete(_)
            | Command::Edit { .. }
            | Command::Checked(_)
            | Command::SetRequestStatus(_)
            | Command::SetError(_) => self.clone(),
        }
    }
}

/// Both slices together. Each slice is reduced on its own; neither reads the
/// other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub todo: ItemListState,
    pub filter: FilterState,
}

impl AppState {
    pub fn reduce(&self, command: &Command) -> Self {
        Self {
            todo: self.todo.reduce(command),
            filter: self.filter.reduce(command),
        }
    }
}
