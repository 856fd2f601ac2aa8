//! The state container: owns the current [`AppState`] snapshot and replaces
//! it on every dispatched command.
//!
//! # Design
//! There is no global store. The composition root builds one with
//! [`Store::new`] and hands `&mut` access to whatever dispatches. Workflows
//! only need the [`Dispatch`] seam, which [`Recorder`] also implements so
//! tests can assert the exact command sequence a workflow emitted.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::command::Command;
use crate::selectors::{select_filtered_list, ItemsCount, ItemsCountSelector};
use crate::state::AppState;
use crate::types::Item;

/// Anything that accepts commands.
pub trait Dispatch {
    fn dispatch(&mut self, command: Command);
}

impl<D: Dispatch + ?Sized> Dispatch for &mut D {
    fn dispatch(&mut self, command: Command) {
        (**self).dispatch(command);
    }
}

/// Shared handle for workflows that overlap on one single-threaded executor.
/// The cell is borrowed only for the duration of each dispatch, never across
/// a remote call, so every clone can be handed to its own `Workflow::run`.
impl<D: Dispatch + ?Sized> Dispatch for Rc<RefCell<D>> {
    fn dispatch(&mut self, command: Command) {
        self.borrow_mut().dispatch(command);
    }
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&AppState)>;

pub struct Store {
    state: AppState,
    items_count: ItemsCountSelector,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            state,
            items_count: ItemsCountSelector::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn filtered_list(&self) -> Vec<Item> {
        select_filtered_list(&self.state).into_owned()
    }

    /// Memoized per-category counts; recomputed only when the list changed.
    pub fn items_count(&mut self) -> ItemsCount {
        self.items_count.select(&self.state)
    }

    /// Register a listener called with the new state after every dispatch.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&AppState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Dispatch for Store {
    fn dispatch(&mut self, command: Command) {
        debug!(command = command.name(), "dispatch");
        self.state = self.state.reduce(&command);
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
    }
}

/// Records every dispatched command without reducing anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recorder {
    commands: Vec<Command>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }
}

impl Dispatch for Recorder {
    fn dispatch(&mut self, command: Command) {
        self.commands.push(command);
    }
}
