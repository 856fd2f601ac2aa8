//! Client-side state layer for a todo list synchronized with a remote
//! collection endpoint.
//!
//! # Overview
//! A predictable-state container: typed [`Command`]s, pure transition
//! functions over an [`AppState`] made of two independent slices, derived
//! views in [`selectors`], and async [`Workflow`]s that wrap one remote call
//! in a `loading` / `success` / `error` status protocol.
//!
//! # Design
//! - State is replaced, never edited in place. The item list is shared
//!   between snapshots behind an `Arc` until a command actually changes it.
//! - HTTP follows the host-does-IO pattern: [`TodoClient`] builds
//!   [`HttpRequest`] values and parses [`HttpResponse`] values, and a
//!   [`Transport`] performs the round-trip.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod command;
pub mod config;
pub mod error;
pub mod http;
pub mod selectors;
pub mod state;
pub mod store;
pub mod transport;
pub mod types;
pub mod workflow;

pub use client::{RemoteTodos, TodoClient};
pub use command::{Command, ItemStateFilter, RequestStatus};
pub use config::Config;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use selectors::{
    select_filtered_list, select_items_count, select_list_by_item_state, select_list_by_substring,
    ItemsCount, ItemsCountSelector,
};
pub use state::{AppState, FilterState, ItemListState, ListRevision};
pub use store::{Dispatch, Recorder, Store, SubscriptionId};
pub use transport::{ReqwestTransport, StubTransport, Transport};
pub use types::{ErrorBody, Item, NewItem};
pub use workflow::Workflow;

/// Everything a UI needs to build a store, dispatch into it and run
/// workflows, including the [`Dispatch`] trait that `Store::dispatch` lives on.
pub mod prelude {
    pub use crate::command::{Command, ItemStateFilter, RequestStatus};
    pub use crate::config::Config;
    pub use crate::selectors::{select_filtered_list, ItemsCount, ItemsCountSelector};
    pub use crate::state::AppState;
    pub use crate::store::{Dispatch, Store};
    pub use crate::transport::{ReqwestTransport, Transport};
    pub use crate::types::Item;
    pub use crate::workflow::Workflow;
    pub use crate::client::RemoteTodos;
}
