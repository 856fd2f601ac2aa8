//! Domain DTOs shared by the state layer and the remote endpoint.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Field names on the wire are camelCase (`isChecked`), which is what the
//! collection endpoint speaks. Integration tests catch any schema drift
//! between the two crates.

use serde::{Deserialize, Serialize};

/// A single checkable todo item.
///
/// Identity is `id`: two items are the same entity iff their ids match. The
/// id is assigned by the server when the item is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub is_checked: bool,
}

impl Item {
    pub fn new(id: impl Into<String>, title: impl Into<String>, is_checked: bool) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            is_checked,
        }
    }
}

/// Request payload for creating a new item. The server assigns `id` and
/// defaults `isChecked` to false.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewItem {
    pub title: String,
}

/// Body the endpoint returns alongside a non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
