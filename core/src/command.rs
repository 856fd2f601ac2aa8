//! Commands: tagged instructions describing a state change.
//!
//! On the wire a command is `{"type": "<name>", "payload": <value>}`, which
//! lets command sequences be journaled or kept as JSON test vectors.

use serde::{Deserialize, Serialize};

use crate::types::Item;

/// Status of the most recent remote request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Completion-state filter applied to the item list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemStateFilter {
    #[default]
    All,
    Done,
    NotDone,
}

impl ItemStateFilter {
    pub const VARIANTS: [ItemStateFilter; 3] = [
        ItemStateFilter::All,
        ItemStateFilter::Done,
        ItemStateFilter::NotDone,
    ];

    pub fn matches(&self, item: &Item) -> bool {
        match self {
            ItemStateFilter::All => true,
            ItemStateFilter::Done => item.is_checked,
            ItemStateFilter::NotDone => !item.is_checked,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Command {
    /// Append an item to the end of the list.
    Add(Item),
    /// Replace the list wholesale.
    AddAll(Vec<Item>),
    /// Remove every item with this id.
    Delete(String),
    /// Replace the title of the item with this id.
    Edit { id: String, title: String },
    /// Invert `is_checked` of the item with this id.
    Checked(String),
    FilterItemState(ItemStateFilter),
    FilterSubstring(String),
    SetRequestStatus(RequestStatus),
    SetError(String),
}

impl Command {
    /// Wire name of the command, used in logs so payloads stay out of them.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Add(_) => "add",
            Command::AddAll(_) => "addAll",
            Command::Delete(_) => "delete",
            Command::Edit { .. } => "edit",
            Command::Checked(_) => "checked",
            Command::FilterItemState(_) => "filterItemState",
            Command::FilterSubstring(_) => "filterSubstring",
            Command::SetRequestStatus(_) => "setRequestStatus",
            Command::SetError(_) => "setError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn commands_use_type_payload_envelope() {
        let command = Command::SetRequestStatus(RequestStatus::Loading);
        assert_eq!(
            serde_json::to_value(&command).unwrap(),
            json!({ "type": "setRequestStatus", "payload": "loading" })
        );

        let command = Command::Edit {
            id: "1".to_string(),
            title: "new title".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&command).unwrap(),
            json!({ "type": "edit", "payload": { "id": "1", "title": "new title" } })
        );
    }

    #[test]
    fn item_state_filter_names() {
        assert_eq!(serde_json::to_value(ItemStateFilter::NotDone).unwrap(), json!("notDone"));
        let parsed: ItemStateFilter = serde_json::from_value(json!("done")).unwrap();
        assert_eq!(parsed, ItemStateFilter::Done);
    }

    #[test]
    fn name_matches_serialized_type() {
        let commands = [
            Command::Add(Item::new("1", "a", false)),
            Command::AddAll(Vec::new()),
            Command::Delete("1".to_string()),
            Command::Checked("1".to_string()),
            Command::FilterItemState(ItemStateFilter::All),
            Command::FilterSubstring(String::new()),
            Command::SetError(String::new()),
        ];
        for command in commands {
            let value = serde_json::to_value(&command).unwrap();
            assert_eq!(value["type"], command.name());
        }
    }
}
