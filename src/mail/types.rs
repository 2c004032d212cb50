use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ai::RecoveredValue;

/// One message of the seed inbox. Immutable for the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecord {
    pub sender: String,
    pub subject: String,
    pub timestamp: String,
    pub body: String,
}

impl EmailRecord {
    /// List label: "subject — sender"
    pub fn label(&self) -> String {
        format!("{} — {}", self.subject, self.sender)
    }
}

/// An email together with the model's categorization and action items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedResult {
    pub email: EmailRecord,
    pub category: RecoveredValue,
    pub actions: RecoveredValue,
}

impl ProcessedResult {
    /// How the action items should be presented
    pub fn action_items(&self) -> ActionItems {
        ActionItems::from_recovered(&self.actions)
    }
}

/// Display projection of the action-item reply
#[derive(Debug, Clone, PartialEq)]
pub enum ActionItems {
    /// A JSON array: one card per element (possibly none)
    List(Vec<ActionItem>),
    /// Valid JSON that is not an array
    Other(Value),
    /// Model output that could not be parsed
    Raw(String),
}

impl ActionItems {
    pub fn from_recovered(recovered: &RecoveredValue) -> Self {
        match recovered {
            RecoveredValue::Parsed(Value::Array(items)) => {
                Self::List(items.iter().map(ActionItem::from_value).collect())
            }
            RecoveredValue::Parsed(other) => Self::Other(other.clone()),
            RecoveredValue::Unrecoverable { raw } => Self::Raw(raw.clone()),
        }
    }
}

/// One action item card. Fields are whatever the model returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionItem {
    pub task: Option<String>,
    pub urgency: Option<String>,
    pub deadline: Option<String>,
    pub reason: Option<String>,
}

impl ActionItem {
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| -> Option<String> {
            match value.get(key)? {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            }
        };

        Self {
            task: field("task"),
            urgency: field("urgency"),
            deadline: field("deadline"),
            reason: field("reason"),
        }
    }
}

/// A reply being written or kept for later
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Draft {
    pub subject: String,
    pub body: String,
}

/// A draft copied into the session's saved list
#[derive(Debug, Clone)]
pub struct SavedDraft {
    pub draft: Draft,
    pub saved_at: DateTime<Local>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_email_record_deserializes_seed_shape() {
        let record: EmailRecord = serde_json::from_value(json!({
            "sender": "alice@example.com",
            "subject": "Standup",
            "timestamp": "2025-01-15 09:30",
            "body": "See you at 10."
        }))
        .unwrap();

        assert_eq!(record.label(), "Standup — alice@example.com");
    }

    #[test]
    fn test_action_items_list() {
        let recovered = RecoveredValue::Parsed(json!([
            { "task": "Send slides", "urgency": "high", "deadline": "Friday", "reason": "Board meeting" },
            { "task": "Book room", "deadline": null, "priority": 2 }
        ]));

        let ActionItems::List(items) = ActionItems::from_recovered(&recovered) else {
            panic!("expected list");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].task.as_deref(), Some("Send slides"));
        assert_eq!(items[0].reason.as_deref(), Some("Board meeting"));
        assert_eq!(items[1].deadline, None);
        assert_eq!(items[1].urgency, None);
    }

    #[test]
    fn test_action_item_non_string_fields() {
        let item = ActionItem::from_value(&json!({ "task": "Pay", "urgency": 3 }));
        assert_eq!(item.urgency.as_deref(), Some("3"));

        // Non-object elements produce an empty card
        assert_eq!(ActionItem::from_value(&json!("just text")), ActionItem::default());
    }

    #[test]
    fn test_action_items_other_and_raw() {
        let other = RecoveredValue::Parsed(json!({ "task": "single" }));
        assert!(matches!(ActionItems::from_recovered(&other), ActionItems::Other(_)));

        let raw = RecoveredValue::Unrecoverable {
            raw: "no tasks".to_string(),
        };
        assert_eq!(
            ActionItems::from_recovered(&raw),
            ActionItems::Raw("no tasks".to_string())
        );

        let empty = RecoveredValue::Parsed(json!([]));
        assert_eq!(ActionItems::from_recovered(&empty), ActionItems::List(vec![]));
    }
}
