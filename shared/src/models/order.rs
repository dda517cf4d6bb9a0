//! Order Model

use serde::{Deserialize, Serialize};

use super::{ExtraFields, Record};
use super::serde_helpers::string_or_number;

/// Status given to every new order.
///
/// No workflow moves an order out of this state; the field is kept so
/// existing files round-trip and a later workflow has somewhere to live.
pub const ORDER_STATUS_NEW: &str = "new";

fn default_status() -> String {
    ORDER_STATUS_NEW.to_string()
}

/// Table order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub table: String,
    /// Free-text list of ordered items
    #[serde(default)]
    pub items: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Create order payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderCreate {
    pub name: String,
    pub table: String,
    pub items: String,
    pub notes: String,
}

impl Order {
    pub fn new(id: String, data: OrderCreate) -> Self {
        Self {
            id,
            name: data.name,
            table: data.table,
            items: data.items,
            notes: data.notes,
            status: default_status(),
            extra: ExtraFields::new(),
        }
    }
}

impl Record for Order {
    const COLLECTION: &'static str = "orders";

    fn id(&self) -> &str {
        &self.id
    }
}
