//! Menu Item Model

use serde::{Deserialize, Serialize};

use super::{ExtraFields, Record};
use super::serde_helpers::{default_true, string_or_number};
use crate::error::ValidationError;

/// Menu item (菜品)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    /// Stored image filename, empty when the item has no image
    #[serde(default)]
    pub image: String,
    /// Always true for new items; nothing toggles it yet
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Create menu item payload, as submitted by the admin form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuItemCreate {
    pub name: String,
    pub category: String,
    pub description: String,
    /// Raw price text, `12,50` and `12.50` are both accepted
    pub price: String,
}

/// Menu item whose fields passed validation, waiting for an id and image
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemDraft {
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: f64,
}

/// Parse a user-entered price.
///
/// A comma decimal separator is accepted. Non-numeric, non-finite and
/// negative values are rejected.
pub fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    let normalized = raw.trim().replace(',', ".");
    let price: f64 = normalized
        .parse()
        .map_err(|_| ValidationError::InvalidPrice(raw.to_string()))?;

    if !price.is_finite() {
        return Err(ValidationError::InvalidPrice(raw.to_string()));
    }
    if price < 0.0 {
        return Err(ValidationError::NegativePrice(raw.to_string()));
    }
    Ok(price)
}

impl MenuItemCreate {
    pub fn validate(self) -> Result<MenuItemDraft, ValidationError> {
        let price = parse_price(&self.price)?;
        Ok(MenuItemDraft {
            name: self.name,
            category: self.category,
            description: self.description,
            price,
        })
    }
}

impl MenuItemDraft {
    pub fn into_item(self, id: String, image: String) -> MenuItem {
        MenuItem {
            id,
            name: self.name,
            category: self.category,
            description: self.description,
            price: self.price,
            image,
            available: true,
            extra: ExtraFields::new(),
        }
    }
}

impl Record for MenuItem {
    const COLLECTION: &'static str = "menu";

    fn id(&self) -> &str {
        &self.id
    }
}
