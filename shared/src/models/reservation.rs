//! Reservation Model

use serde::{Deserialize, Serialize};

use super::{ExtraFields, Record};
use super::serde_helpers::string_or_number;

/// Table reservation (顾客提交的订座)
///
/// All fields besides `id` are free-form text as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub people: String,
    #[serde(default)]
    pub notes: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Create reservation payload (public form; missing fields are empty)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationCreate {
    pub name: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub people: String,
    pub notes: String,
}

impl Reservation {
    pub fn new(id: String, data: ReservationCreate) -> Self {
        Self {
            id,
            name: data.name,
            phone: data.phone,
            date: data.date,
            time: data.time,
            people: data.people,
            notes: data.notes,
            extra: ExtraFields::new(),
        }
    }
}

impl Record for Reservation {
    const COLLECTION: &'static str = "reservations";

    fn id(&self) -> &str {
        &self.id
    }
}
