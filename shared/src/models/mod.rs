//! Data models
//!
//! Flat records persisted as JSON arrays, one file per collection.
//! Every record carries a string `id` from [`crate::util::record_id`].

pub mod menu_item;
pub mod order;
pub mod reservation;
pub mod serde_helpers;

// Re-exports
pub use menu_item::*;
pub use order::*;
pub use reservation::*;

/// Fields found in a stored record that the model does not name.
///
/// Kept so a rewrite of the collection does not lose them.
pub type ExtraFields = serde_json::Map<String, serde_json::Value>;

/// A record stored in one JSON collection file
pub trait Record {
    /// File stem of the collection (`<data_dir>/<COLLECTION>.json`)
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}
