//! Repository Module
//!
//! Typed collections over [`JsonStore`]. One repository per record type,
//! backed by `<data_dir>/<Record::COLLECTION>.json`.

pub mod menu;

use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{MenuItem, Order, Record, Reservation};

use super::{JsonStore, StoreResult};

pub type ReservationRepository = Repository<Reservation>;
pub type OrderRepository = Repository<Order>;
pub type MenuRepository = Repository<MenuItem>;

/// Collection of one record type
///
/// Cloning shares the underlying store (and its lock).
#[derive(Debug)]
pub struct Repository<T> {
    store: Arc<JsonStore>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> Repository<T>
where
    T: Record + Serialize + DeserializeOwned,
{
    /// Repository for `<data_dir>/<collection>.json`
    pub fn new(data_dir: &Path) -> Self {
        let path = data_dir.join(format!("{}.json", T::COLLECTION));
        Self {
            store: Arc::new(JsonStore::new(path)),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// All records in stored order
    pub fn find_all(&self) -> StoreResult<Vec<T>> {
        self.store.load()
    }

    /// Overwrite the collection
    pub fn save_all(&self, records: &[T]) -> StoreResult<()> {
        self.store.save(records)
    }

    /// All records, newest first (ids sort in creation order)
    pub fn find_newest_first(&self) -> StoreResult<Vec<T>> {
        let mut records = self.find_all()?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    /// Append one record and persist the collection
    pub fn append(&self, record: T) -> StoreResult<T>
    where
        T: Clone,
    {
        let saved = record.clone();
        self.store.update(move |records: &mut Vec<T>| records.push(record))?;
        tracing::info!(collection = T::COLLECTION, id = %saved.id(), "Record created");
        Ok(saved)
    }

    /// Remove every record whose id equals `id`.
    ///
    /// Returns whether anything was removed. An unknown id is not an error;
    /// the collection is re-saved unchanged.
    pub fn delete(&self, id: &str) -> StoreResult<bool> {
        let removed = self.store.update(|records: &mut Vec<T>| {
            let before = records.len();
            records.retain(|r| r.id() != id);
            before != records.len()
        })?;

        if removed {
            tracing::info!(collection = T::COLLECTION, id = %id, "Record deleted");
        } else {
            tracing::debug!(collection = T::COLLECTION, id = %id, "Delete of unknown id ignored");
        }
        Ok(removed)
    }
}

/// Sort by id descending (newest first)
pub fn sort_newest_first<T: Record>(records: &mut [T]) {
    records.sort_by(|a, b| b.id().cmp(a.id()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{OrderCreate, ReservationCreate};

    fn reservation(id: &str, name: &str) -> Reservation {
        Reservation::new(
            id.into(),
            ReservationCreate {
                name: name.into(),
                people: "2".into(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_file_path_per_collection() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            ReservationRepository::new(dir.path()).path(),
            dir.path().join("reservations.json")
        );
        assert_eq!(
            OrderRepository::new(dir.path()).path(),
            dir.path().join("orders.json")
        );
        assert_eq!(
            MenuRepository::new(dir.path()).path(),
            dir.path().join("menu.json")
        );
    }

    #[test]
    fn test_append_grows_collection_by_one() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ReservationRepository::new(dir.path());
        repo.append(reservation("1", "Aino")).unwrap();

        let before = repo.find_all().unwrap();
        repo.append(reservation("2", "Mika")).unwrap();
        let after = repo.find_all().unwrap();

        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(after.last().unwrap().name, "Mika");
    }

    #[test]
    fn test_delete_existing_keeps_others_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ReservationRepository::new(dir.path());
        repo.save_all(&[
            reservation("3", "c"),
            reservation("1", "a"),
            reservation("2", "b"),
        ])
        .unwrap();

        assert!(repo.delete("1").unwrap());

        let remaining = repo.find_all().unwrap();
        assert_eq!(remaining, vec![reservation("3", "c"), reservation("2", "b")]);
    }

    #[test]
    fn test_delete_unknown_id_leaves_collection_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let repo = OrderRepository::new(dir.path());
        let order = Order::new("1".into(), OrderCreate::default());
        repo.save_all(std::slice::from_ref(&order)).unwrap();

        assert!(!repo.delete("nope").unwrap());
        assert_eq!(repo.find_all().unwrap(), vec![order]);
    }

    #[test]
    fn test_find_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ReservationRepository::new(dir.path());
        repo.save_all(&[
            reservation("20240101120000", "old"),
            reservation("20250101120000000001", "newest"),
            reservation("20240601120000", "middle"),
        ])
        .unwrap();

        let names: Vec<_> = repo
            .find_newest_first()
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["newest", "middle", "old"]);
    }
}
