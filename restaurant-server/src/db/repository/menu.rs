//! Menu Repository helpers

use shared::models::MenuItem;

use super::MenuRepository;
use crate::db::StoreResult;

impl MenuRepository {
    /// Menu as shown to guests: by category, then name.
    ///
    /// The sort is stable, so equal keys keep their stored order.
    pub fn find_for_display(&self) -> StoreResult<Vec<MenuItem>> {
        let mut items = self.find_all()?;
        sort_for_display(&mut items);
        Ok(items)
    }
}

pub fn sort_for_display(items: &mut [MenuItem]) {
    items.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| a.name.cmp(&b.name))
    });
}
