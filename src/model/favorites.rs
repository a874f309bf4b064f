use std::collections::BTreeSet;

use anyhow::Result;

use crate::store::LocalStore;

pub const FAVORITES_KEY: &str = "favs";

/// Ids the user starred. Loaded once at startup, written back on every toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    ids: BTreeSet<u32>,
}

impl Favorites {
    pub fn load(store: &LocalStore) -> Self {
        let ids: Vec<u32> = store.get(FAVORITES_KEY).unwrap_or_default();
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn save(&self, store: &mut LocalStore) -> Result<()> {
        let ids: Vec<u32> = self.ids.iter().copied().collect();
        store.set(FAVORITES_KEY, &ids)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    /// Flips membership and returns whether `id` is now a favorite.
    pub fn toggle(&mut self, id: u32) -> bool {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn glyph(&self, id: u32) -> &'static str {
        if self.contains(id) {
            "⭐"
        } else {
            "☆"
        }
    }
}
