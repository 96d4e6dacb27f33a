// game/shopping_list.rs

use super::levels::{Difficulty, LevelConfig};
use crate::catalog::{CatalogItem, ProductCatalog};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::fmt;

/// Position of an entry on its shopping list
///
/// Shelf slots reference entries by this id rather than by item id, since
/// filler slots may carry the same product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub usize);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListEntry {
    pub id: EntryId,
    pub item: CatalogItem,
    pub found: bool,
}

impl ShoppingListEntry {
    /// Caption under the entry's picture; hard levels show pictures only
    pub fn label(&self, difficulty: Difficulty) -> Option<&str> {
        difficulty.shows_item_names().then_some(self.item.name.as_str())
    }
}

/// The ordered list of products the player has to find
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingList {
    entries: Vec<ShoppingListEntry>,
    /// How many entries the level asked for
    requested: usize,
}

impl ShoppingList {
    /// Build a list from already chosen items, in order
    pub fn from_items(items: impl IntoIterator<Item = CatalogItem>, requested: usize) -> Self {
        let entries = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| ShoppingListEntry {
                id: EntryId(i),
                item,
                found: false,
            })
            .collect();
        ShoppingList { entries, requested }
    }

    pub fn entries(&self) -> &[ShoppingListEntry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&ShoppingListEntry> {
        self.entries.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    /// The category pool could not supply as many unique items as requested
    pub fn is_short(&self) -> bool {
        self.entries.len() < self.requested
    }

    pub fn found_count(&self) -> usize {
        self.entries.iter().filter(|e| e.found).count()
    }

    /// Entries still to be found
    pub fn remaining(&self) -> impl Iterator<Item = &ShoppingListEntry> {
        self.entries.iter().filter(|e| !e.found)
    }

    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|e| e.found)
    }

    /// Mark an entry found; returns false if it was already found or unknown
    pub(crate) fn mark_found(&mut self, id: EntryId) -> bool {
        match self.entries.get_mut(id.0) {
            Some(entry) if !entry.found => {
                entry.found = true;
                true
            }
            _ => false,
        }
    }
}

/// Pick the level's shopping list from its category pool
///
/// On easy and medium levels a first pass only takes items whose visual group
/// is not on the list yet. A second pass then tops up with any unused item.
/// If the pool holds fewer unique items than requested the list comes back
/// short; it is never padded with repeats.
pub fn generate_shopping_list<R: Rng + ?Sized>(
    level: &LevelConfig,
    catalog: &ProductCatalog,
    rng: &mut R,
) -> ShoppingList {
    let target_count = level.target_count;
    let mut pool = catalog.pool(&level.categories);
    pool.shuffle(rng);

    let mut selected: Vec<&CatalogItem> = Vec::with_capacity(target_count);
    let mut used_ids: HashSet<&str> = HashSet::new();

    if level.difficulty.prefers_distinct_visuals() {
        for &item in &pool {
            if selected.len() >= target_count {
                break;
            }
            if used_ids.contains(item.id.as_str()) {
                continue;
            }
            if !selected.iter().any(|picked| picked.looks_like(item)) {
                used_ids.insert(item.id.as_str());
                selected.push(item);
            }
        }
    }

    for &item in &pool {
        if selected.len() >= target_count {
            break;
        }
        if used_ids.insert(item.id.as_str()) {
            selected.push(item);
        }
    }

    if selected.len() < target_count {
        log::warn!(
            "level {}: only {} of {} list items available in {:?}",
            level.id,
            selected.len(),
            target_count,
            level.categories
        );
    } else {
        log::debug!(
            "level {}: shopping list {:?}",
            level.id,
            selected.iter().map(|i| i.id.as_str()).collect::<Vec<_>>()
        );
    }

    ShoppingList::from_items(selected.into_iter().cloned(), target_count)
}
