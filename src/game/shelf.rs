// game/shelf.rs

use super::levels::LevelConfig;
use super::shopping_list::{EntryId, ShoppingList};
use crate::catalog::{CatalogItem, ProductCatalog};
use crate::error::{Result, ShopError};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use std::fmt;

/// Grid position of a slot: shelf row and column within the shelf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotPos {
    pub shelf: usize,
    pub position: usize,
}

impl SlotPos {
    pub const fn new(shelf: usize, position: usize) -> Self {
        SlotPos { shelf, position }
    }
}

impl fmt::Display for SlotPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.shelf, self.position)
    }
}

/// One product placement on a shelf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfSlot {
    pub shelf_index: usize,
    pub position_in_shelf: usize,
    pub item: CatalogItem,
    /// The shopping-list entry this slot satisfies, if it is the designated one
    pub target: Option<EntryId>,
    pub collected: bool,
}

impl ShelfSlot {
    pub fn pos(&self) -> SlotPos {
        SlotPos::new(self.shelf_index, self.position_in_shelf)
    }

    pub fn is_target(&self) -> bool {
        self.target.is_some()
    }
}

/// The full shelf grid for one level, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfLayout {
    shelf_count: usize,
    items_per_shelf: usize,
    slots: Vec<ShelfSlot>,
}

impl ShelfLayout {
    pub fn shelf_count(&self) -> usize {
        self.shelf_count
    }

    pub fn items_per_shelf(&self) -> usize {
        self.items_per_shelf
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[ShelfSlot] {
        &self.slots
    }

    /// Slots grouped by shelf, top shelf first
    pub fn rows(&self) -> impl Iterator<Item = &[ShelfSlot]> {
        self.slots.chunks(self.items_per_shelf.max(1))
    }

    fn index_of(&self, pos: SlotPos) -> Option<usize> {
        (pos.shelf < self.shelf_count && pos.position < self.items_per_shelf)
            .then(|| pos.shelf * self.items_per_shelf + pos.position)
    }

    pub fn slot(&self, pos: SlotPos) -> Option<&ShelfSlot> {
        self.index_of(pos).map(|i| &self.slots[i])
    }

    pub(crate) fn slot_mut(&mut self, pos: SlotPos) -> Option<&mut ShelfSlot> {
        self.index_of(pos).map(|i| &mut self.slots[i])
    }

    /// The designated slot for a shopping-list entry
    pub fn target_slot(&self, entry: EntryId) -> Option<&ShelfSlot> {
        self.slots.iter().find(|s| s.target == Some(entry))
    }

    pub fn target_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_target()).count()
    }
}

/// Stock the shelves for a level
///
/// Every list entry gets exactly one designated slot. The remaining slots are
/// filled with products drawn independently and uniformly from the level's
/// categories, so fillers may repeat and may match list items. The whole
/// assignment is shuffled before being laid out row by row.
pub fn generate_shelf_layout<R: Rng + ?Sized>(
    level: &LevelConfig,
    list: &ShoppingList,
    catalog: &ProductCatalog,
    rng: &mut R,
) -> Result<ShelfLayout> {
    let total_slots = level.capacity();
    // A short list does not excuse a level that could never fit its full list
    let required = level.target_count.max(list.len());
    if required > total_slots {
        return Err(ShopError::Configuration {
            level: level.id,
            target_count: required,
            capacity: total_slots,
        });
    }

    let filler_pool = catalog.pool(&level.categories);
    let filler_count = total_slots - list.len();
    if filler_count > 0 && filler_pool.is_empty() {
        return Err(ShopError::EmptyPool {
            level: level.id,
            missing: filler_count,
        });
    }

    let mut assignments: Vec<(CatalogItem, Option<EntryId>)> = Vec::with_capacity(total_slots);
    assignments.extend(
        list.entries()
            .iter()
            .map(|entry| (entry.item.clone(), Some(entry.id))),
    );
    while assignments.len() < total_slots {
        if let Some(&filler) = filler_pool.choose(rng) {
            assignments.push((filler.clone(), None));
        }
    }

    assignments.shuffle(rng);

    let items_per_shelf = level.items_per_shelf;
    let slots = assignments
        .into_iter()
        .enumerate()
        .map(|(i, (item, target))| ShelfSlot {
            shelf_index: i / items_per_shelf,
            position_in_shelf: i % items_per_shelf,
            item,
            target,
            collected: false,
        })
        .collect();

    log::debug!(
        "level {}: stocked {} slots on {} shelves ({} targets)",
        level.id,
        total_slots,
        level.shelf_count,
        list.len()
    );

    Ok(ShelfLayout {
        shelf_count: level.shelf_count,
        items_per_shelf,
        slots,
    })
}
