// game/session.rs

use super::levels::LevelConfig;
use super::scoring::LevelResult;
use super::shelf::{ShelfLayout, SlotPos, generate_shelf_layout};
use super::shopping_list::{EntryId, ShoppingList, generate_shopping_list};
use crate::catalog::ProductCatalog;
use crate::error::Result;
use bevy::prelude::Resource;
use rand::Rng;

/// A play session - one attempt at one level
///
/// Owns the shopping list and the shelf grid; both are dropped with the session.
/// Times are seconds on whatever monotonic clock the caller samples.
#[derive(Debug, Clone, Resource)]
pub struct PlaySession {
    level: LevelConfig,
    shopping_list: ShoppingList,
    layout: ShelfLayout,
    mistakes: u32,
    found_count: usize,
    started_at: f64,
}

/// What happened when the player tapped a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    /// The designated slot for a list entry
    Correct {
        entry: EntryId,
        level_complete: bool,
    },
    /// Any other product; counted as a mistake
    Wrong,
    /// Slot was already collected, nothing changes
    AlreadyCollected,
    /// Position is outside the shelf grid
    NoSlot,
}

impl CollectOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, CollectOutcome::Correct { .. })
    }
}

impl PlaySession {
    /// Generate the list and shelves for `level` and start the clock at `started_at`
    pub fn start<R: Rng + ?Sized>(
        level: LevelConfig,
        catalog: &ProductCatalog,
        rng: &mut R,
        started_at: f64,
    ) -> Result<Self> {
        let shopping_list = generate_shopping_list(&level, catalog, rng);
        let layout = generate_shelf_layout(&level, &shopping_list, catalog, rng)?;
        Ok(Self::from_parts(level, shopping_list, layout, started_at))
    }

    /// Assemble a session from a pre-built list and layout
    pub fn from_parts(
        level: LevelConfig,
        shopping_list: ShoppingList,
        layout: ShelfLayout,
        started_at: f64,
    ) -> Self {
        PlaySession {
            level,
            shopping_list,
            layout,
            mistakes: 0,
            found_count: 0,
            started_at,
        }
    }

    // === Query Methods ===

    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    pub fn shopping_list(&self) -> &ShoppingList {
        &self.shopping_list
    }

    pub fn layout(&self) -> &ShelfLayout {
        &self.layout
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn found_count(&self) -> usize {
        self.found_count
    }

    pub fn started_at(&self) -> f64 {
        self.started_at
    }

    /// Seconds since the session started, never negative
    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.started_at).max(0.0)
    }

    /// All list entries found (measured against the generated list, which may be short)
    pub fn is_complete(&self) -> bool {
        self.found_count == self.shopping_list.len()
    }

    // === Mutation Methods ===

    /// Resolve a tap on the slot at `pos`
    ///
    /// Wrong products stay on the shelf so every repeated wrong tap counts.
    pub fn collect(&mut self, pos: SlotPos) -> CollectOutcome {
        let Some(slot) = self.layout.slot_mut(pos) else {
            return CollectOutcome::NoSlot;
        };

        if slot.collected {
            return CollectOutcome::AlreadyCollected;
        }

        match slot.target {
            Some(entry) => {
                slot.collected = true;
                self.shopping_list.mark_found(entry);
                self.found_count += 1;
                log::debug!(
                    "level {}: found {} at {} ({}/{})",
                    self.level.id,
                    slot.item.id,
                    pos,
                    self.found_count,
                    self.shopping_list.len()
                );
                CollectOutcome::Correct {
                    entry,
                    level_complete: self.is_complete(),
                }
            }
            None => {
                self.mistakes += 1;
                CollectOutcome::Wrong
            }
        }
    }

    /// Score the session as it stands at `now`
    pub fn finish(&self, now: f64) -> LevelResult {
        LevelResult::new(&self.level, self.elapsed(now), self.mistakes, self.found_count)
    }
}
