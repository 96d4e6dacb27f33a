// game/levels.rs

use crate::catalog::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_TARGET_COUNT: usize = 10;
const MAX_ITEMS_PER_SHELF: usize = 25;
const MAX_SHELF_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Score multiplier applied on level completion
    pub fn multiplier(&self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 2.0,
        }
    }

    /// Easier levels keep look-alike products off the same shopping list
    pub fn prefers_distinct_visuals(&self) -> bool {
        matches!(self, Difficulty::Easy | Difficulty::Medium)
    }

    /// Whether the list widget prints product names next to the pictures
    pub fn shows_item_names(&self) -> bool {
        matches!(self, Difficulty::Easy | Difficulty::Medium)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// A canonical level before escalation scaling
#[derive(Debug, Clone, Copy)]
pub struct LevelTemplate {
    pub name: &'static str,
    pub aisle: &'static str,
    pub categories: &'static [Category],
    pub shelf_count: usize,
    pub items_per_shelf: usize,
    pub target_count: usize,
    pub difficulty: Difficulty,
    pub description: &'static str,
}

use Category::*;

const FULL_STORE: &[Category] = &[Produce, Cereal, Snacks, Drinks, Frozen, Dairy];

/// The canonical level table; level numbers past the end wrap around and escalate
pub const LEVEL_TABLE: &[LevelTemplate] = &[
    LevelTemplate {
        name: "Fresh Start",
        aisle: "Produce",
        categories: &[Produce],
        shelf_count: 2,
        items_per_shelf: 8,
        target_count: 2,
        difficulty: Difficulty::Easy,
        description: "Find some fresh produce!",
    },
    LevelTemplate {
        name: "Fruit Basket",
        aisle: "Produce",
        categories: &[Produce],
        shelf_count: 3,
        items_per_shelf: 10,
        target_count: 3,
        difficulty: Difficulty::Easy,
        description: "A few more items to find.",
    },
    LevelTemplate {
        name: "Breakfast Time",
        aisle: "Cereal",
        categories: &[Cereal],
        shelf_count: 3,
        items_per_shelf: 10,
        target_count: 3,
        difficulty: Difficulty::Easy,
        description: "Time for some cereal!",
    },
    LevelTemplate {
        name: "Morning Essentials",
        aisle: "Mixed",
        categories: &[Produce, Dairy],
        shelf_count: 3,
        items_per_shelf: 12,
        target_count: 4,
        difficulty: Difficulty::Medium,
        description: "Breakfast essentials await.",
    },
    LevelTemplate {
        name: "Snack Attack",
        aisle: "Snacks",
        categories: &[Snacks],
        shelf_count: 3,
        items_per_shelf: 12,
        target_count: 4,
        difficulty: Difficulty::Medium,
        description: "Find some tasty treats!",
    },
    LevelTemplate {
        name: "Thirst Quencher",
        aisle: "Beverages",
        categories: &[Drinks],
        shelf_count: 3,
        items_per_shelf: 14,
        target_count: 4,
        difficulty: Difficulty::Medium,
        description: "Stock up on drinks.",
    },
    LevelTemplate {
        name: "Chill Zone",
        aisle: "Frozen",
        categories: &[Frozen],
        shelf_count: 4,
        items_per_shelf: 12,
        target_count: 5,
        difficulty: Difficulty::Medium,
        description: "Explore the freezer aisle.",
    },
    LevelTemplate {
        name: "Big Shop",
        aisle: "Mixed",
        categories: &[Produce, Dairy, Drinks],
        shelf_count: 4,
        items_per_shelf: 14,
        target_count: 5,
        difficulty: Difficulty::Medium,
        description: "A longer shopping list today.",
    },
    LevelTemplate {
        name: "Treat Yourself",
        aisle: "Mixed",
        categories: &[Snacks, Cereal],
        shelf_count: 4,
        items_per_shelf: 16,
        target_count: 6,
        difficulty: Difficulty::Hard,
        description: "So many options!",
    },
    LevelTemplate {
        name: "Master Shopper",
        aisle: "Megastore",
        categories: FULL_STORE,
        shelf_count: 5,
        items_per_shelf: 18,
        target_count: 7,
        difficulty: Difficulty::Hard,
        description: "The ultimate shopping challenge!",
    },
    LevelTemplate {
        name: "Weekly Shop",
        aisle: "Full Store",
        categories: FULL_STORE,
        shelf_count: 5,
        items_per_shelf: 18,
        target_count: 7,
        difficulty: Difficulty::Hard,
        description: "Keep those shopping skills sharp!",
    },
    LevelTemplate {
        name: "Express Lane",
        aisle: "Mixed",
        categories: &[Produce, Snacks, Drinks],
        shelf_count: 4,
        items_per_shelf: 20,
        target_count: 8,
        difficulty: Difficulty::Hard,
        description: "Quick shopping challenge!",
    },
];

/// Concrete, scaled configuration for one level number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelConfig {
    /// The requested 1-based level number
    pub id: u32,
    pub name: String,
    pub aisle: String,
    pub categories: Vec<Category>,
    pub shelf_count: usize,
    pub items_per_shelf: usize,
    pub target_count: usize,
    pub difficulty: Difficulty,
    pub description: String,
}

impl LevelConfig {
    /// Number of shelf slots in the level's grid
    pub fn capacity(&self) -> usize {
        self.shelf_count * self.items_per_shelf
    }
}

/// How many times the canonical table has wrapped by this level
pub fn escalation_cycle(level_number: u32) -> usize {
    (level_number.max(1) as usize - 1) / LEVEL_TABLE.len()
}

/// Resolve any level number to its configuration
///
/// Levels past the end of [`LEVEL_TABLE`] reuse a template with larger
/// counts, capped so layouts stay bounded. Level 0 is treated as level 1.
pub fn resolve_level(level_number: u32) -> LevelConfig {
    let level_number = level_number.max(1);
    let base_index = (level_number as usize - 1) % LEVEL_TABLE.len();
    let cycle = escalation_cycle(level_number);
    let template = &LEVEL_TABLE[base_index];

    LevelConfig {
        id: level_number,
        name: template.name.to_string(),
        aisle: template.aisle.to_string(),
        categories: template.categories.to_vec(),
        shelf_count: (template.shelf_count + cycle / 2).min(MAX_SHELF_COUNT),
        items_per_shelf: (template.items_per_shelf + cycle * 2).min(MAX_ITEMS_PER_SHELF),
        target_count: (template.target_count + cycle).min(MAX_TARGET_COUNT),
        difficulty: template.difficulty,
        description: template.description.to_string(),
    }
}
