pub mod levels;
pub mod progress;
pub mod scoring;
pub mod session;
pub mod shelf;
pub mod shopping_list;

pub use levels::{Difficulty, LEVEL_TABLE, LevelConfig, LevelTemplate, escalation_cycle, resolve_level};
pub use progress::{JsonFileStore, MemoryStore, PersistedProgress, ProgressStore};
pub use scoring::{LevelResult, compute_score, compute_stars, format_elapsed};
pub use session::{CollectOutcome, PlaySession};
pub use shelf::{ShelfLayout, ShelfSlot, SlotPos, generate_shelf_layout};
pub use shopping_list::{EntryId, ShoppingList, ShoppingListEntry, generate_shopping_list};
