//! Level generation, shelf stocking and scoring for a supermarket
//! hidden-object game.
//!
//! The core ([`catalog`], [`game`]) is plain synchronous code that takes an
//! injected random source and caller-sampled timestamps. [`plugin::ShopPlugin`]
//! wires it into a Bevy app for the rendering and input layers to drive.

pub mod catalog;
pub mod error;
pub mod game;
pub mod plugin;
pub mod settings;

pub use catalog::{CatalogItem, Category, ProductCatalog};
pub use error::{Result, ShopError};
pub use game::{
    CollectOutcome, Difficulty, LevelConfig, LevelResult, PersistedProgress, PlaySession,
    ShelfLayout, ShelfSlot, ShoppingList, SlotPos, compute_score, compute_stars,
    generate_shelf_layout, generate_shopping_list, resolve_level,
};
pub use plugin::ShopPlugin;
pub use settings::ShopSettings;
