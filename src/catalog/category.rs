use serde::{Deserialize, Serialize};
use std::fmt;

/// Supermarket sections a level can draw products from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Produce,
    Cereal,
    Snacks,
    Drinks,
    Frozen,
    Dairy,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Produce,
        Category::Cereal,
        Category::Snacks,
        Category::Drinks,
        Category::Frozen,
        Category::Dairy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Produce => "produce",
            Category::Cereal => "cereal",
            Category::Snacks => "snacks",
            Category::Drinks => "drinks",
            Category::Frozen => "frozen",
            Category::Dairy => "dairy",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display data for a category (aisle signs, list tints)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInfo {
    pub category: Category,
    pub name: String,
    pub color: String,
}
