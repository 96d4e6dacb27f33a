mod category;
mod item;

pub use category::{Category, CategoryInfo};
pub use item::CatalogItem;

use crate::error::{Result, ShopError};
use bevy::prelude::Resource;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::collections::HashMap;

const PRODUCTS_JSON: &str = include_str!("../../assets/products.json");

/// Resource holding every product, grouped by category
///
/// Built once at startup and never mutated afterwards.
#[derive(Resource, Debug, Clone)]
pub struct ProductCatalog {
    sections: HashMap<Category, Section>,
    /// item id -> (category, index within that category)
    index: HashMap<String, (Category, usize)>,
}

#[derive(Debug, Clone)]
struct Section {
    info: CategoryInfo,
    items: Vec<CatalogItem>,
}

#[derive(Deserialize)]
struct RawCatalog {
    categories: Vec<RawCategory>,
}

#[derive(Deserialize)]
struct RawCategory {
    id: Category,
    name: String,
    color: String,
    #[serde(default)]
    items: Vec<RawItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    id: String,
    name: String,
    color: String,
    visual_group: Option<String>,
}

impl ProductCatalog {
    /// Load the stock catalog embedded in the binary
    pub fn load() -> Result<Self> {
        Self::from_json(PRODUCTS_JSON)
    }

    /// Parse a catalog document
    ///
    /// Format: `{"categories": [{"id", "name", "color", "items": [...]}]}` where each
    /// item has `id`, `name`, `color` and an optional `visualGroup`.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawCatalog = serde_json::from_str(json).map_err(ShopError::Catalog)?;

        let mut sections = HashMap::new();
        let mut index = HashMap::new();

        for raw_category in raw.categories {
            let category = raw_category.id;
            // A category listed twice keeps its first name and color
            let section = sections.entry(category).or_insert_with(|| Section {
                info: CategoryInfo {
                    category,
                    name: raw_category.name,
                    color: raw_category.color,
                },
                items: Vec::with_capacity(raw_category.items.len()),
            });

            for raw_item in raw_category.items {
                if index.contains_key(&raw_item.id) {
                    return Err(ShopError::DuplicateItem(raw_item.id));
                }
                index.insert(raw_item.id.clone(), (category, section.items.len()));
                section.items.push(CatalogItem::new(
                    raw_item.id,
                    raw_item.name,
                    raw_item.color,
                    category,
                    raw_item.visual_group,
                ));
            }
        }

        Ok(ProductCatalog { sections, index })
    }

    /// All items stocked in a category (empty if the category has none)
    pub fn items_by_category(&self, category: Category) -> &[CatalogItem] {
        self.sections
            .get(&category)
            .map(|s| s.items.as_slice())
            .unwrap_or(&[])
    }

    pub fn item_by_id(&self, id: &str) -> Option<&CatalogItem> {
        let (category, idx) = self.index.get(id)?;
        self.sections.get(category)?.items.get(*idx)
    }

    pub fn category_info(&self, category: Category) -> Option<&CategoryInfo> {
        self.sections.get(&category).map(|s| &s.info)
    }

    /// Every item from the given categories, in category order
    pub fn pool(&self, categories: &[Category]) -> Vec<&CatalogItem> {
        categories
            .iter()
            .flat_map(|&c| self.items_by_category(c))
            .collect()
    }

    /// Uniform sample without replacement, capped at the pool size
    pub fn random_items<R: Rng + ?Sized>(
        &self,
        count: usize,
        categories: &[Category],
        rng: &mut R,
    ) -> Vec<&CatalogItem> {
        let mut pool = self.pool(categories);
        pool.shuffle(rng);
        pool.truncate(count);
        pool
    }

    /// Total number of items across all categories
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    const TEST_JSON: &str = r##"{
        "categories": [
            {
                "id": "produce",
                "name": "Produce",
                "color": "#8BC34A",
                "items": [
                    { "id": "apple", "name": "Red Apple", "color": "#e53935", "visualGroup": "round_red" },
                    { "id": "tomato", "name": "Tomato", "color": "#f44336", "visualGroup": "round_red" },
                    { "id": "kiwi", "name": "Kiwi", "color": "#8bc34a" }
                ]
            },
            {
                "id": "dairy",
                "name": "Dairy",
                "color": "#FFC107",
                "items": [
                    { "id": "butter", "name": "Butter", "color": "#fff59d", "visualGroup": "block_yellow" }
                ]
            }
        ]
    }"##;

    #[test]
    fn test_stock_catalog_loads() {
        let catalog = ProductCatalog::load().unwrap();

        assert_eq!(catalog.items_by_category(Category::Produce).len(), 10);
        assert_eq!(catalog.items_by_category(Category::Cereal).len(), 8);
        assert_eq!(catalog.items_by_category(Category::Snacks).len(), 8);
        assert_eq!(catalog.items_by_category(Category::Drinks).len(), 8);
        assert_eq!(catalog.items_by_category(Category::Frozen).len(), 7);
        assert_eq!(catalog.items_by_category(Category::Dairy).len(), 7);
        assert_eq!(catalog.len(), 48);
    }

    #[test]
    fn test_items_carry_their_category() {
        let catalog = ProductCatalog::load().unwrap();
        for category in Category::ALL {
            for item in catalog.items_by_category(category) {
                assert_eq!(item.category, category);
            }
        }
    }

    #[test]
    fn test_item_by_id() {
        let catalog = ProductCatalog::from_json(TEST_JSON).unwrap();

        let tomato = catalog.item_by_id("tomato").unwrap();
        assert_eq!(tomato.name, "Tomato");
        assert_eq!(tomato.visual_group, "round_red");

        assert!(catalog.item_by_id("durian").is_none());
    }

    #[test]
    fn test_visual_group_defaults_to_id() {
        let catalog = ProductCatalog::from_json(TEST_JSON).unwrap();
        assert_eq!(catalog.item_by_id("kiwi").unwrap().visual_group, "kiwi");
    }

    #[test]
    fn test_unknown_category_is_empty() {
        let catalog = ProductCatalog::from_json(TEST_JSON).unwrap();
        assert!(catalog.items_by_category(Category::Frozen).is_empty());
        assert!(catalog.category_info(Category::Frozen).is_none());
        assert_eq!(
            catalog.category_info(Category::Dairy).unwrap().name,
            "Dairy"
        );
    }

    #[test]
    fn test_pool_keeps_category_order() {
        let catalog = ProductCatalog::from_json(TEST_JSON).unwrap();
        let ids: Vec<_> = catalog
            .pool(&[Category::Dairy, Category::Produce])
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["butter", "apple", "tomato", "kiwi"]);
    }

    #[test]
    fn test_random_items_without_replacement() {
        let catalog = ProductCatalog::load().unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let picked = catalog.random_items(5, &[Category::Produce], &mut rng);
        assert_eq!(picked.len(), 5);
        let ids: HashSet<_> = picked.iter().map(|i| &i.id).collect();
        assert_eq!(ids.len(), 5);

        // Capped at pool size
        let all = catalog.random_items(100, &[Category::Frozen, Category::Dairy], &mut rng);
        assert_eq!(all.len(), 14);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r##"{"categories": [
            {"id": "snacks", "name": "Snacks", "color": "#f44336", "items": [
                {"id": "candy", "name": "Candy", "color": "#7b1fa2"}
            ]},
            {"id": "frozen", "name": "Frozen", "color": "#00bcd4", "items": [
                {"id": "candy", "name": "Frozen Candy", "color": "#7b1fa2"}
            ]}
        ]}"##;

        let err = ProductCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, ShopError::DuplicateItem(id) if id == "candy"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ProductCatalog::from_json("{\"categories\": [{\"id\": \"bakery\"}]}"),
            Err(ShopError::Catalog(_))
        ));
        assert!(ProductCatalog::from_json("").is_err());
    }
}
