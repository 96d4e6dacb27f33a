use super::category::Category;
use serde::Serialize;

/// A product that can be stocked on a shelf
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    /// Display hint only
    pub color: String,
    pub category: Category,
    /// Items sharing a visual group look alike on the shelf
    pub visual_group: String,
}

impl CatalogItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<String>,
        category: Category,
        visual_group: Option<String>,
    ) -> Self {
        let id = id.into();
        // Items without a group only look like themselves
        let visual_group = visual_group.unwrap_or_else(|| id.clone());
        CatalogItem {
            id,
            name: name.into(),
            color: color.into(),
            category,
            visual_group,
        }
    }

    /// Do these two items look alike to the player?
    pub fn looks_like(&self, other: &CatalogItem) -> bool {
        self.visual_group == other.visual_group
    }
}
