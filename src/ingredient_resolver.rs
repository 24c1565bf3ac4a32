//! # Ingredient Resolver
//!
//! Maps free-text ingredient names onto grouping identities for aggregation.
//! Two concerns live here:
//!
//! - **Group-key derivation**: each line item folds into either a
//!   `common:<id>` key (when a canonical ingredient id was assigned upstream)
//!   or an `unmapped:<lowercased name>` key. Pure string work, no I/O.
//! - **Catalog lookup**: the upstream alias-matching step itself — resolving
//!   a raw name against a catalog of canonical ingredients and their
//!   case-insensitive aliases.
//!
//! The display name of a merged group is deliberately taken from the first
//! contributing line item; callers that need a deterministic name must supply
//! line items in a stable order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A deduplicated, named ingredient that multiple free-text spellings can
/// resolve to via aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalIngredient {
    /// Opaque identifier, unique within the catalog
    pub id: i64,
    /// Preferred display name
    pub name: String,
    /// Alternate spellings; matched case-insensitively
    pub aliases: Vec<String>,
}

/// Case-insensitive lookup table from ingredient names and aliases to
/// canonical ingredient ids.
#[derive(Debug, Clone, Default)]
pub struct IngredientCatalog {
    ingredients: Vec<CanonicalIngredient>,
    // lowercased name/alias -> index into `ingredients`
    index: HashMap<String, usize>,
}

impl IngredientCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canonical ingredient. Its name and every alias become
    /// case-insensitive lookup keys; on collision the earlier entry wins,
    /// matching the alias-uniqueness invariant the catalog owner enforces.
    pub fn insert(&mut self, ingredient: CanonicalIngredient) {
        let idx = self.ingredients.len();
        let mut keys = vec![ingredient.name.clone()];
        keys.extend(ingredient.aliases.iter().cloned());
        for key in keys {
            let folded = key.trim().to_lowercase();
            self.index.entry(folded).or_insert(idx);
        }
        self.ingredients.push(ingredient);
    }

    /// Resolve a free-text ingredient name to a canonical ingredient id via
    /// exact or case-insensitive alias match.
    pub fn resolve(&self, raw_name: &str) -> Option<i64> {
        let folded = raw_name.trim().to_lowercase();
        self.index
            .get(&folded)
            .map(|&idx| self.ingredients[idx].id)
    }

    /// Look up a canonical ingredient by id
    pub fn get(&self, id: i64) -> Option<&CanonicalIngredient> {
        self.ingredients.iter().find(|i| i.id == id)
    }
}

/// Derive the aggregation group key for a line item.
///
/// Items resolved to a canonical ingredient group by id; everything else
/// groups by lowercased, trimmed name so differently-cased spellings of the
/// same unmapped ingredient still merge.
pub fn group_key(ingredient_name: &str, canonical_id: Option<i64>) -> String {
    match canonical_id {
        Some(id) => format!("common:{id}"),
        None => format!("unmapped:{}", ingredient_name.trim().to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_key_common() {
        assert_eq!(group_key("Chicken Breast", Some(42)), "common:42");
        // Canonical id wins regardless of spelling
        assert_eq!(
            group_key("chicken breast", Some(42)),
            group_key("CHICKEN BREAST", Some(42))
        );
    }

    #[test]
    fn test_group_key_unmapped_case_folds() {
        assert_eq!(group_key("  Milk ", None), "unmapped:milk");
        assert_eq!(group_key("Milk", None), group_key("milk", None));
        assert_ne!(group_key("milk", None), group_key("oat milk", None));
    }

    #[test]
    fn test_catalog_resolution() {
        let mut catalog = IngredientCatalog::new();
        catalog.insert(CanonicalIngredient {
            id: 7,
            name: "Scallions".to_string(),
            aliases: vec!["green onions".to_string(), "spring onions".to_string()],
        });

        assert_eq!(catalog.resolve("scallions"), Some(7));
        assert_eq!(catalog.resolve("Green Onions"), Some(7));
        assert_eq!(catalog.resolve("  SPRING ONIONS  "), Some(7));
        assert_eq!(catalog.resolve("leeks"), None);
        assert_eq!(catalog.get(7).unwrap().name, "Scallions");
        assert!(catalog.get(8).is_none());
    }

    #[test]
    fn test_catalog_collision_first_wins() {
        let mut catalog = IngredientCatalog::new();
        catalog.insert(CanonicalIngredient {
            id: 1,
            name: "Cilantro".to_string(),
            aliases: vec!["coriander".to_string()],
        });
        catalog.insert(CanonicalIngredient {
            id: 2,
            name: "Coriander Seed".to_string(),
            aliases: vec!["coriander".to_string()],
        });

        assert_eq!(catalog.resolve("coriander"), Some(1));
        assert_eq!(catalog.resolve("coriander seed"), Some(2));
    }
}
