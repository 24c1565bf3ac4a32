//! # Grocery Aggregator
//!
//! Merges the ingredient line items of every recipe scheduled in a shopping
//! period into one deduplicated shopping list. Line items are grouped by
//! resolved ingredient identity, quantities are summed with unit conversion
//! where the units allow it, and each output row keeps the original
//! per-recipe contributions so a shopper can see what each recipe asked for.
//!
//! ## Aggregation rules
//!
//! - A group whose quantity-bearing members all share one unit string is
//!   summed directly in that unit (same-unit short-circuit); no conversion
//!   round-trip, no float drift.
//! - Otherwise the group splits by dimensional family: one row for volume
//!   (in cups), one for weight (in grams), and one row per distinct
//!   non-convertible unit string ("2 bunch" and "3 clove" never merge).
//! - Items with no quantity are excluded from the math but keep their
//!   recipe in the provenance list when they carry a unit.
//! - Aggregation is a pure function: same input, same output. Nothing about
//!   a malformed unit or missing quantity ever fails the whole list.

use crate::ingredient_resolver::group_key;
use crate::unit_conversion::{to_grams, to_milliliters};
use crate::unit_model::{
    classify, normalize_unit, UnitFamily, ML_PER_CUP, VOLUME_CANONICAL_UNIT,
    WEIGHT_CANONICAL_UNIT,
};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Output unit for a placeholder row whose group had no measurable quantity
const PLACEHOLDER_UNIT: &str = "item";

/// One ingredient requirement from one recipe, as supplied by the meal-plan
/// lookup. Immutable input to aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLineItem {
    /// Recipe this requirement came from
    pub recipe_id: i64,
    /// Free-text ingredient name as the recipe states it
    pub name: String,
    /// `None` means "to taste" / unspecified; excluded from quantity math
    pub quantity: Option<f64>,
    /// `None` means a bare count ("3 eggs")
    pub unit: Option<String>,
    /// Canonical ingredient id, when upstream alias matching found one
    pub common_ingredient_id: Option<i64>,
}

/// Original, unconverted requirement of one recipe, kept alongside every
/// aggregated row it contributed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceContribution {
    pub recipe_id: i64,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
}

/// One row of the aggregated shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedLineItem {
    /// Display name, taken from the first contributing line item
    pub name: String,
    /// Sum of contributions, converted into `unit`, rounded to 3 decimals
    pub total_quantity: f64,
    /// Output unit; empty string means a bare count
    pub unit: String,
    /// Every contributing recipe's original quantity and unit. Rows split
    /// from one ingredient group share the full list rather than
    /// partitioning it.
    pub sources: Vec<SourceContribution>,
}

/// Round to 3 decimal places, the precision aggregated totals are stated at.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Aggregate recipe line items into deduplicated shopping-list rows.
///
/// Grouping follows [`group_key`]: canonical ingredient id when present,
/// lowercased name otherwise. Group order and first-occurrence tie-breaks
/// follow the input order, so callers wanting deterministic output supply a
/// deterministically ordered input. An empty input produces an empty output.
pub fn aggregate(line_items: &[IngredientLineItem]) -> Vec<AggregatedLineItem> {
    let mut key_order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<&IngredientLineItem>> = HashMap::new();

    for item in line_items {
        let key = group_key(&item.name, item.common_ingredient_id);
        trace!("line item '{}' (recipe {}) -> group {key}", item.name, item.recipe_id);
        let members = groups.entry(key.clone()).or_default();
        if members.is_empty() {
            key_order.push(key);
        }
        members.push(item);
    }

    debug!(
        "aggregating {} line items into {} ingredient groups",
        line_items.len(),
        key_order.len()
    );

    let mut rows = Vec::new();
    for key in &key_order {
        rows.extend(aggregate_group(&groups[key]));
    }
    rows
}

/// Collapse one ingredient group into its output rows.
fn aggregate_group(members: &[&IngredientLineItem]) -> Vec<AggregatedLineItem> {
    let display_name = members[0].name.clone();

    // Provenance keeps every member that says anything measurable: a
    // quantity, or at least a unit ("to taste").
    let sources: Vec<SourceContribution> = members
        .iter()
        .filter(|m| m.quantity.is_some() || m.unit.is_some())
        .map(|m| SourceContribution {
            recipe_id: m.recipe_id,
            quantity: m.quantity,
            unit: m.unit.clone(),
        })
        .collect();

    let measured: Vec<&&IngredientLineItem> =
        members.iter().filter(|m| m.quantity.is_some()).collect();

    if measured.is_empty() {
        // Nothing to sum; emit a placeholder so the ingredient still shows up
        return vec![AggregatedLineItem {
            name: display_name,
            total_quantity: 0.0,
            unit: PLACEHOLDER_UNIT.to_string(),
            sources,
        }];
    }

    // Same-unit short-circuit: when every measured member already shares one
    // unit string there is nothing to convert, and the user-recognizable
    // unit is kept instead of being forced through cups or grams.
    let first_unit = normalize_unit(measured[0].unit.as_deref().unwrap_or(""));
    if measured
        .iter()
        .all(|m| normalize_unit(m.unit.as_deref().unwrap_or("")) == first_unit)
    {
        let total: f64 = measured.iter().map(|m| m.quantity.unwrap_or(0.0)).sum();
        return vec![AggregatedLineItem {
            name: display_name,
            total_quantity: round3(total),
            unit: measured[0].unit.clone().unwrap_or_default(),
            sources,
        }];
    }

    // Mixed units: split by dimensional family and sum per family.
    let mut volume_ml: Option<f64> = None;
    let mut weight_g: Option<f64> = None;
    // Distinct non-convertible unit strings each get their own row, in
    // first-seen order. Key is the normalized unit, value keeps the verbatim
    // spelling of the first occurrence plus the running sum.
    let mut count_order: Vec<String> = Vec::new();
    let mut count_sums: HashMap<String, (String, f64)> = HashMap::new();

    for member in &measured {
        let quantity = member.quantity.unwrap_or(0.0);
        let raw_unit = member.unit.as_deref().unwrap_or("");
        let family = classify(raw_unit);
        let converted = match family {
            UnitFamily::Volume => to_milliliters(quantity, raw_unit),
            UnitFamily::Weight => to_grams(quantity, raw_unit),
            UnitFamily::Count | UnitFamily::NonConvertible => None,
        };
        match (family, converted) {
            (UnitFamily::Volume, Some(ml)) => {
                volume_ml = Some(volume_ml.unwrap_or(0.0) + ml);
            }
            (UnitFamily::Weight, Some(g)) => {
                weight_g = Some(weight_g.unwrap_or(0.0) + g);
            }
            _ => {
                // Count, non-convertible, unknown, or a conversion that
                // failed dimensional analysis: sum as-is under the verbatim
                // unit string.
                let key = normalize_unit(raw_unit);
                if !count_sums.contains_key(&key) {
                    count_order.push(key.clone());
                }
                let entry = count_sums
                    .entry(key)
                    .or_insert_with(|| (raw_unit.to_string(), 0.0));
                entry.1 += quantity;
            }
        }
    }

    let mut rows = Vec::new();
    if let Some(ml) = volume_ml {
        rows.push(AggregatedLineItem {
            name: display_name.clone(),
            total_quantity: round3(ml / ML_PER_CUP),
            unit: VOLUME_CANONICAL_UNIT.to_string(),
            sources: sources.clone(),
        });
    }
    if let Some(g) = weight_g {
        rows.push(AggregatedLineItem {
            name: display_name.clone(),
            total_quantity: round3(g),
            unit: WEIGHT_CANONICAL_UNIT.to_string(),
            sources: sources.clone(),
        });
    }
    for key in &count_order {
        let (verbatim_unit, sum) = &count_sums[key];
        rows.push(AggregatedLineItem {
            name: display_name.clone(),
            total_quantity: round3(*sum),
            unit: verbatim_unit.clone(),
            sources: sources.clone(),
        });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(
        recipe_id: i64,
        name: &str,
        quantity: Option<f64>,
        unit: Option<&str>,
        common_id: Option<i64>,
    ) -> IngredientLineItem {
        IngredientLineItem {
            recipe_id,
            name: name.to_string(),
            quantity,
            unit: unit.map(str::to_string),
            common_ingredient_id: common_id,
        }
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_same_unit_short_circuit_keeps_unit() {
        let items = vec![
            item(1, "eggs", Some(4.0), Some("whole"), Some(3)),
            item(2, "Eggs", Some(2.0), Some("whole"), Some(3)),
        ];
        let rows = aggregate(&items);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "eggs"); // first occurrence wins
        assert_eq!(rows[0].unit, "whole");
        assert_eq!(rows[0].total_quantity, 6.0);
        assert_eq!(rows[0].sources.len(), 2);
    }

    #[test]
    fn test_bare_counts_sum_with_empty_unit() {
        let items = vec![
            item(1, "eggs", Some(3.0), None, None),
            item(2, "eggs", Some(2.0), None, None),
        ];
        let rows = aggregate(&items);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].unit, "");
        assert_eq!(rows[0].total_quantity, 5.0);
    }

    #[test]
    fn test_mixed_weight_units_convert_to_grams() {
        let items = vec![
            item(1, "pasta", Some(1.0), Some("pound"), None),
            item(2, "pasta", Some(500.0), Some("gram"), None),
        ];
        let rows = aggregate(&items);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].unit, "gram");
        assert!((rows[0].total_quantity - 953.592).abs() < 1e-9);
    }

    #[test]
    fn test_mixed_volume_units_convert_to_cups() {
        let items = vec![
            item(1, "Milk", Some(1.0), Some("cup"), None),
            item(2, "milk", Some(8.0), Some("fluid_ounce"), None),
        ];
        let rows = aggregate(&items);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Milk");
        assert_eq!(rows[0].unit, "cup");
        assert!((rows[0].total_quantity - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_family_split_duplicates_provenance() {
        let items = vec![
            item(1, "chicken", Some(2.0), Some("cup"), Some(9)),
            item(2, "Chicken", Some(250.0), Some("gram"), Some(9)),
            item(3, "chicken breast", Some(1.0), Some("whole"), Some(9)),
        ];
        let rows = aggregate(&items);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].unit, "cup");
        assert_eq!(rows[1].unit, "gram");
        assert_eq!(rows[2].unit, "whole");
        // Every split row carries the full, unconverted contribution list
        for row in &rows {
            assert_eq!(row.name, "chicken");
            assert_eq!(row.sources.len(), 3);
            assert_eq!(row.sources[0].unit.as_deref(), Some("cup"));
            assert_eq!(row.sources[1].unit.as_deref(), Some("gram"));
            assert_eq!(row.sources[2].unit.as_deref(), Some("whole"));
        }
    }

    #[test]
    fn test_distinct_non_convertible_units_stay_separate() {
        let items = vec![
            item(1, "aromatics", Some(2.0), Some("bunch"), Some(4)),
            item(2, "aromatics", Some(3.0), Some("clove"), Some(4)),
            item(3, "aromatics", Some(1.0), Some("bunch"), Some(4)),
        ];
        let rows = aggregate(&items);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].unit, "bunch");
        assert_eq!(rows[0].total_quantity, 3.0);
        assert_eq!(rows[1].unit, "clove");
        assert_eq!(rows[1].total_quantity, 3.0);
    }

    #[test]
    fn test_unitless_never_merges_with_named_non_convertible() {
        let items = vec![
            item(1, "limes", Some(2.0), None, None),
            item(2, "limes", Some(1.0), Some("whole"), None),
        ];
        let rows = aggregate(&items);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].unit, "");
        assert_eq!(rows[0].total_quantity, 2.0);
        assert_eq!(rows[1].unit, "whole");
        assert_eq!(rows[1].total_quantity, 1.0);
    }

    #[test]
    fn test_quantityless_group_gets_placeholder_row() {
        let items = vec![item(1, "salt", None, Some("to taste"), None)];
        let rows = aggregate(&items);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_quantity, 0.0);
        assert_eq!(rows[0].unit, "item");
        assert_eq!(rows[0].sources.len(), 1);
        assert_eq!(rows[0].sources[0].unit.as_deref(), Some("to taste"));
    }

    #[test]
    fn test_quantityless_unitless_item_leaves_no_provenance() {
        let items = vec![
            item(1, "pepper", None, None, None),
            item(2, "pepper", Some(1.0), Some("teaspoon"), None),
        ];
        let rows = aggregate(&items);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sources.len(), 1);
        assert_eq!(rows[0].sources[0].recipe_id, 2);
    }

    #[test]
    fn test_unknown_unit_preserved_verbatim() {
        let items = vec![
            item(1, "basil", Some(2.0), Some("Sprigs"), None),
            item(2, "basil", Some(1.0), Some("bunch"), None),
        ];
        let rows = aggregate(&items);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].unit, "Sprigs");
        assert_eq!(rows[1].unit, "bunch");
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let items = vec![
            item(1, "Milk", Some(1.0), Some("cup"), None),
            item(2, "milk", Some(8.0), Some("fluid_ounce"), None),
            item(3, "salt", None, Some("to taste"), None),
            item(4, "eggs", Some(6.0), None, None),
        ];
        assert_eq!(aggregate(&items), aggregate(&items));
    }

    #[test]
    fn test_group_order_follows_input_order() {
        let items = vec![
            item(1, "zucchini", Some(2.0), None, None),
            item(1, "apples", Some(3.0), None, None),
            item(2, "Zucchini", Some(1.0), None, None),
        ];
        let rows = aggregate(&items);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "zucchini");
        assert_eq!(rows[1].name, "apples");
    }
}
