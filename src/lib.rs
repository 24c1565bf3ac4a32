//! # Groceries
//!
//! Grocery-list ingredient aggregation: merges the ingredient requirements
//! of the recipes scheduled in a shopping period into one deduplicated,
//! unit-converted shopping list with per-recipe provenance and
//! human-friendly display quantities.

pub mod display_format;
pub mod grocery_aggregator;
pub mod ingredient_resolver;
pub mod line_parser;
pub mod shopping_list;
pub mod unit_conversion;
pub mod unit_model;
