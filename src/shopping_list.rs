//! # Shopping List Assembly
//!
//! The thin orchestration layer around the aggregation core: a validated
//! shopping period (the date range whose scheduled recipes feed the list)
//! and the generated grocery list for one shopping date.
//!
//! Generation is regenerate-and-replace: building the list again for the
//! same date and the same line items produces the identical list, so callers
//! can idempotently overwrite any previously stored version. Boundary
//! validation errors (an inverted date range) surface here via `anyhow`;
//! the aggregation itself never fails.

use crate::grocery_aggregator::{aggregate, AggregatedLineItem, IngredientLineItem};
use anyhow::{bail, Result};
use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

/// Inclusive date range covering the meal-plan days a shopping trip buys for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ShoppingPeriod {
    /// Create a period, rejecting ranges that end before they start.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            bail!("shopping period ends ({end}) before it starts ({start})");
        }
        Ok(Self { start, end })
    }

    /// Whether a meal-plan date falls inside this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered, inclusive of both ends
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// A generated grocery list for one shopping date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryList {
    pub shopping_date: NaiveDate,
    pub period: ShoppingPeriod,
    pub items: Vec<AggregatedLineItem>,
}

impl GroceryList {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Aggregate the line items of every recipe scheduled in `period` into the
/// grocery list for `shopping_date`.
///
/// The caller supplies the line items (the meal-plan lookup is its concern)
/// in a stable order; with no line items the list is simply empty.
pub fn generate_grocery_list(
    shopping_date: NaiveDate,
    period: ShoppingPeriod,
    line_items: &[IngredientLineItem],
) -> GroceryList {
    let items = aggregate(line_items);
    info!(
        "generated grocery list for {shopping_date}: {} line items -> {} rows",
        line_items.len(),
        items.len()
    );
    GroceryList {
        shopping_date,
        period,
        items,
    }
}
