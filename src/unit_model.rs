//! # Unit Model
//!
//! This module defines the fixed vocabulary of measurement units the grocery
//! aggregation engine understands: which dimensional family each unit belongs
//! to (volume, weight, count, or non-convertible) and the conversion factor
//! into the family's base unit (milliliters for volume, grams for weight).
//!
//! ## Core Concepts
//!
//! - **Dimensional family**: determines whether two units can be summed together
//! - **Base unit**: the unit all conversions pass through (ml / g)
//! - **Canonical display unit**: the unit aggregated quantities are presented in
//!   (cup for volume, gram for weight)
//!
//! Unknown unit strings are never an error; they classify as
//! [`UnitFamily::NonConvertible`] and are preserved verbatim downstream.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Milliliters per US cup. 8 fluid ounces equal exactly one cup.
pub const ML_PER_CUP: f64 = 236.588_236_5;
/// Milliliters per US fluid ounce.
pub const ML_PER_FLUID_OUNCE: f64 = 29.573_529_562_5;
/// Grams per avoirdupois ounce.
pub const GRAMS_PER_OUNCE: f64 = 28.349_523_125;
/// Grams per avoirdupois pound.
pub const GRAMS_PER_POUND: f64 = 453.592_37;

/// The unit volume quantities are displayed in after aggregation.
pub const VOLUME_CANONICAL_UNIT: &str = "cup";
/// The unit weight quantities are displayed in after aggregation.
pub const WEIGHT_CANONICAL_UNIT: &str = "gram";

/// Dimensional family of a measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitFamily {
    /// Volume units (cups, tablespoons, liters, ...)
    Volume,
    /// Weight units (grams, ounces, pounds, ...)
    Weight,
    /// Bare counts with no unit at all ("3 eggs")
    Count,
    /// Units that cannot be converted ("bunch", "to taste", unknown strings)
    NonConvertible,
}

lazy_static! {
    /// Normalized unit string -> (family, factor into the family base unit).
    /// Volume factors are milliliters per unit, weight factors grams per unit.
    static ref CONVERSION_TABLE: HashMap<&'static str, (UnitFamily, f64)> = {
        use UnitFamily::{Volume, Weight};
        let mut map = HashMap::new();

        // Volume units
        map.insert("cup", (Volume, ML_PER_CUP));
        map.insert("cups", (Volume, ML_PER_CUP));
        map.insert("c", (Volume, ML_PER_CUP));
        map.insert("tablespoon", (Volume, ML_PER_CUP / 16.0));
        map.insert("tablespoons", (Volume, ML_PER_CUP / 16.0));
        map.insert("tbsp", (Volume, ML_PER_CUP / 16.0));
        map.insert("teaspoon", (Volume, ML_PER_CUP / 48.0));
        map.insert("teaspoons", (Volume, ML_PER_CUP / 48.0));
        map.insert("tsp", (Volume, ML_PER_CUP / 48.0));
        map.insert("fluid_ounce", (Volume, ML_PER_FLUID_OUNCE));
        map.insert("fluid_ounces", (Volume, ML_PER_FLUID_OUNCE));
        map.insert("fluid ounce", (Volume, ML_PER_FLUID_OUNCE));
        map.insert("fluid ounces", (Volume, ML_PER_FLUID_OUNCE));
        map.insert("fl oz", (Volume, ML_PER_FLUID_OUNCE));
        map.insert("floz", (Volume, ML_PER_FLUID_OUNCE));
        map.insert("pint", (Volume, 2.0 * ML_PER_CUP));
        map.insert("pints", (Volume, 2.0 * ML_PER_CUP));
        map.insert("pt", (Volume, 2.0 * ML_PER_CUP));
        map.insert("quart", (Volume, 4.0 * ML_PER_CUP));
        map.insert("quarts", (Volume, 4.0 * ML_PER_CUP));
        map.insert("qt", (Volume, 4.0 * ML_PER_CUP));
        map.insert("gallon", (Volume, 16.0 * ML_PER_CUP));
        map.insert("gallons", (Volume, 16.0 * ML_PER_CUP));
        map.insert("gal", (Volume, 16.0 * ML_PER_CUP));
        map.insert("ml", (Volume, 1.0));
        map.insert("milliliter", (Volume, 1.0));
        map.insert("milliliters", (Volume, 1.0));
        map.insert("millilitre", (Volume, 1.0));
        map.insert("millilitres", (Volume, 1.0));
        map.insert("l", (Volume, 1000.0));
        map.insert("liter", (Volume, 1000.0));
        map.insert("liters", (Volume, 1000.0));
        map.insert("litre", (Volume, 1000.0));
        map.insert("litres", (Volume, 1000.0));

        // Weight units
        map.insert("gram", (Weight, 1.0));
        map.insert("grams", (Weight, 1.0));
        map.insert("g", (Weight, 1.0));
        map.insert("kilogram", (Weight, 1000.0));
        map.insert("kilograms", (Weight, 1000.0));
        map.insert("kg", (Weight, 1000.0));
        map.insert("ounce", (Weight, GRAMS_PER_OUNCE));
        map.insert("ounces", (Weight, GRAMS_PER_OUNCE));
        map.insert("oz", (Weight, GRAMS_PER_OUNCE));
        map.insert("pound", (Weight, GRAMS_PER_POUND));
        map.insert("pounds", (Weight, GRAMS_PER_POUND));
        map.insert("lb", (Weight, GRAMS_PER_POUND));
        map.insert("lbs", (Weight, GRAMS_PER_POUND));

        map
    };

    /// Units we know exist but deliberately never convert.
    static ref NON_CONVERTIBLE_UNITS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        for unit in [
            "bunch", "bunches", "clove", "cloves", "to taste", "pinch",
            "pinches", "dash", "dashes", "whole", "piece", "pieces", "item",
            "items", "each",
        ] {
            set.insert(unit);
        }
        set
    };
}

/// Normalize a raw unit string for table lookup and grouping: trim, lowercase,
/// collapse internal whitespace.
pub fn normalize_unit(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Look up the family and base-unit factor for an already-normalized unit
/// string, with a singular fallback for simple plurals ("cups" -> "cup").
pub fn lookup_factor(normalized: &str) -> Option<(UnitFamily, f64)> {
    if let Some(&entry) = CONVERSION_TABLE.get(normalized) {
        return Some(entry);
    }
    if normalized.len() > 1 {
        if let Some(stripped) = normalized.strip_suffix('s') {
            if let Some(&entry) = CONVERSION_TABLE.get(stripped) {
                return Some(entry);
            }
        }
    }
    None
}

/// Classify a raw unit string into its dimensional family.
///
/// Empty (or whitespace-only) strings are bare counts. Anything that is
/// neither a known convertible unit nor empty is non-convertible — unknown
/// units degrade gracefully rather than erroring.
pub fn classify(raw_unit: &str) -> UnitFamily {
    let normalized = normalize_unit(raw_unit);
    if normalized.is_empty() {
        return UnitFamily::Count;
    }
    if let Some((family, _)) = lookup_factor(&normalized) {
        return family;
    }
    UnitFamily::NonConvertible
}

/// Whether a unit string is one of the explicitly listed non-convertible
/// units ("bunch", "clove", "to taste", ...), as opposed to merely unknown.
pub fn is_known_non_convertible(raw_unit: &str) -> bool {
    let normalized = normalize_unit(raw_unit);
    if NON_CONVERTIBLE_UNITS.contains(normalized.as_str()) {
        return true;
    }
    if normalized.len() > 1 {
        if let Some(stripped) = normalized.strip_suffix('s') {
            return NON_CONVERTIBLE_UNITS.contains(stripped);
        }
    }
    false
}
