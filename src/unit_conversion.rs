//! # Unit Conversion Engine
//!
//! Converts (quantity, unit) pairs between units of the same dimensional
//! family using the fixed factors in [`crate::unit_model`]. Every function
//! here returns `Option` rather than an error: a unit that cannot be
//! converted simply yields `None`, and callers fall back to listing the
//! quantity as-is. A malformed or exotic unit must never abort a whole
//! grocery list.
//!
//! Volume conversions pass through milliliters, weight conversions through
//! grams. The canonical display units are the cup and the gram.

use crate::unit_model::{
    lookup_factor, normalize_unit, UnitFamily, ML_PER_CUP, VOLUME_CANONICAL_UNIT,
    WEIGHT_CANONICAL_UNIT,
};

/// Convert a quantity into its family's base unit (milliliters or grams).
///
/// Returns `None` for count, non-convertible, and unknown units.
pub fn to_base(quantity: f64, unit: &str) -> Option<(UnitFamily, f64)> {
    let (family, factor) = lookup_factor(&normalize_unit(unit))?;
    Some((family, quantity * factor))
}

/// Convert a quantity into its family's canonical display unit.
///
/// Returns the display unit name ("cup" or "gram") alongside the converted
/// quantity, or `None` when the unit has no convertible family.
pub fn to_canonical(quantity: f64, unit: &str) -> Option<(&'static str, f64)> {
    let (family, base) = to_base(quantity, unit)?;
    match family {
        UnitFamily::Volume => Some((VOLUME_CANONICAL_UNIT, base / ML_PER_CUP)),
        UnitFamily::Weight => Some((WEIGHT_CANONICAL_UNIT, base)),
        UnitFamily::Count | UnitFamily::NonConvertible => None,
    }
}

/// Convert a quantity into the canonical display unit of a specific target
/// family, verifying by dimensional analysis that the unit actually belongs
/// to that family. A mismatch yields `None`, never an error.
pub fn convert_to_family(quantity: f64, unit: &str, target: UnitFamily) -> Option<f64> {
    let (family, base) = to_base(quantity, unit)?;
    if family != target {
        return None;
    }
    match family {
        UnitFamily::Volume => Some(base / ML_PER_CUP),
        UnitFamily::Weight => Some(base),
        UnitFamily::Count | UnitFamily::NonConvertible => None,
    }
}

/// Convert between two units of the same family ("pound" -> "gram").
///
/// Returns `None` when either unit is unconvertible or the families differ.
pub fn convert(quantity: f64, from_unit: &str, to_unit: &str) -> Option<f64> {
    let (from_family, base) = to_base(quantity, from_unit)?;
    let (to_family, to_factor) = lookup_factor(&normalize_unit(to_unit))?;
    if from_family != to_family {
        return None;
    }
    Some(base / to_factor)
}

/// Volume quantity in milliliters, if the unit is a volume unit.
pub fn to_milliliters(quantity: f64, unit: &str) -> Option<f64> {
    match to_base(quantity, unit)? {
        (UnitFamily::Volume, ml) => Some(ml),
        _ => None,
    }
}

/// Weight quantity in grams, if the unit is a weight unit.
pub fn to_grams(quantity: f64, unit: &str) -> Option<f64> {
    match to_base(quantity, unit)? {
        (UnitFamily::Weight, g) => Some(g),
        _ => None,
    }
}
