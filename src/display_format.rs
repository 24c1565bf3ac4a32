//! # Display Formatter
//!
//! Turns aggregated decimal quantities into human-friendly strings:
//!
//! - **Recipe-exact rendering**: decimals become common cooking fractions
//!   with Unicode glyphs ("1.5" -> "1 ½", "0.333" -> "⅓").
//! - **Shopping equivalents**: convertible quantities get a metric and an
//!   imperial equivalent, each rounded *up* to a shopper-friendly
//!   granularity. A shopper must buy at least the needed amount, so these
//!   never round down.
//!
//! Non-convertible units ("bunch", "to taste") keep their original spelling
//! and get no imperial counterpart, avoiding a duplicated "1 bunch / 1 bunch"
//! pair.

use crate::unit_conversion::{to_grams, to_milliliters};
use crate::unit_model::{classify, UnitFamily, GRAMS_PER_OUNCE, GRAMS_PER_POUND, ML_PER_FLUID_OUNCE};
use serde::{Deserialize, Serialize};

/// Tolerance when matching a decimal remainder to a cooking fraction
const FRACTION_TOLERANCE: f64 = 0.01;

/// The fractions cooks actually use, with their display glyphs
const COMMON_FRACTIONS: [(u32, u32); 9] = [
    (1, 8),
    (1, 6),
    (1, 4),
    (1, 3),
    (1, 2),
    (2, 3),
    (3, 4),
    (5, 6),
    (7, 8),
];

/// Metric and imperial shopping renderings of one quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingEquivalents {
    /// Recipe-exact quantity in the original unit ("2 ½ cup", "1 bunch")
    pub display: String,
    /// Metric equivalent rounded up ("475 ml", "1.5 kg"); mirrors `display`
    /// for non-convertible units
    pub metric: String,
    /// Imperial equivalent rounded up ("16 fl oz", "2 lb"); `None` for
    /// non-convertible units
    pub imperial: Option<String>,
}

/// Glyph for a reduced fraction, covering the nine common cooking fractions
/// plus fifths. Anything else renders as "num/denom".
fn fraction_glyph(numerator: u32, denominator: u32) -> Option<&'static str> {
    match (numerator, denominator) {
        (1, 2) => Some("½"),
        (1, 3) => Some("⅓"),
        (2, 3) => Some("⅔"),
        (1, 4) => Some("¼"),
        (3, 4) => Some("¾"),
        (1, 5) => Some("⅕"),
        (2, 5) => Some("⅖"),
        (3, 5) => Some("⅗"),
        (4, 5) => Some("⅘"),
        (1, 6) => Some("⅙"),
        (5, 6) => Some("⅚"),
        (1, 8) => Some("⅛"),
        (7, 8) => Some("⅞"),
        _ => None,
    }
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn fraction_string(numerator: u32, denominator: u32) -> String {
    match fraction_glyph(numerator, denominator) {
        Some(glyph) => glyph.to_string(),
        None => format!("{numerator}/{denominator}"),
    }
}

/// Best fraction for a remainder in (0, 1): prefer the closest common
/// cooking fraction within tolerance, otherwise the best fit with a
/// denominator of 8 or less.
fn closest_fraction(remainder: f64) -> (u32, u32) {
    let mut best: Option<(f64, (u32, u32))> = None;
    for &(num, denom) in &COMMON_FRACTIONS {
        let diff = (remainder - num as f64 / denom as f64).abs();
        if diff <= FRACTION_TOLERANCE && best.map_or(true, |(d, _)| diff < d) {
            best = Some((diff, (num, denom)));
        }
    }
    if let Some((_, frac)) = best {
        return frac;
    }
    // General best fit, denominator capped at 8
    let mut fit = (f64::MAX, (1, 2));
    for denom in 2..=8u32 {
        for num in 1..denom {
            let diff = (remainder - num as f64 / denom as f64).abs();
            if diff < fit.0 {
                fit = (diff, (num, denom));
            }
        }
    }
    let (num, denom) = fit.1;
    let divisor = gcd(num, denom);
    (num / divisor, denom / divisor)
}

/// Render a decimal quantity the way a recipe would state it, using common
/// cooking fractions ("1.5" -> "1 ½", "0.25" -> "¼", "3.0" -> "3").
pub fn format_recipe_quantity(quantity: f64) -> String {
    let whole = quantity.trunc() as i64;
    let remainder = quantity.fract();

    if remainder < FRACTION_TOLERANCE {
        return whole.to_string();
    }
    if remainder > 1.0 - FRACTION_TOLERANCE {
        return (whole + 1).to_string();
    }

    let (numerator, denominator) = closest_fraction(remainder);
    let fraction = fraction_string(numerator, denominator);
    if whole == 0 {
        fraction
    } else {
        format!("{whole} {fraction}")
    }
}

/// Ceiling to a multiple of `step`, with a small epsilon so values that are
/// already an exact multiple (up to float noise) do not jump a whole step.
fn ceil_to_step(value: f64, step: f64) -> f64 {
    (value / step - 1e-9).ceil() * step
}

fn metric_volume(ml: f64) -> String {
    if ml < 1000.0 {
        format!("{} ml", ceil_to_step(ml, 5.0) as i64)
    } else {
        format!("{:.1} L", ceil_to_step(ml / 1000.0, 0.1))
    }
}

fn metric_weight(grams: f64) -> String {
    if grams < 1000.0 {
        format!("{} g", ceil_to_step(grams, 5.0) as i64)
    } else {
        format!("{:.1} kg", ceil_to_step(grams / 1000.0, 0.1))
    }
}

fn imperial_volume(ml: f64) -> String {
    format!("{} fl oz", ceil_to_step(ml / ML_PER_FLUID_OUNCE, 1.0) as i64)
}

fn imperial_weight(grams: f64) -> String {
    let ounces = grams / GRAMS_PER_OUNCE;
    // Epsilon keeps exactly-one-pound inputs on the pound side of the split
    if ounces < 16.0 - 1e-9 {
        format!("{} oz", ceil_to_step(ounces, 1.0) as i64)
    } else {
        format!("{} lb", ceil_to_step(grams / GRAMS_PER_POUND, 1.0) as i64)
    }
}

/// Render a quantity in its original unit plus shopping-rounded metric and
/// imperial equivalents.
///
/// Volume and weight quantities get both equivalents; count and
/// non-convertible quantities keep only the original rendering, with the
/// unit's original casing preserved verbatim.
pub fn format_shopping_equivalents(quantity: f64, unit: &str) -> ShoppingEquivalents {
    let exact = format_recipe_quantity(quantity);
    let display = if unit.trim().is_empty() {
        exact
    } else {
        format!("{} {}", exact, unit.trim())
    };

    let converted = match classify(unit) {
        UnitFamily::Volume => {
            to_milliliters(quantity, unit).map(|ml| (metric_volume(ml), imperial_volume(ml)))
        }
        UnitFamily::Weight => {
            to_grams(quantity, unit).map(|g| (metric_weight(g), imperial_weight(g)))
        }
        UnitFamily::Count | UnitFamily::NonConvertible => None,
    };

    match converted {
        Some((metric, imperial)) => ShoppingEquivalents {
            display,
            metric,
            imperial: Some(imperial),
        },
        None => ShoppingEquivalents {
            metric: display.clone(),
            display,
            imperial: None,
        },
    }
}
