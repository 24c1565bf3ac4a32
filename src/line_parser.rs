//! # Ingredient Line Parser
//!
//! Parses a free-text ingredient line ("2 cups flour", "1/2 lb butter",
//! "salt to taste") into the (quantity, unit, name) triple the aggregation
//! core consumes. This is deliberately a simple regex-based concern: it
//! handles decimals, plain and mixed fractions, and "to taste"-style lines,
//! and leaves anything fancier to the caller.
//!
//! Unit words are recognized against the fixed unit table (with a
//! singular/plural fallback); unrecognized words stay part of the ingredient
//! name, so "2 eggs" parses as a bare count of "eggs" rather than inventing
//! a unit.

use crate::unit_model::{is_known_non_convertible, lookup_factor, normalize_unit};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

/// Regex patterns for the leading-quantity forms
static LINE_PATTERNS: LazyLock<LinePatterns> = LazyLock::new(LinePatterns::new);

/// Phrases that mean "no measurable quantity"
static AMBIGUOUS_SUFFIXES: &[&str] = &["to taste", "as needed"];

struct LinePatterns {
    /// Matches "1/2 ..." and "2 1/4 ..."
    fraction: Regex,
    /// Matches "2 ..." and "1.5 ..."
    decimal: Regex,
}

impl LinePatterns {
    fn new() -> Self {
        Self {
            fraction: Regex::new(r"^(?:(?P<whole>\d+)\s+)?(?P<num>\d+)/(?P<denom>\d+)\s+(?P<rest>\S.*)$")
                .expect("fraction pattern should be valid"),
            decimal: Regex::new(r"^(?P<qty>\d+(?:\.\d+)?)\s+(?P<rest>\S.*)$")
                .expect("decimal pattern should be valid"),
        }
    }
}

/// A parsed (quantity, unit, name) triple ready for aggregation
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    /// `None` for "to taste" style lines and lines with no leading number
    pub quantity: Option<f64>,
    /// Unit word as written; `None` for bare counts ("2 eggs")
    pub unit: Option<String>,
    /// Ingredient name with quantity/unit stripped
    pub name: String,
}

/// Errors that can occur while parsing one line
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    EmptyLine,
    MissingName,
    DivisionByZero,
    InvalidNumber,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyLine => write!(f, "Line is empty"),
            ParseError::MissingName => write!(f, "No ingredient name found"),
            ParseError::DivisionByZero => write!(f, "Division by zero in fraction"),
            ParseError::InvalidNumber => write!(f, "Invalid number format"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a single ingredient line.
pub fn parse_line(line: &str) -> Result<ParsedLine, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::EmptyLine);
    }

    // "salt to taste" -> no quantity, the phrase itself becomes the unit
    let lowered = line.to_lowercase();
    for suffix in AMBIGUOUS_SUFFIXES {
        if lowered.ends_with(suffix) {
            let name = line[..line.len() - suffix.len()]
                .trim_end()
                .trim_end_matches(',')
                .trim_end();
            if name.is_empty() {
                return Err(ParseError::MissingName);
            }
            return Ok(ParsedLine {
                quantity: None,
                unit: Some(line[line.len() - suffix.len()..].to_string()),
                name: name.to_string(),
            });
        }
    }

    if let Some(captures) = LINE_PATTERNS.fraction.captures(line) {
        let whole: f64 = match captures.name("whole") {
            Some(m) => m.as_str().parse().map_err(|_| ParseError::InvalidNumber)?,
            None => 0.0,
        };
        let numerator: f64 = captures["num"].parse().map_err(|_| ParseError::InvalidNumber)?;
        let denominator: f64 = captures["denom"]
            .parse()
            .map_err(|_| ParseError::InvalidNumber)?;
        if denominator == 0.0 {
            return Err(ParseError::DivisionByZero);
        }
        let (unit, name) = split_unit(&captures["rest"]);
        if name.is_empty() {
            return Err(ParseError::MissingName);
        }
        return Ok(ParsedLine {
            quantity: Some(whole + numerator / denominator),
            unit,
            name,
        });
    }

    if let Some(captures) = LINE_PATTERNS.decimal.captures(line) {
        let quantity: f64 = captures["qty"].parse().map_err(|_| ParseError::InvalidNumber)?;
        let (unit, name) = split_unit(&captures["rest"]);
        if name.is_empty() {
            return Err(ParseError::MissingName);
        }
        return Ok(ParsedLine {
            quantity: Some(quantity),
            unit,
            name,
        });
    }

    // No leading number: the whole line is the ingredient name
    Ok(ParsedLine {
        quantity: None,
        unit: None,
        name: line.to_string(),
    })
}

/// Split a leading unit word (or two-word unit like "fluid ounces") off the
/// remainder of a line, dropping a connecting "of".
fn split_unit(rest: &str) -> (Option<String>, String) {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    for take in (1..=tokens.len().min(2)).rev() {
        let candidate = tokens[..take].join(" ");
        let normalized = normalize_unit(&candidate);
        if lookup_factor(&normalized).is_some() || is_known_non_convertible(&candidate) {
            let mut remainder = &tokens[take..];
            if remainder.first() == Some(&"of") {
                remainder = &remainder[1..];
            }
            return (Some(candidate), remainder.join(" "));
        }
    }
    (None, tokens.join(" "))
}

/// Parse a block of text line by line. Returns the parsed triples plus the
/// lines that could not be parsed; a bad line never fails the whole block.
pub fn parse_lines(text: &str) -> (Vec<ParsedLine>, Vec<String>) {
    let mut parsed = Vec::new();
    let mut unparsed = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(item) => parsed.push(item),
            Err(err) => {
                debug!("could not parse ingredient line '{line}': {err}");
                unparsed.push(line.to_string());
            }
        }
    }
    (parsed, unparsed)
}
