use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::InvalidInput;

/// Letters, whitespace and hyphens only. Quantities and units are the
/// model's job, not the user's.
fn ingredient_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z\s-]+$").expect("valid pattern"))
}

/// De-duplicated, lower-cased set of ingredient names.
///
/// Backed by a `BTreeSet` so iteration order is stable, which keeps the
/// prompt built from it byte-identical across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientSet(BTreeSet<String>);

impl IngredientSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Joins the ingredients with `", "` for interpolation into the prompt.
    pub fn as_comma_list(&self) -> String {
        self.0
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for IngredientSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_comma_list())
    }
}

/// Merges the multi-select entries and the comma-separated free-text field
/// into one validated [`IngredientSet`].
///
/// Free text is split on commas with whitespace trimmed and empty pieces
/// dropped; everything is lower-cased before the union. One bad token
/// invalidates the whole set.
pub fn normalize(selected: &[String], free_text: &str) -> Result<IngredientSet, InvalidInput> {
    let mut merged: BTreeSet<String> = free_text
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_lowercase)
        .collect();
    merged.extend(selected.iter().map(|name| name.to_lowercase()));

    if merged.is_empty() {
        return Err(InvalidInput::Empty);
    }
    for ingredient in &merged {
        if !ingredient_pattern().is_match(ingredient) {
            return Err(InvalidInput::BadToken(ingredient.clone()));
        }
    }

    Ok(IngredientSet(merged))
}
