use std::fmt;
use std::str::FromStr;

use crate::ingredients::IngredientSet;

/// The instruction template sent to the model for a fresh recipe request.
///
/// Loaded from `prompt.txt` at compile time with `include_str!`, so the
/// wording can be edited without touching Rust string syntax. Contains
/// `{{INGREDIENTS}}`, `{{DIETARY}}`, `{{CUISINE}}` and `{{SPICE_LEVEL}}`
/// placeholders filled in by [`build_recipe_prompt`].
///
/// The section ordering and labels are a contract with the model: they make
/// the response render as a complete recipe in Markdown. Nothing downstream
/// parses the response, so changing them only affects what the user sees.
pub const RECIPE_PROMPT_TEMPLATE: &str = include_str!("prompt.txt");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dietary {
    #[default]
    Any,
    Halal,
    Vegetarian,
    Vegan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cuisine {
    Any,
    #[default]
    Pakistani,
    Indian,
    MiddleEastern,
    Fusion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpiceLevel {
    Mild,
    #[default]
    Medium,
    Hot,
    ExtraHot,
}

impl Dietary {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dietary::Any => "Any",
            Dietary::Halal => "Halal",
            Dietary::Vegetarian => "Vegetarian",
            Dietary::Vegan => "Vegan",
        }
    }
}

impl Cuisine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cuisine::Any => "Any",
            Cuisine::Pakistani => "Pakistani",
            Cuisine::Indian => "Indian",
            Cuisine::MiddleEastern => "Middle Eastern",
            Cuisine::Fusion => "Fusion",
        }
    }
}

impl SpiceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpiceLevel::Mild => "Mild",
            SpiceLevel::Medium => "Medium",
            SpiceLevel::Hot => "Hot",
            SpiceLevel::ExtraHot => "Extra Hot",
        }
    }
}

impl fmt::Display for Dietary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SpiceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dietary {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any" => Ok(Dietary::Any),
            "halal" => Ok(Dietary::Halal),
            "vegetarian" => Ok(Dietary::Vegetarian),
            "vegan" => Ok(Dietary::Vegan),
            other => Err(format!("unknown dietary preference: {other:?}")),
        }
    }
}

impl FromStr for Cuisine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any" => Ok(Cuisine::Any),
            "pakistani" => Ok(Cuisine::Pakistani),
            "indian" => Ok(Cuisine::Indian),
            "middle eastern" => Ok(Cuisine::MiddleEastern),
            "fusion" => Ok(Cuisine::Fusion),
            other => Err(format!("unknown cuisine type: {other:?}")),
        }
    }
}

impl FromStr for SpiceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mild" => Ok(SpiceLevel::Mild),
            "medium" => Ok(SpiceLevel::Medium),
            "hot" => Ok(SpiceLevel::Hot),
            "extra hot" => Ok(SpiceLevel::ExtraHot),
            other => Err(format!("unknown spice level: {other:?}")),
        }
    }
}

/// The three preference fields supplied by the front end.
///
/// Validity is guaranteed by the enum types, so the builder does not
/// re-validate. Defaults match the front end's initial selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub dietary: Dietary,
    pub cuisine: Cuisine,
    pub spice: SpiceLevel,
}

/// Renders the recipe instruction prompt for one generation request.
///
/// Pure and deterministic: the same ingredients and preferences always
/// produce byte-identical output.
pub fn build_recipe_prompt(ingredients: &IngredientSet, prefs: &Preferences) -> String {
    RECIPE_PROMPT_TEMPLATE
        .replace("{{INGREDIENTS}}", &ingredients.as_comma_list())
        .replace("{{DIETARY}}", prefs.dietary.as_str())
        .replace("{{CUISINE}}", prefs.cuisine.as_str())
        .replace("{{SPICE_LEVEL}}", prefs.spice.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredients::normalize;

    fn halal_lamb_inputs() -> (IngredientSet, Preferences) {
        let ingredients = normalize(&[], "lamb, tomatoes").unwrap();
        let prefs = Preferences {
            dietary: Dietary::Halal,
            cuisine: Cuisine::Pakistani,
            spice: SpiceLevel::Medium,
        };
        (ingredients, prefs)
    }

    #[test]
    fn test_template_is_embedded() {
        assert!(!RECIPE_PROMPT_TEMPLATE.is_empty());
        assert!(RECIPE_PROMPT_TEMPLATE.contains("{{INGREDIENTS}}"));
        assert!(RECIPE_PROMPT_TEMPLATE.contains("{{DIETARY}}"));
        assert!(RECIPE_PROMPT_TEMPLATE.contains("{{CUISINE}}"));
        assert!(RECIPE_PROMPT_TEMPLATE.contains("{{SPICE_LEVEL}}"));
    }

    #[test]
    fn test_template_keeps_section_labels() {
        assert!(RECIPE_PROMPT_TEMPLATE.contains("### **Recipe Name (Urdu Name)**"));
        assert!(RECIPE_PROMPT_TEMPLATE.contains("### **Ingredients**"));
        assert!(RECIPE_PROMPT_TEMPLATE.contains("### **Step-by-Step Instructions**"));
        assert!(RECIPE_PROMPT_TEMPLATE.contains("### **Nutritional Information (Estimated)**"));
        assert!(RECIPE_PROMPT_TEMPLATE.contains("### **Chef's Tips & Variations**"));
        assert!(RECIPE_PROMPT_TEMPLATE.contains("### **Cultural Authenticity & Rating**"));
    }

    #[test]
    fn test_fields_land_in_their_slots() {
        let (ingredients, prefs) = halal_lamb_inputs();
        let prompt = build_recipe_prompt(&ingredients, &prefs);

        assert!(prompt.contains("**Available Ingredients:** \"lamb, tomatoes\""));
        assert!(prompt.contains("**Dietary Preferences:** \"Halal\""));
        assert!(prompt.contains("**Desired Cuisine Type:** \"Pakistani\""));
        assert!(prompt.contains("**Desired Spice Level:** \"Medium\""));
    }

    #[test]
    fn test_no_placeholder_survives_interpolation() {
        let (ingredients, prefs) = halal_lamb_inputs();
        let prompt = build_recipe_prompt(&ingredients, &prefs);
        assert!(!prompt.contains("{{"));
        assert!(!prompt.contains("}}"));
    }

    #[test]
    fn test_build_is_deterministic() {
        let (ingredients, prefs) = halal_lamb_inputs();
        let first = build_recipe_prompt(&ingredients, &prefs);
        let second = build_recipe_prompt(&ingredients, &prefs);
        let third = build_recipe_prompt(&ingredients, &prefs);
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[test]
    fn test_preference_round_trip_parsing() {
        assert_eq!("halal".parse::<Dietary>().unwrap(), Dietary::Halal);
        assert_eq!("Vegan".parse::<Dietary>().unwrap(), Dietary::Vegan);
        assert_eq!(
            "middle eastern".parse::<Cuisine>().unwrap(),
            Cuisine::MiddleEastern
        );
        assert_eq!(
            "Extra Hot".parse::<SpiceLevel>().unwrap(),
            SpiceLevel::ExtraHot
        );
        assert!("spicy".parse::<SpiceLevel>().is_err());
        assert!("keto".parse::<Dietary>().is_err());
    }

    #[test]
    fn test_default_preferences() {
        let prefs = Preferences::default();
        assert_eq!(prefs.dietary, Dietary::Any);
        assert_eq!(prefs.cuisine, Cuisine::Pakistani);
        assert_eq!(prefs.spice, SpiceLevel::Medium);
    }
}
