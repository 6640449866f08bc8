use serde::{Deserialize, Serialize};

/// Title given to a recipe that never declares one
pub const DEFAULT_TITLE: &str = "Untitled Recipe";

/// A parsed recipe: a title and its ordered sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub sections: Vec<Section>,
}

impl Document {
    /// Creates a document with the given title and no sections
    pub fn new(title: impl Into<String>) -> Self {
        Document {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Iterates over every step of every section, in order
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.sections.iter().flat_map(|section| section.steps.iter())
    }

    /// Whether at least one step anywhere lists an ingredient
    pub fn has_ingredients(&self) -> bool {
        self.steps().any(|step| !step.ingredients.is_empty())
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::new(DEFAULT_TITLE)
    }
}

/// An ordered group of steps. Only the leading section of a document may be anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub steps: Vec<Step>,
}

impl Section {
    pub fn anonymous() -> Self {
        Section::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Section {
            name: Some(name.into()),
            steps: Vec::new(),
        }
    }

    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_none()
    }

    /// Anonymous with no steps; the only kind of section the parser ever prunes
    pub fn is_empty(&self) -> bool {
        self.is_anonymous() && self.steps.is_empty()
    }
}

/// One instruction and the ingredients it uses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub text: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl Step {
    pub fn new(text: impl Into<String>) -> Self {
        Step {
            text: text.into(),
            ingredients: Vec::new(),
        }
    }

    pub fn with_ingredients<I, S>(text: impl Into<String>, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Step {
            text: text.into(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
        }
    }
}

/// The metadata keys a recipe can carry alongside its notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
    Title,
    Category,
    Yield,
    PrepTime,
    CookTime,
    Cuisine,
    Source,
}

impl MetadataField {
    pub const ALL: [MetadataField; 7] = [
        MetadataField::Title,
        MetadataField::Category,
        MetadataField::Yield,
        MetadataField::PrepTime,
        MetadataField::CookTime,
        MetadataField::Cuisine,
        MetadataField::Source,
    ];

    /// Display order of the fields shown in a recipe's title grid.
    /// Title and source are rendered elsewhere and never appear here.
    pub const GRID_ORDER: [MetadataField; 5] = [
        MetadataField::Yield,
        MetadataField::PrepTime,
        MetadataField::CookTime,
        MetadataField::Category,
        MetadataField::Cuisine,
    ];

    /// Canonical snake_case key
    pub fn key(&self) -> &'static str {
        match self {
            MetadataField::Title => "title",
            MetadataField::Category => "category",
            MetadataField::Yield => "yield",
            MetadataField::PrepTime => "prep_time",
            MetadataField::CookTime => "cook_time",
            MetadataField::Cuisine => "cuisine",
            MetadataField::Source => "source",
        }
    }

    /// Looks up a field by key, ignoring case and treating spaces and hyphens as underscores
    pub fn from_key(key: &str) -> Option<Self> {
        let normalized = key.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "title" => Some(MetadataField::Title),
            "category" => Some(MetadataField::Category),
            "yield" | "servings" => Some(MetadataField::Yield),
            "prep_time" => Some(MetadataField::PrepTime),
            "cook_time" => Some(MetadataField::CookTime),
            "cuisine" => Some(MetadataField::Cuisine),
            "source" => Some(MetadataField::Source),
            _ => None,
        }
    }
}

/// Display metadata that accompanies a recipe into the renderer.
///
/// Blank values are treated exactly like absent ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "yield", alias = "servings")]
    pub recipe_yield: Option<String>,
    #[serde(default)]
    pub prep_time: Option<String>,
    #[serde(default)]
    pub cook_time: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl RecipeMetadata {
    fn slot(&self, field: MetadataField) -> &Option<String> {
        match field {
            MetadataField::Title => &self.title,
            MetadataField::Category => &self.category,
            MetadataField::Yield => &self.recipe_yield,
            MetadataField::PrepTime => &self.prep_time,
            MetadataField::CookTime => &self.cook_time,
            MetadataField::Cuisine => &self.cuisine,
            MetadataField::Source => &self.source,
        }
    }

    fn slot_mut(&mut self, field: MetadataField) -> &mut Option<String> {
        match field {
            MetadataField::Title => &mut self.title,
            MetadataField::Category => &mut self.category,
            MetadataField::Yield => &mut self.recipe_yield,
            MetadataField::PrepTime => &mut self.prep_time,
            MetadataField::CookTime => &mut self.cook_time,
            MetadataField::Cuisine => &mut self.cuisine,
            MetadataField::Source => &mut self.source,
        }
    }

    /// Returns the value of a field, or `None` when it is absent or blank
    pub fn get(&self, field: MetadataField) -> Option<&str> {
        self.slot(field)
            .as_deref()
            .filter(|value| !value.trim().is_empty())
    }

    pub fn set(&mut self, field: MetadataField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    pub fn with(mut self, field: MetadataField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Non-blank fields in the fixed order of [`MetadataField::GRID_ORDER`]
    pub fn grid_entries(&self) -> Vec<(MetadataField, &str)> {
        MetadataField::GRID_ORDER
            .iter()
            .filter_map(|&field| self.get(field).map(|value| (field, value)))
            .collect()
    }

    /// True when every field is absent or blank
    pub fn is_blank(&self) -> bool {
        MetadataField::ALL.iter().all(|&field| self.get(field).is_none())
    }
}
