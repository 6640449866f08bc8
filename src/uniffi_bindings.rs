//! UniFFI bindings for recipe-typst
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! Async entry points are wrapped in synchronous functions that manage their own tokio runtime.

use std::fmt;

use crate::{
    front_matter, notation, render, Document, ParseError, RecipeError, RecipeMetadata, Section,
    Step,
};

// Re-export UniFFI macro
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible step
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiStep {
    pub text: String,
    pub ingredients: Vec<String>,
}

/// FFI-compatible section; `name` is `None` for the leading anonymous section
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiSection {
    pub name: Option<String>,
    pub steps: Vec<FfiStep>,
}

/// FFI-compatible parsed recipe
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiDocument {
    pub title: String,
    pub sections: Vec<FfiSection>,
}

/// FFI-compatible display metadata
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipeMetadata {
    pub title: Option<String>,
    pub category: Option<String>,
    /// Named to avoid clashing with `yield` keywords in generated bindings
    pub recipe_yield: Option<String>,
    pub prep_time: Option<String>,
    pub cook_time: Option<String>,
    pub cuisine: Option<String>,
    pub source: Option<String>,
}

/// A recipe text and its metadata, one member of a cookbook
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiCookbookEntry {
    pub content: String,
    pub metadata: Option<FfiRecipeMetadata>,
}

/// Front matter split off a recipe file
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiFrontMatter {
    pub metadata: FfiRecipeMetadata,
    pub body: String,
}

impl From<Document> for FfiDocument {
    fn from(document: Document) -> Self {
        FfiDocument {
            title: document.title,
            sections: document
                .sections
                .into_iter()
                .map(|section| FfiSection {
                    name: section.name,
                    steps: section
                        .steps
                        .into_iter()
                        .map(|step| FfiStep {
                            text: step.text,
                            ingredients: step.ingredients,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl From<FfiDocument> for Document {
    fn from(ffi: FfiDocument) -> Self {
        Document {
            title: ffi.title,
            sections: ffi
                .sections
                .into_iter()
                .map(|section| Section {
                    name: section.name,
                    steps: section
                        .steps
                        .into_iter()
                        .map(|step| Step {
                            text: step.text,
                            ingredients: step.ingredients,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl From<RecipeMetadata> for FfiRecipeMetadata {
    fn from(metadata: RecipeMetadata) -> Self {
        FfiRecipeMetadata {
            title: metadata.title,
            category: metadata.category,
            recipe_yield: metadata.recipe_yield,
            prep_time: metadata.prep_time,
            cook_time: metadata.cook_time,
            cuisine: metadata.cuisine,
            source: metadata.source,
        }
    }
}

impl From<FfiRecipeMetadata> for RecipeMetadata {
    fn from(ffi: FfiRecipeMetadata) -> Self {
        RecipeMetadata {
            title: ffi.title,
            category: ffi.category,
            recipe_yield: ffi.recipe_yield,
            prep_time: ffi.prep_time,
            cook_time: ffi.cook_time,
            cuisine: ffi.cuisine,
            source: ffi.source,
        }
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiRecipeError {
    /// Recipe text was empty
    EmptyInput { message: String },
    /// Recipe has no ingredients
    MissingIngredients { message: String },
    /// A cookbook member failed to parse
    InvalidMember { index: u64, message: String },
    /// Invalid input provided
    InvalidInput { message: String },
    /// Compilation error
    CompileError { message: String },
    /// Runtime error (tokio)
    RuntimeError { message: String },
}

impl fmt::Display for FfiRecipeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiRecipeError::EmptyInput { message } => write!(f, "Empty input: {}", message),
            FfiRecipeError::MissingIngredients { message } => {
                write!(f, "Missing ingredients: {}", message)
            }
            FfiRecipeError::InvalidMember { index, message } => {
                write!(f, "Invalid recipe #{}: {}", index, message)
            }
            FfiRecipeError::InvalidInput { message } => write!(f, "Invalid input: {}", message),
            FfiRecipeError::CompileError { message } => write!(f, "Compile error: {}", message),
            FfiRecipeError::RuntimeError { message } => write!(f, "Runtime error: {}", message),
        }
    }
}

impl std::error::Error for FfiRecipeError {}

impl From<ParseError> for FfiRecipeError {
    fn from(err: ParseError) -> Self {
        let message = err.to_string();
        match err {
            ParseError::EmptyInput => FfiRecipeError::EmptyInput { message },
            ParseError::MissingIngredients => FfiRecipeError::MissingIngredients { message },
            ParseError::InvalidFrontMatter(_) => FfiRecipeError::InvalidInput { message },
        }
    }
}

impl From<RecipeError> for FfiRecipeError {
    fn from(err: RecipeError) -> Self {
        match err {
            RecipeError::Parse(e) => e.into(),
            RecipeError::InvalidMember { index, source } => FfiRecipeError::InvalidMember {
                index: index as u64,
                message: source.to_string(),
            },
            RecipeError::CompileFailed(message) => FfiRecipeError::CompileError { message },
            RecipeError::TaskFailed(e) => FfiRecipeError::RuntimeError {
                message: e.to_string(),
            },
            other => FfiRecipeError::InvalidInput {
                message: other.to_string(),
            },
        }
    }
}

/// Create a new tokio runtime for FFI calls
fn create_runtime() -> Result<tokio::runtime::Runtime, FfiRecipeError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiRecipeError::RuntimeError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

/// Parse recipe notation
///
/// # Arguments
/// * `text` - The recipe in recipe notation
///
/// # Returns
/// The parsed document, or an error describing why the text is not a valid recipe
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn parse_recipe(text: String) -> Result<FfiDocument, FfiRecipeError> {
    Ok(notation::parse(&text)?.into())
}

/// Write a document back out as canonical recipe notation
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn serialize_recipe(document: FfiDocument) -> String {
    notation::serialize(&document.into())
}

/// Render a single recipe to Typst markup
///
/// # Arguments
/// * `text` - The recipe in recipe notation
/// * `metadata` - Optional display metadata
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn render_recipe(
    text: String,
    metadata: Option<FfiRecipeMetadata>,
) -> Result<String, FfiRecipeError> {
    let metadata: RecipeMetadata = metadata.unwrap_or_default().into();
    Ok(crate::render_recipe(&text, &metadata)?)
}

/// Render several recipes as a cookbook
///
/// # Arguments
/// * `entries` - Recipe texts with their metadata, in display order within each category
/// * `title` - Cover title; defaults to "<owner>'s Cookbook"
/// * `subtitle` - Optional cover subtitle
/// * `owner` - Cookbook owner used for the default title
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn render_cookbook(
    entries: Vec<FfiCookbookEntry>,
    title: Option<String>,
    subtitle: Option<String>,
    owner: Option<String>,
) -> Result<String, FfiRecipeError> {
    let recipes: Vec<(String, RecipeMetadata)> = entries
        .into_iter()
        .map(|entry| (entry.content, entry.metadata.unwrap_or_default().into()))
        .collect();

    let rt = create_runtime()?;
    rt.block_on(crate::render_cookbook(
        recipes,
        title.as_deref(),
        subtitle.as_deref(),
        owner.as_deref(),
    ))
    .map_err(Into::into)
}

/// Split a recipe file into front matter and notation body
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn split_front_matter(text: String) -> Result<FfiFrontMatter, FfiRecipeError> {
    let (metadata, body) = front_matter::split(&text)?;
    Ok(FfiFrontMatter {
        metadata: metadata.into(),
        body: body.to_string(),
    })
}

/// Generate a front matter block from metadata
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn generate_front_matter(metadata: FfiRecipeMetadata) -> Result<String, FfiRecipeError> {
    Ok(front_matter::generate(&metadata.into())?)
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ffi_document_conversion() {
        let ffi = parse_recipe("= Soup\n+ Base\n# Boil\n  - water\n".to_string()).unwrap();
        assert_eq!(ffi.title, "Soup");
        assert_eq!(ffi.sections[0].name.as_deref(), Some("Base"));
        assert_eq!(ffi.sections[0].steps[0].ingredients, vec!["water"]);

        let text = serialize_recipe(ffi.clone());
        assert_eq!(parse_recipe(text).unwrap(), ffi);
    }

    #[test]
    fn test_ffi_parse_errors() {
        assert!(matches!(
            parse_recipe("  ".to_string()),
            Err(FfiRecipeError::EmptyInput { .. })
        ));
        assert!(matches!(
            parse_recipe("# Boil".to_string()),
            Err(FfiRecipeError::MissingIngredients { .. })
        ));
    }

    #[test]
    fn test_ffi_render_cookbook_fail_fast() {
        let entries = vec![
            FfiCookbookEntry {
                content: "# Boil\n  - water".to_string(),
                metadata: None,
            },
            FfiCookbookEntry {
                content: "# Nothing".to_string(),
                metadata: None,
            },
        ];
        let err = render_cookbook(entries, None, None, Some("Ada".to_string())).unwrap_err();
        match err {
            FfiRecipeError::InvalidMember { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ffi_render_cookbook_fallback_title() {
        let entries = vec![FfiCookbookEntry {
            content: "# Boil\n  - water".to_string(),
            metadata: Some(FfiRecipeMetadata {
                category: Some("Soups".to_string()),
                ..Default::default()
            }),
        }];
        let markup =
            render_cookbook(entries, Some(" ".to_string()), None, Some("Ada".to_string())).unwrap();
        assert!(markup.contains("[Ada's Cookbook]"));
        assert!(markup.contains("#align(center)[#heading(level: 1)[Soups]]"));
    }

    #[test]
    fn test_front_matter_ffi() {
        let metadata = FfiRecipeMetadata {
            title: Some("Soup".to_string()),
            recipe_yield: Some("4".to_string()),
            ..Default::default()
        };
        let header = generate_front_matter(metadata.clone()).unwrap();
        assert!(header.starts_with("---\ntitle: Soup\nyield: "));

        let split = split_front_matter(format!("{header}# Boil\n  - water\n")).unwrap();
        assert_eq!(split.metadata, metadata);
        assert_eq!(split.body, "# Boil\n  - water\n");
    }

    #[test]
    fn test_front_matter_ffi_rejects_bad_header() {
        let err = split_front_matter("---\n- a list\n---\n# Boil\n  - water\n".to_string()).unwrap_err();
        assert!(matches!(err, FfiRecipeError::InvalidInput { .. }));
    }

    #[test]
    fn test_get_version() {
        let version = get_version();
        assert!(!version.is_empty());
    }
}
