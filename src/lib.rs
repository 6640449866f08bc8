pub mod builder;
pub mod compiler;
pub mod config;
pub mod error;
pub mod front_matter;
pub mod model;
pub mod notation;
pub mod render;
pub mod typography;
pub mod uniffi_bindings;

use log::debug;

pub use builder::{RecipeBook, RecipeBookBuilder, RecipeSource, RenderOutput};
pub use compiler::{Compiler, TypstCli};
pub use config::AppConfig;
pub use error::{ParseError, RecipeError};
pub use model::{Document, MetadataField, RecipeMetadata, Section, Step, DEFAULT_TITLE};
pub use notation::{parse, serialize};
pub use render::{render_many, render_one, DEFAULT_HEADING_LEVEL};

/// Parses a recipe file: optional front matter followed by recipe notation
pub fn parse_recipe_file(text: &str) -> Result<(Document, RecipeMetadata), ParseError> {
    let (metadata, body) = front_matter::split(text)?;
    let document = notation::parse(body)?;
    debug!(
        "parsed '{}' with {} section(s)",
        document.title,
        document.sections.len()
    );
    Ok((document, metadata))
}

/// Formats a recipe file canonically, keeping its front matter
pub fn format_recipe_file(text: &str) -> Result<String, RecipeError> {
    let (document, metadata) = parse_recipe_file(text)?;
    Ok(format!(
        "{}{}\n",
        front_matter::generate(&metadata)?,
        notation::serialize(&document)
    ))
}

/// Renders a single recipe written in recipe notation
pub fn render_recipe(text: &str, metadata: &RecipeMetadata) -> Result<String, RecipeError> {
    let document = notation::parse(text)?;
    Ok(render_one(&document, metadata, DEFAULT_HEADING_LEVEL))
}

/// Renders recipe texts as a cookbook, stopping at the first one that fails to parse.
///
/// A missing or blank `title` becomes "<owner>'s Cookbook", as in the builder.
pub async fn render_cookbook(
    recipes: Vec<(String, RecipeMetadata)>,
    title: Option<&str>,
    subtitle: Option<&str>,
    owner: Option<&str>,
) -> Result<String, RecipeError> {
    let entries = recipes
        .into_iter()
        .map(|(text, metadata)| (RecipeSource::Text(text), metadata))
        .collect();
    let recipes = builder::parse_entries(entries).await?;

    let title = title
        .filter(|title| !title.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| render::cookbook_fallback_title(owner));
    Ok(render_many(&recipes, Some(title.as_str()), subtitle))
}
