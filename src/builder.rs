use log::info;

use crate::compiler::Compiler;
use crate::error::ParseError;
use crate::model::{Document, RecipeMetadata};
use crate::render::{self, DEFAULT_HEADING_LEVEL};
use crate::{notation, RecipeError};

/// A recipe waiting to be rendered
#[derive(Debug, Clone)]
pub enum RecipeSource {
    /// Recipe notation that still has to be parsed
    Text(String),
    /// An already parsed or hand-built document
    Document(Document),
}

/// Result of a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutput {
    /// Typst markup
    Markup(String),
    /// Compiled PDF bytes
    Pdf(Vec<u8>),
}

/// Builder for rendering one recipe or a whole cookbook
#[derive(Default)]
pub struct RecipeBookBuilder {
    entries: Vec<(RecipeSource, RecipeMetadata)>,
    title: Option<String>,
    subtitle: Option<String>,
    owner: Option<String>,
    heading_level: Option<u8>,
    compiler: Option<Box<dyn Compiler>>,
}

impl std::fmt::Debug for RecipeBookBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeBookBuilder")
            .field("entries", &self.entries.len())
            .field("title", &self.title)
            .field("subtitle", &self.subtitle)
            .field("owner", &self.owner)
            .field("heading_level", &self.heading_level)
            .field("compiler", &self.compiler.as_ref().map(|c| c.name().to_string()))
            .finish()
    }
}

impl RecipeBookBuilder {
    /// Add a recipe written in recipe notation
    ///
    /// # Example
    /// ```
    /// use recipe_typst::{RecipeBook, RecipeMetadata};
    ///
    /// let builder = RecipeBook::builder()
    ///     .recipe("= Toast\n# Toast the bread\n  - bread", RecipeMetadata::default());
    /// ```
    pub fn recipe(mut self, text: impl Into<String>, metadata: RecipeMetadata) -> Self {
        self.entries.push((RecipeSource::Text(text.into()), metadata));
        self
    }

    /// Add a document that has already been parsed or built by hand
    pub fn document(mut self, document: Document, metadata: RecipeMetadata) -> Self {
        self.entries.push((RecipeSource::Document(document), metadata));
        self
    }

    /// Set the cookbook cover title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the cookbook cover subtitle
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Set the owner used for the fallback title "<owner>'s Cookbook"
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Set the heading level of a standalone recipe title
    pub fn heading_level(mut self, level: u8) -> Self {
        self.heading_level = Some(level);
        self
    }

    /// Compile the markup to PDF with the given compiler instead of returning it
    ///
    /// # Example
    /// ```
    /// use recipe_typst::{RecipeBook, TypstCli};
    ///
    /// let builder = RecipeBook::builder().pdf(TypstCli::default());
    /// ```
    pub fn pdf(mut self, compiler: impl Compiler + 'static) -> Self {
        self.compiler = Some(Box::new(compiler));
        self
    }

    /// Parse, render and optionally compile everything added so far
    ///
    /// Recipe texts are parsed concurrently; results keep the order they were added in.
    ///
    /// # Errors
    /// Returns `RecipeError` if:
    /// - No recipe was added
    /// - A single recipe fails to parse (`Parse`)
    /// - Any cookbook member fails to parse (`InvalidMember`, nothing is rendered)
    /// - The compiler fails
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_typst::{RecipeBook, RecipeMetadata, RenderOutput};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let output = RecipeBook::builder()
    ///     .recipe("= Toast\n# Toast the bread\n  - bread", RecipeMetadata::default())
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<RenderOutput, RecipeError> {
        if self.entries.is_empty() {
            return Err(RecipeError::BuilderError(
                "No recipes specified. Use .recipe() or .document()".to_string(),
            ));
        }

        let single = self.entries.len() == 1;
        let recipes = parse_entries(self.entries).await.map_err(|e| match e {
            RecipeError::InvalidMember { source, .. } if single => RecipeError::Parse(source),
            other => other,
        })?;

        let title = self
            .title
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| render::cookbook_fallback_title(self.owner.as_deref()));
        let markup = render::render(
            &recipes,
            Some(title.as_str()),
            self.subtitle.as_deref(),
            self.heading_level.unwrap_or(DEFAULT_HEADING_LEVEL),
        );

        match self.compiler {
            Some(compiler) => {
                info!("Compiling {} recipe(s) with {}", recipes.len(), compiler.name());
                Ok(RenderOutput::Pdf(compiler.compile(&markup).await?))
            }
            None => Ok(RenderOutput::Markup(markup)),
        }
    }
}

/// Parses every text entry on the blocking pool, keeping input order.
///
/// The first failure in input order wins and aborts the whole batch.
pub async fn parse_entries(
    entries: Vec<(RecipeSource, RecipeMetadata)>,
) -> Result<Vec<(Document, RecipeMetadata)>, RecipeError> {
    let tasks: Vec<_> = entries
        .into_iter()
        .map(|(source, metadata)| {
            tokio::task::spawn_blocking(move || -> Result<_, ParseError> {
                let document = match source {
                    RecipeSource::Text(text) => notation::parse(&text)?,
                    RecipeSource::Document(document) => document,
                };
                Ok((document, metadata))
            })
        })
        .collect();

    let mut recipes = Vec::with_capacity(tasks.len());
    for (index, task) in tasks.into_iter().enumerate() {
        let parsed = task.await?;
        recipes.push(parsed.map_err(|source| RecipeError::InvalidMember { index, source })?);
    }
    Ok(recipes)
}

/// Main entry point for the builder API
pub struct RecipeBook;

impl RecipeBook {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use recipe_typst::RecipeBook;
    ///
    /// let builder = RecipeBook::builder();
    /// ```
    pub fn builder() -> RecipeBookBuilder {
        RecipeBookBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_without_recipes() {
        let result = RecipeBook::builder().title("Nothing").build().await;
        assert!(matches!(result, Err(RecipeError::BuilderError(_))));
    }

    #[tokio::test]
    async fn test_single_recipe_error_is_plain_parse_error() {
        let result = RecipeBook::builder()
            .recipe("= Toast\n# Toast it", RecipeMetadata::default())
            .build()
            .await;
        assert!(matches!(
            result,
            Err(RecipeError::Parse(ParseError::MissingIngredients))
        ));
    }

    #[tokio::test]
    async fn test_parse_entries_reports_first_failure_in_order() {
        let entries = vec![
            (RecipeSource::Text("# Mix\n  - flour".to_string()), RecipeMetadata::default()),
            (RecipeSource::Text("".to_string()), RecipeMetadata::default()),
            (RecipeSource::Text("# Nothing".to_string()), RecipeMetadata::default()),
        ];
        let err = parse_entries(entries).await.unwrap_err();
        match err {
            RecipeError::InvalidMember { index, source } => {
                assert_eq!(index, 1);
                assert_eq!(source, ParseError::EmptyInput);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
