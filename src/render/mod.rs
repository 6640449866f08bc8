//! Typst markup generation for single recipes and multi-recipe cookbooks.
//!
//! Rendering is pure and infallible: it expects documents that already passed
//! [`parse`](crate::notation::parse) and silently skips blank metadata.

mod cookbook;
mod recipe;

pub use cookbook::group_by_category;
pub use recipe::metadata_grid;

use log::debug;

use crate::model::{Document, RecipeMetadata};

/// Heading level of a standalone recipe title. Cookbook recipes sit one level deeper.
pub const DEFAULT_HEADING_LEVEL: u8 = 1;

/// Category used for cookbook recipes that do not name one
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Fixed page geometry and typography shared by every rendered document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageStyle {
    pub paper: &'static str,
    pub margin_top: &'static str,
    pub margin_bottom: &'static str,
    pub margin_x: &'static str,
    pub font: &'static str,
    pub font_size: &'static str,
    pub list_spacing: &'static str,
    pub enum_spacing: &'static str,
}

pub const PAGE_STYLE: PageStyle = PageStyle {
    paper: "us-letter",
    margin_top: "0.75in",
    margin_bottom: "1in",
    margin_x: "0.75in",
    font: "Libertinus Serif",
    font_size: "11pt",
    list_spacing: "0.65em",
    enum_spacing: "1.5em",
};

impl PageStyle {
    /// The `#set` rules emitted once at the top of every document
    pub fn preamble(&self) -> String {
        [
            format!("#set list(spacing: {})", self.list_spacing),
            format!(
                "#set text(font: \"{}\", size: {})",
                self.font, self.font_size
            ),
            format!(
                "#set page(\"{}\", margin: (top: {}, bottom: {}, left: {}, right: {}))",
                self.paper, self.margin_top, self.margin_bottom, self.margin_x, self.margin_x
            ),
            format!("#set enum(spacing: {})", self.enum_spacing),
        ]
        .join("\n")
    }
}

/// Renders one recipe on its own, titled with a heading of `heading_level`
pub fn render_one(document: &Document, metadata: &RecipeMetadata, heading_level: u8) -> String {
    [
        PAGE_STYLE.preamble(),
        recipe::layout(document, metadata, heading_level),
    ]
    .join("\n\n")
}

/// Renders a cookbook: optional cover page, table of contents, then every recipe
/// grouped under its category.
///
/// A blank `title` or `subtitle` is left out; with neither there is no cover page.
pub fn render_many(
    recipes: &[(Document, RecipeMetadata)],
    title: Option<&str>,
    subtitle: Option<&str>,
) -> String {
    debug!("rendering cookbook with {} recipes", recipes.len());

    let mut blocks = vec![PAGE_STYLE.preamble()];
    blocks.extend(cookbook::layout(recipes, title, subtitle));
    blocks.join("\n\n")
}

/// Renders a single recipe with [`render_one`] and anything else with [`render_many`]
pub fn render(
    recipes: &[(Document, RecipeMetadata)],
    title: Option<&str>,
    subtitle: Option<&str>,
    heading_level: u8,
) -> String {
    match recipes {
        [(document, metadata)] => render_one(document, metadata, heading_level),
        _ => render_many(recipes, title, subtitle),
    }
}

/// The possessive cookbook title used when the caller supplies none
pub fn cookbook_fallback_title(owner: Option<&str>) -> String {
    let owner = owner
        .map(str::trim)
        .filter(|owner| !owner.is_empty())
        .unwrap_or("User");
    format!("{owner}'s Cookbook")
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
