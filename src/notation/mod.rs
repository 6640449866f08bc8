//! The line-oriented recipe notation.
//!
//! ```text
//! = Pancakes
//!
//! + Batter
//!
//! # Whisk everything together.
//!
//!   - 1 1/2 cups flour
//!   - 2 eggs
//! ```
//!
//! `= ` declares the title, `+ ` opens a named section, `# ` starts a step and an
//! indented `- ` adds an ingredient to the step above it. Everything else is ignored.

mod parser;
mod serializer;

pub use parser::parse;
pub use serializer::serialize;

/// Finds the title a recipe text declares, without parsing the rest of it.
///
/// Unlike [`parse`], the first `=` line wins and the space after `=` is optional.
/// Returns `None` when there is no such line or it is blank.
pub fn extract_title(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix('='))
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(String::from)
}
