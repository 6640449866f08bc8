use std::collections::BTreeMap;

use crate::model::{Document, MetadataField, RecipeMetadata};
use crate::typography::escape_markup;

use super::{present, recipe, DEFAULT_HEADING_LEVEL, UNCATEGORIZED};

const PAGE_BREAK: &str = "#pagebreak()";
const CHAPTER_SPACE: &str = "#v(5cm)";

/// Groups recipes by category in ascending order of category name.
///
/// Recipes without a category land in [`UNCATEGORIZED`]; within a group the input
/// order is kept.
pub fn group_by_category(
    recipes: &[(Document, RecipeMetadata)],
) -> Vec<(&str, Vec<&(Document, RecipeMetadata)>)> {
    let mut groups: BTreeMap<&str, Vec<&(Document, RecipeMetadata)>> = BTreeMap::new();
    for entry in recipes {
        let category = present(entry.1.get(MetadataField::Category)).unwrap_or(UNCATEGORIZED);
        groups.entry(category).or_default().push(entry);
    }
    groups.into_iter().collect()
}

pub(super) fn layout(
    recipes: &[(Document, RecipeMetadata)],
    title: Option<&str>,
    subtitle: Option<&str>,
) -> Vec<String> {
    let mut blocks = cover_page(present(title), present(subtitle));
    blocks.extend(contents_page());

    let groups = group_by_category(recipes);
    let last_group = groups.len().saturating_sub(1);
    for (group_index, (category, members)) in groups.iter().enumerate() {
        blocks.push(CHAPTER_SPACE.to_string());
        blocks.push(format!(
            "#align(center)[#heading(level: 1)[{}]]",
            escape_markup(category)
        ));
        blocks.push(PAGE_BREAK.to_string());

        for (index, (document, metadata)) in members.iter().copied().enumerate() {
            blocks.push(recipe::layout(document, metadata, DEFAULT_HEADING_LEVEL + 1));
            let last_recipe = group_index == last_group && index + 1 == members.len();
            if !last_recipe {
                blocks.push(PAGE_BREAK.to_string());
            }
        }
    }

    blocks
}

fn cover_page(title: Option<&str>, subtitle: Option<&str>) -> Vec<String> {
    if title.is_none() && subtitle.is_none() {
        return Vec::new();
    }

    // title heading is emitted even when empty
    let mut blocks = vec![
        CHAPTER_SPACE.to_string(),
        format!(
            "#align(center)[#text(size: 22pt)[#heading(level: 1, outlined: false)[{}]]]",
            escape_markup(title.unwrap_or_default())
        ),
        "#v(1cm)".to_string(),
    ];
    if let Some(subtitle) = subtitle {
        blocks.push(format!(
            "#align(center)[#heading(level: 2, outlined: false)[{}]]",
            escape_markup(subtitle)
        ));
    }
    blocks.push(PAGE_BREAK.to_string());
    blocks
}

/// Table of contents, after which page numbering restarts at 1
fn contents_page() -> Vec<String> {
    [
        "#align(center)[#heading(level: 1, outlined: false)[Contents]]",
        "#v(1cm)",
        "#outline(title: none, depth: 2)",
        PAGE_BREAK,
        "#counter(page).update(1)",
    ]
    .iter()
    .map(|block| block.to_string())
    .collect()
}
