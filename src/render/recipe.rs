use crate::model::{Document, MetadataField, RecipeMetadata, Step, DEFAULT_TITLE};
use crate::typography::{escape_markup, fancy_markup, humanize_key};

use super::present;

/// Cells per row of the metadata grid
const GRID_WIDTH: usize = 5;

const PAGE_COUNTER: &str =
    "#text(8pt, [#counter(page).display() / #counter(page).final().at(0)])";

const DIVIDER: &str = "#v(1.5em)\n#line(length: 100%, stroke: 0.5pt)\n#v(1.5em)";

const STEP_SPACING: &str = "#v(1em)";
const SECTION_SPACING: &str = "#v(3em)";

/// Markup for one recipe, without the document preamble
pub(super) fn layout(document: &Document, metadata: &RecipeMetadata, heading_level: u8) -> String {
    let heading_level = heading_level.max(1);
    let mut blocks = vec![footer(metadata), title_block(document, metadata, heading_level)];
    blocks.push(DIVIDER.to_string());

    let last_section = document.sections.len().saturating_sub(1);
    for (index, section) in document.sections.iter().enumerate() {
        if let Some(name) = present(section.name.as_deref()) {
            blocks.push(format!("=== {}\n{STEP_SPACING}", escape_markup(name)));
        }

        for (step_index, step) in section.steps.iter().enumerate() {
            blocks.push(step_row(step, step_index + 1));
            if step_index + 1 < section.steps.len() {
                blocks.push(STEP_SPACING.to_string());
            }
        }

        if index < last_section {
            blocks.push(SECTION_SPACING.to_string());
        }
    }

    blocks.join("\n\n")
}

fn footer(metadata: &RecipeMetadata) -> String {
    let content = match metadata.get(MetadataField::Source) {
        Some(source) => format!("#text(8pt)[{}] #h(1fr) {PAGE_COUNTER}", fancy_markup(source)),
        None => format!("#h(1fr) {PAGE_COUNTER} #h(1fr)"),
    };
    format!("#set page(footer: context [{content}])")
}

fn title_block(document: &Document, metadata: &RecipeMetadata, heading_level: u8) -> String {
    let title = metadata
        .get(MetadataField::Title)
        .or_else(|| present(Some(document.title.as_str())))
        .unwrap_or(DEFAULT_TITLE);
    let heading = format!("#heading(level: {heading_level})[{}]", escape_markup(title));

    let entries: Vec<(&str, &str)> = metadata
        .grid_entries()
        .into_iter()
        .map(|(field, value)| (field.key(), value))
        .collect();
    if entries.is_empty() {
        return heading;
    }

    let grid = metadata_grid(&entries)
        .lines()
        .map(|line| format!("        {line}"))
        .collect::<Vec<String>>()
        .join("\n");

    format!(
        "#grid(
  columns: (1fr, auto),
  gutter: 2em,
  align: horizon,
  [{heading}],
  [
    #align(right)[
      #block[
        #set text(size: 9pt)
{grid}
      ]
    ]
  ]
)"
    )
}

/// Lays `(key, value)` pairs out as stacked five-column grids of labels over values.
///
/// Keys are humanized for display, values are embedded verbatim apart from escaping.
/// The last grid is padded with empty cells so every grid has the same columns.
pub fn metadata_grid(entries: &[(&str, &str)]) -> String {
    entries
        .chunks(GRID_WIDTH)
        .map(|chunk| {
            let mut labels: Vec<String> = chunk
                .iter()
                .map(|(key, _)| {
                    format!(
                        "[#align(center)[#text(weight: \"bold\")[{}]]]",
                        humanize_key(key)
                    )
                })
                .collect();
            let mut values: Vec<String> = chunk
                .iter()
                .map(|(_, value)| format!("[#align(center)[{}]]", escape_markup(value)))
                .collect();

            labels.resize(GRID_WIDTH, "[]".to_string());
            values.resize(GRID_WIDTH, "[]".to_string());
            labels.append(&mut values);

            format!(
                "#grid(columns: ({}), column-gutter: 1.5em, row-gutter: 0.75em, {})",
                vec!["auto"; GRID_WIDTH].join(", "),
                labels.join(", ")
            )
        })
        .collect::<Vec<String>>()
        .join("\n#v(1em)\n")
}

fn step_row(step: &Step, number: usize) -> String {
    let ingredients = if step.ingredients.is_empty() {
        String::new()
    } else {
        let items = step
            .ingredients
            .iter()
            .map(|ingredient| format!("[{}]", fancy_markup(ingredient)))
            .collect::<Vec<String>>()
            .join(", ");
        format!("\n    #block(breakable: false, list(spacing: 1em, {items}))\n  ")
    };

    format!(
        "#grid(
  columns: (2fr, 1fr),
  gutter: 3em,
  [
    #enum.item({number})[{}]
  ],
  [{ingredients}]
)",
        fancy_markup(&step.text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;

    fn pancakes() -> Document {
        Document::new("Pancakes")
            .with_section(
                Section::named("Batter")
                    .with_step(Step::with_ingredients("Whisk 1/2 cup milk", ["1 1/2 cups flour", "2 eggs"]))
                    .with_step(Step::new("Rest 10-15 minutes")),
            )
            .with_section(Section::named("Cook").with_step(Step::with_ingredients("Fry", ["butter"])))
    }

    #[test]
    fn test_footer_with_source() {
        let metadata = RecipeMetadata::default().with(MetadataField::Source, "Joy of Cooking p. 12");
        assert_eq!(
            footer(&metadata),
            "#set page(footer: context [#text(8pt)[Joy of Cooking p. 12] #h(1fr) #text(8pt, [#counter(page).display() / #counter(page).final().at(0)])])"
        );
    }

    #[test]
    fn test_footer_without_source_is_centered() {
        let metadata = RecipeMetadata::default().with(MetadataField::Source, " ");
        assert_eq!(
            footer(&metadata),
            "#set page(footer: context [#h(1fr) #text(8pt, [#counter(page).display() / #counter(page).final().at(0)]) #h(1fr)])"
        );
    }

    #[test]
    fn test_bare_heading_without_metadata() {
        let metadata = RecipeMetadata::default()
            .with(MetadataField::Title, "Flapjacks")
            .with(MetadataField::Yield, "")
            .with(MetadataField::Source, "Gran");
        assert_eq!(
            title_block(&pancakes(), &metadata, 2),
            "#heading(level: 2)[Flapjacks]"
        );
    }

    #[test]
    fn test_heading_falls_back_to_document_title() {
        assert_eq!(
            title_block(&pancakes(), &RecipeMetadata::default(), 1),
            "#heading(level: 1)[Pancakes]"
        );
    }

    #[test]
    fn test_title_block_with_metadata_grid() {
        let metadata = RecipeMetadata::default()
            .with(MetadataField::Cuisine, "American")
            .with(MetadataField::Yield, "8 pancakes");
        let block = title_block(&pancakes(), &metadata, 1);

        assert!(block.starts_with("#grid(\n  columns: (1fr, auto),"));
        assert!(block.contains("[#heading(level: 1)[Pancakes]],"));
        assert!(block.contains("#set text(size: 9pt)"));
        let yield_at = block.find("[Yield]").unwrap();
        let cuisine_at = block.find("[Cuisine]").unwrap();
        assert!(yield_at < cuisine_at);
        assert_eq!(block.matches("#grid(columns: (auto, auto, auto, auto, auto)").count(), 1);
    }

    #[test]
    fn test_metadata_grid_pads_single_chunk() {
        let grid = metadata_grid(&[("prep_time", "15 minutes")]);
        assert_eq!(
            grid,
            "#grid(columns: (auto, auto, auto, auto, auto), column-gutter: 1.5em, row-gutter: 0.75em, \
             [#align(center)[#text(weight: \"bold\")[Prep Time]]], [], [], [], [], \
             [#align(center)[15 minutes]], [], [], [], [])"
        );
    }

    #[test]
    fn test_metadata_grid_escapes_quotes_in_values() {
        let grid = metadata_grid(&[("yield", r#"one 9" pie"#)]);
        assert!(grid.contains(r#"[#align(center)[one 9\" pie]]"#));
    }

    #[test]
    fn test_step_row_with_ingredients() {
        let step = Step::with_ingredients("Bake at 350°F", ["1/2 cup sugar"]);
        assert_eq!(
            step_row(&step, 3),
            "#grid(
  columns: (2fr, 1fr),
  gutter: 3em,
  [
    #enum.item(3)[Bake at 350\u{202f}°F]
  ],
  [
    #block(breakable: false, list(spacing: 1em, [1\u{2044}2 cup sugar]))
  ]
)"
        );
    }

    #[test]
    fn test_step_row_without_ingredients_has_empty_cell() {
        let row = step_row(&Step::new("Serve"), 1);
        assert!(row.contains("#enum.item(1)[Serve]"));
        assert!(row.contains("  [],\n") || row.ends_with("  []\n)"));
        assert!(!row.contains("list("));
    }

    #[test]
    fn test_layout_spacing() {
        let markup = layout(&pancakes(), &RecipeMetadata::default(), 1);

        assert!(markup.contains("=== Batter\n#v(1em)"));
        assert!(markup.contains("=== Cook\n#v(1em)"));
        assert_eq!(markup.matches("#v(3em)").count(), 1);
        // numbering restarts in every section
        assert_eq!(markup.matches("#enum.item(1)").count(), 2);
        assert_eq!(markup.matches("#enum.item(2)").count(), 1);
        assert!(markup.contains("Rest 10\u{2013}15 minutes"));
        assert!(!markup.trim_end().ends_with("#v(3em)"));
    }

    #[test]
    fn test_layout_anonymous_section_has_no_heading() {
        let doc = Document::new("Tea")
            .with_section(Section::anonymous().with_step(Step::with_ingredients("Steep", ["tea"])));
        let markup = layout(&doc, &RecipeMetadata::default(), 1);
        assert!(!markup.contains("==="));
        assert!(!markup.contains("#v(3em)"));
    }
}
