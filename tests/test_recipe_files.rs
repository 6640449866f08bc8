use recipe_typst::{format_recipe_file, parse_recipe_file, MetadataField, ParseError};

const BANANA_BREAD: &str = "---
title: Banana Bread
category: Bread
prep_time: 900
cook_time: 3600
yield: \"1 loaf\"
---
= Banana Bread

Mash the bananas first.

# Mash the bananas
  - 3 ripe bananas

# Bake at 350°F
  - 2 cups flour
";

#[test]
fn test_parse_recipe_file_reads_front_matter() {
    let (document, metadata) = parse_recipe_file(BANANA_BREAD).unwrap();

    assert_eq!(document.title, "Banana Bread");
    assert_eq!(document.steps().count(), 2);
    assert_eq!(metadata.get(MetadataField::Category), Some("Bread"));
    assert_eq!(metadata.get(MetadataField::PrepTime), Some("15 minutes"));
    assert_eq!(metadata.get(MetadataField::CookTime), Some("1 hour"));
    assert_eq!(metadata.get(MetadataField::Yield), Some("1 loaf"));
}

#[test]
fn test_format_recipe_file_is_canonical() {
    let formatted = format_recipe_file(BANANA_BREAD).unwrap();

    assert!(formatted.starts_with("---\ntitle: Banana Bread\n"));
    assert!(formatted.contains("prep_time: 15 minutes\n"));
    assert!(!formatted.contains("Mash the bananas first."));
    assert!(formatted.ends_with("  - 2 cups flour\n"));
    assert_eq!(format_recipe_file(&formatted).unwrap(), formatted);
}

#[test]
fn test_file_without_front_matter() {
    let (document, metadata) = parse_recipe_file("= Toast\n# Toast\n  - bread\n").unwrap();
    assert_eq!(document.title, "Toast");
    assert!(metadata.is_blank());

    let formatted = format_recipe_file("= Toast\n# Toast\n  - bread\n").unwrap();
    assert!(formatted.starts_with("= Toast"));
}

#[test]
fn test_front_matter_only_is_empty_input() {
    assert_eq!(
        parse_recipe_file("---\ntitle: Nothing\n---\n"),
        Err(ParseError::EmptyInput)
    );
}

#[test]
fn test_round_trip_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("banana-bread.recipe");

    std::fs::write(&path, format_recipe_file(BANANA_BREAD).unwrap()).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();

    assert_eq!(parse_recipe_file(&text), parse_recipe_file(BANANA_BREAD));
}

#[test]
fn test_format_keeps_values_that_need_quoting() {
    let text = "---
title: '\"Best\" Pie \"Ever\"'
source: \"Notes: card 3 # top shelf\"
category: Pies # and tarts
---
= Pie
# Bake
  - apples
";
    let (_, metadata) = parse_recipe_file(text).unwrap();
    assert_eq!(metadata.get(MetadataField::Title), Some("\"Best\" Pie \"Ever\""));
    assert_eq!(metadata.get(MetadataField::Source), Some("Notes: card 3 # top shelf"));
    assert_eq!(metadata.get(MetadataField::Category), Some("Pies"));

    let formatted = format_recipe_file(text).unwrap();
    let (_, reread) = parse_recipe_file(&formatted).unwrap();
    assert_eq!(reread, metadata);
    assert_eq!(format_recipe_file(&formatted).unwrap(), formatted);
}

#[test]
fn test_malformed_front_matter_is_reported() {
    let text = "---\ntitle: [unclosed\n---\n= Pie\n# Bake\n  - apples\n";
    assert!(matches!(
        parse_recipe_file(text),
        Err(ParseError::InvalidFrontMatter(_))
    ));
}
