use recipe_typst::{parse, Document, ParseError, Section, Step, DEFAULT_TITLE};

#[test]
fn test_empty_and_blank_input() {
    assert_eq!(parse(""), Err(ParseError::EmptyInput));
    assert_eq!(parse("   \n\n"), Err(ParseError::EmptyInput));
}

#[test]
fn test_recipe_without_ingredients_is_rejected() {
    assert_eq!(parse("= Title\n# Step\n"), Err(ParseError::MissingIngredients));
}

#[test]
fn test_minimal_recipe() {
    let doc = parse("= Test\n# Step one\n  - flour\n").unwrap();
    assert_eq!(
        doc,
        Document {
            title: "Test".to_string(),
            sections: vec![Section {
                name: None,
                steps: vec![Step {
                    text: "Step one".to_string(),
                    ingredients: vec!["flour".to_string()],
                }],
            }],
        }
    );
}

#[test]
fn test_multiple_titles_last_one_wins() {
    let doc = parse("= A\n= B\n# S\n  - x\n").unwrap();
    assert_eq!(doc.title, "B");
}

#[test]
fn test_ingredient_before_first_step_is_dropped() {
    let doc = parse("  - flour\n# Step\n  - salt\n").unwrap();
    assert_eq!(doc.steps().count(), 1);
    assert_eq!(doc.sections[0].steps[0], Step::with_ingredients("Step", ["salt"]));
}

#[test]
fn test_unrecognized_line_is_not_merged_into_neighbours() {
    let doc = parse("= Soup\nA lovely winter soup.\n# Chop onions\nthen cry a little\n  - 2 onions\n")
        .unwrap();
    assert_eq!(doc.title, "Soup");
    let step = &doc.sections[0].steps[0];
    assert_eq!(step.text, "Chop onions");
    assert_eq!(step.ingredients, vec!["2 onions"]);
}

#[test]
fn test_document_always_has_a_title_and_a_section() {
    let doc = parse("# Mix\n  - flour").unwrap();
    assert_eq!(doc.title, DEFAULT_TITLE);
    assert_eq!(doc.sections.len(), 1);
}

#[test]
fn test_full_recipe_with_components() {
    let text = r#"
= Lasagna

+ Meat sauce

# Brown the beef over medium-high heat.

  - 1 lb ground beef
  - 1 onion, diced

# Add tomatoes and simmer 20-30 minutes.

  - 28 oz crushed tomatoes

+ Assembly

# Layer noodles, sauce and cheese in a 9x13 pan.

  - 12 lasagna noodles
  - 2 cups ricotta

# Bake at 375°F for 45 minutes.
"#;
    let doc = parse(text).unwrap();

    assert_eq!(doc.title, "Lasagna");
    let names: Vec<Option<&str>> = doc.sections.iter().map(|s| s.name.as_deref()).collect();
    assert_eq!(names, vec![Some("Meat sauce"), Some("Assembly")]);
    assert_eq!(doc.sections[0].steps.len(), 2);
    assert_eq!(doc.sections[1].steps.len(), 2);
    assert_eq!(
        doc.sections[0].steps[0].ingredients,
        vec!["1 lb ground beef", "1 onion, diced"]
    );
    assert!(doc.sections[1].steps[1].ingredients.is_empty());
}

#[test]
fn test_pruning_only_removes_anonymous_empty_section() {
    // The title opens an anonymous section that the first named one replaces.
    let doc = parse("= Pie\n+ Crust\n# Rub\n  - butter\n").unwrap();
    assert_eq!(doc.sections.len(), 1);
    assert_eq!(doc.sections[0].name.as_deref(), Some("Crust"));

    // An empty named section is kept as is.
    let doc = parse("= Pie\n+ Crust\n+ Filling\n# Slice\n  - apples\n").unwrap();
    assert_eq!(doc.sections.len(), 2);
    assert!(doc.sections[0].steps.is_empty());
}
