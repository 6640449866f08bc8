use crate::model::Document;

/// Writes a [`Document`] back out as recipe notation.
///
/// Parsing the output yields a document equal to the input for anything that came
/// out of [`parse`](super::parse); only blank-line spacing is normalized.
pub fn serialize(document: &Document) -> String {
    let mut out = Output::default();

    if !document.title.is_empty() {
        out.separate();
        out.push(format!("= {}", document.title));
    }

    let several_sections = document.sections.len() > 1;
    for section in &document.sections {
        if section.name.is_some() || several_sections {
            out.separate();
        }
        if let Some(name) = &section.name {
            out.push(format!("+ {name}"));
        }

        for step in &section.steps {
            out.separate();
            out.push(format!("# {}", step.text));

            if !step.ingredients.is_empty() {
                out.separate();
                for ingredient in &step.ingredients {
                    out.push(format!("  - {ingredient}"));
                }
            }
        }
    }

    out.lines.join("\n")
}

#[derive(Default)]
struct Output {
    lines: Vec<String>,
}

impl Output {
    fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    /// Adds a blank line unless the output is empty or already ends with one
    fn separate(&mut self) {
        if self.lines.last().is_some_and(|line| !line.is_empty()) {
            self.lines.push(String::new());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Section, Step};
    use crate::notation::parse;

    #[test]
    fn test_serialize_single_anonymous_section() {
        let doc = Document::new("Test").with_section(
            Section::anonymous().with_step(Step::with_ingredients("Step one", ["flour", "water"])),
        );
        assert_eq!(
            serialize(&doc),
            "= Test\n\n# Step one\n\n  - flour\n  - water"
        );
    }

    #[test]
    fn test_serialize_named_sections() {
        let doc = Document::new("Pie")
            .with_section(Section::named("Crust").with_step(Step::with_ingredients("Rub", ["butter"])))
            .with_section(Section::named("Filling").with_step(Step::new("Slice apples")));
        assert_eq!(
            serialize(&doc),
            "= Pie\n\n+ Crust\n\n# Rub\n\n  - butter\n\n+ Filling\n\n# Slice apples"
        );
    }

    #[test]
    fn test_serialize_without_title() {
        let doc = Document::new("")
            .with_section(Section::anonymous().with_step(Step::with_ingredients("Stir", ["salt"])));
        assert_eq!(serialize(&doc), "# Stir\n\n  - salt");
    }

    #[test]
    fn test_serialize_empty_sections() {
        let doc = Document::new("Odd")
            .with_section(Section::named("Empty"))
            .with_section(Section::named("Full").with_step(Step::with_ingredients("Mix", ["flour"])));
        let text = serialize(&doc);
        assert_eq!(text, "= Odd\n\n+ Empty\n\n+ Full\n\n# Mix\n\n  - flour");
        assert_eq!(parse(&text).unwrap(), doc);
    }

    #[test]
    fn test_round_trip_of_untidy_input() {
        let text = "  - orphan\n# Preheat oven\n  - nothing\nnoise\n= Bread\n+ Dough\n\n\n# Knead\n   - flour\n   - yeast\n+ Glaze\n# Brush\n  - egg";
        let doc = parse(text).unwrap();
        let again = parse(&serialize(&doc)).unwrap();
        assert_eq!(again, doc);
    }
}
