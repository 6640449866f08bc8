use log::debug;

use crate::error::ParseError;
use crate::model::{Document, Section, Step, DEFAULT_TITLE};

/// Parses recipe notation into a [`Document`].
///
/// Blank lines separate blocks and are otherwise ignored. Lines that match none of
/// the prefixes are dropped, as are ingredient lines with no step above them.
///
/// # Errors
/// - [`ParseError::EmptyInput`] when the text has no non-blank line
/// - [`ParseError::MissingIngredients`] when no step carries an ingredient
pub fn parse(text: &str) -> Result<Document, ParseError> {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut builder: Option<DocumentBuilder> = None;
    for (number, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        builder
            .get_or_insert_with(DocumentBuilder::new)
            .accept(number + 1, line);
    }

    builder.ok_or(ParseError::EmptyInput)?.finish()
}

enum Line<'a> {
    Title(&'a str),
    Section(&'a str),
    Step(&'a str),
    Ingredient(&'a str),
    Unrecognized,
}

impl<'a> Line<'a> {
    fn classify(line: &'a str) -> Self {
        if let Some(rest) = line.strip_prefix("= ") {
            Line::Title(rest.trim())
        } else if let Some(rest) = line.strip_prefix("+ ") {
            Line::Section(rest.trim())
        } else if let Some(rest) = line.strip_prefix("# ") {
            Line::Step(rest.trim())
        } else if line.starts_with(char::is_whitespace) {
            match line.trim_start().strip_prefix("- ") {
                Some(rest) => Line::Ingredient(rest.trim()),
                None => Line::Unrecognized,
            }
        } else {
            Line::Unrecognized
        }
    }
}

/// Position of the step that ingredient lines currently attach to
#[derive(Debug, Clone, Copy)]
struct StepCursor {
    section: usize,
    step: usize,
}

/// Accumulates sections while the text is scanned.
///
/// The open section is always the last one in `sections`; the active step is
/// tracked by index so the last section can be pruned without dangling cursors.
struct DocumentBuilder {
    title: String,
    sections: Vec<Section>,
    active_step: Option<StepCursor>,
}

impl DocumentBuilder {
    fn new() -> Self {
        DocumentBuilder {
            title: DEFAULT_TITLE.to_string(),
            sections: Vec::new(),
            active_step: None,
        }
    }

    fn accept(&mut self, number: usize, line: &str) {
        match Line::classify(line) {
            Line::Title(title) => {
                self.title = if title.is_empty() {
                    DEFAULT_TITLE.to_string()
                } else {
                    title.to_string()
                };
                self.open_section();
                self.active_step = None;
            }
            Line::Section(name) => {
                if self.sections.last().is_some_and(Section::is_empty) {
                    debug!("line {number}: pruning empty leading section before '{name}'");
                    self.sections.pop();
                }
                self.sections.push(Section::named(name));
                self.active_step = None;
            }
            Line::Step(text) => {
                let section = self.open_section();
                let steps = &mut self.sections[section].steps;
                steps.push(Step::new(text));
                self.active_step = Some(StepCursor {
                    section,
                    step: steps.len() - 1,
                });
            }
            Line::Ingredient(ingredient) => match self.active_step {
                Some(cursor) => self.sections[cursor.section].steps[cursor.step]
                    .ingredients
                    .push(ingredient.to_string()),
                None => debug!("line {number}: ingredient without a step dropped"),
            },
            Line::Unrecognized => debug!("line {number}: unrecognized line dropped"),
        }
    }

    /// Index of the open section, creating the leading anonymous one if needed
    fn open_section(&mut self) -> usize {
        if self.sections.is_empty() {
            self.sections.push(Section::anonymous());
        }
        self.sections.len() - 1
    }

    fn finish(mut self) -> Result<Document, ParseError> {
        self.open_section();

        let document = Document {
            title: self.title,
            sections: self.sections,
        };

        if !document.has_ingredients() {
            return Err(ParseError::MissingIngredients);
        }
        Ok(document)
    }
}
