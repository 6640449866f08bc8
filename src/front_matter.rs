//! Optional YAML metadata header at the top of a recipe file.
//!
//! ```text
//! ---
//! title: Banana Bread
//! category: Bread
//! prep_time: 900
//! ---
//! = Banana Bread
//! ...
//! ```

use log::warn;
use serde_yaml::{Mapping, Value};

use crate::error::{ParseError, RecipeError};
use crate::model::{MetadataField, RecipeMetadata};

pub const DELIMITER: &str = "---";

/// Splits a recipe file into its front matter and the notation body.
///
/// The header between the two `---` lines is read as a YAML mapping. Text that does
/// not open with a `---` line, or never closes the block, is returned whole as the
/// body with empty metadata. Purely numeric `prep_time` and `cook_time` values are
/// read as seconds and formatted with [`format_duration`].
///
/// # Errors
/// [`ParseError::InvalidFrontMatter`] when the header is not a YAML mapping.
pub fn split(text: &str) -> Result<(RecipeMetadata, &str), ParseError> {
    let mut lines = text.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return Ok((RecipeMetadata::default(), text));
    };
    if first.trim() != DELIMITER {
        return Ok((RecipeMetadata::default(), text));
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if line.trim() == DELIMITER {
            let metadata = read_header(&text[header_start..offset])?;
            return Ok((metadata, &text[offset + line.len()..]));
        }
        offset += line.len();
    }

    warn!("front matter is never closed; treating the whole file as recipe text");
    Ok((RecipeMetadata::default(), text))
}

fn read_header(header: &str) -> Result<RecipeMetadata, ParseError> {
    let mut metadata = RecipeMetadata::default();
    if header.trim().is_empty() {
        return Ok(metadata);
    }

    let entries = match serde_yaml::from_str::<Value>(header) {
        Ok(Value::Mapping(entries)) => entries,
        Ok(Value::Null) => return Ok(metadata),
        Ok(_) => {
            return Err(ParseError::InvalidFrontMatter(
                "expected `key: value` lines".to_string(),
            ))
        }
        Err(e) => return Err(ParseError::InvalidFrontMatter(e.to_string())),
    };

    for (key, value) in entries {
        let Some(name) = key.as_str() else {
            warn!("ignoring front matter entry with a non-text key: {:?}", key);
            continue;
        };
        let Some(field) = MetadataField::from_key(name) else {
            warn!("ignoring unknown front matter key: {}", name.trim());
            continue;
        };
        if let Some(value) = field_value(field, value) {
            metadata.set(field, value);
        }
    }
    Ok(metadata)
}

/// Scalar value of an entry as text; durations given in seconds are formatted
fn field_value(field: MetadataField, value: Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null => return None,
        other => {
            warn!("ignoring non-scalar value for {}: {:?}", field.key(), other);
            return None;
        }
    };

    let text = match field {
        MetadataField::PrepTime | MetadataField::CookTime => match text.trim().parse::<i64>() {
            Ok(seconds) => format_duration(seconds),
            Err(_) => text,
        },
        _ => text,
    };
    (!text.trim().is_empty()).then_some(text)
}

/// Writes the non-blank fields of `metadata` as a YAML front matter block.
///
/// Returns an empty string when there is nothing to write.
pub fn generate(metadata: &RecipeMetadata) -> Result<String, RecipeError> {
    if metadata.is_blank() {
        return Ok(String::new());
    }

    let mut entries = Mapping::new();
    for field in MetadataField::ALL {
        if let Some(value) = metadata.get(field) {
            entries.insert(
                Value::String(field.key().to_string()),
                Value::String(value.trim().to_string()),
            );
        }
    }

    let yaml = serde_yaml::to_string(&entries)?;
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n"))
}

/// Formats a number of seconds as hours and minutes, e.g. `1 hour 30 minutes`.
///
/// Non-positive durations format as an empty string.
pub fn format_duration(total_seconds: i64) -> String {
    if total_seconds <= 0 {
        return String::new();
    }

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{} hour{}", hours, if hours == 1 { "" } else { "s" }));
    }
    if minutes > 0 {
        parts.push(format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" }));
    }

    if parts.is_empty() {
        "0 minutes".to_string()
    } else {
        parts.join(" ")
    }
}
