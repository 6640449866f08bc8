//! Typographic clean-up applied to recipe text before it is embedded in markup.

use once_cell::sync::Lazy;
use regex::Regex;

pub const NARROW_NO_BREAK_SPACE: char = '\u{202f}';
pub const FRACTION_SLASH: char = '\u{2044}';
pub const MULTIPLICATION_SIGN: char = '\u{00d7}';
pub const EN_DASH: char = '\u{2013}';

static FAHRENHEIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9])\s*°F").unwrap());
static MIXED_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]) ([0-9]+/[0-9])").unwrap());

/// Characters that carry meaning in Typst markup mode
const MARKUP_SPECIALS: &[char] = &[
    '\\', '#', '[', ']', '*', '_', '`', '$', '<', '>', '@', '~', '/', '"',
];

/// Applies the typographic rules used for every instruction, ingredient and source line.
///
/// - `350°F` gets a narrow no-break space before the degree marker
/// - `1 1/2` keeps the whole number and fraction together with a narrow no-break space
/// - `/`, `x` and `-` between two digits become a fraction slash, a multiplication
///   sign and an en dash respectively
pub fn fancy(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let text = FAHRENHEIT.replace_all(text, format!("${{1}}{NARROW_NO_BREAK_SPACE}°F"));
    let text = MIXED_NUMBER.replace_all(&text, format!("${{1}}{NARROW_NO_BREAK_SPACE}${{2}}"));
    replace_between_digits(&text)
}

fn replace_between_digits(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut output = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        let between_digits = i > 0
            && chars[i - 1].is_ascii_digit()
            && chars.get(i + 1).is_some_and(|next| next.is_ascii_digit());

        let replacement = match c {
            '/' if between_digits => FRACTION_SLASH,
            'x' if between_digits => MULTIPLICATION_SIGN,
            '-' if between_digits => EN_DASH,
            other => other,
        };
        output.push(replacement);
    }

    output
}

/// Escapes double quotes for use inside a markup string literal
pub fn escape_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}

/// Escapes free text so it is read literally inside a markup content block.
///
/// The start of a content block counts as the start of a line, so a leading list,
/// enum or heading marker (`- `, `+ `, `= `, `1. `) is escaped as well.
pub fn escape_markup(text: &str) -> String {
    let marker = line_marker(text);
    let mut escaped = String::with_capacity(text.len());
    for (index, c) in text.char_indices() {
        if MARKUP_SPECIALS.contains(&c) || marker == Some(index) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Byte offset of a line-start marker character in `text`, if it opens with one
fn line_marker(text: &str) -> Option<usize> {
    let start = text.len() - text.trim_start().len();
    let rest = &text[start..];

    match rest.chars().next()? {
        '-' | '+' | '=' => Some(start),
        c if c.is_ascii_digit() => {
            let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
            let after = &rest[digits..];
            let opens_enum = after
                .strip_prefix('.')
                .is_some_and(|tail| tail.is_empty() || tail.starts_with(char::is_whitespace));
            opens_enum.then_some(start + digits)
        }
        _ => None,
    }
}

/// `fancy` followed by `escape_markup`, the form every free-text field is embedded in
pub fn fancy_markup(text: &str) -> String {
    escape_markup(&fancy(text))
}

/// Turns a snake_case key into a display label, e.g. `prep_time` into `Prep Time`
pub fn humanize_key(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
