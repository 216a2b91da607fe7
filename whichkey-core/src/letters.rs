//! Candidate mnemonic characters derived from a command's id and name.
//!
//! All functions are total: missing separators yield the whole string as a
//! single token, and empty words contribute nothing.

/// Everything after the last colon, or the whole string.
fn strip_namespace(s: &str) -> &str {
    s.rsplit(':').next().unwrap_or(s)
}

fn lowercase(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

/// First letter of each hyphen-separated word of the id's action part.
///
/// `editor:toggle-bold-text` yields `t b t`.
#[must_use]
pub fn id_first_letters(id: &str) -> Vec<char> {
    strip_namespace(id)
        .split('-')
        .filter_map(|word| word.chars().next())
        .map(lowercase)
        .collect()
}

/// First letter of each word of the name, with digits taking precedence.
///
/// A word containing a digit contributes that digit instead of its initial,
/// so `Heading #2 Style` yields `h 2 s`. Words that neither contain a digit
/// nor start with an alphanumeric character are skipped.
#[must_use]
pub fn name_first_letters(name: &str) -> Vec<char> {
    strip_namespace(name)
        .trim()
        .split(' ')
        .filter_map(|word| {
            if let Some(digit) = word.chars().find(char::is_ascii_digit) {
                return Some(digit);
            }
            let first = word.chars().next()?;
            first.is_alphanumeric().then(|| lowercase(first))
        })
        .collect()
}

/// Letters buried in the first word of the name, after its initial.
///
/// `Table: Insert Column` yields `n s e r t`. This is the fallback pool used
/// once initials run out.
#[must_use]
pub fn name_remaining_letters(name: &str) -> Vec<char> {
    strip_namespace(name)
        .trim()
        .split(' ')
        .next()
        .map(|word| {
            word.chars()
                .skip(1)
                .filter(|ch| ch.is_alphanumeric())
                .map(lowercase)
                .collect()
        })
        .unwrap_or_default()
}
