//! Helpers for step patterns written directly as regular expressions.

/// Wrap a user regular expression so it must match the whole step text.
pub(crate) fn anchor(source: &str) -> String {
    format!("^(?:{source})$")
}

/// Count characters of `source` that match themselves outside any group.
///
/// Metacharacters, character classes, repetition ranges and escaped classes
/// such as `\d` are not literal. Escaped punctuation such as `\.` is.
pub(crate) fn count_literal_chars(source: &str) -> usize {
    let mut count = 0usize;
    let mut depth = 0usize;
    let mut chars = source.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    if depth == 0 && !escaped.is_ascii_alphanumeric() {
                        count += 1;
                    }
                }
            }
            '(' => depth = depth.saturating_add(1),
            ')' => depth = depth.saturating_sub(1),
            '[' => skip_class(&mut chars),
            '{' => {
                for inner in chars.by_ref() {
                    if inner == '}' {
                        break;
                    }
                }
            }
            '.' | '^' | '$' | '*' | '+' | '?' | '|' => {}
            _ if depth == 0 => count += 1,
            _ => {}
        }
    }
    count
}

fn skip_class(chars: &mut std::str::Chars<'_>) {
    let mut first = true;
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
            }
            ']' if !first => return,
            _ => {}
        }
        first = ch == '^' && first;
    }
}
