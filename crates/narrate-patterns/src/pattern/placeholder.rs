//! Placeholder parsing used by the lexer.
//!
//! A placeholder is `$` followed by a name (`[A-Za-z_][A-Za-z0-9_]*`) and an
//! optional `:hint`. The colon only opens a hint when a name character follows
//! it, so `$total: units` keeps its colon as literal text.

use std::iter::Peekable;
use std::str::CharIndices;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlaceholderSpec {
    pub name: String,
    pub hint: Option<String>,
    pub start: usize,
}

pub(crate) fn is_name_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn take_name(chars: &mut Peekable<CharIndices<'_>>) -> String {
    let mut name = String::new();
    while let Some(&(_, ch)) = chars.peek() {
        if !is_name_char(ch) {
            break;
        }
        name.push(ch);
        chars.next();
    }
    name
}

fn colon_opens_hint(chars: &Peekable<CharIndices<'_>>) -> bool {
    let mut ahead = chars.clone();
    matches!(ahead.next(), Some((_, ':')))
        && matches!(ahead.peek(), Some(&(_, ch)) if is_name_start(ch))
}

/// Parse the placeholder whose `$` sits at byte `start`.
///
/// `chars` must be positioned just after the `$` and the caller must have
/// checked that a name character follows.
pub(crate) fn parse_placeholder(
    chars: &mut Peekable<CharIndices<'_>>,
    start: usize,
) -> PlaceholderSpec {
    let name = take_name(chars);
    let hint = if colon_opens_hint(chars) {
        chars.next();
        Some(take_name(chars))
    } else {
        None
    };
    PlaceholderSpec { name, hint, start }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(pattern: &str) -> (PlaceholderSpec, String) {
        let mut chars = pattern.char_indices().peekable();
        chars.next();
        let spec = parse_placeholder(&mut chars, 0);
        let rest = chars.map(|(_, ch)| ch).collect();
        (spec, rest)
    }

    #[test]
    fn reads_name_up_to_first_non_name_character() {
        let (spec, rest) = parse("$account.");
        assert_eq!(spec.name, "account");
        assert_eq!(spec.hint, None);
        assert_eq!(rest, ".");
    }

    #[test]
    fn reads_hint_after_colon() {
        let (spec, rest) = parse("$amount:u32 dollars");
        assert_eq!(spec.name, "amount");
        assert_eq!(spec.hint.as_deref(), Some("u32"));
        assert_eq!(rest, " dollars");
    }

    #[test]
    fn colon_before_space_stays_literal() {
        let (spec, rest) = parse("$total: units");
        assert_eq!(spec.hint, None);
        assert_eq!(rest, ": units");
    }
}
