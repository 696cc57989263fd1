//! Convert lexed tokens into anchored regular-expression sources.

use crate::errors::PatternError;
use crate::hint::get_type_pattern;

use super::lexer::{Token, lex_pattern};

/// Escape literal text, letting each run of whitespace match any run of
/// whitespace (including a line break before a multi-line argument).
fn push_literal(regex: &mut String, text: &str) {
    let mut in_space = false;
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_space {
                regex.push_str(r"\s+");
            }
            in_space = true;
        } else {
            in_space = false;
            regex.push_str(&regex::escape(ch.encode_utf8(&mut buf)));
        }
    }
}

pub(crate) fn regex_from_tokens(tokens: &[Token], capacity: usize) -> String {
    let mut regex = String::with_capacity(capacity.saturating_mul(2).saturating_add(2));
    regex.push('^');
    for token in tokens {
        match token {
            Token::Literal(text) => push_literal(&mut regex, text),
            Token::Placeholder { hint, .. } => {
                regex.push('(');
                regex.push_str(get_type_pattern(hint.as_deref()));
                regex.push(')');
            }
        }
    }
    regex.push('$');
    regex
}

/// Build the anchored regular-expression source for a placeholder pattern.
///
/// # Errors
/// Returns [`PatternError::Placeholder`] when the placeholder syntax is
/// malformed.
///
/// # Examples
/// ```
/// use narrate_patterns::build_regex_from_pattern;
///
/// let source = build_regex_from_pattern("I add $n:u32").expect("valid pattern");
/// assert_eq!(source, r"^I\s+add\s+(\d+)$");
/// ```
pub fn build_regex_from_pattern(pattern: &str) -> Result<String, PatternError> {
    let tokens = lex_pattern(pattern)?;
    Ok(regex_from_tokens(&tokens, pattern.len()))
}
