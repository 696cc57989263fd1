//! Pattern lexer splitting placeholder patterns into literal and placeholder
//! tokens.

use crate::errors::{PatternError, placeholder_error};

use super::placeholder::{PlaceholderSpec, is_name_start, parse_placeholder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Literal(String),
    Placeholder { name: String, hint: Option<String> },
}

fn flush_literal(literal: &mut String, tokens: &mut Vec<Token>) {
    if !literal.is_empty() {
        tokens.push(Token::Literal(std::mem::take(literal)));
    }
}

/// Split `pattern` into tokens.
///
/// `$$` is a literal dollar and a backslash makes the next character literal.
/// Two placeholders must be separated by literal text, and a name may only be
/// used once.
pub(crate) fn lex_pattern(pattern: &str) -> Result<Vec<Token>, PatternError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut names: Vec<String> = Vec::new();
    let mut chars = pattern.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '\\' => literal.push(chars.next().map_or('\\', |(_, escaped)| escaped)),
            '$' => match chars.peek() {
                Some(&(_, '$')) => {
                    chars.next();
                    literal.push('$');
                }
                Some(&(_, next)) if is_name_start(next) => {
                    if literal.is_empty() && matches!(tokens.last(), Some(Token::Placeholder { .. }))
                    {
                        return Err(placeholder_error(
                            "placeholders must be separated by literal text",
                            pos,
                            None,
                        ));
                    }
                    flush_literal(&mut literal, &mut tokens);
                    let PlaceholderSpec { name, hint, start } = parse_placeholder(&mut chars, pos);
                    if names.contains(&name) {
                        return Err(placeholder_error(
                            "duplicate placeholder name",
                            start,
                            Some(name),
                        ));
                    }
                    names.push(name.clone());
                    tokens.push(Token::Placeholder { name, hint });
                }
                _ => literal.push('$'),
            },
            other => literal.push(other),
        }
    }

    flush_literal(&mut literal, &mut tokens);
    Ok(tokens)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests exercise lexing fallibility")]
mod tests {
    use super::*;

    fn placeholder(name: &str, hint: Option<&str>) -> Token {
        Token::Placeholder {
            name: name.into(),
            hint: hint.map(Into::into),
        }
    }

    #[test]
    fn splits_literals_and_placeholders() {
        let tokens = lex_pattern("I add $amount:u32 to $account").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Literal("I add ".into()),
                placeholder("amount", Some("u32")),
                Token::Literal(" to ".into()),
                placeholder("account", None),
            ]
        );
    }

    #[test]
    fn doubled_and_escaped_dollars_are_literal() {
        let tokens = lex_pattern(r"costs $$5 or \$price").unwrap();
        assert_eq!(tokens, vec![Token::Literal("costs $5 or $price".into())]);
    }

    #[test]
    fn lone_dollar_is_literal() {
        let tokens = lex_pattern("pay $ 5").unwrap();
        assert_eq!(tokens, vec![Token::Literal("pay $ 5".into())]);
    }

    #[test]
    fn keeps_multibyte_literals_intact() {
        let tokens = lex_pattern("café $order").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Literal("café ".into()), placeholder("order", None)]
        );
    }

    #[test]
    fn rejects_adjacent_placeholders() {
        let err = lex_pattern("$a$b").unwrap_err();
        assert!(err.to_string().contains("separated by literal text"));
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = lex_pattern("$n plus $n").unwrap_err();
        assert!(err.to_string().contains("duplicate placeholder name"));
    }
}
