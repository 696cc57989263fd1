//! Pattern specificity used to rank candidates matching the same step.
//!
//! A pattern with fewer parameter spans leaves less of the step text to
//! chance, so it ranks first. Literal text breaks ties, then type hints.

use crate::PatternError;
use crate::pattern::lexer::{Token, lex_pattern};
use std::cmp::Ordering;

/// Specificity score for a step pattern; greater means more specific.
///
/// # Ordering
///
/// 1. Fewer placeholders (or capture groups) → more specific
/// 2. More literal characters → more specific
/// 3. More typed placeholders → more specific
///
/// # Examples
///
/// ```
/// use narrate_patterns::SpecificityScore;
///
/// let exact = SpecificityScore::calculate("the light is red").expect("valid pattern");
/// let open = SpecificityScore::calculate("the light is $colour").expect("valid pattern");
/// assert!(exact > open);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecificityScore {
    /// Characters that must appear verbatim in the step text.
    pub literal_chars: usize,
    /// Number of parameter spans.
    pub placeholder_count: usize,
    /// Number of parameter spans narrowed by a type hint.
    pub typed_placeholder_count: usize,
}

impl SpecificityScore {
    /// Score a placeholder pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the placeholder syntax is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use narrate_patterns::SpecificityScore;
    ///
    /// let score = SpecificityScore::calculate("I have $count:u32 apples").expect("valid pattern");
    /// assert_eq!(score.literal_chars, 14);
    /// assert_eq!(score.placeholder_count, 1);
    /// assert_eq!(score.typed_placeholder_count, 1);
    /// ```
    pub fn calculate(pattern: &str) -> Result<Self, PatternError> {
        lex_pattern(pattern).map(|tokens| Self::from_tokens(&tokens))
    }

    pub(crate) fn from_tokens(tokens: &[Token]) -> Self {
        tokens.iter().fold(Self::default(), |mut score, token| {
            match token {
                Token::Literal(text) => score.literal_chars += text.chars().count(),
                Token::Placeholder { hint, .. } => {
                    score.placeholder_count += 1;
                    if hint.is_some() {
                        score.typed_placeholder_count += 1;
                    }
                }
            }
            score
        })
    }

    pub(crate) const fn from_regex(literal_chars: usize, groups: usize) -> Self {
        Self {
            literal_chars,
            placeholder_count: groups,
            typed_placeholder_count: 0,
        }
    }
}

impl Ord for SpecificityScore {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .placeholder_count
            .cmp(&self.placeholder_count)
            .then_with(|| self.literal_chars.cmp(&other.literal_chars))
            .then_with(|| {
                self.typed_placeholder_count
                    .cmp(&other.typed_placeholder_count)
            })
    }
}

impl PartialOrd for SpecificityScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(pattern: &str) -> SpecificityScore {
        match SpecificityScore::calculate(pattern) {
            Ok(s) => s,
            Err(e) => panic!("pattern {pattern:?} should score: {e}"),
        }
    }

    #[test]
    fn fewer_placeholders_beat_more_literal_text() {
        let one = score("$x");
        let two = score("a long literal prefix $x and $y");
        assert!(one > two);
    }

    #[test]
    fn literal_text_breaks_placeholder_ties() {
        let longer = score("the account balance is $n");
        let shorter = score("balance is $n");
        assert!(longer > shorter);
    }

    #[test]
    fn typed_placeholder_is_the_last_tiebreaker() {
        let typed = score("count is $n:u32");
        let untyped = score("count is $n");
        assert_eq!(typed.literal_chars, untyped.literal_chars);
        assert!(typed > untyped);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(score("café $x").literal_chars, 5);
    }

    #[test]
    fn equal_shapes_compare_equal() {
        assert_eq!(
            score("I add $n").cmp(&score("I sub $m")),
            Ordering::Equal
        );
    }

    #[test]
    fn regex_scores_use_group_count() {
        let regex = SpecificityScore::from_regex(8, 1);
        assert_eq!(regex, score("a value $n"));
    }
}
