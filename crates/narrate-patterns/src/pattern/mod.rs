//! Step-pattern lexing and compilation.

mod compiler;
pub(crate) mod lexer;
mod placeholder;
mod regex_source;

use crate::errors::PatternError;
use crate::specificity::SpecificityScore;
use crate::capture;
use regex::Regex;

pub use compiler::build_regex_from_pattern;

/// Flavour of a step pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternSyntax {
    /// `$name` / `$name:hint` placeholders in literal text.
    Placeholders,
    /// A regular expression whose capture groups are the parameters.
    Regex,
}

/// Declared parameter of a compiled pattern, in capture order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    /// Placeholder or named-group name, when the pattern gives one.
    pub name: Option<String>,
    /// Type hint selecting the parameter converter.
    pub hint: Option<String>,
}

/// A step pattern compiled into an anchored regular expression.
///
/// # Examples
///
/// ```
/// use narrate_patterns::CompiledPattern;
///
/// let pattern = CompiledPattern::from_placeholders("I add $n:u32").expect("valid pattern");
/// assert_eq!(pattern.captures("I add 2"), Some(vec!["2".to_string()]));
/// assert!(!pattern.is_match("I add two"));
///
/// let regex = CompiledPattern::from_regex(r"a value (\d+)").expect("valid regex");
/// assert_eq!(regex.captures("a value 1"), Some(vec!["1".to_string()]));
/// ```
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    syntax: PatternSyntax,
    regex: Regex,
    params: Vec<ParamSpec>,
    specificity: SpecificityScore,
}

impl CompiledPattern {
    /// Compile a placeholder pattern.
    ///
    /// # Errors
    /// Returns [`PatternError`] when the placeholders are malformed or the
    /// resulting regular expression is rejected.
    pub fn from_placeholders(pattern: &str) -> Result<Self, PatternError> {
        let tokens = lexer::lex_pattern(pattern)?;
        let regex = Regex::new(&compiler::regex_from_tokens(&tokens, pattern.len()))?;
        let params = tokens
            .iter()
            .filter_map(|token| match token {
                lexer::Token::Placeholder { name, hint } => Some(ParamSpec {
                    name: Some(name.clone()),
                    hint: hint.clone(),
                }),
                lexer::Token::Literal(_) => None,
            })
            .collect();
        Ok(Self {
            source: pattern.to_owned(),
            syntax: PatternSyntax::Placeholders,
            regex,
            params,
            specificity: SpecificityScore::from_tokens(&tokens),
        })
    }

    /// Compile a regular-expression pattern. The expression is anchored at
    /// both ends; every capture group becomes a parameter with no hint.
    ///
    /// # Errors
    /// Returns [`PatternError::Regex`] when the expression does not compile.
    pub fn from_regex(pattern: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(&regex_source::anchor(pattern))?;
        let params: Vec<ParamSpec> = regex
            .capture_names()
            .skip(1)
            .map(|name| ParamSpec {
                name: name.map(str::to_owned),
                hint: None,
            })
            .collect();
        let specificity =
            SpecificityScore::from_regex(regex_source::count_literal_chars(pattern), params.len());
        Ok(Self {
            source: pattern.to_owned(),
            syntax: PatternSyntax::Regex,
            regex,
            params,
            specificity,
        })
    }

    /// Pattern text as written by the caller.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Flavour the pattern was compiled from.
    #[must_use]
    pub const fn syntax(&self) -> PatternSyntax {
        self.syntax
    }

    /// The anchored regular expression.
    #[must_use]
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Declared parameters in capture order.
    #[must_use]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Specificity of the pattern.
    #[must_use]
    pub const fn specificity(&self) -> SpecificityScore {
        self.specificity
    }

    /// Returns `true` when `text` matches the whole pattern.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Positional parameter values captured from `text`, or `None` when the
    /// text does not match.
    #[must_use]
    pub fn captures(&self, text: &str) -> Option<Vec<String>> {
        capture::extract_captured_values(&self.regex, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn placeholders(pattern: &str) -> CompiledPattern {
        match CompiledPattern::from_placeholders(pattern) {
            Ok(compiled) => compiled,
            Err(err) => panic!("{pattern:?} should compile: {err}"),
        }
    }

    fn regex(pattern: &str) -> CompiledPattern {
        match CompiledPattern::from_regex(pattern) {
            Ok(compiled) => compiled,
            Err(err) => panic!("{pattern:?} should compile: {err}"),
        }
    }

    #[test]
    fn placeholder_params_keep_names_and_hints() {
        let pattern = placeholders("I transfer $amount:f64 to $account");
        assert_eq!(
            pattern.params(),
            &[
                ParamSpec {
                    name: Some("amount".into()),
                    hint: Some("f64".into()),
                },
                ParamSpec {
                    name: Some("account".into()),
                    hint: None,
                },
            ]
        );
        assert_eq!(
            pattern.captures("I transfer 2.5 to savings"),
            Some(vec!["2.5".into(), "savings".into()])
        );
    }

    #[test]
    fn regex_params_follow_capture_groups() {
        let pattern = regex(r"(?P<who>\w+) pays (\d+)");
        assert_eq!(pattern.params().len(), 2);
        assert_eq!(pattern.params().first().and_then(|p| p.name.as_deref()), Some("who"));
        assert_eq!(pattern.syntax(), PatternSyntax::Regex);
    }

    #[rstest]
    #[case("yes|no", "yes", true)]
    #[case("yes|no", "yes please", false)]
    #[case(r"a value (\d+)", "a value 12", true)]
    #[case(r"a value (\d+)", "not a value 12", false)]
    fn regex_patterns_match_whole_text(
        #[case] source: &str,
        #[case] text: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(regex(source).is_match(text), expected);
    }

    #[test]
    fn table_hint_spans_lines() {
        let pattern = placeholders("the traders: $rows:table");
        let text = "the traders:\n|name|rank|\n|Larry|Stooge 3|";
        assert_eq!(
            pattern.captures(text),
            Some(vec!["|name|rank|\n|Larry|Stooge 3|".into()])
        );
    }

    #[test]
    fn invalid_regex_is_reported() {
        assert!(matches!(
            CompiledPattern::from_regex("unclosed (group"),
            Err(PatternError::Regex(_))
        ));
    }

    #[test]
    fn bool_hint_rejects_other_words() {
        let pattern = placeholders("$flag:bool is set");
        assert!(pattern.is_match("Yes is set"));
        assert!(!pattern.is_match("maybe is set"));
    }
}
