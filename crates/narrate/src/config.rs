//! Engine configuration.
//!
//! A [`Configuration`] is passed explicitly to the runner and embedder. It
//! can be assembled with builder methods, from key/value properties, or from
//! `NARRATE_*` environment variables.

use narrate_policy::{ErrorPolicy, ErrorStrategy, RunnerMode, UnknownStrategy};
use thiserror::Error;

use crate::converters::ParameterConverters;
use crate::keywords::{KeywordError, KeywordName, Keywords};
use crate::table::TableSeparators;

const ENV_KEYS: [(&str, &str); 5] = [
    ("NARRATE_BATCH", "mode.batch"),
    ("NARRATE_SKIP", "mode.skip"),
    ("NARRATE_IGNORE_FAILURE", "mode.ignore_failure"),
    ("NARRATE_PENDING_STRATEGY", "strategy.pending"),
    ("NARRATE_ERROR_STRATEGY", "strategy.error"),
];

/// Error raised while reading configuration properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The key is not a recognised property.
    #[error("unknown configuration key '{key}'")]
    UnknownKey {
        /// Offending key.
        key: String,
    },
    /// A boolean property has an unrecognised value.
    #[error("'{value}' is not a boolean for '{key}'")]
    InvalidBool {
        /// Property key.
        key: String,
        /// Rejected value.
        value: String,
    },
    /// A strategy property names no strategy.
    #[error("invalid value for '{key}': {source}")]
    InvalidStrategy {
        /// Property key.
        key: String,
        /// Parse failure.
        #[source]
        source: UnknownStrategy,
    },
    /// A keyword property names no keyword, or the resulting table is
    /// ambiguous.
    #[error(transparent)]
    Keyword(#[from] KeywordError),
}

/// Keywords, error policy, runner mode and parameter converters.
///
/// # Examples
///
/// ```
/// use narrate::{Configuration, KeywordName};
/// use narrate_policy::ErrorStrategy;
///
/// let config = Configuration::from_properties([
///     ("keyword.Given", "Gegeben"),
///     ("strategy.pending", "rethrow"),
///     ("mode.batch", "yes"),
/// ])
/// .expect("valid properties");
/// assert_eq!(config.keywords().get(KeywordName::Given), "Gegeben");
/// assert_eq!(config.policy().pending, ErrorStrategy::Rethrow);
/// assert!(config.runner_mode().batch);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    keywords: Keywords,
    policy: ErrorPolicy,
    mode: RunnerMode,
    converters: ParameterConverters,
}

impl Configuration {
    /// English keywords, pending steps tolerated, failures raised, fail-fast
    /// embedding and the default converters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keyword table.
    #[must_use]
    pub fn keywords(&self) -> &Keywords {
        &self.keywords
    }

    /// Strategies applied to pending and failed causes.
    #[must_use]
    pub const fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Embedder mode.
    #[must_use]
    pub const fn runner_mode(&self) -> RunnerMode {
        self.mode
    }

    /// Parameter converters.
    #[must_use]
    pub fn converters(&self) -> &ParameterConverters {
        &self.converters
    }

    /// Use `keywords`; `table` parameters follow its separators.
    #[must_use]
    pub fn with_keywords(mut self, keywords: Keywords) -> Self {
        self.keywords = keywords;
        self.sync_table_separators();
        self
    }

    /// Strategy for pending causes.
    #[must_use]
    pub const fn with_pending_strategy(mut self, strategy: ErrorStrategy) -> Self {
        self.policy = self.policy.with_pending(strategy);
        self
    }

    /// Strategy for failure causes.
    #[must_use]
    pub const fn with_error_strategy(mut self, strategy: ErrorStrategy) -> Self {
        self.policy = self.policy.with_error(strategy);
        self
    }

    /// Embedder mode.
    #[must_use]
    pub const fn with_runner_mode(mut self, mode: RunnerMode) -> Self {
        self.mode = mode;
        self
    }

    /// Use `converters`; its `table` converter is replaced by one using the
    /// configured separators.
    #[must_use]
    pub fn with_converters(mut self, converters: ParameterConverters) -> Self {
        self.converters = converters;
        self.sync_table_separators();
        self
    }

    fn sync_table_separators(&mut self) {
        let converters = std::mem::replace(&mut self.converters, ParameterConverters::empty());
        self.converters =
            converters.with_table_separators(TableSeparators::from_keywords(&self.keywords));
    }

    /// Defaults overridden by `pairs`.
    ///
    /// # Errors
    ///
    /// See [`apply_properties`](Self::apply_properties).
    pub fn from_properties<I, K, V>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::default().apply_properties(pairs)
    }

    /// Apply key/value properties in order.
    ///
    /// Recognised keys are `keyword.<Name>`, `table.header_separator`,
    /// `table.value_separator`, `strategy.pending`, `strategy.error`,
    /// `mode.batch`, `mode.skip` and `mode.ignore_failure`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unknown keys, unparsable values, or a
    /// resulting keyword table that is ambiguous.
    pub fn apply_properties<I, K, V>(mut self, pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut keywords: Option<Keywords> = None;
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            let keyword = match key {
                "table.header_separator" => Some(KeywordName::ExamplesTableHeaderSeparator),
                "table.value_separator" => Some(KeywordName::ExamplesTableValueSeparator),
                "strategy.pending" => {
                    self.policy = self.policy.with_pending(parse_strategy(key, value)?);
                    None
                }
                "strategy.error" => {
                    self.policy = self.policy.with_error(parse_strategy(key, value)?);
                    None
                }
                "mode.batch" => {
                    self.mode = self.mode.with_batch(parse_bool(key, value)?);
                    None
                }
                "mode.skip" => {
                    self.mode = self.mode.with_skip(parse_bool(key, value)?);
                    None
                }
                "mode.ignore_failure" => {
                    self.mode = self.mode.with_ignore_failure(parse_bool(key, value)?);
                    None
                }
                _ => match key.strip_prefix("keyword.") {
                    Some(name) => Some(name.parse::<KeywordName>()?),
                    None => return Err(ConfigError::UnknownKey { key: key.to_owned() }),
                },
            };
            if let Some(name) = keyword {
                let current = keywords.take().unwrap_or_else(|| self.keywords.clone());
                keywords = Some(current.with(name, value));
            }
        }
        if let Some(keywords) = keywords {
            keywords.validate()?;
            self = self.with_keywords(keywords);
        }
        Ok(self)
    }

    /// Defaults overridden by `NARRATE_*` environment variables.
    ///
    /// `NARRATE_BATCH`, `NARRATE_SKIP` and `NARRATE_IGNORE_FAILURE` take
    /// booleans; `NARRATE_PENDING_STRATEGY` and `NARRATE_ERROR_STRATEGY`
    /// take `silent`, `log` or `rethrow`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an unparsable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pairs: Vec<(&str, String)> = ENV_KEYS
            .iter()
            .filter_map(|(variable, key)| lookup(variable).map(|value| (*key, value)))
            .collect();
        Self::from_properties(pairs)
    }
}

fn parse_env_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "Yes" | "on" | "ON" | "On" => Some(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "No" | "off" | "OFF" | "Off" => {
            Some(false)
        }
        _ => None,
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    parse_env_bool(value).ok_or_else(|| ConfigError::InvalidBool {
        key: key.to_owned(),
        value: value.to_owned(),
    })
}

fn parse_strategy(key: &str, value: &str) -> Result<ErrorStrategy, ConfigError> {
    value
        .parse()
        .map_err(|source| ConfigError::InvalidStrategy {
            key: key.to_owned(),
            source,
        })
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests use fixed properties")]
mod tests {
    use super::*;
    use crate::converters::ParamValue;
    use rstest::rstest;

    #[test]
    fn defaults_tolerate_pending_and_raise_failures() {
        let config = Configuration::new();
        assert_eq!(config.policy().pending, ErrorStrategy::Silent);
        assert_eq!(config.policy().error, ErrorStrategy::Rethrow);
        assert_eq!(config.runner_mode(), RunnerMode::default());
    }

    #[test]
    fn table_separators_reach_table_parameters() {
        let config = Configuration::from_properties([
            ("table.header_separator", "!"),
            ("table.value_separator", "!"),
        ])
        .expect("valid properties");
        let value = config
            .converters()
            .convert(Some("table"), "!name!\n!Larry!")
            .expect("table parameter");
        let table = value.as_table().expect("table value");
        assert_eq!(table.headers(), ["name"]);
        assert!(matches!(value, ParamValue::Table(_)));
    }

    #[rstest]
    #[case(("colour", "red"), ConfigError::UnknownKey { key: "colour".into() })]
    #[case(
        ("mode.skip", "perhaps"),
        ConfigError::InvalidBool { key: "mode.skip".into(), value: "perhaps".into() }
    )]
    #[case(
        ("keyword.Whenever", "x"),
        ConfigError::Keyword(KeywordError::UnknownName { name: "Whenever".into() })
    )]
    fn rejects_bad_properties(#[case] pair: (&str, &str), #[case] expected: ConfigError) {
        assert_eq!(
            Configuration::from_properties([pair]).expect_err("invalid property"),
            expected
        );
    }

    #[test]
    fn rejects_unknown_strategy() {
        let err = Configuration::from_properties([("strategy.error", "ignore")])
            .expect_err("unknown strategy");
        assert!(matches!(err, ConfigError::InvalidStrategy { key, .. } if key == "strategy.error"));
    }

    #[test]
    fn rejects_ambiguous_keywords() {
        let err = Configuration::from_properties([("keyword.Then", "When")])
            .expect_err("ambiguous keywords");
        assert!(matches!(err, ConfigError::Keyword(KeywordError::Ambiguous { .. })));
    }

    #[test]
    fn reads_environment_through_lookup() {
        let config = Configuration::from_lookup(|name| match name {
            "NARRATE_BATCH" => Some("on".to_owned()),
            "NARRATE_PENDING_STRATEGY" => Some("Log".to_owned()),
            _ => None,
        })
        .expect("valid environment");
        assert!(config.runner_mode().batch);
        assert!(!config.runner_mode().skip);
        assert_eq!(config.policy().pending, ErrorStrategy::Log);
    }

    #[test]
    fn parse_env_bool_understands_common_values() {
        for truthy in ["1", "true", "TRUE", "yes", "On"] {
            assert_eq!(parse_env_bool(truthy), Some(true), "expected {truthy} to be truthy");
        }
        for falsy in ["0", "False", "no", "OFF"] {
            assert_eq!(parse_env_bool(falsy), Some(false), "expected {falsy} to be falsy");
        }
        assert_eq!(parse_env_bool("maybe"), None);
    }
}
