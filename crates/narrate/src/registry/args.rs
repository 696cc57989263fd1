//! Converted arguments handed to step implementations.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::converters::ParamValue;

/// Error raised when a step reads an argument it cannot use.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    /// The step has fewer arguments than requested.
    #[error("step has no argument at position {index}")]
    Missing {
        /// 0-based position requested.
        index: usize,
    },
    /// No argument carries the requested name.
    #[error("step has no argument named '{name}'")]
    UnknownName {
        /// Name requested.
        name: String,
    },
    /// The raw text could not be parsed into the requested type.
    #[error("argument {index} ('{value}') could not be parsed: {reason}")]
    Parse {
        /// 0-based position.
        index: usize,
        /// Raw captured text.
        value: String,
        /// Parser message.
        reason: String,
    },
}

#[derive(Debug, Clone)]
struct Arg {
    name: Option<String>,
    raw: String,
    value: ParamValue,
}

/// Arguments captured from one step line.
///
/// Each argument keeps both the captured text and its converted value.
///
/// # Examples
///
/// ```
/// use narrate::{ParamValue, StepArgs};
///
/// let args = StepArgs::new("When I add 2")
///     .with_arg(Some("n"), "2", ParamValue::Unsigned(2));
/// assert_eq!(args.text(), "When I add 2");
/// assert_eq!(args.parse::<u32>(0), Ok(2));
/// assert_eq!(args.named("n").and_then(|v| v.as_i128()), Some(2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StepArgs {
    text: String,
    args: Vec<Arg>,
}

impl StepArgs {
    /// Arguments for the step line `text`, initially empty.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument.
    #[must_use]
    pub fn with_arg(mut self, name: Option<&str>, raw: impl Into<String>, value: ParamValue) -> Self {
        self.push(name, raw, value);
        self
    }

    pub(crate) fn push(&mut self, name: Option<&str>, raw: impl Into<String>, value: ParamValue) {
        self.args.push(Arg {
            name: name.map(str::to_owned),
            raw: raw.into(),
            value,
        });
    }

    /// Step line the arguments were captured from, keyword included.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Returns `true` when the pattern declared no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Converted value at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ParamValue> {
        self.args.get(index).map(|arg| &arg.value)
    }

    /// Captured text at `index`.
    #[must_use]
    pub fn raw(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(|arg| arg.raw.as_str())
    }

    /// Converted value of the argument called `name`.
    #[must_use]
    pub fn named(&self, name: &str) -> Option<&ParamValue> {
        self.args
            .iter()
            .find(|arg| arg.name.as_deref() == Some(name))
            .map(|arg| &arg.value)
    }

    /// Converted values in capture order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &ParamValue> {
        self.args.iter().map(|arg| &arg.value)
    }

    /// Parse the captured text at `index` with [`FromStr`].
    ///
    /// # Errors
    ///
    /// Returns [`ArgError::Missing`] when there is no such argument and
    /// [`ArgError::Parse`] when parsing fails.
    pub fn parse<T>(&self, index: usize) -> Result<T, ArgError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let raw = self.raw(index).ok_or(ArgError::Missing { index })?;
        raw.trim().parse::<T>().map_err(|err| ArgError::Parse {
            index,
            value: raw.to_owned(),
            reason: err.to_string(),
        })
    }

    /// Parse the captured text of the argument called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgError::UnknownName`] when no argument has that name and
    /// [`ArgError::Parse`] when parsing fails.
    pub fn parse_named<T>(&self, name: &str) -> Result<T, ArgError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let index = self
            .args
            .iter()
            .position(|arg| arg.name.as_deref() == Some(name))
            .ok_or_else(|| ArgError::UnknownName {
                name: name.to_owned(),
            })?;
        self.parse(index)
    }
}
