//! Parameter conversion registry.
//!
//! A matched step yields raw strings, one per declared parameter. The
//! parameter's type hint selects a converter that turns the string into a
//! [`ParamValue`]. Unhinted parameters, and hints with no registered
//! converter, stay text.

use std::any::Any;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use hashbrown::HashMap;
use thiserror::Error;

use crate::table::{ExamplesTable, TableSeparators};

/// A converted step parameter.
#[derive(Clone)]
pub enum ParamValue {
    /// Unconverted text.
    Text(String),
    /// Signed integer.
    Integer(i128),
    /// Unsigned integer.
    Unsigned(u128),
    /// Floating-point number.
    Float(f64),
    /// Boolean.
    Boolean(bool),
    /// Comma-separated items, trimmed.
    List(Vec<String>),
    /// Multi-line table argument.
    Table(ExamplesTable),
    /// Value produced by a caller-registered converter.
    Custom(Arc<dyn Any + Send + Sync>),
}

impl ParamValue {
    /// Text content, if the value is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Integer content of either signedness, if it fits in an `i128`.
    #[must_use]
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::Unsigned(value) => i128::try_from(*value).ok(),
            _ => None,
        }
    }

    /// Floating-point content.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Boolean content.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// List items.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Table content.
    #[must_use]
    pub const fn as_table(&self) -> Option<&ExamplesTable> {
        match self {
            Self::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Custom value downcast to `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Custom(value) => value.downcast_ref(),
            _ => None,
        }
    }
}

impl fmt::Debug for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Integer(value) => f.debug_tuple("Integer").field(value).finish(),
            Self::Unsigned(value) => f.debug_tuple("Unsigned").field(value).finish(),
            Self::Float(value) => f.debug_tuple("Float").field(value).finish(),
            Self::Boolean(value) => f.debug_tuple("Boolean").field(value).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Table(table) => f.debug_tuple("Table").field(table).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// A value that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ConversionError {
    reason: String,
}

impl ConversionError {
    /// Describe a failed conversion.
    #[must_use]
    pub fn new(reason: impl fmt::Display) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }

    /// Description of the failure.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Converts raw parameter text into a [`ParamValue`].
///
/// Closures with the matching signature implement the trait.
pub trait ParameterConverter: Send + Sync {
    /// Convert `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError`] when `value` is not acceptable.
    fn convert(&self, value: &str) -> Result<ParamValue, ConversionError>;
}

impl<F> ParameterConverter for F
where
    F: Fn(&str) -> Result<ParamValue, ConversionError> + Send + Sync,
{
    fn convert(&self, value: &str) -> Result<ParamValue, ConversionError> {
        self(value)
    }
}

/// Converters keyed by type hint.
///
/// # Examples
///
/// ```
/// use narrate::{ParamValue, ParameterConverters};
///
/// let mut converters = ParameterConverters::default();
/// converters.register_enum("colour", ["Red", "Green"]);
///
/// let value = converters.convert(Some("u8"), "42").expect("fits in u8");
/// assert_eq!(value.as_i128(), Some(42));
/// assert!(converters.convert(Some("u8"), "300").is_err());
///
/// let colour = converters.convert(Some("colour"), "green").expect("known variant");
/// assert_eq!(colour.as_text(), Some("Green"));
/// ```
#[derive(Clone)]
pub struct ParameterConverters {
    by_hint: HashMap<String, Arc<dyn ParameterConverter>>,
}

impl Default for ParameterConverters {
    fn default() -> Self {
        let mut converters = Self::empty();
        converters.register_number::<u8, _>("u8", u128::from);
        converters.register_number::<u16, _>("u16", u128::from);
        converters.register_number::<u32, _>("u32", u128::from);
        converters.register_number::<u64, _>("u64", u128::from);
        converters.register_number::<u128, _>("u128", |value| value);
        converters.register_number::<usize, _>("usize", |value| value as u128);
        converters.register_signed::<i8, _>("i8", i128::from);
        converters.register_signed::<i16, _>("i16", i128::from);
        converters.register_signed::<i32, _>("i32", i128::from);
        converters.register_signed::<i64, _>("i64", i128::from);
        converters.register_signed::<i128, _>("i128", |value| value);
        converters.register_signed::<isize, _>("isize", |value| value as i128);
        converters.register("f32", |value: &str| {
            parse_trimmed::<f32>(value).map(|n| ParamValue::Float(f64::from(n)))
        });
        converters.register("f64", |value: &str| {
            parse_trimmed::<f64>(value).map(ParamValue::Float)
        });
        converters.register("bool", convert_bool);
        converters.register("list", convert_list);
        converters.register("string", convert_text);
        converters.register("word", convert_text);
        converters.with_table_separators(TableSeparators::default())
    }
}

impl ParameterConverters {
    /// A registry with no converters; every parameter stays text.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            by_hint: HashMap::new(),
        }
    }

    /// Register `converter` for `hint`, replacing any earlier one.
    pub fn register<C>(&mut self, hint: impl Into<String>, converter: C) -> &mut Self
    where
        C: ParameterConverter + 'static,
    {
        self.by_hint.insert(hint.into(), Arc::new(converter));
        self
    }

    /// Register a converter accepting one of `variants`, compared without
    /// regard to ASCII case. The converted value is the variant as declared.
    pub fn register_enum<I, S>(&mut self, hint: impl Into<String>, variants: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variants: Vec<String> = variants.into_iter().map(Into::into).collect();
        self.register(hint, move |value: &str| {
            let trimmed = value.trim();
            variants
                .iter()
                .find(|variant| variant.eq_ignore_ascii_case(trimmed))
                .map(|variant| ParamValue::Text(variant.clone()))
                .ok_or_else(|| {
                    ConversionError::new(format!(
                        "'{trimmed}' is not one of {}",
                        variants.join(", ")
                    ))
                })
        })
    }

    /// Parse `table` parameters with `separators`.
    #[must_use]
    pub fn with_table_separators(mut self, separators: TableSeparators) -> Self {
        self.register("table", move |value: &str| {
            ExamplesTable::parse_with(value, &separators)
                .map(ParamValue::Table)
                .map_err(ConversionError::new)
        });
        self
    }

    /// Convert `value` using the converter registered for `hint`.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError`] when the converter rejects the value.
    pub fn convert(&self, hint: Option<&str>, value: &str) -> Result<ParamValue, ConversionError> {
        match hint.and_then(|hint| self.by_hint.get(hint)) {
            Some(converter) => converter.convert(value),
            None => Ok(ParamValue::Text(value.to_owned())),
        }
    }

    /// Whether a converter is registered for `hint`.
    #[must_use]
    pub fn supports(&self, hint: &str) -> bool {
        self.by_hint.contains_key(hint)
    }

    fn register_number<T, W>(&mut self, hint: &str, widen: W)
    where
        T: FromStr,
        T::Err: fmt::Display,
        W: Fn(T) -> u128 + Send + Sync + 'static,
    {
        self.register(hint, move |value: &str| {
            parse_trimmed::<T>(value).map(|n| ParamValue::Unsigned(widen(n)))
        });
    }

    fn register_signed<T, W>(&mut self, hint: &str, widen: W)
    where
        T: FromStr,
        T::Err: fmt::Display,
        W: Fn(T) -> i128 + Send + Sync + 'static,
    {
        self.register(hint, move |value: &str| {
            parse_trimmed::<T>(value).map(|n| ParamValue::Integer(widen(n)))
        });
    }
}

impl fmt::Debug for ParameterConverters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hints: Vec<&str> = self.by_hint.keys().map(String::as_str).collect();
        hints.sort_unstable();
        f.debug_struct("ParameterConverters")
            .field("hints", &hints)
            .finish()
    }
}

fn parse_trimmed<T>(value: &str) -> Result<T, ConversionError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let trimmed = value.trim();
    trimmed
        .parse::<T>()
        .map_err(|err| ConversionError::new(format!("'{trimmed}': {err}")))
}

fn convert_text(value: &str) -> Result<ParamValue, ConversionError> {
    Ok(ParamValue::Text(value.to_owned()))
}

fn convert_list(value: &str) -> Result<ParamValue, ConversionError> {
    Ok(ParamValue::List(
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_owned)
            .collect(),
    ))
}

fn convert_bool(value: &str) -> Result<ParamValue, ConversionError> {
    let trimmed = value.trim();
    if ["true", "yes"].iter().any(|t| trimmed.eq_ignore_ascii_case(t)) {
        Ok(ParamValue::Boolean(true))
    } else if ["false", "no"].iter().any(|f| trimmed.eq_ignore_ascii_case(f)) {
        Ok(ParamValue::Boolean(false))
    } else {
        Err(ConversionError::new(format!("'{trimmed}' is not a boolean")))
    }
}
