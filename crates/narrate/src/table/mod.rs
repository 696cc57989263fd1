//! Examples tables driving repeated scenario runs.
//!
//! A table is a header line followed by value lines, each split on a
//! separator. Every row then substitutes `<column>` placeholders in a
//! scenario's step text.

mod error;

use std::sync::Arc;

pub use error::TableError;

use crate::keywords::{KeywordName, Keywords};

/// Separators used to split table lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSeparators {
    /// Splits header cells.
    pub header: String,
    /// Splits value cells.
    pub value: String,
    /// Prefix of comment lines.
    pub ignorable: String,
}

impl Default for TableSeparators {
    fn default() -> Self {
        Self::from_keywords(&Keywords::default())
    }
}

impl TableSeparators {
    /// Separators configured in a keyword table.
    #[must_use]
    pub fn from_keywords(keywords: &Keywords) -> Self {
        Self {
            header: keywords.get(KeywordName::ExamplesTableHeaderSeparator).to_owned(),
            value: keywords.get(KeywordName::ExamplesTableValueSeparator).to_owned(),
            ignorable: keywords
                .get(KeywordName::ExamplesTableIgnorableSeparator)
                .to_owned(),
        }
    }
}

/// Parsed examples table.
///
/// A table with no data rows drives a single unsubstituted run.
///
/// # Examples
///
/// ```
/// use narrate::ExamplesTable;
///
/// let table = ExamplesTable::parse("|a|b|\n|1|2|\n|3|4|").expect("well-formed table");
/// assert_eq!(table.headers(), ["a", "b"]);
/// assert_eq!(table.row_count(), 2);
/// let row = table.row(1).expect("second row");
/// assert_eq!(row.get("a"), Some("3"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamplesTable {
    headers: Arc<[String]>,
    rows: Vec<Vec<String>>,
}

impl ExamplesTable {
    /// Parse a table using the default `|` separators.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] when the header repeats a column or a row's cell
    /// count differs from the header's.
    pub fn parse(text: &str) -> Result<Self, TableError> {
        Self::parse_with(text, &TableSeparators::default())
    }

    /// Parse a table with explicit separators.
    ///
    /// Blank lines and lines starting with the ignorable separator are
    /// skipped. With the default separators that includes any row whose
    /// first cell starts with `--`, such as `|--5|`. Leading and trailing
    /// separators on a line are optional and cells are trimmed, so `| |` is
    /// one empty cell.
    ///
    /// # Errors
    ///
    /// See [`parse`](Self::parse).
    pub fn parse_with(text: &str, separators: &TableSeparators) -> Result<Self, TableError> {
        let mut lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !is_comment(line, &separators.ignorable));

        let Some(header_line) = lines.next() else {
            return Ok(Self::default());
        };
        let headers = split_cells(header_line, &separators.header);
        if headers.is_empty() {
            return Err(TableError::MissingHeader);
        }
        for (index, column) in headers.iter().enumerate() {
            if headers.iter().take(index).any(|earlier| earlier == column) {
                return Err(TableError::DuplicateHeader {
                    column: column.clone(),
                });
            }
        }

        let mut rows = Vec::new();
        for (offset, line) in lines.enumerate() {
            let values = split_cells(line, &separators.value);
            if values.len() != headers.len() {
                return Err(TableError::UnevenRow {
                    row_number: offset + 2,
                    expected: headers.len(),
                    actual: values.len(),
                });
            }
            rows.push(values);
        }

        Ok(Self {
            headers: headers.into(),
            rows,
        })
    }

    /// Column names in declaration order.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at the 0-based `index`, in source order.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<ExampleRow> {
        self.rows.get(index).map(|values| ExampleRow {
            headers: Arc::clone(&self.headers),
            values: values.clone(),
        })
    }

    /// Every row, in source order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = ExampleRow> + '_ {
        self.rows.iter().map(|values| ExampleRow {
            headers: Arc::clone(&self.headers),
            values: values.clone(),
        })
    }

    /// Raw cell values of every row.
    #[must_use]
    pub fn values(&self) -> &[Vec<String>] {
        &self.rows
    }
}

fn is_comment(line: &str, ignorable: &str) -> bool {
    !ignorable.is_empty() && line.starts_with(ignorable)
}

fn split_cells(line: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return vec![line.trim().to_owned()];
    }
    let after_open = line.strip_prefix(separator).unwrap_or(line);
    if after_open.trim().is_empty() {
        return Vec::new();
    }
    let inner = after_open.strip_suffix(separator).unwrap_or(after_open);
    inner
        .split(separator)
        .map(|cell| cell.trim().to_owned())
        .collect()
}

/// One row of an examples table, keyed by column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleRow {
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl ExampleRow {
    /// Value of `column`, if the table declares it.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.headers
            .iter()
            .position(|header| header == column)
            .and_then(|index| self.values.get(index))
            .map(String::as_str)
    }

    /// `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    /// Cell values in column order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Replace every `<column>` in `step` with this row's value.
    ///
    /// Placeholders naming no column are left as written.
    ///
    /// # Examples
    ///
    /// ```
    /// use narrate::ExamplesTable;
    ///
    /// let table = ExamplesTable::parse("|n|\n|2|").expect("well-formed table");
    /// let row = table.row(0).expect("one row");
    /// assert_eq!(row.substitute("I add <n> to <m>"), "I add 2 to <m>");
    /// ```
    #[must_use]
    pub fn substitute(&self, step: &str) -> String {
        substitute(step, self)
    }
}

/// Replace every `<column>` in `step` with the value `row` holds for it.
///
/// Unknown columns stay literal, including their angle brackets.
#[must_use]
pub fn substitute(step: &str, row: &ExampleRow) -> String {
    let mut out = String::with_capacity(step.len());
    let mut rest = step;
    while let Some(open) = rest.find('<') {
        let (before, from_open) = rest.split_at(open);
        out.push_str(before);
        let after_open = from_open.get(1..).unwrap_or_default();
        let Some(close) = after_open.find(['<', '>']) else {
            out.push_str(from_open);
            return out;
        };
        let (name, tail) = after_open.split_at(close);
        if tail.starts_with('<') {
            out.push('<');
            out.push_str(name);
            rest = tail;
            continue;
        }
        match row.get(name) {
            Some(value) => out.push_str(value),
            None => {
                out.push('<');
                out.push_str(name);
                out.push('>');
            }
        }
        rest = tail.get(1..).unwrap_or_default();
    }
    out.push_str(rest);
    out
}
