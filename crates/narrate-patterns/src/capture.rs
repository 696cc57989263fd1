//! Positional capture extraction.

use regex::Regex;

/// Collect the values of every capture group when `text` matches `re`.
///
/// Group 0 is skipped. Optional groups that did not participate yield empty
/// strings so positions stay aligned with the declared parameters. Returns
/// `None` when the text does not match.
///
/// # Examples
/// ```
/// # use regex::Regex;
/// # use narrate_patterns::extract_captured_values;
/// let re = Regex::new(r"^I add (\d+) to (\w+)$").expect("valid regex");
/// assert_eq!(
///     extract_captured_values(&re, "I add 2 to savings"),
///     Some(vec!["2".to_string(), "savings".to_string()])
/// );
/// assert_eq!(extract_captured_values(&re, "I remove 2"), None);
/// ```
#[must_use]
pub fn extract_captured_values(re: &Regex, text: &str) -> Option<Vec<String>> {
    let caps = re.captures(text)?;
    Some(
        caps.iter()
            .skip(1)
            .map(|group| group.map_or_else(String::new, |m| m.as_str().to_owned()))
            .collect(),
    )
}
