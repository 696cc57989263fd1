//! Type hints shaping the span a placeholder may capture.

/// Regular-expression fragment for a placeholder type hint.
///
/// Numeric hints only accept numbers, `bool` accepts the usual yes/no
/// spellings, `word` stops at whitespace and `table` may span several lines.
/// Any other hint (or none) captures the shortest non-empty span.
///
/// # Examples
/// ```
/// use narrate_patterns::get_type_pattern;
/// assert_eq!(get_type_pattern(Some("u32")), r"\d+");
/// assert_eq!(get_type_pattern(Some("word")), r"\S+");
/// assert_eq!(get_type_pattern(None), ".+?");
/// ```
#[must_use]
pub fn get_type_pattern(type_hint: Option<&str>) -> &'static str {
    match type_hint {
        Some("u8" | "u16" | "u32" | "u64" | "u128" | "usize") => r"\d+",
        Some("i8" | "i16" | "i32" | "i64" | "i128" | "isize") => r"[+-]?\d+",
        Some("f32" | "f64") => {
            r"(?i:[+-]?(?:\d+\.\d*|\.\d+|\d+)(?:e[+-]?\d+)?|nan|inf|infinity)"
        }
        Some("bool") => r"(?i:true|false|yes|no)",
        Some("word") => r"\S+",
        Some("table") => r"(?s:.+)",
        _ => ".+?",
    }
}
