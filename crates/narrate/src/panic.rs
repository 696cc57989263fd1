//! Rendering panic payloads raised by step implementations.

use std::any::Any;

/// Render a panic payload as text.
///
/// `panic!` with a message yields a `&str` or a `String`; other payloads are
/// described by their type id.
///
/// # Examples
///
/// ```
/// use narrate::panic_message;
///
/// let payload = std::panic::catch_unwind(|| panic!("boom {}", 1))
///     .expect_err("closure panics");
/// assert_eq!(panic_message(payload.as_ref()), "boom 1");
/// ```
#[must_use]
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_owned();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    format!("non-text panic payload ({:?})", payload.type_id())
}
