//! JSON rendering of recorded events.

use std::io::Write;

use super::RecordingReporter;

impl RecordingReporter {
    /// Render the recorded events as a JSON array.
    ///
    /// Each event is an object tagged by an `event` field in snake case.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&*self.lock())
    }

    /// Write the recorded events as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), serde_json::Error> {
        serde_json::to_writer_pretty(writer, &*self.lock())
    }
}
