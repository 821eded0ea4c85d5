//! Export utilities for saving retrieved messages to a JSON file

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::record::MessageRecord;

/// Render records as a pretty-printed JSON array.
pub fn render_json(records: &[MessageRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write records to `path`, creating parent directories as needed.
///
/// The file is only created once serialization has succeeded, so a
/// failed run never leaves a truncated or empty history behind.
pub fn write_json<P: AsRef<Path>>(path: P, records: &[MessageRecord]) -> Result<()> {
    let payload = render_json(records)?;

    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, payload)?;
    Ok(())
}
