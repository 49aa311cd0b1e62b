//! JSON output of the aggregated collection

use std::io::Write;

use thiserror::Error;

use crate::data::ImageCollection;

/// Errors that can occur while writing the final JSON document
#[derive(Debug, Error)]
pub enum OutputError {
    /// Encoding or writing the JSON failed
    #[error("Failed to write JSON output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Flushing the writer failed
    #[error("Failed to flush output: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes `collection` as a single JSON object, with no trailing newline
pub fn write_collection<W: Write>(
    mut writer: W,
    collection: &ImageCollection,
    pretty: bool,
) -> Result<(), OutputError> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, collection)?;
    } else {
        serde_json::to_writer(&mut writer, collection)?;
    }
    writer.flush()?;
    Ok(())
}
