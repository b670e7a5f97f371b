//! JSON output of harvested records.

use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Write records as a pretty-printed JSON array followed by a newline.
pub fn write_json<T: Serialize, W: Write>(records: &[T], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write records to `path`, or to stdout when no path is given.
pub fn emit<T: Serialize>(records: &[T], path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::File::create(path)?;
            write_json(records, std::io::BufWriter::new(file))?;
            tracing::info!(path = %path.display(), count = records.len(), "Wrote records");
        }
        None => write_json(records, std::io::stdout().lock())?,
    }
    Ok(())
}
