use chrono::SecondsFormat;
use csv::Writer;
use serde::Serialize;
use std::io;
use std::path::Path;

use crate::error::ExportError;
use crate::result::SessionResult;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    date: String,
    wpm: u32,
    accuracy: u32,
    time: u32,
    text_type: &'a str,
    errors: u32,
}

impl<'a> From<&'a SessionResult> for CsvRow<'a> {
    fn from(r: &'a SessionResult) -> Self {
        Self {
            id: &r.id,
            date: r.completed_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            wpm: r.wpm,
            accuracy: r.accuracy,
            time: r.elapsed_seconds,
            text_type: &r.category,
            errors: r.error_count,
        }
    }
}

/// Writes `results` as CSV with a header row, in the order given.
pub fn write_csv<W: io::Write>(writer: W, results: &[SessionResult]) -> Result<(), ExportError> {
    let mut writer = Writer::from_writer(writer);
    if results.is_empty() {
        writer.write_record(["id", "date", "wpm", "accuracy", "time", "text_type", "errors"])?;
    }
    for result in results {
        writer.serialize(CsvRow::from(result))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn export_csv<P: AsRef<Path>>(path: P, results: &[SessionResult]) -> Result<usize, ExportError> {
    let file = std::fs::File::create(path.as_ref())?;
    write_csv(file, results)?;
    log::info!("exported {} results to {}", results.len(), path.as_ref().display());
    Ok(results.len())
}
