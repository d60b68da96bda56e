use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::constants::REPORT_HEADERS;
use crate::error::Result;
use crate::types::TeamReportRow;

/// Write the joined report as CSV and return the number of teams written.
///
/// The header row is always written, so an empty report still produces a
/// readable file.
pub fn write_report<W: Write>(writer: W, rows: &[TeamReportRow]) -> Result<usize> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(REPORT_HEADERS)?;
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(rows.len())
}

pub fn write_report_file<P: AsRef<Path>>(path: P, rows: &[TeamReportRow]) -> Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let written = write_report(File::create(path)?, rows)?;
    info!("Wrote {} teams to {}", written, path.display());
    Ok(written)
}
