use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use pronunciation_rs::Report;

/// Save the report as pretty JSON, creating the parent directory when the
/// path names one.
pub fn save_report(path: &Path, report: &Report) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|err| format!("Failed to create '{}': {err}", parent.display()))?;
    }
    let file = File::create(path)
        .map_err(|err| format!("Failed to create report file '{}': {err}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_report(&mut out, report)
        .and_then(|()| out.flush().map_err(|err| err.to_string()))
        .map_err(|err| format!("Failed to write report '{}': {err}", path.display()))
}

pub fn write_report(out: &mut impl Write, report: &Report) -> Result<(), String> {
    serde_json::to_writer_pretty(&mut *out, report).map_err(|err| err.to_string())?;
    writeln!(out).map_err(|err| err.to_string())
}
