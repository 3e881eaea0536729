//! Console rendering of a [`RunReport`].

use std::io::Write;

use anyhow::Result;

use crate::exerciser::RunReport;

/// Write the final rows, one JSON object per line, followed by the cursor
/// metadata.
pub fn write_report<W: Write>(out: &mut W, report: &RunReport) -> Result<()> {
    for row in &report.final_rows {
        writeln!(out, "{}", serde_json::to_string(row)?)?;
    }

    writeln!(out, "result count: {}", report.result_count)?;
    writeln!(out, "row count: {}", report.row_count)?;
    match report.last_insert_id {
        Some(id) => writeln!(out, "last insert id: {}", id)?,
        None => writeln!(out, "last insert id: none")?,
    }
    writeln!(out, "cursor position: {}", report.position)?;
    Ok(())
}
