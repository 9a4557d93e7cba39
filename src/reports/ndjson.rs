use super::ScoredRecord;
use crate::Result;
use core::fmt::Write;

/// Write one JSON object per line, in the order given.
pub fn generate<W: Write>(records: &[ScoredRecord], writer: &mut W) -> Result<()> {
    for record in records {
        writeln!(writer, "{}", serde_json::to_string(record)?)?;
    }

    Ok(())
}
