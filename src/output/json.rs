use crate::record::ListingRecord;
use crate::OutputError;
use std::io::Write;

/// Writes records as a pretty-printed JSON array
pub fn write_json<W: Write>(mut writer: W, records: &[ListingRecord]) -> Result<(), OutputError> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
