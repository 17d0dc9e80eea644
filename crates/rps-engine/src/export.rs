//! History export in JSON and CSV

use chrono::SecondsFormat;

use crate::error::{EngineError, Result};
use crate::state::RoundRecord;

pub const CSV_HEADER: [&str; 5] = ["Round", "Player Choice", "Computer Choice", "Result", "Timestamp"];

/// Pretty JSON array of records, oldest first.
pub fn to_json(history: &[RoundRecord]) -> Result<String> {
    if history.is_empty() {
        return Err(EngineError::NoData);
    }
    Ok(serde_json::to_string_pretty(history)?)
}

/// Read back a JSON export.
pub fn parse_json(json: &str) -> Result<Vec<RoundRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// One header line, then one row per record in round order.
pub fn to_csv(history: &[RoundRecord]) -> Result<String> {
    if history.is_empty() {
        return Err(EngineError::NoData);
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for record in history {
        writer.write_record([
            record.round.to_string(),
            record.player_choice.to_string(),
            record.computer_choice.to_string(),
            record.outcome.to_string(),
            record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| EngineError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
