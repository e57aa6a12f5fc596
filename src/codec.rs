//! One-record-per-line text encoding.
//!
//! A record is `<UTC timestamp>: <payload><line separator>`. The timestamp uses a
//! fixed-width pattern so lexical and chronological order coincide, and decoding
//! splits on the first delimiter only, so payloads may themselves contain `": "`.

use thiserror::Error;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::record::PersistedString;

pub const DELIMITER: &str = ": ";

#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// `YYYY-MM-DD HH:mm:ss.ffff`, always UTC. Sub-second digits are truncated.
///
/// Only years `0000..=9999` keep the width fixed; [`format_timestamp`] rejects
/// anything else.
pub const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:4]"
);

pub const MIN_YEAR: i32 = 0;
pub const MAX_YEAR: i32 = 9999;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("timestamp {timestamp} is outside years 0000..=9999 in UTC")]
    OutOfRange { timestamp: OffsetDateTime },

    #[error("failed to format timestamp: {0}")]
    Format(#[from] time::error::Format),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("record has no ': ' delimiter")]
    MalformedRecord,

    #[error("record timestamp '{value}' does not match the fixed pattern: {source}")]
    MalformedTimestamp {
        value: String,
        #[source]
        source: time::error::Parse,
    },
}

pub fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, EncodeError> {
    let utc = timestamp
        .checked_to_offset(UtcOffset::UTC)
        .filter(|utc| (MIN_YEAR..=MAX_YEAR).contains(&utc.year()))
        .ok_or(EncodeError::OutOfRange { timestamp })?;

    Ok(utc.format(TIMESTAMP_FORMAT)?)
}

pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, DecodeError> {
    PrimitiveDateTime::parse(value, TIMESTAMP_FORMAT)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|source| DecodeError::MalformedTimestamp {
            value: value.to_string(),
            source,
        })
}

/// Collapses `\r\n` and `\n` into single spaces so a payload never spans lines.
#[must_use]
pub fn sanitize_payload(payload: &str) -> String {
    payload.replace("\r\n", " ").replace('\n', " ")
}

pub fn encode_line(timestamp: OffsetDateTime, payload: &str) -> Result<String, EncodeError> {
    let formatted = format_timestamp(timestamp)?;
    let payload = sanitize_payload(payload);

    let mut line =
        String::with_capacity(formatted.len() + DELIMITER.len() + payload.len() + 2);
    line.push_str(&formatted);
    line.push_str(DELIMITER);
    line.push_str(&payload);
    line.push_str(LINE_SEPARATOR);
    Ok(line)
}

pub fn decode_line(line: &str) -> Result<PersistedString, DecodeError> {
    let line = strip_line_separator(line);
    let (timestamp, payload) = line
        .split_once(DELIMITER)
        .ok_or(DecodeError::MalformedRecord)?;

    Ok(PersistedString::new(parse_timestamp(timestamp)?, payload))
}

fn strip_line_separator(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line)
}
