// Capture log normalization
//
// Turns raw packet records into the ascending Event list the replay engine
// consumes. Two record shapes are understood:
// - capture exports, where every field is a list of observed values:
//   {"_source": {"layers": {"frame.time_epoch": ["1673536533.195863000"],
//                           "ip.src": ["10.0.0.1"], "ip.dst": ["10.0.0.2"]}}}
// - flat packet logs: {"src": "s1", "dst": "s2", "timestamp": 1670170012}
// Read-only; the input file is never modified.

pub mod synth;

use crate::replay::Event;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Errors raised while reading or normalizing capture records
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("cannot read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record #{index} is neither a capture record nor a packet log entry: {source}")]
    Record {
        index: usize,
        source: serde_json::Error,
    },

    #[error("record #{index} has no value for '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("record #{index} has an invalid timestamp '{value}'")]
    InvalidTimestamp { index: usize, value: String },

    #[error("ticks per second must be a positive number, got {0}")]
    InvalidScale(f64),
}

/// A field that may carry one value or a list of observed values
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValues {
    One(String),
    Many(Vec<String>),
}

impl FieldValues {
    /// The first observed value, if any
    pub fn first(&self) -> Option<&str> {
        match self {
            FieldValues::One(value) => Some(value.as_str()),
            FieldValues::Many(values) => values.first().map(String::as_str),
        }
    }
}

impl Default for FieldValues {
    fn default() -> Self {
        FieldValues::Many(Vec::new())
    }
}

/// Protocol layers of a capture record; unknown layers are ignored
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CaptureLayers {
    #[serde(rename = "frame.time_epoch", default)]
    pub time_epoch: FieldValues,
    #[serde(rename = "ip.src", default)]
    pub ip_src: FieldValues,
    #[serde(rename = "ip.dst", default)]
    pub ip_dst: FieldValues,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CaptureSource {
    pub layers: CaptureLayers,
}

/// Timestamp of a flat packet log entry, in seconds
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Seconds {
    Number(f64),
    Text(String),
}

/// One raw input record
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawRecord {
    Capture {
        #[serde(rename = "_source")]
        source: CaptureSource,
    },
    Packet {
        src: String,
        dst: String,
        timestamp: Seconds,
    },
}

impl RawRecord {
    /// Source, destination and timestamp text, first value of each field
    fn fields(&self, index: usize) -> Result<(&str, &str, TimestampField<'_>), CaptureError> {
        match self {
            RawRecord::Capture { source } => {
                let layers = &source.layers;
                Ok((
                    first_value(&layers.ip_src, index, "ip.src")?,
                    first_value(&layers.ip_dst, index, "ip.dst")?,
                    TimestampField::Text(first_value(
                        &layers.time_epoch,
                        index,
                        "frame.time_epoch",
                    )?),
                ))
            }
            RawRecord::Packet {
                src,
                dst,
                timestamp,
            } => {
                let timestamp = match timestamp {
                    Seconds::Number(secs) => TimestampField::Number(*secs),
                    Seconds::Text(text) => TimestampField::Text(text.as_str()),
                };
                Ok((src.as_str(), dst.as_str(), timestamp))
            }
        }
    }
}

fn first_value<'a>(
    values: &'a FieldValues,
    index: usize,
    field: &'static str,
) -> Result<&'a str, CaptureError> {
    values
        .first()
        .ok_or(CaptureError::MissingField { index, field })
}

enum TimestampField<'a> {
    Number(f64),
    Text(&'a str),
}

/// Parse a JSON array of records, or one JSON record per line
pub fn parse_records(content: &str) -> Result<Vec<RawRecord>, CaptureError> {
    let values: Vec<Value> = if content.trim_start().starts_with('[') {
        serde_json::from_str(content)?
    } else {
        serde_json::Deserializer::from_str(content)
            .into_iter::<Value>()
            .collect::<Result<_, _>>()?
    };

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).map_err(|source| CaptureError::Record { index, source })
        })
        .collect()
}

/// Read and parse a record file
pub fn read_records(path: &Path) -> Result<Vec<RawRecord>, CaptureError> {
    let content = fs::read_to_string(path).map_err(|source| CaptureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_records(&content)?;
    debug!(path = %path.display(), records = records.len(), "Read capture records");
    Ok(records)
}

/// Convert raw records into events sorted by timestamp
///
/// Timestamps are seconds; they become clock ticks as
/// `floor(seconds * ticks_per_second)`. Records sharing a tick keep their
/// input order.
///
/// # Errors
/// - [`CaptureError::InvalidScale`] for a non-positive or non-finite scale
/// - [`CaptureError::MissingField`] when a field has no values
/// - [`CaptureError::InvalidTimestamp`] for unparsable, negative, non-finite
///   or out of range timestamps
pub fn normalize(records: &[RawRecord], ticks_per_second: f64) -> Result<Vec<Event>, CaptureError> {
    if !ticks_per_second.is_finite() || ticks_per_second <= 0.0 {
        return Err(CaptureError::InvalidScale(ticks_per_second));
    }

    let mut events = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let (src, dst, timestamp) = record.fields(index)?;
            let tick = to_ticks(index, timestamp, ticks_per_second)?;
            Ok(Event::new(src, dst, tick))
        })
        .collect::<Result<Vec<_>, CaptureError>>()?;

    events.sort_by_key(Event::timestamp);
    Ok(events)
}

/// Read, parse and normalize a log file in one go
pub fn load_events(path: &Path, ticks_per_second: f64) -> Result<Vec<Event>, CaptureError> {
    let records = read_records(path)?;
    let events = normalize(&records, ticks_per_second)?;
    info!(
        path = %path.display(),
        events = events.len(),
        first = events.first().map(Event::timestamp),
        last = events.last().map(Event::timestamp),
        "Loaded packet log"
    );
    Ok(events)
}

fn to_ticks(
    index: usize,
    timestamp: TimestampField<'_>,
    ticks_per_second: f64,
) -> Result<u64, CaptureError> {
    let invalid = |value: String| CaptureError::InvalidTimestamp { index, value };

    let seconds = match timestamp {
        TimestampField::Number(secs) => secs,
        TimestampField::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(text.to_string()))?,
    };

    let ticks = (seconds * ticks_per_second).floor();
    if !ticks.is_finite() || ticks < 0.0 || ticks >= u64::MAX as f64 {
        return Err(invalid(seconds.to_string()));
    }
    Ok(ticks as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(epoch: &str, src: &str, dst: &str) -> String {
        format!(
            r#"{{"_index": "packets-2023-01-13", "_type": "doc", "_score": null,
                "_source": {{"layers": {{
                    "frame.time_epoch": ["{}"],
                    "ip.src": ["{}", "10.9.9.9"],
                    "ip.dst": ["{}"],
                    "tcp.srcport": ["443"],
                    "tcp.dstport": ["51234"]
                }}}}}}"#,
            epoch, src, dst
        )
    }

    #[test]
    fn test_capture_record_first_values() {
        let content = format!("[{}]", capture("1673536533.195863000", "10.0.0.1", "10.0.0.2"));
        let records = parse_records(&content).unwrap();
        let events = normalize(&records, 1.0).unwrap();

        assert_eq!(events, vec![Event::new("10.0.0.1", "10.0.0.2", 1_673_536_533)]);
    }

    #[test]
    fn test_capture_record_single_string_fields() {
        let content = r#"[{"_source": {"layers": {
            "frame.time_epoch": "12.75", "ip.src": "a", "ip.dst": "b"}}}]"#;
        let events = normalize(&parse_records(content).unwrap(), 4.0).unwrap();

        assert_eq!(events, vec![Event::new("a", "b", 51)]);
    }

    #[test]
    fn test_packet_log_records() {
        let content = r#"[
            {"src": "s1", "dst": "s2", "timestamp": 1670170012},
            {"src": "s3", "dst": "s4", "timestamp": "1670170001.5"}
        ]"#;
        let events = normalize(&parse_records(content).unwrap(), 1.0).unwrap();

        assert_eq!(
            events,
            vec![
                Event::new("s3", "s4", 1_670_170_001),
                Event::new("s1", "s2", 1_670_170_012),
            ]
        );
    }

    #[test]
    fn test_sort_is_stable_within_a_tick() {
        let content = r#"[
            {"src": "s1", "dst": "s2", "timestamp": 5.9},
            {"src": "s2", "dst": "s3", "timestamp": 2},
            {"src": "s4", "dst": "s1", "timestamp": 5.1}
        ]"#;
        let events = normalize(&parse_records(content).unwrap(), 1.0).unwrap();
        let sources: Vec<&str> = events.iter().map(Event::source).collect();

        assert_eq!(sources, vec!["s2", "s1", "s4"]);
    }

    #[test]
    fn test_newline_delimited_records() {
        let content = concat!(
            r#"{"src": "s1", "dst": "s2", "timestamp": 3}"#,
            "\n",
            r#"{"src": "s2", "dst": "s1", "timestamp": 1}"#,
            "\n"
        );
        let events = normalize(&parse_records(content).unwrap(), 1.0).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].timestamp(), 1);
    }

    #[test]
    fn test_ticks_per_second_scaling() {
        let content = r#"[{"src": "a", "dst": "b", "timestamp": 1.2345}]"#;
        let records = parse_records(content).unwrap();

        assert_eq!(normalize(&records, 1000.0).unwrap()[0].timestamp(), 1234);
        assert_eq!(normalize(&records, 0.5).unwrap()[0].timestamp(), 0);
    }

    #[test]
    fn test_missing_field() {
        let content = r#"[{"_source": {"layers": {
            "frame.time_epoch": ["1.0"], "ip.src": [], "ip.dst": ["b"]}}}]"#;
        let err = normalize(&parse_records(content).unwrap(), 1.0).unwrap_err();

        assert!(matches!(
            err,
            CaptureError::MissingField {
                index: 0,
                field: "ip.src"
            }
        ));
    }

    #[test]
    fn test_absent_layer_is_missing_field() {
        let content = r#"[{"_source": {"layers": {"ip.src": ["a"], "ip.dst": ["b"]}}}]"#;
        let err = normalize(&parse_records(content).unwrap(), 1.0).unwrap_err();

        assert!(matches!(
            err,
            CaptureError::MissingField {
                field: "frame.time_epoch",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_timestamps() {
        for bad in [r#""yesterday""#, "-3"] {
            let content = format!(r#"[{{"src": "a", "dst": "b", "timestamp": {}}}]"#, bad);
            let err = normalize(&parse_records(&content).unwrap(), 1.0).unwrap_err();
            assert!(
                matches!(err, CaptureError::InvalidTimestamp { index: 0, .. }),
                "expected invalid timestamp for {}",
                bad
            );
        }
    }

    #[test]
    fn test_invalid_scale() {
        assert!(matches!(normalize(&[], 0.0), Err(CaptureError::InvalidScale(_))));
        assert!(matches!(
            normalize(&[], f64::NAN),
            Err(CaptureError::InvalidScale(_))
        ));
    }

    #[test]
    fn test_unrecognized_record_reports_index() {
        let content = r#"[{"src": "a", "dst": "b", "timestamp": 1}, {"hello": "world"}]"#;
        let err = parse_records(content).unwrap_err();

        assert!(matches!(err, CaptureError::Record { index: 1, .. }));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_records("[{"), Err(CaptureError::Json(_))));
    }

    #[test]
    fn test_read_records_missing_file() {
        let err = read_records(Path::new("/nonexistent/pktreplay/log.json")).unwrap_err();
        assert!(matches!(err, CaptureError::Io { .. }));
    }
}
