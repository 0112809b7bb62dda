//! CSV loader — parses `timestamp,glucose` rows into samples, rejecting bad rows.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::glucose::GlucoseError;

pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const GLUCOSE_COLUMN: &str = "glucose";

/// Canonical timestamp format, used for output.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Accepted on input, tried in order.
const INPUT_FORMATS: &[&str] = &[
    TIMESTAMP_FORMAT,
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlucoseSample {
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "glucose")]
    pub glucose_mg_dl: f64,
    /// 1-based data row the sample came from (header excluded).
    #[serde(skip)]
    pub row: usize,
}

/// Parses the CSV body. Column order is free; header names are matched
/// case-insensitively after trimming.
pub fn load(csv_bytes: &[u8]) -> Result<Vec<GlucoseSample>, GlucoseError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_bytes);

    let headers = reader.headers()?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or(GlucoseError::MissingColumn(name))
    };
    let ts_idx = column(TIMESTAMP_COLUMN)?;
    let glucose_idx = column(GLUCOSE_COLUMN)?;

    let mut samples = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let row = i + 1;
        let record = record.map_err(|e| GlucoseError::MalformedRow {
            row,
            line: e.position().map(|p| p.line()).unwrap_or(row as u64 + 1),
            reason: e.to_string(),
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(row as u64 + 1);

        let raw_ts = record.get(ts_idx).unwrap_or_default();
        let raw_glucose = record.get(glucose_idx).unwrap_or_default();

        let timestamp = parse_timestamp(raw_ts).ok_or_else(|| GlucoseError::MalformedRow {
            row,
            line,
            reason: format!("timestamp '{raw_ts}' is not in YYYY-MM-DD HH:MM format"),
        })?;
        let glucose_mg_dl = parse_glucose(raw_glucose).ok_or_else(|| GlucoseError::MalformedRow {
            row,
            line,
            reason: format!("glucose '{raw_glucose}' is not a non-negative number"),
        })?;

        samples.push(GlucoseSample {
            timestamp,
            glucose_mg_dl,
            row,
        });
    }

    if samples.is_empty() {
        return Err(GlucoseError::Empty);
    }

    debug!("Loaded {} glucose samples", samples.len());
    Ok(samples)
}

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

fn parse_glucose(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{parse_timestamp, TIMESTAMP_FORMAT};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glucose::sample::SAMPLE_WEEK_CSV;

    #[test]
    fn test_load_sample_week() {
        let samples = load(SAMPLE_WEEK_CSV.as_bytes()).unwrap();
        assert_eq!(samples.len(), 21);
        assert_eq!(samples[0].glucose_mg_dl, 110.0);
        assert_eq!(samples[0].row, 1);
        assert_eq!(samples[20].row, 21);
    }

    #[test]
    fn test_columns_in_any_order_with_whitespace() {
        let csv = " Glucose , timestamp \n 120 , 2025-05-12 08:00 \n";
        let samples = load(csv.as_bytes()).unwrap();
        assert_eq!(samples[0].glucose_mg_dl, 120.0);
        assert_eq!(
            samples[0].timestamp.format(TIMESTAMP_FORMAT).to_string(),
            "2025-05-12 08:00"
        );
    }

    #[test]
    fn test_alternate_timestamp_formats() {
        assert!(parse_timestamp("2025-05-12 08:00:30").is_some());
        assert!(parse_timestamp("2025-05-12T08:00").is_some());
        assert!(parse_timestamp("2025-05-12T08:00:30").is_some());
        assert!(parse_timestamp("12/05/2025 08:00").is_none());
    }

    #[test]
    fn test_non_numeric_glucose_reports_row() {
        let csv = "timestamp,glucose\n2025-05-12 08:00,110\n2025-05-12 13:00,high\n";
        match load(csv.as_bytes()) {
            Err(GlucoseError::MalformedRow { row, line, reason }) => {
                assert_eq!(row, 2);
                assert_eq!(line, 3);
                assert!(reason.contains("high"));
            }
            other => panic!("expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_lines_do_not_hide_file_line() {
        let csv = "timestamp,glucose\n2025-05-12 08:00,110\n\n\n2025-05-12 13:00,high\n";
        let err = load(csv.as_bytes()).unwrap_err();
        match &err {
            GlucoseError::MalformedRow { row, line, .. } => {
                assert_eq!(*row, 2);
                assert_eq!(*line, 5);
            }
            other => panic!("expected MalformedRow, got {other:?}"),
        }
        assert!(err.to_string().contains("Row 2 (file line 5)"));
    }

    #[test]
    fn test_bad_timestamp_reports_row() {
        let csv = "timestamp,glucose\nyesterday,110\n";
        assert!(matches!(
            load(csv.as_bytes()),
            Err(GlucoseError::MalformedRow { row: 1, .. })
        ));
    }

    #[test]
    fn test_negative_glucose_rejected() {
        let csv = "timestamp,glucose\n2025-05-12 08:00,-5\n";
        assert!(matches!(
            load(csv.as_bytes()),
            Err(GlucoseError::MalformedRow { row: 1, .. })
        ));
    }

    #[test]
    fn test_short_row_is_malformed() {
        let csv = "timestamp,glucose\n2025-05-12 08:00,110\n2025-05-12 13:00\n";
        assert!(matches!(
            load(csv.as_bytes()),
            Err(GlucoseError::MalformedRow { row: 2, .. })
        ));
    }

    #[test]
    fn test_missing_column() {
        let csv = "time,glucose\n2025-05-12 08:00,110\n";
        assert!(matches!(
            load(csv.as_bytes()),
            Err(GlucoseError::MissingColumn("timestamp"))
        ));
    }

    #[test]
    fn test_header_only_is_empty() {
        assert!(matches!(load(b"timestamp,glucose\n"), Err(GlucoseError::Empty)));
    }

    #[test]
    fn test_sample_serializes_canonical_timestamp() {
        let samples = load(SAMPLE_WEEK_CSV.as_bytes()).unwrap();
        let value = serde_json::to_value(&samples[0]).unwrap();
        assert_eq!(value["timestamp"], "2025-05-12 08:00");
        assert_eq!(value["glucose"], 110.0);
        assert!(value.get("row").is_none());
    }
}
