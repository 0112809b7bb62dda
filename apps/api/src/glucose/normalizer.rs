//! Time normalizer — orders samples by time and applies the duplicate policy.

use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::glucose::loader::{GlucoseSample, TIMESTAMP_FORMAT};
use crate::glucose::GlucoseError;

/// What to do when two rows share a timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep every row; equal timestamps stay in file order.
    KeepAll,
    /// Keep only the row parsed last for each timestamp.
    #[default]
    KeepLast,
    /// Fail the upload.
    Reject,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keep_all" => Ok(DuplicatePolicy::KeepAll),
            "keep_last" => Ok(DuplicatePolicy::KeepLast),
            "reject" => Ok(DuplicatePolicy::Reject),
            other => Err(format!(
                "unknown duplicate policy '{other}' (expected keep_all|keep_last|reject)"
            )),
        }
    }
}

/// Samples in non-decreasing timestamp order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GlucoseSeries {
    samples: Vec<GlucoseSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub count: usize,
    pub min_mg_dl: f64,
    pub max_mg_dl: f64,
    pub mean_mg_dl: f64,
    #[serde(with = "optional_timestamp")]
    pub start: Option<NaiveDateTime>,
    #[serde(with = "optional_timestamp")]
    pub end: Option<NaiveDateTime>,
}

impl GlucoseSeries {
    pub fn samples(&self) -> &[GlucoseSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&GlucoseSample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&GlucoseSample> {
        self.samples.last()
    }

    pub fn summary(&self) -> SeriesSummary {
        let values = self.samples.iter().map(|s| s.glucose_mg_dl);
        let count = self.samples.len();
        let (min, max, sum) = values.fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), v| (min.min(v), max.max(v), sum + v),
        );
        SeriesSummary {
            count,
            min_mg_dl: if count == 0 { 0.0 } else { min },
            max_mg_dl: if count == 0 { 0.0 } else { max },
            mean_mg_dl: if count == 0 { 0.0 } else { sum / count as f64 },
            start: self.first().map(|s| s.timestamp),
            end: self.last().map(|s| s.timestamp),
        }
    }
}

/// Stable ascending sort by timestamp, then the duplicate policy.
pub fn normalize(
    mut samples: Vec<GlucoseSample>,
    policy: DuplicatePolicy,
) -> Result<GlucoseSeries, GlucoseError> {
    samples.sort_by_key(|s| s.timestamp);

    match policy {
        DuplicatePolicy::KeepAll => {}
        DuplicatePolicy::KeepLast => {
            // After a stable sort, the last of each equal run is the last parsed.
            let mut kept: Vec<GlucoseSample> = Vec::with_capacity(samples.len());
            for sample in samples {
                match kept.last_mut() {
                    Some(prev) if prev.timestamp == sample.timestamp => *prev = sample,
                    _ => kept.push(sample),
                }
            }
            samples = kept;
        }
        DuplicatePolicy::Reject => {
            if let Some(pair) = samples.windows(2).find(|w| w[0].timestamp == w[1].timestamp) {
                return Err(GlucoseError::DuplicateTimestamp {
                    row: pair[1].row.max(pair[0].row),
                    timestamp: pair[1].timestamp.format(TIMESTAMP_FORMAT).to_string(),
                });
            }
        }
    }

    Ok(GlucoseSeries { samples })
}

mod optional_timestamp {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    use crate::glucose::loader::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(
        ts: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match ts {
            Some(ts) => serializer.collect_str(&ts.format(TIMESTAMP_FORMAT)),
            None => serializer.serialize_none(),
        }
    }
}
