use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionSummary;

/// Outcome of one completed session, as kept in the result log.
///
/// Field names on disk follow the persisted log format
/// (`time`, `textType`, `date`, `errors`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub id: String,
    pub wpm: u32,
    pub accuracy: u32,
    #[serde(rename = "time")]
    pub elapsed_seconds: u32,
    #[serde(rename = "textType")]
    pub category: String,
    #[serde(rename = "date", with = "iso_millis")]
    pub completed_at: DateTime<Utc>,
    #[serde(rename = "errors")]
    pub error_count: u32,
}

impl SessionResult {
    pub fn from_summary(summary: &SessionSummary, category: &str) -> Self {
        Self {
            id: summary.finished_at.timestamp_millis().to_string(),
            wpm: summary.wpm,
            accuracy: summary.accuracy.min(100),
            elapsed_seconds: whole_seconds(summary.elapsed_secs),
            category: category.to_string(),
            completed_at: summary.finished_at,
            error_count: u32::try_from(summary.error_count).unwrap_or(u32::MAX),
        }
    }

    /// Records read back from storage must still make sense.
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && self.accuracy <= 100
    }
}

fn whole_seconds(secs: f64) -> u32 {
    if secs.is_finite() && secs > 0.0 {
        secs.round() as u32
    } else {
        0
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-03-01T09:30:00.000Z`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|date| date.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
