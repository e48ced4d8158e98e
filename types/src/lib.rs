use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Placeholder task used when nothing better survives cleaning.
pub const TASK_PLACEHOLDER: &str = "Task";

// ── Extraction record ────────────────────────────────────────────────────

/// The structured record derived from one task sentence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub task: Option<String>,
    /// First-seen order; repeated mentions are kept.
    pub participants: Vec<String>,
    /// Serialized as `YYYY-MM-DD`.
    pub date: Option<NaiveDate>,
    #[serde(default, with = "hhmm")]
    pub time: Option<NaiveTime>,
    #[serde(default, with = "hhmm")]
    pub end_time: Option<NaiveTime>,
    /// Set semantics: no entry is a substring of another.
    pub locations: Vec<String>,
}

impl ExtractionResult {
    /// The task text, or the placeholder if none was set.
    pub fn task_or_placeholder(&self) -> &str {
        self.task.as_deref().unwrap_or(TASK_PLACEHOLDER)
    }
}

// ── Legacy single-file record ────────────────────────────────────────────

/// Keyword-derived urgency used by the legacy record shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Urgent,
    HighPriority,
    LowPriority,
    #[default]
    Normal,
}

impl Priority {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "urgent" => Some(Self::Urgent),
            "high-priority" => Some(Self::HighPriority),
            "low-priority" => Some(Self::LowPriority),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::HighPriority => "high-priority",
            Self::LowPriority => "low-priority",
            Self::Normal => "normal",
        }
    }
}

/// The older output shape: no end time, plus priority and the raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyRecord {
    pub task: Option<String>,
    pub participants: Vec<String>,
    pub date: Option<NaiveDate>,
    #[serde(default, with = "hhmm")]
    pub time: Option<NaiveTime>,
    pub priority: Priority,
    pub locations: Vec<String>,
    pub description: Option<String>,
}

impl LegacyRecord {
    pub fn from_extraction(text: &str, result: ExtractionResult, priority: Priority) -> Self {
        LegacyRecord {
            task: result.task,
            participants: result.participants,
            date: result.date,
            time: result.time,
            priority,
            locations: result.locations,
            description: Some(text.to_string()),
        }
    }
}

// ── Batch output ─────────────────────────────────────────────────────────

/// Either record shape, serialized without a discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    Legacy(LegacyRecord),
    Full(ExtractionResult),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub original_text: String,
    pub extracted_entities: Record,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchOutput {
    pub results: Vec<BatchResult>,
}

// ── Time-of-day as HH:MM ─────────────────────────────────────────────────

/// Serde adapter for `Option<NaiveTime>` in 24-hour `HH:MM` form.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => s.serialize_str(&t.format(FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        raw.map(|r| NaiveTime::parse_from_str(&r, FORMAT).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ExtractionResult {
        ExtractionResult {
            task: Some("Call".into()),
            participants: vec!["John".into()],
            date: NaiveDate::from_ymd_opt(2026, 10, 17),
            time: NaiveTime::from_hms_opt(15, 0, 0),
            end_time: NaiveTime::from_hms_opt(16, 30, 0),
            locations: vec!["the office".into()],
        }
    }

    #[test]
    fn test_fixed_date_and_time_formats() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["date"], "2026-10-17");
        assert_eq!(json["time"], "15:00");
        assert_eq!(json["end_time"], "16:30");
    }

    #[test]
    fn test_empty_fields_serialize_as_null() {
        let json = serde_json::to_value(ExtractionResult::default()).unwrap();
        assert!(json["task"].is_null());
        assert!(json["time"].is_null());
        assert_eq!(json["participants"], serde_json::json!([]));
    }

    #[test]
    fn test_hhmm_reads_back() {
        let json = serde_json::to_string(&sample()).unwrap();
        let back: ExtractionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.end_time, NaiveTime::from_hms_opt(16, 30, 0));
    }

    #[test]
    fn test_legacy_shape_keys() {
        let legacy = LegacyRecord::from_extraction("urgent call", sample(), Priority::Urgent);
        let json = serde_json::to_value(&legacy).unwrap();
        assert_eq!(json["priority"], "urgent");
        assert_eq!(json["description"], "urgent call");
        assert!(json.get("end_time").is_none());
    }

    #[test]
    fn test_priority_keywords() {
        assert_eq!(Priority::from_keyword("URGENT"), Some(Priority::Urgent));
        assert_eq!(Priority::from_keyword("high-priority"), Some(Priority::HighPriority));
        assert_eq!(Priority::from_keyword("soon"), None);
        assert_eq!(Priority::default().as_str(), "normal");
    }
}
