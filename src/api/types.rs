use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::time::TimePoint;

/// The schedule document as published by the data source
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleData {
    /// Day ordinal (1-based) -> descriptor
    #[serde(default)]
    pub days: BTreeMap<u32, DayDescriptor>,
    #[serde(default, alias = "timeSlots")]
    pub time_slots: Vec<TimePoint>,
    #[serde(default)]
    pub sessions: Vec<Session>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayDescriptor {
    pub title: String,
    #[serde(alias = "startColumn", default = "default_start_column")]
    pub start_column: u32,
    #[serde(alias = "columnSpan", alias = "colSpan", default = "default_column_span")]
    pub column_span: u32,
}

fn default_start_column() -> u32 {
    2  // column 1 holds the time labels
}

fn default_column_span() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub day: u32,
    pub start: TimePoint,
    pub end: TimePoint,
    /// Styling tag, e.g. "keynote" or "break"
    pub category: String,
    pub title: String,
    /// 1-based column inside the day's column range
    pub column: Option<u32>,
    pub column_span: Option<u32>,
    pub details: Option<SessionDetails>,
}

/// Detail payload, keyed by the document's `details_type`
#[derive(Debug, Clone, PartialEq)]
pub enum SessionDetails {
    Text(String),
    Presentations(Vec<Presentation>),
    Panel(Panel),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    pub topic: String,
    #[serde(default)]
    pub presenter: String,
    #[serde(default)]
    pub affiliation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    #[serde(default)]
    pub affiliation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    #[serde(default)]
    pub moderator: Option<Person>,
    #[serde(default)]
    pub panelists: Vec<Person>,
}

// Sessions arrive with a loosely shaped `details` value whose meaning depends on
// `details_type`, so they are read through this record first.
#[derive(Debug, Deserialize)]
struct RawSession {
    day: u32,
    start: TimePoint,
    end: TimePoint,
    #[serde(rename = "type", alias = "category", default)]
    category: String,
    title: String,
    #[serde(default)]
    column: Option<u32>,
    #[serde(default, alias = "columnSpan", alias = "colSpan")]
    column_span: Option<u32>,
    #[serde(default, alias = "detailsType")]
    details_type: Option<String>,
    #[serde(default)]
    details: Option<serde_json::Value>,
}

impl<'de> Deserialize<'de> for Session {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawSession::deserialize(deserializer)?;
        let details = raw
            .details
            .and_then(|payload| SessionDetails::from_payload(raw.details_type.as_deref(), payload, &raw.title));

        Ok(Session {
            day: raw.day,
            start: raw.start,
            end: raw.end,
            category: raw.category,
            title: raw.title,
            column: raw.column,
            column_span: raw.column_span,
            details,
        })
    }
}

impl SessionDetails {
    /// Interpret a payload according to its discriminator.
    /// Payloads that don't match their kind are dropped rather than failing the whole document.
    fn from_payload(kind: Option<&str>, payload: serde_json::Value, title: &str) -> Option<Self> {
        if payload.is_null() {
            return None;
        }

        let parsed = match kind {
            Some("text") | None => match payload {
                serde_json::Value::String(text) => Ok(SessionDetails::Text(text)),
                other => Err(format!("expected a string, got {}", other)),
            },
            Some("presentations") => serde_json::from_value::<Vec<Presentation>>(payload)
                .map(SessionDetails::Presentations)
                .map_err(|e| e.to_string()),
            Some("panel") => serde_json::from_value::<Panel>(payload)
                .map(SessionDetails::Panel)
                .map_err(|e| e.to_string()),
            Some(unknown) => Err(format!("unknown details_type \"{}\"", unknown)),
        };

        match parsed {
            Ok(details) => Some(details),
            Err(reason) => {
                log::warn!("Ignoring details of session \"{}\": {}", title, reason);
                None
            }
        }
    }
}
