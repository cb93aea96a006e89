use std::fmt;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Numeric identifier derived from the creation time in milliseconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl TodoId {
    /// Picks an id for a todo created at `now` that is strictly greater than every id in
    /// `existing`, so two adds inside the same millisecond never collide.
    pub fn next(now: DateTime<Utc>, existing: &[Todo]) -> Self {
        let from_clock = now.timestamp_millis();
        let after_last = existing.iter().map(|t| t.id.0).max().map_or(i64::MIN, |max| max.saturating_add(1));
        Self(from_clock.max(after_last))
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl std::str::FromStr for TodoId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { s.parse::<i64>().map(TodoId) }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus { Todo, Done }

impl TodoStatus {
    pub fn toggled(self) -> Self {
        match self { TodoStatus::Todo => TodoStatus::Done, TodoStatus::Done => TodoStatus::Todo }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub status: TodoStatus,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Builds a fresh `todo` record. `title` must already be trimmed and non-empty.
    pub fn new(id: TodoId, title: String, now: DateTime<Utc>) -> Self {
        Self { id, title, status: TodoStatus::Todo, created_at: now, updated_at: now }
    }

    /// Flips the status and moves `updated_at` forward, never backwards and never to the same instant.
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        self.status = self.status.toggled();
        self.updated_at = now.max(self.updated_at + Duration::milliseconds(1));
    }
}

/// Current time truncated to the millisecond precision the file format stores.
pub fn now_millis() -> DateTime<Utc> { Utc::now().trunc_subsecs(3) }

/// Trims a requested title; `None` when nothing is left.
pub fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn serializes_with_camel_case_fields_and_millis() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 10, 11).unwrap() + Duration::milliseconds(123);
        let todo = Todo::new(TodoId(1_792_000_000_123), "Buy milk".into(), at);
        let value = serde_json::to_value(&todo).unwrap();
        assert_eq!(value, serde_json::json!({
            "id": 1_792_000_000_123i64,
            "title": "Buy milk",
            "status": "todo",
            "createdAt": "2026-10-18T09:10:11.123Z",
            "updatedAt": "2026-10-18T09:10:11.123Z",
        }));
    }

    #[test]
    fn next_id_never_repeats_within_a_millisecond() {
        let now = now_millis();
        let first = Todo::new(TodoId::next(now, &[]), "a".into(), now);
        let second_id = TodoId::next(now, std::slice::from_ref(&first));
        assert_eq!(first.id.0, now.timestamp_millis());
        assert_eq!(second_id.0, first.id.0 + 1);
    }

    #[test]
    fn toggle_bumps_updated_at_even_with_a_stalled_clock() {
        let now = now_millis();
        let mut todo = Todo::new(TodoId(1), "a".into(), now);
        todo.toggle(now);
        assert_eq!(todo.status, TodoStatus::Done);
        assert!(todo.updated_at > todo.created_at);
    }

    #[test]
    fn normalize_title_rejects_blank() {
        assert_eq!(normalize_title("   "), None);
        assert_eq!(normalize_title("  buy milk  ").as_deref(), Some("buy milk"));
    }
}
