use anyhow::Context;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /api/summarize`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub limit: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl SummaryRequest {
    /// Summary window covering the 24 hours before `now`
    pub fn last_day(now: DateTime<Utc>, limit: u32) -> Self {
        Self {
            limit,
            start_date: (now - Duration::days(1)).date_naive(),
            end_date: now.date_naive(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct RawSummary {
    #[serde(default)]
    location: Option<Value>,
    #[serde(default, alias = "fallDetection")]
    fall_detection: Option<Value>,
    #[serde(default)]
    distance: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummarySection {
    pub title: &'static str,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivitySummary {
    pub location: SummarySection,
    pub fall_detection: SummarySection,
    pub distance: SummarySection,
}

impl ActivitySummary {
    /// Parse the fenced JSON text returned by the summarize endpoint
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let body = strip_code_fence(text);
        let raw: RawSummary = serde_json::from_str(body)
            .with_context(|| format!("Invalid activity summary `{}`", truncate(body, 80)))?;

        Ok(Self {
            location: section("Location", raw.location),
            fall_detection: section("Fall detection", raw.fall_detection),
            distance: section("Distance", raw.distance),
        })
    }

    pub fn sections(&self) -> [&SummarySection; 3] {
        [&self.location, &self.fall_detection, &self.distance]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SummaryState {
    #[default]
    Loading,
    Ready(ActivitySummary),
    Failed(String),
}

/// Returns the contents of the first markdown code fence, or the whole text
/// when there is none. A language tag after the opening fence is skipped.
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(start) = text.find("```") else {
        return text;
    };

    let after_open = &text[start + 3..];
    let body = match after_open.find('\n') {
        Some(newline) => &after_open[newline + 1..],
        None => after_open,
    };

    match body.find("```") {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

fn section(title: &'static str, value: Option<Value>) -> SummarySection {
    let mut lines = vec![];
    if let Some(v) = value {
        flatten(&v, None, &mut lines);
    }
    SummarySection { title, lines }
}

fn flatten(value: &Value, key: Option<&str>, lines: &mut Vec<String>) {
    let text = match value {
        Value::Null => return,
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => {
            for item in items {
                flatten(item, key, lines);
            }
            return;
        }
        Value::Object(map) => return flatten_object(map, lines),
    };

    match key {
        Some(k) => lines.push(format!("{k}: {text}")),
        None => lines.push(text),
    }
}

fn flatten_object(map: &Map<String, Value>, lines: &mut Vec<String>) {
    for (k, v) in map {
        flatten(v, Some(k.as_str()), lines);
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn strips_tagged_fence() {
        let text = "```json\n{\"location\": \"Home\"}\n```\n";
        assert_eq!(strip_code_fence(text), "{\"location\": \"Home\"}");
    }

    #[test]
    fn unfenced_text_is_kept() {
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn parses_three_sections() {
        let text = r#"```json
{
  "location": "Stayed inside the safe zone all day",
  "fallDetection": {"falls": 1, "lastFall": "08:30"},
  "distance": ["Max 120 m from home", "Average 40 m"]
}
```"#;
        let summary = ActivitySummary::parse(text).unwrap();
        assert_eq!(
            summary.location.lines,
            vec!["Stayed inside the safe zone all day"]
        );
        assert_eq!(
            summary.fall_detection.lines,
            vec!["falls: 1", "lastFall: 08:30"]
        );
        assert_eq!(summary.distance.lines.len(), 2);
        assert_eq!(summary.sections()[1].title, "Fall detection");
    }

    #[test]
    fn missing_sections_are_empty() {
        let summary = ActivitySummary::parse("```\n{\"fall_detection\": \"none\"}\n```").unwrap();
        assert!(summary.location.lines.is_empty());
        assert_eq!(summary.fall_detection.lines, vec!["none"]);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(ActivitySummary::parse("```json\nnot json\n```").is_err());
        assert!(ActivitySummary::parse("").is_err());
    }

    #[test]
    fn request_window_and_wire_names() {
        let now = Utc.with_ymd_and_hms(2024, 11, 20, 8, 30, 0).unwrap();
        let req = SummaryRequest::last_day(now, 10);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"limit": 10, "startDate": "2024-11-19", "endDate": "2024-11-20"})
        );
    }
}
