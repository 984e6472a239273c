//! Turns raw AI text into a validated [`Itinerary`].
//!
//! The response may arrive wrapped in a Markdown code fence. Only a first line
//! that is purely an opening fence (with an optional language tag) and a last
//! line that is purely a closing fence are removed, so backticks inside string
//! values survive untouched.

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    error::{snippet, ParseError},
    schemas::{
        cost_sum_discrepancy,
        validation::{validate_itinerary, validate_structured_payload},
        CompletionSchema,
    },
    types::itinerary::Itinerary,
};

/// Parse a raw AI response into an itinerary with exactly `expected_days` days.
pub fn parse_itinerary(raw: &str, expected_days: u32) -> Result<Itinerary, ParseError> {
    let body = strip_code_fence(raw);

    let value: Value = serde_json::from_str(body).map_err(|err| {
        ParseError::Malformed(format!("{} | Raw: {}", err, snippet(body)))
    })?;

    if !value.is_object() {
        return Err(ParseError::SchemaViolation(
            "response must be a JSON object".to_string(),
        ));
    }

    let schema = Itinerary::schema();
    validate_structured_payload(schema, &value)?;

    let itinerary: Itinerary = serde_path_to_error::deserialize(&value).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        ParseError::SchemaViolation(format!(
            "failed to deserialize `{}` at {}: {}",
            schema.schema_name(),
            location,
            err.inner()
        ))
    })?;

    validate_itinerary(&itinerary, expected_days)?;

    if let Some(gap) = cost_sum_discrepancy(&itinerary) {
        warn!(
            target: "trip_planner::parser",
            stated = itinerary.summary.total_estimated_cost,
            summed = itinerary.summary.cost_breakdown.sum(),
            gap_percent = gap * 100.0,
            "cost breakdown does not add up to the stated total"
        );
    }

    debug!(
        target: "trip_planner::parser",
        days = itinerary.daily_itinerary.len(),
        "accepted itinerary response"
    );

    Ok(itinerary)
}

/// Remove a surrounding Markdown code fence, if there is one.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut body = raw.trim();

    if let Some((first, rest)) = body.split_once('\n') {
        if is_opening_fence(first) {
            body = rest;
        }
    }

    if let Some((rest, last)) = body.rsplit_once('\n') {
        if is_closing_fence(last) {
            body = rest;
        }
    }

    body.trim()
}

fn fence_parts(line: &str) -> Option<&str> {
    let line = line.trim();
    let tag = line.trim_start_matches('`');
    (line.len() - tag.len() >= 3).then_some(tag)
}

fn is_opening_fence(line: &str) -> bool {
    fence_parts(line).is_some_and(|tag| {
        tag.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'))
    })
}

fn is_closing_fence(line: &str) -> bool {
    fence_parts(line).is_some_and(str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fallback::generate_fallback_itinerary;
    use crate::types::preferences::{Interest, TravelPreferences};
    use chrono::NaiveDate;

    fn itinerary(days: u32) -> Itinerary {
        let prefs = TravelPreferences::builder("Paris, France", NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
            .duration(days)
            .priority(Interest::Museums)
            .build()
            .unwrap();
        generate_fallback_itinerary(&prefs)
    }

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  ```JSON  \r\n{\"a\":1}\r\n```  \n"), "{\"a\":1}");
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("\n\n  {\"a\":1}  \n"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_keeps_backticks_inside_values() {
        let body = "{\n  \"tip\": \"wrap code in ```\"\n}";
        let fenced = format!("```json\n{}\n```", body);
        assert_eq!(strip_code_fence(&fenced), body);
        assert_eq!(strip_code_fence(body), body);
    }

    #[test]
    fn test_first_line_with_content_is_not_a_fence() {
        let text = "```json {\"a\":1}\n```";
        assert_eq!(strip_code_fence(text), "```json {\"a\":1}");
    }

    #[test]
    fn test_round_trip_clean_input() {
        let original = itinerary(3);
        let raw = serde_json::to_string_pretty(&original).unwrap();
        assert_eq!(parse_itinerary(&raw, 3).unwrap(), original);
    }

    #[test]
    fn test_fenced_and_bare_parse_identically() {
        let raw = serde_json::to_string(&itinerary(2)).unwrap();
        let fenced = format!("```json\n{}\n```", raw);
        assert_eq!(parse_itinerary(&fenced, 2), parse_itinerary(&raw, 2));
    }

    #[test]
    fn test_empty_and_garbage_are_malformed() {
        assert!(matches!(parse_itinerary("", 7), Err(ParseError::Malformed(_))));
        assert!(matches!(parse_itinerary("   ", 7), Err(ParseError::Malformed(_))));
        assert!(matches!(
            parse_itinerary("Sorry, I cannot help with that.", 7),
            Err(ParseError::Malformed(_))
        ));
        assert!(matches!(
            parse_itinerary("{\"summary\": ", 7),
            Err(ParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_wrong_day_count_is_a_violation() {
        let raw = serde_json::to_string(&itinerary(3)).unwrap();
        let err = parse_itinerary(&raw, 7).unwrap_err();
        assert!(matches!(err, ParseError::SchemaViolation(ref d) if d.contains("expected 7")));
    }

    #[test]
    fn test_non_object_json_is_a_violation() {
        assert!(matches!(parse_itinerary("[1, 2, 3]", 1), Err(ParseError::SchemaViolation(_))));
        assert!(matches!(parse_itinerary("42", 1), Err(ParseError::SchemaViolation(_))));
    }

    #[test]
    fn test_bad_date_reports_path() {
        let mut value = serde_json::to_value(itinerary(1)).unwrap();
        value["daily_itinerary"][0]["date"] = "June 1st".into();
        let err = parse_itinerary(&value.to_string(), 1).unwrap_err();
        assert!(matches!(err, ParseError::SchemaViolation(_)));
    }

    #[test]
    fn test_extra_cost_category_is_a_violation() {
        let mut value = serde_json::to_value(itinerary(2)).unwrap();
        value["summary"]["cost_breakdown"]["shopping"] = 500.0.into();
        let total = value["summary"]["total_estimated_cost"].as_f64().unwrap();
        value["summary"]["total_estimated_cost"] = (total + 500.0).into();

        let err = parse_itinerary(&value.to_string(), 2).unwrap_err();
        assert!(matches!(err, ParseError::SchemaViolation(ref d) if d.contains("shopping")));
    }

    #[test]
    fn test_sum_mismatch_is_accepted() {
        let mut original = itinerary(2);
        original.summary.total_estimated_cost += 500.0;
        let raw = serde_json::to_string(&original).unwrap();
        assert_eq!(parse_itinerary(&raw, 2).unwrap(), original);
    }
}
