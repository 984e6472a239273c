use super::itinerary::Itinerary;
use crate::error::{ParseError, PlannerError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Notice shown to the user whenever the fallback itinerary is used.
pub const FALLBACK_NOTICE: &str =
    "The AI planner was unavailable, so we are using a standard itinerary template.";

/// Result of one planning request
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    /// Finalized itinerary, AI generated or fallback
    pub itinerary: Itinerary,
    /// Where the itinerary came from
    pub source: PlanSource,
    /// Total tokens used (if available from the API)
    pub tokens: Option<TokenUsage>,
    /// Wall-clock time of the request
    pub elapsed: Duration,
}

/// Token usage information from the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanSource {
    Generated,
    Fallback(FallbackReason),
}

/// Why the fallback itinerary replaced the AI response.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// The response arrived but could not be used
    Parse(ParseError),
    /// The AI call itself failed (network, quota, timeout)
    External { code: &'static str, message: String },
}

impl FallbackReason {
    pub fn code(&self) -> &'static str {
        match self {
            FallbackReason::Parse(err) => err.error_code(),
            FallbackReason::External { code, .. } => code,
        }
    }
}

impl From<ParseError> for FallbackReason {
    fn from(err: ParseError) -> Self {
        FallbackReason::Parse(err)
    }
}

impl From<&PlannerError> for FallbackReason {
    fn from(err: &PlannerError) -> Self {
        FallbackReason::External {
            code: err.error_code(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackReason::Parse(err) => write!(f, "{}", err),
            FallbackReason::External { message, .. } => f.write_str(message),
        }
    }
}

impl PlanOutcome {
    pub fn new(
        itinerary: Itinerary,
        source: PlanSource,
        tokens: Option<TokenUsage>,
        elapsed: Duration,
    ) -> Self {
        Self {
            itinerary,
            source,
            tokens,
            elapsed,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, PlanSource::Fallback(_))
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match &self.source {
            PlanSource::Fallback(reason) => Some(reason),
            PlanSource::Generated => None,
        }
    }

    /// Non-fatal user notice, present only for fallback itineraries.
    pub fn notice(&self) -> Option<&'static str> {
        self.is_fallback().then_some(FALLBACK_NOTICE)
    }

    /// Generate a human-readable summary of the request
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        lines.push("=== Trip Plan ===".to_string());
        match &self.source {
            PlanSource::Generated => lines.push("Source: AI generated".to_string()),
            PlanSource::Fallback(reason) => {
                lines.push("Source: standard template".to_string());
                lines.push(format!("Reason: [{}] {}", reason.code(), reason));
            }
        }
        lines.push(format!("Duration: {:.2}s", self.elapsed.as_secs_f64()));

        if let Some(tokens) = &self.tokens {
            lines.push(format!(
                "Tokens: {} prompt + {} completion = {} total",
                tokens.prompt_tokens, tokens.completion_tokens, tokens.total_tokens
            ));
        }

        let summary = &self.itinerary.summary;
        lines.push(format!(
            "Days: {} | Estimated total: {:.2} {}",
            self.itinerary.daily_itinerary.len(),
            summary.total_estimated_cost,
            summary.currency
        ));

        lines.push(String::new());
        lines.push("--- Days ---".to_string());
        for day in &self.itinerary.daily_itinerary {
            lines.push(format!(
                "Day {} ({}) - {} [{:.2}]",
                day.day, day.date, day.theme, day.daily_total
            ));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fallback::generate_fallback_itinerary;
    use crate::types::preferences::{Interest, TravelPreferences};
    use chrono::NaiveDate;

    fn sample_itinerary() -> Itinerary {
        let prefs = TravelPreferences::builder("Oslo", NaiveDate::from_ymd_opt(2025, 9, 1).unwrap())
            .duration(2)
            .priority(Interest::Museums)
            .build()
            .unwrap();
        generate_fallback_itinerary(&prefs)
    }

    #[test]
    fn test_generated_outcome_has_no_notice() {
        let outcome = PlanOutcome::new(
            sample_itinerary(),
            PlanSource::Generated,
            Some(TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 20,
                total_tokens: 30,
            }),
            Duration::from_millis(1500),
        );
        assert!(!outcome.is_fallback());
        assert!(outcome.notice().is_none());

        let summary = outcome.summary();
        assert!(summary.contains("Source: AI generated"));
        assert!(summary.contains("10 prompt + 20 completion = 30 total"));
        assert!(summary.contains("Day 2 (2025-09-02)"));
    }

    #[test]
    fn test_fallback_outcome_reports_reason() {
        let outcome = PlanOutcome::new(
            sample_itinerary(),
            PlanSource::Fallback(ParseError::Malformed(String::new()).into()),
            None,
            Duration::ZERO,
        );
        assert!(outcome.is_fallback());
        assert_eq!(outcome.notice(), Some(FALLBACK_NOTICE));
        assert_eq!(outcome.fallback_reason().unwrap().code(), "MALFORMED_RESPONSE");
        assert!(outcome.summary().contains("[MALFORMED_RESPONSE]"));
    }

    #[test]
    fn test_external_reason_keeps_error_code() {
        let reason = FallbackReason::from(&PlannerError::Timeout("after 60s".into()));
        assert_eq!(reason.code(), "TIMEOUT_ERROR");
        assert!(reason.to_string().contains("after 60s"));
    }
}
