use std::{sync::Arc, time::Duration, time::Instant};

use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::{
    config::{check_budget_multiplier, PlannerConfig, DEFAULT_TIMEOUT_SECS},
    error::{snippet, PlannerError, Result},
    services::{
        backend::{Completion, ItineraryBackend},
        fallback::generate_fallback_itinerary,
        openai_client::OpenAIClient,
        parser::parse_itinerary,
        prompt::generate_itinerary_prompt,
    },
    types::{
        outcome::{FallbackReason, PlanOutcome, PlanSource, TokenUsage},
        preferences::TravelPreferences,
    },
};

/// Runs one planning request: prompt, bounded AI call, parse, fallback.
#[derive(Debug, Clone)]
pub struct TripPlanner {
    backend: Arc<dyn ItineraryBackend>,
    timeout: Duration,
}

impl TripPlanner {
    pub fn new(backend: impl ItineraryBackend + 'static) -> Self {
        Self::from_backend(Arc::new(backend))
    }

    pub fn from_backend(backend: Arc<dyn ItineraryBackend>) -> Self {
        Self {
            backend,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Planner backed by the OpenAI-compatible client described by `config`.
    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        let client = OpenAIClient::from_config(config)?;
        Ok(Self::new(client).with_timeout(config.timeout))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Produce an itinerary for `prefs`. Never fails: any problem with the AI
    /// call or its response yields the fallback itinerary instead.
    pub async fn plan(&self, prefs: &TravelPreferences) -> PlanOutcome {
        let start_time = Instant::now();
        let prompt = generate_itinerary_prompt(prefs);
        debug!(
            target: "trip_planner::planner",
            destination = prefs.destination(),
            days = prefs.duration(),
            prompt_chars = prompt.len(),
            "requesting itinerary"
        );

        let completion = match self.call_backend(&prompt).await {
            Ok(completion) => completion,
            Err(err) => {
                return self.fall_back(prefs, FallbackReason::from(&err), None, start_time);
            }
        };

        debug!(
            target: "trip_planner::planner",
            response = %snippet(&completion.text),
            "received response"
        );

        match parse_itinerary(&completion.text, prefs.duration()) {
            Ok(itinerary) => {
                info!(
                    target: "trip_planner::planner",
                    destination = prefs.destination(),
                    days = itinerary.daily_itinerary.len(),
                    total = itinerary.summary.total_estimated_cost,
                    "itinerary generated"
                );
                PlanOutcome::new(
                    itinerary,
                    PlanSource::Generated,
                    completion.usage,
                    start_time.elapsed(),
                )
            }
            Err(err) => self.fall_back(prefs, err.into(), completion.usage, start_time),
        }
    }

    /// Plan again with the budget scaled by `multiplier`, returning the new
    /// preferences alongside the fresh outcome.
    pub async fn regenerate(
        &self,
        prefs: &TravelPreferences,
        multiplier: f64,
    ) -> Result<(TravelPreferences, PlanOutcome)> {
        check_budget_multiplier(multiplier)?;
        let adjusted = prefs.with_budget_multiplier(multiplier)?;
        info!(
            target: "trip_planner::planner",
            multiplier,
            budget = adjusted.budget(),
            "regenerating itinerary"
        );
        let outcome = self.plan(&adjusted).await;
        Ok((adjusted, outcome))
    }

    async fn call_backend(&self, prompt: &str) -> Result<Completion> {
        timeout(self.timeout, self.backend.complete(prompt))
            .await
            .map_err(|_| {
                PlannerError::Timeout(format!(
                    "AI call exceeded {}s",
                    self.timeout.as_secs_f64()
                ))
            })?
    }

    fn fall_back(
        &self,
        prefs: &TravelPreferences,
        reason: FallbackReason,
        tokens: Option<TokenUsage>,
        start_time: Instant,
    ) -> PlanOutcome {
        warn!(
            target: "trip_planner::planner",
            code = reason.code(),
            reason = %reason,
            "using fallback itinerary"
        );
        PlanOutcome::new(
            generate_fallback_itinerary(prefs),
            PlanSource::Fallback(reason),
            tokens,
            start_time.elapsed(),
        )
    }
}
