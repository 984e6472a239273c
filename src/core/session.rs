use std::sync::Arc;

use super::planner::TripPlanner;
use crate::{
    error::{PlannerError, Result},
    types::{outcome::PlanOutcome, preferences::TravelPreferences},
};

/// The preferences and finished plan that are currently on display.
#[derive(Debug, Clone)]
pub struct PlanState {
    pub preferences: TravelPreferences,
    pub outcome: PlanOutcome,
}

/// Application state holding at most one current plan.
///
/// A plan is never edited after installation. Planning again swaps the whole
/// [`PlanState`] in one assignment, so readers holding the previous `Arc`
/// keep a consistent snapshot.
#[derive(Debug, Default)]
pub struct TripSession {
    current: Option<Arc<PlanState>>,
}

impl TripSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Arc<PlanState>> {
        self.current.clone()
    }

    pub fn has_plan(&self) -> bool {
        self.current.is_some()
    }

    pub fn install(
        &mut self,
        preferences: TravelPreferences,
        outcome: PlanOutcome,
    ) -> Arc<PlanState> {
        let state = Arc::new(PlanState {
            preferences,
            outcome,
        });
        self.current = Some(Arc::clone(&state));
        state
    }

    /// Plan for `preferences` and make the result current.
    pub async fn plan(
        &mut self,
        planner: &TripPlanner,
        preferences: TravelPreferences,
    ) -> Arc<PlanState> {
        let outcome = planner.plan(&preferences).await;
        self.install(preferences, outcome)
    }

    /// Re-plan the current trip with a scaled budget. The current plan is only
    /// replaced once the new one is complete.
    pub async fn regenerate(
        &mut self,
        planner: &TripPlanner,
        multiplier: f64,
    ) -> Result<Arc<PlanState>> {
        let current = self.current.clone().ok_or_else(|| {
            PlannerError::InvalidPreferences("no current plan to regenerate".to_string())
        })?;
        let (preferences, outcome) = planner
            .regenerate(&current.preferences, multiplier)
            .await?;
        Ok(self.install(preferences, outcome))
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::backend::StaticBackend;
    use crate::types::preferences::Interest;
    use chrono::NaiveDate;

    fn prefs() -> TravelPreferences {
        TravelPreferences::builder("Barcelona, Spain", NaiveDate::from_ymd_opt(2025, 7, 10).unwrap())
            .budget(1000.0)
            .duration(3)
            .priority(Interest::Beaches)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_regenerate_replaces_whole_state() {
        let planner = TripPlanner::new(StaticBackend::offline());
        let mut session = TripSession::new();
        assert!(session.current().is_none());

        let first = session.plan(&planner, prefs()).await;
        let second = session.regenerate(&planner, 2.0).await.unwrap();

        assert_eq!(first.preferences.budget(), 1000.0);
        assert_eq!(first.outcome.itinerary.summary.total_estimated_cost, 900.0);
        assert_eq!(second.preferences.budget(), 2000.0);
        assert_eq!(second.outcome.itinerary.summary.total_estimated_cost, 1800.0);
        assert!(Arc::ptr_eq(&session.current().unwrap(), &second));
    }

    #[tokio::test]
    async fn test_failed_regenerate_keeps_current_plan() {
        let planner = TripPlanner::new(StaticBackend::offline());
        let mut session = TripSession::new();
        assert!(session.regenerate(&planner, 1.0).await.is_err());

        let first = session.plan(&planner, prefs()).await;
        assert!(session.regenerate(&planner, 5.0).await.is_err());
        assert!(Arc::ptr_eq(&session.current().unwrap(), &first));

        session.reset();
        assert!(!session.has_plan());
    }
}
