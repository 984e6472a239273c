//! Figures derived from a finished itinerary for display.
//!
//! Every function here is total: zero budgets, zero durations and zero totals
//! yield `0.0` instead of dividing by zero.

use serde::Serialize;

use crate::types::{
    itinerary::{CostCategory, Itinerary, TripSummary},
    preferences::TravelPreferences,
};

/// Average spend per day; `0.0` when `duration` is zero.
pub fn daily_average(total: f64, duration: u32) -> f64 {
    if duration == 0 {
        return 0.0;
    }
    total / f64::from(duration)
}

/// How the estimated total compares with the planned budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetVariance {
    /// `planned - total`; negative means over budget
    pub variance: f64,
    pub is_over_budget: bool,
    pub savings: f64,
    /// Variance as a percentage of the planned budget
    pub efficiency_percent: f64,
}

pub fn budget_variance(planned: f64, total: f64) -> BudgetVariance {
    let variance = planned - total;
    let efficiency_percent = if planned > 0.0 {
        variance / planned * 100.0
    } else {
        0.0
    };

    BudgetVariance {
        variance,
        is_over_budget: variance < 0.0,
        savings: variance.max(0.0),
        efficiency_percent,
    }
}

/// One cost category's amount and share of the stated total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: CostCategory,
    pub amount: f64,
    pub percent: f64,
}

/// Per-category percentages of `total_estimated_cost`, in display order.
pub fn category_shares(summary: &TripSummary) -> Vec<CategoryShare> {
    let total = summary.total_estimated_cost;
    summary
        .cost_breakdown
        .iter()
        .map(|(category, amount)| CategoryShare {
            category,
            amount,
            percent: if total == 0.0 {
                0.0
            } else {
                amount / total * 100.0
            },
        })
        .collect()
}

/// All headline figures for one itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetOverview {
    pub planned_budget: f64,
    pub total_estimated_cost: f64,
    pub daily_average: f64,
    pub variance: BudgetVariance,
    pub categories: Vec<CategoryShare>,
}

impl BudgetOverview {
    /// Uses the itinerary's stated total, not the sum of its breakdown.
    pub fn derive(itinerary: &Itinerary, prefs: &TravelPreferences) -> Self {
        let total = itinerary.summary.total_estimated_cost;
        Self {
            planned_budget: prefs.budget(),
            total_estimated_cost: total,
            daily_average: daily_average(total, prefs.duration()),
            variance: budget_variance(prefs.budget(), total),
            categories: category_shares(&itinerary.summary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fallback::generate_fallback_itinerary;
    use crate::types::preferences::Interest;
    use chrono::NaiveDate;

    fn paris() -> TravelPreferences {
        TravelPreferences::builder("Paris, France", NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
            .budget(2000.0)
            .duration(7)
            .priority(Interest::Museums)
            .build()
            .unwrap()
    }

    #[test]
    fn test_zero_inputs_are_defined() {
        assert_eq!(daily_average(1500.0, 0), 0.0);

        let zero_budget = budget_variance(0.0, 250.0);
        assert_eq!(zero_budget.efficiency_percent, 0.0);
        assert!(zero_budget.is_over_budget);
        assert_eq!(zero_budget.savings, 0.0);

        let mut itinerary = generate_fallback_itinerary(&paris());
        itinerary.summary.total_estimated_cost = 0.0;
        assert!(category_shares(&itinerary.summary)
            .iter()
            .all(|share| share.percent == 0.0));
    }

    #[test]
    fn test_under_and_over_budget() {
        let under = budget_variance(2000.0, 1800.0);
        assert_eq!(under.variance, 200.0);
        assert!(!under.is_over_budget);
        assert_eq!(under.savings, 200.0);
        assert!((under.efficiency_percent - 10.0).abs() < 1e-9);

        let over = budget_variance(1000.0, 1250.0);
        assert_eq!(over.variance, -250.0);
        assert!(over.is_over_budget);
        assert_eq!(over.savings, 0.0);
        assert!((over.efficiency_percent + 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_overview_uses_stated_total() {
        let prefs = paris();
        let mut itinerary = generate_fallback_itinerary(&prefs);
        itinerary.summary.cost_breakdown.flights = 690.0;
        itinerary.summary.total_estimated_cost = 2000.0;

        let overview = BudgetOverview::derive(&itinerary, &prefs);
        assert_eq!(overview.variance.variance, 0.0);
        assert!(!overview.variance.is_over_budget);
        assert!((overview.daily_average - 2000.0 / 7.0).abs() < 1e-9);
        assert!((overview.categories[0].percent - 34.5).abs() < 1e-9);
    }

    #[test]
    fn test_fallback_shares_match_weights() {
        let itinerary = generate_fallback_itinerary(&paris());
        for share in category_shares(&itinerary.summary) {
            let expected = share.category.fallback_weight() * 100.0;
            assert!((share.percent - expected).abs() < 1e-9);
        }
    }
}
