use chrono::NaiveDate;
use proptest::prelude::*;
use serde_json::Value;
use trip_planner_rs::{
    generate_fallback_itinerary, parse_itinerary,
    report::{budget_variance, category_shares, daily_average},
    services::strip_code_fence,
    Interest, ParseError, TravelPreferences, TravelStyle,
};

fn preferences() -> impl Strategy<Value = TravelPreferences> {
    (
        1.0f64..50_000.0,
        1u32..=30,
        prop::sample::subsequence(Interest::ALL.to_vec(), 1..=4),
        prop::sample::select(TravelStyle::ALL.to_vec()),
        0i64..3650,
    )
        .prop_map(|(budget, days, interests, style, offset)| {
            let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(offset);
            TravelPreferences::builder("Lisbon, Portugal", start)
                .budget(budget)
                .duration(days)
                .priorities(interests)
                .travel_style(style)
                .build()
                .unwrap()
        })
}

proptest! {
    #[test]
    fn fallback_matches_requested_shape(prefs in preferences()) {
        let itinerary = generate_fallback_itinerary(&prefs);
        let dates = prefs.trip_dates();

        prop_assert_eq!(itinerary.daily_itinerary.len(), prefs.duration() as usize);
        for (idx, day) in itinerary.daily_itinerary.iter().enumerate() {
            prop_assert_eq!(day.day as usize, idx + 1);
            prop_assert_eq!(day.date, dates[idx]);
        }

        // The fallback must pass the same checks an AI response does.
        let raw = serde_json::to_string(&itinerary).unwrap();
        prop_assert_eq!(parse_itinerary(&raw, prefs.duration()).unwrap(), itinerary);
    }

    #[test]
    fn fallback_breakdown_sums_to_total(prefs in preferences()) {
        let summary = generate_fallback_itinerary(&prefs).summary;
        let sum = summary.cost_breakdown.sum();
        let relative = (sum - summary.total_estimated_cost).abs() / summary.total_estimated_cost;
        prop_assert!(relative < 1e-6);
    }

    #[test]
    fn fenced_and_bare_responses_parse_the_same(
        prefs in preferences(),
        tip in "[ -~]{0,40}",
        tag in prop::sample::select(vec!["json", "JSON", ""]),
    ) {
        let mut itinerary = generate_fallback_itinerary(&prefs);
        itinerary.daily_itinerary[0].activities[0].tips = format!("{tip} ``` {tip}");
        let json_text = serde_json::to_string_pretty(&itinerary).unwrap();
        let fenced = format!("```{tag}\n{json_text}\n```");

        let bare = parse_itinerary(&json_text, prefs.duration());
        prop_assert_eq!(parse_itinerary(&fenced, prefs.duration()), bare.clone());
        prop_assert_eq!(bare.unwrap(), itinerary);
    }

    #[test]
    fn undecodable_text_is_malformed(text in "\\PC*") {
        prop_assume!(serde_json::from_str::<Value>(strip_code_fence(&text)).is_err());
        let result = parse_itinerary(&text, 3);
        prop_assert!(matches!(result, Err(ParseError::Malformed(_))), "got {:?}", result);
    }

    #[test]
    fn aggregates_never_divide_by_zero(
        planned in prop_oneof![Just(0.0f64), 0.0f64..10_000.0],
        total in 0.0f64..10_000.0,
        days in 0u32..3,
    ) {
        let variance = budget_variance(planned, total);
        prop_assert!(variance.efficiency_percent.is_finite());
        prop_assert!(variance.savings >= 0.0);
        prop_assert!(daily_average(total, days).is_finite());
        if days == 0 {
            prop_assert_eq!(daily_average(total, days), 0.0);
        }
    }
}

#[test]
fn zero_total_shares_are_zero() {
    let prefs = TravelPreferences::builder("Reykjavik", NaiveDate::from_ymd_opt(2025, 1, 5).unwrap())
        .duration(1)
        .priority(Interest::Wildlife)
        .build()
        .unwrap();
    let mut summary = generate_fallback_itinerary(&prefs).summary;
    summary.total_estimated_cost = 0.0;
    assert!(category_shares(&summary).iter().all(|share| share.percent == 0.0));
}
