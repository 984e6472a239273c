use crate::types::preferences::TravelPreferences;

/// JSON layout the AI service must answer with. Mirrors [`crate::types::Itinerary`].
pub const ITINERARY_TEMPLATE: &str = r#"{
  "summary": {
    "total_estimated_cost": number,
    "cost_breakdown": {
      "flights": number,
      "accommodation": number,
      "food": number,
      "attractions": number,
      "local_transport": number,
      "miscellaneous": number
    },
    "best_time_to_visit": "string",
    "currency": "3-letter code, e.g. USD",
    "weather_forecast": "string"
  },
  "daily_itinerary": [
    {
      "day": integer,
      "date": "YYYY-MM-DD",
      "theme": "string",
      "activities": [
        {
          "time": "HH:MM",
          "activity": "string",
          "location": "string",
          "cost": number,
          "duration": "string",
          "tips": "string",
          "priority": "high" | "medium" | "low"
        }
      ],
      "meals": [
        {
          "meal": "breakfast" | "lunch" | "dinner" | "snack",
          "restaurant": "string",
          "cuisine": "string",
          "cost": number,
          "location": "string",
          "rating": number between 0 and 5
        }
      ],
      "accommodation": {
        "name": "string",
        "type": "hotel" | "hostel" | "airbnb",
        "location": "string",
        "cost_per_night": number,
        "rating": number between 0 and 5,
        "amenities": ["string"]
      },
      "transport": [
        {
          "from": "string",
          "to": "string",
          "method": "string",
          "cost": number,
          "duration": "string"
        }
      ],
      "daily_total": number
    }
  ],
  "recommendations": {
    "must_visit": ["string"],
    "hidden_gems": ["string"],
    "local_tips": ["string"],
    "money_saving_tips": ["string"],
    "safety_tips": ["string"]
  },
  "alternatives": {
    "budget_friendly": "suggestions if the budget needs to be reduced",
    "luxury_upgrades": "suggestions if the budget can be increased",
    "weather_backup": ["indoor alternatives"]
  }
}"#;

/// System message sent ahead of the itinerary prompt
pub const SYSTEM_PROMPT: &str = "You are an expert travel planner. You answer with a single JSON object that follows the requested structure exactly, with no commentary before or after it.";

/// Build the itinerary request for a set of preferences. Same input, same prompt.
pub fn generate_itinerary_prompt(prefs: &TravelPreferences) -> String {
    let priorities = prefs
        .priorities()
        .iter()
        .map(|interest| interest.label())
        .collect::<Vec<_>>()
        .join(", ");
    let dates = prefs.trip_dates();
    let first = prefs.start_date();
    let last = dates.last().copied().unwrap_or(first);
    let days = prefs.duration();

    format!(
        "Create a detailed travel itinerary for:\n\
         \n\
         TRIP DETAILS:\n\
         - Destination: {destination}\n\
         - Budget: {budget:.2} ({flexibility})\n\
         - Duration: {days} days\n\
         - Travel Style: {style}\n\
         - Food Preference: {food}\n\
         - Priorities: {priorities}\n\
         - Travel Group: {companions}\n\
         - Start Date: {first}\n\
         \n\
         Respond with a single JSON object using exactly this structure:\n\
         \n\
         {template}\n\
         \n\
         Rules:\n\
         - \"daily_itinerary\" must contain exactly {days} entries, with \"day\" numbered 1 to {days} and \"date\" running from {first} to {last}.\n\
         - Every cost is a non-negative number in the currency named by \"summary.currency\".\n\
         - Ratings are numbers between 0 and 5.\n\
         - The \"cost_breakdown\" values must sum to \"total_estimated_cost\", which should stay within the budget.\n\
         - Every meal must respect the food preference.\n\
         - Include specific restaurant names, attractions, and locations.",
        destination = prefs.destination(),
        budget = prefs.budget(),
        flexibility = if prefs.flexible_budget() { "flexible" } else { "fixed" },
        days = days,
        style = prefs.travel_style(),
        food = prefs.food_preference(),
        priorities = priorities,
        companions = prefs.companions(),
        first = first,
        last = last,
        template = ITINERARY_TEMPLATE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::CompletionSchema;
    use crate::types::itinerary::Itinerary;
    use crate::types::preferences::{Companions, FoodPreference, Interest, TravelStyle};
    use chrono::NaiveDate;
    use serde_json::Value;

    fn paris() -> TravelPreferences {
        TravelPreferences::builder("Paris, France", NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
            .budget(2000.0)
            .duration(7)
            .travel_style(TravelStyle::Luxury)
            .food_preference(FoodPreference::Vegetarian)
            .priorities([Interest::Museums, Interest::FoodTours])
            .companions(Companions::Couple)
            .flexible_budget(true)
            .build()
            .unwrap()
    }

    #[test]
    fn test_prompt_embeds_every_preference() {
        let prompt = generate_itinerary_prompt(&paris());

        assert!(prompt.contains("Destination: Paris, France"));
        assert!(prompt.contains("Budget: 2000.00 (flexible)"));
        assert!(prompt.contains("Duration: 7 days"));
        assert!(prompt.contains("Travel Style: luxury"));
        assert!(prompt.contains("Food Preference: vegetarian"));
        assert!(prompt.contains("Priorities: Museums, Food Tours"));
        assert!(prompt.contains("Travel Group: couple"));
        assert!(prompt.contains("Start Date: 2025-06-01"));
        assert!(prompt.contains("from 2025-06-01 to 2025-06-07"));
        assert!(prompt.contains("exactly 7 entries"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(generate_itinerary_prompt(&paris()), generate_itinerary_prompt(&paris()));
    }

    #[test]
    fn test_template_names_every_schema_property() {
        fn collect(value: &Value, names: &mut Vec<String>) {
            match value {
                Value::Object(map) => {
                    if let Some(Value::Object(props)) = map.get("properties") {
                        names.extend(props.keys().cloned());
                    }
                    map.values().for_each(|v| collect(v, names));
                }
                Value::Array(items) => items.iter().for_each(|v| collect(v, names)),
                _ => {}
            }
        }

        let mut names = Vec::new();
        collect(Itinerary::schema().schema_json(), &mut names);
        assert!(names.len() > 30);
        for name in names {
            assert!(
                ITINERARY_TEMPLATE.contains(&format!("\"{}\"", name)),
                "template is missing `{}`",
                name
            );
        }
    }
}
