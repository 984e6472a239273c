use chrono::NaiveDate;

use crate::types::{
    itinerary::{
        Accommodation, AccommodationType, Activity, Alternatives, CostBreakdown, CostCategory,
        DayPlan, Itinerary, Meal, MealType, Priority, Recommendations, TransportLeg, TripSummary,
    },
    preferences::{FoodPreference, Interest, TravelPreferences, TravelStyle},
};

/// Share of the budget the fallback itinerary plans to spend.
pub const FALLBACK_SPEND_SHARE: f64 = 0.9;

/// Build the standard itinerary used when the AI response is unavailable or unusable.
///
/// Pure function of `prefs`: the same preferences always give the same itinerary,
/// with one templated day per trip day.
pub fn generate_fallback_itinerary(prefs: &TravelPreferences) -> Itinerary {
    let budget = prefs.budget();
    let days = f64::from(prefs.duration().max(1));
    let total = budget * FALLBACK_SPEND_SHARE;

    let share = |category: CostCategory| total * category.fallback_weight();
    let cost_breakdown = CostBreakdown {
        flights: share(CostCategory::Flights),
        accommodation: share(CostCategory::Accommodation),
        food: share(CostCategory::Food),
        attractions: share(CostCategory::Attractions),
        local_transport: share(CostCategory::LocalTransport),
        miscellaneous: share(CostCategory::Miscellaneous),
    };

    let template = DayTemplate {
        prefs,
        nightly_rate: budget * CostCategory::Accommodation.fallback_weight() / days,
        daily_total: budget / days,
        last_index: prefs.duration().saturating_sub(1),
    };

    let daily_itinerary = prefs
        .trip_dates()
        .into_iter()
        .enumerate()
        .map(|(index, date)| template.day(index as u32, date))
        .collect();

    Itinerary {
        summary: TripSummary {
            total_estimated_cost: total,
            cost_breakdown,
            best_time_to_visit: "Year-round".to_string(),
            currency: "USD".to_string(),
            weather_forecast: "Please check local weather".to_string(),
        },
        daily_itinerary,
        recommendations: recommendations(prefs),
        alternatives: Alternatives {
            budget_friendly: "Consider hostels and street food".to_string(),
            luxury_upgrades: "Premium hotels and fine dining".to_string(),
            weather_backup: strings(&["Museums", "Shopping centers", "Indoor entertainment"]),
        },
    }
}

struct DayTemplate<'a> {
    prefs: &'a TravelPreferences,
    nightly_rate: f64,
    daily_total: f64,
    last_index: u32,
}

impl DayTemplate<'_> {
    fn day(&self, index: u32, date: NaiveDate) -> DayPlan {
        let stage = if index == 0 {
            Stage::Arrival
        } else if index == self.last_index {
            Stage::Departure
        } else {
            Stage::Explore(self.focus(index))
        };

        DayPlan {
            day: index + 1,
            date,
            theme: stage.theme(),
            activities: self.activities(&stage),
            meals: self.meals(),
            accommodation: self.accommodation(),
            transport: stage.transport(),
            daily_total: self.daily_total,
        }
    }

    /// Interest featured on an exploration day, cycling through the priorities.
    fn focus(&self, index: u32) -> Interest {
        let priorities = self.prefs.priorities();
        let slot = (index as usize - 1) % priorities.len().max(1);
        priorities
            .get(slot)
            .copied()
            .unwrap_or(Interest::LocalCulture)
    }

    fn activities(&self, stage: &Stage) -> Vec<Activity> {
        match stage {
            Stage::Arrival => vec![activity(
                "10:00",
                "City Walking Tour",
                "Downtown",
                25.0,
                "3 hours",
                "Wear comfortable shoes",
                Priority::High,
            )],
            Stage::Explore(interest) => vec![
                activity(
                    "10:00",
                    &format!("{} in {}", interest.label(), self.prefs.destination()),
                    "City Center",
                    30.0,
                    "4 hours",
                    interest_tip(*interest),
                    Priority::High,
                ),
                activity(
                    "15:00",
                    "Free time to explore",
                    "Local neighborhoods",
                    0.0,
                    "2 hours",
                    "Ask locals for their favorite spots",
                    Priority::Low,
                ),
            ],
            Stage::Departure => vec![activity(
                "09:00",
                "Souvenir shopping and a last stroll",
                "Old Town",
                15.0,
                "2 hours",
                "Leave enough time to reach the airport",
                Priority::Medium,
            )],
        }
    }

    fn meals(&self) -> Vec<Meal> {
        let cuisine = match self.prefs.food_preference() {
            FoodPreference::NoRestrictions => "Local".to_string(),
            other => format!("Local ({})", other.label()),
        };
        vec![
            Meal {
                meal: MealType::Lunch,
                restaurant: "Local Favorite".to_string(),
                cuisine: cuisine.clone(),
                cost: 15.0,
                location: "City Center".to_string(),
                rating: 4.5,
            },
            Meal {
                meal: MealType::Dinner,
                restaurant: "Neighborhood Bistro".to_string(),
                cuisine,
                cost: 25.0,
                location: "Near the hotel".to_string(),
                rating: 4.3,
            },
        ]
    }

    fn accommodation(&self) -> Accommodation {
        let (name, kind, rating, amenities): (&str, AccommodationType, f64, &[&str]) =
            match self.prefs.travel_style() {
                TravelStyle::Budget => (
                    "Central Hostel",
                    AccommodationType::Hostel,
                    3.8,
                    &["WiFi", "Shared kitchen"][..],
                ),
                TravelStyle::MidRange => (
                    "Recommended Hotel",
                    AccommodationType::Hotel,
                    4.0,
                    &["WiFi", "Breakfast"][..],
                ),
                TravelStyle::Luxury => (
                    "Grand Hotel",
                    AccommodationType::Hotel,
                    4.7,
                    &["WiFi", "Breakfast", "Spa", "Concierge"][..],
                ),
            };

        Accommodation {
            name: name.to_string(),
            kind,
            location: "City Center".to_string(),
            cost_per_night: self.nightly_rate,
            rating,
            amenities: strings(amenities),
        }
    }
}

enum Stage {
    Arrival,
    Explore(Interest),
    Departure,
}

impl Stage {
    fn theme(&self) -> String {
        match self {
            Stage::Arrival => "Arrival & Exploration".to_string(),
            Stage::Explore(interest) => format!("{} Discovery", interest.label()),
            Stage::Departure => "Farewell & Departure".to_string(),
        }
    }

    fn transport(&self) -> Vec<TransportLeg> {
        let (from, to, method, cost, duration) = match self {
            Stage::Arrival => ("Airport", "Hotel", "Taxi", 20.0, "30 minutes"),
            Stage::Explore(_) => ("Hotel", "City Center", "Metro", 5.0, "20 minutes"),
            Stage::Departure => ("Hotel", "Airport", "Taxi", 20.0, "30 minutes"),
        };
        vec![TransportLeg {
            from: from.to_string(),
            to: to.to_string(),
            method: method.to_string(),
            cost,
            duration: duration.to_string(),
        }]
    }
}

fn activity(
    time: &str,
    name: &str,
    location: &str,
    cost: f64,
    duration: &str,
    tips: &str,
    priority: Priority,
) -> Activity {
    Activity {
        time: time.to_string(),
        activity: name.to_string(),
        location: location.to_string(),
        cost,
        duration: duration.to_string(),
        tips: tips.to_string(),
        priority,
    }
}

fn interest_tip(interest: Interest) -> &'static str {
    match interest {
        Interest::HistoricalSites | Interest::Architecture => "Book a guided tour for the backstory",
        Interest::Museums => "Check for free-entry days and skip-the-line tickets",
        Interest::NatureHiking | Interest::Wildlife => "Start early and carry water",
        Interest::Beaches => "Bring sunscreen and arrive before the crowds",
        Interest::Shopping => "Compare prices at local markets first",
        Interest::Nightlife => "Keep a safe ride home in mind",
        Interest::FoodTours => "Come hungry and try the house specialties",
        Interest::AdventureSports => "Confirm the operator's safety certification",
        Interest::Photography => "Golden hour gives the best light",
        Interest::LocalCulture => "Learn a few greetings in the local language",
    }
}

fn recommendations(prefs: &TravelPreferences) -> Recommendations {
    let destination = prefs.destination();
    let mut must_visit = vec![format!("Main attractions in {}", destination)];
    must_visit.extend(
        prefs
            .priorities()
            .iter()
            .map(|interest| format!("Best {} spots in {}", interest.label(), destination)),
    );

    Recommendations {
        must_visit,
        hidden_gems: strings(&["Local markets", "Scenic viewpoints"]),
        local_tips: strings(&["Learn basic local phrases", "Try street food"]),
        money_saving_tips: strings(&["Use public transport", "Eat at local places"]),
        safety_tips: strings(&["Keep copies of documents", "Stay aware of surroundings"]),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
