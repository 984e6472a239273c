use std::fmt;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Structured travel plan, produced either by the AI service or by the fallback generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Itinerary {
    /// Cost summary and general trip information
    pub summary: TripSummary,
    /// One entry per trip day, numbered from 1 without gaps
    pub daily_itinerary: Vec<DayPlan>,
    /// Curated tips and places
    pub recommendations: Recommendations,
    /// Options for other budgets and bad weather
    pub alternatives: Alternatives,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TripSummary {
    /// Total estimated cost of the trip in `currency`
    #[schemars(range(min = 0))]
    pub total_estimated_cost: f64,
    /// Total estimated cost split by category
    pub cost_breakdown: CostBreakdown,
    /// Best season or months to visit the destination
    pub best_time_to_visit: String,
    /// ISO 4217 currency code used for every amount (e.g. "USD")
    pub currency: String,
    /// Expected weather during the trip
    pub weather_forecast: String,
}

/// Cost split across the six fixed categories. Any other key is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CostBreakdown {
    #[schemars(range(min = 0))]
    pub flights: f64,
    #[schemars(range(min = 0))]
    pub accommodation: f64,
    #[schemars(range(min = 0))]
    pub food: f64,
    #[schemars(range(min = 0))]
    pub attractions: f64,
    #[schemars(range(min = 0))]
    pub local_transport: f64,
    #[schemars(range(min = 0))]
    pub miscellaneous: f64,
}

impl CostBreakdown {
    pub fn get(&self, category: CostCategory) -> f64 {
        match category {
            CostCategory::Flights => self.flights,
            CostCategory::Accommodation => self.accommodation,
            CostCategory::Food => self.food,
            CostCategory::Attractions => self.attractions,
            CostCategory::LocalTransport => self.local_transport,
            CostCategory::Miscellaneous => self.miscellaneous,
        }
    }

    /// Categories with their amounts, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (CostCategory, f64)> + '_ {
        CostCategory::ALL
            .iter()
            .map(move |category| (*category, self.get(*category)))
    }

    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, amount)| amount).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Flights,
    Accommodation,
    Food,
    Attractions,
    LocalTransport,
    Miscellaneous,
}

impl CostCategory {
    pub const ALL: [CostCategory; 6] = [
        CostCategory::Flights,
        CostCategory::Accommodation,
        CostCategory::Food,
        CostCategory::Attractions,
        CostCategory::LocalTransport,
        CostCategory::Miscellaneous,
    ];

    /// Wire key, as used in `cost_breakdown`.
    pub fn key(&self) -> &'static str {
        match self {
            CostCategory::Flights => "flights",
            CostCategory::Accommodation => "accommodation",
            CostCategory::Food => "food",
            CostCategory::Attractions => "attractions",
            CostCategory::LocalTransport => "local_transport",
            CostCategory::Miscellaneous => "miscellaneous",
        }
    }

    /// Share of the budget the fallback itinerary assigns to this category.
    pub fn fallback_weight(&self) -> f64 {
        match self {
            CostCategory::Flights => 0.30,
            CostCategory::Accommodation => 0.25,
            CostCategory::Food => 0.20,
            CostCategory::Attractions => 0.15,
            CostCategory::LocalTransport => 0.05,
            CostCategory::Miscellaneous => 0.05,
        }
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Plan for a single trip day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DayPlan {
    /// 1-based day counter within the itinerary
    #[schemars(range(min = 1))]
    pub day: u32,
    /// Calendar date of this day (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Short theme for the day
    pub theme: String,
    /// Activities in chronological order
    pub activities: Vec<Activity>,
    pub meals: Vec<Meal>,
    /// Where the traveler sleeps this night
    pub accommodation: Accommodation,
    pub transport: Vec<TransportLeg>,
    /// Estimated spend for the day
    #[schemars(range(min = 0))]
    pub daily_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Activity {
    /// Start time (HH:MM)
    pub time: String,
    pub activity: String,
    pub location: String,
    #[schemars(range(min = 0))]
    pub cost: f64,
    /// Human readable length, e.g. "3 hours"
    pub duration: String,
    pub tips: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Meal {
    pub meal: MealType,
    pub restaurant: String,
    pub cuisine: String,
    #[schemars(range(min = 0))]
    pub cost: f64,
    pub location: String,
    /// Rating out of 5
    #[schemars(range(min = 0, max = 5))]
    pub rating: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    /// Capitalised form for display ("Lunch").
    pub fn title(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Accommodation {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccommodationType,
    pub location: String,
    #[schemars(range(min = 0))]
    pub cost_per_night: f64,
    /// Rating out of 5
    #[schemars(range(min = 0, max = 5))]
    pub rating: f64,
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccommodationType {
    Hotel,
    Hostel,
    Airbnb,
}

impl AccommodationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccommodationType::Hotel => "hotel",
            AccommodationType::Hostel => "hostel",
            AccommodationType::Airbnb => "airbnb",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TransportLeg {
    pub from: String,
    pub to: String,
    /// Mode of transport, e.g. "Taxi", "Metro"
    pub method: String,
    #[schemars(range(min = 0))]
    pub cost: f64,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Recommendations {
    pub must_visit: Vec<String>,
    pub hidden_gems: Vec<String>,
    pub local_tips: Vec<String>,
    pub money_saving_tips: Vec<String>,
    pub safety_tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Alternatives {
    /// Suggestions if the budget needs to be reduced
    pub budget_friendly: String,
    /// Suggestions if the budget can be increased
    pub luxury_upgrades: String,
    /// Indoor alternatives for bad weather
    pub weather_backup: Vec<String>,
}
