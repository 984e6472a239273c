pub mod itinerary;
pub mod outcome;
pub mod preferences;

pub use itinerary::{
    Accommodation, AccommodationType, Activity, Alternatives, CostBreakdown, CostCategory,
    DayPlan, Itinerary, Meal, MealType, Priority, Recommendations, TransportLeg, TripSummary,
};
pub use outcome::{FallbackReason, PlanOutcome, PlanSource, TokenUsage, FALLBACK_NOTICE};
pub use preferences::{
    Companions, FoodPreference, Interest, PreferencesBuilder, TravelPreferences, TravelStyle,
};
