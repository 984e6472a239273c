//! trip-planner-rs: typed, schema-validated LLM trip planning
//!
//! Builds a prompt from traveler preferences, asks an OpenAI-compatible model
//! for a JSON itinerary, validates the answer against the itinerary schema and
//! falls back to a deterministic template itinerary whenever the call fails,
//! times out or returns something unusable.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use trip_planner_rs::{Interest, PlannerConfig, TravelPreferences, TripPlanner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let start = chrono::NaiveDate::from_ymd_opt(2025, 6, 1).ok_or("bad date")?;
//!     let prefs = TravelPreferences::builder("Paris, France", start)
//!         .budget(2000.0)
//!         .duration(7)
//!         .priority(Interest::Museums)
//!         .build()?;
//!
//!     let planner = TripPlanner::from_config(&PlannerConfig::from_env()?)?;
//!     let outcome = planner.plan(&prefs).await;
//!     println!("{}", outcome.summary());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod report;
pub mod schemas;
pub mod services;
pub mod types;

pub use config::{PlannerConfig, PreferenceLimits};
pub use core::{PlanState, TripPlanner, TripSession};
pub use error::{ParseError, PlannerError, Result};
pub use report::BudgetOverview;
pub use schemas::{CompletionSchema, SchemaHandle};
pub use services::{
    generate_fallback_itinerary, generate_itinerary_prompt, parse_itinerary, Completion,
    ItineraryBackend, OpenAIClient, StaticBackend,
};
pub use types::{
    Companions, FallbackReason, FoodPreference, Interest, Itinerary, PlanOutcome, PlanSource,
    TokenUsage, TravelPreferences, TravelStyle,
};

#[cfg(feature = "cli")]
pub mod cli;
