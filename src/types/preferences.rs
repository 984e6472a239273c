use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Implements `label`, `ALL`, `Display`, `FromStr` and label-based serde for a
/// fieldless enum. Parsing is case-insensitive and accepts the listed aliases.
macro_rules! labelled_enum {
    ($name:ident { $($variant:ident => $label:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = PlannerError;

            fn from_str(raw: &str) -> Result<Self> {
                let wanted = raw.trim();
                $(
                    if wanted.eq_ignore_ascii_case($label)
                        $(|| wanted.eq_ignore_ascii_case($alias))*
                    {
                        return Ok($name::$variant);
                    }
                )+
                Err(PlannerError::InvalidPreferences(format!(
                    "unknown {} `{}`",
                    stringify!($name),
                    raw
                )))
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelStyle {
    Budget,
    MidRange,
    Luxury,
}

labelled_enum!(TravelStyle {
    Budget => "budget",
    MidRange => "mid-range" | "mid range" | "midrange",
    Luxury => "luxury",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodPreference {
    NoRestrictions,
    Vegetarian,
    Halal,
    Vegan,
    GlutenFree,
    Kosher,
}

labelled_enum!(FoodPreference {
    NoRestrictions => "no restrictions" | "none",
    Vegetarian => "vegetarian",
    Halal => "halal",
    Vegan => "vegan",
    GlutenFree => "gluten-free" | "gluten free",
    Kosher => "kosher",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Companions {
    Solo,
    Couple,
    Family,
    Group,
}

labelled_enum!(Companions {
    Solo => "solo",
    Couple => "couple",
    Family => "family" | "family (2-4)",
    Group => "group" | "group (5+)",
});

/// Interest tags a traveler can prioritise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Interest {
    HistoricalSites,
    Museums,
    NatureHiking,
    Beaches,
    Shopping,
    Nightlife,
    FoodTours,
    AdventureSports,
    Photography,
    LocalCulture,
    Architecture,
    Wildlife,
}

labelled_enum!(Interest {
    HistoricalSites => "Historical Sites",
    Museums => "Museums",
    NatureHiking => "Nature/Hiking" | "nature" | "hiking",
    Beaches => "Beaches",
    Shopping => "Shopping",
    Nightlife => "Nightlife",
    FoodTours => "Food Tours",
    AdventureSports => "Adventure Sports",
    Photography => "Photography",
    LocalCulture => "Local Culture",
    Architecture => "Architecture",
    Wildlife => "Wildlife",
});

/// Immutable trip inputs.
///
/// Construction goes through [`PreferencesBuilder::build`] (or deserialization,
/// which runs the same checks), so every value holds `budget > 0`,
/// `duration >= 1`, a non-empty destination and at least one priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPreferences")]
pub struct TravelPreferences {
    budget: f64,
    destination: String,
    duration: u32,
    travel_style: TravelStyle,
    food_preference: FoodPreference,
    priorities: Vec<Interest>,
    companions: Companions,
    flexible_budget: bool,
    start_date: NaiveDate,
}

impl TravelPreferences {
    pub fn builder(destination: impl Into<String>, start_date: NaiveDate) -> PreferencesBuilder {
        PreferencesBuilder::new(destination, start_date)
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn travel_style(&self) -> TravelStyle {
        self.travel_style
    }

    pub fn food_preference(&self) -> FoodPreference {
        self.food_preference
    }

    pub fn priorities(&self) -> &[Interest] {
        &self.priorities
    }

    pub fn companions(&self) -> Companions {
        self.companions
    }

    pub fn flexible_budget(&self) -> bool {
        self.flexible_budget
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Budget available per day of the trip.
    pub fn daily_budget(&self) -> f64 {
        self.budget / f64::from(self.duration)
    }

    /// The `duration` consecutive calendar dates of the trip.
    pub fn trip_dates(&self) -> Vec<NaiveDate> {
        self.start_date
            .iter_days()
            .take(self.duration as usize)
            .collect()
    }

    /// Copy of these preferences with the budget scaled by `multiplier`.
    pub fn with_budget_multiplier(&self, multiplier: f64) -> Result<Self> {
        PreferencesBuilder::from(self.clone())
            .budget(self.budget * multiplier)
            .build()
    }
}

/// Builder for [`TravelPreferences`], seeded with the planning form's defaults.
#[derive(Debug, Clone)]
pub struct PreferencesBuilder {
    budget: f64,
    destination: String,
    duration: u32,
    travel_style: TravelStyle,
    food_preference: FoodPreference,
    priorities: Vec<Interest>,
    companions: Companions,
    flexible_budget: bool,
    start_date: NaiveDate,
}

impl PreferencesBuilder {
    pub fn new(destination: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            budget: 2000.0,
            destination: destination.into(),
            duration: 7,
            travel_style: TravelStyle::MidRange,
            food_preference: FoodPreference::NoRestrictions,
            priorities: Vec::new(),
            companions: Companions::Solo,
            flexible_budget: false,
            start_date,
        }
    }

    pub fn budget(mut self, budget: f64) -> Self {
        self.budget = budget;
        self
    }

    pub fn duration(mut self, days: u32) -> Self {
        self.duration = days;
        self
    }

    pub fn travel_style(mut self, style: TravelStyle) -> Self {
        self.travel_style = style;
        self
    }

    pub fn food_preference(mut self, food: FoodPreference) -> Self {
        self.food_preference = food;
        self
    }

    pub fn priority(mut self, interest: Interest) -> Self {
        self.priorities.push(interest);
        self
    }

    pub fn priorities(mut self, interests: impl IntoIterator<Item = Interest>) -> Self {
        self.priorities.extend(interests);
        self
    }

    pub fn companions(mut self, companions: Companions) -> Self {
        self.companions = companions;
        self
    }

    pub fn flexible_budget(mut self, flexible: bool) -> Self {
        self.flexible_budget = flexible;
        self
    }

    pub fn build(self) -> Result<TravelPreferences> {
        if !self.budget.is_finite() || self.budget <= 0.0 {
            return Err(PlannerError::InvalidPreferences(format!(
                "budget must be a positive amount, got {}",
                self.budget
            )));
        }
        if self.duration == 0 {
            return Err(PlannerError::InvalidPreferences(
                "duration must be at least 1 day".to_string(),
            ));
        }
        if self
            .start_date
            .checked_add_days(Days::new(u64::from(self.duration - 1)))
            .is_none()
        {
            return Err(PlannerError::InvalidPreferences(format!(
                "a {}-day trip starting {} ends past the last representable date",
                self.duration, self.start_date
            )));
        }
        let destination = self.destination.trim().to_string();
        if destination.is_empty() {
            return Err(PlannerError::InvalidPreferences(
                "destination is required".to_string(),
            ));
        }

        let mut priorities = Vec::with_capacity(self.priorities.len());
        for interest in self.priorities {
            if !priorities.contains(&interest) {
                priorities.push(interest);
            }
        }
        if priorities.is_empty() {
            return Err(PlannerError::InvalidPreferences(
                "at least one priority is required".to_string(),
            ));
        }

        Ok(TravelPreferences {
            budget: self.budget,
            destination,
            duration: self.duration,
            travel_style: self.travel_style,
            food_preference: self.food_preference,
            priorities,
            companions: self.companions,
            flexible_budget: self.flexible_budget,
            start_date: self.start_date,
        })
    }
}

impl From<TravelPreferences> for PreferencesBuilder {
    fn from(prefs: TravelPreferences) -> Self {
        Self {
            budget: prefs.budget,
            destination: prefs.destination,
            duration: prefs.duration,
            travel_style: prefs.travel_style,
            food_preference: prefs.food_preference,
            priorities: prefs.priorities,
            companions: prefs.companions,
            flexible_budget: prefs.flexible_budget,
            start_date: prefs.start_date,
        }
    }
}

#[derive(Deserialize)]
struct RawPreferences {
    budget: f64,
    destination: String,
    duration: u32,
    travel_style: TravelStyle,
    food_preference: FoodPreference,
    priorities: Vec<Interest>,
    companions: Companions,
    #[serde(default)]
    flexible_budget: bool,
    start_date: NaiveDate,
}

impl TryFrom<RawPreferences> for TravelPreferences {
    type Error = PlannerError;

    fn try_from(raw: RawPreferences) -> Result<Self> {
        PreferencesBuilder::new(raw.destination, raw.start_date)
            .budget(raw.budget)
            .duration(raw.duration)
            .travel_style(raw.travel_style)
            .food_preference(raw.food_preference)
            .priorities(raw.priorities)
            .companions(raw.companions)
            .flexible_budget(raw.flexible_budget)
            .build()
    }
}
