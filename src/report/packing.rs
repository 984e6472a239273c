//! Packing checklist and seasonal advice for a trip.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::types::preferences::{Interest, TravelPreferences, TravelStyle};

/// Named group of items to pack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackingSection {
    pub name: &'static str,
    pub items: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackingList {
    pub sections: Vec<PackingSection>,
}

impl PackingList {
    pub fn section(&self, name: &str) -> Option<&PackingSection> {
        self.sections.iter().find(|section| section.name == name)
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|section| section.items.len()).sum()
    }
}

/// Build a packing list from the trip's style, interests and length.
pub fn packing_list(prefs: &TravelPreferences) -> PackingList {
    let mut documents = vec![
        "Passport/ID",
        "Travel insurance",
        "Flight tickets",
        "Hotel confirmations",
        "Driver's license",
        "Emergency contacts",
    ];
    let electronics = vec![
        "Phone charger",
        "Power adapter",
        "Camera",
        "Portable battery",
        "Headphones",
    ];
    let mut clothing = vec![
        "Underwear",
        "Socks",
        "Comfortable shoes",
        "Casual clothes",
        "Sleepwear",
    ];
    let mut hygiene = vec![
        "Toothbrush",
        "Toothpaste",
        "Medications",
        "First aid kit",
        "Sunscreen",
        "Hand sanitizer",
    ];
    let mut general = vec!["Day bag", "Reusable shopping bag"];

    match prefs.travel_style() {
        TravelStyle::Luxury => clothing.extend(["Formal wear", "Dress shoes", "Nice accessories"]),
        TravelStyle::Budget => general.extend(["Reusable water bottle", "Travel towel"]),
        TravelStyle::MidRange => {}
    }

    if prefs.duration() > 7 {
        hygiene.push("Laundry detergent");
    }
    if prefs.flexible_budget() {
        documents.push("Backup credit card");
    }

    let mut sections = vec![
        PackingSection { name: "Documents", items: documents },
        PackingSection { name: "Electronics", items: electronics },
        PackingSection { name: "Clothing", items: clothing },
        PackingSection { name: "Health & Hygiene", items: hygiene },
        PackingSection { name: "General", items: general },
    ];

    let wants = |interest| prefs.priorities().contains(&interest);
    if wants(Interest::Beaches) {
        sections.push(PackingSection {
            name: "Beach",
            items: vec!["Swimwear", "Beach towel", "Flip-flops", "Waterproof bag"],
        });
    }
    if wants(Interest::NatureHiking) {
        sections.push(PackingSection {
            name: "Outdoor",
            items: vec!["Hiking boots", "Backpack", "Weather jacket", "Hat"],
        });
    }
    if wants(Interest::Photography) {
        sections.push(PackingSection {
            name: "Photography",
            items: vec!["Camera batteries", "Memory cards", "Tripod", "Lens cleaning kit"],
        });
    }

    PackingList { sections }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonalAdvice {
    pub clothing: &'static str,
    pub activities: &'static str,
    pub health: &'static str,
}

/// Rough advice for a month (1-12), assuming the northern hemisphere.
pub fn seasonal_advice(month: u32) -> SeasonalAdvice {
    let health = "Pack according to season and climate";
    match month {
        12 | 1 | 2 => SeasonalAdvice {
            clothing: "Pack warm clothes, layers, waterproof jacket",
            activities: "Consider indoor attractions, museums",
            health,
        },
        6..=8 => SeasonalAdvice {
            clothing: "Light clothes, sun protection, comfortable shoes",
            activities: "Early morning or evening outdoor activities",
            health,
        },
        _ => SeasonalAdvice {
            clothing: "Check weather forecast before packing",
            activities: "Have indoor backup plans ready",
            health,
        },
    }
}

pub fn seasonal_advice_for(date: NaiveDate) -> SeasonalAdvice {
    seasonal_advice(date.month())
}
