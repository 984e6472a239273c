//! Display helpers: currency symbols, category labels and emoji lookups.

use crate::types::itinerary::{CostCategory, MealType, Priority};

/// Display symbol for a 3-letter currency code. Unknown codes get `$`.
pub fn currency_symbol(code: &str) -> &'static str {
    match code.trim().to_ascii_uppercase().as_str() {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "CAD" => "C$",
        "AUD" => "A$",
        "INR" => "₹",
        _ => "$",
    }
}

/// Format an amount with its currency symbol, thousands separators and two
/// decimals, e.g. `$1,234.50`.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let symbol = currency_symbol(currency);
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{cents}")
}

/// Title-cased label for a cost category ("Local Transport").
pub fn category_label(category: CostCategory) -> &'static str {
    match category {
        CostCategory::Flights => "Flights",
        CostCategory::Accommodation => "Accommodation",
        CostCategory::Food => "Food",
        CostCategory::Attractions => "Attractions",
        CostCategory::LocalTransport => "Local Transport",
        CostCategory::Miscellaneous => "Miscellaneous",
    }
}

pub fn priority_emoji(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "🔥",
        Priority::Medium => "⭐",
        Priority::Low => "💡",
    }
}

pub fn meal_emoji(meal: MealType) -> &'static str {
    match meal {
        MealType::Breakfast => "🍳",
        MealType::Lunch => "🍽",
        MealType::Dinner => "🍷",
        MealType::Snack => "🥨",
    }
}

/// Emoji for a free-text transport method; anything unrecognised is a car.
pub fn transport_emoji(method: &str) -> &'static str {
    match method.trim().to_ascii_lowercase().as_str() {
        "flight" | "plane" => "✈️",
        "train" => "🚂",
        "bus" => "🚌",
        "taxi" => "🚕",
        "uber" => "🚗",
        "walking" | "walk" => "🚶",
        "metro" | "subway" => "🚇",
        "boat" | "ferry" => "⛵",
        "bicycle" | "bike" => "🚲",
        _ => "🚗",
    }
}
