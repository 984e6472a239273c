//! Flat, row-per-line-item views of an itinerary for tabular export.

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    error::{PlannerError, Result},
    types::itinerary::{DayPlan, Itinerary, Priority},
};

/// Column headers of the itinerary CSV, in order.
pub const EXPORT_COLUMNS: [&str; 14] = [
    "Day",
    "Date",
    "Theme",
    "Daily_Total",
    "Type",
    "Time",
    "Item",
    "Location",
    "Cost",
    "Duration",
    "Priority",
    "Tips",
    "Cuisine",
    "Rating",
];

/// Column headers of the expense breakdown CSV, in order.
pub const EXPENSE_COLUMNS: [&str; 7] = [
    "Day", "Date", "Category", "Item", "Cost", "Location", "Priority",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowKind {
    Activity,
    Meal,
    Transport,
    Accommodation,
}

/// One itinerary line item with its parent day's fields repeated for join-back.
///
/// Columns that do not apply to the row's kind are `None` and export as empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Day")]
    pub day: u32,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Theme")]
    pub theme: String,
    #[serde(rename = "Daily_Total")]
    pub daily_total: f64,
    #[serde(rename = "Type")]
    pub kind: RowKind,
    #[serde(rename = "Time")]
    pub time: Option<String>,
    #[serde(rename = "Item")]
    pub item: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Cost")]
    pub cost: f64,
    #[serde(rename = "Duration")]
    pub duration: Option<String>,
    #[serde(rename = "Priority")]
    pub priority: Option<Priority>,
    #[serde(rename = "Tips")]
    pub tips: Option<String>,
    #[serde(rename = "Cuisine")]
    pub cuisine: Option<String>,
    #[serde(rename = "Rating")]
    pub rating: Option<f64>,
}

impl ExportRow {
    fn for_day(day: &DayPlan, kind: RowKind, item: String, location: String, cost: f64) -> Self {
        Self {
            day: day.day,
            date: day.date,
            theme: day.theme.clone(),
            daily_total: day.daily_total,
            kind,
            time: None,
            item,
            location,
            cost,
            duration: None,
            priority: None,
            tips: None,
            cuisine: None,
            rating: None,
        }
    }
}

/// Flatten an itinerary into rows: per day, activities, then meals, then
/// transport legs, then the night's accommodation.
pub fn to_rows(itinerary: &Itinerary) -> Vec<ExportRow> {
    let mut rows = Vec::new();

    for day in &itinerary.daily_itinerary {
        for activity in &day.activities {
            let mut row = ExportRow::for_day(
                day,
                RowKind::Activity,
                activity.activity.clone(),
                activity.location.clone(),
                activity.cost,
            );
            row.time = Some(activity.time.clone());
            row.duration = Some(activity.duration.clone());
            row.priority = Some(activity.priority);
            row.tips = Some(activity.tips.clone());
            rows.push(row);
        }

        for meal in &day.meals {
            let mut row = ExportRow::for_day(
                day,
                RowKind::Meal,
                format!("{} at {}", meal.meal.title(), meal.restaurant),
                meal.location.clone(),
                meal.cost,
            );
            row.cuisine = Some(meal.cuisine.clone());
            row.rating = Some(meal.rating);
            rows.push(row);
        }

        for leg in &day.transport {
            let mut row = ExportRow::for_day(
                day,
                RowKind::Transport,
                format!("{} to {}", leg.from, leg.to),
                leg.method.clone(),
                leg.cost,
            );
            row.duration = Some(leg.duration.clone());
            rows.push(row);
        }

        let stay = &day.accommodation;
        let mut row = ExportRow::for_day(
            day,
            RowKind::Accommodation,
            stay.name.clone(),
            stay.location.clone(),
            stay.cost_per_night,
        );
        row.rating = Some(stay.rating);
        rows.push(row);
    }

    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExpenseCategory {
    Activity,
    Food,
    Accommodation,
    Transport,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 4] = [
        ExpenseCategory::Activity,
        ExpenseCategory::Food,
        ExpenseCategory::Accommodation,
        ExpenseCategory::Transport,
    ];
}

/// Line item in the expense breakdown table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseRow {
    #[serde(rename = "Day")]
    pub day: u32,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Category")]
    pub category: ExpenseCategory,
    #[serde(rename = "Item")]
    pub item: String,
    #[serde(rename = "Cost")]
    pub cost: f64,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Priority")]
    pub priority: Priority,
}

/// Expense breakdown: every costed item of every day. Meals and lodging are
/// always high priority, transport medium.
pub fn expense_rows(itinerary: &Itinerary) -> Vec<ExpenseRow> {
    let mut rows = Vec::new();

    for day in &itinerary.daily_itinerary {
        let row = |category, item: String, cost, location: &str, priority| ExpenseRow {
            day: day.day,
            date: day.date,
            category,
            item,
            cost,
            location: location.to_string(),
            priority,
        };

        for activity in &day.activities {
            rows.push(row(
                ExpenseCategory::Activity,
                activity.activity.clone(),
                activity.cost,
                &activity.location,
                activity.priority,
            ));
        }
        for meal in &day.meals {
            rows.push(row(
                ExpenseCategory::Food,
                format!("{} at {}", meal.meal.title(), meal.restaurant),
                meal.cost,
                &meal.location,
                Priority::High,
            ));
        }
        rows.push(row(
            ExpenseCategory::Accommodation,
            day.accommodation.name.clone(),
            day.accommodation.cost_per_night,
            &day.accommodation.location,
            Priority::High,
        ));
        for leg in &day.transport {
            rows.push(row(
                ExpenseCategory::Transport,
                format!("{} to {}", leg.from, leg.to),
                leg.cost,
                &leg.method,
                Priority::Medium,
            ));
        }
    }

    rows
}

/// Sum of line-item costs per expense category, in [`ExpenseCategory::ALL`] order.
pub fn line_item_totals(itinerary: &Itinerary) -> Vec<(ExpenseCategory, f64)> {
    let rows = expense_rows(itinerary);
    ExpenseCategory::ALL
        .iter()
        .map(|category| {
            let total = rows
                .iter()
                .filter(|row| row.category == *category)
                .map(|row| row.cost)
                .sum();
            (*category, total)
        })
        .collect()
}

/// Write itinerary rows as CSV. The header is written even when there are no rows.
pub fn write_csv<W: Write>(rows: &[ExportRow], writer: W) -> Result<()> {
    write_table(&EXPORT_COLUMNS, rows, writer)
}

pub fn write_expense_csv<W: Write>(rows: &[ExpenseRow], writer: W) -> Result<()> {
    write_table(&EXPENSE_COLUMNS, rows, writer)
}

/// Render itinerary rows to a CSV string.
pub fn to_csv_string(rows: &[ExportRow]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|err| PlannerError::Unknown(format!("CSV output was not UTF-8: {err}")))
}

fn write_table<W: Write, T: Serialize>(header: &[&str], rows: &[T], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(header)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
