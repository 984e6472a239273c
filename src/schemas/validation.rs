use crate::{error::ParseError, schemas::SchemaHandle, types::itinerary::Itinerary};
use serde_json::Value;

const MAX_SCHEMA_ERRORS: usize = 3;

/// Relative gap between the breakdown sum and the stated total that is reported.
pub const COST_SUM_TOLERANCE: f64 = 0.01;

/// Validate a decoded payload against a schema
pub(crate) fn validate_structured_payload(
    schema: &SchemaHandle,
    payload: &Value,
) -> Result<(), ParseError> {
    let validator = schema.validator().map_err(|err| {
        ParseError::SchemaViolation(format!(
            "failed to prepare `{}` schema for validation: {}",
            schema.schema_name(),
            err
        ))
    })?;

    if let Err(errors) = validator.validate(payload) {
        let mut details = Vec::new();
        let mut truncated = false;

        for (idx, error) in errors.enumerate() {
            if idx < MAX_SCHEMA_ERRORS {
                let mut path = error.instance_path.to_string();
                if path.is_empty() {
                    path = "<root>".to_string();
                }
                details.push(format!("{}: {}", path, error));
            } else {
                truncated = true;
                break;
            }
        }

        let mut detail_str = if details.is_empty() {
            "payload failed schema validation".to_string()
        } else {
            details.join("; ")
        };

        if truncated {
            detail_str.push_str("; additional errors truncated");
        }

        return Err(ParseError::SchemaViolation(format!(
            "payload does not match `{}` schema: {}",
            schema.schema_name(),
            detail_str
        )));
    }

    Ok(())
}

/// Check the invariants a JSON schema cannot express: the number and numbering
/// of days, and that every amount and rating is a finite number in range.
pub(crate) fn validate_itinerary(
    itinerary: &Itinerary,
    expected_days: u32,
) -> Result<(), ParseError> {
    let days = &itinerary.daily_itinerary;
    if days.len() != expected_days as usize {
        return Err(violation(format!(
            "daily_itinerary has {} days, expected {}",
            days.len(),
            expected_days
        )));
    }

    for (idx, day) in days.iter().enumerate() {
        let expected = idx as u32 + 1;
        if day.day != expected {
            return Err(violation(format!(
                "daily_itinerary[{}].day is {}, expected {}",
                idx, day.day, expected
            )));
        }
    }

    let currency = &itinerary.summary.currency;
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(violation(format!(
            "summary.currency `{}` is not a 3-letter code",
            currency
        )));
    }

    check_amount("summary.total_estimated_cost", itinerary.summary.total_estimated_cost)?;
    for (category, amount) in itinerary.summary.cost_breakdown.iter() {
        check_amount(&format!("summary.cost_breakdown.{}", category), amount)?;
    }

    for (idx, day) in days.iter().enumerate() {
        let at = format!("daily_itinerary[{}]", idx);
        check_amount(&format!("{at}.daily_total"), day.daily_total)?;
        for (i, activity) in day.activities.iter().enumerate() {
            check_amount(&format!("{at}.activities[{i}].cost"), activity.cost)?;
        }
        for (i, meal) in day.meals.iter().enumerate() {
            check_amount(&format!("{at}.meals[{i}].cost"), meal.cost)?;
            check_rating(&format!("{at}.meals[{i}].rating"), meal.rating)?;
        }
        for (i, leg) in day.transport.iter().enumerate() {
            check_amount(&format!("{at}.transport[{i}].cost"), leg.cost)?;
        }
        check_amount(
            &format!("{at}.accommodation.cost_per_night"),
            day.accommodation.cost_per_night,
        )?;
        check_rating(&format!("{at}.accommodation.rating"), day.accommodation.rating)?;
    }

    Ok(())
}

/// Relative difference between the breakdown sum and the stated total, when it
/// exceeds [`COST_SUM_TOLERANCE`].
pub fn cost_sum_discrepancy(itinerary: &Itinerary) -> Option<f64> {
    let stated = itinerary.summary.total_estimated_cost;
    let summed = itinerary.summary.cost_breakdown.sum();
    let scale = stated.abs().max(summed.abs());
    if scale == 0.0 {
        return None;
    }
    let gap = (summed - stated).abs() / scale;
    (gap > COST_SUM_TOLERANCE).then_some(gap)
}

fn check_amount(path: &str, value: f64) -> Result<(), ParseError> {
    if !value.is_finite() || value < 0.0 {
        return Err(violation(format!("{} must be a non-negative amount, got {}", path, value)));
    }
    Ok(())
}

fn check_rating(path: &str, value: f64) -> Result<(), ParseError> {
    if !(0.0..=5.0).contains(&value) {
        return Err(violation(format!("{} must be within 0..=5, got {}", path, value)));
    }
    Ok(())
}

fn violation(detail: String) -> ParseError {
    ParseError::SchemaViolation(detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::CompletionSchema;
    use crate::services::fallback::generate_fallback_itinerary;
    use crate::types::preferences::{Interest, TravelPreferences};
    use chrono::NaiveDate;

    fn three_day_itinerary() -> Itinerary {
        let prefs = TravelPreferences::builder("Kyoto", NaiveDate::from_ymd_opt(2025, 4, 1).unwrap())
            .duration(3)
            .priority(Interest::HistoricalSites)
            .build()
            .unwrap();
        generate_fallback_itinerary(&prefs)
    }

    #[test]
    fn test_fallback_passes_both_layers() {
        let itinerary = three_day_itinerary();
        let value = serde_json::to_value(&itinerary).unwrap();
        assert!(validate_structured_payload(Itinerary::schema(), &value).is_ok());
        assert!(validate_itinerary(&itinerary, 3).is_ok());
    }

    #[test]
    fn test_schema_rejects_missing_key_and_bad_enum() {
        let mut value = serde_json::to_value(three_day_itinerary()).unwrap();
        value.as_object_mut().unwrap().remove("alternatives");
        let err = validate_structured_payload(Itinerary::schema(), &value).unwrap_err();
        assert!(matches!(err, ParseError::SchemaViolation(ref d) if d.contains("alternatives")));

        let mut value = serde_json::to_value(three_day_itinerary()).unwrap();
        value["daily_itinerary"][0]["activities"][0]["priority"] = "urgent".into();
        assert!(validate_structured_payload(Itinerary::schema(), &value).is_err());
    }

    #[test]
    fn test_schema_rejects_negative_cost_and_rating_out_of_range() {
        let mut value = serde_json::to_value(three_day_itinerary()).unwrap();
        value["daily_itinerary"][1]["transport"][0]["cost"] = (-4.0).into();
        assert!(validate_structured_payload(Itinerary::schema(), &value).is_err());

        let mut value = serde_json::to_value(three_day_itinerary()).unwrap();
        value["daily_itinerary"][0]["meals"][0]["rating"] = 7.5.into();
        assert!(validate_structured_payload(Itinerary::schema(), &value).is_err());
    }

    #[test]
    fn test_day_count_and_numbering() {
        let itinerary = three_day_itinerary();
        let err = validate_itinerary(&itinerary, 4).unwrap_err();
        assert!(err.to_string().contains("has 3 days, expected 4"));

        let mut shuffled = itinerary.clone();
        shuffled.daily_itinerary.swap(0, 1);
        assert!(validate_itinerary(&shuffled, 3).is_err());

        let mut duplicated = itinerary;
        duplicated.daily_itinerary[2].day = 2;
        assert!(validate_itinerary(&duplicated, 3).is_err());
    }

    #[test]
    fn test_currency_must_be_three_letters() {
        let mut itinerary = three_day_itinerary();
        itinerary.summary.currency = "US$".into();
        assert!(validate_itinerary(&itinerary, 3).is_err());
    }

    #[test]
    fn test_cost_sum_discrepancy() {
        let mut itinerary = three_day_itinerary();
        assert!(cost_sum_discrepancy(&itinerary).is_none());

        itinerary.summary.total_estimated_cost *= 1.5;
        let gap = cost_sum_discrepancy(&itinerary).unwrap();
        assert!(gap > COST_SUM_TOLERANCE);
    }
}
