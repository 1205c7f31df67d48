//! Argument validators shared by the clap parser and the config layer.

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;

use crate::error::{TrackerError, TrackerResult};

lazy_static::lazy_static! {
    static ref TOKEN_PATTERN: Regex = Regex::new(r"^[a-f0-9]{32}$").expect("valid token pattern");
}

/// Stories cannot have been updated before the API existed.
const MIN_YEAR: i32 = 2016;

pub fn validate_token(token: &str) -> TrackerResult<String> {
    if TOKEN_PATTERN.is_match(token) {
        Ok(token.to_string())
    } else {
        Err(TrackerError::InvalidInput(
            "Invalid API token. Expected 32 lowercase hexadecimal characters.".to_string(),
        ))
    }
}

pub fn validate_date(date: &str) -> TrackerResult<String> {
    validate_date_as_of(date, Local::now().date_naive())
}

pub fn validate_date_as_of(date: &str, today: NaiveDate) -> TrackerResult<String> {
    let bytes = date.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(TrackerError::InvalidInput(format!(
            "Invalid date '{}'. The date should be of the format YYYY-MM-DD.",
            date
        )));
    }

    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
        TrackerError::InvalidInput(format!("Invalid date '{}'. No such calendar day.", date))
    })?;

    if parsed.year() < MIN_YEAR {
        return Err(TrackerError::InvalidInput(format!(
            "Invalid date '{}'. The year should be {} or later.",
            date, MIN_YEAR
        )));
    }

    if parsed > today {
        return Err(TrackerError::InvalidInput(format!(
            "Invalid date '{}'. The date should not be in the future.",
            date
        )));
    }

    Ok(date.to_string())
}

/// clap adapters
pub fn token_value_parser(value: &str) -> Result<String, String> {
    validate_token(value).map_err(|e| e.to_string())
}

pub fn date_value_parser(value: &str) -> Result<String, String> {
    validate_date(value).map_err(|e| e.to_string())
}
