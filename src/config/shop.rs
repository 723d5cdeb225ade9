//! Shop configuration loading from config.toml
//!
//! The shop file describes the initial barbers, their weekly hours and the
//! service menu. It is used to seed an empty database on first run.

use crate::errors::{Error, Result};
use chrono::NaiveTime;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct ShopConfig {
    /// Booking window settings
    #[serde(default)]
    pub booking: BookingConfig,
    /// Services to seed
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
    /// Barbers to seed, each with weekly hours
    #[serde(default)]
    pub barbers: Vec<BarberConfig>,
}

/// Settings for how far ahead customers can book
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct BookingConfig {
    /// Number of days, starting today, offered by the date picker
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
        }
    }
}

const fn default_horizon_days() -> u32 {
    30
}

/// Configuration for a single service
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Length in minutes
    pub duration_minutes: i32,
    pub price: f64,
}

/// Configuration for a single barber
#[derive(Debug, Deserialize, Clone)]
pub struct BarberConfig {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    /// Working weekdays; weekdays not listed are closed
    #[serde(default)]
    pub hours: Vec<HoursConfig>,
}

/// Opening hours for one weekday (0 = Sunday .. 6 = Saturday)
#[derive(Debug, Deserialize, Clone)]
pub struct HoursConfig {
    pub day_of_week: u8,
    /// `"HH:MM"`
    pub start: String,
    /// `"HH:MM"`
    pub end: String,
}

impl HoursConfig {
    /// Parses the `"HH:MM"` start and end strings.
    pub fn window(&self) -> Result<(NaiveTime, NaiveTime)> {
        Ok((parse_clock(&self.start)?, parse_clock(&self.end)?))
    }
}

/// Parses a wall-clock time written as `"HH:MM"` or `"HH:MM:SS"`.
pub fn parse_clock(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|e| Error::Config {
            message: format!("Invalid time '{value}': {e}"),
        })
}

/// Loads shop configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ShopConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load shop configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents)
}

/// Parses shop configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<ShopConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads shop configuration from `SHOP_CONFIG`, or `./config.toml` when unset.
pub fn load_default_config() -> Result<ShopConfig> {
    let path = std::env::var("SHOP_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    load_config(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_shop_config() {
        let toml_str = r#"
            [booking]
            horizon_days = 14

            [[services]]
            name = "Haircut"
            duration_minutes = 30
            price = 25.0

            [[barbers]]
            first_name = "Sam"
            last_name = "Reyes"
            email = "sam@example.com"

            [[barbers.hours]]
            day_of_week = 2
            start = "09:00"
            end = "18:00"
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.booking.horizon_days, 14);
        assert_eq!(config.services.len(), 1);
        assert_eq!(config.services[0].price, 25.0);
        assert_eq!(config.barbers[0].hours.len(), 1);

        let (start, end) = config.barbers[0].hours[0].window().unwrap();
        assert_eq!(start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(end, NaiveTime::from_hms_opt(18, 0, 0).unwrap());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.booking.horizon_days, 30);
        assert!(config.barbers.is_empty());
        assert!(config.services.is_empty());
    }

    #[test]
    fn test_parse_clock_rejects_garbage() {
        assert!(matches!(parse_clock("nine"), Err(Error::Config { .. })));
        assert_eq!(
            parse_clock("13:30:00").unwrap(),
            NaiveTime::from_hms_opt(13, 30, 0).unwrap()
        );
    }
}
