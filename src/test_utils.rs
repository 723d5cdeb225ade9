//! Shared test utilities for `ChairTime`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating barbers, services, schedules and appointments with sensible defaults.

use crate::{
    core::{
        appointment::{self, CustomerDetails, NewAppointment},
        barber::{self, BarberInput},
        schedule::{self, OverrideInput, WeeklyDayInput},
        service::{self, ServiceInput},
    },
    entities,
    errors::Result,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness; safe to call repeatedly.
#[allow(dead_code)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Barber profile fields with only a first name varying.
///
/// # Defaults
/// * `last_name`: "Tester"
/// * `email`: "<first>@example.com" (lowercased)
pub fn barber_input(first_name: &str) -> BarberInput {
    BarberInput {
        first_name: first_name.to_string(),
        last_name: "Tester".to_string(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        bio: None,
        specialty: None,
        profile_img: None,
    }
}

/// Creates an active test barber named "Sam Tester".
pub async fn create_test_barber(db: &DatabaseConnection) -> Result<entities::barber::Model> {
    barber::create_barber(db, barber_input("Sam")).await
}

/// Creates a 60 minute, $30 "Haircut" service.
pub async fn create_test_service(db: &DatabaseConnection) -> Result<entities::service::Model> {
    service::create_service(
        db,
        ServiceInput {
            name: "Haircut".to_string(),
            description: None,
            duration_minutes: 60,
            price: 30.0,
        },
    )
    .await
}

/// Books a pending appointment for a fixed test customer.
pub async fn create_test_appointment(
    db: &DatabaseConnection,
    barber_id: i64,
    service_id: i64,
    start_time: NaiveDateTime,
) -> Result<entities::appointment::Model> {
    appointment::create_appointment(
        db,
        NewAppointment {
            barber_id,
            service_id,
            start_time,
            customer: CustomerDetails {
                first_name: "Test".to_string(),
                last_name: "Customer".to_string(),
                email: "customer@example.com".to_string(),
                phone: None,
            },
        },
    )
    .await
}

/// Opens Tuesdays (day 2) from 09:00 to 18:00.
pub async fn set_tuesday_hours(
    db: &DatabaseConnection,
    barber_id: i64,
) -> Result<entities::weekly_availability::Model> {
    schedule::update_weekly_day(
        db,
        barber_id,
        WeeklyDayInput {
            day_of_week: 2,
            is_available: true,
            start_time: NaiveTime::from_hms_opt(9, 0, 0),
            end_time: NaiveTime::from_hms_opt(18, 0, 0),
        },
    )
    .await
}

/// Closes a single date with an override.
pub async fn close_day(
    db: &DatabaseConnection,
    barber_id: i64,
    date: NaiveDate,
) -> Result<entities::schedule_override::Model> {
    schedule::upsert_schedule_override(db, barber_id, date, OverrideInput::closed()).await
}

/// Sets up a database with one barber.
/// Returns (db, barber) for schedule-related tests.
pub async fn setup_with_barber() -> Result<(DatabaseConnection, entities::barber::Model)> {
    let db = setup_test_db().await?;
    let barber = create_test_barber(&db).await?;
    Ok((db, barber))
}

/// Sets up a database with one barber and one service.
/// Returns (db, barber, service) for booking tests.
pub async fn setup_with_barber_and_service() -> Result<(
    DatabaseConnection,
    entities::barber::Model,
    entities::service::Model,
)> {
    let (db, barber) = setup_with_barber().await?;
    let service = create_test_service(&db).await?;
    Ok((db, barber, service))
}
