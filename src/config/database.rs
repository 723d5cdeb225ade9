//! Database configuration module for `ChairTime`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs without hand-written SQL.

use crate::entities::{
    Appointment, Barber, ScheduleOverride, Service, WeeklyAvailability, schedule_override,
    weekly_availability,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema, sea_query::Index};
use std::path::Path;
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/chair_time.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable,
/// falling back to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
///
/// For file-backed `SQLite` URLs the parent directory is created first.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    if let Some(dir) = sqlite_parent_dir(&database_url) {
        std::fs::create_dir_all(dir)?;
    }
    info!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

fn sqlite_parent_dir(database_url: &str) -> Option<&Path> {
    let path = database_url.strip_prefix("sqlite://")?;
    let path = path.split_once('?').map_or(path, |(path, _)| path);
    Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
}

/// Creates all tables from the entity definitions if they do not exist yet.
///
/// Parents are created before children so the generated foreign keys resolve.
/// Unique indexes then enforce one weekly row per (`barber_id`, `day_of_week`)
/// and one override per (`barber_id`, `date`).
pub async fn create_tables<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut barber_table = schema.create_table_from_entity(Barber);
    let mut service_table = schema.create_table_from_entity(Service);
    let mut weekly_table = schema.create_table_from_entity(WeeklyAvailability);
    let mut override_table = schema.create_table_from_entity(ScheduleOverride);
    let mut appointment_table = schema.create_table_from_entity(Appointment);

    for table in [
        barber_table.if_not_exists(),
        service_table.if_not_exists(),
        weekly_table.if_not_exists(),
        override_table.if_not_exists(),
        appointment_table.if_not_exists(),
    ] {
        db.execute(builder.build(&*table)).await?;
    }

    let weekly_unique = Index::create()
        .name("idx_weekly_availability_barber_day")
        .table(WeeklyAvailability)
        .col(weekly_availability::Column::BarberId)
        .col(weekly_availability::Column::DayOfWeek)
        .unique()
        .if_not_exists()
        .to_owned();
    let override_unique = Index::create()
        .name("idx_schedules_barber_date")
        .table(ScheduleOverride)
        .col(schedule_override::Column::BarberId)
        .col(schedule_override::Column::Date)
        .unique()
        .if_not_exists()
        .to_owned();

    for index in [&weekly_unique, &override_unique] {
        db.execute(builder.build(index)).await?;
    }

    debug!("Database tables ensured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{AppointmentModel, BarberModel, ScheduleOverrideModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<BarberModel> = Barber::find().limit(1).all(&db).await?;
        let _: Vec<ScheduleOverrideModel> = ScheduleOverride::find().limit(1).all(&db).await?;
        let _: Vec<AppointmentModel> = Appointment::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[test]
    fn test_sqlite_parent_dir() {
        assert_eq!(
            sqlite_parent_dir("sqlite://data/chair_time.sqlite?mode=rwc"),
            Some(Path::new("data"))
        );
        assert_eq!(sqlite_parent_dir("sqlite://shop.sqlite"), None);
        assert_eq!(sqlite_parent_dir("sqlite::memory:"), None);
    }

    #[tokio::test]
    async fn test_duplicate_schedule_keys_are_rejected() -> Result<()> {
        use chrono::{NaiveDate, NaiveTime};
        use sea_orm::{ActiveModelTrait, Set};

        let db = crate::test_utils::setup_test_db().await?;
        let barber = crate::test_utils::create_test_barber(&db).await?;
        let nine = NaiveTime::from_hms_opt(9, 0, 0);
        let six = NaiveTime::from_hms_opt(18, 0, 0);

        let weekly_row = || weekly_availability::ActiveModel {
            barber_id: Set(barber.id),
            day_of_week: Set(2),
            is_available: Set(true),
            start_time: Set(nine.unwrap_or(NaiveTime::MIN)),
            end_time: Set(six.unwrap_or(NaiveTime::MIN)),
            ..Default::default()
        };
        weekly_row().insert(&db).await?;
        assert!(weekly_row().insert(&db).await.is_err());

        let date = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap_or_default();
        let override_row = || schedule_override::ActiveModel {
            barber_id: Set(barber.id),
            date: Set(date),
            is_available: Set(false),
            start_time: Set(None),
            end_time: Set(None),
            ..Default::default()
        };
        override_row().insert(&db).await?;
        assert!(override_row().insert(&db).await.is_err());

        // A different weekday for the same barber is still fine
        weekly_availability::ActiveModel {
            day_of_week: Set(3),
            ..weekly_row()
        }
        .insert(&db)
        .await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_repeatable() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
