//! Seeding the database from the shop configuration.
//!
//! Safe to run on every start: services are matched by name and barbers by email,
//! and anything already present is skipped rather than duplicated or overwritten.

use crate::{
    config::shop::{BarberConfig, ShopConfig},
    core::{
        barber::{self, BarberInput},
        schedule::{self, WeeklyDayInput},
        service::{self, ServiceInput},
    },
    entities::{Barber, Service, barber as barber_entity, service as service_entity},
    errors::Result,
};
use sea_orm::prelude::*;
use tracing::{debug, info};

/// What a seeding run actually inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub services_created: usize,
    pub barbers_created: usize,
    pub weekly_rows_written: usize,
}

/// Inserts configured services and barbers (with weekly hours) that are missing.
pub async fn seed_from_config(db: &DatabaseConnection, config: &ShopConfig) -> Result<SeedSummary> {
    info!(
        "Starting to seed shop data. Found {} services and {} barbers in config.",
        config.services.len(),
        config.barbers.len()
    );
    let mut summary = SeedSummary::default();

    for cfg_service in &config.services {
        let exists = Service::find()
            .filter(service_entity::Column::Name.eq(cfg_service.name.trim()))
            .one(db)
            .await?
            .is_some();
        if exists {
            debug!("Service '{}' already exists. Skipping.", cfg_service.name);
            continue;
        }

        service::create_service(
            db,
            ServiceInput {
                name: cfg_service.name.clone(),
                description: cfg_service.description.clone(),
                duration_minutes: cfg_service.duration_minutes,
                price: cfg_service.price,
            },
        )
        .await?;
        summary.services_created += 1;
    }

    for cfg_barber in &config.barbers {
        let exists = Barber::find()
            .filter(barber_entity::Column::Email.eq(cfg_barber.email.trim()))
            .one(db)
            .await?
            .is_some();
        if exists {
            debug!("Barber '{}' already exists. Skipping.", cfg_barber.email);
            continue;
        }

        summary.weekly_rows_written += seed_barber(db, cfg_barber).await?;
        summary.barbers_created += 1;
    }

    info!(
        services = summary.services_created,
        barbers = summary.barbers_created,
        weekly_rows = summary.weekly_rows_written,
        "Finished seeding shop data"
    );
    Ok(summary)
}

async fn seed_barber(db: &DatabaseConnection, cfg_barber: &BarberConfig) -> Result<usize> {
    let days = cfg_barber
        .hours
        .iter()
        .map(|hours| {
            let (start, end) = hours.window()?;
            Ok(WeeklyDayInput {
                day_of_week: hours.day_of_week,
                is_available: true,
                start_time: Some(start),
                end_time: Some(end),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let created = barber::create_barber(
        db,
        BarberInput {
            first_name: cfg_barber.first_name.clone(),
            last_name: cfg_barber.last_name.clone(),
            email: cfg_barber.email.clone(),
            bio: cfg_barber.bio.clone(),
            specialty: cfg_barber.specialty.clone(),
            profile_img: None,
        },
    )
    .await?;

    let rows = schedule::set_weekly_availability(db, created.id, &days).await?;
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::shop::parse_config;
    use crate::core::availability::AvailabilityResolver;
    use crate::core::source::SeaOrmSource;
    use crate::test_utils::*;
    use chrono::NaiveDate;

    const SHOP: &str = r#"
        [[services]]
        name = "Haircut"
        duration_minutes = 30
        price = 25.0

        [[services]]
        name = "Beard Trim"
        duration_minutes = 15
        price = 12.0

        [[barbers]]
        first_name = "Sam"
        last_name = "Reyes"
        email = "sam@example.com"

        [[barbers.hours]]
        day_of_week = 2
        start = "09:00"
        end = "18:00"

        [[barbers.hours]]
        day_of_week = 4
        start = "12:00"
        end = "20:00"
    "#;

    #[tokio::test]
    async fn test_seed_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let config = parse_config(SHOP)?;

        let first = seed_from_config(&db, &config).await?;
        assert_eq!(
            first,
            SeedSummary {
                services_created: 2,
                barbers_created: 1,
                weekly_rows_written: 2,
            }
        );

        let second = seed_from_config(&db, &config).await?;
        assert_eq!(second, SeedSummary::default());
        Ok(())
    }

    #[tokio::test]
    async fn test_seeded_hours_drive_bookable_dates() -> Result<()> {
        let db = setup_test_db().await?;
        seed_from_config(&db, &parse_config(SHOP)?).await?;
        let barber = barber::get_active_barbers(&db).await?.remove(0);

        let resolver = AvailabilityResolver::new(SeaOrmSource::new(&db));
        let dates = resolver
            .list_bookable_dates(
                barber.id,
                NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 3, 7).unwrap(),
            )
            .await?;
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
                NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            ]
        );
        Ok(())
    }
}
