//! Data source seam for the availability resolver.
//!
//! The resolver only needs three reads. Anything that can answer them (the `SeaORM`
//! database, an in-memory fake in tests, a remote API client) can drive it.

use crate::{
    core::{
        appointment::AppointmentStatus,
        availability::{BookedInterval, DateOverride, WeeklyRule},
    },
    entities::{
        Appointment, ScheduleOverride, WeeklyAvailability, appointment, schedule_override,
        weekly_availability,
    },
    errors::Result,
};
use chrono::{Days, NaiveDate};
use sea_orm::{DatabaseConnection, QueryOrder, QuerySelect, prelude::*};
use tracing::debug;

/// The reads the availability resolver depends on.
pub trait AvailabilitySource {
    /// All weekly rows for a barber, one per configured weekday.
    fn weekly_availability(
        &self,
        barber_id: i64,
    ) -> impl Future<Output = Result<Vec<WeeklyRule>>> + Send;

    /// Overrides for a barber with `from <= date <= to`.
    fn schedule_overrides(
        &self,
        barber_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl Future<Output = Result<Vec<DateOverride>>> + Send;

    /// Non-cancelled appointments for a barber starting within `date` (00:00 to 24:00).
    fn booked_intervals(
        &self,
        barber_id: i64,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<BookedInterval>>> + Send;
}

/// [`AvailabilitySource`] backed by the application database.
#[derive(Debug, Clone, Copy)]
pub struct SeaOrmSource<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SeaOrmSource<'a> {
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

impl AvailabilitySource for SeaOrmSource<'_> {
    async fn weekly_availability(&self, barber_id: i64) -> Result<Vec<WeeklyRule>> {
        let rows = WeeklyAvailability::find()
            .filter(weekly_availability::Column::BarberId.eq(barber_id))
            .order_by_asc(weekly_availability::Column::DayOfWeek)
            .all(self.db)
            .await?;

        debug!(barber_id, rows = rows.len(), "Fetched weekly availability");
        rows.into_iter().map(WeeklyRule::try_from).collect()
    }

    async fn schedule_overrides(
        &self,
        barber_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DateOverride>> {
        let rows = ScheduleOverride::find()
            .filter(schedule_override::Column::BarberId.eq(barber_id))
            .filter(schedule_override::Column::Date.gte(from))
            .filter(schedule_override::Column::Date.lte(to))
            .order_by_asc(schedule_override::Column::Date)
            .all(self.db)
            .await?;

        debug!(barber_id, %from, %to, rows = rows.len(), "Fetched schedule overrides");
        Ok(rows.into_iter().map(DateOverride::from).collect())
    }

    async fn booked_intervals(
        &self,
        barber_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<BookedInterval>> {
        let day_start = date.and_time(chrono::NaiveTime::MIN);
        let next_day_start = date
            .checked_add_days(Days::new(1))
            .map_or(chrono::NaiveDateTime::MAX, |next| next.and_time(chrono::NaiveTime::MIN));

        let rows: Vec<(DateTime, DateTime, String)> = Appointment::find()
            .select_only()
            .column(appointment::Column::StartTime)
            .column(appointment::Column::EndTime)
            .column(appointment::Column::Status)
            .filter(appointment::Column::BarberId.eq(barber_id))
            .filter(appointment::Column::StartTime.gte(day_start))
            .filter(appointment::Column::StartTime.lt(next_day_start))
            .filter(appointment::Column::Status.ne(AppointmentStatus::Cancelled.as_str()))
            .order_by_asc(appointment::Column::StartTime)
            .into_tuple()
            .all(self.db)
            .await?;

        debug!(barber_id, %date, rows = rows.len(), "Fetched booked intervals");
        let mut booked = Vec::with_capacity(rows.len());
        for (start_time, end_time, status) in rows {
            // Unknown statuses fail the query instead of guessing whether they block.
            if status.parse::<AppointmentStatus>()?.blocks_slot() {
                booked.push(BookedInterval {
                    start_time,
                    end_time,
                });
            }
        }
        Ok(booked)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::availability::AvailabilityResolver;
    use crate::errors::Error;
    use crate::test_utils::*;
    use chrono::NaiveTime;

    fn at(day: NaiveDate, hour: u32) -> chrono::NaiveDateTime {
        day.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn test_booked_intervals_skip_cancelled_and_other_days() -> Result<()> {
        let (db, barber, service) = setup_with_barber_and_service().await?;
        let day = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();

        create_test_appointment(&db, barber.id, service.id, at(day, 10)).await?;
        let cancelled = create_test_appointment(&db, barber.id, service.id, at(day, 11)).await?;
        crate::core::appointment::update_appointment_status(
            &db,
            cancelled.id,
            AppointmentStatus::Cancelled,
        )
        .await?;
        create_test_appointment(&db, barber.id, service.id, at(day.succ_opt().unwrap(), 10))
            .await?;

        let booked = SeaOrmSource::new(&db).booked_intervals(barber.id, day).await?;
        assert_eq!(booked.len(), 1);
        assert_eq!(booked[0].start_time, at(day, 10));
        Ok(())
    }

    #[tokio::test]
    async fn test_cancelled_appointment_leaves_slot_open() -> Result<()> {
        let (db, barber, service) = setup_with_barber_and_service().await?;
        let day = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
        set_tuesday_hours(&db, barber.id).await?;

        let appointment = create_test_appointment(&db, barber.id, service.id, at(day, 13)).await?;
        let resolver = AvailabilityResolver::new(SeaOrmSource::new(&db));

        let taken = resolver.compute_slots(barber.id, day).await?;
        assert!(!taken.iter().find(|s| s.hour() == 13).unwrap().is_available);

        crate::core::appointment::update_appointment_status(
            &db,
            appointment.id,
            AppointmentStatus::Cancelled,
        )
        .await?;
        let freed = resolver.compute_slots(barber.id, day).await?;
        assert!(freed.iter().all(|slot| slot.is_available));
        Ok(())
    }

    #[tokio::test]
    async fn test_overrides_are_limited_to_range() -> Result<()> {
        let (db, barber) = setup_with_barber().await?;
        let first = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let outside = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        close_day(&db, barber.id, first).await?;
        close_day(&db, barber.id, outside).await?;

        let rows = SeaOrmSource::new(&db)
            .schedule_overrides(barber.id, first, NaiveDate::from_ymd_opt(2026, 3, 31).unwrap())
            .await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, first);
        Ok(())
    }

    #[tokio::test]
    async fn test_out_of_range_weekday_is_rejected_on_ingestion() -> Result<()> {
        use sea_orm::{ActiveModelTrait, Set};

        let (db, barber) = setup_with_barber().await?;
        weekly_availability::ActiveModel {
            barber_id: Set(barber.id),
            day_of_week: Set(9),
            is_available: Set(true),
            start_time: Set(NaiveTime::from_hms_opt(9, 0, 0).unwrap()),
            end_time: Set(NaiveTime::from_hms_opt(17, 0, 0).unwrap()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let resolver = AvailabilityResolver::new(SeaOrmSource::new(&db));
        let result = resolver
            .list_bookable_dates(
                barber.id,
                NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 3, 7).unwrap(),
            )
            .await;
        assert!(matches!(
            result,
            Err(Error::DataFetch {
                query: "weekly availability",
                ..
            })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_fails_slot_query() -> Result<()> {
        use sea_orm::{ActiveModelTrait, Set};

        let (db, barber, service) = setup_with_barber_and_service().await?;
        let day = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
        set_tuesday_hours(&db, barber.id).await?;
        let booked = create_test_appointment(&db, barber.id, service.id, at(day, 10)).await?;

        let mut row: appointment::ActiveModel = booked.into();
        row.status = Set("no-show".to_string());
        row.update(&db).await?;

        let resolver = AvailabilityResolver::new(SeaOrmSource::new(&db));
        assert!(matches!(
            resolver.compute_slots(barber.id, day).await,
            Err(Error::DataFetch {
                query: "appointments",
                ..
            })
        ));
        Ok(())
    }
}
