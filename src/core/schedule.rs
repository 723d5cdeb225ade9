//! Schedule management - Weekly hours and date overrides for each barber.
//!
//! Both tables allow at most one row per key, (`barber_id`, `day_of_week`) for weekly
//! hours and (`barber_id`, `date`) for overrides. Writes here are upserts that look up
//! the existing row first and update it in place, so the key stays unique.

use crate::{
    entities::{
        Barber, ScheduleOverride, WeeklyAvailability, schedule_override, weekly_availability,
    },
    errors::{Error, Result},
};
use chrono::{NaiveDate, NaiveTime};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use tracing::info;

/// Opening time used when a weekly day is saved without one (09:00).
#[must_use]
pub fn default_start() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Closing time used when a weekly day is saved without one (18:00).
#[must_use]
pub fn default_end() -> NaiveTime {
    NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Desired weekly hours for one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WeeklyDayInput {
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u8,
    pub is_available: bool,
    /// Defaults to 09:00
    pub start_time: Option<NaiveTime>,
    /// Defaults to 18:00
    pub end_time: Option<NaiveTime>,
}

impl WeeklyDayInput {
    fn window(&self) -> Result<(NaiveTime, NaiveTime)> {
        if self.day_of_week > 6 {
            return Err(Error::invalid(format!(
                "day_of_week must be 0..=6, got {}",
                self.day_of_week
            )));
        }
        let start = self.start_time.unwrap_or_else(default_start);
        let end = self.end_time.unwrap_or_else(default_end);
        if self.is_available && start >= end {
            return Err(Error::invalid(format!(
                "Opening time {start} must be before closing time {end}"
            )));
        }
        Ok((start, end))
    }
}

/// Desired state for a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct OverrideInput {
    pub is_available: bool,
    /// Required when `is_available` is true
    pub start_time: Option<NaiveTime>,
    /// Required when `is_available` is true
    pub end_time: Option<NaiveTime>,
}

impl OverrideInput {
    /// A date on which the barber does not work.
    #[must_use]
    pub const fn closed() -> Self {
        Self {
            is_available: false,
            start_time: None,
            end_time: None,
        }
    }

    /// A date on which the barber works `start..end`.
    #[must_use]
    pub const fn open(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            is_available: true,
            start_time: Some(start),
            end_time: Some(end),
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.is_available {
            return Ok(());
        }
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) if start < end => Ok(()),
            (Some(start), Some(end)) => Err(Error::invalid(format!(
                "Opening time {start} must be before closing time {end}"
            ))),
            _ => Err(Error::invalid(
                "An available date needs both a start and an end time",
            )),
        }
    }
}

async fn ensure_barber_exists<C>(db: &C, barber_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    Barber::find_by_id(barber_id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or(Error::BarberNotFound { id: barber_id })
}

/// Weekly rows for a barber ordered Sunday to Saturday.
pub async fn get_weekly_availability(
    db: &DatabaseConnection,
    barber_id: i64,
) -> Result<Vec<weekly_availability::Model>> {
    WeeklyAvailability::find()
        .filter(weekly_availability::Column::BarberId.eq(barber_id))
        .order_by_asc(weekly_availability::Column::DayOfWeek)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn upsert_weekly_day<C>(
    db: &C,
    barber_id: i64,
    input: &WeeklyDayInput,
) -> Result<weekly_availability::Model>
where
    C: ConnectionTrait,
{
    let (start, end) = input.window()?;

    let existing = WeeklyAvailability::find()
        .filter(weekly_availability::Column::BarberId.eq(barber_id))
        .filter(weekly_availability::Column::DayOfWeek.eq(i32::from(input.day_of_week)))
        .one(db)
        .await?;

    if let Some(row) = existing {
        let mut active_model: weekly_availability::ActiveModel = row.into();
        active_model.is_available = Set(input.is_available);
        active_model.start_time = Set(start);
        active_model.end_time = Set(end);
        active_model.update(db).await.map_err(Into::into)
    } else {
        weekly_availability::ActiveModel {
            barber_id: Set(barber_id),
            day_of_week: Set(i32::from(input.day_of_week)),
            is_available: Set(input.is_available),
            start_time: Set(start),
            end_time: Set(end),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(Into::into)
    }
}

/// Saves one weekday's hours for a barber.
///
/// Missing times fall back to [`default_start`] and [`default_end`].
///
/// # Arguments
/// * `db` - Database connection
/// * `barber_id` - Barber whose week is edited
/// * `input` - Weekday, open flag and optional times
///
/// # Errors
/// Returns an error if:
/// - `day_of_week` is outside 0..=6, or an open day's start is not before its end
/// - The barber does not exist
/// - The database write fails
pub async fn update_weekly_day(
    db: &DatabaseConnection,
    barber_id: i64,
    input: WeeklyDayInput,
) -> Result<weekly_availability::Model> {
    ensure_barber_exists(db, barber_id).await?;
    let row = upsert_weekly_day(db, barber_id, &input).await?;
    info!(barber_id, day_of_week = input.day_of_week, "Weekly hours saved");
    Ok(row)
}

/// Saves several weekdays at once; either all rows are written or none.
///
/// Weekdays not mentioned in `days` are left untouched.
///
/// # Errors
/// Any invalid day, a missing barber or a failed write rolls back the whole batch
/// and returns the error.
pub async fn set_weekly_availability(
    db: &DatabaseConnection,
    barber_id: i64,
    days: &[WeeklyDayInput],
) -> Result<Vec<weekly_availability::Model>> {
    let txn = db.begin().await?;
    ensure_barber_exists(&txn, barber_id).await?;

    let mut rows = Vec::with_capacity(days.len());
    for day in days {
        rows.push(upsert_weekly_day(&txn, barber_id, day).await?);
    }

    txn.commit().await?;
    info!(barber_id, days = rows.len(), "Weekly hours replaced");
    Ok(rows)
}

/// Overrides for a barber with `from <= date <= to`, ordered by date.
///
/// # Arguments
/// * `db` - Database connection
/// * `barber_id` - Barber whose overrides are listed
/// * `from` - First date to include
/// * `to` - Last date to include
pub async fn get_schedule_overrides(
    db: &DatabaseConnection,
    barber_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<schedule_override::Model>> {
    ScheduleOverride::find()
        .filter(schedule_override::Column::BarberId.eq(barber_id))
        .filter(schedule_override::Column::Date.gte(from))
        .filter(schedule_override::Column::Date.lte(to))
        .order_by_asc(schedule_override::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Opens or closes a single date for a barber, replacing any earlier override.
///
/// # Errors
/// Returns an error if:
/// - The date is marked available without both times, or start is not before end
/// - The barber does not exist
/// - The database write fails
pub async fn upsert_schedule_override(
    db: &DatabaseConnection,
    barber_id: i64,
    date: NaiveDate,
    input: OverrideInput,
) -> Result<schedule_override::Model> {
    input.validate()?;
    ensure_barber_exists(db, barber_id).await?;

    let existing = ScheduleOverride::find()
        .filter(schedule_override::Column::BarberId.eq(barber_id))
        .filter(schedule_override::Column::Date.eq(date))
        .one(db)
        .await?;

    let row = if let Some(row) = existing {
        let mut active_model: schedule_override::ActiveModel = row.into();
        active_model.is_available = Set(input.is_available);
        active_model.start_time = Set(input.start_time);
        active_model.end_time = Set(input.end_time);
        active_model.update(db).await?
    } else {
        schedule_override::ActiveModel {
            barber_id: Set(barber_id),
            date: Set(date),
            is_available: Set(input.is_available),
            start_time: Set(input.start_time),
            end_time: Set(input.end_time),
            ..Default::default()
        }
        .insert(db)
        .await?
    };

    info!(barber_id, %date, is_available = input.is_available, "Schedule override saved");
    Ok(row)
}
