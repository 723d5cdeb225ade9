//! Availability resolution - Which dates and hourly slots a barber can be booked for.
//!
//! A day's availability is a pure function of three inputs: the barber's weekly row for
//! that weekday, the override row for that exact date (if any), and the non-cancelled
//! appointments starting on that date. Overrides win outright over the weekly default,
//! in both directions.
//!
//! Slots are one hour wide and aligned to the opening hour. An appointment occupies
//! only the hour bucket its start time falls in; a two-hour service starting at 13:00
//! blocks 13:00 and leaves 14:00 bookable.
//!
//! The resolver never looks at the clock. Hiding slots that are already in the past is
//! done by the caller, see [`crate::core::calendar::disable_past_slots`].

use crate::{
    core::source::AvailabilitySource,
    entities::{schedule_override, weekly_availability},
    errors::{Error, Result},
};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Recurring default hours for one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyRule {
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u8,
    pub is_available: bool,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl TryFrom<weekly_availability::Model> for WeeklyRule {
    type Error = Error;

    fn try_from(row: weekly_availability::Model) -> Result<Self> {
        let day_of_week = u8::try_from(row.day_of_week)
            .ok()
            .filter(|day| *day <= 6)
            .ok_or_else(|| Error::DataFetch {
                query: "weekly availability",
                message: format!(
                    "row {} has day_of_week {} outside 0..=6",
                    row.id, row.day_of_week
                ),
            })?;

        Ok(Self {
            day_of_week,
            is_available: row.is_available,
            start_time: row.start_time,
            end_time: row.end_time,
        })
    }
}

/// A single-date exception to the weekly hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateOverride {
    pub date: NaiveDate,
    pub is_available: bool,
    /// Required when `is_available` is true
    pub start_time: Option<NaiveTime>,
    /// Required when `is_available` is true
    pub end_time: Option<NaiveTime>,
}

impl From<schedule_override::Model> for DateOverride {
    fn from(row: schedule_override::Model) -> Self {
        Self {
            date: row.date,
            is_available: row.is_available,
            start_time: row.start_time,
            end_time: row.end_time,
        }
    }
}

/// The time span of an existing, non-cancelled appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookedInterval {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

/// Which input decided a day's availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DaySource {
    /// A date override exists and was used
    Override,
    /// No override; the weekly row marked the day open
    Weekly,
    /// Neither input opened the day
    Closed,
}

/// Resolved availability of one barber on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayAvailability {
    pub is_available: bool,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub source: DaySource,
}

impl DayAvailability {
    /// A day nobody opened.
    pub const CLOSED: Self = Self {
        is_available: false,
        start_time: None,
        end_time: None,
        source: DaySource::Closed,
    };

    /// Returns the working window of an open day.
    ///
    /// `Ok(None)` means the day is closed. An open day without both times is
    /// reported as [`Error::MalformedSchedule`].
    pub fn window(
        &self,
        barber_id: i64,
        date: NaiveDate,
    ) -> Result<Option<(NaiveTime, NaiveTime)>> {
        if !self.is_available {
            return Ok(None);
        }
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Ok(Some((start, end))),
            _ => Err(Error::MalformedSchedule { barber_id, date }),
        }
    }
}

/// One bookable hour on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slot {
    /// Always on an hour boundary
    pub start_time: NaiveTime,
    /// False when an existing appointment starts in this hour
    pub is_available: bool,
}

impl Slot {
    #[must_use]
    pub fn hour(&self) -> u32 {
        self.start_time.hour()
    }
}

/// Weekday index with Sunday as 0, matching `weekly_availability.day_of_week`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn day_of_week(date: NaiveDate) -> u8 {
    // num_days_from_sunday is always in 0..=6
    date.weekday().num_days_from_sunday() as u8
}

/// Applies the override-then-weekly precedence for a single date.
///
/// 1. An override decides on its own, open or closed, with its own times.
/// 2. Otherwise an available weekly row opens the day with the weekly times.
/// 3. Otherwise the day is closed.
#[must_use]
pub fn resolve_day(
    weekly: Option<&WeeklyRule>,
    date_override: Option<&DateOverride>,
) -> DayAvailability {
    if let Some(exception) = date_override {
        return DayAvailability {
            is_available: exception.is_available,
            start_time: exception.start_time.filter(|_| exception.is_available),
            end_time: exception.end_time.filter(|_| exception.is_available),
            source: DaySource::Override,
        };
    }

    match weekly {
        Some(rule) if rule.is_available => DayAvailability {
            is_available: true,
            start_time: Some(rule.start_time),
            end_time: Some(rule.end_time),
            source: DaySource::Weekly,
        },
        _ => DayAvailability::CLOSED,
    }
}

/// Splits `[start, end)` into hourly slots and marks the ones already taken.
///
/// A slot exists for every hour `h` with `start.hour() <= h < end.hour()`. Only
/// intervals starting on `date` are considered, and each blocks the single hour
/// bucket of its start time.
#[must_use]
pub fn hourly_slots(
    date: NaiveDate,
    window: (NaiveTime, NaiveTime),
    booked: &[BookedInterval],
) -> Vec<Slot> {
    let (start, end) = window;
    let taken: HashSet<u32> = booked
        .iter()
        .filter(|interval| interval.start_time.date() == date)
        .map(|interval| interval.start_time.hour())
        .collect();

    (start.hour()..end.hour())
        .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
        .map(|start_time| Slot {
            start_time,
            is_available: !taken.contains(&start_time.hour()),
        })
        .collect()
}

/// A barber's weekly rows and overrides indexed for per-date lookups.
///
/// Built once from bulk-fetched rows; if the store returns duplicates for a weekday
/// or a date, the last row wins.
#[derive(Debug, Clone, Default)]
pub struct ScheduleSnapshot {
    weekly: HashMap<u8, WeeklyRule>,
    overrides: HashMap<NaiveDate, DateOverride>,
}

impl ScheduleSnapshot {
    #[must_use]
    pub fn new(weekly: Vec<WeeklyRule>, overrides: Vec<DateOverride>) -> Self {
        Self {
            weekly: weekly
                .into_iter()
                .map(|rule| (rule.day_of_week, rule))
                .collect(),
            overrides: overrides
                .into_iter()
                .map(|exception| (exception.date, exception))
                .collect(),
        }
    }

    /// Resolves one date against the snapshot.
    #[must_use]
    pub fn resolve(&self, date: NaiveDate) -> DayAvailability {
        resolve_day(
            self.weekly.get(&day_of_week(date)),
            self.overrides.get(&date),
        )
    }

    /// Every date in `[start, end]` that resolves as available, ascending.
    ///
    /// The iterator borrows the snapshot and holds no other state, so calling this
    /// again yields the same sequence. An inverted range is empty.
    pub fn bookable_dates(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = NaiveDate> + '_ {
        start
            .iter_days()
            .take_while(move |date| *date <= end)
            .filter(move |date| self.resolve(*date).is_available)
    }
}

/// Answers availability queries for barbers using a pluggable data source.
///
/// Every query re-reads its inputs; nothing is cached between calls. If any read
/// fails, the query returns a single [`Error::DataFetch`] and no partial result.
#[derive(Debug, Clone)]
pub struct AvailabilityResolver<S> {
    source: S,
}

impl<S> AvailabilityResolver<S>
where
    S: AvailabilitySource,
{
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Is `date` bookable for `barber_id`, and with which window?
    pub async fn resolve_day_availability(
        &self,
        barber_id: i64,
        date: NaiveDate,
    ) -> Result<DayAvailability> {
        let snapshot = self.load_snapshot(barber_id, date, date).await?;
        Ok(snapshot.resolve(date))
    }

    /// Dates in `[start_date, end_date]` (inclusive, ascending) on which the barber
    /// is open.
    ///
    /// Weekly rows and overrides are fetched once for the whole range.
    pub async fn list_bookable_dates(
        &self,
        barber_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<NaiveDate>> {
        if start_date > end_date {
            return Ok(Vec::new());
        }

        let snapshot = self.load_snapshot(barber_id, start_date, end_date).await?;
        let dates: Vec<NaiveDate> = snapshot.bookable_dates(start_date, end_date).collect();

        debug!(
            barber_id,
            %start_date,
            %end_date,
            bookable = dates.len(),
            "Listed bookable dates"
        );
        Ok(dates)
    }

    /// Hourly slots for `barber_id` on `date`, ascending by hour.
    ///
    /// A closed day yields no slots. So does an open day with a missing start or end
    /// time; that case is logged rather than returned as an error.
    pub async fn compute_slots(&self, barber_id: i64, date: NaiveDate) -> Result<Vec<Slot>> {
        let day = self.resolve_day_availability(barber_id, date).await?;

        let window = match day.window(barber_id, date) {
            Ok(Some(window)) => window,
            Ok(None) => return Ok(Vec::new()),
            Err(e) => {
                warn!("{e}; treating as zero slots");
                return Ok(Vec::new());
            }
        };

        let booked = self
            .source
            .booked_intervals(barber_id, date)
            .await
            .map_err(|e| e.into_data_fetch("appointments"))?;

        let slots = hourly_slots(date, window, &booked);
        debug!(
            barber_id,
            %date,
            slots = slots.len(),
            booked = booked.len(),
            "Computed slots"
        );
        Ok(slots)
    }

    async fn load_snapshot(
        &self,
        barber_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<ScheduleSnapshot> {
        let weekly = self
            .source
            .weekly_availability(barber_id)
            .await
            .map_err(|e| e.into_data_fetch("weekly availability"))?;

        let overrides = self
            .source
            .schedule_overrides(barber_id, from, to)
            .await
            .map_err(|e| e.into_data_fetch("schedule overrides"))?;

        Ok(ScheduleSnapshot::new(weekly, overrides))
    }
}
