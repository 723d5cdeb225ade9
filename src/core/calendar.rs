//! Calendar helpers for presenting resolver output to a customer.
//!
//! These sit on top of `core::availability` and are the only place the current
//! wall-clock time enters: the resolver itself is time-blind, and it is up to the
//! caller to grey out slots that have already started.

use crate::core::availability::Slot;
use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};

/// First and last day of the month containing `date`.
#[must_use]
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first);
    (first, last)
}

/// Whether the month containing `date` is entirely before `today`'s month.
#[must_use]
pub fn is_month_in_past(date: NaiveDate, today: NaiveDate) -> bool {
    (date.year(), date.month()) < (today.year(), today.month())
}

/// The inclusive range of dates offered for booking, starting `today`.
///
/// `horizon_days` of zero still offers today.
#[must_use]
pub fn booking_window(today: NaiveDate, horizon_days: u32) -> (NaiveDate, NaiveDate) {
    let end = today
        .checked_add_days(Days::new(u64::from(horizon_days.saturating_sub(1))))
        .unwrap_or(today);
    (today, end)
}

/// Marks every slot on `date` that starts before `now` as unavailable.
#[must_use]
pub fn disable_past_slots(date: NaiveDate, slots: &[Slot], now: NaiveDateTime) -> Vec<Slot> {
    slots
        .iter()
        .map(|slot| Slot {
            is_available: slot.is_available && date.and_time(slot.start_time) >= now,
            ..*slot
        })
        .collect()
}

/// 12-hour label for a slot, e.g. `"9:00 AM"`.
#[must_use]
pub fn slot_label(slot: &Slot) -> String {
    slot.start_time.format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn slot(hour: u32, is_available: bool) -> Slot {
        Slot {
            start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            is_available,
        }
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            month_bounds(date(2026, 2, 14)),
            (date(2026, 2, 1), date(2026, 2, 28))
        );
        assert_eq!(
            month_bounds(date(2026, 12, 31)),
            (date(2026, 12, 1), date(2026, 12, 31))
        );
    }

    #[test]
    fn test_is_month_in_past() {
        let today = date(2026, 3, 15);
        assert!(is_month_in_past(date(2026, 2, 28), today));
        assert!(!is_month_in_past(date(2026, 3, 1), today));
        assert!(!is_month_in_past(date(2027, 1, 1), today));
    }

    #[test]
    fn test_booking_window() {
        let today = date(2026, 3, 1);
        assert_eq!(booking_window(today, 7), (today, date(2026, 3, 7)));
        assert_eq!(booking_window(today, 0), (today, today));
    }

    #[test]
    fn test_disable_past_slots_today() {
        let today = date(2026, 3, 3);
        let now = today.and_hms_opt(11, 30, 0).unwrap();
        let slots = vec![slot(10, true), slot(11, true), slot(12, true), slot(13, false)];

        let shown = disable_past_slots(today, &slots, now);
        let open: Vec<u32> = shown
            .iter()
            .filter(|s| s.is_available)
            .map(Slot::hour)
            .collect();
        assert_eq!(open, vec![12]);
    }

    #[test]
    fn test_disable_past_slots_leaves_future_days_alone() {
        let slots = vec![slot(9, true), slot(10, false)];
        let now = date(2026, 3, 2).and_hms_opt(23, 0, 0).unwrap();
        assert_eq!(disable_past_slots(date(2026, 3, 3), &slots, now), slots);
    }

    #[test]
    fn test_slot_label() {
        assert_eq!(slot_label(&slot(9, true)), "9:00 AM");
        assert_eq!(slot_label(&slot(12, true)), "12:00 PM");
        assert_eq!(slot_label(&slot(17, true)), "5:00 PM");
    }
}
