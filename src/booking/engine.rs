//! Eligibility rules for gaming area bookings.
//!
//! All functions here are pure: the caller supplies the policy, the current
//! date and a snapshot of confirmed bookings, and the handler commits the
//! booking inside the same transaction that produced the snapshot.

use anyhow::bail;
use chrono::{Datelike, Duration, NaiveDate, NaiveTime};

use crate::{
    config::AppConfig,
    models::bookings::{BOOKING_STATUS_CANCELLED, BOOKING_STATUS_COMPLETED},
    protocol::{
        CODE_ALREADY_CANCELLED, CODE_CAPACITY_EXCEEDED, CODE_INVALID_FORMAT, CODE_PAST_DATE,
        CODE_QUOTA_EXCEEDED, CODE_WINDOW_NOT_OPEN,
    },
    reject,
};

/// A confirmed booking's time range, as read from the snapshot.
#[derive(Debug, Clone, Copy)]
pub struct BookedRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Monday of the calendar week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Sunday of the calendar week containing `date`.
pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::days(6)
}

/// Latest bookable date: the schedule is open through the end of *next*
/// calendar week. The window stays constant for every weekday of the
/// current week rather than narrowing after Monday; see DESIGN.md before
/// tightening this.
pub fn release_window_end(today: NaiveDate) -> NaiveDate {
    week_end(today) + Duration::days(7)
}

pub fn check_times(start: NaiveTime, end: NaiveTime) -> anyhow::Result<()> {
    if start >= end {
        reject!(CODE_INVALID_FORMAT, "End time must be after start time");
    }
    Ok(())
}

pub fn check_release_window(today: NaiveDate, date: NaiveDate) -> anyhow::Result<()> {
    if date > release_window_end(today) {
        reject!(
            CODE_WINDOW_NOT_OPEN,
            "Bookings for this date are not yet open. Schedule is released on Mondays."
        );
    }
    if date < today {
        reject!(CODE_PAST_DATE, "Cannot book in the past");
    }
    Ok(())
}

/// Half-open overlap test: an existing `[s, e)` conflicts with the
/// requested `[start, end)` iff `s <= start < e` or `s < end <= e`.
/// Touching boundaries do not conflict.
pub fn ranges_overlap(existing: BookedRange, start: NaiveTime, end: NaiveTime) -> bool {
    (existing.start <= start && existing.end > start)
        || (existing.start < end && existing.end >= end)
}

/// Flat capacity check across all confirmed bookings on the date,
/// independent of which game is requested.
pub fn check_capacity(
    config: &AppConfig,
    existing: &[BookedRange],
    start: NaiveTime,
    end: NaiveTime,
) -> anyhow::Result<()> {
    let conflicts = existing
        .iter()
        .filter(|range| ranges_overlap(**range, start, end))
        .count();
    if conflicts >= config.gaming_area_capacity {
        reject!(CODE_CAPACITY_EXCEEDED, "No slots available for this time");
    }
    Ok(())
}

pub fn duration_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    end.signed_duration_since(start).num_minutes()
}

/// Weekly quota: sum of the user's confirmed minutes in the requested
/// date's Monday-Sunday week plus the requested range. Reaching the cap
/// exactly is allowed; only strictly exceeding it fails.
pub fn check_weekly_quota(
    config: &AppConfig,
    week_bookings: &[BookedRange],
    start: NaiveTime,
    end: NaiveTime,
) -> anyhow::Result<()> {
    let booked_minutes: i64 = week_bookings
        .iter()
        .map(|range| duration_minutes(range.start, range.end))
        .sum();
    let total_minutes = booked_minutes + duration_minutes(start, end);

    if total_minutes > config.max_booking_hours_per_week * 60 {
        reject!(
            CODE_QUOTA_EXCEEDED,
            "Weekly limit exceeded. You can only book max {} hours per calendar week (Mon-Sun).",
            config.max_booking_hours_per_week
        );
    }
    Ok(())
}

/// Hourly slots between the open and close hours that no confirmed booking
/// occupies. A slot starting at `h` counts as booked only when a booking
/// starts exactly at `h` or spans across `h`; a booking that begins inside
/// the slot does not mark it. Kept as-is from the observed behavior, see
/// DESIGN.md.
pub fn available_slots(config: &AppConfig, booked: &[BookedRange]) -> Vec<Slot> {
    let mut slots = Vec::new();
    for hour in config.gaming_area_open_hour..config.gaming_area_close_hour {
        let slot_start = NaiveTime::from_hms(hour, 0, 0);
        let is_booked = booked
            .iter()
            .any(|range| range.start == slot_start || (range.start < slot_start && range.end > slot_start));
        if !is_booked {
            let end_hour = (hour + 1).min(config.gaming_area_close_hour);
            slots.push(Slot {
                start: slot_start,
                end: NaiveTime::from_hms(end_hour, 0, 0),
            });
        }
    }
    slots
}

/// `confirmed` is the only state a cancel may leave from; `cancelled` and
/// `completed` are terminal.
pub fn check_cancellable(status: &str) -> anyhow::Result<()> {
    match status {
        BOOKING_STATUS_CANCELLED => {
            reject!(CODE_ALREADY_CANCELLED, "Booking already cancelled")
        }
        BOOKING_STATUS_COMPLETED => bail!("Cannot cancel a completed booking"),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Rejection;

    fn policy() -> AppConfig {
        AppConfig::default()
    }

    fn t(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms(hour, min, 0)
    }

    fn range(start: (u32, u32), end: (u32, u32)) -> BookedRange {
        BookedRange {
            start: t(start.0, start.1),
            end: t(end.0, end.1),
        }
    }

    fn code_of(err: anyhow::Error) -> &'static str {
        err.downcast_ref::<Rejection>().expect("expected rejection").code
    }

    #[test]
    fn week_starts_on_monday() {
        // 2024-06-10 is a Monday
        let monday = NaiveDate::from_ymd(2024, 6, 10);
        for offset in 0..7 {
            let day = monday + Duration::days(offset);
            assert_eq!(week_start(day), monday);
            assert_eq!(week_end(day), NaiveDate::from_ymd(2024, 6, 16));
        }
    }

    #[test]
    fn release_window_is_constant_within_a_week() {
        let monday = NaiveDate::from_ymd(2024, 6, 10);
        let boundary = monday + Duration::days(13);
        for offset in 0..7 {
            let today = monday + Duration::days(offset);
            assert_eq!(release_window_end(today), boundary);
        }
    }

    #[test]
    fn dates_beyond_the_window_are_rejected() {
        let today = NaiveDate::from_ymd(2024, 6, 12);
        let boundary = NaiveDate::from_ymd(2024, 6, 23);

        assert!(check_release_window(today, boundary).is_ok());
        let err = check_release_window(today, boundary + Duration::days(1)).unwrap_err();
        assert_eq!(code_of(err), CODE_WINDOW_NOT_OPEN);
    }

    #[test]
    fn past_dates_are_rejected() {
        let today = NaiveDate::from_ymd(2024, 6, 12);
        assert!(check_release_window(today, today).is_ok());
        let err = check_release_window(today, today - Duration::days(1)).unwrap_err();
        assert_eq!(code_of(err), CODE_PAST_DATE);
    }

    #[test]
    fn inverted_time_range_is_invalid() {
        assert!(check_times(t(9, 0), t(10, 0)).is_ok());
        let err = check_times(t(10, 0), t(10, 0)).unwrap_err();
        assert_eq!(code_of(err), CODE_INVALID_FORMAT);
        let err = check_times(t(11, 0), t(10, 0)).unwrap_err();
        assert_eq!(code_of(err), CODE_INVALID_FORMAT);
    }

    #[test]
    fn overlap_uses_half_open_ranges() {
        let existing = range((9, 0), (10, 0));

        // starts inside the existing range
        assert!(ranges_overlap(existing, t(9, 0), t(10, 0)));
        assert!(ranges_overlap(existing, t(9, 30), t(10, 30)));
        // ends inside the existing range
        assert!(ranges_overlap(existing, t(8, 30), t(9, 30)));
        assert!(ranges_overlap(existing, t(8, 0), t(10, 0)));

        // touching boundaries do not conflict
        assert!(!ranges_overlap(existing, t(10, 0), t(11, 0)));
        assert!(!ranges_overlap(existing, t(8, 0), t(9, 0)));
        // disjoint
        assert!(!ranges_overlap(existing, t(11, 0), t(12, 0)));
    }

    #[test]
    fn capacity_rejects_the_sixth_overlapping_booking() {
        let config = policy();
        let same_slot: Vec<BookedRange> = (0..5).map(|_| range((9, 0), (10, 0))).collect();

        let err = check_capacity(&config, &same_slot, t(9, 30), t(10, 30)).unwrap_err();
        assert_eq!(code_of(err), CODE_CAPACITY_EXCEEDED);

        // four overlapping entries leave room for a fifth
        assert!(check_capacity(&config, &same_slot[..4], t(9, 30), t(10, 30)).is_ok());
    }

    #[test]
    fn capacity_ignores_non_overlapping_bookings() {
        let config = policy();
        let same_slot: Vec<BookedRange> = (0..5).map(|_| range((9, 0), (10, 0))).collect();

        // five 09:00-10:00 bookings; a 10:00-11:00 request touches but
        // does not overlap
        assert!(check_capacity(&config, &same_slot, t(10, 0), t(11, 0)).is_ok());
    }

    #[test]
    fn quota_allows_reaching_the_cap_exactly() {
        let config = policy();
        let existing = vec![range((9, 0), (11, 0)), range((14, 0), (15, 0))];

        // 3h existing + 1h requested == 4h cap
        assert!(check_weekly_quota(&config, &existing, t(16, 0), t(17, 0)).is_ok());
    }

    #[test]
    fn quota_rejects_one_minute_over_the_cap() {
        let config = policy();
        let existing = vec![range((9, 0), (11, 0)), range((14, 0), (15, 0))];

        let err = check_weekly_quota(&config, &existing, t(16, 0), t(17, 1)).unwrap_err();
        let rejection = err.downcast_ref::<Rejection>().unwrap();
        assert_eq!(rejection.code, CODE_QUOTA_EXCEEDED);
        // the configured cap is reported back to the caller
        assert!(rejection.message.contains("max 4 hours"));
    }

    #[test]
    fn quota_respects_injected_policy_values() {
        let mut config = policy();
        config.max_booking_hours_per_week = 2;

        let existing = vec![range((9, 0), (11, 0))];
        let err = check_weekly_quota(&config, &existing, t(16, 0), t(16, 30)).unwrap_err();
        let rejection = err.downcast_ref::<Rejection>().unwrap();
        assert_eq!(rejection.code, CODE_QUOTA_EXCEEDED);
        assert!(rejection.message.contains("max 2 hours"));
    }

    #[test]
    fn slots_skip_booked_hours() {
        let mut config = policy();
        config.gaming_area_open_hour = 9;
        config.gaming_area_close_hour = 12;

        let booked = vec![range((10, 0), (11, 0))];
        let slots = available_slots(&config, &booked);
        assert_eq!(
            slots,
            vec![
                Slot { start: t(9, 0), end: t(10, 0) },
                Slot { start: t(11, 0), end: t(12, 0) },
            ]
        );
    }

    #[test]
    fn spanning_bookings_block_every_crossed_hour() {
        let mut config = policy();
        config.gaming_area_open_hour = 9;
        config.gaming_area_close_hour = 13;

        let booked = vec![range((9, 0), (12, 0))];
        let slots = available_slots(&config, &booked);
        assert_eq!(slots, vec![Slot { start: t(12, 0), end: t(13, 0) }]);
    }

    #[test]
    fn slot_listing_misses_bookings_starting_mid_slot() {
        // a 09:30 start neither equals the 09:00 boundary nor spans it, so
        // the 09:00 slot is still listed; kept as-is from the observed
        // behavior
        let mut config = policy();
        config.gaming_area_open_hour = 9;
        config.gaming_area_close_hour = 11;

        let booked = vec![range((9, 30), (10, 30))];
        let slots = available_slots(&config, &booked);
        assert_eq!(
            slots,
            vec![Slot { start: t(9, 0), end: t(10, 0) }]
        );
    }

    #[test]
    fn slot_end_is_clamped_to_the_close_hour() {
        let mut config = policy();
        config.gaming_area_open_hour = 21;
        config.gaming_area_close_hour = 23;

        let slots = available_slots(&config, &[]);
        assert_eq!(slots.last().unwrap().end, t(23, 0));
    }

    #[test]
    fn cancel_is_rejected_once_cancelled() {
        assert!(check_cancellable("confirmed").is_ok());

        // idempotent rejection, no second transition
        for _ in 0..3 {
            let err = check_cancellable(BOOKING_STATUS_CANCELLED).unwrap_err();
            assert_eq!(code_of(err), CODE_ALREADY_CANCELLED);
        }
    }

    #[test]
    fn completed_bookings_cannot_be_cancelled() {
        let err = check_cancellable(BOOKING_STATUS_COMPLETED).unwrap_err();
        assert!(err.downcast_ref::<Rejection>().is_none());
    }

    #[test]
    fn cancelled_bookings_drop_out_of_capacity_and_quota() {
        // the handlers filter on status == confirmed before building the
        // snapshot; with one entry removed both rules pass again
        let config = policy();
        let all: Vec<BookedRange> = (0..5).map(|_| range((9, 0), (10, 0))).collect();
        let after_cancel = &all[..4];

        assert!(check_capacity(&config, &all, t(9, 30), t(10, 30)).is_err());
        assert!(check_capacity(&config, after_cancel, t(9, 30), t(10, 30)).is_ok());

        let week: Vec<BookedRange> = (0..4).map(|_| range((9, 0), (10, 0))).collect();
        assert!(check_weekly_quota(&config, &week, t(16, 0), t(17, 0)).is_err());
        assert!(check_weekly_quota(&config, &week[..3], t(16, 0), t(17, 0)).is_ok());
    }
}
