//! Program-day arithmetic for the 30-day plan.

use crate::types::Timestamp;

/// Total length of the coaching program in days.
pub const PROGRAM_LENGTH_DAYS: i32 = 30;

/// Calculate the user's current program day.
///
/// Day 1 is the day onboarding was completed; the result is clamped to
/// `[1, PROGRAM_LENGTH_DAYS]`. Day boundaries are UTC midnights, so a user
/// who completed onboarding at 23:59 is on day 2 a minute later. A user
/// with no completion timestamp yet is always on day 1.
pub fn current_day(completed_at: Option<Timestamp>, now: Timestamp) -> i32 {
    let Some(completed_at) = completed_at else {
        return 1;
    };
    let elapsed = now.date_naive().signed_duration_since(completed_at.date_naive());
    let day = elapsed.num_days() as i32 + 1;
    day.clamp(1, PROGRAM_LENGTH_DAYS)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn completion_day_is_day_one() {
        let completed = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 22, 0, 0).unwrap();
        assert_eq!(current_day(Some(completed), now), 1);
    }

    #[test]
    fn day_advances_at_utc_midnight() {
        let completed = Utc.with_ymd_and_hms(2026, 5, 1, 23, 59, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 5, 2, 0, 1, 0).unwrap();
        assert_eq!(current_day(Some(completed), now), 2);
    }

    #[test]
    fn day_caps_at_program_length() {
        let completed = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(current_day(Some(completed), now), PROGRAM_LENGTH_DAYS);
    }

    #[test]
    fn clock_skew_never_goes_below_day_one() {
        let completed = Utc.with_ymd_and_hms(2026, 5, 10, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 5, 8, 0, 0, 0).unwrap();
        assert_eq!(current_day(Some(completed), now), 1);
    }

    #[test]
    fn missing_completion_means_day_one() {
        let now = Utc.with_ymd_and_hms(2026, 5, 8, 0, 0, 0).unwrap();
        assert_eq!(current_day(None, now), 1);
    }
}
