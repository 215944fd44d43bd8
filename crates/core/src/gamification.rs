//! Slim-point and bonus-unlock rules.

/// Points awarded for completing every task on a given day.
pub const POINTS_FOR_COMPLETION: i32 = 1;

/// Slim points required to unlock bonus content.
pub const BONUS_UNLOCK_THRESHOLD: i32 = 40;

/// Percentage of tasks completed, rounded to the nearest integer.
/// A day with no tasks counts as 0%, not 100%: an empty checklist must
/// never award a point.
pub fn completion_percentage(completed: usize, total: usize) -> i32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as i32
}

/// Whether this update should award the daily point: the checklist just
/// reached 100% and the day has not already paid out. `point_earned`
/// latches, so unchecking and re-checking a task cannot double-award.
pub fn should_earn_point(percentage: i32, already_earned: bool) -> bool {
    percentage == 100 && !already_earned
}

/// Whether crossing to `new_points` unlocks the bonus tier for the first time.
pub fn should_unlock_bonus(new_points: i32, already_unlocked: bool) -> bool {
    new_points >= BONUS_UNLOCK_THRESHOLD && !already_unlocked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_to_nearest() {
        assert_eq!(completion_percentage(1, 3), 33);
        assert_eq!(completion_percentage(2, 3), 67);
        assert_eq!(completion_percentage(3, 3), 100);
        assert_eq!(completion_percentage(0, 5), 0);
    }

    #[test]
    fn empty_checklist_is_zero_percent() {
        assert_eq!(completion_percentage(0, 0), 0);
    }

    #[test]
    fn point_awarded_once_per_day() {
        assert!(should_earn_point(100, false));
        assert!(!should_earn_point(100, true));
        assert!(!should_earn_point(99, false));
    }

    #[test]
    fn bonus_unlocks_exactly_at_threshold() {
        assert!(!should_unlock_bonus(BONUS_UNLOCK_THRESHOLD - 1, false));
        assert!(should_unlock_bonus(BONUS_UNLOCK_THRESHOLD, false));
        assert!(should_unlock_bonus(BONUS_UNLOCK_THRESHOLD + 5, false));
        assert!(!should_unlock_bonus(BONUS_UNLOCK_THRESHOLD, true));
    }
}
