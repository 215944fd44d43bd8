//! Subscription plans and term arithmetic.

use chrono::Months;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Subscription plans sold through the checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    Monthly,
    Annual,
}

/// List price in USD for each plan.
pub const MONTHLY_PRICE: f64 = 37.0;
pub const ANNUAL_PRICE: f64 = 297.0;

impl SubscriptionPlan {
    /// Parse a plan from its webhook/database string form (lower-cased first).
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.to_ascii_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "annual" => Ok(Self::Annual),
            other => Err(CoreError::Validation(format!(
                "Invalid subscription plan '{other}'. Must be 'monthly' or 'annual'"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        }
    }

    /// Subscription end date for a term starting at `from`: one calendar
    /// month for monthly, one calendar year for annual. Clamps to the last
    /// day of the target month when the source day does not exist there
    /// (chrono's `checked_add_months` semantics).
    pub fn term_end(&self, from: Timestamp) -> Timestamp {
        let months = match self {
            Self::Monthly => Months::new(1),
            Self::Annual => Months::new(12),
        };
        // Only fails at the end of representable time, far beyond any
        // realistic subscription date.
        from.checked_add_months(months).unwrap_or(from)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn monthly_term_adds_one_calendar_month() {
        let from = Utc.with_ymd_and_hms(2026, 3, 15, 10, 0, 0).unwrap();
        let end = SubscriptionPlan::Monthly.term_end(from);
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 4, 15, 10, 0, 0).unwrap());
    }

    #[test]
    fn annual_term_adds_one_calendar_year() {
        let from = Utc.with_ymd_and_hms(2026, 3, 15, 10, 0, 0).unwrap();
        let end = SubscriptionPlan::Annual.term_end(from);
        assert_eq!(end, Utc.with_ymd_and_hms(2027, 3, 15, 10, 0, 0).unwrap());
    }

    #[test]
    fn monthly_term_clamps_to_month_end() {
        // Jan 31 + 1 month lands on Feb 28 in a non-leap year.
        let from = Utc.with_ymd_and_hms(2026, 1, 31, 0, 0, 0).unwrap();
        let end = SubscriptionPlan::Monthly.term_end(from);
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 2, 28, 0, 0, 0).unwrap());
    }

    #[test]
    fn parse_is_case_insensitive_and_strict() {
        assert_eq!(
            SubscriptionPlan::parse("ANNUAL").unwrap(),
            SubscriptionPlan::Annual
        );
        assert!(SubscriptionPlan::parse("weekly").is_err());
    }
}
