use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub subscription_tier: SubscriptionTier,
    /// Prepaid token purse, decremented by every authorized rewrite
    pub tokens_remaining: i64,
    pub daily_tokens_used: i64,
    pub monthly_tokens_used: i64,
    pub monthly_exports_used: i32,
    /// Last day the daily counter was zeroed (written by the reset job)
    pub last_token_reset: NaiveDate,
    /// Day of month (1-28) on which the monthly counters reset
    pub monthly_reset_date: i32,
    pub subscription_expires_at: Option<DateTime<Utc>>,
    pub billing_start_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[serde(rename = "free")]
    Free,
    #[serde(rename = "pro")]
    Pro,
    #[serde(rename = "premium")]
    Premium,
}

impl SubscriptionTier {
    pub const ALL: [SubscriptionTier; 3] = [
        SubscriptionTier::Free,
        SubscriptionTier::Pro,
        SubscriptionTier::Premium,
    ];
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionTier::Free => write!(f, "free"),
            SubscriptionTier::Pro => write!(f, "pro"),
            SubscriptionTier::Premium => write!(f, "premium"),
        }
    }
}

impl User {
    /// When the daily token counter resets: midnight UTC tonight.
    pub fn daily_reset_at(now: DateTime<Utc>) -> DateTime<Utc> {
        let tomorrow = now + Duration::days(1);
        tomorrow
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always a valid time")
            .and_utc()
    }

    /// Whole hours left until the daily counter resets.
    pub fn hours_until_daily_reset(now: DateTime<Utc>) -> i64 {
        (Self::daily_reset_at(now) - now).num_hours().max(0)
    }

    /// Day of month the monthly counters reset on. Stored values outside
    /// 1-28 are clamped so the reset day exists in every month.
    pub fn monthly_reset_day(&self) -> u32 {
        self.monthly_reset_date.clamp(1, 28) as u32
    }

    /// Next occurrence of the monthly reset day, at midnight UTC.
    pub fn monthly_reset_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let day = self.monthly_reset_day();
        let today = now.date_naive();
        let this_month = NaiveDate::from_ymd_opt(today.year(), today.month(), day)
            .expect("reset day is clamped to 1-28");
        let next = if this_month > today {
            this_month
        } else {
            let (year, month) = if today.month() == 12 {
                (today.year() + 1, 1)
            } else {
                (today.year(), today.month() + 1)
            };
            NaiveDate::from_ymd_opt(year, month, day).expect("reset day is clamped to 1-28")
        };
        next.and_hms_opt(0, 0, 0)
            .expect("midnight is always a valid time")
            .and_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_user(monthly_reset_date: i32) -> User {
        User {
            id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            subscription_tier: SubscriptionTier::Free,
            tokens_remaining: 1000,
            daily_tokens_used: 0,
            monthly_tokens_used: 0,
            monthly_exports_used: 0,
            last_token_reset: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            monthly_reset_date,
            subscription_expires_at: None,
            billing_start_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_daily_reset_is_next_midnight() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 21, 30, 0).unwrap();
        let reset = User::daily_reset_at(now);
        assert_eq!(reset, Utc.with_ymd_and_hms(2026, 3, 11, 0, 0, 0).unwrap());
        assert_eq!(User::hours_until_daily_reset(now), 2);
    }

    #[test]
    fn test_monthly_reset_later_this_month() {
        let user = test_user(15);
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(
            user.monthly_reset_at(now),
            Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_monthly_reset_rolls_into_next_month() {
        let user = test_user(5);
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(
            user.monthly_reset_at(now),
            Utc.with_ymd_and_hms(2026, 4, 5, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_monthly_reset_rolls_over_december() {
        let user = test_user(5);
        let now = Utc.with_ymd_and_hms(2026, 12, 20, 12, 0, 0).unwrap();
        assert_eq!(
            user.monthly_reset_at(now),
            Utc.with_ymd_and_hms(2027, 1, 5, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_monthly_reset_day_clamps_out_of_range_values() {
        assert_eq!(test_user(31).monthly_reset_day(), 28);
        assert_eq!(test_user(0).monthly_reset_day(), 1);
    }
}
