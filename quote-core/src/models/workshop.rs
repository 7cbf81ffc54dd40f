use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Subscription state of a tenant workshop, managed by the super-admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriptionStatus {
    Trial,
    Active,
    Suspended,
    Expired,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trial => "trial",
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Expired => "expired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "trial" => Some(Self::Trial),
            "active" => Some(Self::Active),
            "suspended" => Some(Self::Suspended),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }
}

/// A tenant workshop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workshop {
    pub id: i64,
    pub name: String,
    pub contact_email: String,
    pub status: SubscriptionStatus,
    /// Last day the subscription is valid; `None` means open-ended.
    pub subscription_until: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// For creating new workshops (no id or timestamp)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWorkshop {
    pub name: String,
    pub contact_email: String,
    pub status: SubscriptionStatus,
    pub subscription_until: Option<NaiveDate>,
}

impl Workshop {
    /// Whether the workshop may take quotes on the given date.
    ///
    /// Trial and active subscriptions count; the end date is inclusive.
    pub fn subscription_active_on(&self, date: NaiveDate) -> bool {
        let status_ok = matches!(
            self.status,
            SubscriptionStatus::Trial | SubscriptionStatus::Active
        );
        status_ok && self.subscription_until.is_none_or(|until| until >= date)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    fn workshop(status: SubscriptionStatus, until: Option<NaiveDate>) -> Workshop {
        Workshop {
            id: 1,
            name: "Test Workshop".to_string(),
            contact_email: "owner@example.com".to_string(),
            status,
            subscription_until: until,
            created_at: chrono::Utc::now(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn status_parse_roundtrips() {
        for status in [
            SubscriptionStatus::Trial,
            SubscriptionStatus::Active,
            SubscriptionStatus::Suspended,
            SubscriptionStatus::Expired,
        ] {
            assert_eq!(SubscriptionStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn active_with_open_ended_subscription() {
        let w = workshop(SubscriptionStatus::Active, None);
        assert!(w.subscription_active_on(date(2026, 8, 30)));
    }

    #[test]
    fn active_on_the_last_day() {
        let w = workshop(SubscriptionStatus::Active, Some(date(2026, 8, 30)));
        assert!(w.subscription_active_on(date(2026, 8, 30)));
    }

    #[test]
    fn inactive_the_day_after_the_end_date() {
        let w = workshop(SubscriptionStatus::Active, Some(date(2026, 8, 30)));
        assert!(!w.subscription_active_on(date(2026, 8, 31)));
    }

    #[test]
    fn trial_counts_as_active() {
        let w = workshop(SubscriptionStatus::Trial, None);
        assert!(w.subscription_active_on(date(2026, 8, 30)));
    }

    #[test]
    fn suspended_is_inactive_even_before_end_date() {
        let w = workshop(SubscriptionStatus::Suspended, Some(date(2030, 1, 1)));
        assert!(!w.subscription_active_on(date(2026, 8, 30)));
    }

    #[test]
    fn expired_is_inactive() {
        let w = workshop(SubscriptionStatus::Expired, None);
        assert!(!w.subscription_active_on(date(2026, 8, 30)));
    }
}
