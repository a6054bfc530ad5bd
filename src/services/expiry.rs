use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Days (inclusive) before the expiry date during which a reagent counts as expiring soon.
pub const DEFAULT_EXPIRING_SOON_DAYS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExpiryStatus {
    Expired,
    ExpiringSoon,
    Normal,
}

impl ExpiryStatus {
    /// Badge shown beside the expiry date, if any.
    pub fn badge(&self) -> Option<StatusBadge> {
        match self {
            Self::Expired => Some(StatusBadge {
                label: "Просрочен",
                tone: BadgeTone::Destructive,
            }),
            Self::ExpiringSoon => Some(StatusBadge {
                label: "Истекает",
                tone: BadgeTone::Warning,
            }),
            Self::Normal => None,
        }
    }

    /// Tone of the expiry date text itself.
    pub fn tone(&self) -> BadgeTone {
        match self {
            Self::Expired => BadgeTone::Destructive,
            Self::ExpiringSoon => BadgeTone::Warning,
            Self::Normal => BadgeTone::Muted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Destructive,
    Warning,
    Muted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: &'static str,
    pub tone: BadgeTone,
}

/// Whole calendar days from `today` until `expiry`; negative once the date has passed.
pub fn days_until(expiry: NaiveDate, today: NaiveDate) -> i64 {
    expiry.signed_duration_since(today).num_days()
}

/// Classifies with the default 30-day window.
pub fn classify(expiry: NaiveDate, today: NaiveDate) -> ExpiryStatus {
    ExpiryClassifier::default().classify(expiry, today)
}

/// Maps an expiry date to a status relative to an injected current date.
///
/// Nothing here reads the clock; callers pass `today` on every call so that
/// a long-lived view never shows a stale status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryClassifier {
    window_days: i64,
}

impl Default for ExpiryClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_EXPIRING_SOON_DAYS)
    }
}

impl ExpiryClassifier {
    pub fn new(window_days: u32) -> Self {
        Self {
            window_days: i64::from(window_days),
        }
    }

    pub fn window_days(&self) -> u32 {
        // Constructed from a u32, so this never truncates.
        self.window_days as u32
    }

    pub fn classify(&self, expiry: NaiveDate, today: NaiveDate) -> ExpiryStatus {
        let days = days_until(expiry, today);
        if days < 0 {
            ExpiryStatus::Expired
        } else if days <= self.window_days {
            ExpiryStatus::ExpiringSoon
        } else {
            ExpiryStatus::Normal
        }
    }

    /// Same as [`classify`](Self::classify), with the time of day dropped from `now` (UTC).
    pub fn classify_at(&self, expiry: NaiveDate, now: DateTime<Utc>) -> ExpiryStatus {
        self.classify(expiry, now.date_naive())
    }

    /// Classifies a raw `YYYY-MM-DD` string. Returns `None` when the string is not a date.
    pub fn classify_str(&self, raw: &str, today: NaiveDate) -> Option<ExpiryStatus> {
        crate::models::reagent::parse_date(raw).map(|expiry| self.classify(expiry, today))
    }

    /// Status used for display. An unreadable expiry date never highlights the row.
    pub fn display_status(&self, raw: &str, today: NaiveDate) -> ExpiryStatus {
        self.classify_str(raw, today).unwrap_or(ExpiryStatus::Normal)
    }
}
