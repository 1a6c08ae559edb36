//! # Dashboard Stats
//!
//! Shapes the admin dashboard: overview counts, latest inquiries and a
//! merged recent-activity feed with human relative times.
//!
//! ```text
//! products ─┐  2 newest each
//! inquiries ├──────────────► merge ─► sort newest first ─► top 5 ─► "3 mins ago"
//! projects  │
//! orders   ─┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Inquiry, InquiryStatus};

/// Entries shown in the recent-activity feed.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;
/// Newest records taken from each table before merging.
pub const ACTIVITY_PER_KIND: i64 = 2;
/// Inquiries listed on the dashboard.
pub const RECENT_INQUIRY_LIMIT: i64 = 3;

// =============================================================================
// Relative time
// =============================================================================

/// Renders how long ago `then` was, seen from `now`.
///
/// ## Buckets
/// | elapsed              | text           |
/// |----------------------|----------------|
/// | < 1 minute (or future)| `Just now`    |
/// | < 60 minutes         | `N mins ago`   |
/// | < 24 hours           | `N hours ago`  |
/// | 1 day                | `Yesterday`    |
/// | otherwise            | `N days ago`   |
pub fn format_relative_time(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes} mins ago")
    } else if hours < 24 {
        format!("{hours} hours ago")
    } else if days == 1 {
        "Yesterday".to_string()
    } else {
        format!("{days} days ago")
    }
}

// =============================================================================
// Recent activity
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Product,
    Inquiry,
    Project,
    Order,
}

impl ActivityKind {
    pub fn icon(self) -> &'static str {
        match self {
            ActivityKind::Product => "📦",
            ActivityKind::Inquiry => "💬",
            ActivityKind::Project => "✅",
            ActivityKind::Order => "📋",
        }
    }
}

/// A raw feed entry before ordering and time formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn product_added(name_en: &str, at: DateTime<Utc>) -> Self {
        Self {
            kind: ActivityKind::Product,
            text: format!("New product \"{name_en}\" added"),
            at,
        }
    }

    pub fn inquiry_received(name: &str, at: DateTime<Utc>) -> Self {
        Self {
            kind: ActivityKind::Inquiry,
            text: format!("Inquiry received from {name}"),
            at,
        }
    }

    pub fn project_added(title_en: &str, at: DateTime<Utc>) -> Self {
        Self {
            kind: ActivityKind::Project,
            text: format!("Project \"{title_en}\" added/updated"),
            at,
        }
    }

    pub fn order_placed(customer_name: &str, total: Money, at: DateTime<Utc>) -> Self {
        Self {
            kind: ActivityKind::Order,
            text: format!("New order from {customer_name} for {total}"),
            at,
        }
    }
}

/// A feed entry as the dashboard renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub kind: ActivityKind,
    pub icon: String,
    pub text: String,
    pub time: String,
}

/// Newest first, truncated to [`RECENT_ACTIVITY_LIMIT`].
pub fn merge_recent_activity(mut entries: Vec<ActivityEntry>, now: DateTime<Utc>) -> Vec<ActivityItem> {
    entries.sort_by(|a, b| b.at.cmp(&a.at));
    entries
        .into_iter()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|entry| ActivityItem {
            kind: entry.kind,
            icon: entry.kind.icon().to_string(),
            text: entry.text,
            time: format_relative_time(now, entry.at),
        })
        .collect()
}

// =============================================================================
// Inquiries
// =============================================================================

/// `#INQ-` plus the last four characters of the id, upper-cased.
pub fn inquiry_label(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("#INQ-{}", tail.to_uppercase())
}

/// Dashboard wording for an inquiry status.
pub fn inquiry_status_label(status: InquiryStatus) -> &'static str {
    match status {
        InquiryStatus::Pending => "New",
        InquiryStatus::Read => "In Progress",
        InquiryStatus::Contacted => "Contacted",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RecentInquiry {
    pub id: String,
    pub client: String,
    pub product: String,
    pub status: String,
    #[ts(as = "String")]
    pub time: DateTime<Utc>,
}

impl From<&Inquiry> for RecentInquiry {
    fn from(inquiry: &Inquiry) -> Self {
        RecentInquiry {
            id: inquiry_label(&inquiry.id),
            client: inquiry.name.clone(),
            product: inquiry
                .product_id
                .clone()
                .unwrap_or_else(|| "General Inquiry".to_string()),
            status: inquiry_status_label(inquiry.status).to_string(),
            time: inquiry.created_at,
        }
    }
}

// =============================================================================
// Dashboard payload
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StatsOverview {
    pub product_count: i64,
    pub inquiry_count: i64,
    pub project_count: i64,
    pub order_count: i64,
}

/// Inquiry counts by follow-up state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InquiryStats {
    pub total: i64,
    /// `pending`
    pub new: i64,
    /// `read`
    pub in_progress: i64,
    /// `contacted`
    pub closed: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub overview: StatsOverview,
    pub recent_inquiries: Vec<RecentInquiry>,
    pub recent_activity: Vec<ActivityItem>,
    pub inquiry_stats: InquiryStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_relative_time_buckets() {
        let now = now();
        let ago = |d: Duration| format_relative_time(now, now - d);

        assert_eq!(ago(Duration::seconds(30)), "Just now");
        assert_eq!(ago(Duration::seconds(-90)), "Just now");
        assert_eq!(ago(Duration::minutes(1)), "1 mins ago");
        assert_eq!(ago(Duration::minutes(59)), "59 mins ago");
        assert_eq!(ago(Duration::minutes(60)), "1 hours ago");
        assert_eq!(ago(Duration::hours(23)), "23 hours ago");
        assert_eq!(ago(Duration::hours(24)), "Yesterday");
        assert_eq!(ago(Duration::hours(47)), "Yesterday");
        assert_eq!(ago(Duration::hours(48)), "2 days ago");
        assert_eq!(ago(Duration::days(30)), "30 days ago");
    }

    #[test]
    fn test_merge_recent_activity_orders_and_truncates() {
        let now = now();
        let at = |mins| now - Duration::minutes(mins);
        let entries = vec![
            ActivityEntry::product_added("Oak Classic", at(50)),
            ActivityEntry::product_added("Steel Guard", at(5)),
            ActivityEntry::inquiry_received("Fahad", at(2)),
            ActivityEntry::inquiry_received("Reem", at(300)),
            ActivityEntry::project_added("Villa Al-Nakheel", at(10)),
            ActivityEntry::project_added("Hotel Lobby", at(3000)),
            ActivityEntry::order_placed("Sara Q", Money::from_riyals(1200), at(0)),
            ActivityEntry::order_placed("Omar K", Money::from_riyals(80), at(20)),
        ];

        let feed = merge_recent_activity(entries, now);
        assert_eq!(feed.len(), RECENT_ACTIVITY_LIMIT);
        let texts: Vec<&str> = feed.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "New order from Sara Q for SAR 1200.00",
                "Inquiry received from Fahad",
                "New product \"Steel Guard\" added",
                "Project \"Villa Al-Nakheel\" added/updated",
                "New order from Omar K for SAR 80.00",
            ]
        );
        assert_eq!(feed[0].time, "Just now");
        assert_eq!(feed[0].icon, "📋");
        assert_eq!(feed[4].time, "20 mins ago");
    }

    #[test]
    fn test_inquiry_label() {
        assert_eq!(inquiry_label("550e8400-e29b-41d4-a716-44665544abcd"), "#INQ-ABCD");
        assert_eq!(inquiry_label("x1"), "#INQ-X1");
    }

    #[test]
    fn test_recent_inquiry_from_inquiry() {
        let inquiry = Inquiry {
            id: "inq-00ff".into(),
            name: "Layla".into(),
            email: String::new(),
            phone: "0500000000".into(),
            message: "Quote for 12 doors".into(),
            product_id: None,
            status: InquiryStatus::Read,
            created_at: now(),
        };
        let recent = RecentInquiry::from(&inquiry);
        assert_eq!(recent.id, "#INQ-00FF");
        assert_eq!(recent.product, "General Inquiry");
        assert_eq!(recent.status, "In Progress");
    }
}
