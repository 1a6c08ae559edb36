//! # Dashboard Stats
//!
//! Aggregates the admin dashboard from the other tables.
//!
//! ```text
//! counts ─────────────────────────────► overview
//! 3 newest inquiries ─────────────────► recent_inquiries
//! 2 newest of products/inquiries/
//!   projects/orders ──► ActivityEntry ──► merge_recent_activity ──► recent_activity
//! GROUP BY status ────────────────────► inquiry_stats
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use super::inquiry::InquiryRepository;
use super::order::OrderRepository;
use super::product::ProductRepository;
use super::project::ProjectRepository;
use crate::error::DbResult;
use sindean_core::stats::{
    merge_recent_activity, ActivityEntry, DashboardStats, RecentInquiry, StatsOverview,
    ACTIVITY_PER_KIND, RECENT_INQUIRY_LIMIT,
};

#[derive(Debug, Clone)]
pub struct StatsRepository {
    pool: SqlitePool,
}

impl StatsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        StatsRepository { pool }
    }

    pub async fn dashboard(&self, now: DateTime<Utc>) -> DbResult<DashboardStats> {
        debug!("Building dashboard stats");

        let products = ProductRepository::new(self.pool.clone());
        let projects = ProjectRepository::new(self.pool.clone());
        let inquiries = InquiryRepository::new(self.pool.clone());
        let orders = OrderRepository::new(self.pool.clone());

        let overview = StatsOverview {
            product_count: products.count().await?,
            inquiry_count: inquiries.count().await?,
            project_count: projects.count().await?,
            order_count: orders.count().await?,
        };

        let recent_inquiries = inquiries
            .recent(RECENT_INQUIRY_LIMIT)
            .await?
            .iter()
            .map(RecentInquiry::from)
            .collect();

        let mut entries = Vec::new();
        for product in products.recent(ACTIVITY_PER_KIND).await? {
            entries.push(ActivityEntry::product_added(&product.name_en, product.created_at));
        }
        for inquiry in inquiries.recent(ACTIVITY_PER_KIND).await? {
            entries.push(ActivityEntry::inquiry_received(&inquiry.name, inquiry.created_at));
        }
        for project in projects.list().await?.into_iter().take(ACTIVITY_PER_KIND as usize) {
            entries.push(ActivityEntry::project_added(&project.title_en, project.created_at));
        }
        for order in orders.recent(ACTIVITY_PER_KIND).await? {
            entries.push(ActivityEntry::order_placed(
                &order.customer_name,
                order.total_amount,
                order.created_at,
            ));
        }

        Ok(DashboardStats {
            overview,
            recent_inquiries,
            recent_activity: merge_recent_activity(entries, now),
            inquiry_stats: inquiries.count_by_status().await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{at, db, product};
    use super::*;
    use sindean_core::input::{NewInquiry, NewProject};
    use sindean_core::stats::{ActivityKind, InquiryStats};
    use sindean_core::InquiryStatus;

    #[tokio::test]
    async fn test_empty_dashboard() {
        let db = db().await;
        let stats = db.stats().dashboard(at(0)).await.unwrap();
        assert_eq!(stats.overview, StatsOverview::default());
        assert!(stats.recent_inquiries.is_empty());
        assert!(stats.recent_activity.is_empty());
        assert_eq!(stats.inquiry_stats, InquiryStats::default());
    }

    #[tokio::test]
    async fn test_dashboard_merges_activity() {
        let db = db().await;
        for i in 0..3 {
            db.products()
                .insert(&product(&format!("p{i}"), 1000, &[], at(i)))
                .await
                .unwrap();
        }
        let project = NewProject {
            title_en: "Villa Al Nakheel".into(),
            ..Default::default()
        }
        .into_project(at(30))
        .unwrap();
        db.projects().insert(&project).await.unwrap();

        for (i, name) in ["Amal", "Badr", "Dana", "Fahd"].iter().enumerate() {
            let inquiry = NewInquiry {
                name: Some((*name).into()),
                phone: Some("0500000000".into()),
                message: Some("Quote please".into()),
                ..Default::default()
            }
            .into_inquiry(at(10 + i as i64))
            .unwrap();
            db.inquiries().insert(&inquiry).await.unwrap();
        }
        let first = db.inquiries().recent(1).await.unwrap().remove(0);
        db.inquiries()
            .update_status(&first.id, InquiryStatus::Contacted)
            .await
            .unwrap();

        let stats = db.stats().dashboard(at(60)).await.unwrap();

        assert_eq!(stats.overview.product_count, 3);
        assert_eq!(stats.overview.inquiry_count, 4);
        assert_eq!(stats.overview.project_count, 1);
        assert_eq!(stats.overview.order_count, 0);

        let clients: Vec<_> = stats.recent_inquiries.iter().map(|i| i.client.as_str()).collect();
        assert_eq!(clients, vec!["Fahd", "Dana", "Badr"]);
        assert_eq!(stats.recent_inquiries[0].status, "Contacted");
        assert_eq!(stats.recent_inquiries[1].product, "General Inquiry");

        // project (30), Fahd (13), Dana (12), p2 (2), p1 (1)
        let kinds: Vec<_> = stats.recent_activity.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ActivityKind::Project,
                ActivityKind::Inquiry,
                ActivityKind::Inquiry,
                ActivityKind::Product,
                ActivityKind::Product,
            ]
        );
        assert_eq!(stats.recent_activity[0].time, "30 mins ago");

        assert_eq!(
            stats.inquiry_stats,
            InquiryStats {
                total: 4,
                new: 3,
                in_progress: 0,
                closed: 1
            }
        );
    }
}
