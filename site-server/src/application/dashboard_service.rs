use serde::Serialize;
use utoipa::ToSchema;

use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub(crate) struct Metric {
    pub(crate) label: &'static str,
    pub(crate) value: f64,
    pub(crate) change_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub(crate) struct SeriesPoint {
    pub(crate) period: &'static str,
    pub(crate) visitors: u32,
    pub(crate) conversions: u32,
}

/// Placeholder analytics; no analytics store exists behind it.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub(crate) struct AnalyticsSnapshot {
    pub(crate) metrics: Vec<Metric>,
    pub(crate) traffic: Vec<SeriesPoint>,
    pub(crate) top_pages: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub(crate) struct AdminOverview {
    pub(crate) total_users: i64,
    pub(crate) recent_users: Vec<User>,
}

pub(crate) struct DashboardService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> DashboardService<R> {
    const RECENT_USERS: i64 = 20;

    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) fn analytics(&self) -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            metrics: vec![
                Metric {
                    label: "visitors",
                    value: 12_480.0,
                    change_pct: 8.4,
                },
                Metric {
                    label: "conversion_rate",
                    value: 3.2,
                    change_pct: 0.6,
                },
                Metric {
                    label: "avg_session_minutes",
                    value: 4.7,
                    change_pct: -1.3,
                },
            ],
            traffic: vec![
                SeriesPoint {
                    period: "Mon",
                    visitors: 1640,
                    conversions: 51,
                },
                SeriesPoint {
                    period: "Tue",
                    visitors: 1822,
                    conversions: 60,
                },
                SeriesPoint {
                    period: "Wed",
                    visitors: 1905,
                    conversions: 58,
                },
                SeriesPoint {
                    period: "Thu",
                    visitors: 1760,
                    conversions: 55,
                },
                SeriesPoint {
                    period: "Fri",
                    visitors: 2011,
                    conversions: 71,
                },
            ],
            top_pages: vec!["/", "/blog/", "/projects/", "/solutions/ai-consulting"],
        }
    }

    pub(crate) async fn admin_overview(&self) -> Result<AdminOverview, DomainError> {
        let total_users = self.repo.count_users().await?;
        let recent_users = self.repo.list_users(Self::RECENT_USERS).await?;
        Ok(AdminOverview {
            total_users,
            recent_users,
        })
    }
}
