//! Crowd-sourced price reports
//!
//! Farmers report the price they actually received at a market. Reports in
//! the trailing window are averaged per market and crop, and the engine uses
//! that average to correct the official quote.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use shared::GroundTruth;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::FetchResult;

use super::providers::CrowdReportAggregateProvider;

/// Reports older than this are ignored
pub const REPORT_WINDOW_HOURS: i64 = 24;

/// A single price report from a farmer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrowdReport {
    pub id: Uuid,
    pub market_name: String,
    pub crop_name: String,
    pub reported_price: f64,
    pub phone: String,
    pub reported_at: DateTime<Utc>,
}

impl CrowdReport {
    pub fn new(
        market_name: impl Into<String>,
        crop_name: impl Into<String>,
        reported_price: f64,
        phone: impl Into<String>,
        reported_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            market_name: market_name.into(),
            crop_name: crop_name.into(),
            reported_price,
            phone: phone.into(),
            reported_at,
        }
    }
}

/// In-memory report store
pub struct InMemoryCrowdReports {
    reports: RwLock<Vec<CrowdReport>>,
    window: Duration,
}

impl Default for InMemoryCrowdReports {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCrowdReports {
    pub fn new() -> Self {
        Self {
            reports: RwLock::new(Vec::new()),
            window: Duration::hours(REPORT_WINDOW_HOURS),
        }
    }

    /// Store a report and drop every report that has left the window
    pub async fn submit(&self, report: CrowdReport) {
        self.submit_at(report, Utc::now()).await;
    }

    /// Like [`submit`](Self::submit), pruning relative to `now`
    pub async fn submit_at(&self, report: CrowdReport, now: DateTime<Utc>) {
        tracing::debug!(
            market = %report.market_name,
            crop = %report.crop_name,
            price = report.reported_price,
            "Crowd report received"
        );
        let cutoff = now - self.window;
        let mut reports = self.reports.write().await;
        reports.push(report);

        let before = reports.len();
        reports.retain(|r| r.reported_at > cutoff);
        if reports.len() < before {
            tracing::debug!(pruned = before - reports.len(), "Expired crowd reports dropped");
        }
    }

    /// Number of reports currently held
    pub async fn len(&self) -> usize {
        self.reports.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reports.read().await.is_empty()
    }

    /// Average and count of reports for a market and crop within the window
    /// ending at `now`. Names match case-insensitively.
    pub async fn aggregate_at(&self, market: &str, crop: &str, now: DateTime<Utc>) -> GroundTruth {
        let since = now - self.window;
        let reports = self.reports.read().await;

        let prices: Vec<f64> = reports
            .iter()
            .filter(|r| r.reported_at > since && r.reported_at <= now)
            .filter(|r| r.market_name.eq_ignore_ascii_case(market) && r.crop_name.eq_ignore_ascii_case(crop))
            .map(|r| r.reported_price)
            .collect();

        if prices.is_empty() {
            return GroundTruth {
                avg_reported_price: 0.0,
                report_count: 0,
            };
        }
        GroundTruth {
            avg_reported_price: prices.iter().sum::<f64>() / prices.len() as f64,
            report_count: prices.len() as u32,
        }
    }
}

#[async_trait]
impl CrowdReportAggregateProvider for InMemoryCrowdReports {
    async fn aggregate(&self, market: &str, crop: &str) -> FetchResult<GroundTruth> {
        Ok(self.aggregate_at(market, crop, Utc::now()).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_aggregate_over_window() {
        let store = InMemoryCrowdReports::new();
        let now = Utc::now();
        store.submit(CrowdReport::new("Azadpur Mandi", "Tomato", 2000.0, "+91111", now - Duration::hours(1))).await;
        store.submit(CrowdReport::new("azadpur mandi", "TOMATO", 2200.0, "+91222", now - Duration::hours(23))).await;
        store.submit(CrowdReport::new("Azadpur Mandi", "Tomato", 9999.0, "+91333", now - Duration::hours(25))).await;
        store.submit(CrowdReport::new("Azadpur Mandi", "Onion", 1500.0, "+91444", now)).await;

        let truth = store.aggregate_at("Azadpur Mandi", "Tomato", now).await;
        assert_eq!(truth.report_count, 2);
        assert_eq!(truth.avg_reported_price, 2100.0);
    }

    #[tokio::test]
    async fn test_submit_prunes_expired_reports() {
        let store = InMemoryCrowdReports::new();
        let start = Utc::now();
        store.submit_at(CrowdReport::new("Vashi APMC", "Onion", 1400.0, "+91111", start), start).await;
        store.submit_at(CrowdReport::new("Vashi APMC", "Onion", 1500.0, "+91222", start), start).await;
        assert_eq!(store.len().await, 2);

        let later = start + Duration::hours(30);
        store.submit_at(CrowdReport::new("Vashi APMC", "Onion", 1600.0, "+91333", later), later).await;
        assert_eq!(store.len().await, 1);

        let truth = store.aggregate_at("Vashi APMC", "Onion", later).await;
        assert_eq!(truth.report_count, 1);
        assert_eq!(truth.avg_reported_price, 1600.0);
    }

    #[tokio::test]
    async fn test_no_reports() {
        let store = InMemoryCrowdReports::new();
        let truth = store.aggregate("Vashi APMC", "Tomato").await.unwrap();
        assert_eq!(truth.report_count, 0);
        assert_eq!(truth.avg_reported_price, 0.0);
    }
}
