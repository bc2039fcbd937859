//! Report, analytics and trends service
//!
//! Reads a per-user snapshot from the record source and hands it to the
//! shared [`ReportAssembler`]. Unknown users are not rejected; they simply
//! have no records and get empty aggregates.

use crate::config::{ExportConfig, ShareConfig};
use crate::error::ApiError;
use crate::repositories::RecordSource;
use chrono::{DateTime, Utc};
use metrics::counter;
use strive_hive_shared::aggregation::UserAnalytics;
use strive_hive_shared::{
    ActivityRecord, FitnessTrends, NutritionEntry, Period, Report, ReportAssembler, ReportExport, ShareLink, UserId,
};
use tracing::{debug, info};
use uuid::Uuid;

/// Length of the public share token
const SHARE_ID_LEN: usize = 8;

/// Period used for exported reports
const EXPORT_PERIOD: Period = Period::Month;

/// A user's records, read once per request
struct Snapshot {
    activities: Vec<ActivityRecord>,
    nutrition: Vec<NutritionEntry>,
}

impl Snapshot {
    async fn load<S: RecordSource + ?Sized>(store: &S, user_id: UserId) -> Result<Self, ApiError> {
        Ok(Self {
            activities: store
                .list_activities(Some(user_id))
                .await
                .map_err(ApiError::Internal)?,
            nutrition: store
                .list_nutrition(Some(user_id))
                .await
                .map_err(ApiError::Internal)?,
        })
    }

    fn assembler(&self) -> ReportAssembler<'_> {
        ReportAssembler::new(&self.activities, &self.nutrition)
    }
}

/// Report service for derived analytics
pub struct ReportService;

impl ReportService {
    /// Lifetime totals for a user
    pub async fn analytics<S: RecordSource + ?Sized>(store: &S, user_id: UserId) -> Result<UserAnalytics, ApiError> {
        let snapshot = Snapshot::load(store, user_id).await?;
        Ok(snapshot.assembler().analytics(user_id)?)
    }

    /// Generate the report for one period ending at `now`
    pub async fn generate<S: RecordSource + ?Sized>(
        store: &S,
        user_id: UserId,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<Report, ApiError> {
        debug!(user_id, period = %period, "Generating report");
        let snapshot = Snapshot::load(store, user_id).await?;
        let report = snapshot.assembler().generate(user_id, period, now)?;

        counter!("reports_generated_total", "period" => period.key()).increment(1);
        Ok(report)
    }

    /// 90 day trends, weekly pattern, peaks and projection
    pub async fn trends<S: RecordSource + ?Sized>(
        store: &S,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<FitnessTrends, ApiError> {
        let snapshot = Snapshot::load(store, user_id).await?;
        Ok(snapshot.assembler().trends(user_id, now))
    }

    /// Describe an export of the monthly report in `format`
    pub async fn export<S: RecordSource + ?Sized>(
        store: &S,
        config: &ExportConfig,
        user_id: UserId,
        format: &str,
        now: DateTime<Utc>,
    ) -> Result<ReportExport, ApiError> {
        let report = Self::generate(store, user_id, EXPORT_PERIOD, now).await?;
        let export = ReportExport::new(user_id, format, report, now, &config.download_prefix, config.expiry());

        counter!("report_exports_total", "format" => format.to_string()).increment(1);
        info!(user_id, format, download_url = %export.download_url, "Prepared report export");
        Ok(export)
    }

    /// Create a read-only share link; nothing is persisted
    pub fn share(config: &ShareConfig, user_id: UserId, now: DateTime<Utc>) -> ShareLink {
        let share_id: String = Uuid::new_v4().to_string().chars().take(SHARE_ID_LEN).collect();
        let link = ShareLink::new(share_id, &config.base_url, &config.short_base_url, now, config.expiry());

        counter!("share_links_created_total").increment(1);
        info!(user_id, share_id = %link.share_id, "Created share link");
        link
    }
}
