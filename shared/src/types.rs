//! API response types for report exports and share links

use crate::models::UserId;
use crate::report::Report;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Export file type, derived from the requested format label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Csv,
    Json,
}

impl ExportFormat {
    /// `pdf` and `csv` map to themselves, anything else is JSON
    pub fn resolve(label: &str) -> Self {
        match label {
            "pdf" => ExportFormat::Pdf,
            "csv" => ExportFormat::Csv,
            _ => ExportFormat::Json,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStatus {
    Ready,
}

/// Export descriptor returned to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportExport {
    /// Format label exactly as requested
    pub export_format: String,
    pub download_url: String,
    pub expires_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_data: Option<Report>,
    pub status: ExportStatus,
}

impl ReportExport {
    /// Describe an export of `report`; the report body is embedded only for
    /// the literal `json` format
    pub fn new(
        user_id: UserId,
        format: &str,
        report: Report,
        now: DateTime<Utc>,
        download_prefix: &str,
        expires_in: Duration,
    ) -> Self {
        let extension = ExportFormat::resolve(format).extension();
        Self {
            export_format: format.to_string(),
            download_url: format!(
                "{}/report_{}_{}.{}",
                download_prefix.trim_end_matches('/'),
                user_id,
                now.timestamp(),
                extension
            ),
            expires_at: now + expires_in,
            report_data: (format == "json").then_some(report),
            status: ExportStatus::Ready,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessLevel {
    ReadOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareStatus {
    Active,
}

/// Read-only share link for a user's reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLink {
    pub share_id: String,
    pub share_url: String,
    pub short_url: String,
    pub expires_at: DateTime<Utc>,
    pub access_level: AccessLevel,
    pub status: ShareStatus,
}

impl ShareLink {
    pub fn new(
        share_id: String,
        base_url: &str,
        short_base_url: &str,
        now: DateTime<Utc>,
        expires_in: Duration,
    ) -> Self {
        Self {
            share_url: format!("{}/shared-reports/{}", base_url.trim_end_matches('/'), share_id),
            short_url: format!("{}/{}", short_base_url.trim_end_matches('/'), share_id),
            share_id,
            expires_at: now + expires_in,
            access_level: AccessLevel::ReadOnly,
            status: ShareStatus::Active,
        }
    }
}
