//! Daily, progress, and attendance report retrieval.

use super::{AttendanceEntry, DailyReport, NurseryApi, Paged, ProgressReport};
use crate::api::{ApiError, RequestHooks, RequestOptions};

impl NurseryApi {
    /// Daily reports for a child, optionally restricted to one date
    /// (`YYYY-MM-DD`).
    pub async fn daily_reports(
        &self,
        child_id: i64,
        date: Option<&str>,
        hooks: RequestHooks,
    ) -> Result<Paged<DailyReport>, ApiError> {
        let mut options = RequestOptions::get();
        if let Some(date) = date {
            options = options.with_query(&[("date".to_string(), date.to_string())]);
        }
        let data = self
            .client()
            .request(&format!("/children/{child_id}/reports/daily"), hooks, options)
            .await?;
        serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn progress_reports(
        &self,
        child_id: i64,
        hooks: RequestHooks,
    ) -> Result<Paged<ProgressReport>, ApiError> {
        let data = self
            .client()
            .request(
                &format!("/children/{child_id}/reports/progress"),
                hooks,
                RequestOptions::get(),
            )
            .await?;
        serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Attendance entries for a child in an optional date range.
    pub async fn attendance(
        &self,
        child_id: i64,
        from: Option<&str>,
        to: Option<&str>,
        hooks: RequestHooks,
    ) -> Result<Paged<AttendanceEntry>, ApiError> {
        let mut query = Vec::new();
        if let Some(from) = from {
            query.push(("from".to_string(), from.to_string()));
        }
        if let Some(to) = to {
            query.push(("to".to_string(), to.to_string()));
        }
        let data = self
            .client()
            .request(
                &format!("/children/{child_id}/attendance"),
                hooks,
                RequestOptions::get().with_query(&query),
            )
            .await?;
        serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
