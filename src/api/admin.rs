use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use tracing::{instrument, warn};
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::model::attendance::{RecordFilter, StatusFilter};
use crate::repository::AttendanceRepository;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AdminRecordQuery {
    /// Exact shift date, `YYYY-MM-DD`
    #[param(example = "2026-01-05")]
    pub date: Option<String>,
    /// Case-insensitive substring of the employee id
    #[param(example = "ATS01")]
    pub employee_id: Option<String>,
    /// `all`, `in`, `out`, `present`, `half-day`, `absent`, or a stored status
    #[param(example = "half-day")]
    pub status: Option<String>,
}

/// Blank query values count as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AdminRecordQuery {
    pub fn into_filter(self) -> Result<RecordFilter, ApiError> {
        let date = non_blank(self.date)
            .map(|raw| {
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|_| ApiError::invalid("Invalid date filter"))
            })
            .transpose()?;

        let status = non_blank(self.status)
            .map(|token| StatusFilter::from_token(&token))
            .unwrap_or_default();

        Ok(RecordFilter {
            date,
            employee_id: non_blank(self.employee_id),
            status,
        })
    }
}

/// All records matching the filters
#[utoipa::path(
    get,
    path = "/api/admin/records",
    params(AdminRecordQuery),
    responses(
        (status = 200, description = "Newest first by date, then punch-in", body = [crate::model::attendance::AttendanceRecord]),
        (status = 400, description = "Malformed date", body = Object, example = json!({
            "error": "Invalid date filter"
        })),
        (status = 500, description = "Server error")
    ),
    tag = "Admin"
)]
#[instrument(name = "admin_records", skip(repo))]
pub async fn list_records(
    repo: web::Data<dyn AttendanceRepository>,
    query: web::Query<AdminRecordQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = query
        .into_inner()
        .into_filter()
        .inspect_err(|e| e.trace("admin records"))?;

    let records = repo
        .search(&filter)
        .await
        .map_err(ApiError::from)
        .inspect_err(|e| e.trace("admin records"))?;

    Ok(HttpResponse::Ok().json(records))
}

/// Headline counts for the admin dashboard
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses(
        (status = 200, description = "Attendance counts", body = crate::model::attendance::AttendanceStats),
        (status = 500, description = "Server error")
    ),
    tag = "Admin"
)]
#[instrument(name = "admin_stats", skip_all)]
pub async fn stats(repo: web::Data<dyn AttendanceRepository>) -> Result<HttpResponse, ApiError> {
    let today = Local::now().date_naive();

    let stats = repo
        .stats(today)
        .await
        .map_err(ApiError::from)
        .inspect_err(|e| e.trace("admin stats"))?;

    Ok(HttpResponse::Ok().json(stats))
}

/// Deletes every attendance record
#[utoipa::path(
    delete,
    path = "/api/admin/records",
    responses(
        (status = 200, description = "All records removed", body = Object, example = json!({
            "message": "All records cleared successfully"
        })),
        (status = 500, description = "Server error")
    ),
    tag = "Admin"
)]
#[instrument(name = "admin_clear", skip_all)]
pub async fn clear_records(
    repo: web::Data<dyn AttendanceRepository>,
) -> Result<HttpResponse, ApiError> {
    let removed = repo
        .clear()
        .await
        .map_err(ApiError::from)
        .inspect_err(|e| e.trace("clear records"))?;

    warn!(removed, "All attendance records cleared");

    Ok(HttpResponse::Ok().json(json!({
        "message": "All records cleared successfully"
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::AttendanceStatus;

    fn query(date: &str, employee_id: &str, status: &str) -> AdminRecordQuery {
        AdminRecordQuery {
            date: Some(date.to_string()),
            employee_id: Some(employee_id.to_string()),
            status: Some(status.to_string()),
        }
    }

    #[test]
    fn blank_values_mean_no_filter() {
        let filter = query("", "  ", "").into_filter().unwrap();
        assert_eq!(filter, RecordFilter::default());
        assert_eq!(
            AdminRecordQuery::default().into_filter().unwrap(),
            RecordFilter::default()
        );
    }

    #[test]
    fn parses_every_filter() {
        let filter = query("2026-01-05", "ats0", "half-day").into_filter().unwrap();
        assert_eq!(filter.date, NaiveDate::from_ymd_opt(2026, 1, 5));
        assert_eq!(filter.employee_id.as_deref(), Some("ats0"));
        assert_eq!(filter.status, StatusFilter::Status(AttendanceStatus::HalfDay));
    }

    #[test]
    fn rejects_bad_date() {
        assert!(matches!(
            query("05/01/2026", "", "").into_filter(),
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[test]
    fn unknown_status_is_matched_verbatim() {
        let filter = query("", "", "late").into_filter().unwrap();
        assert_eq!(filter.status, StatusFilter::Other("Late".to_string()));
    }
}
