use actix_web::{HttpResponse, web};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;
use utoipa::ToSchema;

use crate::config::Config;
use crate::error::ApiError;
use crate::repository::{AttendanceRepository, RECENT_RECORD_LIMIT};
use crate::service::attendance as service;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PunchRequest {
    /// `ATS0` followed by three digits, `ATS0000` excluded.
    #[schema(example = "ATS0123")]
    pub employee_id: Option<String>,
}

/// Punch-in endpoint
#[utoipa::path(
    post,
    path = "/api/punch-in",
    request_body = PunchRequest,
    responses(
        (status = 200, description = "Punched in", body = Object, example = json!({
            "message": "Successfully punched in"
        })),
        (status = 400, description = "Invalid employee id, already punched in, or shift completed", body = Object, example = json!({
            "error": "Already punched in for today"
        })),
        (status = 500, description = "Server error", body = Object, example = json!({
            "error": "Server error"
        }))
    ),
    tag = "Attendance"
)]
#[instrument(name = "punch_in", skip_all, fields(employee_id = ?payload.employee_id))]
pub async fn punch_in(
    repo: web::Data<dyn AttendanceRepository>,
    config: web::Data<Config>,
    payload: web::Json<PunchRequest>,
) -> Result<HttpResponse, ApiError> {
    let now = Local::now().naive_local();

    service::punch_in(
        repo.get_ref(),
        payload.employee_id.as_deref(),
        now,
        config.punch_in_mode(),
    )
    .await
    .inspect_err(|e| e.trace("punch-in"))?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully punched in"
    })))
}

/// Punch-out endpoint
#[utoipa::path(
    post,
    path = "/api/punch-out",
    request_body = PunchRequest,
    responses(
        (status = 200, description = "Punched out", body = Object, example = json!({
            "message": "Successfully punched out"
        })),
        (status = 400, description = "Invalid employee id or no open shift", body = Object, example = json!({
            "error": "No active punch-in found"
        })),
        (status = 500, description = "Server error", body = Object, example = json!({
            "error": "Server error"
        }))
    ),
    tag = "Attendance"
)]
#[instrument(name = "punch_out", skip_all, fields(employee_id = ?payload.employee_id))]
pub async fn punch_out(
    repo: web::Data<dyn AttendanceRepository>,
    payload: web::Json<PunchRequest>,
) -> Result<HttpResponse, ApiError> {
    let now = Local::now().naive_local();

    service::punch_out(repo.get_ref(), payload.employee_id.as_deref(), now)
        .await
        .inspect_err(|e| e.trace("punch-out"))?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully punched out"
    })))
}

/// The employee's five most recent records
#[utoipa::path(
    get,
    path = "/api/records/{employeeId}",
    params(
        ("employeeId" = String, Path, description = "Employee id, matched exactly")
    ),
    responses(
        (status = 200, description = "Newest first by date, then punch-in", body = [crate::model::attendance::AttendanceRecord]),
        (status = 500, description = "Server error")
    ),
    tag = "Attendance"
)]
#[instrument(name = "employee_records", skip(repo))]
pub async fn employee_records(
    repo: web::Data<dyn AttendanceRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let records = repo
        .recent_for_employee(&employee_id, RECENT_RECORD_LIMIT)
        .await
        .map_err(ApiError::from)
        .inspect_err(|e| e.trace("fetch records"))?;

    Ok(HttpResponse::Ok().json(records))
}
