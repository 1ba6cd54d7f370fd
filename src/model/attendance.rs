use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use utoipa::ToSchema;

/// Hours at or above which a shift counts as a full day.
pub const FULL_DAY_HOURS: f64 = 8.0;
/// Hours at or above which a shift counts as half a day.
pub const HALF_DAY_HOURS: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": "ATS0123",
        "date": "2026-01-05",
        "punch_in": "09:00:00",
        "punch_out": "17:00:00",
        "total_hours": 8.0,
        "attendance_status": "Present"
    })
)]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "ATS0123")]
    pub employee_id: String,

    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "09:00:00", value_type = String)]
    pub punch_in: NaiveTime,

    #[schema(example = "17:00:00", value_type = Option<String>, nullable = true)]
    pub punch_out: Option<NaiveTime>,

    #[schema(example = 8.0, nullable = true)]
    pub total_hours: Option<f64>,

    #[schema(example = "Present", nullable = true)]
    pub attendance_status: Option<String>,
}

impl AttendanceRecord {
    /// A shift with a punch-in but no punch-out yet.
    pub fn is_open(&self) -> bool {
        self.punch_out.is_none()
    }
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Display, EnumString, IntoStaticStr, EnumIter, Serialize, ToSchema,
)]
pub enum AttendanceStatus {
    #[strum(serialize = "Present")]
    #[serde(rename = "Present")]
    Present,
    #[strum(serialize = "Half Day")]
    #[serde(rename = "Half Day")]
    HalfDay,
    #[strum(serialize = "Absent")]
    #[serde(rename = "Absent")]
    Absent,
}

impl AttendanceStatus {
    /// Value stored in `attendance.attendance_status`.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Classifies a completed shift by its rounded hour total.
    /// Negative totals (punch-out earlier than punch-in) land in `Absent`.
    pub fn from_hours(total_hours: f64) -> Self {
        if total_hours >= FULL_DAY_HOURS {
            AttendanceStatus::Present
        } else if total_hours >= HALF_DAY_HOURS {
            AttendanceStatus::HalfDay
        } else {
            AttendanceStatus::Absent
        }
    }
}

/// Status filter accepted by the admin record listing.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    /// Open shifts (`punch_out IS NULL`).
    In,
    /// Closed shifts (`punch_out IS NOT NULL`).
    Out,
    Status(AttendanceStatus),
    /// Any other token, normalized and compared against the stored status.
    Other(String),
}

impl StatusFilter {
    /// Resolves a query token, case-insensitively. Tokens outside the known
    /// set fall back to [`StatusFilter::Other`] with the first letter
    /// upper-cased and hyphens turned into spaces.
    pub fn from_token(token: &str) -> Self {
        let token = token.trim();
        match token.to_ascii_lowercase().as_str() {
            "all" => StatusFilter::All,
            "in" => StatusFilter::In,
            "out" => StatusFilter::Out,
            "present" => StatusFilter::Status(AttendanceStatus::Present),
            "absent" => StatusFilter::Status(AttendanceStatus::Absent),
            "half-day" | "half day" | "half_day" | "halfday" => {
                StatusFilter::Status(AttendanceStatus::HalfDay)
            }
            _ => StatusFilter::Other(normalize_status(token)),
        }
    }
}

fn normalize_status(token: &str) -> String {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    first
        .to_uppercase()
        .chain(chars)
        .map(|c| if c == '-' { ' ' } else { c })
        .collect()
}

/// Conjunctive filter for the admin record listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub date: Option<NaiveDate>,
    /// Case-insensitive substring of the employee id.
    pub employee_id: Option<String>,
    pub status: StatusFilter,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    /// Distinct employees ever recorded.
    #[schema(example = 12)]
    pub total_employees: i64,
    /// Open shifts across all dates.
    #[schema(example = 3)]
    pub active_employees: i64,
    /// Today's records marked `Present`.
    #[schema(example = 7)]
    pub present_employees: i64,
    /// Today's records marked `Absent`.
    #[schema(example = 1)]
    pub absent_employees: i64,
}
