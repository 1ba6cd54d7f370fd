use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::error::{
    ALREADY_PUNCHED_IN, ApiError, INVALID_EMPLOYEE_ID, NO_ACTIVE_PUNCH_IN, SHIFT_COMPLETED,
};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee_id::EmployeeId;
use crate::repository::{AttendanceRepository, ShiftClose};
use crate::utils::hours::{hours_between, punch_time};

/// How punch-in guards against a second shift on the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PunchInMode {
    /// Two lookups followed by an insert. Concurrent requests can both pass.
    #[default]
    CheckThenInsert,
    /// One conditional insert; the lookups only pick the conflict message.
    Atomic,
}

fn validate(employee_id: Option<&str>) -> Result<EmployeeId, ApiError> {
    employee_id
        .and_then(EmployeeId::parse)
        .ok_or_else(|| ApiError::invalid(INVALID_EMPLOYEE_ID))
}

/// SQLSTATE 23000: integrity constraint violation (e.g. a unique index on
/// `(employee_id, date)`).
fn is_duplicate_key(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23000"))
}

pub async fn punch_in(
    repo: &dyn AttendanceRepository,
    employee_id: Option<&str>,
    now: NaiveDateTime,
    mode: PunchInMode,
) -> Result<EmployeeId, ApiError> {
    let employee_id = validate(employee_id)?;
    let today = now.date();
    let punch_in = punch_time(now);

    let inserted = match mode {
        PunchInMode::CheckThenInsert => {
            if repo.find_open_on(employee_id.as_str(), today).await?.is_some() {
                return Err(ApiError::Conflict(ALREADY_PUNCHED_IN));
            }
            if repo
                .find_completed_on(employee_id.as_str(), today)
                .await?
                .is_some()
            {
                return Err(ApiError::Conflict(SHIFT_COMPLETED));
            }
            repo.insert_punch_in(employee_id.as_str(), today, punch_in)
                .await
                .map(|_| true)
        }
        PunchInMode::Atomic => {
            repo.insert_punch_in_if_absent(employee_id.as_str(), today, punch_in)
                .await
        }
    };

    match inserted {
        Ok(true) => {}
        Ok(false) => {
            debug!(%employee_id, "Conditional punch-in skipped");
            return Err(existing_shift_conflict(repo, &employee_id, now).await?);
        }
        Err(e) if is_duplicate_key(&e) => {
            return Err(ApiError::Conflict(ALREADY_PUNCHED_IN));
        }
        Err(e) => return Err(e.into()),
    }

    info!(%employee_id, %today, %punch_in, "Punched in");
    Ok(employee_id)
}

/// Picks the message for a punch-in refused because a record already exists today.
async fn existing_shift_conflict(
    repo: &dyn AttendanceRepository,
    employee_id: &EmployeeId,
    now: NaiveDateTime,
) -> Result<ApiError, ApiError> {
    let open = repo.find_open_on(employee_id.as_str(), now.date()).await?;
    Ok(if open.is_some() {
        ApiError::Conflict(ALREADY_PUNCHED_IN)
    } else {
        ApiError::Conflict(SHIFT_COMPLETED)
    })
}

/// Closes the employee's latest open shift, on whatever date it was opened.
pub async fn punch_out(
    repo: &dyn AttendanceRepository,
    employee_id: Option<&str>,
    now: NaiveDateTime,
) -> Result<ShiftClose, ApiError> {
    let employee_id = validate(employee_id)?;

    let record = repo
        .find_latest_open(employee_id.as_str())
        .await?
        .filter(AttendanceRecord::is_open)
        .ok_or(ApiError::Conflict(NO_ACTIVE_PUNCH_IN))?;

    let punch_out = punch_time(now);
    let total_hours = hours_between(record.punch_in, punch_out);
    let close = ShiftClose {
        punch_out,
        total_hours,
        status: AttendanceStatus::from_hours(total_hours),
    };

    repo.close_shift(record.id, close).await?;

    info!(
        %employee_id,
        record_id = record.id,
        shift_date = %record.date,
        total_hours,
        status = %close.status,
        "Punched out"
    );
    Ok(close)
}
