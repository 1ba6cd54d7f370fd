//! Persistence seam for attendance records.
//!
//! Handlers only see `dyn AttendanceRepository`; production wires in
//! [`mysql::MySqlAttendanceRepository`], tests use the in-memory store.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use crate::model::attendance::{AttendanceRecord, AttendanceStats, AttendanceStatus, RecordFilter};

pub mod mysql;

#[cfg(test)]
pub mod memory;

/// Number of records returned by the per-employee listing.
pub const RECENT_RECORD_LIMIT: i64 = 5;

/// Values written when a shift is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftClose {
    pub punch_out: NaiveTime,
    pub total_hours: f64,
    pub status: AttendanceStatus,
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Open record (`punch_out IS NULL`) for the employee on `date`.
    async fn find_open_on(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, sqlx::Error>;

    /// Completed record (`punch_out IS NOT NULL`) for the employee on `date`.
    async fn find_completed_on(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, sqlx::Error>;

    /// Unconditional insert of a new open shift.
    async fn insert_punch_in(
        &self,
        employee_id: &str,
        date: NaiveDate,
        punch_in: NaiveTime,
    ) -> Result<(), sqlx::Error>;

    /// Single-statement insert that only succeeds when the employee has no
    /// record at all on `date`. Returns `false` when nothing was inserted.
    async fn insert_punch_in_if_absent(
        &self,
        employee_id: &str,
        date: NaiveDate,
        punch_in: NaiveTime,
    ) -> Result<bool, sqlx::Error>;

    /// Most recent open shift for the employee on any date, by punch-in time.
    async fn find_latest_open(
        &self,
        employee_id: &str,
    ) -> Result<Option<AttendanceRecord>, sqlx::Error>;

    async fn close_shift(&self, id: u64, close: ShiftClose) -> Result<(), sqlx::Error>;

    /// Up to `limit` records, newest date first, then newest punch-in.
    async fn recent_for_employee(
        &self,
        employee_id: &str,
        limit: i64,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error>;

    /// All records matching `filter`, newest date first, then newest punch-in.
    async fn search(&self, filter: &RecordFilter) -> Result<Vec<AttendanceRecord>, sqlx::Error>;

    async fn stats(&self, today: NaiveDate) -> Result<AttendanceStats, sqlx::Error>;

    /// Deletes every record. Returns the number removed.
    async fn clear(&self) -> Result<u64, sqlx::Error>;
}
