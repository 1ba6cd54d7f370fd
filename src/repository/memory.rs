//! In-memory `AttendanceRepository` for tests.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use super::{AttendanceRepository, ShiftClose};
use crate::model::attendance::{
    AttendanceRecord, AttendanceStats, AttendanceStatus, RecordFilter, StatusFilter,
};

/// In-process evaluation of a filter, mirroring the SQL built by
/// `utils::db_utils::build_record_filter`.
fn matches(filter: &RecordFilter, record: &AttendanceRecord) -> bool {
    if filter.date.is_some_and(|date| record.date != date) {
        return false;
    }

    if let Some(needle) = &filter.employee_id {
        if !record
            .employee_id
            .to_lowercase()
            .contains(&needle.to_lowercase())
        {
            return false;
        }
    }

    match &filter.status {
        StatusFilter::All => true,
        StatusFilter::In => record.is_open(),
        StatusFilter::Out => !record.is_open(),
        StatusFilter::Status(status) => record.attendance_status.as_deref() == Some(status.as_str()),
        StatusFilter::Other(raw) => record.attendance_status.as_deref() == Some(raw.as_str()),
    }
}

#[derive(Default)]
pub struct MemoryAttendanceRepository {
    records: Mutex<Vec<AttendanceRecord>>,
    /// When set, every call fails with a pool timeout.
    fail: bool,
}

impl MemoryAttendanceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Inserts a record verbatim, assigning the next id.
    pub fn seed(
        &self,
        employee_id: &str,
        date: NaiveDate,
        punch_in: NaiveTime,
        close: Option<ShiftClose>,
    ) -> u64 {
        let mut records = self.records.lock().unwrap();
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        records.push(AttendanceRecord {
            id,
            employee_id: employee_id.to_string(),
            date,
            punch_in,
            punch_out: close.map(|c| c.punch_out),
            total_hours: close.map(|c| c.total_hours),
            attendance_status: close.map(|c| c.status.to_string()),
        });
        id
    }

    pub fn all(&self) -> Vec<AttendanceRecord> {
        self.records.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.fail {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }

    fn newest_first(records: &mut [AttendanceRecord]) {
        records.sort_by_key(|r| Reverse((r.date, r.punch_in)));
    }
}

#[async_trait]
impl AttendanceRepository for MemoryAttendanceRepository {
    async fn find_open_on(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, sqlx::Error> {
        self.check()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.employee_id == employee_id && r.date == date && r.is_open())
            .cloned())
    }

    async fn find_completed_on(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, sqlx::Error> {
        self.check()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.employee_id == employee_id && r.date == date && !r.is_open())
            .cloned())
    }

    async fn insert_punch_in(
        &self,
        employee_id: &str,
        date: NaiveDate,
        punch_in: NaiveTime,
    ) -> Result<(), sqlx::Error> {
        self.check()?;
        self.seed(employee_id, date, punch_in, None);
        Ok(())
    }

    async fn insert_punch_in_if_absent(
        &self,
        employee_id: &str,
        date: NaiveDate,
        punch_in: NaiveTime,
    ) -> Result<bool, sqlx::Error> {
        self.check()?;
        let exists = self
            .records
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.employee_id == employee_id && r.date == date);
        if exists {
            return Ok(false);
        }
        self.seed(employee_id, date, punch_in, None);
        Ok(true)
    }

    async fn find_latest_open(
        &self,
        employee_id: &str,
    ) -> Result<Option<AttendanceRecord>, sqlx::Error> {
        self.check()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.employee_id == employee_id && r.is_open())
            .max_by_key(|r| r.punch_in)
            .cloned())
    }

    async fn close_shift(&self, id: u64, close: ShiftClose) -> Result<(), sqlx::Error> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.iter_mut().find(|r| r.id == id) {
            record.punch_out = Some(close.punch_out);
            record.total_hours = Some(close.total_hours);
            record.attendance_status = Some(close.status.to_string());
        }
        Ok(())
    }

    async fn recent_for_employee(
        &self,
        employee_id: &str,
        limit: i64,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        self.check()?;
        let mut found: Vec<_> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect();
        Self::newest_first(&mut found);
        found.truncate(limit.max(0) as usize);
        Ok(found)
    }

    async fn search(&self, filter: &RecordFilter) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        self.check()?;
        let mut found: Vec<_> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| matches(filter, r))
            .cloned()
            .collect();
        Self::newest_first(&mut found);
        Ok(found)
    }

    async fn stats(&self, today: NaiveDate) -> Result<AttendanceStats, sqlx::Error> {
        self.check()?;
        let records = self.records.lock().unwrap();
        let today_with = |status: AttendanceStatus| {
            records
                .iter()
                .filter(|r| r.date == today && r.attendance_status.as_deref() == Some(status.as_str()))
                .count() as i64
        };

        Ok(AttendanceStats {
            total_employees: records
                .iter()
                .map(|r| r.employee_id.as_str())
                .collect::<HashSet<_>>()
                .len() as i64,
            active_employees: records.iter().filter(|r| r.is_open()).count() as i64,
            present_employees: today_with(AttendanceStatus::Present),
            absent_employees: today_with(AttendanceStatus::Absent),
        })
    }

    async fn clear(&self) -> Result<u64, sqlx::Error> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        let removed = records.len() as u64;
        records.clear();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(employee_id: &str, status: Option<AttendanceStatus>) -> AttendanceRecord {
        AttendanceRecord {
            id: 1,
            employee_id: employee_id.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            punch_in: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            punch_out: status.map(|_| NaiveTime::from_hms_opt(17, 0, 0).unwrap()),
            total_hours: status.map(|_| 8.0),
            attendance_status: status.map(|s| s.to_string()),
        }
    }

    #[test]
    fn employee_filter_is_a_case_insensitive_substring() {
        let filter = RecordFilter {
            employee_id: Some("ats01".to_string()),
            ..Default::default()
        };
        assert!(matches(&filter, &record("ATS0123", None)));
        assert!(!matches(&filter, &record("ATS0201", None)));
    }

    #[test]
    fn status_filters_split_open_and_closed() {
        let open = record("ATS0123", None);
        let closed = record("ATS0123", Some(AttendanceStatus::Present));

        let only_open = RecordFilter {
            status: StatusFilter::In,
            ..Default::default()
        };
        assert!(matches(&only_open, &open));
        assert!(!matches(&only_open, &closed));

        let only_present = RecordFilter {
            status: StatusFilter::Status(AttendanceStatus::Present),
            ..Default::default()
        };
        assert!(matches(&only_present, &closed));
        assert!(!matches(&only_present, &open));
    }

    #[test]
    fn date_filter_is_exact() {
        let filter = RecordFilter {
            date: NaiveDate::from_ymd_opt(2026, 1, 6),
            ..Default::default()
        };
        assert!(!matches(&filter, &record("ATS0123", None)));
    }
}
