use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::MySqlPool;

use super::{AttendanceRepository, ShiftClose};
use crate::model::attendance::{
    AttendanceRecord, AttendanceStats, AttendanceStatus, RecordFilter,
};
use crate::utils::db_utils::{bind_values, build_record_filter};

const RECORD_COLUMNS: &str =
    "id, employee_id, date, punch_in, punch_out, total_hours, attendance_status";

/// `attendance` table access over a shared MySQL pool.
#[derive(Clone)]
pub struct MySqlAttendanceRepository {
    pool: MySqlPool,
}

impl MySqlAttendanceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn count(&self, sql: &str, today: Option<(NaiveDate, &str)>) -> Result<i64, sqlx::Error> {
        let mut query = sqlx::query_scalar::<_, i64>(sql);
        if let Some((date, status)) = today {
            query = query.bind(date).bind(status);
        }
        query.fetch_one(&self.pool).await
    }
}

#[async_trait]
impl AttendanceRepository for MySqlAttendanceRepository {
    async fn find_open_on(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, sqlx::Error> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM attendance \
             WHERE employee_id = ? AND date = ? AND punch_out IS NULL LIMIT 1"
        );

        sqlx::query_as::<_, AttendanceRecord>(&sql)
            .bind(employee_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_completed_on(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, sqlx::Error> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM attendance \
             WHERE employee_id = ? AND date = ? AND punch_out IS NOT NULL LIMIT 1"
        );

        sqlx::query_as::<_, AttendanceRecord>(&sql)
            .bind(employee_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await
    }

    async fn insert_punch_in(
        &self,
        employee_id: &str,
        date: NaiveDate,
        punch_in: NaiveTime,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO attendance (employee_id, date, punch_in)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(employee_id)
        .bind(date)
        .bind(punch_in)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_punch_in_if_absent(
        &self,
        employee_id: &str,
        date: NaiveDate,
        punch_in: NaiveTime,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance (employee_id, date, punch_in)
            SELECT ?, ?, ? FROM DUAL
            WHERE NOT EXISTS (
                SELECT 1 FROM attendance WHERE employee_id = ? AND date = ?
            )
            "#,
        )
        .bind(employee_id)
        .bind(date)
        .bind(punch_in)
        .bind(employee_id)
        .bind(date)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_latest_open(
        &self,
        employee_id: &str,
    ) -> Result<Option<AttendanceRecord>, sqlx::Error> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM attendance \
             WHERE employee_id = ? AND punch_out IS NULL \
             ORDER BY punch_in DESC LIMIT 1"
        );

        sqlx::query_as::<_, AttendanceRecord>(&sql)
            .bind(employee_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn close_shift(&self, id: u64, close: ShiftClose) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE attendance
            SET punch_out = ?, total_hours = ?, attendance_status = ?
            WHERE id = ?
            "#,
        )
        .bind(close.punch_out)
        .bind(close.total_hours)
        .bind(close.status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn recent_for_employee(
        &self,
        employee_id: &str,
        limit: i64,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM attendance \
             WHERE employee_id = ? \
             ORDER BY date DESC, punch_in DESC LIMIT ?"
        );

        sqlx::query_as::<_, AttendanceRecord>(&sql)
            .bind(employee_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
    }

    async fn search(&self, filter: &RecordFilter) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let filter_sql = build_record_filter(filter);
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM attendance{} ORDER BY date DESC, punch_in DESC",
            filter_sql.where_sql
        );

        let query = sqlx::query_as::<_, AttendanceRecord>(&sql);
        bind_values(query, filter_sql.values)
            .fetch_all(&self.pool)
            .await
    }

    async fn stats(&self, today: NaiveDate) -> Result<AttendanceStats, sqlx::Error> {
        const TODAY_BY_STATUS: &str =
            "SELECT COUNT(*) FROM attendance WHERE date = ? AND attendance_status = ?";

        let total_employees = self
            .count("SELECT COUNT(DISTINCT employee_id) FROM attendance", None)
            .await?;
        let active_employees = self
            .count("SELECT COUNT(*) FROM attendance WHERE punch_out IS NULL", None)
            .await?;
        let present_employees = self
            .count(
                TODAY_BY_STATUS,
                Some((today, AttendanceStatus::Present.as_str())),
            )
            .await?;
        let absent_employees = self
            .count(
                TODAY_BY_STATUS,
                Some((today, AttendanceStatus::Absent.as_str())),
            )
            .await?;

        Ok(AttendanceStats {
            total_employees,
            active_employees,
            present_employees,
            absent_employees,
        })
    }

    async fn clear(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attendance")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
