use chrono::NaiveDate;
use sqlx::MySql;
use sqlx::mysql::MySqlArguments;
use sqlx::query::QueryAs;

use crate::model::attendance::{RecordFilter, StatusFilter};

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    String(String),
    Date(NaiveDate),
}

/// ===============================
/// SQL filter container
/// ===============================
#[derive(Debug, PartialEq)]
pub struct SqlFilter {
    /// `WHERE` clause, always starting with ` WHERE 1=1`.
    pub where_sql: String,
    pub values: Vec<SqlValue>,
}

/// ===============================
/// Build the WHERE clause for the admin record listing
/// ===============================
pub fn build_record_filter(filter: &RecordFilter) -> SqlFilter {
    let mut where_sql = String::from(" WHERE 1=1");
    let mut values = Vec::new();

    if let Some(date) = filter.date {
        where_sql.push_str(" AND date = ?");
        values.push(SqlValue::Date(date));
    }

    if let Some(employee_id) = &filter.employee_id {
        where_sql.push_str(" AND LOWER(employee_id) LIKE ?");
        values.push(SqlValue::String(format!(
            "%{}%",
            escape_like(&employee_id.to_lowercase())
        )));
    }

    match &filter.status {
        StatusFilter::All => {}
        StatusFilter::In => where_sql.push_str(" AND punch_out IS NULL"),
        StatusFilter::Out => where_sql.push_str(" AND punch_out IS NOT NULL"),
        StatusFilter::Status(status) => {
            where_sql.push_str(" AND attendance_status = ?");
            values.push(SqlValue::String(status.to_string()));
        }
        StatusFilter::Other(raw) => {
            where_sql.push_str(" AND attendance_status = ?");
            values.push(SqlValue::String(raw.clone()));
        }
    }

    SqlFilter { where_sql, values }
}

/// Escapes `LIKE` wildcards so user input only ever matches literally.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// ===============================
/// Bind filter values in order
/// ===============================
pub fn bind_values<'q, O>(
    mut query: QueryAs<'q, MySql, O, MySqlArguments>,
    values: Vec<SqlValue>,
) -> QueryAs<'q, MySql, O, MySqlArguments> {
    for value in values {
        query = match value {
            SqlValue::String(v) => query.bind(v),
            SqlValue::Date(v) => query.bind(v),
        };
    }
    query
}
