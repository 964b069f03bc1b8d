//! Log record repository.
//!
//! Every query is scoped by `tenant_id`; callers never see rows that
//! belong to another tenant. Record ids are SQLite rowids and are only
//! meaningful together with the tenant they were issued for.

use crate::{DbError, Result as DbErrorResult};

use lh_core::{LogRecord, ThreatStatus};

use std::panic::Location;
use std::str::FromStr;

use chrono::DateTime;
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const SELECT_COLUMNS: &str = "id, tenant_id, ip, log_text, source, attack_type, mitre_id, \
     probability, recommendation, country, city, severity_windows, severity_syslog, \
     timestamp, created_at, status, resolved_by, resolved_at";

pub struct LogRepository {
    pool: SqlitePool,
}

impl LogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a record and returns its assigned id.
    pub async fn insert(&self, record: &LogRecord) -> DbErrorResult<i64> {
        let timestamp = record.timestamp.map(|dt| dt.timestamp());
        let created_at = record.created_at.timestamp();
        let resolved_at = record.resolved_at.map(|dt| dt.timestamp());

        let result = sqlx::query(
            r#"
                INSERT INTO lh_log_records (
                    tenant_id, ip, log_text, source, attack_type, mitre_id,
                    probability, recommendation, country, city,
                    severity_windows, severity_syslog,
                    timestamp, created_at, status, resolved_by, resolved_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.tenant_id)
        .bind(&record.ip)
        .bind(&record.log_text)
        .bind(&record.source)
        .bind(&record.attack_type)
        .bind(&record.mitre_id)
        .bind(record.probability)
        .bind(&record.recommendation)
        .bind(&record.country)
        .bind(&record.city)
        .bind(&record.severity_windows)
        .bind(&record.severity_syslog)
        .bind(timestamp)
        .bind(created_at)
        .bind(record.status.as_str())
        .bind(&record.resolved_by)
        .bind(resolved_at)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// All records for a tenant, newest first. Records without an event
    /// timestamp sort by ingestion time instead.
    pub async fn all_for_tenant(&self, tenant_id: &str) -> DbErrorResult<Vec<LogRecord>> {
        let rows = sqlx::query(&format!(
            r#"
                SELECT {SELECT_COLUMNS}
                FROM lh_log_records
                WHERE tenant_id = ?
                ORDER BY COALESCE(timestamp, created_at) DESC, id DESC
            "#
        ))
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_log_row).collect()
    }

    pub async fn find_by_id(&self, tenant_id: &str, id: i64) -> DbErrorResult<Option<LogRecord>> {
        let row = sqlx::query(&format!(
            r#"
                SELECT {SELECT_COLUMNS}
                FROM lh_log_records
                WHERE tenant_id = ? AND id = ?
            "#
        ))
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_log_row).transpose()
    }

    /// Marks a record blocked. Returns false when the record does not
    /// exist in this tenant or is already blocked.
    pub async fn resolve(
        &self,
        tenant_id: &str,
        id: i64,
        resolved_by: &str,
        resolved_at: chrono::DateTime<chrono::Utc>,
    ) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE lh_log_records
                SET status = 'blocked', resolved_by = ?, resolved_at = ?
                WHERE tenant_id = ? AND id = ? AND status = 'active'
            "#,
        )
        .bind(resolved_by)
        .bind(resolved_at.timestamp())
        .bind(tenant_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_for_tenant(&self, tenant_id: &str) -> DbErrorResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
                SELECT COUNT(*)
                FROM lh_log_records
                WHERE tenant_id = ?
            "#,
        )
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

fn map_log_row(row: &SqliteRow) -> DbErrorResult<LogRecord> {
    let status_str: String = row.try_get("status")?;
    let status = ThreatStatus::from_str(&status_str).map_err(|e| DbError::Corrupt {
        message: format!("Invalid status in log_records.status: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let created_at_ts: i64 = row.try_get("created_at")?;
    let created_at = DateTime::from_timestamp(created_at_ts, 0).ok_or_else(|| DbError::Corrupt {
        message: "Invalid timestamp in log_records.created_at".to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let timestamp: Option<i64> = row.try_get("timestamp")?;
    let resolved_at: Option<i64> = row.try_get("resolved_at")?;

    Ok(LogRecord {
        id: row.try_get("id")?,
        tenant_id: row.try_get("tenant_id")?,
        ip: row.try_get("ip")?,
        log_text: row.try_get("log_text")?,
        source: row.try_get("source")?,
        attack_type: row.try_get("attack_type")?,
        mitre_id: row.try_get("mitre_id")?,
        probability: row.try_get("probability")?,
        recommendation: row.try_get("recommendation")?,
        country: row.try_get("country")?,
        city: row.try_get("city")?,
        severity_windows: row.try_get("severity_windows")?,
        severity_syslog: row.try_get("severity_syslog")?,
        timestamp: timestamp.and_then(|ts| DateTime::from_timestamp(ts, 0)),
        created_at,
        status,
        resolved_by: row.try_get("resolved_by")?,
        resolved_at: resolved_at.and_then(|ts| DateTime::from_timestamp(ts, 0)),
    })
}
