use super::{StoreError, StoreFuture, UserStore};
use crate::model::UserRecord;
use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, postgres::PgRow, Connection, PgPool, Row};
use std::time::Duration;
use tracing::{info_span, Instrument};

const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/sql/schema.sql"));

/// `PostgreSQL` backed store over the `users` table.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool against `dsn`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be reached.
    pub async fn connect(dsn: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .min_connections(1)
            .max_connections(max_connections)
            .max_lifetime(Duration::from_secs(60 * 2))
            .test_before_acquire(true)
            .connect(dsn)
            .await
            .context("Failed to connect to database")?;

        Ok(Self::new(pool))
    }

    /// Create the `users` table and its lookup index when missing.
    ///
    /// # Errors
    /// Returns an error if any schema statement fails.
    pub async fn migrate(&self) -> Result<()> {
        for (index, statement) in split_sql_statements(SCHEMA_SQL).iter().enumerate() {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .with_context(|| format!("failed to execute schema statement {}", index + 1))?;
        }

        Ok(())
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl UserStore for PgUserStore {
    fn save(&self, record: UserRecord) -> StoreFuture<'_, UserRecord> {
        Box::pin(async move {
            if let Some(id) = record.id() {
                return Err(StoreError::AlreadyPersisted(id));
            }

            let query = r"
                INSERT INTO users
                    (user_name, first_name, last_name, password, email_address, date_of_birth)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id
            ";
            let span = info_span!(
                "db.query",
                db.system = "postgresql",
                db.operation = "INSERT",
                db.statement = query
            );
            let row = sqlx::query(query)
                .bind(record.user_name())
                .bind(record.first_name())
                .bind(record.last_name())
                .bind(record.password())
                .bind(record.email_address())
                .bind(record.date_of_birth())
                .fetch_one(&self.pool)
                .instrument(span)
                .await?;

            let id: i64 = row.try_get("id")?;

            Ok(record.with_id(id))
        })
    }

    fn find_by_user_name<'a>(&'a self, user_name: &'a str) -> StoreFuture<'a, Option<UserRecord>> {
        Box::pin(async move {
            // LIMIT 2 is enough to tell "one" from "more than one".
            let query = r"
                SELECT id, user_name, first_name, last_name, password, email_address, date_of_birth
                FROM users
                WHERE user_name = $1
                LIMIT 2
            ";
            let span = info_span!(
                "db.query",
                db.system = "postgresql",
                db.operation = "SELECT",
                db.statement = query
            );
            let rows = sqlx::query(query)
                .bind(user_name)
                .fetch_all(&self.pool)
                .instrument(span)
                .await?;

            match rows.as_slice() {
                [] => Ok(None),
                [row] => Ok(Some(record_from_row(row)?)),
                _ => Err(StoreError::NonUnique(user_name.to_string())),
            }
        })
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let acquire_span = info_span!(
                "db.acquire",
                db.system = "postgresql",
                db.operation = "ACQUIRE"
            );
            let mut conn = self.pool.acquire().instrument(acquire_span).await?;

            let ping_span = info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
            conn.ping().instrument(ping_span).await?;

            Ok(())
        })
    }
}

fn record_from_row(row: &PgRow) -> Result<UserRecord, sqlx::Error> {
    Ok(UserRecord::from_storage(
        row.try_get("id")?,
        row.try_get("user_name")?,
        row.try_get("first_name")?,
        row.try_get("last_name")?,
        row.try_get("password")?,
        row.try_get("email_address")?,
        row.try_get("date_of_birth")?,
    ))
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();

    for line in sql.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("--") {
            continue;
        }
        current.push_str(line);
        current.push('\n');

        if trimmed.ends_with(';') {
            let statement = current.trim();
            if !statement.is_empty() {
                statements.push(statement.to_string());
            }
            current.clear();
        }
    }

    let leftover = current.trim();
    if !leftover.is_empty() {
        statements.push(leftover.to_string());
    }

    statements
}
