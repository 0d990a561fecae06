//! PostgreSQL user repository.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::postgres::PgRow;

use chicadish_core::error::{AppError, ErrorKind};
use chicadish_core::result::AppResult;
use chicadish_core::types::UserId;
use chicadish_entity::user::{CreateUser, Role, User};

use super::UserStore;
use crate::connection::DatabasePool;

/// Users joined with their aggregated role names.
const SELECT_USERS: &str = "SELECT u.id, u.first_name, u.last_name, u.email, u.password_hash, \
     u.newsletter_subscribed, u.account_enabled, u.created_at, \
     COALESCE(array_agg(r.name) FILTER (WHERE r.name IS NOT NULL), '{}') AS roles \
     FROM users u \
     LEFT JOIN user_roles ur ON ur.user_id = u.id \
     LEFT JOIN roles r ON r.id = ur.role_id";

/// Repository for user records stored in PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    db: DatabasePool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }

    async fn fetch_one_where(&self, clause: &str, bind: QueryKey<'_>) -> AppResult<Option<User>> {
        let sql = format!("{SELECT_USERS} WHERE {clause} GROUP BY u.id");
        let query = sqlx::query(&sql);
        let query = match bind {
            QueryKey::Email(email) => query.bind(email),
            QueryKey::Id(id) => query.bind(id),
        };

        let row = query
            .fetch_optional(self.db.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load user", e))?;

        row.as_ref().map(user_from_row).transpose()
    }
}

enum QueryKey<'a> {
    Email(&'a str),
    Id(UserId),
}

#[async_trait]
impl UserStore for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.fetch_one_where("u.email = $1", QueryKey::Email(email))
            .await
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        self.fetch_one_where("u.id = $1", QueryKey::Id(id)).await
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(self.db.pool())
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check email existence", e)
            })
    }

    async fn save(&self, user: CreateUser) -> AppResult<User> {
        let id = UserId::new();
        let created_at = Utc::now();

        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e))?;

        sqlx::query(
            "INSERT INTO users (id, first_name, last_name, email, password_hash, \
             newsletter_subscribed, account_enabled, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7)",
        )
        .bind(id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.newsletter_subscribed)
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict("Email is already in use")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })?;

        for role in &user.roles {
            let linked = sqlx::query(
                "INSERT INTO user_roles (user_id, role_id) SELECT $1, id FROM roles WHERE name = $2",
            )
            .bind(id)
            .bind(role.storage_name())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to link role", e))?;

            if linked.rows_affected() == 0 {
                return Err(AppError::not_found(format!("Role '{role}' is not seeded")));
            }
        }

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit user", e))?;

        Ok(user.into_user(id, created_at))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let sql = format!("{SELECT_USERS} GROUP BY u.id ORDER BY u.created_at ASC");
        let rows = sqlx::query(&sql)
            .fetch_all(self.db.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))?;

        rows.iter().map(user_from_row).collect()
    }

    async fn ping(&self) -> AppResult<()> {
        self.db.ping().await
    }
}

fn user_from_row(row: &PgRow) -> AppResult<User> {
    let decode = |e: sqlx::Error| AppError::with_source(ErrorKind::Database, "Malformed user row", e);

    let role_names: Vec<String> = row.try_get("roles").map_err(decode)?;
    let roles = roles_from_names(&role_names)?;

    Ok(User {
        id: row.try_get("id").map_err(decode)?,
        first_name: row.try_get("first_name").map_err(decode)?,
        last_name: row.try_get("last_name").map_err(decode)?,
        email: row.try_get("email").map_err(decode)?,
        password_hash: row.try_get("password_hash").map_err(decode)?,
        roles,
        newsletter_subscribed: row.try_get("newsletter_subscribed").map_err(decode)?,
        enabled: row.try_get("account_enabled").map_err(decode)?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(decode)?,
    })
}

/// Stored role names are trusted data; an unknown one is a schema fault.
fn roles_from_names(names: &[String]) -> AppResult<BTreeSet<Role>> {
    names
        .iter()
        .map(|name| {
            name.parse::<Role>().map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Unknown role '{name}' in user_roles"),
                    e,
                )
            })
        })
        .collect()
}
