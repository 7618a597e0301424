//! # User Repository
//!
//! User accounts and login.
//!
//! ## Login Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  login(email, password)                                             │
//! │       │                                                             │
//! │       ├── match             → Ok(Some(User)) → Session::new(user)   │
//! │       │                                                             │
//! │       └── no match          → Ok(None)  (never an error: a wrong    │
//! │                               password is an expected outcome)      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A freshly created database has no accounts; `ensure_default_admin`
//! seeds one so the first login is possible at all.

use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use pharma_core::{Role, User};

/// Default admin credentials seeded into an empty users table.
const DEFAULT_ADMIN_NAME: &str = "Administrator";
const DEFAULT_ADMIN_EMAIL: &str = "admin@lifepharma.com";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Repository for user accounts and authentication.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Authenticates by email and password.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - Credentials match
    /// * `Ok(None)` - Unknown email or wrong password
    pub async fn login(&self, email: &str, password: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, role
            FROM users
            WHERE email = ?1 AND password = ?2
            "#,
        )
        .bind(email)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;

        if user.is_some() {
            info!(email = %email, "Login succeeded");
        } else {
            debug!(email = %email, "Login failed");
        }

        Ok(user)
    }

    /// Seeds a default admin account when the users table is empty.
    ///
    /// Idempotent: once any user exists, this does nothing.
    ///
    /// ## Returns
    /// `Ok(true)` when the admin was created, `Ok(false)` when accounts
    /// already existed.
    pub async fn ensure_default_admin(&self) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        if count > 0 {
            return Ok(false);
        }

        let admin = User {
            id: generate_user_id(),
            name: DEFAULT_ADMIN_NAME.to_string(),
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
            role: Role::Admin,
        };

        self.insert(&admin).await?;
        info!(email = %admin.email, "Seeded default admin account");

        Ok(true)
    }

    /// Lists all users ordered by name.
    pub async fn list(&self) -> DbResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, role FROM users ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Gets a user by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, role FROM users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Inserts a new user.
    ///
    /// Fails with [`DbError::UniqueViolation`] when the email is taken.
    pub async fn insert(&self, user: &User) -> DbResult<()> {
        debug!(id = %user.id, email = %user.email, role = %user.role.as_str(), "Inserting user");

        sqlx::query(
            "INSERT INTO users (id, name, email, password, role) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.role)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing user.
    pub async fn update(&self, user: &User) -> DbResult<()> {
        debug!(id = %user.id, "Updating user");

        let result = sqlx::query(
            "UPDATE users SET name = ?2, email = ?3, password = ?4, role = ?5 WHERE id = ?1",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.role)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", &user.id));
        }

        Ok(())
    }

    /// Deletes a user.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Helper to generate a new user ID.
pub fn generate_user_id() -> String {
    Uuid::new_v4().to_string()
}
