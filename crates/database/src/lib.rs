//! SQLite persistence layer for Questline.
//!
//! This crate provides async database operations for users, characters,
//! streaks, boosts, events, and the token ledger using SQLx with SQLite.
//! [`SqliteRewardStore`] implements the `reward_core::RewardStore` trait
//! over this layer; its `commit_reward` is the atomic boundary that
//! applies a reward and advances the streak in one transaction.
//!
//! # Example
//!
//! ```no_run
//! use database::{user, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:questline.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Create a user
//!     user::create_user(db.pool(), "c27fb365-0c84-4cf2-8555-814bb065e448", "Bob").await?;
//!
//!     Ok(())
//! }
//! ```

pub mod boost;
pub mod character;
pub mod error;
pub mod event;
pub mod ledger;
pub mod models;
pub mod store;
pub mod streak;
pub mod transaction;
pub mod user;

pub use error::{DatabaseError, Result};
pub use models::{Character, CharacterBoost, QuestEvent, QuestStreak, TokenTransaction, User};
pub use store::SqliteRewardStore;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    /// Submissions for different users run on separate pool connections.
    const DEFAULT_POOL_SIZE: u32 = 20;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/questline.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing; use pool size 1 so every query
    /// // sees the same in-memory instance)
    /// let db = database::Database::connect_with_pool_size("sqlite::memory:", 1).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
