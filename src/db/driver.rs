//! Database drivers.
#[cfg(feature = "pg")]
pub mod pg;
#[cfg(feature = "sqlite")]
pub mod sqlite;

use std::fmt::Debug;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::types::Result;

/// Trait for database [drivers](self#modules).
///
/// The connection handed out by a driver is a pool handle. Cloning it is cheap; every query acquires a pooled
/// connection for its own duration only.
#[async_trait]
pub trait DatabaseDriver: Debug + Sync + Send + 'static {
    /// Return driver name.
    fn name(&self) -> &'static str;
    /// Returns the database connection pool for the driver.
    fn connection(&self) -> DatabaseConnection;
    /// Configure the database session parameters and verify the backend is reachable. See corresponding driver
    /// implementation for details.
    async fn configure(&self) -> Result<()>;
    /// Give the backend a chance to flush its state. Called before shutdown.
    async fn checkpoint(&self) -> Result<()>;
}
