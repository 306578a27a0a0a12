use std::time::Duration;

use async_trait::async_trait;
use fieldx::fxstruct;
use sea_orm::ConnectOptions;
use sea_orm::ConnectionTrait;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::types::Result;

use super::DatabaseDriver;

/// PostgreSQL driver.
///
/// The pool connects lazily: a server that is down at startup does not prevent the application from serving, each
/// query simply tries to acquire a connection again.
#[derive(Debug)]
#[fxstruct(sync, rc, no_new, builder)]
pub struct Pg {
    host:            String,
    port:            u16,
    user:            String,
    password:        String,
    database:        String,
    #[fieldx(default(10))]
    max_connections: u32,
    #[fieldx(inner_mut, get(off), set, builder(off))]
    connection:      DatabaseConnection,
}

impl Pg {
    pub async fn connect(&self) -> Result<()> {
        let schema = format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        );
        let mut opts = ConnectOptions::new(&schema);
        opts.max_connections(self.max_connections)
            .min_connections(0)
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(1800))
            .test_before_acquire(true)
            .connect_lazy(true)
            .sqlx_logging(false);

        self.set_connection(sea_orm::Database::connect(opts).await.inspect_err(|e| {
            tracing::error!(
                "Error connecting to database postgres://{}@{}:{}/{}: {e}",
                self.user,
                self.host,
                self.port,
                self.database
            )
        })?);

        Ok(())
    }
}

#[async_trait]
impl DatabaseDriver for Pg {
    fn name(&self) -> &'static str {
        "PostgreSQL"
    }

    fn connection(&self) -> DatabaseConnection {
        self.connection.read().clone()
    }

    async fn configure(&self) -> Result<()> {
        let db = self.connection();
        db.ping().await?;
        let version = db
            .query_one(sea_orm::Statement::from_string(
                db.get_database_backend(),
                "SHOW server_version;",
            ))
            .await?
            .map(|row| row.try_get_by_index::<String>(0))
            .transpose()?;

        info!(
            "Connected to PostgreSQL {} at {}:{}/{}",
            version.as_deref().unwrap_or("(unknown version)"),
            self.host,
            self.port,
            self.database
        );

        Ok(())
    }

    async fn checkpoint(&self) -> Result<()> {
        Ok(())
    }
}
