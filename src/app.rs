use std::ffi::OsString;
use std::fs::OpenOptions;
use std::sync::Arc;
use std::sync::Mutex;

use clap::error::ErrorKind;
use clap::CommandFactory;
use clap::Parser;
use garde::Validate;
use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tracing::error;
use tracing::info;
use tracing::warn;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Cli;
use crate::db::driver::DatabaseDriver;
use crate::db::migrations::Migrator;
use crate::types::BillingError;
use crate::types::Result;
use crate::web;
use crate::web::BillingDesk;

/// The application: configuration in, running HTTP server out.
#[derive(Debug)]
pub struct BillingApp {
    cli: Cli,
}

impl BillingApp {
    /// Build the application from explicit arguments. The first one is the program name.
    pub fn from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(Self {
            cli: Cli::try_parse_from(args)?,
        })
    }

    pub fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Parse the process arguments and serve until interrupted.
    pub async fn run() -> Result<()> {
        let cli = match Cli::try_parse() {
            Ok(cli) => cli,
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    err.print()?;
                    return Ok(());
                }
                _ => {
                    return Err(err.into());
                }
            },
        };

        Self { cli }.execute().await
    }

    fn validate(&self) -> Result<()> {
        if let Err(err) = self.cli.validate() {
            let mut cmd = Cli::command();
            return Err(cmd.error(ErrorKind::InvalidValue, err).into());
        }

        Ok(())
    }

    fn setup_tracing(&self) -> Result<()> {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let log_file = self.cli.log_file();
        let writer = if let Some(ref log_file) = log_file {
            let file = OpenOptions::new().create(true).append(true).open(log_file)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        else {
            BoxMakeWriter::new(std::io::stdout)
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(log_file.is_none()),
            )
            .try_init()?;

        info!("Tracing initialized");

        Ok(())
    }

    async fn connect(&self) -> Result<Arc<dyn DatabaseDriver>> {
        let cli = &self.cli;

        #[cfg(feature = "sqlite")]
        {
            if cli.sqlite() {
                let sqlite_path = cli.sqlite_path();
                info!("Opening SQLite database {}", sqlite_path.display());
                let driver = crate::db::driver::sqlite::Sqlite::connect(&sqlite_path, cli.max_connections()).await?;
                return Ok(Arc::new(driver));
            }
        }

        #[cfg(feature = "pg")]
        {
            if cli.pg() {
                let driver = crate::db::driver::pg::Pg::builder()
                    .host(cli.pg_host())
                    .port(cli.pg_port())
                    .user(cli.pg_user())
                    .password(cli.pg_password())
                    .database(cli.pg_database())
                    .max_connections(cli.max_connections())
                    .build()?;
                info!(
                    "Connecting to PostgreSQL database {}@{}:{}/{}",
                    cli.pg_user(),
                    cli.pg_host(),
                    cli.pg_port(),
                    cli.pg_database()
                );
                driver.connect().await?;
                return Ok(driver);
            }
        }

        Err(BillingError::invalid_input(
            "backend",
            "no database backend is available in this build",
        ))
    }

    pub async fn execute(&self) -> Result<()> {
        self.validate()?;
        self.setup_tracing()?;

        let driver = self.connect().await?;

        // The server keeps running on a misbehaving backend; requests will report the failure.
        if let Err(err) = driver.configure().await {
            error!("Failed to configure {} connection: {err}", driver.name());
        }

        if self.cli.migrate() {
            Migrator::up(&driver.connection(), None).await?;
            info!("Database schema is up to date");
        }

        let app = web::router(Arc::new(BillingDesk::new(driver.clone())));

        let listener = TcpListener::bind(self.cli.listen()).await?;
        info!("Serving on http://{}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Shutting down");

        if let Err(err) = driver.checkpoint().await {
            warn!("{} checkpoint failed: {err}", driver.name());
        }
        driver.connection().close().await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C"),
        Err(err) => {
            error!("Unable to listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
    }
}
