use std::path::PathBuf;

use fieldx::fxstruct;
use garde::Validate;

/// Command line and environment configuration.
#[derive(Debug, Clone, clap::Parser, Validate)]
#[fxstruct(no_new, get(copy))]
#[clap(about, version, author, name = "billing-desk")]
pub struct Cli {
    /// Address to serve HTTP on.
    #[clap(long, short, env = "BILLING_LISTEN", default_value = "127.0.0.1:3000")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    listen: String,

    /// Use SQLite as the database backend.
    #[clap(long, env = "BILLING_SQLITE", default_value_t = false)]
    #[garde(
        custom(Self::one_backend(&self.pg)),
        custom(Self::feature_enabled(cfg!(feature = "sqlite"), "sqlite"))
    )]
    sqlite: bool,

    /// Path to the SQLite database file. Created if missing.
    #[clap(long, env = "BILLING_SQLITE_PATH", default_value = "billing.db")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    sqlite_path: PathBuf,

    /// Use PostgreSQL as the database backend.
    #[clap(long, env = "BILLING_PG", default_value_t = false)]
    #[garde(custom(Self::feature_enabled(cfg!(feature = "pg"), "pg")))]
    pg: bool,

    #[clap(long, env = "BILLING_PG_HOST", default_value = "localhost")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    pg_host: String,

    #[clap(long, env = "BILLING_PG_PORT", default_value_t = 5432)]
    #[garde(skip)]
    pg_port: u16,

    #[clap(long, env = "BILLING_PG_USER", default_value = "postgres")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    pg_user: String,

    #[clap(long, env = "BILLING_PG_PASSWORD", hide_env_values = true, default_value = "")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    pg_password: String,

    #[clap(long, env = "BILLING_PG_DATABASE", default_value = "billing_db")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    pg_database: String,

    /// Upper bound of the database connection pool.
    #[clap(long, env = "BILLING_MAX_CONNECTIONS", default_value_t = 10)]
    #[garde(range(min = 1))]
    max_connections: u32,

    /// Create missing tables before serving.
    #[clap(long, env = "BILLING_MIGRATE", default_value_t = false)]
    #[garde(skip)]
    migrate: bool,

    /// File to send log into
    #[clap(long, env = "BILLING_LOG_FILE")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn one_backend<'a>(other: &'a bool) -> impl FnOnce(&'a bool, &()) -> garde::Result {
        move |value, _| {
            if *value != *other {
                Ok(())
            }
            else if *value {
                Err(garde::Error::new("--sqlite and --pg are mutually exclusive"))
            }
            else {
                Err(garde::Error::new("a database backend is required: use --sqlite or --pg"))
            }
        }
    }

    fn feature_enabled<'a>(
        feature_enabled: bool,
        feature: &'static str,
    ) -> impl FnOnce(&'a bool, &()) -> garde::Result {
        move |value, _| {
            if !*value || feature_enabled {
                Ok(())
            }
            else {
                Err(garde::Error::new(format!(
                    "Build feature '{feature}' must be enabled to use this backend."
                )))
            }
        }
    }
}
