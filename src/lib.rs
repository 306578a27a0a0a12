//! # billing-desk
//!
//! A small server-rendered web application for running a shop counter: keep a list of customers and products, issue
//! billings (invoices) that tie a customer to a set of products with quantities, and watch the running totals on a
//! dashboard.
//!
//! # Layout
//!
//! - [`db`] is the storage layer. Every table is a SeaORM entity accompanied by a `Manager` which implements the
//!   operations the web layer needs. [`db::driver`] hides the difference between the supported backends, SQLite and
//!   PostgreSQL, each behind its own crate feature.
//! - [`web`] is the HTTP surface built with axum. Handlers are thin: decode the request, call a manager, render a page
//!   or redirect.
//! - [`app`] ties the two together: it reads the [configuration](config::Cli), initializes tracing, connects to the
//!   database and serves until interrupted.
//!
//! # Billing
//!
//! A billing is created from a form carrying a customer and a list of selected products with a quantity for each. The
//! total is computed on the server from the products' current prices; products that can't be found are skipped with a
//! warning. The billing row, its line items, and its total are written in a single transaction.
//!
//! # Running
//!
//! ```text
//! billing-desk --sqlite --sqlite-path shop.db --migrate
//! ```
//!
//! Every option can also be set through a `BILLING_*` environment variable; see `billing-desk --help`. Log verbosity is
//! controlled with `RUST_LOG`.
pub mod app;
pub mod config;
pub mod db;
pub mod types;
pub mod web;

pub mod prelude {
    pub use crate::app::BillingApp;
    pub use crate::config::Cli;
    pub use crate::db::prelude::*;
    pub use crate::types::BillingError;
    pub use crate::types::Result;
    pub use crate::web::router;
    pub use crate::web::AppState;
}
