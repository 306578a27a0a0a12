//! Relational storage: drivers, entities and schema migrations.
pub mod driver;
pub mod entity;
pub mod migrations;

pub mod prelude {
    pub use super::driver::DatabaseDriver;
    pub use super::entity::*;
}
