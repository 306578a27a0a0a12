//! Schema bootstrap. The application does not require these to run against an existing database; they are applied on
//! `--migrate` and by the test-suite.
pub mod billing;
pub mod billing_product;
pub mod customer;
pub mod product;

use sea_orm::DbBackend;
use sea_orm_migration::prelude::*;

pub struct Migrator;

impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(customer::Migration),
            Box::new(product::Migration),
            Box::new(billing::Migration),
            Box::new(billing_product::Migration),
        ]
    }
}

// Money column. SQLite has no exact decimal storage, its values are kept as REAL.
pub(crate) fn money<T: IntoIden>(manager: &SchemaManager, name: T) -> ColumnDef {
    let mut col = ColumnDef::new(name);
    match manager.get_database_backend() {
        DbBackend::Sqlite => col.double(),
        _ => col.decimal_len(12, 2),
    };
    col.not_null().to_owned()
}
