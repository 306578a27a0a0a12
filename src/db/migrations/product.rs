use sea_orm_migration::prelude::*;

use super::money;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "product_migration"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::Name).string().not_null())
                    .col(&mut money(manager, Products::Price))
                    .col(ColumnDef::new(Products::Quantity).integer().not_null().default(0))
                    .col(ColumnDef::new(Products::Brand).string().not_null().default(""))
                    .col(ColumnDef::new(Products::Supplier).string().not_null().default(""))
                    .col(ColumnDef::new(Products::OldStock).integer().not_null().default(0))
                    .col(ColumnDef::new(Products::Category).string().not_null().default(""))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Products::Table).to_owned()).await
    }
}

#[derive(Iden)]
pub enum Products {
    Table,
    Id,
    Name,
    Price,
    Quantity,
    Brand,
    Supplier,
    OldStock,
    Category,
}
