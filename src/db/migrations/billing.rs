use sea_orm_migration::prelude::*;

use super::money;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "billing_migration"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Billings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Billings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Billings::CustomerId).integer().not_null())
                    .col(&mut money(manager, Billings::TotalAmount))
                    .col(
                        ColumnDef::new(Billings::Date)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-billings-customer_id")
                    .table(Billings::Table)
                    .col(Billings::CustomerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Billings::Table).to_owned()).await
    }
}

#[derive(Iden)]
pub enum Billings {
    Table,
    Id,
    CustomerId,
    TotalAmount,
    Date,
}
