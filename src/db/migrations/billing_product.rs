use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "billing_product_migration"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BillingProducts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BillingProducts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BillingProducts::BillingId).integer().not_null())
                    .col(ColumnDef::new(BillingProducts::ProductId).integer().not_null())
                    .col(ColumnDef::new(BillingProducts::Quantity).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-billing_products-billing_id")
                            .from(BillingProducts::Table, BillingProducts::BillingId)
                            .to(super::billing::Billings::Table, super::billing::Billings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-billing_products-billing_id")
                    .table(BillingProducts::Table)
                    .col(BillingProducts::BillingId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BillingProducts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum BillingProducts {
    Table,
    Id,
    BillingId,
    ProductId,
    Quantity,
}
