use std::collections::HashMap;

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::NotSet;
use sea_orm::ActiveValue::Set;
use sea_orm::FromQueryResult;
use sea_orm::IntoActiveModel;
use sea_orm::JoinType;
use sea_orm::PaginatorTrait;
use sea_orm::QueryOrder;
use sea_orm::QuerySelect;
use sea_orm::TransactionTrait;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::instrument;
use tracing::warn;

use super::billing_product;
use super::customer;
use super::product;
use crate::types::invalid_input;
use crate::types::Result;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "billings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:           i32,
    pub customer_id:  i32,
    pub total_amount: Decimal,
    pub date:         DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    #[sea_orm(has_many = "super::billing_product::Entity")]
    BillingProduct,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::billing_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BillingProduct.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// One (product, quantity) pair of a submitted billing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineItem {
    pub product_id: i32,
    pub quantity:   i32,
}

/// A decoded billing form.
///
/// The form carries a `customer` field, zero or more `products` fields (one per selected product, in the order they
/// were submitted), and a `quantity-<product id>` field for every selected product.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BillingForm {
    pub customer_id: i32,
    pub lines:       Vec<LineItem>,
}

impl BillingForm {
    pub const CUSTOMER_FIELD: &'static str = "customer";
    pub const PRODUCTS_FIELD: &'static str = "products";
    pub const QUANTITY_PREFIX: &'static str = "quantity-";

    pub fn quantity_field(product_id: i32) -> String {
        format!("{}{product_id}", Self::QUANTITY_PREFIX)
    }

    /// Decode the raw urlencoded pairs, preserving submission order of the products.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self> {
        let mut customer = None;
        let mut products = Vec::new();
        let mut quantities = HashMap::new();

        for (key, value) in pairs {
            if key == Self::CUSTOMER_FIELD {
                customer = Some(value.as_str());
            }
            else if key == Self::PRODUCTS_FIELD {
                products.push(value.as_str());
            }
            else if let Some(product) = key.strip_prefix(Self::QUANTITY_PREFIX) {
                quantities.insert(product, value.as_str());
            }
        }

        let customer = customer.ok_or_else(|| invalid_input!(Self::CUSTOMER_FIELD, "no customer selected"))?;
        let customer_id = customer
            .trim()
            .parse()
            .map_err(|err| invalid_input!(Self::CUSTOMER_FIELD, "'{customer}' is not a customer id: {err}"))?;

        let mut lines = Vec::with_capacity(products.len());
        for product in products {
            let product_id = product
                .trim()
                .parse()
                .map_err(|err| invalid_input!(Self::PRODUCTS_FIELD, "'{product}' is not a product id: {err}"))?;
            let field = format!("{}{product}", Self::QUANTITY_PREFIX);
            let quantity = quantities
                .get(product)
                .ok_or_else(|| invalid_input!(&field, "missing quantity"))?;
            let quantity = quantity
                .trim()
                .parse()
                .map_err(|err| invalid_input!(&field, "'{quantity}' is not an integer: {err}"))?;

            lines.push(LineItem { product_id, quantity });
        }

        Ok(Self { customer_id, lines })
    }
}

/// What [`Manager::create`] persisted.
#[derive(Clone, Debug)]
pub struct BillingReceipt {
    pub billing: Model,
    pub lines:   Vec<billing_product::Model>,
    /// Product ids which were submitted but not found, in submission order.
    pub skipped: Vec<i32>,
}

/// A billing as shown in the billing list.
#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct BillingRow {
    pub id:            i32,
    pub customer_name: String,
    pub total_amount:  Decimal,
    pub date:          DateTime,
}

/// One line of a billing with the product it refers to, if the product still exists.
#[derive(Clone, Debug)]
pub struct BillingLine {
    pub line:    billing_product::Model,
    pub product: Option<product::Model>,
}

impl BillingLine {
    /// Line total at the product's current price. `None` if the product is gone or the amount overflows.
    pub fn amount(&self) -> Option<Decimal> {
        self.product
            .as_ref()
            .and_then(|p| p.price.checked_mul(Decimal::from(self.line.quantity)))
    }
}

#[derive(Clone, Debug)]
pub struct BillingDetails {
    pub billing:  Model,
    pub customer: Option<customer::Model>,
    pub lines:    Vec<BillingLine>,
}

/// Dashboard figures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SalesSummary {
    pub total_sales:   u64,
    pub total_revenue: Decimal,
}

#[derive(Clone, Debug)]
pub struct Manager {
    db: DatabaseConnection,
}

impl Manager {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a billing from a decoded form.
    ///
    /// The billing row is inserted with a zero total, then every line item whose product exists is priced and
    /// recorded, and finally the accumulated total is stored. Line items referring to unknown products are logged and
    /// dropped. Everything happens in one transaction: on error nothing is persisted.
    #[instrument(level = "trace", skip(self))]
    pub async fn create(&self, form: &BillingForm) -> Result<BillingReceipt> {
        let txn = self.db.begin().await?;

        let billing = ActiveModel {
            id:           NotSet,
            customer_id:  Set(form.customer_id),
            total_amount: Set(Decimal::ZERO),
            date:         Set(chrono::Utc::now().naive_utc()),
        }
        .insert(&txn)
        .await?;

        let mut total = Decimal::ZERO;
        let mut lines = Vec::with_capacity(form.lines.len());
        let mut skipped = Vec::new();

        for item in &form.lines {
            let Some(price) = product::price_of(&txn, item.product_id).await?
            else {
                warn!(
                    "Product with ID {} not found, dropping it from billing #{}",
                    item.product_id, billing.id
                );
                skipped.push(item.product_id);
                continue;
            };

            total = price
                .checked_mul(Decimal::from(item.quantity))
                .and_then(|amount| total.checked_add(amount))
                .ok_or_else(|| {
                    invalid_input!(
                        BillingForm::quantity_field(item.product_id),
                        "billing total overflows at {} x {price}",
                        item.quantity
                    )
                })?;

            let line = billing_product::ActiveModel {
                id:         NotSet,
                billing_id: Set(billing.id),
                product_id: Set(item.product_id),
                quantity:   Set(item.quantity),
            }
            .insert(&txn)
            .await?;
            lines.push(line);
        }

        let mut billing = billing.into_active_model();
        billing.total_amount = Set(total);
        let billing = billing.update(&txn).await?;

        txn.commit().await?;

        debug!(
            "Billing #{} for customer #{}: {} line(s), total {}",
            billing.id,
            billing.customer_id,
            lines.len(),
            billing.total_amount
        );

        Ok(BillingReceipt {
            billing,
            lines,
            skipped,
        })
    }

    /// All billings with their customer's name, newest first. Billings of deleted customers are not listed.
    #[instrument(level = "trace", skip(self))]
    pub async fn list(&self) -> Result<Vec<BillingRow>> {
        Ok(Entity::find()
            .select_only()
            .column(Column::Id)
            .column_as(customer::Column::Name, "customer_name")
            .column(Column::TotalAmount)
            .column(Column::Date)
            .join(JoinType::InnerJoin, Relation::Customer.def())
            .order_by_desc(Column::Id)
            .into_model::<BillingRow>()
            .all(&self.db)
            .await?)
    }

    #[instrument(level = "trace", skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Model>> {
        Ok(Entity::find_by_id(id).one(&self.db).await?)
    }

    #[instrument(level = "trace", skip(self))]
    pub async fn details(&self, id: i32) -> Result<Option<BillingDetails>> {
        let Some((billing, customer)) = Entity::find_by_id(id)
            .find_also_related(customer::Entity)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let lines = billing_product::Entity::find()
            .filter(billing_product::Column::BillingId.eq(billing.id))
            .order_by_asc(billing_product::Column::Id)
            .find_also_related(product::Entity)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|(line, product)| BillingLine { line, product })
            .collect();

        Ok(Some(BillingDetails {
            billing,
            customer,
            lines,
        }))
    }

    #[instrument(level = "trace", skip(self))]
    pub async fn summary(&self) -> Result<SalesSummary> {
        let total_sales = Entity::find().count(&self.db).await?;
        let total_revenue = Entity::find()
            .select_only()
            .column_as(Column::TotalAmount.sum(), "total_revenue")
            .into_tuple::<Option<Decimal>>()
            .one(&self.db)
            .await?
            .flatten()
            .unwrap_or_default();

        Ok(SalesSummary {
            total_sales,
            total_revenue,
        })
    }
}
