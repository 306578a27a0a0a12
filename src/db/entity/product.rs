use std::str::FromStr;

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::NotSet;
use sea_orm::ActiveValue::Set;
use sea_orm::QueryOrder;
use sea_orm::QuerySelect;
use serde::Deserialize;
use serde::Serialize;
use tracing::instrument;

use crate::types::invalid_input;
use crate::types::Result;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:        i32,
    pub name:      String,
    pub price:     Decimal,
    // Units in stock.
    pub quantity:  i32,
    pub brand:     String,
    pub supplier:  String,
    pub old_stock: i32,
    pub category:  String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::billing_product::Entity")]
    BillingProduct,
}

impl Related<super::billing_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BillingProduct.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Product fields as submitted by the add and edit forms. Numbers arrive as text and are converted by
/// [`ProductForm::into_active_model`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name:      String,
    #[serde(default)]
    pub price:     String,
    #[serde(default)]
    pub quantity:  String,
    #[serde(default)]
    pub brand:     String,
    #[serde(default)]
    pub supplier:  String,
    #[serde(default, rename = "oldStock")]
    pub old_stock: String,
    #[serde(default)]
    pub category:  String,
}

impl ProductForm {
    pub fn into_active_model(self) -> Result<ActiveModel> {
        let price = Decimal::from_str(self.price.trim())
            .map_err(|err| invalid_input!("price", "'{}' is not a decimal number: {err}", self.price))?;

        Ok(ActiveModel {
            id:        NotSet,
            name:      Set(self.name),
            price:     Set(price),
            quantity:  Set(Self::count("quantity", &self.quantity)?),
            brand:     Set(self.brand),
            supplier:  Set(self.supplier),
            old_stock: Set(Self::count("oldStock", &self.old_stock)?),
            category:  Set(self.category),
        })
    }

    // Stock counters may be left blank on the form, which means zero.
    fn count(field: &str, value: &str) -> Result<i32> {
        let value = value.trim();
        if value.is_empty() {
            Ok(0)
        }
        else {
            value
                .parse()
                .map_err(|err| invalid_input!(field, "'{value}' is not an integer: {err}"))
        }
    }
}

impl From<Model> for ProductForm {
    fn from(product: Model) -> Self {
        Self {
            name:      product.name,
            price:     product.price.to_string(),
            quantity:  product.quantity.to_string(),
            brand:     product.brand,
            supplier:  product.supplier,
            old_stock: product.old_stock.to_string(),
            category:  product.category,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Manager {
    db: DatabaseConnection,
}

impl Manager {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    #[instrument(level = "trace", skip(self))]
    pub async fn list(&self) -> Result<Vec<Model>> {
        Ok(Entity::find().order_by_asc(Column::Id).all(&self.db).await?)
    }

    #[instrument(level = "trace", skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Model>> {
        Ok(Entity::find_by_id(id).one(&self.db).await?)
    }

    #[instrument(level = "trace", skip(self))]
    pub async fn create(&self, form: ProductForm) -> Result<Model> {
        Ok(form.into_active_model()?.insert(&self.db).await?)
    }

    /// Overwrite every field of product `id`. Returns `false` if there is no such product.
    #[instrument(level = "trace", skip(self))]
    pub async fn update(&self, id: i32, form: ProductForm) -> Result<bool> {
        let res = Entity::update_many()
            .set(form.into_active_model()?)
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    /// Delete product `id`. Deleting a missing product is not an error; the number of removed rows is returned.
    #[instrument(level = "trace", skip(self))]
    pub async fn delete(&self, id: i32) -> Result<u64> {
        Ok(Entity::delete_by_id(id).exec(&self.db).await?.rows_affected)
    }
}

/// Current unit price of product `id`, if the product exists.
pub async fn price_of<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Decimal>> {
    Ok(Entity::find_by_id(id)
        .select_only()
        .column(Column::Price)
        .into_tuple::<Decimal>()
        .one(db)
        .await?)
}
