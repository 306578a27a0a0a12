use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::NotSet;
use sea_orm::ActiveValue::Set;
use sea_orm::QueryOrder;
use serde::Deserialize;
use serde::Serialize;
use tracing::instrument;

use crate::types::Result;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:      i32,
    pub name:    String,
    pub gender:  String,
    pub contact: String,
    pub email:   String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::billing::Entity")]
    Billing,
}

impl Related<super::billing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Billing.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Customer fields as submitted by the add and edit forms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CustomerForm {
    #[serde(default)]
    pub name:    String,
    #[serde(default)]
    pub gender:  String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub email:   String,
}

impl CustomerForm {
    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id:      NotSet,
            name:    Set(self.name),
            gender:  Set(self.gender),
            contact: Set(self.contact),
            email:   Set(self.email),
        }
    }
}

impl From<Model> for CustomerForm {
    fn from(customer: Model) -> Self {
        Self {
            name:    customer.name,
            gender:  customer.gender,
            contact: customer.contact,
            email:   customer.email,
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
    pub async fn create(&self, form: CustomerForm) -> Result<Model> {
        Ok(form.into_active_model().insert(&self.db).await?)
    }

    /// Overwrite every field of customer `id`. Returns `false` if there is no such customer.
    #[instrument(level = "trace", skip(self))]
    pub async fn update(&self, id: i32, form: CustomerForm) -> Result<bool> {
        let res = Entity::update_many()
            .set(form.into_active_model())
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    /// Delete customer `id`. Deleting a missing customer is not an error; the number of removed rows is returned.
    #[instrument(level = "trace", skip(self))]
    pub async fn delete(&self, id: i32) -> Result<u64> {
        Ok(Entity::delete_by_id(id).exec(&self.db).await?.rows_affected)
    }
}
