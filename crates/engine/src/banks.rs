//! Bank account records.
//!
//! A `Bank` belongs to exactly one [`Masjid`](crate::Masjid) and owns zero or
//! more [`Deposit`](crate::Deposit)s.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    pub id: String,
    pub name: String,
    pub account_number: String,
    pub routing_number: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub masjid_id: String,
}

/// Fields for creating a new bank account. The id is generated on insert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BankNew {
    pub masjid_id: String,
    pub name: String,
    pub account_number: String,
    pub routing_number: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl Bank {
    pub fn new(fields: BankNew) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: fields.name,
            account_number: fields.account_number,
            routing_number: fields.routing_number,
            address: fields.address,
            city: fields.city,
            state: fields.state,
            zip_code: fields.zip_code,
            country: fields.country,
            masjid_id: fields.masjid_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "banks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub account_number: String,
    pub routing_number: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub masjid_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::masjids::Entity",
        from = "Column::MasjidId",
        to = "super::masjids::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Masjids,
    #[sea_orm(has_many = "super::deposits::Entity")]
    Deposits,
}

impl Related<super::masjids::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Masjids.def()
    }
}

impl Related<super::deposits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deposits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Bank> for ActiveModel {
    fn from(bank: &Bank) -> Self {
        Self {
            id: ActiveValue::Set(bank.id.clone()),
            name: ActiveValue::Set(bank.name.clone()),
            account_number: ActiveValue::Set(bank.account_number.clone()),
            routing_number: ActiveValue::Set(bank.routing_number.clone()),
            address: ActiveValue::Set(bank.address.clone()),
            city: ActiveValue::Set(bank.city.clone()),
            state: ActiveValue::Set(bank.state.clone()),
            zip_code: ActiveValue::Set(bank.zip_code.clone()),
            country: ActiveValue::Set(bank.country.clone()),
            masjid_id: ActiveValue::Set(bank.masjid_id.clone()),
        }
    }
}

impl From<Model> for Bank {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            account_number: model.account_number,
            routing_number: model.routing_number,
            address: model.address,
            city: model.city,
            state: model.state,
            zip_code: model.zip_code,
            country: model.country,
            masjid_id: model.masjid_id,
        }
    }
}
