//! Masjid directory records.
//!
//! A `Masjid` is the top-level entity of the directory. It owns zero or more
//! bank accounts ([`Bank`](crate::Bank)).

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Masjid {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

/// Fields for creating a new masjid. The id is generated on insert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MasjidNew {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

impl Masjid {
    pub fn new(fields: MasjidNew) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: fields.name,
            address: fields.address,
            city: fields.city,
            state: fields.state,
            zip_code: fields.zip_code,
            country: fields.country,
            phone: fields.phone,
            email: fields.email,
            website: fields.website,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "masjids")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::banks::Entity")]
    Banks,
}

impl Related<super::banks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Banks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Masjid> for ActiveModel {
    fn from(masjid: &Masjid) -> Self {
        Self {
            id: ActiveValue::Set(masjid.id.clone()),
            name: ActiveValue::Set(masjid.name.clone()),
            address: ActiveValue::Set(masjid.address.clone()),
            city: ActiveValue::Set(masjid.city.clone()),
            state: ActiveValue::Set(masjid.state.clone()),
            zip_code: ActiveValue::Set(masjid.zip_code.clone()),
            country: ActiveValue::Set(masjid.country.clone()),
            phone: ActiveValue::Set(masjid.phone.clone()),
            email: ActiveValue::Set(masjid.email.clone()),
            website: ActiveValue::Set(masjid.website.clone()),
        }
    }
}

impl From<Model> for Masjid {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
            city: model.city,
            state: model.state,
            zip_code: model.zip_code,
            country: model.country,
            phone: model.phone,
            email: model.email,
            website: model.website,
        }
    }
}
