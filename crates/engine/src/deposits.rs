//! Deposit records.
//!
//! A `Deposit` belongs to exactly one [`Bank`](crate::Bank).
//!
//! Amounts are stored as integer **minor units** (cents for USD); floats
//! never touch the money path. `deposit_date` is when the money entered the
//! account, which is distinct from the row timestamps.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub id: String,
    pub amount_minor: i64,
    pub description: Option<String>,
    pub deposit_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub bank_id: String,
}

/// Fields for creating a new deposit. The id and row timestamps are generated
/// on insert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepositNew {
    pub bank_id: String,
    pub amount_minor: i64,
    pub description: Option<String>,
    pub deposit_date: DateTime<Utc>,
}

impl Deposit {
    pub fn new(fields: DepositNew) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            amount_minor: fields.amount_minor,
            description: fields.description,
            deposit_date: fields.deposit_date,
            created_at: now,
            updated_at: now,
            bank_id: fields.bank_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "deposits")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub amount_minor: i64,
    pub description: Option<String>,
    pub deposit_date: DateTimeUtc,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub bank_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::banks::Entity",
        from = "Column::BankId",
        to = "super::banks::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Banks,
}

impl Related<super::banks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Banks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Deposit> for ActiveModel {
    fn from(deposit: &Deposit) -> Self {
        Self {
            id: ActiveValue::Set(deposit.id.clone()),
            amount_minor: ActiveValue::Set(deposit.amount_minor),
            description: ActiveValue::Set(deposit.description.clone()),
            deposit_date: ActiveValue::Set(deposit.deposit_date),
            created_at: ActiveValue::Set(deposit.created_at),
            updated_at: ActiveValue::Set(deposit.updated_at),
            bank_id: ActiveValue::Set(deposit.bank_id.clone()),
        }
    }
}

impl From<Model> for Deposit {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            amount_minor: model.amount_minor,
            description: model.description,
            deposit_date: model.deposit_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
            bank_id: model.bank_id,
        }
    }
}
