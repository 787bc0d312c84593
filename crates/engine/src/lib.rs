//! Core engine for the masjid directory.
//!
//! The engine owns the database handle and exposes the read/write operations
//! the server and CLI build on. The central read is the "latest deposit per
//! bank" composition: one bounded set of queries regardless of how many banks
//! a page of masjids contains, followed by a pure reshaping pass.

use std::collections::HashMap;

pub use banks::{Bank, BankNew};
pub use deposits::{Deposit, DepositNew};
pub use error::EngineError;
pub use masjids::{Masjid, MasjidNew};
pub use seed::SeedReport;

use chrono::{DateTime, Utc};
use sea_orm::{
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Statement, Value, prelude::*,
};

pub mod banks;
pub mod deposits;
pub mod masjids;

mod error;
mod seed;

type ResultEngine<T> = Result<T, EngineError>;

/// Which masjid fields a caller wants back.
///
/// `id` and `name` are always returned; the flags opt into the optional
/// groups. The default is the minimal set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MasjidProjection {
    /// Postal fields: address, city, state, zip code, country.
    pub address: bool,
    /// Contact fields: phone, email, website.
    pub contact: bool,
}

impl MasjidProjection {
    pub fn full() -> Self {
        Self {
            address: true,
            contact: true,
        }
    }
}

/// Which bank fields a caller wants back.
///
/// The minimal set is `id`, `name` and `account_number`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BankProjection {
    pub routing_number: bool,
    /// Postal fields: address, city, state, zip code, country.
    pub address: bool,
}

impl BankProjection {
    pub fn full() -> Self {
        Self {
            routing_number: true,
            address: true,
        }
    }
}

/// Which deposit fields a caller wants back.
///
/// The minimal set is `id`, `amount_minor`, `deposit_date`, `description`
/// and the owning `bank_id`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DepositProjection {
    /// Row timestamps: created_at, updated_at.
    pub timestamps: bool,
}

impl DepositProjection {
    pub fn full() -> Self {
        Self { timestamps: true }
    }
}

/// Filter over masjids. `Id` is unique; `Name` and `City` may match several
/// rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MasjidFilter {
    Id(String),
    Name(String),
    City(String),
}

impl MasjidFilter {
    fn apply(&self, select: Select<masjids::Entity>) -> Select<masjids::Entity> {
        match self {
            Self::Id(id) => select.filter(masjids::Column::Id.eq(id)),
            Self::Name(name) => select.filter(masjids::Column::Name.eq(name)),
            Self::City(city) => select.filter(masjids::Column::City.eq(city)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MasjidOrder {
    NameAsc,
    NameDesc,
}

/// Query for [`Engine::list_masjids_with_banks`].
///
/// When `bank_select`/`deposit_select` are omitted the minimal projections
/// apply. Result order is the storage result order (shaped by `order` when
/// given).
#[derive(Clone, Debug, Default)]
pub struct MasjidListQuery {
    pub filter: Option<MasjidFilter>,
    pub select: MasjidProjection,
    pub bank_select: Option<BankProjection>,
    pub deposit_select: Option<DepositProjection>,
    pub order: Option<MasjidOrder>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

/// Query for [`Engine::masjid_with_banks`].
///
/// `order` and `offset` only matter when the filter is a non-unique lookup
/// path (name or city) matching several rows; the first row wins.
#[derive(Clone, Debug)]
pub struct MasjidGetQuery {
    pub filter: MasjidFilter,
    pub select: MasjidProjection,
    pub bank_select: Option<BankProjection>,
    pub deposit_select: Option<DepositProjection>,
    pub order: Option<MasjidOrder>,
    pub offset: Option<u64>,
}

impl MasjidGetQuery {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            filter: MasjidFilter::Id(id.into()),
            select: MasjidProjection::default(),
            bank_select: None,
            deposit_select: None,
            order: None,
            offset: None,
        }
    }
}

/// A projected masjid with its banks attached.
///
/// Fields outside the minimal set are `None` when the projection left them
/// out (or, for contact fields, when the row itself holds no value).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MasjidWithBanks {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub banks: Vec<BankWithLatestDeposit>,
}

/// A projected bank carrying its single most recent deposit, or `None` when
/// the bank has no deposits. The raw deposit history never appears here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BankWithLatestDeposit {
    pub id: String,
    pub name: String,
    pub account_number: String,
    pub routing_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub masjid_id: String,
    pub latest_deposit: Option<DepositSummary>,
}

/// A projected deposit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepositSummary {
    pub id: String,
    pub amount_minor: i64,
    pub description: Option<String>,
    pub deposit_date: DateTime<Utc>,
    pub bank_id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The underlying connection handle.
    pub fn database(&self) -> &DatabaseConnection {
        &self.database
    }

    /// Insert one masjid and return it.
    pub async fn create_masjid(&self, fields: MasjidNew) -> ResultEngine<Masjid> {
        let masjid = Masjid::new(fields);
        masjids::ActiveModel::from(&masjid)
            .insert(&self.database)
            .await?;
        Ok(masjid)
    }

    /// Insert one bank under an existing masjid.
    pub async fn create_bank(&self, fields: BankNew) -> ResultEngine<Bank> {
        if masjids::Entity::find_by_id(fields.masjid_id.clone())
            .one(&self.database)
            .await?
            .is_none()
        {
            return Err(EngineError::KeyNotFound("masjid not exists".to_string()));
        }

        let bank = Bank::new(fields);
        banks::ActiveModel::from(&bank)
            .insert(&self.database)
            .await?;
        Ok(bank)
    }

    /// Insert one deposit under an existing bank.
    pub async fn create_deposit(&self, fields: DepositNew) -> ResultEngine<Deposit> {
        if fields.amount_minor <= 0 {
            return Err(EngineError::InvalidField(
                "amount_minor must be > 0".to_string(),
            ));
        }
        if banks::Entity::find_by_id(fields.bank_id.clone())
            .one(&self.database)
            .await?
            .is_none()
        {
            return Err(EngineError::KeyNotFound("bank not exists".to_string()));
        }

        let deposit = Deposit::new(fields);
        deposits::ActiveModel::from(&deposit)
            .insert(&self.database)
            .await?;
        Ok(deposit)
    }

    /// Count masjids matching `filter` (all of them when `None`).
    pub async fn count_masjids(&self, filter: Option<&MasjidFilter>) -> ResultEngine<u64> {
        let mut select = masjids::Entity::find();
        if let Some(filter) = filter {
            select = filter.apply(select);
        }
        Ok(select.count(&self.database).await?)
    }

    /// Single-entity variant: the first masjid matching the filter, with its
    /// banks and their latest deposits, or `None` when nothing matches.
    pub async fn masjid_with_banks(
        &self,
        query: &MasjidGetQuery,
    ) -> ResultEngine<Option<MasjidWithBanks>> {
        let list = MasjidListQuery {
            filter: Some(query.filter.clone()),
            select: query.select,
            bank_select: query.bank_select,
            deposit_select: query.deposit_select,
            order: query.order,
            offset: query.offset,
            limit: Some(1),
        };
        Ok(self.list_masjids_with_banks(&list).await?.into_iter().next())
    }

    /// Multi-entity variant: projected masjids, each carrying its banks, each
    /// bank carrying `latest_deposit` instead of its full history.
    pub async fn list_masjids_with_banks(
        &self,
        query: &MasjidListQuery,
    ) -> ResultEngine<Vec<MasjidWithBanks>> {
        let mut select = masjids::Entity::find();
        if let Some(filter) = &query.filter {
            select = filter.apply(select);
        }
        match query.order {
            Some(MasjidOrder::NameAsc) => select = select.order_by_asc(masjids::Column::Name),
            Some(MasjidOrder::NameDesc) => select = select.order_by_desc(masjids::Column::Name),
            None => {}
        }
        if let Some(offset) = query.offset {
            select = select.offset(offset);
        }
        if let Some(limit) = query.limit {
            select = select.limit(limit);
        }

        let masjid_models = select.all(&self.database).await?;
        if masjid_models.is_empty() {
            return Ok(Vec::new());
        }

        let bank_select = query.bank_select.unwrap_or_default();
        let deposit_select = query.deposit_select.unwrap_or_default();

        let masjid_ids: Vec<String> = masjid_models.iter().map(|m| m.id.clone()).collect();
        let bank_models = banks::Entity::find()
            .filter(banks::Column::MasjidId.is_in(masjid_ids))
            .all(&self.database)
            .await?;

        let bank_ids: Vec<String> = bank_models.iter().map(|b| b.id.clone()).collect();
        let mut latest = self.latest_deposit_per_bank(&bank_ids).await?;

        // Reshaping pass: pure and linear in the number of banks returned.
        let mut banks_by_masjid: HashMap<String, Vec<BankWithLatestDeposit>> = HashMap::new();
        for model in bank_models {
            let deposit = latest
                .remove(&model.id)
                .map(|d| shape_deposit(d, deposit_select));
            banks_by_masjid
                .entry(model.masjid_id.clone())
                .or_default()
                .push(shape_bank(model, bank_select, deposit));
        }

        Ok(masjid_models
            .into_iter()
            .map(|model| {
                let banks = banks_by_masjid.remove(&model.id).unwrap_or_default();
                shape_masjid(model, query.select, banks)
            })
            .collect())
    }

    /// Fetches, in one query, the single most recent deposit of every bank in
    /// `bank_ids`, keyed by bank id.
    ///
    /// The per-bank subquery orders `deposit_date DESC, created_at DESC,
    /// id ASC`, so the tie-break between same-day deposits is explicit rather
    /// than engine-dependent.
    async fn latest_deposit_per_bank(
        &self,
        bank_ids: &[String],
    ) -> ResultEngine<HashMap<String, deposits::Model>> {
        if bank_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let backend = self.database.get_database_backend();
        let placeholders = vec!["?"; bank_ids.len()].join(", ");
        let stmt = Statement::from_sql_and_values(
            backend,
            format!(
                "SELECT d.* FROM deposits AS d \
                 WHERE d.bank_id IN ({placeholders}) \
                   AND d.id = (SELECT d2.id FROM deposits AS d2 \
                               WHERE d2.bank_id = d.bank_id \
                               ORDER BY d2.deposit_date DESC, d2.created_at DESC, d2.id ASC \
                               LIMIT 1)"
            ),
            bank_ids
                .iter()
                .map(|id| id.clone().into())
                .collect::<Vec<Value>>(),
        );

        let models = deposits::Entity::find()
            .from_raw_sql(stmt)
            .all(&self.database)
            .await?;
        Ok(models
            .into_iter()
            .map(|model| (model.bank_id.clone(), model))
            .collect())
    }
}

fn shape_masjid(
    model: masjids::Model,
    select: MasjidProjection,
    banks: Vec<BankWithLatestDeposit>,
) -> MasjidWithBanks {
    MasjidWithBanks {
        id: model.id,
        name: model.name,
        address: select.address.then(|| model.address),
        city: select.address.then(|| model.city),
        state: select.address.then(|| model.state),
        zip_code: select.address.then(|| model.zip_code),
        country: select.address.then(|| model.country),
        phone: if select.contact { model.phone } else { None },
        email: if select.contact { model.email } else { None },
        website: if select.contact { model.website } else { None },
        banks,
    }
}

fn shape_bank(
    model: banks::Model,
    select: BankProjection,
    latest_deposit: Option<DepositSummary>,
) -> BankWithLatestDeposit {
    BankWithLatestDeposit {
        id: model.id,
        name: model.name,
        account_number: model.account_number,
        routing_number: select.routing_number.then(|| model.routing_number),
        address: select.address.then(|| model.address),
        city: select.address.then(|| model.city),
        state: select.address.then(|| model.state),
        zip_code: select.address.then(|| model.zip_code),
        country: select.address.then(|| model.country),
        masjid_id: model.masjid_id,
        latest_deposit,
    }
}

fn shape_deposit(model: deposits::Model, select: DepositProjection) -> DepositSummary {
    DepositSummary {
        id: model.id,
        amount_minor: model.amount_minor,
        description: model.description,
        deposit_date: model.deposit_date,
        bank_id: model.bank_id,
        created_at: select.timestamps.then_some(model.created_at),
        updated_at: select.timestamps.then_some(model.updated_at),
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            database: self.database,
        }
    }
}
