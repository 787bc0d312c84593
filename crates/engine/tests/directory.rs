use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{Database, EntityTrait, Set};

use engine::{
    BankNew, BankProjection, DepositNew, DepositProjection, Engine, EngineError, MasjidFilter,
    MasjidGetQuery, MasjidListQuery, MasjidNew, MasjidOrder, MasjidProjection, deposits,
};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build()
}

fn masjid_fields(name: &str, city: &str) -> MasjidNew {
    MasjidNew {
        name: name.to_string(),
        address: "1 Example Road".to_string(),
        city: city.to_string(),
        state: "NY".to_string(),
        zip_code: "10001".to_string(),
        country: "USA".to_string(),
        phone: Some("212-555-0000".to_string()),
        email: Some("info@example.org".to_string()),
        website: Some("https://example.org".to_string()),
    }
}

fn bank_fields(masjid_id: &str, name: &str) -> BankNew {
    BankNew {
        masjid_id: masjid_id.to_string(),
        name: name.to_string(),
        account_number: "1234567890".to_string(),
        routing_number: "021000021".to_string(),
        address: "2 Bank Street".to_string(),
        city: "New York".to_string(),
        state: "NY".to_string(),
        zip_code: "10001".to_string(),
        country: "USA".to_string(),
    }
}

fn day(year: i32, month: u32, dom: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, dom, 0, 0, 0).unwrap()
}

#[tokio::test]
async fn masjid_without_banks_has_empty_banks() {
    let engine = engine_with_db().await;
    let masjid = engine
        .create_masjid(masjid_fields("Masjid Al-Noor", "New York"))
        .await
        .unwrap();

    let found = engine
        .masjid_with_banks(&MasjidGetQuery::by_id(masjid.id.clone()))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.id, masjid.id);
    assert!(found.banks.is_empty());
}

#[tokio::test]
async fn unknown_masjid_returns_none() {
    let engine = engine_with_db().await;
    let found = engine
        .masjid_with_banks(&MasjidGetQuery::by_id("nope"))
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn bank_without_deposits_has_no_latest_deposit() {
    let engine = engine_with_db().await;
    let masjid = engine
        .create_masjid(masjid_fields("Masjid Al-Noor", "New York"))
        .await
        .unwrap();
    engine
        .create_bank(bank_fields(&masjid.id, "Chase Bank"))
        .await
        .unwrap();

    let found = engine
        .masjid_with_banks(&MasjidGetQuery::by_id(masjid.id))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.banks.len(), 1);
    assert!(found.banks[0].latest_deposit.is_none());
}

#[tokio::test]
async fn latest_deposit_is_max_deposit_date() {
    let engine = engine_with_db().await;
    let masjid = engine
        .create_masjid(masjid_fields("Masjid Al-Noor", "New York"))
        .await
        .unwrap();
    let bank = engine
        .create_bank(bank_fields(&masjid.id, "Chase Bank"))
        .await
        .unwrap();

    for (amount, date) in [
        (500_000, day(2023, 1, 15)),
        (750_000, day(2023, 4, 10)),
        (300_000, day(2023, 2, 5)),
    ] {
        engine
            .create_deposit(DepositNew {
                bank_id: bank.id.clone(),
                amount_minor: amount,
                description: None,
                deposit_date: date,
            })
            .await
            .unwrap();
    }

    let found = engine
        .masjid_with_banks(&MasjidGetQuery::by_id(masjid.id))
        .await
        .unwrap()
        .unwrap();

    let latest = found.banks[0].latest_deposit.as_ref().unwrap();
    assert_eq!(latest.amount_minor, 750_000);
    assert_eq!(latest.deposit_date, day(2023, 4, 10));
}

#[tokio::test]
async fn same_day_deposits_fall_back_to_created_at() {
    let engine = engine_with_db().await;
    let masjid = engine
        .create_masjid(masjid_fields("Masjid Al-Noor", "New York"))
        .await
        .unwrap();
    let bank = engine
        .create_bank(bank_fields(&masjid.id, "Chase Bank"))
        .await
        .unwrap();

    // Same deposit date; the row created later must win. The ids are chosen
    // so that an id-based pick would choose the wrong row.
    let date = day(2023, 4, 10);
    for (id, amount, created) in [
        ("aaa-first", 100_000, day(2023, 4, 10)),
        ("zzz-second", 200_000, day(2023, 4, 11)),
    ] {
        let model = deposits::ActiveModel {
            id: Set(id.to_string()),
            amount_minor: Set(amount),
            description: Set(None),
            deposit_date: Set(date),
            created_at: Set(created),
            updated_at: Set(created),
            bank_id: Set(bank.id.clone()),
        };
        deposits::Entity::insert(model)
            .exec(engine.database())
            .await
            .unwrap();
    }

    let found = engine
        .masjid_with_banks(&MasjidGetQuery::by_id(masjid.id))
        .await
        .unwrap()
        .unwrap();

    let latest = found.banks[0].latest_deposit.as_ref().unwrap();
    assert_eq!(latest.id, "zzz-second");
    assert_eq!(latest.amount_minor, 200_000);
}

#[tokio::test]
async fn default_projections_return_minimal_sets() {
    let engine = engine_with_db().await;
    let masjid = engine
        .create_masjid(masjid_fields("Masjid Al-Noor", "New York"))
        .await
        .unwrap();
    let bank = engine
        .create_bank(bank_fields(&masjid.id, "Chase Bank"))
        .await
        .unwrap();
    engine
        .create_deposit(DepositNew {
            bank_id: bank.id.clone(),
            amount_minor: 500_000,
            description: Some("Monthly donation".to_string()),
            deposit_date: day(2023, 1, 15),
        })
        .await
        .unwrap();

    let found = engine
        .masjid_with_banks(&MasjidGetQuery::by_id(masjid.id.clone()))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.name, "Masjid Al-Noor");
    assert!(found.address.is_none());
    assert!(found.phone.is_none());

    let bank_view = &found.banks[0];
    assert_eq!(bank_view.account_number, "1234567890");
    assert!(bank_view.routing_number.is_none());
    assert!(bank_view.address.is_none());

    let latest = bank_view.latest_deposit.as_ref().unwrap();
    assert_eq!(latest.amount_minor, 500_000);
    assert_eq!(latest.description.as_deref(), Some("Monthly donation"));
    assert!(latest.created_at.is_none());
    assert!(latest.updated_at.is_none());

    // Full projections surface everything.
    let full = engine
        .masjid_with_banks(&MasjidGetQuery {
            select: MasjidProjection::full(),
            bank_select: Some(BankProjection::full()),
            deposit_select: Some(DepositProjection::full()),
            ..MasjidGetQuery::by_id(masjid.id)
        })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(full.address.as_deref(), Some("1 Example Road"));
    assert_eq!(full.phone.as_deref(), Some("212-555-0000"));
    assert_eq!(full.banks[0].routing_number.as_deref(), Some("021000021"));
    assert!(full.banks[0].latest_deposit.as_ref().unwrap().created_at.is_some());
}

#[tokio::test]
async fn list_orders_and_paginates() {
    let engine = engine_with_db().await;
    for name in ["Masjid C", "Masjid A", "Masjid B"] {
        engine
            .create_masjid(masjid_fields(name, "New York"))
            .await
            .unwrap();
    }

    let page = engine
        .list_masjids_with_banks(&MasjidListQuery {
            order: Some(MasjidOrder::NameAsc),
            offset: Some(1),
            limit: Some(1),
            ..MasjidListQuery::default()
        })
        .await
        .unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "Masjid B");
}

#[tokio::test]
async fn count_masjids_honors_filter() {
    let engine = engine_with_db().await;
    engine
        .create_masjid(masjid_fields("Masjid A", "New York"))
        .await
        .unwrap();
    engine
        .create_masjid(masjid_fields("Masjid B", "New York"))
        .await
        .unwrap();
    engine
        .create_masjid(masjid_fields("Masjid C", "Chicago"))
        .await
        .unwrap();

    assert_eq!(engine.count_masjids(None).await.unwrap(), 3);
    assert_eq!(
        engine
            .count_masjids(Some(&MasjidFilter::City("New York".to_string())))
            .await
            .unwrap(),
        2
    );
}

#[tokio::test]
async fn non_unique_filter_returns_first_by_order() {
    let engine = engine_with_db().await;
    engine
        .create_masjid(masjid_fields("Masjid B", "Chicago"))
        .await
        .unwrap();
    engine
        .create_masjid(masjid_fields("Masjid A", "Chicago"))
        .await
        .unwrap();

    let found = engine
        .masjid_with_banks(&MasjidGetQuery {
            filter: MasjidFilter::City("Chicago".to_string()),
            order: Some(MasjidOrder::NameAsc),
            ..MasjidGetQuery::by_id("")
        })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.name, "Masjid A");
}

#[tokio::test]
async fn create_bank_requires_existing_masjid() {
    let engine = engine_with_db().await;
    let err = engine
        .create_bank(bank_fields("missing", "Chase Bank"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn create_deposit_rejects_non_positive_amount() {
    let engine = engine_with_db().await;
    let masjid = engine
        .create_masjid(masjid_fields("Masjid Al-Noor", "New York"))
        .await
        .unwrap();
    let bank = engine
        .create_bank(bank_fields(&masjid.id, "Chase Bank"))
        .await
        .unwrap();

    let err = engine
        .create_deposit(DepositNew {
            bank_id: bank.id,
            amount_minor: 0,
            description: None,
            deposit_date: day(2023, 1, 1),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidField(_)));
}

#[tokio::test]
async fn create_deposit_requires_existing_bank() {
    let engine = engine_with_db().await;
    let err = engine
        .create_deposit(DepositNew {
            bank_id: "missing".to_string(),
            amount_minor: 100,
            description: None,
            deposit_date: day(2023, 1, 1),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn seed_is_idempotent() {
    let engine = engine_with_db().await;

    let first = engine.seed().await.unwrap();
    assert_eq!(first.masjids, 6);
    assert_eq!(first.banks, 7);
    assert_eq!(first.deposits, 8);

    let second = engine.seed().await.unwrap();
    assert_eq!(second.masjids, 0);
    assert_eq!(second.banks, 0);
    assert_eq!(second.deposits, 0);

    assert_eq!(engine.count_masjids(None).await.unwrap(), 6);
}

#[tokio::test]
async fn seeded_directory_reports_latest_deposits() {
    let engine = engine_with_db().await;
    engine.seed().await.unwrap();

    let found = engine
        .masjid_with_banks(&MasjidGetQuery::by_id("clm1"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.banks.len(), 2);

    let chase = found.banks.iter().find(|b| b.id == "clb1").unwrap();
    let latest = chase.latest_deposit.as_ref().unwrap();
    assert_eq!(latest.id, "cld2");
    assert_eq!(latest.amount_minor, 750_000);
    assert_eq!(latest.deposit_date, day(2023, 4, 10));

    let boa = found.banks.iter().find(|b| b.id == "clb2").unwrap();
    assert_eq!(boa.latest_deposit.as_ref().unwrap().id, "cld3");
}
