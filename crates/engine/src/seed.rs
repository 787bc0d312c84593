//! Sample-data seeding.
//!
//! Inserts a fixed set of masjids, banks and deposits. Seeding is idempotent:
//! a row whose id already exists is left untouched, so the command can run on
//! every deploy.

use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{EntityTrait, Set};

use crate::{Engine, EngineError, banks, deposits, masjids};

/// How many rows a [`Engine::seed`] run actually inserted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub masjids: usize,
    pub banks: usize,
    pub deposits: usize,
}

struct SeedMasjid {
    id: &'static str,
    name: &'static str,
    address: &'static str,
    city: &'static str,
    state: &'static str,
    zip_code: &'static str,
    country: &'static str,
    phone: &'static str,
    email: &'static str,
    website: &'static str,
}

struct SeedBank {
    id: &'static str,
    name: &'static str,
    account_number: &'static str,
    routing_number: &'static str,
    address: &'static str,
    city: &'static str,
    state: &'static str,
    zip_code: &'static str,
    country: &'static str,
    masjid_id: &'static str,
}

struct SeedDeposit {
    id: &'static str,
    amount_minor: i64,
    description: &'static str,
    date: (i32, u32, u32),
    bank_id: &'static str,
}

const MASJIDS: &[SeedMasjid] = &[
    SeedMasjid {
        id: "clm1",
        name: "Masjid Al-Noor",
        address: "123 Main Street",
        city: "New York",
        state: "NY",
        zip_code: "10001",
        country: "USA",
        phone: "212-555-1234",
        email: "info@masjidalnoor.org",
        website: "https://masjidalnoor.org",
    },
    SeedMasjid {
        id: "clm2",
        name: "Masjid Al-Iman",
        address: "456 Oak Avenue",
        city: "Chicago",
        state: "IL",
        zip_code: "60601",
        country: "USA",
        phone: "312-555-6789",
        email: "contact@masjid-aliman.org",
        website: "https://masjid-aliman.org",
    },
    SeedMasjid {
        id: "clm3",
        name: "Masjid Al-Taqwa",
        address: "789 Pine Boulevard",
        city: "Los Angeles",
        state: "CA",
        zip_code: "90001",
        country: "USA",
        phone: "213-555-9876",
        email: "info@masjidaltaqwa.org",
        website: "https://masjidaltaqwa.org",
    },
    SeedMasjid {
        id: "clm4",
        name: "Masjid Al-Rahman",
        address: "321 Islamic Center Way",
        city: "Houston",
        state: "TX",
        zip_code: "77001",
        country: "USA",
        phone: "713-555-4321",
        email: "info@masjidalrahman.org",
        website: "https://masjidalrahman.org",
    },
    SeedMasjid {
        id: "clm5",
        name: "Masjid Al-Huda",
        address: "567 Faith Street",
        city: "Miami",
        state: "FL",
        zip_code: "33101",
        country: "USA",
        phone: "305-555-8765",
        email: "contact@masjidalhuda.org",
        website: "https://masjidalhuda.org",
    },
    SeedMasjid {
        id: "clm6",
        name: "Masjid Al-Salam",
        address: "890 Peace Avenue",
        city: "Seattle",
        state: "WA",
        zip_code: "98101",
        country: "USA",
        phone: "206-555-2468",
        email: "info@masjidalsalam.org",
        website: "https://masjidalsalam.org",
    },
];

const BANKS: &[SeedBank] = &[
    SeedBank {
        id: "clb1",
        name: "Chase Bank",
        account_number: "1234567890",
        routing_number: "021000021",
        address: "100 Park Avenue",
        city: "New York",
        state: "NY",
        zip_code: "10001",
        country: "USA",
        masjid_id: "clm1",
    },
    SeedBank {
        id: "clb2",
        name: "Bank of America",
        account_number: "0987654321",
        routing_number: "026009593",
        address: "200 Broadway",
        city: "New York",
        state: "NY",
        zip_code: "10001",
        country: "USA",
        masjid_id: "clm1",
    },
    SeedBank {
        id: "clb3",
        name: "Wells Fargo",
        account_number: "1122334455",
        routing_number: "121000248",
        address: "300 Michigan Avenue",
        city: "Chicago",
        state: "IL",
        zip_code: "60601",
        country: "USA",
        masjid_id: "clm2",
    },
    SeedBank {
        id: "clb4",
        name: "Citibank",
        account_number: "5566778899",
        routing_number: "021000089",
        address: "400 Wilshire Boulevard",
        city: "Los Angeles",
        state: "CA",
        zip_code: "90001",
        country: "USA",
        masjid_id: "clm3",
    },
    SeedBank {
        id: "clb5",
        name: "US Bank",
        account_number: "9876543210",
        routing_number: "123456789",
        address: "500 Banking Street",
        city: "Houston",
        state: "TX",
        zip_code: "77001",
        country: "USA",
        masjid_id: "clm4",
    },
    SeedBank {
        id: "clb6",
        name: "TD Bank",
        account_number: "5432109876",
        routing_number: "987654321",
        address: "600 Finance Road",
        city: "Miami",
        state: "FL",
        zip_code: "33101",
        country: "USA",
        masjid_id: "clm5",
    },
    SeedBank {
        id: "clb7",
        name: "KeyBank",
        account_number: "1357924680",
        routing_number: "246813579",
        address: "700 Money Lane",
        city: "Seattle",
        state: "WA",
        zip_code: "98101",
        country: "USA",
        masjid_id: "clm6",
    },
];

const DEPOSITS: &[SeedDeposit] = &[
    SeedDeposit {
        id: "cld1",
        amount_minor: 500_000,
        description: "Monthly donation",
        date: (2023, 1, 15),
        bank_id: "clb1",
    },
    SeedDeposit {
        id: "cld2",
        amount_minor: 750_000,
        description: "Ramadan donation",
        date: (2023, 4, 10),
        bank_id: "clb1",
    },
    SeedDeposit {
        id: "cld3",
        amount_minor: 300_000,
        description: "Weekly collection",
        date: (2023, 2, 5),
        bank_id: "clb2",
    },
    SeedDeposit {
        id: "cld4",
        amount_minor: 1_000_000,
        description: "Eid donation",
        date: (2023, 6, 20),
        bank_id: "clb3",
    },
    SeedDeposit {
        id: "cld5",
        amount_minor: 1_500_000,
        description: "Construction fund",
        date: (2023, 3, 25),
        bank_id: "clb4",
    },
    SeedDeposit {
        id: "cld6",
        amount_minor: 1_200_000,
        description: "Annual donation",
        date: (2024, 1, 15),
        bank_id: "clb5",
    },
    SeedDeposit {
        id: "cld7",
        amount_minor: 850_000,
        description: "Community fundraiser",
        date: (2024, 2, 20),
        bank_id: "clb6",
    },
    SeedDeposit {
        id: "cld8",
        amount_minor: 2_000_000,
        description: "Expansion project",
        date: (2024, 3, 1),
        bank_id: "clb7",
    },
];

fn seed_date((year, month, day): (i32, u32, u32)) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

impl Engine {
    /// Insert the sample directory. Rows whose id already exists are skipped.
    pub async fn seed(&self) -> Result<SeedReport, EngineError> {
        let db = self.database();
        let mut report = SeedReport::default();

        for entry in MASJIDS {
            if masjids::Entity::find_by_id(entry.id).one(db).await?.is_some() {
                continue;
            }
            let model = masjids::ActiveModel {
                id: Set(entry.id.to_string()),
                name: Set(entry.name.to_string()),
                address: Set(entry.address.to_string()),
                city: Set(entry.city.to_string()),
                state: Set(entry.state.to_string()),
                zip_code: Set(entry.zip_code.to_string()),
                country: Set(entry.country.to_string()),
                phone: Set(Some(entry.phone.to_string())),
                email: Set(Some(entry.email.to_string())),
                website: Set(Some(entry.website.to_string())),
            };
            masjids::Entity::insert(model).exec(db).await?;
            report.masjids += 1;
        }

        for entry in BANKS {
            if banks::Entity::find_by_id(entry.id).one(db).await?.is_some() {
                continue;
            }
            let model = banks::ActiveModel {
                id: Set(entry.id.to_string()),
                name: Set(entry.name.to_string()),
                account_number: Set(entry.account_number.to_string()),
                routing_number: Set(entry.routing_number.to_string()),
                address: Set(entry.address.to_string()),
                city: Set(entry.city.to_string()),
                state: Set(entry.state.to_string()),
                zip_code: Set(entry.zip_code.to_string()),
                country: Set(entry.country.to_string()),
                masjid_id: Set(entry.masjid_id.to_string()),
            };
            banks::Entity::insert(model).exec(db).await?;
            report.banks += 1;
        }

        for entry in DEPOSITS {
            if deposits::Entity::find_by_id(entry.id)
                .one(db)
                .await?
                .is_some()
            {
                continue;
            }
            let now = Utc::now();
            let model = deposits::ActiveModel {
                id: Set(entry.id.to_string()),
                amount_minor: Set(entry.amount_minor),
                description: Set(Some(entry.description.to_string())),
                deposit_date: Set(seed_date(entry.date)),
                created_at: Set(now),
                updated_at: Set(now),
                bank_id: Set(entry.bank_id.to_string()),
            };
            deposits::Entity::insert(model).exec(db).await?;
            report.deposits += 1;
        }

        Ok(report)
    }
}
