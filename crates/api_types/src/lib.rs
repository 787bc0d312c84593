use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod masjid {
    use super::*;

    /// Request body for creating a masjid.
    ///
    /// Every field is optional at the wire level so the server can report
    /// missing required fields as field-level validation errors instead of a
    /// deserialization failure.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MasjidNew {
        pub name: Option<String>,
        pub address: Option<String>,
        pub city: Option<String>,
        pub state: Option<String>,
        pub zip_code: Option<String>,
        pub country: Option<String>,
        pub phone: Option<String>,
        pub email: Option<String>,
        pub website: Option<String>,
    }

    /// A masjid row as returned by the create endpoint.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MasjidView {
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

    /// A masjid with its banks, each carrying `latestDeposit` instead of the
    /// raw deposit history.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MasjidWithBanksView {
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
        pub banks: Vec<super::bank::BankView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MasjidListResponse {
        pub success: bool,
        pub data: Vec<MasjidWithBanksView>,
        pub pagination: Pagination,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MasjidCreateResponse {
        pub success: bool,
        pub data: MasjidView,
    }

    /// Pagination metadata: `pages` is `ceil(total / limit)`.
    #[derive(Clone, Copy, Debug, Serialize, Deserialize)]
    pub struct Pagination {
        pub total: u64,
        pub page: u64,
        pub limit: u64,
        pub pages: u64,
    }
}

pub mod bank {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BankView {
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
        /// The single most recent deposit, or `null` when the account has
        /// none yet.
        pub latest_deposit: Option<super::deposit::DepositView>,
    }
}

pub mod deposit {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DepositView {
        pub id: String,
        /// Amount in minor units (cents).
        pub amount_minor: i64,
        pub description: Option<String>,
        pub deposit_date: DateTime<Utc>,
        pub created_at: Option<DateTime<Utc>>,
        pub updated_at: Option<DateTime<Utc>>,
        pub bank_id: String,
    }
}

pub mod error {
    use super::*;

    /// One failed field of a request.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct FieldError {
        /// Wire name of the failed field (e.g. `zipCode`).
        pub path: String,
        pub message: String,
    }

    /// Body of a 400 validation failure.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ValidationResponse {
        pub success: bool,
        pub errors: Vec<FieldError>,
    }

    /// Body of 405/500 responses.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MessageResponse {
        pub success: bool,
        pub message: String,
    }
}
