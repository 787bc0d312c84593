//! Masjid directory API endpoints

use api_types::{
    bank::BankView,
    deposit::DepositView,
    masjid::{
        MasjidCreateResponse, MasjidListResponse, MasjidNew, MasjidView, MasjidWithBanksView,
        Pagination,
    },
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{ServerError, server::ServerState, validation};
use engine::{
    BankProjection, BankWithLatestDeposit, DepositProjection, DepositSummary, MasjidListQuery,
    MasjidOrder, MasjidProjection, MasjidWithBanks,
};

const DEFAULT_LIMIT: u64 = 10;
const DEFAULT_PAGE: u64 = 1;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    limit: Option<String>,
    page: Option<String>,
}

/// Permissive pagination coercion: absent, unparseable or zero values fall
/// back to the default.
fn coerce(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

/// Handle `GET /api/masjids`: one page of masjids, each with its banks and
/// their latest deposits, plus pagination metadata.
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> Result<Json<MasjidListResponse>, ServerError> {
    let limit = coerce(params.limit.as_deref(), DEFAULT_LIMIT);
    let page = coerce(params.page.as_deref(), DEFAULT_PAGE);

    let query = MasjidListQuery {
        filter: None,
        select: MasjidProjection::full(),
        bank_select: Some(BankProjection::full()),
        deposit_select: Some(DepositProjection::full()),
        order: Some(MasjidOrder::NameAsc),
        offset: Some((page - 1) * limit),
        limit: Some(limit),
    };

    // The page fetch and the total count are independent reads; issue them
    // concurrently and await both.
    let (masjids, total) = tokio::join!(
        state.engine.list_masjids_with_banks(&query),
        state.engine.count_masjids(None)
    );
    let masjids = masjids?;
    let total = total?;

    Ok(Json(MasjidListResponse {
        success: true,
        data: masjids.into_iter().map(masjid_view).collect(),
        pagination: Pagination {
            total,
            page,
            limit,
            pages: total.div_ceil(limit),
        },
    }))
}

/// Handle `POST /api/masjids`: validate the body, insert one row.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MasjidNew>,
) -> Result<(StatusCode, Json<MasjidCreateResponse>), ServerError> {
    let fields = validation::parse_new_masjid(&payload).map_err(ServerError::Validation)?;
    let masjid = state.engine.create_masjid(fields).await?;

    Ok((
        StatusCode::CREATED,
        Json(MasjidCreateResponse {
            success: true,
            data: MasjidView {
                id: masjid.id,
                name: masjid.name,
                address: masjid.address,
                city: masjid.city,
                state: masjid.state,
                zip_code: masjid.zip_code,
                country: masjid.country,
                phone: masjid.phone,
                email: masjid.email,
                website: masjid.website,
            },
        }),
    ))
}

fn masjid_view(masjid: MasjidWithBanks) -> MasjidWithBanksView {
    MasjidWithBanksView {
        id: masjid.id,
        name: masjid.name,
        address: masjid.address.unwrap_or_default(),
        city: masjid.city.unwrap_or_default(),
        state: masjid.state.unwrap_or_default(),
        zip_code: masjid.zip_code.unwrap_or_default(),
        country: masjid.country.unwrap_or_default(),
        phone: masjid.phone,
        email: masjid.email,
        website: masjid.website,
        banks: masjid.banks.into_iter().map(bank_view).collect(),
    }
}

fn bank_view(bank: BankWithLatestDeposit) -> BankView {
    BankView {
        id: bank.id,
        name: bank.name,
        account_number: bank.account_number,
        routing_number: bank.routing_number.unwrap_or_default(),
        address: bank.address.unwrap_or_default(),
        city: bank.city.unwrap_or_default(),
        state: bank.state.unwrap_or_default(),
        zip_code: bank.zip_code.unwrap_or_default(),
        country: bank.country.unwrap_or_default(),
        masjid_id: bank.masjid_id,
        latest_deposit: bank.latest_deposit.map(deposit_view),
    }
}

fn deposit_view(deposit: DepositSummary) -> DepositView {
    DepositView {
        id: deposit.id,
        amount_minor: deposit.amount_minor,
        description: deposit.description,
        deposit_date: deposit.deposit_date,
        created_at: deposit.created_at,
        updated_at: deposit.updated_at,
        bank_id: deposit.bank_id,
    }
}

#[cfg(test)]
mod tests {
    use super::coerce;

    #[test]
    fn coerce_falls_back_on_garbage() {
        assert_eq!(coerce(None, 10), 10);
        assert_eq!(coerce(Some("abc"), 10), 10);
        assert_eq!(coerce(Some("-3"), 10), 10);
        assert_eq!(coerce(Some("0"), 10), 10);
        assert_eq!(coerce(Some("25"), 10), 25);
    }
}
