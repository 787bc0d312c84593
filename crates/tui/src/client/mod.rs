use api_types::{error::MessageResponse, masjid::MasjidListResponse};
use reqwest::Url;

use crate::error::{AppError, Result};

#[derive(Debug)]
pub enum ClientError {
    Validation(String),
    Server(String),
    Transport(reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::Terminal(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    pub async fn masjids_list(
        &self,
        page: u64,
        limit: u64,
    ) -> std::result::Result<MasjidListResponse, ClientError> {
        let endpoint = self
            .base_url
            .join("api/masjids")
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))?;

        let res = self
            .http
            .get(endpoint)
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res
                .json::<MasjidListResponse>()
                .await
                .map_err(ClientError::Transport);
        }

        let status = res.status();
        let body = res
            .json::<MessageResponse>()
            .await
            .map(|err| err.message)
            .unwrap_or_else(|_| "unknown error".to_string());

        let err = match status.as_u16() {
            400 => ClientError::Validation(body),
            _ => ClientError::Server(body),
        };
        Err(err)
    }
}
