//! CoinMarketCap 시세 수집 모듈.
//!
//! `listings/latest` 엔드포인트를 한 번 호출해 한 페이지 분량의 자산 시세를
//! [`MarketRecord`] 목록으로 변환합니다. 재시도는 하지 않으며, 네트워크/상태 코드/
//! 파싱 중 하나라도 실패하면 [`CollectorError::Fetch`]로 실행 전체가 중단됩니다.
//!
//! # 응답 형식
//!
//! ```json
//! {"data": [{"id": 1, "name": "Bitcoin", "symbol": "BTC", ...,
//!            "quote": {"USD": {"price": 6602.6, "volume_24h": 4314444687.5}}}]}
//! ```

use crate::error::{CollectorError, Result};
use coin_core::{ApiConfig, MarketRecord};
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::collections::HashMap;

/// API 키 헤더 이름.
pub const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

const USER_AGENT: &str = concat!("coin-collector/", env!("CARGO_PKG_VERSION"));

/// 응답 최상위.
#[derive(Debug, Deserialize)]
struct ListingsResponse {
    data: Vec<ListingEntry>,
}

/// `data` 배열 원소.
#[derive(Debug, Deserialize)]
struct ListingEntry {
    id: i64,
    name: String,
    symbol: String,
    circulating_supply: Option<f64>,
    total_supply: Option<f64>,
    max_supply: Option<f64>,
    last_updated: String,
    date_added: String,
    quote: HashMap<String, QuoteEntry>,
}

/// `quote[<통화>]` 하위 객체.
///
/// JSON 숫자를 그대로 받은 뒤 [`to_decimal`]에서 범위를 검사합니다.
#[derive(Debug, Deserialize)]
struct QuoteEntry {
    price: Option<f64>,
    volume_24h: Option<f64>,
}

/// 시세 API 클라이언트.
pub struct MarketDataClient {
    client: reqwest::Client,
    url: String,
    api_key: SecretString,
}

impl MarketDataClient {
    /// 새 클라이언트 생성.
    pub fn new(url: impl Into<String>, api_key: SecretString) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CollectorError::Fetch(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
            api_key,
        })
    }

    /// 설정에서 클라이언트 생성.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(config.url.clone(), config.api_key.clone())
    }

    /// 시세 한 페이지를 조회합니다.
    ///
    /// # Arguments
    /// * `start` - 시작 순위 (1부터)
    /// * `limit` - 페이지 크기
    /// * `currency` - 환산 통화 (예: USD)
    pub async fn fetch_listings(
        &self,
        start: u32,
        limit: u32,
        currency: &str,
    ) -> Result<Vec<MarketRecord>> {
        tracing::debug!(url = %self.url, start, limit, currency, "시세 API 요청");

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("start", start.to_string()),
                ("limit", limit.to_string()),
                ("convert", currency.to_string()),
            ])
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CollectorError::Fetch(format!("HTTP {} - {}", status, body)));
        }

        let records = parse_listings(&body, currency)?;
        tracing::info!(count = records.len(), currency, "시세 조회 완료");
        Ok(records)
    }
}

/// 설정 값으로 시세를 한 번 조회합니다.
pub async fn fetch_market_data(
    endpoint: &str,
    api_key: &SecretString,
    start: u32,
    limit: u32,
    currency: &str,
) -> Result<Vec<MarketRecord>> {
    MarketDataClient::new(endpoint, api_key.clone())?
        .fetch_listings(start, limit, currency)
        .await
}

/// 응답 본문을 고정 컬럼 순서의 레코드로 변환합니다.
pub fn parse_listings(body: &str, currency: &str) -> Result<Vec<MarketRecord>> {
    let response: ListingsResponse = serde_json::from_str(body)
        .map_err(|e| CollectorError::Fetch(format!("invalid response body: {}", e)))?;

    response
        .data
        .into_iter()
        .map(|entry| into_record(entry, currency))
        .collect()
}

fn into_record(entry: ListingEntry, currency: &str) -> Result<MarketRecord> {
    let quote = entry
        .quote
        .get(currency)
        .or_else(|| {
            entry
                .quote
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(currency))
                .map(|(_, quote)| quote)
        })
        .ok_or_else(|| {
            CollectorError::Fetch(format!(
                "quote for `{}` missing in entry {} ({})",
                currency, entry.id, entry.symbol
            ))
        })?;

    let price = to_decimal("price", quote.price, &entry)?;
    let volume_24h = to_decimal("volume_24h", quote.volume_24h, &entry)?;

    Ok(MarketRecord {
        id: entry.id,
        price,
        volume_24h,
        name: entry.name,
        symbol: entry.symbol,
        circulating_supply: entry.circulating_supply,
        total_supply: entry.total_supply,
        max_supply: entry.max_supply,
        last_updated: entry.last_updated,
        date_added: entry.date_added,
    })
}

/// 시세 값을 Decimal로 변환합니다.
///
/// Decimal 범위(약 ±7.9e28, 소수 28자리)를 벗어나면 값을 0으로 만들지 않고 에러를 돌려줍니다.
fn to_decimal(field: &str, value: Option<f64>, entry: &ListingEntry) -> Result<Option<Decimal>> {
    let Some(value) = value else {
        return Ok(None);
    };

    let out_of_range = || {
        CollectorError::Fetch(format!(
            "`{}` value {:e} out of Decimal range in entry {} ({})",
            field, value, entry.id, entry.symbol
        ))
    };

    let decimal = value
        .to_string()
        .parse::<Decimal>()
        .map_err(|_| out_of_range())?;
    if decimal.is_zero() && value != 0.0 {
        return Err(out_of_range());
    }

    Ok(Some(decimal))
}
