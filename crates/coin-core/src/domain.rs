//! 파이프라인 도메인 모델.
//!
//! - [`MarketRecord`]: 시세 API 한 행 (고정 컬럼 순서)
//! - [`DatabaseInstanceDescriptor`]: 클라우드 DB 인스턴스 정보
//! - [`CreateInstanceRequest`]: 인스턴스 생성 요청
//! - [`TableName`]: 검증된 적재 테이블 이름

use crate::config::RdsConfig;
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 기본 적재 테이블.
pub const DEFAULT_TABLE_NAME: &str = "coinmarket_api";

/// 시세 레코드 컬럼 순서.
pub const MARKET_COLUMNS: [&str; 10] = [
    "id",
    "name",
    "symbol",
    "circulating_supply",
    "total_supply",
    "max_supply",
    "last_updated",
    "date_added",
    "price",
    "volume_24h",
];

/// 자산 한 건의 시세 스냅샷.
///
/// 필드 선언 순서가 [`MARKET_COLUMNS`]와 같으며, 직렬화 및 적재 시 이 순서를 따릅니다.
/// `price`, `volume_24h`는 응답의 `quote[<통화>]` 하위 객체에서 추출합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    /// 자산 ID
    pub id: i64,
    /// 자산명 (예: Bitcoin)
    pub name: String,
    /// 심볼 (예: BTC)
    pub symbol: String,
    /// 유통 공급량
    pub circulating_supply: Option<f64>,
    /// 총 공급량
    pub total_supply: Option<f64>,
    /// 최대 공급량 (상한 없는 자산은 None)
    pub max_supply: Option<f64>,
    /// 마지막 갱신 시각 (API 원문 문자열)
    pub last_updated: String,
    /// 등록 시각 (API 원문 문자열)
    pub date_added: String,
    /// 가격
    pub price: Option<Decimal>,
    /// 24시간 거래량
    pub volume_24h: Option<Decimal>,
}

/// DB 인스턴스 네트워크 엔드포인트.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceEndpoint {
    pub host: String,
    pub port: u16,
}

impl fmt::Display for InstanceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// 클라우드 DB 인스턴스 정보.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DatabaseInstanceDescriptor {
    /// 인스턴스 식별자
    pub identifier: String,
    /// 엔드포인트 (생성 중에는 없을 수 있음)
    pub endpoint: Option<InstanceEndpoint>,
    /// 관리자 계정
    pub master_username: Option<String>,
    /// 엔진 (예: postgres)
    pub engine: Option<String>,
    /// 인스턴스 상태 (예: creating, available)
    pub status: Option<String>,
}

impl DatabaseInstanceDescriptor {
    /// 식별자만으로 생성 (테스트/조회 결과 조립용)
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Default::default()
        }
    }

    /// 엔드포인트 설정
    pub fn with_endpoint(mut self, host: impl Into<String>, port: u16) -> Self {
        self.endpoint = Some(InstanceEndpoint {
            host: host.into(),
            port,
        });
        self
    }
}

/// 인스턴스 생성 요청.
#[derive(Debug)]
pub struct CreateInstanceRequest {
    pub allocated_storage: i32,
    pub instance_class: String,
    pub db_name: String,
    pub identifier: String,
    pub engine: String,
    pub master_username: String,
    pub master_password: SecretString,
    pub vpc_security_group_id: String,
}

impl CreateInstanceRequest {
    /// RDS 설정에서 생성 요청을 만듭니다.
    pub fn from_config(config: &RdsConfig) -> Self {
        Self {
            allocated_storage: config.storage,
            instance_class: config.db_instance_class.clone(),
            db_name: config.db_name.clone(),
            identifier: config.db_instance_identifier.clone(),
            engine: config.db_engine.clone(),
            master_username: config.master_username.clone(),
            master_password: config.master_password.clone(),
            vpc_security_group_id: config.vpc_security_group_id.clone(),
        }
    }
}

/// 검증된 테이블 이름.
///
/// `name` 또는 `schema.name` 형식만 허용하며, 각 부분은
/// `[A-Za-z_][A-Za-z0-9_]*` 이고 63자 이하입니다.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct TableName(String);

impl TableName {
    /// 이름 검증 후 생성
    pub fn parse(name: &str) -> Result<Self, String> {
        let name = name.trim();
        let parts: Vec<&str> = name.split('.').collect();
        if parts.len() > 2 || !parts.iter().all(|p| is_identifier(p)) {
            return Err(format!("invalid table name `{}`", name));
        }
        Ok(Self(name.to_string()))
    }

    /// 기본 테이블 (`coinmarket_api`)
    pub fn default_table() -> Self {
        Self(DEFAULT_TABLE_NAME.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// SQL에 넣을 수 있도록 부분별로 큰따옴표 처리한 이름
    pub fn quoted(&self) -> String {
        self.0
            .split('.')
            .map(|p| format!("\"{}\"", p))
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl TryFrom<String> for TableName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_identifier(part: &str) -> bool {
    let mut chars = part.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    part.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
