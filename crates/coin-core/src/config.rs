//! 파이프라인 설정 관리.
//!
//! 설정은 INI 형식 파일 한 개에서 읽으며, 섹션 구성은 다음과 같습니다:
//!
//! ```ini
//! [api_config]
//! url = https://sandbox-api.coinmarketcap.com/v1/cryptocurrency/listings/latest
//! api_key = ...
//! start = 1
//! limit = 50
//! currency = USD
//!
//! [aws_boto_credentials]
//! access_key = ...
//! secret_key = ...
//!
//! [aws_boto_rds_postgres_config]
//! db_name = coins
//! db_instance_identifier = databasetest
//! ...
//!
//! [load_config]
//! table_name = coinmarket_api
//! ```
//!
//! 로드 시점에 전체 구조체로 역직렬화하므로 누락된 키는 즉시 에러가 됩니다.
//! 환경 변수 `COIN_ETL__<SECTION>__<KEY>` 로 개별 값을 덮어쓸 수 있습니다.

use crate::domain::TableName;
use crate::error::ConfigError;
use secrecy::SecretString;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 환경 변수 오버라이드 접두사.
pub const ENV_PREFIX: &str = "COIN_ETL";

/// 기본 API 엔드포인트 (CoinMarketCap sandbox).
pub const DEFAULT_API_URL: &str =
    "https://sandbox-api.coinmarketcap.com/v1/cryptocurrency/listings/latest";

/// 인스턴스 생성 후 고정 대기 시간 (초).
pub const DEFAULT_PROVISION_WAIT_SECS: u64 = 360;

/// 적재 시 기본 접속 데이터베이스 (RDS PostgreSQL 기본 데이터베이스).
pub const DEFAULT_LOAD_DATABASE: &str = "postgres";

/// 파이프라인 전체 설정.
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 시세 API 설정
    pub api_config: ApiConfig,
    /// AWS 자격증명
    pub aws_boto_credentials: AwsCredentials,
    /// RDS 인스턴스 설정
    pub aws_boto_rds_postgres_config: RdsConfig,
    /// 적재 설정
    #[serde(default)]
    pub load_config: LoadConfig,
}

/// 시세 API 설정.
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    /// 엔드포인트 URL
    #[serde(default = "default_api_url")]
    pub url: String,
    /// API 키 (`X-CMC_PRO_API_KEY` 헤더)
    pub api_key: SecretString,
    /// 시작 순위 (1부터)
    pub start: u32,
    /// 페이지 크기
    pub limit: u32,
    /// 환산 통화 코드 (예: USD)
    pub currency: String,
}

/// AWS 자격증명.
#[derive(Debug, Deserialize)]
pub struct AwsCredentials {
    /// Access key ID
    pub access_key: String,
    /// Secret access key
    pub secret_key: SecretString,
    /// 리전 (없으면 AWS 기본 리전 체인 사용)
    #[serde(default)]
    pub region: Option<String>,
}

/// RDS PostgreSQL 인스턴스 설정.
#[derive(Debug, Deserialize)]
pub struct RdsConfig {
    /// 인스턴스 생성 시 만들 데이터베이스 이름
    pub db_name: String,
    /// 인스턴스 식별자
    pub db_instance_identifier: String,
    /// 관리자 계정
    pub master_username: String,
    /// 관리자 비밀번호
    pub master_password: SecretString,
    /// 인스턴스 클래스 (예: db.t3.micro)
    pub db_instance_class: String,
    /// 엔진 (예: postgres)
    pub db_engine: String,
    /// 할당 스토리지 (GiB)
    pub storage: i32,
    /// VPC 보안 그룹 ID
    pub vpc_security_group_id: String,
    /// 생성 후 고정 대기 시간 (초)
    #[serde(default = "default_provision_wait_secs")]
    pub provision_wait_secs: u64,
}

/// 적재 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadConfig {
    /// 적재 대상 테이블
    #[serde(default = "TableName::default_table")]
    pub table_name: TableName,
    /// 접속할 데이터베이스 (없으면 `postgres`)
    #[serde(default)]
    pub database: Option<String>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            table_name: TableName::default_table(),
            database: None,
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_provision_wait_secs() -> u64 {
    DEFAULT_PROVISION_WAIT_SECS
}

impl Settings {
    /// 설정 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        Self::build(config::File::from(path).format(config::FileFormat::Ini))
    }

    /// INI 문자열에서 설정을 로드합니다.
    pub fn from_ini_str(content: &str) -> Result<Self, ConfigError> {
        Self::build(config::File::from_str(content, config::FileFormat::Ini))
    }

    fn build<S>(source: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings: Settings = config::Config::builder()
            .add_source(source)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// 값 범위 검증.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_config.start == 0 {
            return Err(ConfigError::Invalid(
                "api_config.start must be 1 or greater".to_string(),
            ));
        }
        if self.api_config.limit == 0 {
            return Err(ConfigError::Invalid(
                "api_config.limit must be 1 or greater".to_string(),
            ));
        }
        if self.api_config.currency.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "api_config.currency must not be empty".to_string(),
            ));
        }
        if self.aws_boto_rds_postgres_config.storage <= 0 {
            return Err(ConfigError::Invalid(
                "aws_boto_rds_postgres_config.storage must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// 적재 대상 테이블.
    pub fn table_name(&self) -> &TableName {
        &self.load_config.table_name
    }

    /// 적재 시 접속할 데이터베이스 이름.
    ///
    /// `db_name`은 인스턴스 생성 시에만 쓰이고, 적재는 기본 `postgres` 데이터베이스에 합니다.
    pub fn load_database(&self) -> &str {
        self.load_config
            .database
            .as_deref()
            .unwrap_or(DEFAULT_LOAD_DATABASE)
    }
}

impl RdsConfig {
    /// 생성 후 고정 대기 시간을 Duration으로 반환
    pub fn provision_wait(&self) -> Duration {
        Duration::from_secs(self.provision_wait_secs)
    }
}
