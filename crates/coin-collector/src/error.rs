//! 파이프라인 에러 타입.
//!
//! 각 단계는 자신의 종류로 에러를 돌려주고, 종료 코드는 `main`만 결정합니다.

use coin_core::ConfigError;
use thiserror::Error;

/// Collector 에러 타입
#[derive(Debug, Error)]
pub enum CollectorError {
    /// 설정 파일 읽기/검증 실패
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// 시세 API 호출/파싱 실패
    #[error("Error to access API: {0}")]
    Fetch(String),

    /// DB 인스턴스 조회/생성 실패
    #[error("Error in provisioning the database instance: {0}")]
    Provision(String),

    /// 테이블 적재 실패
    #[error("Error loading rows: {0}")]
    Load(String),
}

impl CollectorError {
    /// 에러 종류 이름 (로그 필드용)
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Fetch(_) => "fetch",
            Self::Provision(_) => "provision",
            Self::Load(_) => "load",
        }
    }
}

impl From<reqwest::Error> for CollectorError {
    fn from(err: reqwest::Error) -> Self {
        Self::Fetch(err.to_string())
    }
}

impl From<sqlx::Error> for CollectorError {
    fn from(err: sqlx::Error) -> Self {
        Self::Load(err.to_string())
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, CollectorError>;
