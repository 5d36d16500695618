//! 설정 관련 에러 타입.

use thiserror::Error;

/// 설정 로드 에러.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 설정 파일 없음
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    /// 필수 섹션/키 누락 또는 타입 불일치
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(key) => {
                ConfigError::Invalid(format!("missing key `{}`", key))
            }
            other => ConfigError::Invalid(other.to_string()),
        }
    }
}
