//! # Coin Core
//!
//! 코인 시세 수집 파이프라인 전반에서 사용하는 기본 타입을 제공합니다:
//! - 설정 파일(INI) 로드 및 검증
//! - 시세 레코드 / DB 인스턴스 도메인 모델
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
