//! CoinMarketCap 시세를 RDS PostgreSQL에 적재하는 extract-load 파이프라인.
//!
//! 이 crate는 다음을 제공합니다:
//! - 시세 API 한 페이지 수집 ([`modules::market_fetch`])
//! - RDS 인스턴스 확인/생성 ([`modules::provision`])
//! - 테이블 append 적재 ([`modules::load`])
//! - 단계 연결 ([`pipeline`])

pub mod error;
pub mod modules;
pub mod pipeline;
pub mod stats;

pub use error::{CollectorError, Result};
pub use pipeline::{fetch_stage, provision_stage, run_pipeline};
pub use stats::RunReport;
