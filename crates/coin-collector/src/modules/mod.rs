//! 파이프라인 단계별 모듈.

pub mod load;
pub mod market_fetch;
pub mod provision;
pub mod validate;

pub use load::{load_rows, ConnectionTarget, PostgresSink, RowSink};
pub use market_fetch::{fetch_market_data, parse_listings, MarketDataClient};
pub use provision::{
    ensure_instance, needs_creation, resolve_endpoint, AwsRdsClient, FixedWait, ProvisionOutcome,
    RdsApi,
};
pub use validate::is_non_empty;
