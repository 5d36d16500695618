//! 단계 연결: 설정 → 시세 수집 → 인스턴스 준비 → 적재.
//!
//! 모든 단계는 순서대로 한 번씩만 실행되며, 앞 단계가 실패하면 뒤 단계는 실행하지 않습니다.

use crate::modules::{
    ensure_instance, load_rows, resolve_endpoint, ConnectionTarget, FixedWait, MarketDataClient,
    RdsApi, RowSink,
};
use crate::{Result, RunReport};
use coin_core::{CreateInstanceRequest, MarketRecord, Settings};
use std::time::Instant;

/// 설정의 `api_config`로 시세 한 페이지를 조회합니다.
pub async fn fetch_stage(settings: &Settings) -> Result<Vec<MarketRecord>> {
    let api = &settings.api_config;
    MarketDataClient::from_config(api)?
        .fetch_listings(api.start, api.limit, &api.currency)
        .await
}

/// 인스턴스만 준비합니다 (`provision` 명령).
pub async fn provision_stage<R>(settings: &Settings, rds: &R) -> Result<RunReport>
where
    R: RdsApi + ?Sized,
{
    let start = Instant::now();
    let mut report = RunReport::new();
    let rds_config = &settings.aws_boto_rds_postgres_config;

    let request = CreateInstanceRequest::from_config(rds_config);
    let outcome = ensure_instance(rds, &request, FixedWait(rds_config.provision_wait())).await?;

    report.provision = Some(outcome);
    report.instance = Some(rds_config.db_instance_identifier.clone());
    report.elapsed = start.elapsed();
    Ok(report)
}

/// 전체 파이프라인을 실행합니다.
pub async fn run_pipeline<R, S>(settings: &Settings, rds: &R, sink: &S) -> Result<RunReport>
where
    R: RdsApi + ?Sized,
    S: RowSink + ?Sized,
{
    let start = Instant::now();
    let mut report = RunReport::new();
    let rds_config = &settings.aws_boto_rds_postgres_config;

    tracing::info!("Step 1/3: 시세 수집");
    let records = fetch_stage(settings).await?;
    report.fetched = records.len();

    tracing::info!("Step 2/3: 데이터베이스 인스턴스 준비");
    let request = CreateInstanceRequest::from_config(rds_config);
    let outcome = ensure_instance(rds, &request, FixedWait(rds_config.provision_wait())).await?;
    report.provision = Some(outcome);

    tracing::info!("Step 3/3: 데이터 적재");
    let (descriptor, endpoint) = resolve_endpoint(rds, &rds_config.db_instance_identifier).await?;
    report.instance = Some(descriptor.identifier);

    let target = ConnectionTarget::new(
        &endpoint,
        &rds_config.master_username,
        &rds_config.master_password,
        settings.load_database(),
    );
    report.loaded = load_rows(sink, &records, &target, settings.table_name()).await?;

    report.elapsed = start.elapsed();
    Ok(report)
}
