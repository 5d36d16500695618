//! Coin collector CLI.

use clap::{Parser, Subcommand};
use coin_collector::modules::{AwsRdsClient, PostgresSink};
use coin_collector::{fetch_stage, provision_stage, run_pipeline, CollectorError, Result};
use coin_core::{init_logging, LogConfig, LogFormat, Settings};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "coin-collector")]
#[command(about = "CoinMarketCap → RDS PostgreSQL Data Collector", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// 설정 파일 경로 (INI)
    #[arg(long, short, default_value = "config/pipeline.conf")]
    config: PathBuf,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// 전체 파이프라인 실행 (수집 → 인스턴스 준비 → 적재), 기본값
    Run,

    /// 시세만 수집해 JSON으로 출력
    Fetch,

    /// RDS 인스턴스만 확인/생성
    Provision,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let mut log_config =
        LogConfig::new(format!("coin_collector={0},coin_core={0}", cli.log_level))
            .with_env_format();
    if let Some(format) = cli.log_format {
        log_config = log_config.with_format(format);
    }
    if let Err(e) = init_logging(&log_config) {
        eprintln!("로깅 초기화 실패: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(kind = e.kind(), error = %e, "파이프라인 실패");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(&cli.config)?;
    tracing::debug!(config = %cli.config.display(), "설정 로드 완료");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            tracing::info!("=== 파이프라인 시작 ===");
            let rds = AwsRdsClient::from_credentials(&settings.aws_boto_credentials).await;
            let report = run_pipeline(&settings, &rds, &PostgresSink).await?;
            report.log_summary("전체 파이프라인");
        }
        Commands::Fetch => {
            let records = fetch_stage(&settings).await?;
            let json = serde_json::to_string_pretty(&records)
                .map_err(|e| CollectorError::Fetch(e.to_string()))?;
            println!("{}", json);
        }
        Commands::Provision => {
            let rds = AwsRdsClient::from_credentials(&settings.aws_boto_credentials).await;
            let report = provision_stage(&settings, &rds).await?;
            report.log_summary("인스턴스 준비");
        }
    }

    Ok(())
}
