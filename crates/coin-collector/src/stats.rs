//! 실행 결과 요약.

use crate::modules::ProvisionOutcome;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// 파이프라인 한 번 실행의 결과
#[derive(Debug, Clone)]
pub struct RunReport {
    /// 시작 시각
    pub started_at: DateTime<Utc>,
    /// API에서 받은 행 수
    pub fetched: usize,
    /// 테이블에 추가된 행 수
    pub loaded: u64,
    /// 인스턴스 준비 결과 (준비 단계를 건너뛰면 None)
    pub provision: Option<ProvisionOutcome>,
    /// 적재한 인스턴스 식별자
    pub instance: Option<String>,
    /// 소요 시간
    pub elapsed: Duration,
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            fetched: 0,
            loaded: 0,
            provision: None,
            instance: None,
            elapsed: Duration::ZERO,
        }
    }

    /// 이번 실행에서 인스턴스를 새로 만들었는지
    pub fn instance_created(&self) -> bool {
        self.provision == Some(ProvisionOutcome::Created)
    }

    /// 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            started_at = %self.started_at.format("%Y-%m-%d %H:%M:%S"),
            fetched = self.fetched,
            loaded = self.loaded,
            instance = self.instance.as_deref().unwrap_or("-"),
            instance_created = self.instance_created(),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "실행 완료"
        );
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}
