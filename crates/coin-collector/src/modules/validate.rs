//! 적재 전 데이터 검사.

use coin_core::MarketRecord;

/// 결과 테이블이 비어 있지 않은지 확인합니다.
///
/// 비어 있으면 경고를 남기고 `false`를 돌려줍니다. 검사 결과는 참고용이며
/// 호출 측([`crate::modules::load::load_rows`])은 `false`여도 적재를 계속합니다.
pub fn is_non_empty(rows: &[MarketRecord]) -> bool {
    if rows.is_empty() {
        tracing::warn!("데이터가 비어 있습니다. 적재 대상 행이 없습니다");
        return false;
    }

    tracing::info!(rows = rows.len(), "유효한 데이터, 적재 진행");
    true
}
