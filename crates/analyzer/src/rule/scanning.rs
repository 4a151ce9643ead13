//! 웹 스캐닝 탐지

use logwarden_core::pipeline::Detector;
use logwarden_core::types::{Alert, AlertCategory, WebAccessEvent};

use super::types::RuleConfig;
use crate::window::count_distinct_by_actor;

/// IP별 서로 다른 URL 수가 임계값 이상이면 알림을 냅니다.
///
/// 시간 윈도우가 없는 전역 집계이며, 알림의 `time`은 항상 `None`입니다.
/// 타임스탬프가 없는 요청도 집계에 포함됩니다.
#[derive(Debug, Clone)]
pub struct ScanningRule {
    config: RuleConfig,
}

impl ScanningRule {
    /// 규칙 ID
    pub const ID: &'static str = "scanning";

    /// 기본 파라미터 (윈도우 값은 사용하지 않음)
    pub const DEFAULT: RuleConfig = RuleConfig {
        threshold: 20,
        window_minutes: 1,
    };

    /// 새 규칙을 생성합니다.
    pub fn new(config: RuleConfig) -> Self {
        Self { config }
    }

    /// 규칙 파라미터
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }
}

impl Default for ScanningRule {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl Detector<WebAccessEvent> for ScanningRule {
    fn name(&self) -> &str {
        Self::ID
    }

    fn detect(&self, records: &[WebAccessEvent]) -> Vec<Alert> {
        count_distinct_by_actor(records, |r| r.url.as_str())
            .into_iter()
            .filter(|(_, distinct)| *distinct as u64 >= self.config.threshold)
            .map(|(actor, distinct)| {
                Alert::new(
                    None,
                    actor,
                    AlertCategory::WebScanning,
                    format!("{distinct} unique URLs accessed"),
                )
            })
            .collect()
    }
}
