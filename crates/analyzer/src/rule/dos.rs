//! 요청 폭주(DoS 의심) 탐지

use logwarden_core::pipeline::Detector;
use logwarden_core::types::{Alert, AlertCategory, WebAccessEvent};

use super::types::RuleConfig;
use crate::window::count_by_window;

/// `(IP, 윈도우)`별 요청 수가 임계값 이상이면 알림을 냅니다.
///
/// 기본값: 1분 윈도우에 100회.
#[derive(Debug, Clone)]
pub struct DosRule {
    config: RuleConfig,
}

impl DosRule {
    /// 규칙 ID
    pub const ID: &'static str = "dos";

    /// 기본 파라미터
    pub const DEFAULT: RuleConfig = RuleConfig {
        threshold: 100,
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

impl Default for DosRule {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl Detector<WebAccessEvent> for DosRule {
    fn name(&self) -> &str {
        Self::ID
    }

    fn detect(&self, records: &[WebAccessEvent]) -> Vec<Alert> {
        let window = self.config.window_minutes;
        count_by_window(records, window)
            .into_iter()
            .filter(|(_, count)| *count >= self.config.threshold)
            .map(|(key, count)| {
                Alert::new(
                    Some(key.window_start),
                    key.actor,
                    AlertCategory::PossibleDos,
                    format!("{count} requests within {window} min"),
                )
            })
            .collect()
    }
}
