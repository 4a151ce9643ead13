//! SSH 무차별 대입 탐지

use logwarden_core::pipeline::Detector;
use logwarden_core::types::{Alert, AlertCategory, SshFailureEvent};

use super::types::RuleConfig;
use crate::window::count_by_window;

/// `(IP, 윈도우)`별 실패 로그인 수가 임계값 이상이면 알림을 냅니다.
///
/// 기본값: 5분 윈도우에 5회.
#[derive(Debug, Clone)]
pub struct BruteForceRule {
    config: RuleConfig,
}

impl BruteForceRule {
    /// 규칙 ID
    pub const ID: &'static str = "brute_force";

    /// 기본 파라미터
    pub const DEFAULT: RuleConfig = RuleConfig {
        threshold: 5,
        window_minutes: 5,
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

impl Default for BruteForceRule {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl Detector<SshFailureEvent> for BruteForceRule {
    fn name(&self) -> &str {
        Self::ID
    }

    fn detect(&self, records: &[SshFailureEvent]) -> Vec<Alert> {
        let window = self.config.window_minutes;
        count_by_window(records, window)
            .into_iter()
            .filter(|(_, count)| *count >= self.config.threshold)
            .map(|(key, count)| {
                Alert::new(
                    Some(key.window_start),
                    key.actor,
                    AlertCategory::SshBruteForce,
                    format!("{count} failed logins within {window} min"),
                )
            })
            .collect()
    }
}
