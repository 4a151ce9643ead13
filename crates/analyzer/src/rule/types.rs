//! 탐지 규칙 데이터 타입
//!
//! 규칙 파라미터와 CLI 표시용 규칙 설명을 정의합니다.

use serde::{Deserialize, Serialize};

use logwarden_core::config::MAX_WINDOW_MINUTES;
use logwarden_core::types::AlertCategory;

use crate::error::AnalyzerError;

/// 규칙 파라미터
///
/// 비교는 포함 비교(`>=`)입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// 알림 임계값 (1 이상)
    pub threshold: u64,
    /// 윈도우 크기(분). 시간 축이 없는 규칙은 무시합니다.
    pub window_minutes: u32,
}

impl RuleConfig {
    /// 새 규칙 파라미터를 생성합니다.
    pub fn new(threshold: u64, window_minutes: u32) -> Self {
        Self {
            threshold,
            window_minutes,
        }
    }

    /// 파라미터를 검증합니다. `rule_id`는 에러 메시지의 필드 경로에 쓰입니다.
    pub fn validate(&self, rule_id: &str) -> Result<(), AnalyzerError> {
        if self.threshold == 0 {
            return Err(AnalyzerError::Config {
                field: format!("{rule_id}.threshold"),
                reason: "must be greater than 0".to_owned(),
            });
        }

        if self.window_minutes == 0 || self.window_minutes > MAX_WINDOW_MINUTES {
            return Err(AnalyzerError::Config {
                field: format!("{rule_id}.window_minutes"),
                reason: format!("must be between 1 and {MAX_WINDOW_MINUTES}"),
            });
        }

        Ok(())
    }
}

/// 로그 소스 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSource {
    /// 웹 access log
    Web,
    /// SSH auth log
    Auth,
}

impl std::fmt::Display for RuleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Web => f.write_str("web"),
            Self::Auth => f.write_str("auth"),
        }
    }
}

/// 규칙 설명 (CLI `rules` 명령 표시용)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDescription {
    /// 규칙 ID
    pub id: &'static str,
    /// 생성하는 알림 카테고리
    pub category: AlertCategory,
    /// 입력 소스
    pub source: RuleSource,
    /// 임계값
    pub threshold: u64,
    /// 윈도우 크기(분). 시간 축이 없으면 `None`.
    pub window_minutes: Option<u32>,
    /// 측정 지표 설명
    pub metric: &'static str,
}
