//! 분석기 설정
//!
//! [`AnalyzerConfig`]는 core의 [`LogwardenConfig`](logwarden_core::config::LogwardenConfig)에서
//! 분석에 필요한 값만 뽑아낸 설정입니다.
//!
//! # 사용 예시
//! ```ignore
//! use logwarden_core::config::LogwardenConfig;
//! use logwarden_analyzer::config::AnalyzerConfig;
//!
//! let core_config = LogwardenConfig::default();
//! let config = AnalyzerConfig::from_core(&core_config);
//! ```

use serde::{Deserialize, Serialize};

use logwarden_core::config::LogwardenConfig;

use crate::error::AnalyzerError;
use crate::rule::{BruteForceRule, DosRule, RuleConfig, ScanningRule};

/// 분석기 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// SSH 무차별 대입 규칙
    pub brute_force: RuleConfig,
    /// 웹 스캐닝 규칙 (윈도우 미사용)
    pub scanning: RuleConfig,
    /// DoS 규칙
    pub dos: RuleConfig,
    /// auth log 연도. `None`이면 현재 연도.
    pub auth_year: Option<i32>,
    /// 상위 행위자 목록 크기
    pub top_n: usize,

    // --- 확장 설정 (core에 없는 추가 필드) ---
    /// 파서가 받아들이는 최대 라인 길이 (바이트)
    pub max_line_length: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            brute_force: BruteForceRule::DEFAULT,
            scanning: ScanningRule::DEFAULT,
            dos: DosRule::DEFAULT,
            auth_year: None,
            top_n: 4,
            max_line_length: 64 * 1024,
        }
    }
}

impl AnalyzerConfig {
    /// core 설정에서 분석기 설정을 생성합니다.
    ///
    /// core 설정에 없는 확장 필드는 기본값이 적용됩니다.
    pub fn from_core(core: &LogwardenConfig) -> Self {
        let detection = &core.detection;
        Self {
            brute_force: RuleConfig::new(
                detection.brute_force.threshold,
                detection.brute_force.window_minutes,
            ),
            scanning: RuleConfig::new(
                detection.scanning.threshold,
                ScanningRule::DEFAULT.window_minutes,
            ),
            dos: RuleConfig::new(detection.dos.threshold, detection.dos.window_minutes),
            auth_year: core.input.auth_log_year,
            top_n: core.report.top_n,
            ..Self::default()
        }
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        const MAX_LINE_LENGTH: usize = 16 * 1024 * 1024;

        self.brute_force.validate(BruteForceRule::ID)?;
        self.scanning.validate(ScanningRule::ID)?;
        self.dos.validate(DosRule::ID)?;

        if self.top_n == 0 {
            return Err(AnalyzerError::Config {
                field: "top_n".to_owned(),
                reason: "must be greater than 0".to_owned(),
            });
        }

        if self.max_line_length == 0 || self.max_line_length > MAX_LINE_LENGTH {
            return Err(AnalyzerError::Config {
                field: "max_line_length".to_owned(),
                reason: format!("must be 1-{}", MAX_LINE_LENGTH),
            });
        }

        if let Some(year) = self.auth_year {
            if !(1970..=9999).contains(&year) {
                return Err(AnalyzerError::Config {
                    field: "auth_year".to_owned(),
                    reason: format!("year {year} out of range 1970-9999"),
                });
            }
        }

        Ok(())
    }
}

/// 분석기 설정 빌더
#[derive(Default)]
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 무차별 대입 규칙 파라미터를 설정합니다.
    pub fn brute_force(mut self, threshold: u64, window_minutes: u32) -> Self {
        self.config.brute_force = RuleConfig::new(threshold, window_minutes);
        self
    }

    /// 스캐닝 임계값을 설정합니다.
    pub fn scanning_threshold(mut self, threshold: u64) -> Self {
        self.config.scanning.threshold = threshold;
        self
    }

    /// DoS 규칙 파라미터를 설정합니다.
    pub fn dos(mut self, threshold: u64, window_minutes: u32) -> Self {
        self.config.dos = RuleConfig::new(threshold, window_minutes);
        self
    }

    /// auth log 연도를 설정합니다.
    pub fn auth_year(mut self, year: i32) -> Self {
        self.config.auth_year = Some(year);
        self
    }

    /// 상위 행위자 목록 크기를 설정합니다.
    pub fn top_n(mut self, n: usize) -> Self {
        self.config.top_n = n;
        self
    }

    /// 최대 라인 길이를 설정합니다.
    pub fn max_line_length(mut self, length: usize) -> Self {
        self.config.max_line_length = length;
        self
    }

    /// 설정을 검증하고 `AnalyzerConfig`를 생성합니다.
    pub fn build(self) -> Result<AnalyzerConfig, AnalyzerError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        AnalyzerConfig::default().validate().unwrap();
    }

    #[test]
    fn defaults_match_rule_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.brute_force, RuleConfig::new(5, 5));
        assert_eq!(config.scanning.threshold, 20);
        assert_eq!(config.dos, RuleConfig::new(100, 1));
        assert_eq!(config.top_n, 4);
    }

    #[test]
    fn from_core_preserves_values() {
        let mut core = LogwardenConfig::default();
        core.detection.brute_force.threshold = 8;
        core.detection.brute_force.window_minutes = 15;
        core.detection.scanning.threshold = 40;
        core.detection.dos.threshold = 500;
        core.detection.dos.window_minutes = 2;
        core.input.auth_log_year = Some(2023);
        core.report.top_n = 10;

        let config = AnalyzerConfig::from_core(&core);
        assert_eq!(config.brute_force, RuleConfig::new(8, 15));
        assert_eq!(config.scanning.threshold, 40);
        assert_eq!(config.dos, RuleConfig::new(500, 2));
        assert_eq!(config.auth_year, Some(2023));
        assert_eq!(config.top_n, 10);
        // 확장 필드는 기본값
        assert_eq!(config.max_line_length, 64 * 1024);
    }

    #[test]
    fn validate_rejects_zero_top_n() {
        let config = AnalyzerConfig {
            top_n: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn builder_creates_valid_config() {
        let config = AnalyzerConfigBuilder::new()
            .brute_force(3, 10)
            .scanning_threshold(50)
            .dos(1000, 5)
            .auth_year(2022)
            .build()
            .unwrap();
        assert_eq!(config.brute_force, RuleConfig::new(3, 10));
        assert_eq!(config.scanning.threshold, 50);
        assert_eq!(config.dos, RuleConfig::new(1000, 5));
        assert_eq!(config.auth_year, Some(2022));
    }

    #[test]
    fn builder_rejects_invalid_config() {
        assert!(AnalyzerConfigBuilder::new().dos(0, 1).build().is_err());
        assert!(AnalyzerConfigBuilder::new().brute_force(5, 0).build().is_err());
        assert!(AnalyzerConfigBuilder::new().auth_year(1800).build().is_err());
        assert!(AnalyzerConfigBuilder::new().max_line_length(0).build().is_err());
    }
}
