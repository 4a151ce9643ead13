//! 설정 관리: logwarden.toml 파싱 및 런타임 설정
//!
//! [`LogwardenConfig`]는 모든 모듈의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`LOGWARDEN_DETECTION_DOS_THRESHOLD=200` 형식)
//! 3. 설정 파일 (`logwarden.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), logwarden_core::error::LogwardenError> {
//! use logwarden_core::config::LogwardenConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = LogwardenConfig::load("logwarden.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = LogwardenConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, LogwardenError};

/// 윈도우 크기 상한 (분). 하루를 넘는 윈도우는 의미가 없습니다.
pub const MAX_WINDOW_MINUTES: u32 = 24 * 60;

/// Logwarden 통합 설정
///
/// `logwarden.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogwardenConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 탐지 규칙 설정
    #[serde(default)]
    pub detection: DetectionConfig,
    /// 입력 설정
    #[serde(default)]
    pub input: InputConfig,
    /// 리포트 설정
    #[serde(default)]
    pub report: ReportConfig,
}

impl LogwardenConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, LogwardenError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 기본값에 환경변수 오버라이드만 적용한 설정을 만듭니다.
    ///
    /// 설정 파일 없이 실행할 때 사용합니다.
    pub fn from_env() -> Result<Self, LogwardenError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, LogwardenError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LogwardenError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                LogwardenError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, LogwardenError> {
        toml::from_str(toml_str).map_err(|e| {
            LogwardenError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `LOGWARDEN_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "LOGWARDEN_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "LOGWARDEN_GENERAL_LOG_FORMAT");

        // Detection
        override_u64(
            &mut self.detection.brute_force.threshold,
            "LOGWARDEN_DETECTION_BRUTE_FORCE_THRESHOLD",
        );
        override_u32(
            &mut self.detection.brute_force.window_minutes,
            "LOGWARDEN_DETECTION_BRUTE_FORCE_WINDOW_MINUTES",
        );
        override_u64(
            &mut self.detection.scanning.threshold,
            "LOGWARDEN_DETECTION_SCANNING_THRESHOLD",
        );
        override_u64(
            &mut self.detection.dos.threshold,
            "LOGWARDEN_DETECTION_DOS_THRESHOLD",
        );
        override_u32(
            &mut self.detection.dos.window_minutes,
            "LOGWARDEN_DETECTION_DOS_WINDOW_MINUTES",
        );

        // Input
        override_string(
            &mut self.input.blacklist_path,
            "LOGWARDEN_INPUT_BLACKLIST_PATH",
        );
        override_opt_i32(&mut self.input.auth_log_year, "LOGWARDEN_INPUT_AUTH_LOG_YEAR");

        // Report
        override_string(&mut self.report.reports_dir, "LOGWARDEN_REPORT_REPORTS_DIR");
        override_usize(&mut self.report.top_n, "LOGWARDEN_REPORT_TOP_N");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LogwardenError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        validate_threshold(
            self.detection.brute_force.threshold,
            "detection.brute_force.threshold",
        )?;
        validate_window(
            self.detection.brute_force.window_minutes,
            "detection.brute_force.window_minutes",
        )?;
        validate_threshold(
            self.detection.scanning.threshold,
            "detection.scanning.threshold",
        )?;
        validate_threshold(self.detection.dos.threshold, "detection.dos.threshold")?;
        validate_window(
            self.detection.dos.window_minutes,
            "detection.dos.window_minutes",
        )?;

        if let Some(year) = self.input.auth_log_year {
            if !(1970..=9999).contains(&year) {
                return Err(ConfigError::InvalidValue {
                    field: "input.auth_log_year".to_owned(),
                    reason: "must be between 1970 and 9999".to_owned(),
                }
                .into());
            }
        }

        if self.report.top_n == 0 {
            return Err(ConfigError::InvalidValue {
                field: "report.top_n".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

fn validate_threshold(value: u64, field: &str) -> Result<(), LogwardenError> {
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            field: field.to_owned(),
            reason: "must be greater than 0".to_owned(),
        }
        .into());
    }
    Ok(())
}

fn validate_window(value: u32, field: &str) -> Result<(), LogwardenError> {
    if value == 0 || value > MAX_WINDOW_MINUTES {
        return Err(ConfigError::InvalidValue {
            field: field.to_owned(),
            reason: format!("must be 1-{}", MAX_WINDOW_MINUTES),
        }
        .into());
    }
    Ok(())
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 탐지 규칙 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// SSH 무차별 대입 규칙
    pub brute_force: BruteForceConfig,
    /// 웹 스캐닝 규칙
    pub scanning: ScanningConfig,
    /// DoS 규칙
    pub dos: DosConfig,
}

/// SSH 무차별 대입 규칙 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BruteForceConfig {
    /// 윈도우 내 실패 횟수 임계값 (이상이면 알림)
    pub threshold: u64,
    /// 윈도우 크기 (분)
    pub window_minutes: u32,
}

impl Default for BruteForceConfig {
    fn default() -> Self {
        Self {
            threshold: 5,
            window_minutes: 5,
        }
    }
}

/// 웹 스캐닝 규칙 설정
///
/// 시간 윈도우가 없습니다 (로그 전체 기간 동안의 고유 URL 수).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanningConfig {
    /// 고유 URL 수 임계값
    pub threshold: u64,
}

impl Default for ScanningConfig {
    fn default() -> Self {
        Self { threshold: 20 }
    }
}

/// DoS 규칙 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DosConfig {
    /// 윈도우 내 요청 수 임계값
    pub threshold: u64,
    /// 윈도우 크기 (분)
    pub window_minutes: u32,
}

impl Default for DosConfig {
    fn default() -> Self {
        Self {
            threshold: 100,
            window_minutes: 1,
        }
    }
}

/// 입력 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// 블랙리스트 파일 경로 (한 줄에 하나, 빈 줄 무시)
    pub blacklist_path: String,
    /// auth log 연도. 없으면 현재 연도.
    pub auth_log_year: Option<i32>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            blacklist_path: "blacklist_ips.txt".to_owned(),
            auth_log_year: None,
        }
    }
}

/// 리포트 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// CSV 내보내기 디렉토리
    pub reports_dir: String,
    /// 상위 행위자 목록 크기
    pub top_n: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            reports_dir: "reports".to_owned(),
            top_n: 4,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

fn override_u32(target: &mut u32, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u32>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u32 from env var, ignoring"
            ),
        }
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}

fn override_opt_i32(target: &mut Option<i32>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<i32>() {
            Ok(parsed) => *target = Some(parsed),
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse i32 from env var, ignoring"
            ),
        }
    }
}
