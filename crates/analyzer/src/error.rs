//! 분석기 에러 타입
//!
//! [`AnalyzerError`]는 분석기 내부에서 발생하는 모든 에러를 표현합니다.
//! `From<AnalyzerError> for LogwardenError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.
//!
//! 문법에 맞지 않는 라인이나 해석할 수 없는 타임스탬프는 에러가 아닙니다.
//! 파서가 그 자리에서 건너뛰거나 `None`으로 기록합니다.

use logwarden_core::error::{AnalysisError, ConfigError, LogwardenError};

/// 분석기 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    /// 분석할 로그 소스가 하나도 없음
    #[error("no log sources given: supply at least one of the web or auth log")]
    NoSources,

    /// 로그 파일 읽기 실패
    #[error("cannot read {source_kind} log '{path}': {source}")]
    Read {
        /// 소스 종류 (web, auth)
        source_kind: String,
        /// 파일 경로
        path: String,
        /// 원인 I/O 에러
        #[source]
        source: std::io::Error,
    },

    /// 블랙리스트 로딩 실패
    #[error("blacklist error: {path}: {reason}")]
    Blacklist {
        /// 블랙리스트 파일 경로
        path: String,
        /// 실패 사유
        reason: String,
    },

    /// CSV 내보내기 실패
    #[error("export error: {path}: {reason}")]
    Export {
        /// 대상 경로
        path: String,
        /// 실패 사유
        reason: String,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 정규식 컴파일 에러
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl From<AnalyzerError> for LogwardenError {
    fn from(err: AnalyzerError) -> Self {
        match err {
            AnalyzerError::NoSources => LogwardenError::Analysis(AnalysisError::NoSources),
            AnalyzerError::Read {
                source_kind,
                path,
                source,
            } => LogwardenError::Analysis(AnalysisError::Input {
                source_kind,
                path,
                reason: source.to_string(),
            }),
            AnalyzerError::Blacklist { path, reason } => {
                LogwardenError::Analysis(AnalysisError::Input {
                    source_kind: "blacklist".to_owned(),
                    path,
                    reason,
                })
            }
            AnalyzerError::Export { path, reason } => {
                LogwardenError::Analysis(AnalysisError::Export(format!("{path}: {reason}")))
            }
            AnalyzerError::Config { field, reason } => {
                LogwardenError::Config(ConfigError::InvalidValue { field, reason })
            }
            AnalyzerError::Regex(e) => LogwardenError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_display_names_source_and_path() {
        let err = AnalyzerError::Read {
            source_kind: "web".to_owned(),
            path: "/var/log/apache2/access.log".to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("web"));
        assert!(msg.contains("access.log"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn no_sources_converts_to_analysis_error() {
        let err: LogwardenError = AnalyzerError::NoSources.into();
        assert!(matches!(
            err,
            LogwardenError::Analysis(AnalysisError::NoSources)
        ));
    }

    #[test]
    fn read_error_converts_to_input_error() {
        let err: LogwardenError = AnalyzerError::Read {
            source_kind: "auth".to_owned(),
            path: "/tmp/auth.log".to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        }
        .into();
        match err {
            LogwardenError::Analysis(AnalysisError::Input {
                source_kind, path, ..
            }) => {
                assert_eq!(source_kind, "auth");
                assert_eq!(path, "/tmp/auth.log");
            }
            other => panic!("unexpected conversion: {other:?}"),
        }
    }

    #[test]
    fn config_error_converts_to_invalid_value() {
        let err: LogwardenError = AnalyzerError::Config {
            field: "dos.threshold".to_owned(),
            reason: "must be greater than 0".to_owned(),
        }
        .into();
        assert!(matches!(
            err,
            LogwardenError::Config(ConfigError::InvalidValue { .. })
        ));
    }
}
