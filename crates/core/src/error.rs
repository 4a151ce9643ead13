//! 에러 타입: 도메인별 에러 정의

/// Logwarden 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum LogwardenError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 분석 실행 에러
    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 분석 실행 에러
///
/// 라인 단위 파싱 실패는 에러가 아닙니다 (건너뜀).
/// 여기에는 호출자에게 알려야 하는 입력/전제조건 실패만 포함됩니다.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// 분석할 로그 소스가 하나도 지정되지 않음
    #[error("no log sources given: supply at least one of the web or auth log")]
    NoSources,

    /// 입력 파일을 읽을 수 없음
    #[error("cannot read {source_kind} log '{path}': {reason}")]
    Input {
        source_kind: String,
        path: String,
        reason: String,
    },

    /// 결과 내보내기 실패
    #[error("export failed: {0}")]
    Export(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_sources_message_is_actionable() {
        let err = LogwardenError::from(AnalysisError::NoSources);
        assert!(err.to_string().contains("at least one"));
    }

    #[test]
    fn input_error_carries_path_and_kind() {
        let err = AnalysisError::Input {
            source_kind: "auth".to_owned(),
            path: "/var/log/auth.log".to_owned(),
            reason: "permission denied".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("auth"));
        assert!(msg.contains("/var/log/auth.log"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn config_error_converts() {
        let err: LogwardenError = ConfigError::InvalidValue {
            field: "detection.dos.threshold".to_owned(),
            reason: "must be greater than 0".to_owned(),
        }
        .into();
        assert!(matches!(err, LogwardenError::Config(_)));
        assert!(err.to_string().contains("detection.dos.threshold"));
    }
}
