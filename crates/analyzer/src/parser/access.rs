//! 웹 서버 access log 파서 (Common/Combined Log Format)
//!
//! # 라인 형식
//! ```text
//! ACTOR IDENT AUTHUSER [TIMESTAMP] "METHOD URL PROTOCOL" STATUS SIZE
//! ```
//!
//! Combined 형식의 referer/user-agent 같은 뒤쪽 필드는 무시됩니다.
//!
//! # 사용 예시
//! ```ignore
//! use logwarden_analyzer::parser::AccessLogParser;
//! use logwarden_core::pipeline::LineParser;
//!
//! let parser = AccessLogParser::new()?;
//! let event = parser.parse_line(
//!     r#"10.0.0.5 - - [10/Oct/2000:13:55:36 -0700] "GET /a.gif HTTP/1.0" 200 2326"#,
//! );
//! assert!(event.is_some());
//! ```

use chrono::NaiveDateTime;
use regex::Regex;

use logwarden_core::pipeline::LineParser;
use logwarden_core::types::WebAccessEvent;

use crate::error::AnalyzerError;

/// access log 한 줄의 문법. 라인 시작에 고정됩니다.
const ACCESS_LOG_PATTERN: &str = concat!(
    r"^(?P<ip>\S+) ",
    r"\S+ \S+ ",
    r"\[(?P<time>.+?)\] ",
    r#""(?P<method>\S+) "#,
    r"(?P<url>\S+) ",
    r#"(?P<protocol>[^"]+)" "#,
    r"(?P<status>[0-9]{3}) ",
    r"(?P<size>\S+)",
);

/// 타임스탬프 첫 토큰 형식 (예: `10/Oct/2000:13:55:36`). 오프셋은 버립니다.
const ACCESS_TIME_FORMAT: &str = "%d/%b/%Y:%H:%M:%S";

/// 웹 access log 파서
///
/// 문법에 맞지 않는 라인은 `None`을 반환합니다 (에러 아님).
/// 타임스탬프만 해석할 수 없는 경우에는 레코드를 유지하고 `timestamp`를 `None`으로 둡니다.
pub struct AccessLogParser {
    /// 컴파일된 라인 문법
    pattern: Regex,
    /// 최대 허용 라인 길이 (바이트)
    max_line_length: usize,
}

impl AccessLogParser {
    /// 형식 이름
    pub const FORMAT_NAME: &'static str = "access";

    /// 기본 설정으로 새 파서를 생성합니다.
    pub fn new() -> Result<Self, AnalyzerError> {
        Ok(Self {
            pattern: Regex::new(ACCESS_LOG_PATTERN)?,
            max_line_length: 64 * 1024, // 64KB
        })
    }

    /// 최대 라인 길이를 설정합니다. 더 긴 라인은 건너뜁니다.
    pub fn with_max_line_length(mut self, length: usize) -> Self {
        self.max_line_length = length;
        self
    }

    /// 대괄호 안의 시각 문자열에서 첫 토큰만 해석합니다.
    fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
        let token = raw.split_whitespace().next()?;
        NaiveDateTime::parse_from_str(token, ACCESS_TIME_FORMAT).ok()
    }

    /// 응답 크기. 숫자만으로 이루어진 경우에만 값을 사용하고 그 외(`-` 등)는 0입니다.
    fn parse_size(raw: &str) -> u64 {
        if raw.bytes().all(|b| b.is_ascii_digit()) {
            raw.parse().unwrap_or(0)
        } else {
            0
        }
    }
}

impl LineParser for AccessLogParser {
    type Record = WebAccessEvent;

    fn format_name(&self) -> &str {
        Self::FORMAT_NAME
    }

    fn parse_line(&self, line: &str) -> Option<WebAccessEvent> {
        if line.len() > self.max_line_length {
            return None;
        }

        let caps = self.pattern.captures(line)?;

        // 문법이 3자리 숫자를 보장하므로 실패하지 않습니다
        let status = caps["status"].parse().ok()?;

        Some(WebAccessEvent {
            actor: caps["ip"].to_owned(),
            timestamp: Self::parse_timestamp(&caps["time"]),
            method: caps["method"].to_owned(),
            url: caps["url"].to_owned(),
            protocol: caps["protocol"].to_owned(),
            status,
            size: Self::parse_size(&caps["size"]),
        })
    }
}
