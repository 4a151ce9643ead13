//! SSH 인증 실패 파서 (syslog 형식 auth log)
//!
//! `sshd` 의 "Failed password" 라인만 레코드로 인식하고
//! 나머지 auth log 라인(세션 열림, sudo 등)은 건너뜁니다.
//!
//! # 라인 예시
//! ```text
//! Jan 10 06:32:47 web01 sshd[1234]: Failed password for invalid user admin from 203.0.113.9 port 22 ssh2
//! ```
//!
//! syslog 타임스탬프에는 연도가 없으므로 파서가 보유한 연도를 사용합니다.

use chrono::{Datelike, Local, NaiveDateTime};
use regex::Regex;

use logwarden_core::pipeline::LineParser;
use logwarden_core::types::SshFailureEvent;

use crate::error::AnalyzerError;

/// 실패 로그인 라인 문법. 라인 어디에서든 찾습니다.
const SSH_FAILURE_PATTERN: &str = concat!(
    r"(?P<month>\w{3})\s+",
    r"(?P<day>[0-9]{1,2})\s+",
    r"(?P<time>[0-9]{2}:[0-9]{2}:[0-9]{2})\s+",
    r"(?P<host>\S+)\s+",
    r"sshd\[[0-9]+\]:\s+",
    r"Failed password for (?:invalid user )?(?P<user>\S+) ",
    r"from (?P<ip>[0-9]+\.[0-9]+\.[0-9]+\.[0-9]+)",
);

const SSH_TIME_FORMAT: &str = "%d %b %Y %H:%M:%S";

/// SSH 인증 실패 파서
pub struct AuthLogParser {
    pattern: Regex,
    /// 타임스탬프에 붙일 연도
    year: i32,
    max_line_length: usize,
}

impl AuthLogParser {
    /// 형식 이름
    pub const FORMAT_NAME: &'static str = "auth";

    /// 현재 연도(로컬 시계)를 사용하는 파서를 생성합니다.
    pub fn new() -> Result<Self, AnalyzerError> {
        Self::with_year(Local::now().year())
    }

    /// 지정된 연도를 사용하는 파서를 생성합니다.
    pub fn with_year(year: i32) -> Result<Self, AnalyzerError> {
        Ok(Self {
            pattern: Regex::new(SSH_FAILURE_PATTERN)?,
            year,
            max_line_length: 64 * 1024,
        })
    }

    /// 최대 라인 길이를 설정합니다.
    pub fn with_max_line_length(mut self, length: usize) -> Self {
        self.max_line_length = length;
        self
    }

    /// 이 파서가 사용하는 연도
    pub fn year(&self) -> i32 {
        self.year
    }

    fn parse_timestamp(&self, month: &str, day: &str, time: &str) -> Option<NaiveDateTime> {
        let composed = format!("{:0>2} {} {} {}", day, month, self.year, time);
        NaiveDateTime::parse_from_str(&composed, SSH_TIME_FORMAT).ok()
    }
}

impl LineParser for AuthLogParser {
    type Record = SshFailureEvent;

    fn format_name(&self) -> &str {
        Self::FORMAT_NAME
    }

    fn parse_line(&self, line: &str) -> Option<SshFailureEvent> {
        if line.len() > self.max_line_length {
            return None;
        }

        let caps = self.pattern.captures(line)?;

        Some(SshFailureEvent {
            actor: caps["ip"].to_owned(),
            timestamp: self.parse_timestamp(&caps["month"], &caps["day"], &caps["time"]),
            user: caps["user"].to_owned(),
            host: caps["host"].to_owned(),
            raw_line: line.trim().to_owned(),
        })
    }
}
