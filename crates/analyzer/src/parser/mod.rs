//! 로그 파싱 모듈 -- 웹 access log, SSH auth log
//!
//! 각 파서는 core의 [`LineParser`](logwarden_core::pipeline::LineParser) trait을 구현합니다.
//! [`parse_text`]는 텍스트 전체를 라인 단위로 파싱하고,
//! [`parse_file`]은 파일을 비동기로 읽은 뒤 같은 처리를 수행합니다.
//!
//! # 지원 형식
//! - Common/Combined Log Format ([`AccessLogParser`])
//! - sshd 실패 로그인 라인 ([`AuthLogParser`])
//!
//! # 사용 예시
//! ```ignore
//! use logwarden_analyzer::parser::{parse_text, AccessLogParser};
//!
//! let parsed = parse_text(&AccessLogParser::new()?, &contents);
//! println!("{} records, {} skipped", parsed.records.len(), parsed.lines_skipped);
//! ```

pub mod access;
pub mod auth;

pub use access::AccessLogParser;
pub use auth::AuthLogParser;

use std::path::Path;

use metrics::counter;
use tracing::debug;

use logwarden_core::metrics as m;
use logwarden_core::pipeline::LineParser;
use logwarden_core::types::ActorRecord;

use crate::error::AnalyzerError;

/// 파싱 결과
///
/// 레코드는 입력 라인 순서를 유지합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLog<R> {
    /// 문법에 맞은 레코드
    pub records: Vec<R>,
    /// 읽은 전체 라인 수
    pub lines_total: usize,
    /// 문법 불일치로 건너뛴 라인 수
    pub lines_skipped: usize,
}

impl<R> ParsedLog<R> {
    /// 빈 결과
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            lines_total: 0,
            lines_skipped: 0,
        }
    }
}

impl<R> Default for ParsedLog<R> {
    fn default() -> Self {
        Self::empty()
    }
}

/// 텍스트를 라인 단위로 파싱합니다.
///
/// `\n`과 `\r\n` 모두 줄바꿈으로 인식합니다.
/// 문법에 맞지 않는 라인은 조용히 건너뛰고 개수만 집계합니다.
pub fn parse_text<P>(parser: &P, text: &str) -> ParsedLog<P::Record>
where
    P: LineParser,
    P::Record: ActorRecord,
{
    let mut parsed = ParsedLog::empty();
    let mut unknown_timestamps = 0u64;

    for line in text.lines() {
        parsed.lines_total += 1;
        match parser.parse_line(line) {
            Some(record) => {
                if record.timestamp().is_none() {
                    unknown_timestamps += 1;
                }
                parsed.records.push(record);
            }
            None => parsed.lines_skipped += 1,
        }
    }

    let format = parser.format_name().to_owned();
    counter!(m::PARSER_LINES_TOTAL, m::LABEL_PARSER_FORMAT => format.clone())
        .increment(parsed.lines_total as u64);
    counter!(m::PARSER_LINES_SKIPPED_TOTAL, m::LABEL_PARSER_FORMAT => format.clone())
        .increment(parsed.lines_skipped as u64);
    counter!(m::PARSER_UNKNOWN_TIMESTAMPS_TOTAL, m::LABEL_PARSER_FORMAT => format.clone())
        .increment(unknown_timestamps);

    debug!(
        format = %format,
        lines = parsed.lines_total,
        records = parsed.records.len(),
        skipped = parsed.lines_skipped,
        unknown_timestamps,
        "parsed log text"
    );

    parsed
}

/// 파일을 비동기로 읽어 파싱합니다.
///
/// UTF-8이 아닌 바이트는 대체 문자로 바꿔 읽습니다.
/// 파일을 열거나 읽을 수 없으면 [`AnalyzerError::Read`]를 반환합니다.
pub async fn parse_file<P>(
    parser: &P,
    source_kind: &str,
    path: &Path,
) -> Result<ParsedLog<P::Record>, AnalyzerError>
where
    P: LineParser,
    P::Record: ActorRecord,
{
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| AnalyzerError::Read {
            source_kind: source_kind.to_owned(),
            path: path.display().to_string(),
            source,
        })?;

    let text = String::from_utf8_lossy(&bytes);
    debug!(
        source = source_kind,
        path = %path.display(),
        bytes = bytes.len(),
        "read log file"
    );

    Ok(parse_text(parser, &text))
}
