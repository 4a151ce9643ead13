//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 모듈은 이 상수를 사용하여 `metrics::counter!()` 매크로를 호출합니다.
//! 레코더가 설치되지 않았으면 기록은 no-op입니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `logwarden_`
//! - 모듈명: `parser_`, `rule_`, `blacklist_`
//! - 접미어: `_total` (counter), `_seconds` (histogram)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(logwarden_core::metrics::PARSER_LINES_TOTAL, "format" => "auth").increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 파서 형식 레이블 키 (access, auth)
pub const LABEL_PARSER_FORMAT: &str = "format";

/// 알림 카테고리 레이블 키
pub const LABEL_CATEGORY: &str = "category";

// ─── Parser 메트릭 ──────────────────────────────────────────────────

/// Parser: 읽은 전체 라인 수 (counter, label: format)
pub const PARSER_LINES_TOTAL: &str = "logwarden_parser_lines_total";

/// Parser: 문법 불일치로 건너뛴 라인 수 (counter, label: format)
pub const PARSER_LINES_SKIPPED_TOTAL: &str = "logwarden_parser_lines_skipped_total";

/// Parser: 타임스탬프를 해석하지 못한 레코드 수 (counter, label: format)
pub const PARSER_UNKNOWN_TIMESTAMPS_TOTAL: &str = "logwarden_parser_unknown_timestamps_total";

// ─── Rule 메트릭 ────────────────────────────────────────────────────

/// Rule: 생성된 알림 수 (counter, label: category)
pub const RULE_ALERTS_TOTAL: &str = "logwarden_rule_alerts_total";

/// Rule: 분석 1회 소요 시간 (histogram, 초)
pub const ANALYSIS_DURATION_SECONDS: &str = "logwarden_analysis_duration_seconds";

// ─── Blacklist 메트릭 ───────────────────────────────────────────────

/// Blacklist: 블랙리스트에 포함된 알림 수 (counter)
pub const BLACKLIST_HITS_TOTAL: &str = "logwarden_blacklist_hits_total";

/// 모든 메트릭의 설명을 등록합니다.
///
/// 레코더 설치 후 한 번만 호출합니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!(PARSER_LINES_TOTAL, "Total log lines read per parser format");
    describe_counter!(
        PARSER_LINES_SKIPPED_TOTAL,
        "Log lines skipped because they did not match the grammar"
    );
    describe_counter!(
        PARSER_UNKNOWN_TIMESTAMPS_TOTAL,
        "Parsed records whose timestamp could not be interpreted"
    );
    describe_counter!(RULE_ALERTS_TOTAL, "Alerts emitted per rule category");
    describe_histogram!(
        ANALYSIS_DURATION_SECONDS,
        "Wall-clock duration of one analysis run in seconds"
    );
    describe_counter!(
        BLACKLIST_HITS_TOTAL,
        "Alerts whose actor is on the blacklist"
    );
}
