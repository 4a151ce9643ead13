//! Logwarden 분석기
//!
//! 웹 access log와 SSH auth log를 읽어 타입이 있는 레코드로 파싱하고,
//! 시간 윈도우 집계 위에서 임계값 규칙을 평가한 뒤,
//! 블랙리스트와 교차 참조된 알림 테이블을 만듭니다.
//!
//! # 모듈 구성
//!
//! - [`parser`]: access log / auth log 라인 파서
//! - [`window`]: 행위자별, 시간 버킷별 집계
//! - [`rule`]: 무차별 대입, 스캐닝, DoS 규칙
//! - [`blacklist`]: 알려진 악성 IP 교차 참조
//! - [`export`]: CSV 내보내기
//! - [`pipeline`]: 전체 분석 오케스트레이션
//! - [`config`]: 분석기 설정 (core 설정 확장)
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! text -> LineParser -> records -> window -> RuleSet -> alerts -> Blacklist -> report / CSV
//! ```

pub mod blacklist;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod window;

pub mod parser;
pub mod rule;

// --- 주요 타입 re-export ---

// 파이프라인
pub use pipeline::{AnalysisReport, AnalysisRequest, Analyzer, AnalyzerBuilder};

// 설정
pub use config::{AnalyzerConfig, AnalyzerConfigBuilder};

// 에러
pub use error::AnalyzerError;

// 파서
pub use parser::{AccessLogParser, AuthLogParser, ParsedLog, parse_file, parse_text};

// 규칙 엔진
pub use rule::{BruteForceRule, DosRule, RuleConfig, RuleDescription, RuleSet, ScanningRule};

// 집계
pub use window::{
    ActorCount, WindowKey, count_by_window, count_distinct_by_actor, floor_to_window, top_actors,
};

// 블랙리스트 / 내보내기
pub use blacklist::Blacklist;
pub use export::{export_csv, write_csv};
