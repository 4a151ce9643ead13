//! 분석 오케스트레이션 -- 읽기/파싱/탐지/블랙리스트 교차 참조의 전체 흐름을 관리합니다.
//!
//! # 흐름
//! ```text
//! web log  -> AccessLogParser -> scanning, dos   \
//!                                                 -> concat -> Blacklist::annotate -> AnalysisReport
//! auth log -> AuthLogParser   -> brute force     /
//! ```
//!
//! 두 소스는 `tokio::join!`으로 동시에 읽고 파싱합니다.
//! [`Analyzer`]는 실행 사이에 상태를 보관하지 않습니다.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{Datelike, Local};
use metrics::histogram;
use serde::Serialize;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use logwarden_core::metrics as m;
use logwarden_core::types::{Alert, AlertCategory, SshFailureEvent, WebAccessEvent};

use crate::blacklist::Blacklist;
use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::parser::{AccessLogParser, AuthLogParser, ParsedLog, parse_file};
use crate::rule::RuleSet;
use crate::window::{ActorCount, top_actors};

/// 분석 요청 -- 최소 한 개의 소스가 필요합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// 웹 access log 경로
    pub web_log: Option<PathBuf>,
    /// SSH auth log 경로
    pub auth_log: Option<PathBuf>,
}

impl AnalysisRequest {
    /// 빈 요청
    pub fn new() -> Self {
        Self::default()
    }

    /// 웹 로그 경로를 지정합니다.
    pub fn web_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.web_log = Some(path.into());
        self
    }

    /// auth 로그 경로를 지정합니다.
    pub fn auth_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.auth_log = Some(path.into());
        self
    }

    /// 지정된 소스가 없는지 여부
    pub fn is_empty(&self) -> bool {
        self.web_log.is_none() && self.auth_log.is_none()
    }
}

/// 분석 결과
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// 실행 ID
    pub run_id: Uuid,
    /// 파싱된 웹 레코드 수
    pub web_records: usize,
    /// 파싱된 auth 레코드 수
    pub auth_records: usize,
    /// 두 소스에서 건너뛴 라인 수 합계
    pub lines_skipped: usize,
    /// 블랙리스트 교차 참조가 끝난 알림 (무차별 대입, 스캐닝, DoS 순)
    pub alerts: Vec<Alert>,
    /// 요청 수 상위 웹 행위자
    pub top_web_actors: Vec<ActorCount>,
    /// 실패 횟수 상위 SSH 행위자
    pub top_auth_actors: Vec<ActorCount>,
}

impl AnalysisReport {
    /// 카테고리별 알림 수
    pub fn count_by_category(&self) -> BTreeMap<AlertCategory, usize> {
        let mut counts = BTreeMap::new();
        for alert in &self.alerts {
            *counts.entry(alert.category).or_insert(0) += 1;
        }
        counts
    }

    /// 블랙리스트에 포함된 알림 수
    pub fn blacklisted_count(&self) -> usize {
        self.alerts.iter().filter(|a| a.blacklisted).count()
    }
}

/// 로그 분석기
///
/// # 사용 예시
/// ```ignore
/// let analyzer = AnalyzerBuilder::new().config(config).build()?;
/// let request = AnalysisRequest::new().auth_log("/var/log/auth.log");
/// let report = analyzer.analyze(&request, &Blacklist::new()).await?;
/// ```
pub struct Analyzer {
    config: AnalyzerConfig,
    rules: RuleSet,
    access_parser: AccessLogParser,
    auth_parser: AuthLogParser,
}

impl Analyzer {
    /// 분석기 설정
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// 적용 중인 규칙 묶음
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// auth log 타임스탬프에 쓰는 연도
    pub fn auth_year(&self) -> i32 {
        self.auth_parser.year()
    }

    /// 요청된 로그 파일을 분석합니다.
    ///
    /// 소스가 하나도 없으면 [`AnalyzerError::NoSources`]입니다.
    /// 지정되지 않은 소스는 빈 레코드로 취급합니다.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
        blacklist: &Blacklist,
    ) -> Result<AnalysisReport, AnalyzerError> {
        if request.is_empty() {
            return Err(AnalyzerError::NoSources);
        }

        let run_id = Uuid::new_v4();
        let span = info_span!("analysis", run_id = %run_id);

        async move {
            let started = Instant::now();
            info!(
                web = ?request.web_log,
                auth = ?request.auth_log,
                blacklist_entries = blacklist.len(),
                "analysis started"
            );

            let (web, auth) = tokio::join!(
                self.parse_web(request.web_log.as_deref()),
                self.parse_auth(request.auth_log.as_deref()),
            );
            let web = web?;
            let auth = auth?;

            let alerts = self.analyze_records(&web.records, &auth.records, blacklist);

            let report = AnalysisReport {
                run_id,
                web_records: web.records.len(),
                auth_records: auth.records.len(),
                lines_skipped: web.lines_skipped + auth.lines_skipped,
                top_web_actors: top_actors(&web.records, self.config.top_n),
                top_auth_actors: top_actors(&auth.records, self.config.top_n),
                alerts,
            };

            let elapsed = started.elapsed();
            histogram!(m::ANALYSIS_DURATION_SECONDS).record(elapsed.as_secs_f64());
            info!(
                web_records = report.web_records,
                auth_records = report.auth_records,
                skipped = report.lines_skipped,
                alerts = report.alerts.len(),
                blacklisted = report.blacklisted_count(),
                elapsed_ms = elapsed.as_millis() as u64,
                "analysis finished"
            );

            Ok(report)
        }
        .instrument(span)
        .await
    }

    /// 이미 파싱된 레코드에 규칙을 적용하고 블랙리스트를 교차 참조합니다.
    ///
    /// auth 규칙 결과가 먼저, 웹 규칙 결과가 뒤에 옵니다.
    pub fn analyze_records(
        &self,
        web: &[WebAccessEvent],
        auth: &[SshFailureEvent],
        blacklist: &Blacklist,
    ) -> Vec<Alert> {
        let mut alerts = self.rules.evaluate_auth(auth);
        alerts.extend(self.rules.evaluate_web(web));
        blacklist.annotate(alerts)
    }

    async fn parse_web(
        &self,
        path: Option<&Path>,
    ) -> Result<ParsedLog<WebAccessEvent>, AnalyzerError> {
        match path {
            Some(path) => parse_file(&self.access_parser, "web", path).await,
            None => Ok(ParsedLog::empty()),
        }
    }

    async fn parse_auth(
        &self,
        path: Option<&Path>,
    ) -> Result<ParsedLog<SshFailureEvent>, AnalyzerError> {
        match path {
            Some(path) => parse_file(&self.auth_parser, "auth", path).await,
            None => Ok(ParsedLog::empty()),
        }
    }
}

/// 분석기 빌더
pub struct AnalyzerBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self {
            config: AnalyzerConfig::default(),
        }
    }

    /// 분석기 설정을 지정합니다.
    pub fn config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// 분석기를 빌드합니다.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        self.config.validate()?;

        let rules = RuleSet::new(
            self.config.brute_force,
            self.config.scanning,
            self.config.dos,
        )?;

        let year = self.config.auth_year.unwrap_or_else(|| Local::now().year());
        let auth_parser =
            AuthLogParser::with_year(year)?.with_max_line_length(self.config.max_line_length);
        let access_parser =
            AccessLogParser::new()?.with_max_line_length(self.config.max_line_length);

        Ok(Analyzer {
            config: self.config,
            rules,
            access_parser,
            auth_parser,
        })
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
