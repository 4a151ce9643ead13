//! 탐지 규칙 엔진 -- 윈도우 집계 기반 임계값 규칙
//!
//! 각 규칙은 core의 [`Detector`] trait을 구현하는 순수 함수입니다.
//! 레코드 테이블 전체를 받아 알림 목록을 반환하며, 규칙 사이에 공유 상태는 없습니다.
//!
//! # 규칙
//! | 규칙 | 입력 | 그룹 | 지표 | 기본 임계값 |
//! |---|---|---|---|---|
//! | [`BruteForceRule`] | SSH 실패 | (IP, 5분) | 횟수 | 5 |
//! | [`ScanningRule`] | 웹 요청 | IP | 고유 URL 수 | 20 |
//! | [`DosRule`] | 웹 요청 | (IP, 1분) | 횟수 | 100 |
//!
//! # 아키텍처
//! - [`RuleSet`]: 세 규칙을 묶어 소스별로 평가
//! - [`types`]: 규칙 파라미터와 설명 타입

pub mod brute_force;
pub mod dos;
pub mod scanning;
pub mod types;

pub use brute_force::BruteForceRule;
pub use dos::DosRule;
pub use scanning::ScanningRule;
pub use types::{RuleConfig, RuleDescription, RuleSource};

use metrics::counter;
use tracing::debug;

use logwarden_core::metrics as m;
use logwarden_core::pipeline::Detector;
use logwarden_core::types::{Alert, AlertCategory, SshFailureEvent, WebAccessEvent};

use crate::error::AnalyzerError;

/// 규칙 묶음
///
/// 출력 순서는 무차별 대입, 스캐닝, DoS 순입니다.
/// 각 규칙 내부는 (행위자, 윈도우) 오름차순입니다.
///
/// # 사용 예시
/// ```ignore
/// let rules = RuleSet::default();
/// let mut alerts = rules.evaluate_auth(&ssh_records);
/// alerts.extend(rules.evaluate_web(&web_records));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    brute_force: BruteForceRule,
    scanning: ScanningRule,
    dos: DosRule,
}

impl RuleSet {
    /// 검증된 파라미터로 규칙 묶음을 생성합니다.
    pub fn new(
        brute_force: RuleConfig,
        scanning: RuleConfig,
        dos: RuleConfig,
    ) -> Result<Self, AnalyzerError> {
        brute_force.validate(BruteForceRule::ID)?;
        scanning.validate(ScanningRule::ID)?;
        dos.validate(DosRule::ID)?;

        Ok(Self {
            brute_force: BruteForceRule::new(brute_force),
            scanning: ScanningRule::new(scanning),
            dos: DosRule::new(dos),
        })
    }

    /// auth log 레코드에 적용되는 규칙을 평가합니다.
    pub fn evaluate_auth(&self, records: &[SshFailureEvent]) -> Vec<Alert> {
        run(&self.brute_force, records)
    }

    /// 웹 레코드에 적용되는 규칙을 평가합니다 (스캐닝, DoS 순).
    pub fn evaluate_web(&self, records: &[WebAccessEvent]) -> Vec<Alert> {
        let mut alerts = run(&self.scanning, records);
        alerts.extend(run(&self.dos, records));
        alerts
    }

    /// 적용 중인 규칙 파라미터 목록
    pub fn describe(&self) -> Vec<RuleDescription> {
        let brute_force = self.brute_force.config();
        let scanning = self.scanning.config();
        let dos = self.dos.config();

        vec![
            RuleDescription {
                id: BruteForceRule::ID,
                category: AlertCategory::SshBruteForce,
                source: RuleSource::Auth,
                threshold: brute_force.threshold,
                window_minutes: Some(brute_force.window_minutes),
                metric: "failed logins per IP per window",
            },
            RuleDescription {
                id: ScanningRule::ID,
                category: AlertCategory::WebScanning,
                source: RuleSource::Web,
                threshold: scanning.threshold,
                window_minutes: None,
                metric: "distinct URLs per IP",
            },
            RuleDescription {
                id: DosRule::ID,
                category: AlertCategory::PossibleDos,
                source: RuleSource::Web,
                threshold: dos.threshold,
                window_minutes: Some(dos.window_minutes),
                metric: "requests per IP per window",
            },
        ]
    }
}

fn run<R, D: Detector<R>>(detector: &D, records: &[R]) -> Vec<Alert> {
    let alerts = detector.detect(records);

    for alert in &alerts {
        counter!(m::RULE_ALERTS_TOTAL, m::LABEL_CATEGORY => alert.category.label()).increment(1);
    }

    debug!(
        rule = detector.name(),
        records = records.len(),
        alerts = alerts.len(),
        "rule evaluated"
    );

    alerts
}
