//! 블랙리스트 교차 참조
//!
//! 알려진 악성 IP 목록과 알림의 행위자를 비교해 `blacklisted` 플래그를 설정합니다.
//! 비교는 대소문자를 구분하는 정확한 문자열 일치입니다.

use std::collections::HashSet;
use std::path::Path;

use metrics::counter;
use tracing::{debug, warn};

use logwarden_core::metrics as m;
use logwarden_core::types::Alert;

use crate::error::AnalyzerError;

/// 알려진 악성 행위자 집합
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    entries: HashSet<String>,
}

impl Blacklist {
    /// 빈 블랙리스트
    pub fn new() -> Self {
        Self::default()
    }

    /// 한 줄에 하나씩 적힌 목록을 읽습니다.
    ///
    /// 앞뒤 공백은 제거하고 빈 줄은 무시합니다.
    pub fn from_lines(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// 파일에서 블랙리스트를 읽습니다.
    ///
    /// 파일이 없으면 경고를 남기고 빈 블랙리스트를 반환합니다.
    /// 그 외 I/O 실패는 [`AnalyzerError::Blacklist`]입니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, AnalyzerError> {
        let path = path.as_ref();
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                let list = Self::from_lines(&String::from_utf8_lossy(&bytes));
                debug!(path = %path.display(), entries = list.len(), "blacklist loaded");
                Ok(list)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "blacklist file not found, continuing without it");
                Ok(Self::new())
            }
            Err(e) => Err(AnalyzerError::Blacklist {
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// 항목을 추가합니다.
    pub fn insert(&mut self, actor: impl Into<String>) -> bool {
        self.entries.insert(actor.into())
    }

    /// 포함 여부
    pub fn contains(&self, actor: &str) -> bool {
        self.entries.contains(actor)
    }

    /// 항목 수
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 비어 있는지 여부
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 각 알림의 `blacklisted` 플래그를 설정합니다.
    ///
    /// 알림을 걸러내거나 순서를 바꾸지 않으며 다른 필드도 건드리지 않습니다.
    pub fn annotate(&self, alerts: Vec<Alert>) -> Vec<Alert> {
        let annotated: Vec<Alert> = alerts
            .into_iter()
            .map(|alert| {
                let hit = self.contains(&alert.ip);
                alert.with_blacklisted(hit)
            })
            .collect();

        let hits = annotated.iter().filter(|a| a.blacklisted).count();
        counter!(m::BLACKLIST_HITS_TOTAL).increment(hits as u64);

        annotated
    }
}

impl FromIterator<String> for Blacklist {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
