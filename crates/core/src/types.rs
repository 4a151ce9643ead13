//! 도메인 타입: 파서, 집계기, 규칙 엔진이 공유하는 데이터 구조
//!
//! 레코드는 파이프라인 단계 사이에서 값으로 전달됩니다.
//! 어떤 단계도 이전 단계의 레코드에 대한 참조를 보관하지 않습니다.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 행위자(IP 또는 호스트)와 선택적 타임스탬프를 가진 레코드
///
/// 윈도우 집계기는 이 trait만 보고 동작하므로, 새 로그 형식을 추가해도
/// 집계/규칙 로직은 수정할 필요가 없습니다.
pub trait ActorRecord {
    /// 소스 태그 (`web`, `ssh`)
    fn source_tag(&self) -> &'static str;

    /// 행위자 식별자
    fn actor(&self) -> &str;

    /// 이벤트 시각. 알 수 없으면 `None`.
    fn timestamp(&self) -> Option<NaiveDateTime>;
}

/// 웹 접근 로그 이벤트
///
/// access log 문법에 매칭된 라인에서만 생성됩니다.
/// 매칭되지 않은 라인은 0으로 채운 이벤트가 아니라 아예 이벤트를 만들지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebAccessEvent {
    /// 요청자 (IP 리터럴 또는 호스트명)
    pub actor: String,
    /// 요청 시각 (로그 로컬 시각, 파싱 실패 시 `None`)
    pub timestamp: Option<NaiveDateTime>,
    /// HTTP 메서드
    pub method: String,
    /// 요청 URL
    pub url: String,
    /// 프로토콜 (예: `HTTP/1.1`)
    pub protocol: String,
    /// 상태 코드 (3자리)
    pub status: u16,
    /// 응답 크기 (바이트). 숫자가 아니면 0.
    pub size: u64,
}

impl WebAccessEvent {
    /// 소스 태그
    pub const SOURCE_TAG: &'static str = "web";
}

impl ActorRecord for WebAccessEvent {
    fn source_tag(&self) -> &'static str {
        Self::SOURCE_TAG
    }

    fn actor(&self) -> &str {
        &self.actor
    }

    fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }
}

impl fmt::Display for WebAccessEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} \"{} {} {}\" {} {}",
            self.actor, self.method, self.url, self.protocol, self.status, self.size,
        )
    }
}

/// sshd 비밀번호 인증 실패 이벤트
///
/// auth log에서 `Failed password` 엔트리만 모델링합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshFailureEvent {
    /// 접속 시도 IP (IPv4 리터럴)
    pub actor: String,
    /// 시도 시각 (연도는 설정값 또는 현재 연도, 파싱 실패 시 `None`)
    pub timestamp: Option<NaiveDateTime>,
    /// 대상 사용자명
    pub user: String,
    /// 로그를 기록한 호스트
    pub host: String,
    /// 감사용 원본 라인 (앞뒤 공백 제거)
    pub raw_line: String,
}

impl SshFailureEvent {
    /// 소스 태그
    pub const SOURCE_TAG: &'static str = "ssh";
}

impl ActorRecord for SshFailureEvent {
    fn source_tag(&self) -> &'static str {
        Self::SOURCE_TAG
    }

    fn actor(&self) -> &str {
        &self.actor
    }

    fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }
}

impl fmt::Display for SshFailureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}@{}", self.actor, self.user, self.host)
    }
}

/// 알림 카테고리 (고정된 규칙 이름)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlertCategory {
    /// SSH 무차별 대입
    #[serde(rename = "SSH Brute Force")]
    SshBruteForce,
    /// 웹 스캐닝
    #[serde(rename = "Web Scanning")]
    WebScanning,
    /// 서비스 거부 의심
    #[serde(rename = "Possible DoS")]
    PossibleDos,
}

impl AlertCategory {
    /// 표시용 레이블
    pub fn label(&self) -> &'static str {
        match self {
            Self::SshBruteForce => "SSH Brute Force",
            Self::WebScanning => "Web Scanning",
            Self::PossibleDos => "Possible DoS",
        }
    }
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 보안 알림
///
/// 필드 순서(`time, ip, category, details, blacklisted`)가 곧 출력 컬럼 계약입니다.
/// 표시/내보내기 쪽은 이 순서에 의존하므로 바꾸지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// 트리거 시각. 윈도우 규칙은 윈도우 시작 시각, 시간 축이 없는 규칙은 `None`.
    pub time: Option<NaiveDateTime>,
    /// 행위자
    pub ip: String,
    /// 규칙 카테고리
    pub category: AlertCategory,
    /// 트리거 지표 요약
    pub details: String,
    /// 블랙리스트 포함 여부 (교차 참조 전에는 `false`)
    pub blacklisted: bool,
}

impl Alert {
    /// 출력 컬럼 이름 (순서 고정)
    pub const COLUMNS: [&'static str; 5] = ["time", "ip", "category", "details", "blacklisted"];

    /// 블랙리스트 표시가 없는 새 알림을 생성합니다.
    pub fn new(
        time: Option<NaiveDateTime>,
        ip: impl Into<String>,
        category: AlertCategory,
        details: impl Into<String>,
    ) -> Self {
        Self {
            time,
            ip: ip.into(),
            category,
            details: details.into(),
            blacklisted: false,
        }
    }

    /// 블랙리스트 플래그만 바꾼 사본을 반환합니다.
    pub fn with_blacklisted(self, blacklisted: bool) -> Self {
        Self {
            blacklisted,
            ..self
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.category, self.ip, self.details)?;
        if self.blacklisted {
            write!(f, " (blacklisted)")?;
        }
        Ok(())
    }
}
