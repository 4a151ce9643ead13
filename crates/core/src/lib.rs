//! Logwarden 공통 크레이트
//!
//! 파서, 탐지기, CLI가 공유하는 도메인 타입, 확장 trait, 에러, 설정을 정의합니다.
//!
//! # 모듈 구성
//!
//! - [`types`]: 이벤트 레코드와 알림 타입
//! - [`pipeline`]: `LineParser`, `Detector` 확장 trait
//! - [`config`]: `logwarden.toml` 로딩 및 검증
//! - [`error`]: 에러 타입
//! - [`metrics`]: 메트릭 이름 상수

pub mod config;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod types;

// --- 주요 타입 re-export ---

// 에러
pub use error::{AnalysisError, ConfigError, LogwardenError};

// 설정
pub use config::LogwardenConfig;

// 파이프라인 trait
pub use pipeline::{Detector, LineParser};

// 도메인 타입
pub use types::{ActorRecord, Alert, AlertCategory, SshFailureEvent, WebAccessEvent};
