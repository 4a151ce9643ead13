//! 파이프라인 trait: 모듈 확장 포인트 정의

use crate::types::Alert;

/// 라인 파서 trait
///
/// 새로운 로그 형식을 지원하려면 이 trait을 구현합니다.
/// 문법에 맞지 않는 라인은 에러가 아니라 `None`입니다.
pub trait LineParser: Send + Sync {
    /// 파싱 결과 레코드 타입
    type Record;

    /// 지원하는 로그 형식 이름
    fn format_name(&self) -> &str;

    /// 한 줄을 레코드로 파싱. 매칭되지 않으면 `None`.
    fn parse_line(&self, line: &str) -> Option<Self::Record>;
}

/// 탐지 로직을 구현하는 trait
///
/// 레코드 테이블 전체를 받아 알림 목록을 반환하는 순수 함수입니다.
/// 빈 입력은 빈 출력이며, 에러가 아닙니다.
pub trait Detector<R>: Send + Sync {
    /// 탐지기 이름
    fn name(&self) -> &str;

    /// 레코드를 분석하여 알림을 생성
    fn detect(&self, records: &[R]) -> Vec<Alert>;
}
