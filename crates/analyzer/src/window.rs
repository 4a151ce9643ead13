//! 윈도우 집계 -- 행위자별/시간 버킷별 카운트
//!
//! 모든 집계 결과는 `BTreeMap`으로 반환되므로 입력 순서와 무관하게
//! 같은 입력 집합은 항상 같은 순서의 결과를 냅니다.
//!
//! 버킷은 Unix epoch 기준으로 정렬됩니다.
//! 5분 윈도우라면 `06:32:47`은 `06:30:00` 버킷에 들어갑니다.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;

use chrono::{NaiveDateTime, TimeDelta, Timelike};
use serde::Serialize;

use logwarden_core::types::ActorRecord;

/// `(행위자, 윈도우 시작 시각)` 집계 키
///
/// 정렬 순서는 행위자 먼저, 그 다음 윈도우 시작 시각입니다.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct WindowKey {
    /// 행위자
    pub actor: String,
    /// 윈도우 시작 시각
    pub window_start: NaiveDateTime,
}

/// 행위자별 레코드 수
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorCount {
    /// 행위자
    pub actor: String,
    /// 레코드 수
    pub count: usize,
}

/// 시각을 `minutes`분 버킷의 시작 시각으로 내림합니다.
///
/// `minutes`가 0이면 1분으로 취급합니다.
pub fn floor_to_window(ts: NaiveDateTime, minutes: u32) -> NaiveDateTime {
    let span = i64::from(minutes.max(1)) * 60;
    let offset = ts.and_utc().timestamp().rem_euclid(span);
    let delta = TimeDelta::seconds(offset) + TimeDelta::nanoseconds(i64::from(ts.nanosecond()));
    ts.checked_sub_signed(delta).unwrap_or(ts)
}

/// `(행위자, 윈도우)`별 레코드 수를 셉니다.
///
/// 타임스탬프가 없는 레코드는 제외됩니다.
pub fn count_by_window<R: ActorRecord>(records: &[R], minutes: u32) -> BTreeMap<WindowKey, u64> {
    let mut counts = BTreeMap::new();
    for record in records {
        let Some(ts) = record.timestamp() else {
            continue;
        };
        let key = WindowKey {
            actor: record.actor().to_owned(),
            window_start: floor_to_window(ts, minutes),
        };
        *counts.entry(key).or_insert(0u64) += 1;
    }
    counts
}

/// 행위자별로 `field` 값의 서로 다른 개수를 셉니다.
///
/// 시간 축이 없으므로 타임스탬프가 없는 레코드도 포함됩니다.
pub fn count_distinct_by_actor<'a, R, K, F>(records: &'a [R], field: F) -> BTreeMap<String, usize>
where
    R: ActorRecord,
    K: Eq + Hash,
    F: Fn(&'a R) -> K,
{
    let mut seen: HashMap<&'a str, HashSet<K>> = HashMap::new();
    for record in records {
        seen.entry(record.actor()).or_default().insert(field(record));
    }
    seen.into_iter()
        .map(|(actor, values)| (actor.to_owned(), values.len()))
        .collect()
}

/// 레코드 수가 많은 행위자 상위 `n`개를 반환합니다.
///
/// 개수 내림차순, 같으면 행위자 오름차순입니다.
pub fn top_actors<R: ActorRecord>(records: &[R], n: usize) -> Vec<ActorCount> {
    let mut totals: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *totals.entry(record.actor()).or_insert(0) += 1;
    }

    let mut ranked: Vec<ActorCount> = totals
        .into_iter()
        .map(|(actor, count)| ActorCount {
            actor: actor.to_owned(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.actor.cmp(&b.actor)));
    ranked.truncate(n);
    ranked
}
