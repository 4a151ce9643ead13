#![no_main]

use arbitrary::Arbitrary;
use chrono::{DateTime, TimeDelta};
use libfuzzer_sys::fuzz_target;

use logwarden_analyzer::{Blacklist, RuleSet};
use logwarden_core::types::{AlertCategory, SshFailureEvent, WebAccessEvent};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    /// (행위자 번호, 초 오프셋, URL 번호) 목록
    hits: Vec<(u8, u32, u8)>,
    /// 블랙리스트에 넣을 행위자 번호
    listed: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let Some(base) = DateTime::from_timestamp(1_704_844_800, 0) else {
        return;
    };
    let base = base.naive_utc();

    let hits = input.hits.iter().take(4096);
    let web: Vec<WebAccessEvent> = hits
        .clone()
        .map(|&(actor, offset, url)| WebAccessEvent {
            actor: format!("10.0.0.{actor}"),
            timestamp: Some(base + TimeDelta::seconds(i64::from(offset % 86_400))),
            method: "GET".to_owned(),
            url: format!("/p/{url}"),
            protocol: "HTTP/1.1".to_owned(),
            status: 200,
            size: 0,
        })
        .collect();
    let auth: Vec<SshFailureEvent> = hits
        .map(|&(actor, offset, _)| SshFailureEvent {
            actor: format!("10.0.0.{actor}"),
            timestamp: Some(base + TimeDelta::seconds(i64::from(offset % 86_400))),
            user: "root".to_owned(),
            host: "fuzz".to_owned(),
            raw_line: String::new(),
        })
        .collect();

    let blacklist: Blacklist = input
        .listed
        .iter()
        .map(|actor| format!("10.0.0.{actor}"))
        .collect();

    let rules = RuleSet::default();
    let mut alerts = rules.evaluate_auth(&auth);
    alerts.extend(rules.evaluate_web(&web));
    let alerts = blacklist.annotate(alerts);

    for alert in &alerts {
        assert_eq!(alert.blacklisted, blacklist.contains(&alert.ip));
        if alert.category == AlertCategory::WebScanning {
            assert!(alert.time.is_none());
        }
    }
});
