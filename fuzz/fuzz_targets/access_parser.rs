#![no_main]

use libfuzzer_sys::fuzz_target;
use logwarden_analyzer::parser::{AccessLogParser, parse_text};
use logwarden_core::pipeline::LineParser;

fuzz_target!(|data: &[u8]| {
    let Ok(parser) = AccessLogParser::new() else {
        return;
    };
    let text = String::from_utf8_lossy(data);

    let parsed = parse_text(&parser, &text);
    assert_eq!(
        parsed.records.len() + parsed.lines_skipped,
        parsed.lines_total
    );

    for line in text.lines() {
        if let Some(event) = parser.parse_line(line) {
            assert!(!event.actor.is_empty());
            assert!(event.status <= 999);
        }
    }
});
