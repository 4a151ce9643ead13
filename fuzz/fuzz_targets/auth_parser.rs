#![no_main]

use libfuzzer_sys::fuzz_target;
use logwarden_analyzer::parser::AuthLogParser;
use logwarden_core::pipeline::LineParser;

fuzz_target!(|data: &[u8]| {
    let Ok(parser) = AuthLogParser::with_year(2024) else {
        return;
    };
    let text = String::from_utf8_lossy(data);

    for line in text.lines() {
        if let Some(event) = parser.parse_line(line) {
            // 실패 로그인 라인에서만 레코드가 나옴
            assert!(line.contains("Failed password for"));
            assert_eq!(event.actor.split('.').count(), 4);
        }
    }
});
