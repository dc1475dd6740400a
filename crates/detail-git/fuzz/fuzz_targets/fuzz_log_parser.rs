#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = detail_git::parse_commit_log(text);
        let _ = detail_git::parse_note_log(text);
        let _ = detail_git::parse_date(text);
    }
});
