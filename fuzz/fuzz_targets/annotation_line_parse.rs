//! Fuzz target for single-line YOLO annotation parsing.
//!
//! Feeds arbitrary UTF-8 lines to the parser, checking for panics, crashes,
//! or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use yoloviz::ir::fuzz_parse_line;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    let _ = fuzz_parse_line(line);
});
