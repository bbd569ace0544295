#![no_main]
use jsonlax::{ParseFlags, Parser, Value};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let flags = ParseFlags::TOLERANT
        | ParseFlags::STORE_COMMENTS
        | ParseFlags::COMMENTS_AFTER
        | ParseFlags::MEMORYBUFF;
    let mut parser = Parser::new(flags);
    let mut root = Value::new();
    let _ = parser.parse(data, &mut root);
});
