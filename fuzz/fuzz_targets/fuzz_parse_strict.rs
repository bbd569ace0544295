#![no_main]
use jsonlax::{ParseFlags, Parser, Value};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut parser = Parser::new(ParseFlags::STRICT);
    let mut root = Value::new();
    let _ = parser.parse(data, &mut root);
});
