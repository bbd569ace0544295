//! Tolerant JSON decoding.

pub mod parser;
mod source;

pub use parser::Parser;

use std::io::Read;

use crate::error::{Error, Result};
use crate::options::ParseFlags;
use crate::value::Value;

/// Parse `text`, failing with the first recorded error.
///
/// For access to the full diagnostic lists, warnings, or the partially
/// recovered tree of a failed document, drive a [`Parser`] directly.
pub fn from_str(text: &str, flags: ParseFlags) -> Result<Value> {
    let mut parser = Parser::new(flags);
    let mut root = Value::new();
    parser.parse_str(text, &mut root);
    finish(&parser, root)
}

/// Parse a byte stream, failing with the first recorded error.
pub fn from_reader<R: Read>(reader: R, flags: ParseFlags) -> Result<Value> {
    let mut parser = Parser::new(flags);
    let mut root = Value::new();
    parser.parse(reader, &mut root);
    finish(&parser, root)
}

fn finish(parser: &Parser, root: Value) -> Result<Value> {
    match parser.first_error() {
        Some((line, col, message)) => Err(Error::Syntax { line, col, message }),
        None => Ok(root),
    }
}
