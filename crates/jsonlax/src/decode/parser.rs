//! The tolerant recursive-descent parser.
//!
//! The parser reads single UTF-8 code units from a [`ByteSource`], folds
//! CR/CRLF for line accounting, and assembles a [`Value`] tree while
//! accumulating formatted diagnostics instead of bailing out. Extensions
//! (comments, mixed-case literals, sloppy brackets, multi-line strings,
//! single-quoted byte buffers) are reported as warnings when the matching
//! [`ParseFlags`] bit is set and as errors otherwise.

use std::io::Read;
use std::mem;

use log::trace;

use crate::decode::source::ByteSource;
use crate::number;
use crate::options::{ParseFlags, DEFAULT_MAX_ERRORS};
use crate::value::{CommentPos, Value, ValueData};

const EOF: i32 = -1;

/// Which node a comment-binder slot refers to within the running frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    None,
    /// The frame's scratch value: read but not yet committed.
    Scratch,
    /// The container owned by the frame.
    Parent,
}

/// Frame-local state for the three-slot comment binder.
struct Slots {
    current: Slot,
    next: Slot,
    /// Index of the most recently committed child inside the parent.
    last_stored: Option<usize>,
}

/// The three binder slots resolved to nodes, for one attachment decision.
struct CommentTargets<'a> {
    current: Option<&'a mut Value>,
    current_is_parent: bool,
    next: Option<&'a mut Value>,
    last_stored: Option<&'a mut Value>,
}

/// A tolerant JSON parser.
///
/// One instance can parse many documents in sequence (all transient state
/// resets on entry) but must not be shared between parses in flight.
///
/// # Examples
///
/// ```
/// use jsonlax::{ParseFlags, Parser, Value};
///
/// let mut parser = Parser::new(ParseFlags::TOLERANT);
/// let mut root = Value::new();
/// let errors = parser.parse_str("{ \"answer\": 42, // sure\n}", &mut root);
/// assert_eq!(errors, 0);
/// assert_eq!(parser.warning_count(), 1); // the comment extension
/// assert_eq!(root.get("answer").and_then(|v| v.as_i64()), Some(42));
/// ```
pub struct Parser {
    flags: ParseFlags,
    max_errors: usize,
    line: u32,
    col: u32,
    level: u32,
    depth: u32,
    errors: Vec<String>,
    warnings: Vec<String>,
    first_error: Option<(u32, u32, String)>,
    comment: Option<String>,
    comment_line: u32,
}

impl Parser {
    pub fn new(flags: ParseFlags) -> Self {
        Self::with_max_errors(flags, DEFAULT_MAX_ERRORS)
    }

    /// Like [`Parser::new`] with an explicit cap on reported errors and
    /// warnings. Once a sequence reaches the cap one sentinel entry is
    /// appended and further diagnostics of that class are dropped.
    pub fn with_max_errors(flags: ParseFlags, max_errors: usize) -> Self {
        Self {
            flags,
            max_errors,
            line: 1,
            col: 1,
            level: 0,
            depth: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
            first_error: None,
            comment: None,
            comment_line: 0,
        }
    }

    /// Parse a byte stream into `root`, returning the number of errors.
    ///
    /// `root` is coerced to the document's container kind. If it already
    /// holds a container of the same kind the parsed children are appended
    /// to the existing ones.
    ///
    /// Text before the first `{` / `[` and after the matching closer is
    /// ignored. When no start character exists at all the root is left
    /// invalid and a single error is recorded.
    pub fn parse<R: Read>(&mut self, reader: R, root: &mut Value) -> usize {
        self.reset();
        trace!("parse: flags={:?} max_errors={}", self.flags, self.max_errors);

        let mut src = ByteSource::new(reader);
        root.set_line(None);

        let ch = self.get_start(&mut src, root);
        match ch {
            c if c == i32::from(b'{') => root.set_object(),
            c if c == i32::from(b'[') => root.set_array(),
            _ => {
                self.add_error("Cannot find a start object/array character");
                return self.errors.len();
            }
        }

        self.do_read(&mut src, root);
        self.errors.len()
    }

    /// Parse a host string; the text is fed to [`Parser::parse`] as UTF-8
    /// bytes.
    pub fn parse_str(&mut self, text: &str, root: &mut Value) -> usize {
        self.parse(text.as_bytes(), root)
    }

    /// Syntax-check mode: parse into a throwaway root and return the error
    /// count.
    pub fn check<R: Read>(&mut self, reader: R) -> usize {
        let mut scratch = Value::new();
        self.parse(reader, &mut scratch)
    }

    /// Formatted error diagnostics, in discovery order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Formatted warning diagnostics, in discovery order.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Peak container nesting observed by the last parse.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub(crate) fn first_error(&self) -> Option<(u32, u32, String)> {
        self.first_error.clone()
    }

    fn reset(&mut self) {
        self.line = 1;
        self.col = 1;
        self.level = 0;
        self.depth = 0;
        self.errors.clear();
        self.warnings.clear();
        self.first_error = None;
        self.comment = None;
        self.comment_line = 0;
    }

    /// Next code unit, or -1 on EOF. CRLF folds to a single LF; a lone CR
    /// is returned verbatim but still counts as one line break.
    fn read_char<R: Read>(&mut self, src: &mut ByteSource<R>) -> i32 {
        let mut ch = src.next_byte();
        if ch < 0 {
            return EOF;
        }
        if ch == i32::from(b'\r') {
            if src.peek_byte() == i32::from(b'\n') {
                ch = src.next_byte();
            } else {
                self.line += 1;
                self.col = 1;
                return i32::from(b'\r');
            }
        }
        if ch == i32::from(b'\n') {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        ch
    }

    fn peek_char<R: Read>(&mut self, src: &mut ByteSource<R>) -> i32 {
        src.peek_byte()
    }

    fn add_error(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        if self.first_error.is_none() {
            self.first_error = Some((self.line, self.col, msg.clone()));
        }
        let formatted = format!("Error: line {}, col {} - {}", self.line, self.col, msg);
        trace!("{formatted}");
        if self.errors.len() < self.max_errors {
            self.errors.push(formatted);
        } else if self.errors.len() == self.max_errors {
            self.errors
                .push("ERROR: too many error messages - ignoring further errors".into());
        }
    }

    /// Record a warning keyed by the flag that authorizes it. When the
    /// flag is off the warning becomes an error; an empty gate is always a
    /// plain warning.
    fn add_warning(&mut self, gate: ParseFlags, msg: &str) {
        if gate != ParseFlags::empty() && !self.flags.contains(gate) {
            self.add_error(msg);
            return;
        }
        let formatted = format!("Warning: line {}, col {} - {}", self.line, self.col, msg);
        trace!("{formatted}");
        if self.warnings.len() < self.max_errors {
            self.warnings.push(formatted);
        } else if self.warnings.len() == self.max_errors {
            self.warnings
                .push("Error: too many warning messages - ignoring further warnings".into());
        }
    }

    /// Scan for the root's `{` or `[`, discarding everything else.
    /// Comments found here may still be bound BEFORE the root value.
    fn get_start<R: Read>(&mut self, src: &mut ByteSource<R>, root: &mut Value) -> i32 {
        let mut ch: i32 = 0;
        loop {
            match ch {
                0 => ch = self.read_char(src),
                EOF => return EOF,
                c if c == i32::from(b'{') || c == i32::from(b'[') => return c,
                c if c == i32::from(b'/') => {
                    ch = self.skip_comment(src);
                    self.attach_comment(CommentTargets {
                        current: None,
                        current_is_parent: false,
                        next: Some(root),
                        last_stored: None,
                    });
                }
                _ => ch = self.read_char(src),
            }
        }
    }

    /// Consume space, TAB, LF and CR; return the first other code unit.
    fn skip_whitespace<R: Read>(&mut self, src: &mut ByteSource<R>) -> i32 {
        loop {
            let ch = self.read_char(src);
            if ch < 0 || !matches!(ch as u8, b' ' | b'\t' | b'\n' | b'\r') {
                return ch;
            }
        }
    }

    /// Called with the opening `/` already consumed. Buffers the comment
    /// text (markers included) for the binder and returns the next code
    /// unit after the comment.
    fn skip_comment<R: Read>(&mut self, src: &mut ByteSource<R>) -> i32 {
        const NOT_JSON: &str =
            "Comments may be tolerated in JSON text but they are not part of JSON syntax";

        let mut ch = self.read_char(src);
        if ch < 0 {
            return EOF;
        }

        if ch == i32::from(b'/') {
            self.add_warning(ParseFlags::ALLOW_COMMENTS, NOT_JSON);
            let start_line = self.line;
            let mut buf: Vec<u8> = b"//".to_vec();
            loop {
                ch = self.read_char(src);
                if ch < 0 || ch == i32::from(b'\n') || ch == i32::from(b'\r') {
                    break;
                }
                buf.push(ch as u8);
            }
            self.set_pending_comment(buf, start_line);
        } else if ch == i32::from(b'*') {
            self.add_warning(ParseFlags::ALLOW_COMMENTS, NOT_JSON);
            let start_line = self.line;
            let mut buf: Vec<u8> = b"/*".to_vec();
            loop {
                ch = self.read_char(src);
                if ch < 0 {
                    break;
                }
                if ch == i32::from(b'*') && self.peek_char(src) == i32::from(b'/') {
                    self.read_char(src);
                    buf.extend_from_slice(b"*/");
                    ch = self.read_char(src);
                    break;
                }
                buf.push(ch as u8);
            }
            self.set_pending_comment(buf, start_line);
        } else {
            // not a comment after all; swallow to a closer or end of line
            self.add_error("Strange '/' (did you want to insert a comment?)");
            loop {
                ch = self.read_char(src);
                if ch < 0 || ch == i32::from(b'\n') {
                    break;
                }
                if ch == i32::from(b'*') && self.peek_char(src) == i32::from(b'/') {
                    self.read_char(src);
                    break;
                }
            }
            if ch >= 0 {
                ch = self.read_char(src);
            }
        }
        ch
    }

    fn set_pending_comment(&mut self, buf: Vec<u8>, line: u32) {
        self.comment = Some(String::from_utf8_lossy(&buf).into_owned());
        self.comment_line = line;
    }

    /// One frame of container descent. `parent` has already been set to an
    /// object or array; the frame owns a scratch value and a key and
    /// dispatches on single code units until the matching closer or EOF.
    ///
    /// Returns the code unit read after `}`, 0 after `]` (the caller reads
    /// next), or -1 at EOF.
    fn do_read<R: Read>(&mut self, src: &mut ByteSource<R>, parent: &mut Value) -> i32 {
        self.level += 1;
        if self.depth < self.level {
            self.depth = self.level;
        }
        trace!("do_read: enter level={}", self.level);

        let mut value = Value::new();
        let mut key = String::new();
        let mut slots = Slots {
            current: Slot::Parent,
            next: Slot::Scratch,
            last_stored: None,
        };
        parent.set_line(Some(self.line));

        let mut ch: i32 = 0;
        while ch >= 0 {
            if ch == 0 {
                ch = self.read_char(src);
                continue;
            }
            match ch as u8 {
                b' ' | b'\t' | b'\n' | b'\r' => {
                    ch = self.skip_whitespace(src);
                }
                b'/' => {
                    ch = self.skip_comment(src);
                    let targets = resolve_targets(&mut value, parent, &slots);
                    self.attach_comment(targets);
                }
                b'{' => {
                    if parent.is_object() {
                        if key.is_empty() {
                            self.add_error("'{' is not allowed here ('name' is missing)");
                        }
                        if value.is_valid() {
                            self.add_error("'{' cannot follow a 'value'");
                        }
                    } else if value.is_valid() {
                        self.add_error("'{' cannot follow a 'value' in JSON array");
                    }
                    value.set_object();
                    ch = self.do_read(src, &mut value);
                    slots = Slots {
                        current: Slot::Scratch,
                        next: Slot::None,
                        last_stored: None,
                    };
                }
                b'[' => {
                    if parent.is_object() {
                        if key.is_empty() {
                            self.add_error("'[' is not allowed here ('name' is missing)");
                        }
                        if value.is_valid() {
                            self.add_error("'[' cannot follow a 'value'");
                        }
                    } else if value.is_valid() {
                        self.add_error("'[' cannot follow a 'value' in JSON array");
                    }
                    value.set_array();
                    ch = self.do_read(src, &mut value);
                    slots = Slots {
                        current: Slot::Scratch,
                        next: Slot::None,
                        last_stored: None,
                    };
                }
                b'}' => {
                    if !parent.is_object() {
                        self.add_warning(
                            ParseFlags::MISSING,
                            "Trying to close an array using the '}' (close-object) char",
                        );
                    }
                    self.store_value(ch, &key, &mut value, parent, &mut slots);
                    parent.set_line(Some(self.line));
                    self.level -= 1;
                    return self.read_char(src);
                }
                b']' => {
                    if !parent.is_array() {
                        self.add_warning(
                            ParseFlags::MISSING,
                            "Trying to close an object using the ']' (close-array) char",
                        );
                    }
                    self.store_value(ch, &key, &mut value, parent, &mut slots);
                    parent.set_line(Some(self.line));
                    self.level -= 1;
                    return 0;
                }
                b',' => {
                    self.store_value(ch, &key, &mut value, parent, &mut slots);
                    key.clear();
                    ch = self.read_char(src);
                }
                b'"' => {
                    ch = self.read_string(src, &mut value);
                    slots.current = Slot::Scratch;
                    slots.next = Slot::None;
                }
                b'\'' => {
                    ch = self.read_memory_buff(src, &mut value);
                    slots.current = Slot::Scratch;
                    slots.next = Slot::None;
                }
                b':' => {
                    slots.current = Slot::Scratch;
                    slots.next = Slot::None;
                    value.set_line(Some(self.line));
                    if !parent.is_object() {
                        self.add_error("':' can only be used in object's values");
                    } else if !value.is_string() {
                        self.add_error("':' follows a value which is not of type 'string'");
                    } else if !key.is_empty() {
                        self.add_error("':' not allowed where a 'name' string was already available");
                    } else {
                        key = value.take_string().unwrap_or_default();
                    }
                    ch = self.read_char(src);
                }
                _ => {
                    slots.current = Slot::Scratch;
                    slots.next = Slot::None;
                    value.set_line(Some(self.line));
                    ch = self.read_value(src, ch, &mut value);
                }
            }
        }

        // EOF: close whatever is open and warn about the missing bracket.
        if parent.is_array() {
            self.add_warning(ParseFlags::MISSING, "']' missing at end of file");
        } else if parent.is_object() {
            self.add_warning(ParseFlags::MISSING, "'}' missing at end of file");
        } else {
            debug_assert!(false, "do_read entered without a container parent");
        }
        self.store_value(ch, &key, &mut value, parent, &mut slots);
        self.level -= 1;
        ch
    }

    /// Commit the frame's scratch value into its parent. Called at every
    /// `,` and at every closer (including EOF). An empty scratch at a
    /// closer is legal: it covers empty containers and a trailing comma
    /// before the closer.
    fn store_value(
        &mut self,
        ch: i32,
        key: &str,
        value: &mut Value,
        parent: &mut Value,
        slots: &mut Slots,
    ) {
        slots.current = Slot::None;
        slots.next = Slot::Scratch;
        slots.last_stored = None;

        if !value.is_valid() && key.is_empty() {
            if ch != i32::from(b'}') && ch != i32::from(b']') {
                self.add_error("key or value is missing for JSON value");
            }
            *value = Value::new();
            return;
        }

        if parent.is_object() {
            if !value.is_valid() {
                self.add_error("cannot store the value: 'value' is missing for JSON object type");
            } else if key.is_empty() {
                self.add_error("cannot store the value: 'key' is missing for JSON object type");
            } else {
                trace!("store_value: object member {key:?}");
                let idx = parent.insert_member(key.to_owned(), mem::take(value));
                slots.last_stored = Some(idx);
                if let Some(child) = parent.child_at_mut(idx) {
                    child.set_line(Some(self.line));
                }
            }
        } else if parent.is_array() {
            if !value.is_valid() {
                self.add_error("cannot store the item: 'value' is missing for JSON array type");
            }
            if !key.is_empty() {
                self.add_error(format!(
                    "cannot store the item: 'key' ('{key}') is not permitted in JSON array type"
                ));
            }
            trace!("store_value: array item {}", parent.size());
            let idx = parent.push_item(mem::take(value));
            slots.last_stored = Some(idx);
            if let Some(child) = parent.child_at_mut(idx) {
                child.set_line(Some(self.line));
            }
        } else {
            debug_assert!(false, "store_value: parent is not a container");
        }

        // the scratch value starts over; comments moved with the commit
        *value = Value::new();
    }

    /// Bind the pending comment to one of the three tracked slots.
    ///
    /// A comment on the same line as any tracked value is inline to that
    /// value regardless of the BEFORE/AFTER policy; otherwise the policy
    /// flag picks the target.
    fn attach_comment(&mut self, targets: CommentTargets<'_>) {
        let Some(text) = self.comment.take() else {
            return;
        };
        if !self.flags.contains(ParseFlags::STORE_COMMENTS) {
            return;
        }
        let CommentTargets {
            mut current,
            current_is_parent,
            mut next,
            mut last_stored,
        } = targets;
        let line = self.comment_line;
        trace!("attach_comment: line={line} text={text:?}");

        if let Some(v) = current.as_deref_mut() {
            if v.line() == Some(line) {
                v.add_comment(text, CommentPos::Inline);
                return;
            }
        }
        if let Some(v) = next.as_deref_mut() {
            if v.line() == Some(line) {
                v.add_comment(text, CommentPos::Inline);
                return;
            }
        }
        if let Some(v) = last_stored.as_deref_mut() {
            if v.line() == Some(line) {
                v.add_comment(text, CommentPos::Inline);
                return;
            }
        }

        if self.flags.contains(ParseFlags::COMMENTS_AFTER) {
            if let Some(v) = current {
                if current_is_parent || !v.is_valid() {
                    self.add_error("Cannot find a value for storing the comment (flag AFTER)");
                } else {
                    v.add_comment(text, CommentPos::After);
                }
            } else if let Some(v) = last_stored {
                v.add_comment(text, CommentPos::After);
            } else {
                self.add_error("Cannot find a value for storing the comment (flag AFTER)");
            }
        } else if let Some(v) = next {
            v.add_comment(text, CommentPos::Before);
        } else {
            self.add_error("Cannot find a value for storing the comment (flag BEFORE)");
        }
    }

    /// Read a double-quoted string into `val`. Escapes and `\uXXXX`
    /// sequences expand into a byte buffer that is UTF-8 decoded after the
    /// closing quote. Returns the code unit after the closing quote.
    fn read_string<R: Read>(&mut self, src: &mut ByteSource<R>, val: &mut Value) -> i32 {
        let mut buf: Vec<u8> = Vec::new();
        let mut ch;
        loop {
            ch = self.read_char(src);
            if ch < 0 {
                break;
            }
            if ch == i32::from(b'\\') {
                ch = self.read_char(src);
                if ch < 0 {
                    break;
                }
                match ch as u8 {
                    b't' => buf.push(b'\t'),
                    b'n' => buf.push(b'\n'),
                    b'b' => buf.push(0x08),
                    b'r' => buf.push(b'\r'),
                    b'"' => buf.push(b'"'),
                    b'\\' => buf.push(b'\\'),
                    b'/' => buf.push(b'/'),
                    b'f' => buf.push(0x0C),
                    b'u' => {
                        let mut ues = [0u8; 4];
                        if self.read_ues(src, &mut ues) < 0 {
                            return EOF;
                        }
                        self.append_ues(&mut buf, &ues);
                    }
                    other => {
                        self.add_error(format!(
                            "Unknown escaped character '\\{}'",
                            char::from(other)
                        ));
                    }
                }
            } else if ch == i32::from(b'"') {
                break;
            } else {
                buf.push(ch as u8);
            }
        }

        let s = if self.flags.contains(ParseFlags::NOUTF8_STREAM) {
            // legacy path: bytes taken 1:1, no UTF-8 validation
            buf.iter().map(|&b| char::from(b)).collect()
        } else {
            match String::from_utf8(buf) {
                Ok(s) => s,
                Err(_) => {
                    self.add_error("String value: the UTF-8 stream is invalid");
                    String::from("<UTF-8 stream not valid>")
                }
            }
        };

        if !val.is_valid() {
            val.assign(ValueData::String(s));
        } else if val.is_string() {
            self.add_warning(
                ParseFlags::MULTISTRING,
                "Multiline strings are not allowed by JSON syntax",
            );
            val.concat_str(&s);
        } else {
            self.add_error(format!("String value '{s}' cannot follow another value"));
        }
        val.set_line(Some(self.line));

        if ch >= 0 {
            ch = self.read_char(src);
        }
        ch
    }

    /// Read the four hex digits of a `\uXXXX` sequence. Returns 0, or -1
    /// on EOF before all four digits arrived.
    fn read_ues<R: Read>(&mut self, src: &mut ByteSource<R>, ues: &mut [u8; 4]) -> i32 {
        for slot in ues.iter_mut() {
            let ch = self.read_char(src);
            if ch < 0 {
                return ch;
            }
            *slot = ch as u8;
        }
        0
    }

    /// Decode four hex digits and append the code unit to the UTF-8
    /// buffer. Surrogate halves come through unpaired; their bytes then
    /// fail UTF-8 validation when the string ends.
    fn append_ues(&mut self, buf: &mut Vec<u8>, ues: &[u8; 4]) {
        if !ues.iter().all(u8::is_ascii_hexdigit) {
            self.add_error("Invalid Unicode Escaped Sequence");
            return;
        }
        let hex = std::str::from_utf8(ues).expect("hex digits are ASCII");
        let code = u32::from_str_radix(hex, 16).expect("validated hex digits");
        if code < 0x80 {
            buf.push(code as u8);
        } else if code < 0x800 {
            buf.push(0xC0 | (code >> 6) as u8);
            buf.push(0x80 | (code & 0x3F) as u8);
        } else {
            buf.push(0xE0 | (code >> 12) as u8);
            buf.push(0x80 | ((code >> 6) & 0x3F) as u8);
            buf.push(0x80 | (code & 0x3F) as u8);
        }
    }

    /// Read a single-quoted hex byte buffer into `val`. Byte pairs may be
    /// separated by whitespace; an odd trailing digit before the closing
    /// quote is dropped. Returns the code unit after the closing quote.
    fn read_memory_buff<R: Read>(&mut self, src: &mut ByteSource<R>, val: &mut Value) -> i32 {
        self.add_warning(
            ParseFlags::MEMORYBUFF,
            "the 'memory buffer' type is not valid JSON text",
        );

        let mut buff: Vec<u8> = Vec::new();
        let mut invalid = 0usize;
        let mut ch;
        loop {
            ch = self.read_char(src);
            while ch >= 0 && matches!(ch as u8, b' ' | b'\t' | b'\n' | b'\r') {
                ch = self.read_char(src);
            }
            if ch < 0 || ch == i32::from(b'\'') {
                break;
            }
            let c1 = ch as u8;
            ch = self.read_char(src);
            if ch < 0 {
                break;
            }
            if ch == i32::from(b'\'') {
                // odd trailing digit: dropped
                break;
            }
            let c2 = ch as u8;
            match (hex_nibble(c1), hex_nibble(c2)) {
                (Some(hi), Some(lo)) => buff.push(hi * 16 + lo),
                _ => invalid += 1,
            }
        }

        if invalid > 0 {
            self.add_error(format!(
                "the 'memory buffer' type contains {invalid} invalid digits"
            ));
        }

        if !val.is_valid() {
            val.assign(ValueData::Bytes(buff));
        } else if val.is_bytes() {
            val.concat_bytes(&buff);
        } else {
            self.add_error("Memory buffer value cannot follow another value");
        }
        val.set_line(Some(self.line));

        if ch >= 0 {
            ch = self.read_char(src);
        }
        ch
    }

    /// Accumulate an unquoted token starting at `first` until a delimiter.
    /// The delimiter is returned unprocessed for the frame loop.
    fn read_token<R: Read>(
        &mut self,
        src: &mut ByteSource<R>,
        first: i32,
        token: &mut String,
    ) -> i32 {
        let mut ch = first;
        while ch >= 0 {
            match ch as u8 {
                b' ' | b',' | b':' | b'[' | b']' | b'{' | b'}' | b'\t' | b'\n' | b'\r' | 0x08 => {
                    return ch;
                }
                c => token.push(char::from(c)),
            }
            ch = self.read_char(src);
        }
        ch
    }

    /// Classify an unquoted token as a literal or a number and store it
    /// into `val`. Returns the delimiter that ended the token.
    fn read_value<R: Read>(&mut self, src: &mut ByteSource<R>, first: i32, val: &mut Value) -> i32 {
        let mut token = String::new();
        let next_ch = self.read_token(src, first, &mut token);

        if val.is_valid() {
            self.add_error(format!(
                "Value '{token}' cannot follow a value: ',' or ':' missing?"
            ));
            return next_ch;
        }

        if token == "null" {
            val.assign(ValueData::Null);
            return next_ch;
        } else if token.eq_ignore_ascii_case("null") {
            self.add_warning(ParseFlags::CASE, "the 'null' literal must be lowercase");
            val.assign(ValueData::Null);
            return next_ch;
        } else if token == "true" {
            val.assign(ValueData::Bool(true));
            return next_ch;
        } else if token.eq_ignore_ascii_case("true") {
            self.add_warning(ParseFlags::CASE, "the 'true' literal must be lowercase");
            val.assign(ValueData::Bool(true));
            return next_ch;
        } else if token == "false" {
            val.assign(ValueData::Bool(false));
            return next_ch;
        } else if token.eq_ignore_ascii_case("false") {
            self.add_warning(ParseFlags::CASE, "the 'false' literal must be lowercase");
            val.assign(ValueData::Bool(false));
            return next_ch;
        }

        match number::decode_token(&token) {
            Some(n) => val.assign(ValueData::Number(n)),
            None => self.add_error(format!(
                "Literal '{token}' is incorrect (did you forget quotes?)"
            )),
        }
        next_ch
    }
}

/// Resolve the frame's slot tags into node references for one attachment.
///
/// The tag combinations the frame loop produces keep the borrows disjoint:
/// `last_stored` is only populated while `current` is not the parent.
fn resolve_targets<'a>(
    scratch: &'a mut Value,
    parent: &'a mut Value,
    slots: &Slots,
) -> CommentTargets<'a> {
    match slots.current {
        Slot::Parent => CommentTargets {
            current: Some(parent),
            current_is_parent: true,
            next: if slots.next == Slot::Scratch {
                Some(scratch)
            } else {
                None
            },
            last_stored: None,
        },
        Slot::Scratch => CommentTargets {
            current: Some(scratch),
            current_is_parent: false,
            next: None,
            last_stored: match slots.last_stored {
                Some(i) => parent.child_at_mut(i),
                None => None,
            },
        },
        Slot::None => CommentTargets {
            current: None,
            current_is_parent: false,
            next: if slots.next == Slot::Scratch {
                Some(scratch)
            } else {
                None
            },
            last_stored: match slots.last_stored {
                Some(i) => parent.child_at_mut(i),
                None => None,
            },
        },
    }
}

/// Hex digit arithmetic of the memory-buffer format: `0-9` and uppercase
/// `A-F` only; lowercase digits land above 15 and count as invalid.
fn hex_nibble(c: u8) -> Option<u8> {
    let v = c.wrapping_sub(b'0');
    let v = if v > 9 { v.wrapping_sub(7) } else { v };
    (v <= 15).then_some(v)
}
