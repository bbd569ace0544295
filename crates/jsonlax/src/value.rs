//! The dynamically typed value tree populated by the parser.

/// Narrowest-fit numeric payload.
///
/// The parser picks the variant through the signed -> unsigned -> double
/// coercion ladder, so `42` lands in `I64`, `+42` and anything above
/// `i64::MAX` in `U64`, and everything else in `F64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

/// Where a stored comment sits relative to the value it is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentPos {
    Before,
    Inline,
    After,
}

/// A comment bound to a value node, text kept verbatim including the
/// `//` or `/* */` markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub pos: CommentPos,
}

/// The payload of a [`Value`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ValueData {
    /// No payload yet. A node of this kind reports `is_valid() == false`.
    #[default]
    Invalid,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Raw bytes from the single-quoted memory-buffer extension.
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    /// Members keep insertion order; keys are unique.
    Object(Vec<(String, Value)>),
}

/// A JSON value plus the annotations the tolerant parser collects for it:
/// the source line it came from and any comments bound to it.
///
/// Equality compares payloads only, so a parsed tree compares naturally
/// against a constructed one regardless of line numbers or comments.
#[derive(Debug, Clone, Default)]
pub struct Value {
    data: ValueData,
    line: Option<u32>,
    comments: Vec<Comment>,
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Value {
    /// A fresh node with no payload (`is_valid() == false`).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &ValueData {
        &self.data
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self.data, ValueData::Invalid)
    }

    pub fn is_null(&self) -> bool {
        matches!(self.data, ValueData::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self.data, ValueData::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self.data, ValueData::Number(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self.data, ValueData::Number(Number::I64(_)))
    }

    pub fn is_uint(&self) -> bool {
        matches!(self.data, ValueData::Number(Number::U64(_)))
    }

    pub fn is_double(&self) -> bool {
        matches!(self.data, ValueData::Number(Number::F64(_)))
    }

    pub fn is_string(&self) -> bool {
        matches!(self.data, ValueData::String(_))
    }

    pub fn is_bytes(&self) -> bool {
        matches!(self.data, ValueData::Bytes(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.data, ValueData::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self.data, ValueData::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.data {
            ValueData::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.data {
            ValueData::Number(Number::I64(i)) => Some(i),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self.data {
            ValueData::Number(Number::U64(u)) => Some(u),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.data {
            ValueData::Number(Number::F64(d)) => Some(d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.data {
            ValueData::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.data {
            ValueData::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match &self.data {
            ValueData::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, Value)]> {
        match &self.data {
            ValueData::Object(m) => Some(m),
            _ => None,
        }
    }

    /// Member lookup by key. `None` for non-objects and missing keys.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match &self.data {
            ValueData::Object(m) => m.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Element lookup by index. `None` for non-arrays and out-of-range.
    pub fn at(&self, index: usize) -> Option<&Value> {
        match &self.data {
            ValueData::Array(a) => a.get(index),
            _ => None,
        }
    }

    /// Number of members or elements; 0 for scalars.
    pub fn size(&self) -> usize {
        match &self.data {
            ValueData::Array(a) => a.len(),
            ValueData::Object(m) => m.len(),
            _ => 0,
        }
    }

    /// 1-based source line the parser recorded for this node, if any.
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    pub fn set_line(&mut self, line: Option<u32>) {
        self.line = line;
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn add_comment(&mut self, text: impl Into<String>, pos: CommentPos) {
        self.comments.push(Comment {
            text: text.into(),
            pos,
        });
    }

    /// Replace the payload, keeping line number and comments in place.
    pub fn assign(&mut self, data: ValueData) {
        self.data = data;
    }

    /// Coerce to an empty object. A node that already is an object keeps
    /// its members, so parsing into an existing tree appends to it.
    pub fn set_object(&mut self) {
        if !self.is_object() {
            self.data = ValueData::Object(Vec::new());
        }
    }

    /// Coerce to an empty array; an existing array keeps its elements.
    pub fn set_array(&mut self) {
        if !self.is_array() {
            self.data = ValueData::Array(Vec::new());
        }
    }

    /// Insert or replace a member; coerces non-objects to an empty object
    /// first. Returns the member index.
    pub fn insert_member(&mut self, key: String, value: Value) -> usize {
        self.set_object();
        let ValueData::Object(members) = &mut self.data else {
            unreachable!();
        };
        match members.iter().position(|(k, _)| *k == key) {
            Some(idx) => {
                members[idx].1 = value;
                idx
            }
            None => {
                members.push((key, value));
                members.len() - 1
            }
        }
    }

    /// Append an element; coerces non-arrays to an empty array first.
    /// Returns the element index.
    pub fn push_item(&mut self, value: Value) -> usize {
        self.set_array();
        let ValueData::Array(items) = &mut self.data else {
            unreachable!();
        };
        items.push(value);
        items.len() - 1
    }

    /// Mutable access to the idx-th child of a container.
    pub(crate) fn child_at_mut(&mut self, idx: usize) -> Option<&mut Value> {
        match &mut self.data {
            ValueData::Array(a) => a.get_mut(idx),
            ValueData::Object(m) => m.get_mut(idx).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Append to an existing string payload; used for multi-line joins.
    pub(crate) fn concat_str(&mut self, tail: &str) {
        if let ValueData::String(s) = &mut self.data {
            s.push_str(tail);
        }
    }

    /// Append to an existing byte-buffer payload.
    pub(crate) fn concat_bytes(&mut self, tail: &[u8]) {
        if let ValueData::Bytes(b) = &mut self.data {
            b.extend_from_slice(tail);
        }
    }

    /// Move a string payload out, leaving the node invalid. Comments and
    /// line number stay behind so a comment bound ahead of a key ends up
    /// on the member value.
    pub(crate) fn take_string(&mut self) -> Option<String> {
        if let ValueData::String(s) = &mut self.data {
            let s = std::mem::take(s);
            self.data = ValueData::Invalid;
            Some(s)
        } else {
            None
        }
    }

    /// Lossy conversion to a `serde_json::Value`: invalid nodes become
    /// null, byte buffers become arrays of integers, non-finite doubles
    /// become their string form.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Value {
        match &self.data {
            ValueData::Invalid | ValueData::Null => serde_json::Value::Null,
            ValueData::Bool(b) => (*b).into(),
            ValueData::Number(Number::I64(i)) => (*i).into(),
            ValueData::Number(Number::U64(u)) => (*u).into(),
            ValueData::Number(Number::F64(d)) => serde_json::Number::from_f64(*d)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(d.to_string())),
            ValueData::String(s) => s.clone().into(),
            ValueData::Bytes(b) => {
                serde_json::Value::Array(b.iter().map(|&x| x.into()).collect())
            }
            ValueData::Array(a) => {
                serde_json::Value::Array(a.iter().map(Value::to_json).collect())
            }
            ValueData::Object(m) => {
                let mut map = serde_json::Map::new();
                for (k, v) in m {
                    map.insert(k.clone(), v.to_json());
                }
                serde_json::Value::Object(map)
            }
        }
    }
}
