//! jsonlax is a tolerant JSON parser for hand-edited documents.
//!
//! The parser accepts standard JSON plus the conveniences people type into
//! configuration files: C/C++ comments, mixed-case literals, trailing
//! commas, wrong or missing closing brackets, multi-line string
//! concatenation, and single-quoted hex byte buffers. Each extension is
//! gated by a [`ParseFlags`] bit; with the bit set its use is reported as
//! a warning, without it as an error. Parsing never aborts on an error:
//! diagnostics accumulate with line and column positions while the parser
//! recovers and keeps building the tree.
//!
//! ```
//! use jsonlax::{from_str, ParseFlags};
//!
//! let doc = r#"
//! // service configuration
//! {
//!     "name": "demo",     // knows no other
//!     "retries": 3,
//! }
//! "#;
//! let root = from_str(doc, ParseFlags::TOLERANT).unwrap();
//! assert_eq!(root.get("retries").and_then(|v| v.as_i64()), Some(3));
//! ```
//!
//! Comments can additionally be preserved on the value nodes they refer
//! to with [`ParseFlags::STORE_COMMENTS`], and the strict RFC subset is
//! available as [`ParseFlags::STRICT`].

pub mod decode;
pub mod error;
pub mod options;
pub mod value;

mod number;

#[cfg(feature = "serde")]
pub mod de;

pub use crate::decode::{from_reader, from_str, Parser};
pub use crate::error::{Error, Result};
pub use crate::options::{ParseFlags, DEFAULT_MAX_ERRORS};
pub use crate::value::{Comment, CommentPos, Number, Value, ValueData};
