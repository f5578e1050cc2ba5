//! Front matter split, parse and stringify for static-site documents.
//!
//! ```
//! use fencepost_core::{parse, stringify};
//!
//! let mut doc = parse("title: Hello\n---\nBody");
//! doc.insert("draft", true);
//! let text = stringify(&doc).unwrap();
//! assert_eq!(text, "title: Hello\ndraft: true\n---\nBody");
//! ```

pub mod config;
pub mod frontmatter;

pub use frontmatter::{
    FrontMatter, Mode, ParseOptions, SerializeError, SplitResult, StringifyOptions, Value,
    parse, parse_with, split, stringify, stringify_with,
};
