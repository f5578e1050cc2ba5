//! Front matter splitting, parsing, and serialization.
//!
//! This module provides functionality to:
//! - Split a metadata block from a document under either fence convention
//! - Parse YAML or JSON metadata, reading timestamps as local dates
//! - Serialize records back to documents with nulls and dates preserved

pub mod dates;
pub mod parser;
pub mod serializer;
pub mod splitter;
pub mod types;
pub mod value;

pub use dates::{TimezoneError, local_offset, parse_offset};
pub use parser::{escape_yaml, parse, parse_with};
pub use serializer::{SerializeError, stringify, stringify_with};
pub use splitter::split;
pub use types::{CONTENT_KEY, FrontMatter, Mode, ParseOptions, SplitResult, StringifyOptions};
pub use value::{Mapping, Value};
