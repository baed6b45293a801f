//! quest_xml: codec between quest records and `QuestInfo` XML documents.
//!
//! The game engine consumes one `QuestInfo` document per quest. This crate maps
//! a [`QuestRecord`] onto that schema and back:
//!
//! - [`encode`] builds the document tree, [`render`] turns it into text;
//! - [`parse_document`] reads text into a tree, [`decode`] rebuilds the record.
//!
//! ```
//! use quest_data::{Condition, QuestRecord};
//!
//! let mut quest = QuestRecord::default();
//! quest.append_condition(Condition::new(1, 30, 0));
//!
//! let xml = quest_xml::encode_to_string(&quest).unwrap();
//! assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
//! assert!(xml.contains("<condition>1</condition>"));
//!
//! let back = quest_xml::decode_str(&xml).unwrap();
//! assert_eq!(back.conditions(), quest.conditions());
//! ```

mod codec;
pub mod files;
mod tree;

pub use codec::{decode, encode};
pub use tree::{Prolog, XmlElement, parse_document, render};

use quest_data::{QuestRecord, ValidationError};
use thiserror::Error;

/// Errors produced while encoding, parsing or rendering quest documents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A basic field's text is not an integer.
    #[error("invalid value for {field}: '{raw}' is not an integer")]
    InvalidFieldValue { field: String, raw: String },
    /// The input is not well-formed markup.
    #[error("malformed document: {0}")]
    MalformedDocument(String),
    /// The document could not be serialized.
    #[error("failed to write document: {0}")]
    Write(String),
}

impl From<ValidationError> for CodecError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidFieldValue { field, raw } => CodecError::InvalidFieldValue {
                field: field.name().to_string(),
                raw,
            },
        }
    }
}

/// Encode `record` as document text ready to be saved, prolog included.
pub fn encode_to_string(record: &QuestRecord) -> Result<String, CodecError> {
    render(&encode(record)?, Prolog::Include)
}

/// Encode `record` for on-screen preview, without the prolog.
pub fn preview(record: &QuestRecord) -> Result<String, CodecError> {
    render(&encode(record)?, Prolog::Omit)
}

/// Parse document text and decode it into a record.
pub fn decode_str(src: &str) -> Result<QuestRecord, CodecError> {
    Ok(decode(&parse_document(src)?))
}

/// Like [`decode_str`], for raw file contents. The bytes must be UTF-8.
pub fn decode_bytes(bytes: &[u8]) -> Result<QuestRecord, CodecError> {
    let src = std::str::from_utf8(bytes)
        .map_err(|e| CodecError::MalformedDocument(format!("document is not UTF-8: {e}")))?;
    decode_str(src.strip_prefix('\u{feff}').unwrap_or(src))
}
