//! Shared data model for quest records.

pub mod defs;
pub mod error;
pub mod fields;
pub mod record;
pub mod validate;

pub use defs::*;
pub use error::{RecordError, SequenceKind};
pub use fields::{FieldKind, QuestField};
pub use record::QuestRecord;
pub use validate::{ValidationError, parse_basic_value, validate_record};
