//! Whole-file reads and writes for quest documents and editing sessions.
//!
//! The codec itself only deals in strings and trees; this module is the thin
//! layer that touches the filesystem on behalf of the front end.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use quest_data::QuestRecord;
use thiserror::Error;

use crate::{CodecError, decode_bytes, encode_to_string};

#[derive(Debug, Error)]
pub enum FileError {
    #[error("unable to access '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("invalid session file '{}': {source}", path.display())]
    SessionParse { path: PathBuf, source: toml::de::Error },
    #[error("unable to serialize session: {0}")]
    SessionWrite(#[from] toml::ser::Error),
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> FileError + '_ {
    move |source| FileError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read and decode a quest document.
pub fn read_quest_xml(path: &Path) -> Result<QuestRecord, FileError> {
    let bytes = fs::read(path).map_err(io_error(path))?;
    let record = decode_bytes(&bytes)?;
    let (conditions, goals, rewards) = record.counts();
    info!(
        "imported '{}': {conditions} conditions, {goals} goals, {rewards} rewards",
        path.display()
    );
    Ok(record)
}

/// Encode `record` and save it with the XML declaration.
///
/// Nothing is written when encoding fails.
pub fn write_quest_xml(path: &Path, record: &QuestRecord) -> Result<(), FileError> {
    let mut xml = encode_to_string(record)?;
    xml.push('\n');
    fs::write(path, &xml).map_err(io_error(path))?;
    info!("saved '{}' ({} bytes)", path.display(), xml.len());
    Ok(())
}

/// Load an editing session.
pub fn read_session(path: &Path) -> Result<QuestRecord, FileError> {
    let text = fs::read_to_string(path).map_err(io_error(path))?;
    let record = toml::from_str(&text).map_err(|source| FileError::SessionParse {
        path: path.to_path_buf(),
        source,
    })?;
    info!("loaded session '{}'", path.display());
    Ok(record)
}

/// Persist an editing session as pretty TOML.
pub fn write_session(path: &Path, record: &QuestRecord) -> Result<(), FileError> {
    let text = toml::to_string_pretty(record)?;
    fs::write(path, text).map_err(io_error(path))?;
    info!("wrote session '{}'", path.display());
    Ok(())
}
