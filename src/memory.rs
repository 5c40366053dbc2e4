use std::path::{Path, PathBuf};

use ahash::AHashMap;

use crate::error::{BoxError, DecodeError};
use crate::event::RawEntry;
use crate::source::{RawEntries, SourceOpener};

/// In-memory storage for ntuple records
///
/// Files are identified by their path; every file holds a single tree
/// that is returned irrespective of the requested tree name.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    files: AHashMap<PathBuf, Vec<Result<RawEntry, DecodeError>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the records for `file`, replacing any previous content
    pub fn insert<P: Into<PathBuf>>(&mut self, file: P, entries: Vec<RawEntry>) {
        self.files
            .insert(file.into(), entries.into_iter().map(Ok).collect());
    }

    /// Append a record that the storage layer fails to read
    pub fn push_corrupt<P: Into<PathBuf>>(&mut self, file: P, reason: &str) {
        self.files
            .entry(file.into())
            .or_default()
            .push(Err(DecodeError::Corrupt(reason.to_owned())));
    }
}

impl SourceOpener for MemoryStore {
    fn open(&mut self, file: &Path, _tree: &str) -> Result<RawEntries, BoxError> {
        let entries = self
            .files
            .get(file)
            .ok_or_else(|| format!("No such file: {}", file.display()))?;
        Ok(Box::new(entries.clone().into_iter()))
    }
}
