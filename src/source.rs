use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use log::{debug, trace, warn};

use crate::error::{BoxError, DecodeError, Error, Result};
use crate::event::{EventEntry, RawEntry};

/// Lazy sequence of stored records from one file
pub type RawEntries = Box<dyn Iterator<Item = std::result::Result<RawEntry, DecodeError>>>;

/// Access to the storage layer holding ntuple trees
pub trait SourceOpener {
    /// Open the tree `tree` in `file`
    ///
    /// Records should be produced lazily, so that files larger than
    /// the available memory can be read.
    fn open(&mut self, file: &Path, tree: &str) -> std::result::Result<RawEntries, BoxError>;
}

struct OpenSource {
    file: PathBuf,
    entries: RawEntries,
    pos: u64,
}

/// Concatenation of all registered files
///
/// Files are opened one at a time in registration order, each one only
/// after the previous one is exhausted.
pub struct SourceChain {
    opener: Box<dyn SourceOpener>,
    tree: String,
    pending: VecDeque<PathBuf>,
    current: Option<OpenSource>,
}

impl SourceChain {
    pub fn new(opener: Box<dyn SourceOpener>, tree: String) -> Self {
        Self {
            opener,
            tree,
            pending: VecDeque::new(),
            current: None,
        }
    }

    pub fn tree(&self) -> &str {
        &self.tree
    }

    /// Append a file to the end of the reading order
    pub fn add_file(&mut self, file: PathBuf) {
        debug!("Queueing {}", file.display());
        self.pending.push_back(file);
    }

    /// Number of files that have not been opened yet
    pub fn npending(&self) -> usize {
        self.pending.len()
    }

    fn open_next(&mut self) -> Option<Result<()>> {
        let file = self.pending.pop_front()?;
        debug!("Opening tree {} in {}", self.tree, file.display());
        match self.opener.open(&file, &self.tree) {
            Ok(entries) => {
                self.current = Some(OpenSource {
                    file,
                    entries,
                    pos: 0,
                });
                Some(Ok(()))
            }
            Err(source) => {
                warn!("Failed to open {}: {source}", file.display());
                Some(Err(Error::SourceUnavailable { file, source }))
            }
        }
    }
}

impl std::fmt::Debug for SourceChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceChain")
            .field("tree", &self.tree)
            .field("pending", &self.pending)
            .field("current", &self.current.as_ref().map(|s| (&s.file, s.pos)))
            .finish()
    }
}

impl Iterator for SourceChain {
    type Item = Result<EventEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(source) = self.current.as_mut() {
                if let Some(raw) = source.entries.next() {
                    let entry = source.pos;
                    source.pos += 1;
                    let res = raw.and_then(EventEntry::try_from).map_err(|source_err| {
                        warn!(
                            "Failed to decode entry {entry} in {}: {source_err}",
                            source.file.display()
                        );
                        Error::Decode {
                            file: source.file.clone(),
                            entry,
                            source: source_err,
                        }
                    });
                    if let Ok(ev) = &res {
                        trace!("Read entry {entry} with id {}", ev.id);
                    }
                    return Some(res);
                }
                debug!(
                    "Finished {} after {} entries",
                    source.file.display(),
                    source.pos
                );
                self.current = None;
            }
            match self.open_next()? {
                Ok(()) => continue,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{memory::MemoryStore, testing::born_entry};

    fn ids(chain: SourceChain) -> Vec<i32> {
        chain.map(|e| e.unwrap().id).collect()
    }

    #[test]
    fn concatenation() {
        let mut store = MemoryStore::new();
        store.insert("a", (0..3).map(|id| born_entry(id, 0.1, 0.1)).collect());
        store.insert("b", (10..12).map(|id| born_entry(id, 0.1, 0.1)).collect());
        let mut chain = SourceChain::new(Box::new(store), "t3".to_owned());
        chain.add_file("a".into());
        chain.add_file("b".into());
        assert_eq!(chain.npending(), 2);
        assert_eq!(ids(chain), [0, 1, 2, 10, 11]);
    }

    #[test]
    fn lazy_opening() {
        let mut store = MemoryStore::new();
        store.insert("a", vec![born_entry(0, 0.1, 0.1)]);
        store.insert("b", vec![born_entry(1, 0.1, 0.1)]);
        let mut chain = SourceChain::new(Box::new(store), "t3".to_owned());
        chain.add_file("a".into());
        chain.add_file("b".into());
        assert_eq!(chain.next().unwrap().unwrap().id, 0);
        assert_eq!(chain.npending(), 1);
    }

    #[test]
    fn missing_file_is_skipped() {
        let mut store = MemoryStore::new();
        store.insert("b", vec![born_entry(1, 0.1, 0.1)]);
        let mut chain = SourceChain::new(Box::new(store), "t3".to_owned());
        chain.add_file("a".into());
        chain.add_file("b".into());
        assert!(matches!(
            chain.next(),
            Some(Err(Error::SourceUnavailable { .. }))
        ));
        assert_eq!(chain.next().unwrap().unwrap().id, 1);
        assert!(chain.next().is_none());
    }

    #[test]
    fn decode_failure_position() {
        let mut bad = born_entry(1, 0.1, 0.1);
        bad.energy.clear();
        let mut store = MemoryStore::new();
        store.insert("a", vec![born_entry(0, 0.1, 0.1), bad, born_entry(2, 0.1, 0.1)]);
        let mut chain = SourceChain::new(Box::new(store), "t3".to_owned());
        chain.add_file("a".into());
        assert_eq!(chain.next().unwrap().unwrap().id, 0);
        match chain.next() {
            Some(Err(Error::Decode { file, entry, .. })) => {
                assert_eq!(file, PathBuf::from("a"));
                assert_eq!(entry, 1);
            }
            res => panic!("Expected decode error, got {res:?}"),
        }
        assert_eq!(chain.next().unwrap().unwrap().id, 2);
    }
}
