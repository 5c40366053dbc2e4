//! Reader for ntuple event files from NLO QCD calculations
//!
//! Entries are read sequentially from one or more files with
//! [NTupleReader]. Each entry stores its weights with the PDF factors
//! stripped off, so that [NTupleReader::compute_weight] can reweight it
//! to different scales, PDF sets, or PDF members.
//!
//! The storage layer and the PDF library are supplied by the caller
//! through the [SourceOpener] and [PdfLoader] traits.
pub mod error;
pub mod event;
#[cfg(feature = "hepmc2")]
mod hepmc2;
#[cfg(feature = "lhef")]
mod lhef;
pub mod memory;
pub mod pdf;
pub mod reader;
pub mod source;
pub mod weight;
pub mod xs;

#[cfg(any(feature = "lhef", feature = "hepmc2"))]
mod util;

#[cfg(test)]
mod testing;

pub use crate::error::{BoxError, DecodeError, Error, Result};
pub use crate::event::{EntryType, EventEntry, Particle, RawEntry};
pub use crate::memory::MemoryStore;
pub use crate::pdf::{Collider, PdfLoader, PdfSet};
pub use crate::reader::NTupleReader;
pub use crate::source::{RawEntries, SourceOpener};
pub use crate::xs::CrossSection;
