use std::path::PathBuf;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Reader error
#[derive(Error, Debug)]
pub enum Error {
    /// A stored record is malformed or truncated
    #[error("Failed to decode entry {entry} in {}", file.display())]
    Decode {
        file: PathBuf,
        entry: u64,
        #[source]
        source: DecodeError,
    },

    /// Particle index beyond the particle count of the current entry
    #[error("Particle index {index} out of bounds for entry with {len} particles")]
    OutOfBounds { index: usize, len: usize },

    /// No entry has been read yet
    #[error("No current entry, call `next_entry` first")]
    NoEntry,

    /// No PDF set was selected before computing a weight
    #[error("No PDF set selected")]
    MissingContext,

    /// Requested scale is not positive
    #[error("Invalid {name} scale: {value}")]
    InvalidScale { name: &'static str, value: f64 },

    /// A registered file could not be opened
    #[error("Failed to open {}", file.display())]
    SourceUnavailable {
        file: PathBuf,
        #[source]
        source: BoxError,
    },

    /// The PDF library failed to load a set
    #[error("Failed to load PDF set {name}")]
    PdfLoad {
        name: String,
        #[source]
        source: BoxError,
    },

    /// PDF member index not in the loaded set
    #[error("PDF set {name} has {members} members, requested member {member}")]
    InvalidMember {
        name: String,
        member: usize,
        members: usize,
    },
}

/// Reason why a stored record could not be decoded
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Particle count {nparticle} does not match column lengths {columns:?}")]
    ParticleCount { nparticle: i32, columns: [usize; 5] },

    #[error("Momentum fraction x{beam} = {x} outside (0, 1]")]
    MomentumFraction { beam: usize, x: f64 },

    #[error("Stored {name} scale {value} is not positive")]
    Scale { name: &'static str, value: f64 },

    #[error("Parton id {0} is not an integer")]
    NonIntegralParton(f64),

    #[error("Unknown part marker {0:?}")]
    UnknownPart(char),

    #[error("Negative power of alpha_s: {0}")]
    AlphasPower(i16),

    /// Storage-level failure reported by the backing store
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

pub type Result<T> = std::result::Result<T, Error>;
