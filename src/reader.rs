use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::event::{EntryType, EventEntry, Particle};
use crate::pdf::{Collider, PdfContext, PdfLoader};
use crate::source::{SourceChain, SourceOpener};
use crate::weight::{self, MeWeight};
use crate::xs::{CrossSection, XsAccumulator};

/// Default name of the tree holding the entries
pub const DEFAULT_TREE: &str = "t3";

/// Sequential reader for ntuple files
///
/// Entries are read one at a time with [next_entry](Self::next_entry).
/// Only the most recently read entry is kept.
///
/// # Example
///
/// ```
/// use ntuple_reader::{MemoryStore, NTupleReader, PdfLoader, PdfSet};
///
/// struct Flat;
///
/// impl PdfSet for Flat {
///     fn members(&self) -> usize { 1 }
///     fn xfx_q(&self, _: usize, _: i32, x: f64, _: f64) -> f64 { x }
///     fn alphas_q(&self, _: usize, _: f64) -> f64 { 0.118 }
/// }
///
/// struct FlatLoader;
///
/// impl PdfLoader for FlatLoader {
///     fn load(&mut self, _: &str) -> Result<Box<dyn PdfSet>, ntuple_reader::BoxError> {
///         Ok(Box::new(Flat))
///     }
/// }
///
/// let mut reader = NTupleReader::new(MemoryStore::new(), FlatLoader);
/// reader.set_pdf("Flat");
/// reader.add_file("events.root");
/// // the store is empty, so opening the file fails
/// assert!(reader.next_entry().is_err());
/// assert!(!reader.next_entry().unwrap());
/// ```
#[derive(Debug)]
pub struct NTupleReader {
    sources: SourceChain,
    current: Option<EventEntry>,
    pdf: PdfContext,
    xs: XsAccumulator,
}

impl NTupleReader {
    /// Reader for the default tree
    pub fn new<O, L>(opener: O, pdfs: L) -> Self
    where
        O: SourceOpener + 'static,
        L: PdfLoader + 'static,
    {
        Self::from_tree(DEFAULT_TREE, opener, pdfs)
    }

    /// Reader for the tree `tree`
    pub fn from_tree<T, O, L>(tree: T, opener: O, pdfs: L) -> Self
    where
        T: Into<String>,
        O: SourceOpener + 'static,
        L: PdfLoader + 'static,
    {
        Self {
            sources: SourceChain::new(Box::new(opener), tree.into()),
            current: None,
            pdf: PdfContext::new(Box::new(pdfs)),
            xs: XsAccumulator::new(),
        }
    }

    pub fn tree_name(&self) -> &str {
        self.sources.tree()
    }

    /// Append a file
    ///
    /// Files are read in the order they were added. A file added after
    /// all others have been read is picked up by the next call to
    /// [next_entry](Self::next_entry).
    pub fn add_file<P: AsRef<Path>>(&mut self, file: P) {
        self.sources.add_file(file.as_ref().to_owned())
    }

    /// Read the next entry
    ///
    /// Returns `Ok(false)` once all files are exhausted. On error, the
    /// previous entry stays available and reading can continue with the
    /// following record.
    pub fn next_entry(&mut self) -> Result<bool> {
        match self.sources.next() {
            Some(Ok(entry)) => {
                self.current = Some(entry);
                Ok(true)
            }
            Some(Err(err)) => Err(err),
            None => {
                debug!("No more entries");
                Ok(false)
            }
        }
    }

    /// The current entry
    pub fn entry(&self) -> Result<&EventEntry> {
        self.current.as_ref().ok_or(Error::NoEntry)
    }

    /// Select the PDF set `name`
    ///
    /// The set is loaded the first time it is needed.
    pub fn set_pdf<T: AsRef<str>>(&mut self, name: T) {
        self.pdf.set_pdf(name.as_ref())
    }

    pub fn set_pdf_member(&mut self, member: usize) {
        self.pdf.set_member(member)
    }

    /// Load the selected PDF set now instead of on first use
    pub fn preload_pdf(&mut self) -> Result<()> {
        self.pdf.pdf().map(|_| ())
    }

    pub fn pdf_name(&self) -> Option<&str> {
        self.pdf.pdf_name()
    }

    pub fn pdf_member(&self) -> usize {
        self.pdf.member()
    }

    /// Assume proton-proton collisions
    pub fn set_pp(&mut self) {
        self.pdf.set_collider(Collider::PP)
    }

    /// Assume proton-antiproton collisions
    pub fn set_ppbar(&mut self) {
        self.pdf.set_collider(Collider::PPbar)
    }

    pub fn collider(&self) -> Collider {
        self.pdf.collider()
    }

    pub fn get_id(&self) -> Result<i32> {
        Ok(self.entry()?.id)
    }

    pub fn get_particle_number(&self) -> Result<usize> {
        Ok(self.entry()?.particles.len())
    }

    /// Final-state particle `i`
    pub fn particle(&self, i: usize) -> Result<&Particle> {
        let particles = &self.entry()?.particles;
        particles.get(i).ok_or(Error::OutOfBounds {
            index: i,
            len: particles.len(),
        })
    }

    pub fn get_energy(&self, i: usize) -> Result<f64> {
        Ok(self.particle(i)?.energy)
    }

    pub fn get_x(&self, i: usize) -> Result<f64> {
        Ok(self.particle(i)?.px)
    }

    pub fn get_y(&self, i: usize) -> Result<f64> {
        Ok(self.particle(i)?.py)
    }

    pub fn get_z(&self, i: usize) -> Result<f64> {
        Ok(self.particle(i)?.pz)
    }

    pub fn get_pdg_code(&self, i: usize) -> Result<i32> {
        Ok(self.particle(i)?.pdg_code)
    }

    pub fn get_x1(&self) -> Result<f64> {
        Ok(self.entry()?.x[0])
    }

    pub fn get_x2(&self) -> Result<f64> {
        Ok(self.entry()?.x[1])
    }

    pub fn get_id1(&self) -> Result<f64> {
        Ok(self.entry()?.parton_id[0] as f64)
    }

    pub fn get_id2(&self) -> Result<f64> {
        Ok(self.entry()?.parton_id[1] as f64)
    }

    pub fn get_alphas_power(&self) -> Result<u16> {
        Ok(self.entry()?.alphas_power)
    }

    pub fn get_renormalization_scale(&self) -> Result<f64> {
        Ok(self.entry()?.ren_scale)
    }

    pub fn get_factorization_scale(&self) -> Result<f64> {
        Ok(self.entry()?.fac_scale)
    }

    pub fn get_weight(&self) -> Result<f64> {
        Ok(self.entry()?.weight)
    }

    pub fn get_weight2(&self) -> Result<f64> {
        Ok(self.entry()?.weight2)
    }

    pub fn get_me_weight(&self) -> Result<f64> {
        Ok(self.entry()?.me_weight)
    }

    pub fn get_me_weight2(&self) -> Result<f64> {
        Ok(self.entry()?.me_weight2)
    }

    pub fn get_type(&self) -> Result<EntryType> {
        Ok(self.entry()?.entry_type)
    }

    /// Weight of the current entry for new scales and the active PDF
    ///
    /// For the original scales and PDF this reproduces
    /// [get_weight](Self::get_weight).
    pub fn compute_weight(
        &mut self,
        new_factorization_scale: f64,
        new_renormalization_scale: f64,
    ) -> Result<f64> {
        self.compute(
            new_factorization_scale,
            new_renormalization_scale,
            MeWeight::First,
        )
    }

    /// Like [compute_weight](Self::compute_weight), but for `weight2`
    pub fn compute_weight2(
        &mut self,
        new_factorization_scale: f64,
        new_renormalization_scale: f64,
    ) -> Result<f64> {
        self.compute(
            new_factorization_scale,
            new_renormalization_scale,
            MeWeight::Second,
        )
    }

    fn compute(&mut self, mu_f: f64, mu_r: f64, which: MeWeight) -> Result<f64> {
        let entry = self.current.as_ref().ok_or(Error::NoEntry)?;
        let pdf = self.pdf.pdf()?;
        weight::compute_weight(entry, pdf, mu_f, mu_r, which)
    }

    pub fn reset_cross_section(&mut self) {
        self.xs.reset()
    }

    /// Add the stored weights of the current entry to the cross section
    pub fn add_to_cross_section(&mut self) -> Result<()> {
        let entry = self.entry()?;
        let (w, w2) = (entry.weight, entry.weight2);
        self.xs.add(w, w2);
        Ok(())
    }

    /// Add custom weights, e.g. from [compute_weight](Self::compute_weight)
    pub fn add_weight_to_cross_section(&mut self, weight: f64, weight2: f64) {
        self.xs.add(weight, weight2)
    }

    pub fn get_cross_section(&self) -> f64 {
        self.xs.cross_section()
    }

    pub fn get_cross_section_error(&self) -> f64 {
        self.xs.error()
    }

    pub fn cross_section(&self) -> CrossSection {
        self.xs.estimate()
    }
}
