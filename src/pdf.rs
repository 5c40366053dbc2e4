use ahash::AHashMap;
use log::{debug, info};

use crate::error::{BoxError, Error, Result};

/// A loaded set of parton distribution functions
pub trait PdfSet {
    /// Number of members in the set
    fn members(&self) -> usize;

    /// Momentum density x·f(x, q) of parton `id` for the given member
    fn xfx_q(&self, member: usize, id: i32, x: f64, q: f64) -> f64;

    /// Strong coupling α_s(q) for the given member
    fn alphas_q(&self, member: usize, q: f64) -> f64;
}

/// Access to a PDF library
pub trait PdfLoader {
    /// Load the set called `name`
    ///
    /// Each reader calls this at most once per successfully loaded set.
    fn load(&mut self, name: &str) -> std::result::Result<Box<dyn PdfSet>, BoxError>;
}

/// Colliding hadrons
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Collider {
    /// Proton-proton
    #[default]
    PP,
    /// Proton-antiproton
    PPbar,
}

#[derive(Clone, Debug, Default, PartialEq)]
enum PdfState {
    #[default]
    Unset,
    /// Chosen, but not loaded yet
    Selected(String),
    Ready(String),
}

/// Active PDF set, member, and collider
pub struct PdfContext {
    loader: Box<dyn PdfLoader>,
    state: PdfState,
    member: usize,
    collider: Collider,
    sets: AHashMap<String, Box<dyn PdfSet>>,
}

impl PdfContext {
    pub fn new(loader: Box<dyn PdfLoader>) -> Self {
        Self {
            loader,
            state: PdfState::Unset,
            member: 0,
            collider: Collider::default(),
            sets: AHashMap::new(),
        }
    }

    /// Select the PDF set `name`
    ///
    /// Loading is deferred until the set is needed.
    pub fn set_pdf(&mut self, name: &str) {
        debug!("Selecting PDF set {name}");
        self.state = if self.sets.contains_key(name) {
            PdfState::Ready(name.to_owned())
        } else {
            PdfState::Selected(name.to_owned())
        };
    }

    pub fn set_member(&mut self, member: usize) {
        self.member = member;
    }

    pub fn set_collider(&mut self, collider: Collider) {
        self.collider = collider;
    }

    pub fn pdf_name(&self) -> Option<&str> {
        match &self.state {
            PdfState::Unset => None,
            PdfState::Selected(name) | PdfState::Ready(name) => Some(name),
        }
    }

    pub fn member(&self) -> usize {
        self.member
    }

    pub fn collider(&self) -> Collider {
        self.collider
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, PdfState::Ready(_))
    }

    /// Load the selected set if necessary and return the active PDF
    pub fn pdf(&mut self) -> Result<Pdf<'_>> {
        let name = match &self.state {
            PdfState::Unset => return Err(Error::MissingContext),
            PdfState::Selected(name) | PdfState::Ready(name) => name.clone(),
        };
        if !self.sets.contains_key(&name) {
            info!("Loading PDF set {name}");
            let set = self.loader.load(&name).map_err(|source| Error::PdfLoad {
                name: name.clone(),
                source,
            })?;
            self.sets.insert(name.clone(), set);
        }
        if !self.is_loaded() {
            self.state = PdfState::Ready(name.clone());
        }
        let set = self.sets[&name].as_ref();
        if self.member >= set.members() {
            return Err(Error::InvalidMember {
                name,
                member: self.member,
                members: set.members(),
            });
        }
        Ok(Pdf {
            set,
            member: self.member,
            collider: self.collider,
        })
    }
}

impl std::fmt::Debug for PdfContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfContext")
            .field("state", &self.state)
            .field("member", &self.member)
            .field("collider", &self.collider)
            .field("loaded", &self.sets.keys().collect::<Vec<_>>())
            .finish()
    }
}

const GLUON: i32 = 21;

/// A single PDF member for a given collider
#[derive(Copy, Clone)]
pub struct Pdf<'a> {
    set: &'a dyn PdfSet,
    member: usize,
    collider: Collider,
}

impl Pdf<'_> {
    /// Density f(x, q) of parton `id` in beam `beam` (0 or 1)
    pub fn f(&self, beam: usize, id: i32, x: f64, q: f64) -> f64 {
        let id = if beam == 1 && self.collider == Collider::PPbar {
            charge_conjugate(id)
        } else {
            id
        };
        self.set.xfx_q(self.member, id, x, q) / x
    }

    pub fn gluon(&self, beam: usize, x: f64, q: f64) -> f64 {
        self.f(beam, GLUON, x, q)
    }

    /// Sum of the densities of the light quarks and antiquarks
    pub fn quark_sum(&self, beam: usize, x: f64, q: f64) -> f64 {
        (1..=5).map(|id| self.f(beam, id, x, q) + self.f(beam, -id, x, q)).sum()
    }

    pub fn alphas(&self, q: f64) -> f64 {
        self.set.alphas_q(self.member, q)
    }
}

pub(crate) fn is_gluon(id: i32) -> bool {
    id == GLUON || id == 0
}

fn charge_conjugate(id: i32) -> i32 {
    if (1..=6).contains(&id.abs()) {
        -id
    } else {
        id
    }
}
