use itertools::izip;
use particle_id::ParticleID;

use crate::error::DecodeError;

/// Record as stored in an ntuple tree
///
/// Particle momenta are stored column-wise in single precision. The
/// incoming parton ids are floating-point numbers for historical reasons.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawEntry {
    /// Event id, unique within one file
    pub id: i32,
    /// Number of final-state particles
    pub nparticle: i32,
    pub px: Vec<f32>,
    pub py: Vec<f32>,
    pub pz: Vec<f32>,
    pub energy: Vec<f32>,
    /// Value of α_s used during generation
    pub alphas: f64,
    /// Final-state PDG codes
    pub pdg_code: Vec<i32>,
    pub weight: f64,
    pub weight2: f64,
    pub me_weight: f64,
    pub me_weight2: f64,
    pub x1: f64,
    pub x2: f64,
    /// Convolution variables for integrated subtraction terms
    pub x1p: f64,
    pub x2p: f64,
    pub id1: f64,
    pub id2: f64,
    pub fac_scale: f64,
    pub ren_scale: f64,
    /// Coefficients of the scale logarithms
    pub user_weights: Vec<f64>,
    /// Contribution marker, `B`, `V`, `I`, or `R` in the first byte
    pub part: [u8; 2],
    pub alphas_power: i16,
}

/// Perturbative contribution represented by an entry
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EntryType {
    /// Born
    Born,
    /// Virtual correction
    Virtual,
    /// Integrated subtraction terms
    Integrated,
    /// Real emission minus subtraction terms
    Real,
}

impl EntryType {
    /// Marker character used in ntuple files
    pub fn as_char(self) -> char {
        match self {
            EntryType::Born => 'B',
            EntryType::Virtual => 'V',
            EntryType::Integrated => 'I',
            EntryType::Real => 'R',
        }
    }

    /// Process id used when exporting to other event formats
    pub fn process_id(self) -> i32 {
        match self {
            EntryType::Born => 0,
            EntryType::Integrated => 1,
            EntryType::Real => 2,
            EntryType::Virtual => 3,
        }
    }
}

impl TryFrom<char> for EntryType {
    type Error = DecodeError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'B' => Ok(EntryType::Born),
            'V' => Ok(EntryType::Virtual),
            'I' => Ok(EntryType::Integrated),
            'R' => Ok(EntryType::Real),
            c => Err(DecodeError::UnknownPart(c)),
        }
    }
}

/// A final-state particle
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Particle {
    pub energy: f64,
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub pdg_code: i32,
}

impl Particle {
    /// Four-momentum `[E, px, py, pz]`
    pub fn p(&self) -> [f64; 4] {
        [self.energy, self.px, self.py, self.pz]
    }

    pub fn id(&self) -> ParticleID {
        ParticleID::new(self.pdg_code)
    }

    /// Invariant mass, zero for slightly off-shell massless particles
    pub fn m(&self) -> f64 {
        let p2 = self.px * self.px + self.py * self.py + self.pz * self.pz;
        (self.energy * self.energy - p2).max(0.).sqrt()
    }
}

/// Decoded ntuple entry
#[derive(Clone, Debug, PartialEq)]
pub struct EventEntry {
    /// Event id
    ///
    /// Entries sharing an id belong to the same correlated event,
    /// e.g. a real emission and its counterterms.
    pub id: i32,
    /// Final-state particles in storage order
    pub particles: Vec<Particle>,
    /// Incoming parton momentum fractions
    pub x: [f64; 2],
    /// Convolution variables for integrated subtraction terms
    pub xp: [f64; 2],
    /// Incoming parton ids
    pub parton_id: [i32; 2],
    /// Value of α_s used during generation
    pub alphas: f64,
    pub alphas_power: u16,
    pub ren_scale: f64,
    pub fac_scale: f64,
    pub weight: f64,
    pub weight2: f64,
    pub me_weight: f64,
    pub me_weight2: f64,
    pub user_weights: Vec<f64>,
    pub entry_type: EntryType,
}

impl EventEntry {
    /// User weight `n`, missing weights count as zero
    pub fn user_weight(&self, n: usize) -> f64 {
        self.user_weights.get(n).copied().unwrap_or_default()
    }
}

impl TryFrom<RawEntry> for EventEntry {
    type Error = DecodeError;

    fn try_from(source: RawEntry) -> Result<Self, Self::Error> {
        let RawEntry {
            id,
            nparticle,
            px,
            py,
            pz,
            energy,
            alphas,
            pdg_code,
            weight,
            weight2,
            me_weight,
            me_weight2,
            x1,
            x2,
            x1p,
            x2p,
            id1,
            id2,
            fac_scale,
            ren_scale,
            user_weights,
            part,
            alphas_power,
        } = source;
        let columns = [px.len(), py.len(), pz.len(), energy.len(), pdg_code.len()];
        if nparticle < 0 || columns.iter().any(|&len| len != nparticle as usize) {
            return Err(DecodeError::ParticleCount { nparticle, columns });
        }
        for (beam, x) in [x1, x2].into_iter().enumerate() {
            if !(x > 0. && x <= 1.) {
                return Err(DecodeError::MomentumFraction { beam: beam + 1, x });
            }
        }
        for (name, value) in [("factorisation", fac_scale), ("renormalisation", ren_scale)] {
            if !(value > 0. && value.is_finite()) {
                return Err(DecodeError::Scale { name, value });
            }
        }
        let parton_id = [to_parton_id(id1)?, to_parton_id(id2)?];
        let entry_type = EntryType::try_from(part[0] as char)?;
        let alphas_power =
            u16::try_from(alphas_power).map_err(|_| DecodeError::AlphasPower(alphas_power))?;

        let particles = izip!(energy, px, py, pz, pdg_code)
            .map(|(e, px, py, pz, pdg_code)| Particle {
                energy: e as f64,
                px: px as f64,
                py: py as f64,
                pz: pz as f64,
                pdg_code,
            })
            .collect();

        Ok(Self {
            id,
            particles,
            x: [x1, x2],
            xp: [x1p, x2p],
            parton_id,
            alphas,
            alphas_power,
            ren_scale,
            fac_scale,
            weight,
            weight2,
            me_weight,
            me_weight2,
            user_weights,
            entry_type,
        })
    }
}

impl From<&EventEntry> for RawEntry {
    fn from(source: &EventEntry) -> Self {
        let particles = &source.particles;
        Self {
            id: source.id,
            nparticle: particles.len() as i32,
            px: particles.iter().map(|p| p.px as f32).collect(),
            py: particles.iter().map(|p| p.py as f32).collect(),
            pz: particles.iter().map(|p| p.pz as f32).collect(),
            energy: particles.iter().map(|p| p.energy as f32).collect(),
            alphas: source.alphas,
            pdg_code: particles.iter().map(|p| p.pdg_code).collect(),
            weight: source.weight,
            weight2: source.weight2,
            me_weight: source.me_weight,
            me_weight2: source.me_weight2,
            x1: source.x[0],
            x2: source.x[1],
            x1p: source.xp[0],
            x2p: source.xp[1],
            id1: source.parton_id[0] as f64,
            id2: source.parton_id[1] as f64,
            fac_scale: source.fac_scale,
            ren_scale: source.ren_scale,
            user_weights: source.user_weights.clone(),
            part: [source.entry_type.as_char() as u8, 0],
            alphas_power: source.alphas_power as i16,
        }
    }
}

fn to_parton_id(id: f64) -> Result<i32, DecodeError> {
    if id.fract() == 0. && id.abs() <= i32::MAX as f64 {
        Ok(id as i32)
    } else {
        Err(DecodeError::NonIntegralParton(id))
    }
}
