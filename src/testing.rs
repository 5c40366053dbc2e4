//! Analytic PDF set and sample entries shared by the unit tests
use std::{cell::Cell, rc::Rc};

use crate::error::BoxError;
use crate::event::{EntryType, RawEntry};
use crate::pdf::{PdfLoader, PdfSet};

pub(crate) const TOY_SET: &str = "ToyPDF";

pub(crate) const FAC_SCALE: f64 = 50.;
pub(crate) const REN_SCALE: f64 = 80.;

#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct ToySet;

impl PdfSet for ToySet {
    fn members(&self) -> usize {
        3
    }

    fn xfx_q(&self, member: usize, id: i32, x: f64, q: f64) -> f64 {
        let norm = match id {
            0 | 21 => 2.5,
            2 => 1.2,
            1 => 0.7,
            -1 | -2 => 0.3,
            id if id.abs() <= 5 => 0.1,
            _ => 0.,
        };
        norm * x.powf(0.3)
            * (1. - x).powi(3)
            * (1. + 0.05 * (q / 10.).ln())
            * (1. + 0.01 * member as f64)
    }

    fn alphas_q(&self, _member: usize, q: f64) -> f64 {
        1. / (0.6 * (q * q / 0.04).ln())
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct ToyLoader {
    pub(crate) loads: Rc<Cell<usize>>,
}

impl PdfLoader for ToyLoader {
    fn load(&mut self, name: &str) -> Result<Box<dyn PdfSet>, BoxError> {
        if name != TOY_SET {
            return Err(format!("Unknown PDF set {name}").into());
        }
        self.loads.set(self.loads.get() + 1);
        Ok(Box::new(ToySet))
    }
}

fn f(id: i32, x: f64) -> f64 {
    ToySet.xfx_q(0, id, x, FAC_SCALE) / x
}

fn quark_sum(x: f64) -> f64 {
    (1..=5).map(|id| f(id, x) + f(-id, x)).sum()
}

/// u ubar -> two particles with consistent stored weights
pub(crate) fn born_entry(id: i32, x1: f64, x2: f64) -> RawEntry {
    let me_weight = 1.5e-3;
    let me_weight2 = 1.2e-3;
    let pdfs = f(2, x1) * f(-2, x2);
    RawEntry {
        id,
        nparticle: 2,
        px: vec![30., -30.],
        py: vec![40., -40.],
        pz: vec![100., -50.],
        energy: vec![400., 300.],
        alphas: ToySet.alphas_q(0, REN_SCALE),
        pdg_code: vec![11, -11],
        weight: me_weight * pdfs,
        weight2: me_weight2 * pdfs,
        me_weight,
        me_weight2,
        x1,
        x2,
        x1p: 0.,
        x2p: 0.,
        id1: 2.,
        id2: -2.,
        fac_scale: FAC_SCALE,
        ren_scale: REN_SCALE,
        user_weights: vec![],
        part: [b'B', 0],
        alphas_power: 2,
    }
}

/// One entry of each type, generated with member 0 of [ToySet]
pub(crate) fn mixed_entries() -> Vec<RawEntry> {
    let born = born_entry(0, 0.2, 0.05);

    let mut real = born_entry(1, 0.3, 0.1);
    real.part = [EntryType::Real.as_char() as u8, 0];
    real.nparticle = 3;
    real.px.push(0.);
    real.py.push(0.);
    real.pz.push(20.);
    real.energy.push(20.);
    real.pdg_code.push(21);
    real.alphas_power = 3;

    let mut virt = born_entry(2, 0.25, 0.02);
    virt.part = [EntryType::Virtual.as_char() as u8, 0];
    virt.user_weights = vec![2e-4, -1e-4];

    // q g initial state
    let (x1, x2, x1p, x2p) = (0.25, 0.1, 0.5, 0.4);
    let mut integrated = born_entry(3, x1, x2);
    integrated.part = [EntryType::Integrated.as_char() as u8, 0];
    integrated.id2 = 21.;
    integrated.x1p = x1p;
    integrated.x2p = x2p;
    integrated.user_weights = (0..18).map(|n| (n as f64 + 1.) * 1e-5).collect();
    let u = &integrated.user_weights;
    let (fa, fb) = (f(2, x1), f(21, x2));
    let (z1, z2) = (x1 / x1p, x2 / x2p);
    let collinear = fb
        * (fa * u[2]
            + f(2, z1) / x1p * u[4]
            + f(21, x1) * u[6]
            + f(21, z1) / x1p * u[8])
        + fa * (quark_sum(x2) * u[10]
            + quark_sum(z2) / x2p * u[12]
            + fb * u[14]
            + f(21, z2) / x2p * u[16]);
    integrated.weight = integrated.me_weight * fa * fb + collinear;
    integrated.weight2 = integrated.me_weight2 * fa * fb + collinear;

    vec![born, real, virt, integrated]
}
