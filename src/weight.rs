//! Event weights for modified scales and PDFs
//!
//! Entries store their matrix-element weights without PDF factors,
//! together with the coefficients of the scale logarithms. This allows
//! recomputing the weight for any renormalisation scale μ_R, any
//! factorisation scale μ_F, and any PDF without evaluating matrix elements.
use crate::error::{Error, Result};
use crate::event::{EntryType, EventEntry};
use crate::pdf::{is_gluon, Pdf};

/// Which of the two stored matrix-element weights to start from
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MeWeight {
    /// `me_weight`, corresponding to `weight`
    First,
    /// `me_weight2`, corresponding to `weight2`
    Second,
}

/// Compute the weight of `entry` for the scales `mu_f` and `mu_r`
pub fn compute_weight(
    entry: &EventEntry,
    pdf: Pdf<'_>,
    mu_f: f64,
    mu_r: f64,
    which: MeWeight,
) -> Result<f64> {
    check_scale("factorisation", mu_f)?;
    check_scale("renormalisation", mu_r)?;

    let lr = (mu_r * mu_r / (entry.ren_scale * entry.ren_scale)).ln();
    let lf = (mu_f * mu_f / (entry.fac_scale * entry.fac_scale)).ln();
    let [x1, x2] = entry.x;
    let [id1, id2] = entry.parton_id;
    let fa = pdf.f(0, id1, x1, mu_f);
    let fb = pdf.f(1, id2, x2, mu_f);

    let me = match which {
        MeWeight::First => entry.me_weight,
        MeWeight::Second => entry.me_weight2,
    };
    let u = |n| entry.user_weight(n);
    let w = match entry.entry_type {
        EntryType::Born | EntryType::Real => me * fa * fb,
        EntryType::Virtual => (me + u(0) * lr + u(1) * lr * lr / 2.) * fa * fb,
        EntryType::Integrated => {
            let mut w = (me + u(0) * lr + u(1) * lr * lr / 2.) * fa * fb;
            let a = collinear_densities(pdf, 0, id1, x1, entry.xp[0], mu_f);
            w += fb * a.fold(entry, 2, lf);
            let b = collinear_densities(pdf, 1, id2, x2, entry.xp[1], mu_f);
            w += fa * b.fold(entry, 10, lf);
            w
        }
    };
    let alphas_ratio = pdf.alphas(mu_r) / pdf.alphas(entry.ren_scale);
    Ok(w * alphas_ratio.powi(entry.alphas_power as i32))
}

fn check_scale(name: &'static str, value: f64) -> Result<()> {
    if value > 0. && value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidScale { name, value })
    }
}

/// Densities entering the collinear counterterms of one beam
///
/// The primed densities are evaluated at x/x' and include the Jacobian 1/x'.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct CollinearDensities {
    quark: f64,
    quark_p: f64,
    gluon: f64,
    gluon_p: f64,
}

impl CollinearDensities {
    /// Contract with the user weights starting at `first`
    fn fold(&self, entry: &EventEntry, first: usize, lf: f64) -> f64 {
        let u = |n| entry.user_weight(first + n);
        self.quark * (u(0) + u(1) * lf)
            + self.quark_p * (u(2) + u(3) * lf)
            + self.gluon * (u(4) + u(5) * lf)
            + self.gluon_p * (u(6) + u(7) * lf)
    }
}

fn collinear_densities(
    pdf: Pdf<'_>,
    beam: usize,
    id: i32,
    x: f64,
    xp: f64,
    q: f64,
) -> CollinearDensities {
    let quark = |x| {
        if is_gluon(id) {
            pdf.quark_sum(beam, x, q)
        } else {
            pdf.f(beam, id, x, q)
        }
    };
    let mut res = CollinearDensities {
        quark: quark(x),
        gluon: pdf.gluon(beam, x, q),
        ..Default::default()
    };
    let z = x / xp;
    // densities vanish outside the physical region
    if xp > 0. && z > 0. && z <= 1. {
        res.quark_p = quark(z) / xp;
        res.gluon_p = pdf.gluon(beam, z, q) / xp;
    }
    res
}
