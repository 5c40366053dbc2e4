use crate::event::EventEntry;

pub(crate) struct IncomingInfo {
    pub parton_id: [i32; 2],
    #[cfg(feature = "hepmc2")]
    pub x: [f64; 2],
    /// Four-momenta `[E, px, py, pz]`, the first parton moves along +z
    pub p: [[f64; 4]; 2],
}

/// Reconstruct the incoming partons from the final-state momenta
///
/// Partons are taken to be massless and collinear to the beam axis.
pub(crate) fn extract_inc_info(ev: &EventEntry) -> IncomingInfo {
    let e_tot: f64 = ev.particles.iter().map(|p| p.energy).sum();
    let pz_tot: f64 = ev.particles.iter().map(|p| p.pz).sum();
    let e_in = [(e_tot + pz_tot) / 2., (e_tot - pz_tot) / 2.];
    IncomingInfo {
        parton_id: ev.parton_id,
        #[cfg(feature = "hepmc2")]
        x: ev.x,
        p: [
            [e_in[0], 0., 0., e_in[0]],
            [e_in[1], 0., 0., -e_in[1]],
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::born_entry;

    #[test]
    fn momentum_conservation() {
        let ev = EventEntry::try_from(born_entry(0, 0.1, 0.2)).unwrap();
        let inc = extract_inc_info(&ev);
        let [a, b] = inc.p;
        assert_eq!(a, [375., 0., 0., 375.]);
        assert_eq!(b, [325., 0., 0., -325.]);
        assert_eq!(inc.parton_id, [2, -2]);
    }
}
