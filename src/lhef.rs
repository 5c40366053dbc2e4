use lhef::{
    status::{INCOMING, OUTGOING},
    HEPEUP,
};

use crate::{
    event::EventEntry,
    util::{extract_inc_info, IncomingInfo},
};

impl From<&EventEntry> for HEPEUP {
    fn from(source: &EventEntry) -> Self {
        let IncomingInfo { parton_id, p, .. } = extract_inc_info(source);
        let nup = source.particles.len() + 2;

        let mut idup = Vec::with_capacity(nup);
        let mut istup = Vec::with_capacity(nup);
        let mut mothup = Vec::with_capacity(nup);
        let mut pup = Vec::with_capacity(nup);
        for (id, [e, px, py, pz]) in parton_id.into_iter().zip(p) {
            idup.push(id);
            istup.push(INCOMING);
            mothup.push([0, 0]);
            pup.push([px, py, pz, e, 0.]);
        }
        for particle in &source.particles {
            idup.push(particle.pdg_code);
            istup.push(OUTGOING);
            mothup.push([1, 2]);
            pup.push([particle.px, particle.py, particle.pz, particle.energy, particle.m()]);
        }

        Self {
            NUP: nup as i32,
            IDRUP: source.entry_type.process_id(),
            XWGTUP: source.weight,
            SCALUP: source.ren_scale,
            AQEDUP: 0.,
            AQCDUP: source.alphas,
            IDUP: idup,
            ISTUP: istup,
            MOTHUP: mothup,
            ICOLUP: vec![[0, 0]; nup],
            PUP: pup,
            VTIMUP: vec![0.; nup],
            // unknown spin
            SPINUP: vec![9.; nup],
            info: Default::default(),
            attr: Default::default(),
        }
    }
}

impl From<EventEntry> for HEPEUP {
    fn from(source: EventEntry) -> Self {
        (&source).into()
    }
}
