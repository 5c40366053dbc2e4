use hepmc2::event::{CrossSection, EnergyUnit, FourVector, LengthUnit, PdfInfo, Vertex};

use crate::{
    event::EventEntry,
    util::{extract_inc_info, IncomingInfo},
};

const HEPMC_OUTGOING: i32 = 1;
const HEPMC_INCOMING: i32 = 4;

const END_VTX: i32 = -1;

impl From<&EventEntry> for hepmc2::Event {
    fn from(source: &EventEntry) -> Self {
        let IncomingInfo { parton_id, x, p } = extract_inc_info(source);
        let pdf_info = PdfInfo {
            parton_id,
            x,
            scale: source.fac_scale,
            xf: Default::default(),
            pdf_id: Default::default(),
        };

        // all particles attach to a single vertex
        let particles_in = parton_id
            .into_iter()
            .zip(p)
            .map(|(id, p)| hepmc2::event::Particle {
                id,
                p: FourVector(p),
                status: HEPMC_INCOMING,
                end_vtx: END_VTX,
                ..Default::default()
            })
            .collect();
        let particles_out = source
            .particles
            .iter()
            .map(|particle| hepmc2::event::Particle {
                id: particle.pdg_code,
                p: FourVector(particle.p()),
                m: particle.m(),
                status: HEPMC_OUTGOING,
                ..Default::default()
            })
            .collect();
        let vx = Vertex {
            barcode: END_VTX,
            particles_in,
            particles_out,
            ..Default::default()
        };

        let mut weights = vec![
            source.weight,
            source.weight2,
            source.me_weight,
            source.me_weight2,
        ];
        let mut weight_names = vec![
            String::new(),
            "2".to_owned(),
            "ME".to_owned(),
            "ME2".to_owned(),
        ];
        weights.extend_from_slice(&source.user_weights);
        weight_names.extend((0..source.user_weights.len()).map(|n| format!("USR{n}")));

        Self {
            number: source.id,
            mpi: Default::default(),
            scale: source.ren_scale,
            alpha_qcd: source.alphas,
            alpha_qed: Default::default(),
            signal_process_id: source.entry_type.process_id(),
            signal_process_vertex: Default::default(),
            random_states: Vec::new(),
            weights,
            weight_names,
            vertices: vec![vx],
            xs: CrossSection::default(),
            pdf_info,
            energy_unit: EnergyUnit::GEV,
            length_unit: LengthUnit::MM,
            heavy_ion_info: None,
        }
    }
}

impl From<EventEntry> for hepmc2::Event {
    fn from(source: EventEntry) -> Self {
        (&source).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mixed_entries;

    #[test]
    fn export() {
        let entries = mixed_entries();
        let integrated = EventEntry::try_from(entries[3].clone()).unwrap();
        let ev = hepmc2::Event::from(&integrated);
        assert_eq!(ev.number, 3);
        assert_eq!(ev.signal_process_id, 1);
        assert_eq!(ev.weights.len(), 4 + 18);
        assert_eq!(ev.weights.len(), ev.weight_names.len());
        assert_eq!(ev.weights[0], integrated.weight);
        assert_eq!(ev.weight_names[2], "ME");
        assert_eq!(ev.pdf_info.parton_id, [2, 21]);
        assert_eq!(ev.pdf_info.x, integrated.x);
        assert_eq!(ev.vertices.len(), 1);
        let vx = &ev.vertices[0];
        assert_eq!(vx.particles_in.len(), 2);
        assert_eq!(vx.particles_out.len(), 2);
        assert!(vx.particles_in.iter().all(|p| p.end_vtx == vx.barcode));
    }
}
