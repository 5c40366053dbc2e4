/// Cross section estimate
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CrossSection {
    /// Mean value for the cross section
    pub mean: f64,
    /// Statistical error
    pub err: f64,
}

/// Running sums for the total cross section
///
/// Correlated entries, e.g. a real emission and its counterterms, share
/// a common `weight2` equal to the sum of their weights. Summing
/// `weight * weight2` then yields the squared weight of the combined
/// event, so that correlated entries enter the variance only once.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct XsAccumulator {
    sum_w: f64,
    sum_ww2: f64,
    count: u64,
}

impl XsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Add an entry with weights `weight` and `weight2`
    pub fn add(&mut self, weight: f64, weight2: f64) {
        self.sum_w += weight;
        self.sum_ww2 += weight * weight2;
        self.count += 1;
    }

    /// Number of added entries
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn cross_section(&self) -> f64 {
        self.sum_w
    }

    /// Statistical error of the cross section
    ///
    /// Returns zero if no entries have been added.
    pub fn error(&self) -> f64 {
        if self.count == 0 {
            return 0.;
        }
        let var = self.sum_ww2 - self.sum_w * self.sum_w / self.count as f64;
        var.max(0.).sqrt()
    }

    pub fn estimate(&self) -> CrossSection {
        CrossSection {
            mean: self.cross_section(),
            err: self.error(),
        }
    }
}

#[cfg(feature = "hepmc2")]
impl From<CrossSection> for hepmc2::event::CrossSection {
    fn from(source: CrossSection) -> Self {
        Self {
            cross_section: source.mean,
            cross_section_error: source.err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        let xs = XsAccumulator::new();
        assert_eq!(xs.estimate(), CrossSection { mean: 0., err: 0. });
    }

    #[test]
    fn uncorrelated() {
        let w = [1., 2., 3., 6.];
        let mut xs = XsAccumulator::new();
        for w in w {
            xs.add(w, w);
        }
        assert_eq!(xs.count(), 4);
        assert_eq!(xs.cross_section(), 12.);
        // 1 + 4 + 9 + 36 - 144 / 4
        assert_eq!(xs.error(), 14f64.sqrt());

        xs.reset();
        assert_eq!(xs.count(), 0);
        assert_eq!(xs.cross_section(), 0.);
        assert_eq!(xs.error(), 0.);
    }

    #[test]
    fn correlated() {
        // weights of an event and its counterterm, with weight2 = sum
        let entries = [(5., 5.), (3., 1.), (-2., 1.)];
        let mut xs = XsAccumulator::new();
        for (w, w2) in entries {
            xs.add(w, w2);
        }
        assert_eq!(xs.cross_section(), 6.);
        // 25 + 3 - 2 - 36 / 3
        assert_eq!(xs.error(), 14f64.sqrt());
    }

    #[cfg(feature = "hepmc2")]
    #[test]
    fn hepmc2_cross_section() {
        let xs = hepmc2::event::CrossSection::from(CrossSection { mean: 3., err: 0.5 });
        assert_eq!(xs.cross_section, 3.);
        assert_eq!(xs.cross_section_error, 0.5);
    }

    #[test]
    fn no_negative_variance() {
        let mut xs = XsAccumulator::new();
        xs.add(1., 0.);
        assert_eq!(xs.error(), 0.);
    }
}
