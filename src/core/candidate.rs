use crate::core::config::CoalescenceConfig;
use crate::core::particle::FourMomentum;
use crate::core::probability::coalescence_probability;
use ordered_float::NotNan;

/// A proton-like/neutron-like pair that may coalesce.
///
/// `proton` and `neutron` index the lists the candidate was generated from and
/// serve as nucleon identities during selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub proton: usize,
    pub neutron: usize,
    pub probability: NotNan<f64>,
}

impl Candidate {
    /// Coalescence probability as a plain `f64`.
    #[inline]
    pub fn probability_f64(&self) -> f64 {
        self.probability.into_inner()
    }

    /// True when both candidates claim the same proton or the same neutron.
    #[inline]
    pub fn shares_nucleon(&self, other: &Candidate) -> bool {
        self.proton == other.proton || self.neutron == other.neutron
    }
}

/// Evaluate every proton x neutron pair and keep those with positive probability.
///
/// Pairs are enumerated neutron-major (all protons for neutron 0, then for
/// neutron 1, ...). This order is the tie-break among equal probabilities.
pub fn generate_candidates(
    cfg: &CoalescenceConfig,
    protons: &[FourMomentum],
    neutrons: &[FourMomentum],
) -> Vec<Candidate> {
    if protons.is_empty() || neutrons.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    for (j, n) in neutrons.iter().enumerate() {
        for (i, p) in protons.iter().enumerate() {
            let prob = coalescence_probability(cfg, p, n);
            // NaN fails this test, so the NotNan conversion below cannot fail.
            if prob > 0.0 {
                if let Ok(probability) = NotNan::new(prob) {
                    out.push(Candidate {
                        proton: i,
                        neutron: j,
                        probability,
                    });
                }
            }
        }
    }
    out
}
