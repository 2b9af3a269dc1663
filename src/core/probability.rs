use crate::core::config::CoalescenceConfig;
use crate::core::particle::FourMomentum;

/// Returned by [`coalescence_probability`] when a pair cannot coalesce.
pub const NO_COALESCENCE: f64 = -1.0;

/// Relative momentum of a proton-neutron pair in its centre-of-mass frame.
///
/// The first 3-momentum is given the proton rest mass and the second the neutron
/// rest mass; antinucleon pairs use the same masses.
pub fn relative_momentum(cfg: &CoalescenceConfig, a: &FourMomentum, b: &FourMomentum) -> f64 {
    let (m1, m2) = (cfg.proton_mass, cfg.neutron_mass);
    let e1 = (m1 * m1 + a.p_abs2()).sqrt();
    let e2 = (m2 * m2 + b.p_abs2()).sqrt();
    let total = FourMomentum::new(a.px + b.px, a.py + b.py, a.pz + b.pz, e1 + e2);
    let s = total.mass2();

    let dm = cfg.delta_mass();
    let threshold = (m1 + m2) * (m1 + m2);
    // Kallen function; rounding can push it slightly below zero for a pair at rest.
    let mut kallen = (s - threshold) * (s - dm * dm);
    if kallen < 0.0 {
        kallen = 0.0;
    }
    (kallen / (4.0 * s)).sqrt()
}

/// Coalescence probability of a pair, following the momentum-window ansatz
/// (A. J. Baltz et al., Phys. Lett. B 325 (1994) 7).
///
/// Falls linearly from 1 at zero relative momentum to 0 at `max_delta_p`; at or
/// beyond the window returns [`NO_COALESCENCE`]. Non-finite input gives a
/// non-finite result.
pub fn coalescence_probability(cfg: &CoalescenceConfig, a: &FourMomentum, b: &FourMomentum) -> f64 {
    let delta_p = relative_momentum(cfg, a, b);
    if delta_p >= cfg.max_delta_p {
        NO_COALESCENCE
    } else {
        1.0 - delta_p / cfg.max_delta_p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn back_to_back(k: f64) -> (FourMomentum, FourMomentum) {
        let cfg = CoalescenceConfig::default();
        (
            FourMomentum::from_momentum([0.0, 0.0, k], cfg.proton_mass),
            FourMomentum::from_momentum([0.0, 0.0, -k], cfg.neutron_mass),
        )
    }

    #[test]
    fn relative_momentum_of_back_to_back_pair() {
        let cfg = CoalescenceConfig::default();
        for k in [0.0, 0.01, 0.05, 0.2, 0.7] {
            let (a, b) = back_to_back(k);
            assert!((relative_momentum(&cfg, &a, &b) - k).abs() < 1e-6, "k = {k}");
        }
    }

    #[test]
    fn relative_momentum_is_boost_invariant() {
        let cfg = CoalescenceConfig::default();
        // Proton moving, neutron at rest: CM momentum from the lab frame.
        let a = FourMomentum::from_momentum([0.0, 0.0, 0.1], cfg.proton_mass);
        let b = FourMomentum::from_momentum([0.0, 0.0, 0.0], cfg.neutron_mass);
        let s = (a + b).mass2();
        // Fixed-target CM momentum: p_lab * m_target / sqrt(s)
        let expected = 0.1 * cfg.neutron_mass / s.sqrt();
        assert!((relative_momentum(&cfg, &a, &b) - expected).abs() < 1e-9);
    }

    #[test]
    fn probability_is_one_at_rest() {
        let cfg = CoalescenceConfig::default();
        let (a, b) = back_to_back(0.0);
        assert!((coalescence_probability(&cfg, &a, &b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn probability_at_fifty_mev() {
        let cfg = CoalescenceConfig::default();
        let (a, b) = back_to_back(0.05);
        assert!((coalescence_probability(&cfg, &a, &b) - 0.75).abs() < 1e-5);
    }

    #[test]
    fn outside_window_is_sentinel() {
        let cfg = CoalescenceConfig::default();
        for k in [0.2001, 0.25, 3.0] {
            let (a, b) = back_to_back(k);
            assert!(coalescence_probability(&cfg, &a, &b) <= 0.0, "k = {k}");
        }
    }

    #[test]
    fn probability_decreases_with_relative_momentum() {
        let cfg = CoalescenceConfig::default();
        let mut last = f64::INFINITY;
        for i in 0..200 {
            let (a, b) = back_to_back(i as f64 * 0.001);
            let prob = coalescence_probability(&cfg, &a, &b);
            assert!(prob > 0.0 && prob <= 1.0 + 1e-9);
            assert!(prob < last + 1e-12, "not monotone at step {i}");
            last = prob;
        }
        // Just below the window the probability approaches zero.
        let (a, b) = back_to_back(0.19999);
        assert!(coalescence_probability(&cfg, &a, &b) < 1e-3);
    }

    #[test]
    fn non_finite_input_never_coalesces() {
        let cfg = CoalescenceConfig::default();
        let a = FourMomentum::new(f64::NAN, 0.0, 0.0, 1.0);
        let (_, b) = back_to_back(0.01);
        assert!(coalescence_probability(&cfg, &a, &b).is_nan());
    }
}
