use crate::error::{Error, Result};
use std::ops::Add;

/// Lower bound for both sides of the pseudorapidity ratio.
const TINY_P: f64 = 1e-20;

/// PDG Monte Carlo codes of the nucleons that take part in coalescence.
pub const PROTON_PDG: i32 = 2212;
pub const NEUTRON_PDG: i32 = 2112;

/// Nucleon species. Anything else in an event record is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Proton,
    Neutron,
    AntiProton,
    AntiNeutron,
}

impl Species {
    /// Classify a PDG code; `None` for non-nucleons.
    pub fn from_pdg(pdg: i32) -> Option<Self> {
        match pdg {
            PROTON_PDG => Some(Species::Proton),
            NEUTRON_PDG => Some(Species::Neutron),
            x if x == -PROTON_PDG => Some(Species::AntiProton),
            x if x == -NEUTRON_PDG => Some(Species::AntiNeutron),
            _ => None,
        }
    }

    pub fn pdg(self) -> i32 {
        match self {
            Species::Proton => PROTON_PDG,
            Species::Neutron => NEUTRON_PDG,
            Species::AntiProton => -PROTON_PDG,
            Species::AntiNeutron => -NEUTRON_PDG,
        }
    }

    #[inline]
    pub fn is_antimatter(self) -> bool {
        matches!(self, Species::AntiProton | Species::AntiNeutron)
    }
}

/// A 4-momentum `(px, py, pz, e)` in GeV.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FourMomentum {
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub e: f64,
}

impl FourMomentum {
    pub const fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// On-shell 4-momentum of a particle of rest mass `mass` with 3-momentum `p`.
    pub fn from_momentum(p: [f64; 3], mass: f64) -> Self {
        Self::new(p[0], p[1], p[2], 0.0).on_shell(mass)
    }

    #[inline]
    pub fn p3(&self) -> [f64; 3] {
        [self.px, self.py, self.pz]
    }

    /// Squared 3-momentum magnitude.
    #[inline]
    pub fn p_abs2(&self) -> f64 {
        self.px * self.px + self.py * self.py + self.pz * self.pz
    }

    #[inline]
    pub fn p_abs(&self) -> f64 {
        self.p_abs2().sqrt()
    }

    /// Transverse momentum with respect to the beam (z) axis.
    #[inline]
    pub fn pt(&self) -> f64 {
        (self.px * self.px + self.py * self.py).sqrt()
    }

    /// Invariant mass squared `E^2 - |p|^2`.
    #[inline]
    pub fn mass2(&self) -> f64 {
        self.e * self.e - self.p_abs2()
    }

    /// Pseudorapidity. Stays finite along the beam axis and at rest by bounding
    /// both sides of the ratio from below.
    pub fn eta(&self) -> f64 {
        let magnitude =
            ((self.p_abs() + self.pz.abs()).max(TINY_P) / self.pt().max(TINY_P)).ln();
        if self.pz > 0.0 {
            magnitude
        } else {
            -magnitude
        }
    }

    /// Same 3-momentum, energy recomputed for rest mass `mass`.
    #[inline]
    pub fn on_shell(self, mass: f64) -> Self {
        Self {
            e: (self.p_abs2() + mass * mass).sqrt(),
            ..self
        }
    }

    pub fn is_finite(&self) -> bool {
        self.px.is_finite() && self.py.is_finite() && self.pz.is_finite() && self.e.is_finite()
    }
}

impl Add for FourMomentum {
    type Output = FourMomentum;

    fn add(self, rhs: Self) -> Self::Output {
        FourMomentum {
            px: self.px + rhs.px,
            py: self.py + rhs.py,
            pz: self.pz + rhs.pz,
            e: self.e + rhs.e,
        }
    }
}

/// One entry of an event record.
///
/// Fields:
/// - `pdg`: PDG Monte Carlo code
/// - `p`: 4-momentum in GeV
/// - `is_final`: true when the particle does not decay further
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pdg: i32,
    pub p: FourMomentum,
    pub is_final: bool,
}

impl Particle {
    /// Create a particle after checking that its momentum is finite.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if any momentum component is NaN/inf.
    pub fn new(pdg: i32, p: FourMomentum, is_final: bool) -> Result<Self> {
        if !p.is_finite() {
            return Err(Error::InvalidParam(format!(
                "momentum of particle with pdg {pdg} must be finite"
            )));
        }
        Ok(Self { pdg, p, is_final })
    }

    /// Nucleon species, if this particle is one.
    #[inline]
    pub fn species(&self) -> Option<Species> {
        Species::from_pdg(self.pdg)
    }
}
