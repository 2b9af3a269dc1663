use crate::core::config::CoalescenceConfig;
use crate::core::particle::FourMomentum;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Kinematic summary of one coalesced (anti-)deuteron.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputRecord {
    /// Species code (deuteron or anti-deuteron).
    pub pdg: i32,
    /// Transverse momentum (GeV/c).
    pub pt: f64,
    /// Longitudinal momentum (GeV/c).
    pub pz: f64,
    /// Pseudorapidity.
    pub eta: f64,
}

impl OutputRecord {
    pub fn from_momentum(pdg: i32, p: &FourMomentum) -> Self {
        Self {
            pdg,
            pt: p.pt(),
            pz: p.pz,
            eta: p.eta(),
        }
    }
}

/// Tab-separated: `pdg  pt  pz  eta`.
impl fmt::Display for OutputRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}\t{}", self.pdg, self.pt, self.pz, self.eta)
    }
}

impl FromStr for OutputRecord {
    type Err = Error;

    /// Parses one record line; the reported line number is 0 and callers that
    /// know the position patch it in.
    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split('\t').map(str::trim).collect();
        if fields.len() != 4 {
            return Err(Error::parse(
                0,
                format!("expected 4 tab-separated fields, got {}", fields.len()),
            ));
        }
        let pdg = fields[0]
            .parse::<i32>()
            .map_err(|e| Error::parse(0, format!("bad species code {:?}: {e}", fields[0])))?;
        let mut values = [0.0_f64; 3];
        for (v, text) in values.iter_mut().zip(&fields[1..]) {
            *v = text
                .parse::<f64>()
                .map_err(|e| Error::parse(0, format!("bad number {text:?}: {e}")))?;
        }
        Ok(Self {
            pdg,
            pt: values[0],
            pz: values[1],
            eta: values[2],
        })
    }
}

/// Composite 4-momentum of a coalesced pair, projected onto the deuteron mass shell.
///
/// The 3-momenta are summed and the energy recomputed as `sqrt(|p|^2 + M_d^2)`
/// instead of adding the constituent energies.
pub fn composite_momentum(cfg: &CoalescenceConfig, a: &FourMomentum, b: &FourMomentum) -> FourMomentum {
    (*a + *b).on_shell(cfg.deuteron_mass)
}

/// Output record of one accepted pair.
pub fn build_record(
    cfg: &CoalescenceConfig,
    pdg: i32,
    a: &FourMomentum,
    b: &FourMomentum,
) -> OutputRecord {
    OutputRecord::from_momentum(pdg, &composite_momentum(cfg, a, b))
}
