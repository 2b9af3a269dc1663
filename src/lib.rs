//! Two-body coalescence of final-state nucleons into deuterons and anti-deuterons.
//!
//! For each event the proton x neutron (and antiproton x antineutron) pairs
//! inside a relative-momentum window become candidates; a randomized greedy
//! selection accepts pairs so that every nucleon is used at most once, and
//! each accepted pair is emitted as an on-shell composite with its transverse
//! momentum, longitudinal momentum and pseudorapidity.
//!
//! ```
//! use coalsim::core::{CoalescenceConfig, Coalescer, FourMomentum, ReplayStream};
//!
//! # fn main() -> coalsim::error::Result<()> {
//! let cfg = CoalescenceConfig::default();
//! let mut co = Coalescer::new(cfg, ReplayStream::new(vec![0.5])?)?;
//! let p = FourMomentum::from_momentum([0.3, 0.0, 0.05], cfg.proton_mass);
//! let n = FourMomentum::from_momentum([0.3, 0.0, -0.05], cfg.neutron_mass);
//! let out = co.process_momenta(&[p], &[n], &[], &[]);
//! assert_eq!(out.deuterons.records.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod driver;
pub mod error;
pub mod input;
pub mod output;

#[cfg(feature = "python")]
mod python;
