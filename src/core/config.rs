//! Physical constants of the coalescence model, passed explicitly to every stage.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Immutable configuration of one coalescence run.
///
/// Masses are in GeV, the momentum window in GeV/c.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoalescenceConfig {
    /// Rest mass used for the first (proton-like) slot of a pair.
    pub proton_mass: f64,
    /// Rest mass used for the second (neutron-like) slot of a pair.
    pub neutron_mass: f64,
    /// Target mass of the composite; the emitted energy is projected onto this shell.
    pub deuteron_mass: f64,
    /// CM relative momentum at and above which a pair never coalesces (200 MeV/c).
    pub max_delta_p: f64,
    /// Global scaling applied to every probability at acceptance time.
    pub spin_scale: f64,
    /// Species code written for deuterons; anti-deuterons carry its negation.
    pub deuteron_pdg: i32,
}

impl Default for CoalescenceConfig {
    fn default() -> Self {
        Self {
            proton_mass: 0.938272013,
            neutron_mass: 0.939565378,
            deuteron_mass: 1.87561282,
            max_delta_p: 0.2,
            spin_scale: 1.0,
            deuteron_pdg: 1_000_010_020,
        }
    }
}

impl CoalescenceConfig {
    /// Parse a TOML document. Missing keys take their default values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check that every constant is physical.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("proton_mass", self.proton_mass),
            ("neutron_mass", self.neutron_mass),
            ("deuteron_mass", self.deuteron_mass),
            ("max_delta_p", self.max_delta_p),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidParam(format!(
                    "{name} must be finite and > 0, got {value}"
                )));
            }
        }
        if !self.spin_scale.is_finite() || self.spin_scale <= 0.0 || self.spin_scale > 1.0 {
            return Err(Error::InvalidParam(format!(
                "spin_scale must lie in (0, 1], got {}",
                self.spin_scale
            )));
        }
        if self.deuteron_pdg == 0 {
            return Err(Error::InvalidParam("deuteron_pdg must be non-zero".into()));
        }
        Ok(())
    }

    /// Proton minus neutron rest mass.
    #[inline]
    pub fn delta_mass(&self) -> f64 {
        self.proton_mass - self.neutron_mass
    }

    /// Species code written for anti-deuterons.
    #[inline]
    pub fn anti_deuteron_pdg(&self) -> i32 {
        -self.deuteron_pdg
    }
}
