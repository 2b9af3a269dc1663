use crate::core::particle::{FourMomentum, Particle, Species};

/// All particles of one generated collision event, in generator order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventRecord {
    pub particles: Vec<Particle>,
}

impl EventRecord {
    pub fn new(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl FromIterator<Particle> for EventRecord {
    fn from_iter<I: IntoIterator<Item = Particle>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Final-state nucleons of one event, borrowed from its [`EventRecord`].
///
/// Each list keeps record order, which fixes candidate enumeration order.
#[derive(Debug, Clone, Default)]
pub struct NucleonLists<'a> {
    pub protons: Vec<&'a Particle>,
    pub neutrons: Vec<&'a Particle>,
    pub antiprotons: Vec<&'a Particle>,
    pub antineutrons: Vec<&'a Particle>,
}

impl<'a> NucleonLists<'a> {
    /// Sort the final-state nucleons of `event` into the four species lists.
    /// Non-final particles and non-nucleons are skipped.
    pub fn classify(event: &'a EventRecord) -> Self {
        let mut lists = Self::default();
        for particle in event.particles.iter().filter(|p| p.is_final) {
            let Some(species) = particle.species() else {
                continue;
            };
            lists.list_mut(species).push(particle);
        }
        lists
    }

    fn list_mut(&mut self, species: Species) -> &mut Vec<&'a Particle> {
        match species {
            Species::Proton => &mut self.protons,
            Species::Neutron => &mut self.neutrons,
            Species::AntiProton => &mut self.antiprotons,
            Species::AntiNeutron => &mut self.antineutrons,
        }
    }

    /// Total number of classified nucleons.
    pub fn len(&self) -> usize {
        self.protons.len() + self.neutrons.len() + self.antiprotons.len() + self.antineutrons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Momenta of a nucleon list, in list order.
pub fn momenta(list: &[&Particle]) -> Vec<FourMomentum> {
    list.iter().map(|p| p.p).collect()
}
