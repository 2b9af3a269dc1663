use crate::core::candidate::generate_candidates;
use crate::core::config::CoalescenceConfig;
use crate::core::event::{momenta, EventRecord, NucleonLists};
use crate::core::kinematics::{build_record, OutputRecord};
use crate::core::particle::FourMomentum;
use crate::core::random::RandomStream;
use crate::core::selector::{select, SelectionReport};
use crate::error::Result;
use log::debug;

/// Records and selection counters of one species-parity pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassOutput {
    pub records: Vec<OutputRecord>,
    pub report: SelectionReport,
}

/// Run generation, selection and kinematics for one list pair.
///
/// `pdg` tags every emitted record. Random draws come only from the selector,
/// so an empty list on either side consumes nothing from `rng`.
pub fn coalescence_pass<R: RandomStream + ?Sized>(
    cfg: &CoalescenceConfig,
    protons: &[FourMomentum],
    neutrons: &[FourMomentum],
    pdg: i32,
    rng: &mut R,
) -> PassOutput {
    let candidates = generate_candidates(cfg, protons, neutrons);
    let selection = select(candidates, cfg.spin_scale, rng);
    let records = selection
        .accepted
        .iter()
        .map(|pair| build_record(cfg, pdg, &protons[pair.proton], &neutrons[pair.neutron]))
        .collect();
    debug!(
        "pass pdg={} protons={} neutrons={} candidates={} draws={} accepted={} pruned={}",
        pdg,
        protons.len(),
        neutrons.len(),
        selection.report.candidates,
        selection.report.draws,
        selection.report.accepted,
        selection.report.pruned,
    );
    PassOutput {
        records,
        report: selection.report,
    }
}

/// Output of both passes over one event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventYield {
    pub deuterons: PassOutput,
    pub antideuterons: PassOutput,
}

impl EventYield {
    /// Deuteron records followed by anti-deuteron records, the order they are written in.
    pub fn records(&self) -> impl Iterator<Item = &OutputRecord> {
        self.deuterons
            .records
            .iter()
            .chain(self.antideuterons.records.iter())
    }

    pub fn len(&self) -> usize {
        self.deuterons.records.len() + self.antideuterons.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-event driver: owns the configuration and the random stream shared by
/// the matter and antimatter passes of every event.
#[derive(Debug, Clone)]
pub struct Coalescer<R> {
    config: CoalescenceConfig,
    stream: R,
    events_processed: u64,
    deuterons: u64,
    antideuterons: u64,
}

impl<R: RandomStream> Coalescer<R> {
    /// Errors:
    /// - `Error::InvalidParam` if `config` fails validation.
    pub fn new(config: CoalescenceConfig, stream: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            stream,
            events_processed: 0,
            deuterons: 0,
            antideuterons: 0,
        })
    }

    pub fn config(&self) -> &CoalescenceConfig {
        &self.config
    }

    pub fn stream(&self) -> &R {
        &self.stream
    }

    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    /// Total deuterons and anti-deuterons produced so far.
    pub fn produced(&self) -> (u64, u64) {
        (self.deuterons, self.antideuterons)
    }

    /// Classify an event record and coalesce its nucleons.
    pub fn process_event(&mut self, event: &EventRecord) -> EventYield {
        let lists = NucleonLists::classify(event);
        self.process_lists(&lists)
    }

    /// Deuteron pass then anti-deuteron pass over already classified nucleons.
    pub fn process_lists(&mut self, lists: &NucleonLists<'_>) -> EventYield {
        self.process_momenta(
            &momenta(&lists.protons),
            &momenta(&lists.neutrons),
            &momenta(&lists.antiprotons),
            &momenta(&lists.antineutrons),
        )
    }

    /// Both passes over raw momenta, one list per species.
    pub fn process_momenta(
        &mut self,
        protons: &[FourMomentum],
        neutrons: &[FourMomentum],
        antiprotons: &[FourMomentum],
        antineutrons: &[FourMomentum],
    ) -> EventYield {
        let cfg = self.config;
        let deuterons =
            coalescence_pass(&cfg, protons, neutrons, cfg.deuteron_pdg, &mut self.stream);
        let antideuterons = coalescence_pass(
            &cfg,
            antiprotons,
            antineutrons,
            cfg.anti_deuteron_pdg(),
            &mut self.stream,
        );
        self.events_processed += 1;
        self.deuterons += deuterons.records.len() as u64;
        self.antideuterons += antideuterons.records.len() as u64;
        EventYield {
            deuterons,
            antideuterons,
        }
    }
}
