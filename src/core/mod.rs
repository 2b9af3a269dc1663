#![allow(missing_docs)] // Public items carry docs in their own submodules

//! Coalescence core: nucleon kinematics, the momentum-window probability
//! model, candidate generation, randomized greedy selection, and the
//! per-event driver that runs the matter and antimatter passes.

pub mod candidate;
pub mod coalesce;
pub mod config;
pub mod event;
pub mod kinematics;
pub mod particle;
pub mod probability;
pub mod random;
pub mod selector;

pub use candidate::{generate_candidates, Candidate};
pub use coalesce::{coalescence_pass, Coalescer, EventYield, PassOutput};
pub use config::CoalescenceConfig;
pub use event::{EventRecord, NucleonLists};
pub use kinematics::{build_record, composite_momentum, OutputRecord};
pub use particle::{FourMomentum, Particle, Species};
pub use probability::{coalescence_probability, relative_momentum, NO_COALESCENCE};
pub use random::{RandomStream, ReplayStream, SeededStream};
pub use selector::{select, AcceptedPair, CandidateStatus, Selection, SelectionReport};
