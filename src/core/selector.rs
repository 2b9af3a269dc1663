use crate::core::candidate::Candidate;
use crate::core::random::RandomStream;

/// Outcome of one candidate in a selection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateStatus {
    /// Not yet tested.
    Pending,
    /// Draw fell within the scaled probability.
    Accepted,
    /// Tested and lost the draw.
    Rejected,
    /// Shares a nucleon with an earlier accepted pair, or never had a positive probability.
    Pruned,
}

/// A candidate promoted by the selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptedPair {
    pub proton: usize,
    pub neutron: usize,
    pub probability: f64,
}

/// Counters of one selection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionReport {
    pub candidates: usize,
    pub draws: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub pruned: usize,
}

/// Result of [`select`]: the accepted pairs and the pass counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Accepted pairs in acceptance order.
    pub accepted: Vec<AcceptedPair>,
    pub report: SelectionReport,
}

/// Positions of the candidates that reference each nucleon, in sorted order.
struct NucleonIndex {
    by_proton: Vec<Vec<usize>>,
    by_neutron: Vec<Vec<usize>>,
}

impl NucleonIndex {
    fn build(sorted: &[Candidate]) -> Self {
        let np = sorted.iter().map(|c| c.proton + 1).max().unwrap_or(0);
        let nn = sorted.iter().map(|c| c.neutron + 1).max().unwrap_or(0);
        let mut by_proton = vec![Vec::new(); np];
        let mut by_neutron = vec![Vec::new(); nn];
        for (pos, c) in sorted.iter().enumerate() {
            by_proton[c.proton].push(pos);
            by_neutron[c.neutron].push(pos);
        }
        Self {
            by_proton,
            by_neutron,
        }
    }

    /// Candidates after `pos` that share a nucleon with the candidate at `pos`.
    fn later_conflicts<'a>(
        &'a self,
        pos: usize,
        c: &Candidate,
    ) -> impl Iterator<Item = usize> + 'a {
        let after = |list: &'a Vec<usize>| {
            let start = list.partition_point(|&p| p <= pos);
            list[start..].iter().copied()
        };
        after(&self.by_proton[c.proton]).chain(after(&self.by_neutron[c.neutron]))
    }
}

/// Greedy randomized matching over `candidates`.
///
/// Candidates are stably sorted by ascending probability and visited once. A
/// pending candidate consumes exactly one draw from `rng` and is accepted when
/// `draw <= probability * spin_scale`; acceptance prunes every later candidate
/// sharing its proton or its neutron. Pruned candidates never draw, so no
/// nucleon appears in more than one accepted pair.
pub fn select<R: RandomStream + ?Sized>(
    mut candidates: Vec<Candidate>,
    spin_scale: f64,
    rng: &mut R,
) -> Selection {
    candidates.sort_by_key(|c| c.probability);
    let index = NucleonIndex::build(&candidates);

    let mut status: Vec<CandidateStatus> = candidates
        .iter()
        .map(|c| {
            if c.probability_f64() > 0.0 {
                CandidateStatus::Pending
            } else {
                CandidateStatus::Pruned
            }
        })
        .collect();

    let mut accepted = Vec::new();
    let mut report = SelectionReport {
        candidates: candidates.len(),
        ..SelectionReport::default()
    };

    for (pos, c) in candidates.iter().enumerate() {
        if status[pos] != CandidateStatus::Pending {
            continue;
        }
        report.draws += 1;
        let prob = c.probability_f64();
        if rng.uniform() <= prob * spin_scale {
            status[pos] = CandidateStatus::Accepted;
            for other in index.later_conflicts(pos, c) {
                status[other] = CandidateStatus::Pruned;
            }
            accepted.push(AcceptedPair {
                proton: c.proton,
                neutron: c.neutron,
                probability: prob,
            });
        } else {
            status[pos] = CandidateStatus::Rejected;
        }
    }

    for s in &status {
        match s {
            CandidateStatus::Accepted => report.accepted += 1,
            CandidateStatus::Rejected => report.rejected += 1,
            CandidateStatus::Pruned => report.pruned += 1,
            CandidateStatus::Pending => {}
        }
    }

    Selection { accepted, report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::{ReplayStream, SeededStream};
    use crate::error::Result;
    use ordered_float::NotNan;
    use std::collections::HashSet;

    fn cand(proton: usize, neutron: usize, prob: f64) -> Candidate {
        Candidate {
            proton,
            neutron,
            probability: NotNan::new(prob).unwrap(),
        }
    }

    #[test]
    fn empty_input_draws_nothing() -> Result<()> {
        let mut rng = ReplayStream::new(vec![0.0])?;
        let sel = select(Vec::new(), 1.0, &mut rng);
        assert!(sel.accepted.is_empty());
        assert_eq!(sel.report, SelectionReport::default());
        assert_eq!(rng.consumed(), 0);
        Ok(())
    }

    #[test]
    fn lowest_probability_gets_first_draw() -> Result<()> {
        // Both claim proton 0. Sorted order is (0,1) at 0.3, then (0,0) at 0.9.
        let cands = vec![cand(0, 0, 0.9), cand(0, 1, 0.3)];
        let mut rng = ReplayStream::new(vec![0.1, 0.1])?;
        let sel = select(cands, 1.0, &mut rng);
        assert_eq!(sel.accepted.len(), 1);
        assert_eq!((sel.accepted[0].proton, sel.accepted[0].neutron), (0, 1));
        // The pruned competitor never drew.
        assert_eq!(rng.consumed(), 1);
        assert_eq!(sel.report.pruned, 1);
        assert_eq!(sel.report.draws, 1);
        Ok(())
    }

    #[test]
    fn rejection_leaves_competitors_alive() -> Result<()> {
        let cands = vec![cand(0, 0, 0.9), cand(0, 1, 0.3)];
        let mut rng = ReplayStream::new(vec![0.5, 0.5])?;
        let sel = select(cands, 1.0, &mut rng);
        assert_eq!(sel.accepted.len(), 1);
        assert_eq!((sel.accepted[0].proton, sel.accepted[0].neutron), (0, 0));
        assert_eq!(rng.consumed(), 2);
        assert_eq!(sel.report.rejected, 1);
        assert_eq!(sel.report.accepted, 1);
        Ok(())
    }

    #[test]
    fn draw_equal_to_probability_accepts() -> Result<()> {
        let mut rng = ReplayStream::new(vec![0.5])?;
        let sel = select(vec![cand(2, 3, 0.5)], 1.0, &mut rng);
        assert_eq!(sel.accepted.len(), 1);
        Ok(())
    }

    #[test]
    fn spin_scale_shrinks_acceptance() -> Result<()> {
        let mut rng = ReplayStream::new(vec![0.5])?;
        let sel = select(vec![cand(0, 0, 0.8)], 0.5, &mut rng);
        assert!(sel.accepted.is_empty());
        assert_eq!(sel.report.rejected, 1);
        Ok(())
    }

    #[test]
    fn non_positive_candidates_never_draw() -> Result<()> {
        let cands = vec![cand(0, 0, -1.0), cand(1, 1, 0.0), cand(2, 2, 0.4)];
        let mut rng = ReplayStream::new(vec![0.0])?;
        let sel = select(cands, 1.0, &mut rng);
        assert_eq!(rng.consumed(), 1);
        assert_eq!(sel.report.pruned, 2);
        assert_eq!(sel.accepted.len(), 1);
        assert_eq!(sel.accepted[0].proton, 2);
        Ok(())
    }

    #[test]
    fn ties_keep_generation_order() -> Result<()> {
        let cands = vec![cand(0, 0, 0.5), cand(1, 0, 0.5)];
        let mut rng = ReplayStream::new(vec![0.0])?;
        let sel = select(cands, 1.0, &mut rng);
        assert_eq!(sel.accepted.len(), 1);
        assert_eq!(sel.accepted[0].proton, 0);
        Ok(())
    }

    #[test]
    fn accepted_pairs_are_injective_and_reproducible() {
        // Dense all-to-all candidate set with varied probabilities.
        let mut cands = Vec::new();
        for n in 0..12 {
            for p in 0..9 {
                let prob = 0.05 + ((p * 7 + n * 13) % 19) as f64 / 20.0;
                cands.push(cand(p, n, prob));
            }
        }
        for seed in 0..20 {
            let mut a = SeededStream::new(Some(seed));
            let mut b = SeededStream::new(Some(seed));
            let first = select(cands.clone(), 1.0, &mut a);
            let second = select(cands.clone(), 1.0, &mut b);
            assert_eq!(first, second);
            assert_eq!(a.draws(), b.draws());
            assert_eq!(a.draws() as usize, first.report.draws);

            let protons: HashSet<usize> = first.accepted.iter().map(|x| x.proton).collect();
            let neutrons: HashSet<usize> = first.accepted.iter().map(|x| x.neutron).collect();
            assert_eq!(protons.len(), first.accepted.len());
            assert_eq!(neutrons.len(), first.accepted.len());
            assert!(first.accepted.len() <= 9);

            let r = first.report;
            assert_eq!(r.accepted + r.rejected + r.pruned, r.candidates);
            assert_eq!(r.accepted + r.rejected, r.draws);
        }
    }
}
