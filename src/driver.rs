//! Event loop: feeds events from a source through a [`Coalescer`] into an
//! output stream, tolerating a bounded number of failed events.

use crate::core::coalesce::Coalescer;
use crate::core::event::EventRecord;
use crate::core::random::RandomStream;
use crate::error::{Error, Result};
use crate::output::RecordWriter;
use log::{info, warn};
use std::io::Write;

/// Stopping rules of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLimits {
    /// Stop after this many processed events; `None` runs until the source ends.
    pub max_events: Option<u64>,
    /// The run aborts on the failure that brings the failure count to this value.
    pub max_errors: u64,
}

impl Default for RunLimits {
    fn default() -> Self {
        Self {
            max_events: None,
            max_errors: 10,
        }
    }
}

impl RunLimits {
    /// Reject limits under which no run can make progress.
    pub fn validate(&self) -> Result<()> {
        if self.max_events == Some(0) {
            return Err(Error::InvalidParam("max_events must be > 0 when set".into()));
        }
        if self.max_errors == 0 {
            return Err(Error::InvalidParam("max_errors must be > 0".into()));
        }
        Ok(())
    }
}

/// Totals of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub events: u64,
    pub deuterons: u64,
    pub antideuterons: u64,
    pub failures: u64,
    /// True when the failure budget ran out before the source was exhausted.
    pub aborted: bool,
}

/// Process `events` in order, writing every record to `sink` and the
/// `#<events>` footer at the end.
///
/// Parse and parameter failures of single events count against
/// `limits.max_errors`; I/O errors end the run immediately. Limits that fail
/// [`RunLimits::validate`] are rejected before anything is written.
pub fn run<R, I, W>(
    coalescer: &mut Coalescer<R>,
    events: I,
    sink: W,
    limits: &RunLimits,
) -> Result<RunSummary>
where
    R: RandomStream,
    I: IntoIterator<Item = Result<EventRecord>>,
    W: Write,
{
    limits.validate()?;
    let mut writer = RecordWriter::new(sink);
    let mut summary = RunSummary::default();

    for event in events {
        if limits.max_events.is_some_and(|max| summary.events >= max) {
            break;
        }
        let event = match event {
            Ok(ev) => ev,
            Err(Error::Io(e)) => return Err(Error::Io(e)),
            Err(e) => {
                summary.failures += 1;
                if summary.failures < limits.max_errors {
                    warn!("skipping event after failure {}: {e}", summary.failures);
                    continue;
                }
                warn!("aborting run after {} failed events: {e}", summary.failures);
                summary.aborted = true;
                break;
            }
        };

        let out = coalescer.process_event(&event);
        writer.write_records(out.records())?;
        summary.events += 1;
        summary.deuterons += out.deuterons.records.len() as u64;
        summary.antideuterons += out.antideuterons.records.len() as u64;
    }

    writer.finish(summary.events)?;
    info!(
        "processed {} events: {} deuterons, {} anti-deuterons, {} failures{}",
        summary.events,
        summary.deuterons,
        summary.antideuterons,
        summary.failures,
        if summary.aborted { " (aborted)" } else { "" }
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CoalescenceConfig;
    use crate::core::particle::{FourMomentum, Particle};
    use crate::core::random::SeededStream;

    fn pair_event() -> Result<EventRecord> {
        let cfg = CoalescenceConfig::default();
        Ok(EventRecord::new(vec![
            Particle::new(2212, FourMomentum::from_momentum([0.5, 0.0, 0.1], cfg.proton_mass), true)?,
            Particle::new(2112, FourMomentum::from_momentum([0.5, 0.0, 0.1], cfg.neutron_mass), true)?,
        ]))
    }

    fn coalescer() -> Result<Coalescer<SeededStream>> {
        Coalescer::new(CoalescenceConfig::default(), SeededStream::new(Some(99)))
    }

    #[test]
    fn writes_records_and_footer() -> Result<()> {
        let mut co = coalescer()?;
        let events = vec![pair_event(), Ok(EventRecord::default()), pair_event()];
        let mut out = Vec::new();
        let summary = run(&mut co, events, &mut out, &RunLimits::default())?;
        assert_eq!(summary.events, 3);
        assert!(!summary.aborted);
        let text = String::from_utf8(out).map_err(|e| Error::InvalidParam(e.to_string()))?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.last(), Some(&"#3"));
        assert_eq!(lines.len() as u64, summary.deuterons + 1);
        Ok(())
    }

    #[test]
    fn max_events_stops_early() -> Result<()> {
        let mut co = coalescer()?;
        let events = (0..10).map(|_| pair_event());
        let limits = RunLimits {
            max_events: Some(4),
            ..RunLimits::default()
        };
        let summary = run(&mut co, events, Vec::new(), &limits)?;
        assert_eq!(summary.events, 4);
        assert_eq!(co.events_processed(), 4);
        Ok(())
    }

    #[test]
    fn failures_tolerated_until_budget() -> Result<()> {
        let bad = || Err(Error::parse(1, "broken"));
        let mut co = coalescer()?;
        let events = vec![bad(), pair_event(), bad(), pair_event()];
        let limits = RunLimits {
            max_events: None,
            max_errors: 3,
        };
        let summary = run(&mut co, events, Vec::new(), &limits)?;
        assert_eq!(summary.failures, 2);
        assert_eq!(summary.events, 2);
        assert!(!summary.aborted);

        let mut co = coalescer()?;
        let events = vec![pair_event(), bad(), bad(), bad(), pair_event()];
        let summary = run(&mut co, events, Vec::new(), &limits)?;
        assert!(summary.aborted);
        assert_eq!(summary.failures, 3);
        assert_eq!(summary.events, 1);
        Ok(())
    }

    #[test]
    fn degenerate_limits_rejected() -> Result<()> {
        let mut co = coalescer()?;
        for limits in [
            RunLimits {
                max_events: Some(0),
                ..RunLimits::default()
            },
            RunLimits {
                max_events: None,
                max_errors: 0,
            },
        ] {
            let mut out = Vec::new();
            let err = run(&mut co, vec![pair_event()], &mut out, &limits).unwrap_err();
            assert!(matches!(err, Error::InvalidParam(_)), "{err}");
            assert!(out.is_empty());
        }
        assert_eq!(co.events_processed(), 0);
        Ok(())
    }

    #[test]
    fn io_errors_are_fatal() -> Result<()> {
        let mut co = coalescer()?;
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated");
        let events = vec![pair_event(), Err(Error::Io(io))];
        let err = run(&mut co, events, Vec::new(), &RunLimits::default()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        Ok(())
    }
}
