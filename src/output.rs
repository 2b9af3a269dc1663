//! Output stream: one tab-separated line per coalesced nucleus, closed by a
//! `#<events>` footer, plus the merge of several such files into one.

use crate::core::kinematics::OutputRecord;
use crate::error::{Error, Result};
use log::info;
use std::io::{BufRead, Write};

/// Line prefix of the event-count footer.
pub const FOOTER_PREFIX: char = '#';

/// Append-only writer of [`OutputRecord`] lines.
#[derive(Debug)]
pub struct RecordWriter<W: Write> {
    inner: W,
    records: u64,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, records: 0 }
    }

    pub fn write_record(&mut self, record: &OutputRecord) -> Result<()> {
        writeln!(self.inner, "{record}")?;
        self.records += 1;
        Ok(())
    }

    pub fn write_records<'a, I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a OutputRecord>,
    {
        for r in records {
            self.write_record(r)?;
        }
        Ok(())
    }

    /// Number of record lines written so far.
    pub fn records_written(&self) -> u64 {
        self.records
    }

    /// Write the `#<events>` footer, flush, and hand back the sink.
    pub fn finish(mut self, events: u64) -> Result<W> {
        writeln!(self.inner, "{FOOTER_PREFIX}{events}")?;
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Totals of a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub inputs: usize,
    pub records: u64,
    pub events: u64,
}

/// Concatenate the records of every input and write a single footer with
/// the summed event count.
///
/// Record lines are validated; a malformed record or footer is a parse error
/// naming the line within its input.
pub fn merge<R, W>(inputs: impl IntoIterator<Item = R>, sink: W) -> Result<MergeSummary>
where
    R: BufRead,
    W: Write,
{
    let mut writer = RecordWriter::new(sink);
    let mut summary = MergeSummary::default();
    for input in inputs {
        summary.inputs += 1;
        for (idx, line) in input.lines().enumerate() {
            let line = line?;
            let lineno = idx + 1;
            if let Some(count) = line.strip_prefix(FOOTER_PREFIX) {
                let n: u64 = count.trim().parse().map_err(|e| {
                    Error::parse(lineno, format!("bad event count {count:?}: {e}"))
                })?;
                summary.events += n;
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }
            let record: OutputRecord = line.parse().map_err(|e: Error| e.at_line(lineno))?;
            writer.write_record(&record)?;
        }
    }
    summary.records = writer.records_written();
    writer.finish(summary.events)?;
    info!(
        "merged {} inputs: {} records from {} events",
        summary.inputs, summary.records, summary.events
    );
    Ok(summary)
}
