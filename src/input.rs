//! Plain-text event listings.
//!
//! One particle per line, whitespace separated:
//!
//! ```text
//! <pdg> <final:0|1> <px> <py> <pz> <e>
//! ```
//!
//! A blank line ends an event and `#` starts a comment line.

use crate::core::event::EventRecord;
use crate::core::particle::{FourMomentum, Particle};
use crate::error::{Error, Result};
use std::io::{BufRead, Lines};

const FIELDS: usize = 6;

/// Parse one particle line.
pub fn parse_particle(line: &str) -> Result<Particle> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != FIELDS {
        return Err(Error::parse(
            0,
            format!("expected {FIELDS} fields, got {}", fields.len()),
        ));
    }
    let pdg: i32 = fields[0]
        .parse()
        .map_err(|e| Error::parse(0, format!("bad pdg code {:?}: {e}", fields[0])))?;
    let is_final = match fields[1] {
        "1" => true,
        "0" => false,
        other => {
            return Err(Error::parse(
                0,
                format!("final flag must be 0 or 1, got {other:?}"),
            ))
        }
    };
    let mut p = [0.0_f64; 4];
    for (v, text) in p.iter_mut().zip(&fields[2..]) {
        *v = text
            .parse()
            .map_err(|e| Error::parse(0, format!("bad momentum component {text:?}: {e}")))?;
    }
    Particle::new(pdg, FourMomentum::new(p[0], p[1], p[2], p[3]), is_final)
        .map_err(|e| Error::parse(0, e.to_string()))
}

/// Reads events from a listing, one [`EventRecord`] per blank-line separated block.
///
/// A malformed line fails its whole event: the rest of the block is skipped
/// and the next call resumes with the following event.
#[derive(Debug)]
pub struct TextEventReader<R> {
    lines: Lines<R>,
    line: usize,
}

impl<R: BufRead> TextEventReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }
}

impl<R: BufRead> Iterator for TextEventReader<R> {
    type Item = Result<EventRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut particles = Vec::new();
        let mut failure: Option<Error> = None;
        let mut started = false;

        loop {
            let Some(line) = self.lines.next() else {
                break;
            };
            self.line += 1;
            let line = match line {
                Ok(l) => l,
                Err(e) => return Some(Err(e.into())),
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                if started {
                    break;
                }
                continue;
            }
            if trimmed.starts_with('#') {
                continue;
            }
            started = true;
            if failure.is_some() {
                continue;
            }
            match parse_particle(trimmed) {
                Ok(p) => particles.push(p),
                Err(e) => failure = Some(e.at_line(self.line)),
            }
        }

        if !started {
            return None;
        }
        Some(match failure {
            Some(e) => Err(e),
            None => Ok(EventRecord::new(particles)),
        })
    }
}
