use crate::error::{Error, Result};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};

/// A sequential source of uniform draws in `[0, 1)`.
///
/// The selector consumes exactly one draw per candidate it tests, so a run is
/// reproducible from the stream's sequence of outputs alone.
pub trait RandomStream {
    fn uniform(&mut self) -> f64;
}

impl<T: RandomStream + ?Sized> RandomStream for &mut T {
    #[inline]
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }
}

/// Pseudo-random stream backed by a seedable `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededStream {
    rng: StdRng,
    draws: u64,
}

impl SeededStream {
    /// Seed from `seed`, or from thread entropy when `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng: StdRng = match seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };
        Self { rng, draws: 0 }
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl RandomStream for SeededStream {
    fn uniform(&mut self) -> f64 {
        self.draws += 1;
        self.rng.random::<f64>()
    }
}

/// Replays a fixed list of draws, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ReplayStream {
    values: Vec<f64>,
    consumed: usize,
}

impl ReplayStream {
    /// Errors:
    /// - `Error::InvalidParam` if `values` is empty or any value lies outside `[0, 1)`.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::InvalidParam("replay stream needs at least one draw".into()));
        }
        if let Some(bad) = values.iter().find(|v| !(0.0..1.0).contains(*v)) {
            return Err(Error::InvalidParam(format!(
                "replayed draws must lie in [0, 1), got {bad}"
            )));
        }
        Ok(Self { values, consumed: 0 })
    }

    /// Number of draws handed out so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl RandomStream for ReplayStream {
    fn uniform(&mut self) -> f64 {
        let v = self.values[self.consumed % self.values.len()];
        self.consumed += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_stream_is_reproducible() {
        let mut a = SeededStream::new(Some(42));
        let mut b = SeededStream::new(Some(42));
        for _ in 0..100 {
            let (x, y) = (a.uniform(), b.uniform());
            assert_eq!(x, y);
            assert!((0.0..1.0).contains(&x));
        }
        assert_eq!(a.draws(), 100);
    }

    #[test]
    fn replay_wraps_and_counts() -> Result<()> {
        let mut s = ReplayStream::new(vec![0.1, 0.9])?;
        let got: Vec<f64> = (0..5).map(|_| s.uniform()).collect();
        assert_eq!(got, vec![0.1, 0.9, 0.1, 0.9, 0.1]);
        assert_eq!(s.consumed(), 5);
        Ok(())
    }

    #[test]
    fn replay_rejects_bad_draws() {
        assert!(ReplayStream::new(vec![]).is_err());
        let err = ReplayStream::new(vec![0.2, 1.0]).unwrap_err();
        assert!(err.to_string().contains("[0, 1)"));
        assert!(ReplayStream::new(vec![f64::NAN]).is_err());
    }

    #[test]
    fn mutable_reference_forwards() -> Result<()> {
        fn draw<R: RandomStream>(mut r: R) -> f64 {
            r.uniform()
        }
        let mut s = ReplayStream::new(vec![0.25])?;
        assert_eq!(draw(&mut s), 0.25);
        assert_eq!(s.consumed(), 1);
        Ok(())
    }
}
