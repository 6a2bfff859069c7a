use crate::error::{Error, Result};

pub const NTOTAL: usize = 1_000_000;
pub const DIM: usize = 512;
pub const NLIST: usize = 1000;
pub const RUNS: usize = 10;
pub const FLAT_LEN: usize = NTOTAL * DIM;

/// Shape of a partitioned corpus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorpusConfig {
    /// Total vectors across all partitions.
    pub ntotal: usize,
    pub nlist: usize,
    /// Vector dimensionality.
    pub dim: usize,
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self { ntotal: NTOTAL, nlist: NLIST, dim: DIM, seed: None }
    }
}

impl CorpusConfig {
    #[inline]
    pub const fn new(ntotal: usize, nlist: usize, dim: usize) -> Self {
        Self { ntotal, nlist, dim, seed: None }
    }

    #[inline]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.nlist == 0 {
            return Err(Error::InvalidConfig("nlist"));
        }
        if self.dim == 0 {
            return Err(Error::InvalidConfig("dim"));
        }
        self.total_elements()?;
        Ok(())
    }

    /// Destination length in elements.
    #[inline]
    pub fn total_elements(&self) -> Result<usize> {
        self.ntotal.checked_mul(self.dim).ok_or(Error::Overflow("ntotal * dim"))
    }
}

/// Unit used when printing timings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Resolution {
    #[default]
    Micros,
    Millis,
}

impl Resolution {
    pub const fn suffix(self) -> &'static str {
        match self {
            Resolution::Micros => "μs",
            Resolution::Millis => "ms",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Timed invocations per strategy.
    pub runs: usize,
    pub resolution: Resolution,
    /// Print one line per timed invocation.
    pub per_run: bool,
    /// Keep one destination buffer across invocations instead of a fresh one each time.
    pub reuse_destination: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self { runs: RUNS, resolution: Resolution::Micros, per_run: true, reuse_destination: false }
    }
}

impl HarnessConfig {
    /// Millisecond timings with one destination reused across runs.
    pub fn flat() -> Self {
        Self { resolution: Resolution::Millis, reuse_destination: true, ..Default::default() }
    }

    pub fn validate(&self) -> Result<()> {
        if self.runs == 0 {
            return Err(Error::InvalidConfig("runs"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let cfg = CorpusConfig::default();
        assert_eq!((cfg.ntotal, cfg.nlist, cfg.dim), (NTOTAL, NLIST, DIM));
        assert_eq!(cfg.total_elements().unwrap(), FLAT_LEN);
        assert_eq!(HarnessConfig::default().runs, RUNS);
    }

    #[test]
    fn rejects_degenerate_shapes() {
        assert!(matches!(CorpusConfig::new(10, 0, 4).validate(), Err(Error::InvalidConfig("nlist"))));
        assert!(matches!(CorpusConfig::new(10, 4, 0).validate(), Err(Error::InvalidConfig("dim"))));
        assert!(CorpusConfig::new(0, 4, 4).validate().is_ok());
        assert!(matches!(CorpusConfig::new(usize::MAX, 4, 2).validate(), Err(Error::Overflow("ntotal * dim"))));

        let harness = HarnessConfig { runs: 0, ..Default::default() };
        assert!(matches!(harness.validate(), Err(Error::InvalidConfig("runs"))));
    }
}
