use std::io::{Error, ErrorKind};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::core::mixture::MixtureState;
use crate::streams::stream::Stream;

/// Draws samples from a fixed Gaussian mixture.
///
/// A component is picked with probability proportional to its weight (the
/// weights need not sum to one), then a value is drawn from its normal.
#[derive(Debug)]
pub struct GaussianMixtureGenerator {
    seed: u64,
    rng: StdRng,
    mixture: MixtureState,
    cumulative: Vec<f64>,
    normals: Vec<Normal<f64>>,
    last_active: usize,
    max_samples: Option<usize>,
    produced: usize,
}

impl GaussianMixtureGenerator {
    pub fn new(
        mixture: MixtureState,
        max_samples: Option<usize>,
        seed: u64,
    ) -> Result<Self, Error> {
        if mixture.is_degenerate() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "mixture parameters must be finite",
            ));
        }
        let total = mixture.weight_sum();
        if !(total > 0.0) {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "at least one component needs a positive weight",
            ));
        }

        let mut running = 0.0;
        let cumulative = mixture
            .weights()
            .iter()
            .map(|w| {
                running += w / total;
                running
            })
            .collect();
        let normals = mixture
            .components()
            .map(|c| {
                Normal::new(c.mean, c.std_dev)
                    .map_err(|e| Error::new(ErrorKind::InvalidInput, e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let last_active = mixture
            .weights()
            .iter()
            .rposition(|&w| w > 0.0)
            .unwrap_or(0);

        Ok(Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            mixture,
            cumulative,
            normals,
            last_active,
            max_samples,
            produced: 0,
        })
    }

    pub fn mixture(&self) -> &MixtureState {
        &self.mixture
    }

    #[inline]
    fn pick_component(&mut self) -> usize {
        let u: f64 = self.rng.random();
        self.cumulative
            .iter()
            .position(|&c| u < c)
            .unwrap_or(self.last_active)
    }
}

impl Stream for GaussianMixtureGenerator {
    fn has_more_samples(&self) -> bool {
        self.max_samples.map_or(true, |max| self.produced < max)
    }

    fn next_sample(&mut self) -> Option<f64> {
        if !self.has_more_samples() {
            return None;
        }
        let index = self.pick_component();
        let x = self.normals[index].sample(&mut self.rng);
        self.produced += 1;
        Some(x)
    }

    fn restart(&mut self) -> Result<(), Error> {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.produced = 0;
        Ok(())
    }
}
