use crate::streams::Stream;
use std::io::Error;

/// Replays a fixed list of samples.
pub struct VecStream {
    pub samples: Vec<f64>,
    idx: usize,
}

impl VecStream {
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples, idx: 0 }
    }
}

impl Stream for VecStream {
    fn has_more_samples(&self) -> bool {
        self.idx < self.samples.len()
    }

    fn next_sample(&mut self) -> Option<f64> {
        if !self.has_more_samples() {
            return None;
        }
        let x = self.samples[self.idx];
        self.idx += 1;
        Some(x)
    }

    fn restart(&mut self) -> Result<(), Error> {
        self.idx = 0;
        Ok(())
    }
}
