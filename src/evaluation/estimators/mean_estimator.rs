use crate::evaluation::estimators::Estimator;

/// Streaming mean of the finite values seen so far.
///
/// `NaN` and infinite values (a log density of a sample the model gives zero
/// mass to, for instance) are counted separately instead of swamping the
/// mean.
#[derive(Debug, Default, Clone, Copy)]
pub struct MeanEstimator {
    len: f64,
    sum: f64,
    skipped: u64,
}

impl MeanEstimator {
    pub fn len(&self) -> u64 {
        self.len as u64
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0.0
    }

    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

impl Estimator for MeanEstimator {
    #[inline]
    fn add(&mut self, v: f64) {
        if !v.is_finite() {
            self.skipped += 1;
            return;
        }
        self.len += 1.0;
        self.sum += v;
    }

    #[inline]
    fn estimation(&self) -> f64 {
        if self.len > 0.0 {
            self.sum / self.len
        } else {
            f64::NAN
        }
    }
}
