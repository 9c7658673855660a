use crate::utils::math::signed_floor;

/// Magnitude below which accumulated moments are pushed back out, and below
/// which an M-step weight is zeroed.
pub const MOMENT_FLOOR: f64 = 1e-12;

/// Responsibility-weighted moment sums of the current batch.
///
/// `zeroth[i] = Σ r_i`, `first[i] = Σ r_i x`, `second[i] = Σ r_i x²`. After
/// every addition the zeroth and second sums are floored at
/// [`MOMENT_FLOOR`] and the first sum is floored in magnitude, keeping its
/// sign, so the M-step never divides by a vanishing mass.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct MomentAccumulator {
    zeroth: Vec<f64>,
    first: Vec<f64>,
    second: Vec<f64>,
    samples: usize,
}

impl MomentAccumulator {
    pub(crate) fn new(k: usize) -> Self {
        Self {
            zeroth: vec![0.0; k],
            first: vec![0.0; k],
            second: vec![0.0; k],
            samples: 0,
        }
    }

    pub(crate) fn accumulate(&mut self, responsibilities: &[f64], x: f64) {
        debug_assert_eq!(responsibilities.len(), self.zeroth.len());
        for (i, &r) in responsibilities.iter().enumerate() {
            self.zeroth[i] = floor_positive(self.zeroth[i] + r);
            self.first[i] = signed_floor(self.first[i] + r * x, MOMENT_FLOOR);
            self.second[i] = floor_positive(self.second[i] + r * x * x);
        }
        self.samples += 1;
    }

    pub(crate) fn reset(&mut self) {
        self.zeroth.fill(0.0);
        self.first.fill(0.0);
        self.second.fill(0.0);
        self.samples = 0;
    }

    #[inline]
    pub(crate) fn samples(&self) -> usize {
        self.samples
    }

    pub(crate) fn zeroth(&self) -> &[f64] {
        &self.zeroth
    }

    pub(crate) fn first(&self) -> &[f64] {
        &self.first
    }

    pub(crate) fn second(&self) -> &[f64] {
        &self.second
    }
}

// NaN compares false and passes through untouched.
#[inline]
fn floor_positive(value: f64) -> f64 {
    if value < MOMENT_FLOOR {
        MOMENT_FLOOR
    } else {
        value
    }
}
