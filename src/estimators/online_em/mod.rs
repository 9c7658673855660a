mod batch_em;
mod moment_accumulator;
mod smoothed_em;

pub use batch_em::BatchEmEstimator;
pub use moment_accumulator::MOMENT_FLOOR;
pub use smoothed_em::SmoothedEmEstimator;
