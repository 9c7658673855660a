mod density_curve;
mod snapshot;

pub use density_curve::DensityCurve;
pub use snapshot::Snapshot;
